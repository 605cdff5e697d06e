//! SeaORM entity definitions, one module per table

pub mod achievements;
pub mod attachment_references;
pub mod attachments;
pub mod conditions;
pub mod courses;
pub mod forums;
pub mod lesson_plan_items;
pub mod levels;
pub mod material_folders;
pub mod materials;
pub mod questions;
pub mod skill_branches;
pub mod skills;
