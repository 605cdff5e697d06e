//! `lesson_plan_items` table
//!
//! The actable's own id is stored alongside its type tag; its remaining
//! fields live in `actable_data`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "lesson_plan_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub position: i32,
    pub title: String,
    pub description: Option<String>,
    pub start_at: DateTimeWithTimeZone,
    pub bonus_end_at: Option<DateTimeWithTimeZone>,
    pub end_at: Option<DateTimeWithTimeZone>,
    pub actable_type: String,
    #[sea_orm(unique)]
    pub actable_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub actable_data: Json,
    pub creator_id: Uuid,
    pub updater_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
