//! `conditions` table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "conditions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub conditional_type: String,
    pub conditional_id: Uuid,
    pub actable_type: String,
    pub target_id: Uuid,
    #[sea_orm(column_type = "Double", nullable)]
    pub minimum_grade_percentage: Option<f64>,
    pub creator_id: Uuid,
    pub updater_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
