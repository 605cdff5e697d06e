//! `questions` table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub assessment_id: Uuid,
    pub title: Option<String>,
    pub description: Option<String>,
    pub staff_only_comments: bool,
    #[sea_orm(column_type = "Double")]
    pub maximum_grade: f64,
    pub weight: i32,
    pub actable_type: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub actable_data: Json,
    /// Programming package, if any
    pub attachment_reference_id: Option<Uuid>,
    pub creator_id: Uuid,
    pub updater_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
