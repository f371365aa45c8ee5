//! Board entity - A student's instance of a study plan for one subject and grade.
//!
//! The board remembers the subject and grade it was created from, but has no live link to
//! the template afterwards. Only the two plan-flag settings change after creation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Board database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "boards")]
pub struct Model {
    /// Unique identifier for the board
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Id of the user who owns the board
    pub user_id: String,
    /// Subject the board was created for
    pub subject_id: String,
    /// Grade the board was created for
    pub grade: i32,
    /// Display name (e.g. "G10 Mathematics")
    pub name: String,
    /// Whether the "this week" plan filter is offered
    pub show_weekly: bool,
    /// Whether the "this month" plan filter is offered
    pub show_monthly: bool,
    /// When the board was created
    pub created_at: DateTimeUtc,
    /// When the board or its settings last changed
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Board and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each board studies one subject
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
    /// One board has many cards
    #[sea_orm(has_many = "super::card::Entity")]
    Cards,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
