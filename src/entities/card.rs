//! Card entity - One study topic on a board, tracked through a three-lane workflow.
//!
//! `status` and `plan` are independent columns: the plan flag is only meaningful while a
//! card is in progress, but nothing clears it when the card moves to another lane.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Workflow lane of a card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum CardStatus {
    /// Not yet started
    #[sea_orm(string_value = "not_started")]
    NotStarted,
    /// Currently being studied
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Finished
    #[sea_orm(string_value = "done")]
    Done,
}

/// Optional weekly/monthly tag on a card.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// No plan flag
    #[sea_orm(string_value = "none")]
    None,
    /// Planned for this week
    #[sea_orm(string_value = "this_week")]
    ThisWeek,
    /// Planned for this month
    #[sea_orm(string_value = "this_month")]
    ThisMonth,
}

/// Card database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    /// Unique identifier for the card
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Board this card belongs to
    pub board_id: Uuid,
    /// Topic title, copied from the template card
    pub title: String,
    /// Free-text notes written by the student
    pub notes: Option<String>,
    /// Current workflow lane
    pub status: CardStatus,
    /// Weekly/monthly plan flag
    pub plan: Plan,
    /// Position within the board; unique per board
    pub display_order: i32,
    /// When the card was created
    pub created_at: DateTimeUtc,
    /// When the card was last written
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Card and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each card belongs to one board
    #[sea_orm(
        belongs_to = "super::board::Entity",
        from = "Column::BoardId",
        to = "super::board::Column::Id",
        on_delete = "Cascade"
    )]
    Board,
    /// One card has many checklist items
    #[sea_orm(has_many = "super::checklist_item::Entity")]
    ChecklistItems,
}

impl Related<super::board::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Board.def()
    }
}

impl Related<super::checklist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChecklistItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
