//! Checklist item entity - A sub-task of a card, toggled independently of the card's lane.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Checklist item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "checklist_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Card this item belongs to
    pub card_id: Uuid,
    /// Sub-task text, copied from the template
    pub text: String,
    /// Whether the sub-task is ticked
    pub is_done: bool,
    /// Position within the card; unique per card
    pub display_order: i32,
}

/// Each checklist item belongs to one card
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The owning card
    #[sea_orm(
        belongs_to = "super::card::Entity",
        from = "Column::CardId",
        to = "super::card::Column::Id",
        on_delete = "Cascade"
    )]
    Card,
}

impl Related<super::card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Card.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
