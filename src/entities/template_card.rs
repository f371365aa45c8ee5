//! Template card entity - One study topic in a template, copied onto every new board.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Template card database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template_cards")]
pub struct Model {
    /// Unique identifier for the template card
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Template this card belongs to
    pub template_id: Uuid,
    /// Topic title, copied verbatim onto board cards
    pub title: String,
    /// Position within the template
    pub display_order: i32,
}

/// Defines relationships between `TemplateCard` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each template card belongs to one template
    #[sea_orm(
        belongs_to = "super::template::Entity",
        from = "Column::TemplateId",
        to = "super::template::Column::Id",
        on_delete = "Cascade"
    )]
    Template,
    /// One template card has many checklist items
    #[sea_orm(has_many = "super::template_checklist_item::Entity")]
    TemplateChecklistItems,
}

impl Related<super::template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Template.def()
    }
}

impl Related<super::template_checklist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateChecklistItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
