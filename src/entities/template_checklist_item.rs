//! Template checklist item entity - A sub-task of a template card.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Template checklist item database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "template_checklist_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Template card this item belongs to
    pub template_card_id: Uuid,
    /// Sub-task text, copied verbatim onto board checklists
    pub text: String,
    /// Position within the template card
    pub display_order: i32,
}

/// Each template checklist item belongs to one template card
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// The owning template card
    #[sea_orm(
        belongs_to = "super::template_card::Entity",
        from = "Column::TemplateCardId",
        to = "super::template_card::Column::Id",
        on_delete = "Cascade"
    )]
    TemplateCard,
}

impl Related<super::template_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateCard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
