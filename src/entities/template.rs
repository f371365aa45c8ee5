//! Template entity - The read-only blueprint a board is instantiated from.
//!
//! There is at most one template per (`subject_id`, `grade`) pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Template database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "templates")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Subject this template covers
    pub subject_id: String,
    /// Grade this template covers
    pub grade: i32,
    /// Curriculum country code
    pub country: String,
    /// Whether boards built from this template receive checklist items
    pub checklist_enabled: bool,
}

/// Defines relationships between Template and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each template belongs to one subject
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id"
    )]
    Subject,
    /// One template has many cards
    #[sea_orm(has_many = "super::template_card::Entity")]
    TemplateCards,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::template_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemplateCards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
