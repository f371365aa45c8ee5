//! Subject entity - A curriculum subject offered for one grade in one country.
//!
//! Subjects are seeded from the templates file and never edited by the application.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Subject database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    /// Stable slug supplied by the seed file (e.g. `"g10-maths"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name (e.g. "Mathematics")
    pub name: String,
    /// School grade this subject belongs to
    pub grade: i32,
    /// Curriculum country code (e.g. `"LK"`)
    pub country: String,
    /// Exam the subject prepares for (e.g. "O/L")
    pub exam: String,
    /// Ordering within a grade's subject list
    pub display_order: i32,
}

/// Defines relationships between Subject and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One subject has a template per grade
    #[sea_orm(has_many = "super::template::Entity")]
    Templates,
    /// One subject is studied on many boards
    #[sea_orm(has_many = "super::board::Entity")]
    Boards,
}

impl Related<super::template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Templates.def()
    }
}

impl Related<super::board::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Boards.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
