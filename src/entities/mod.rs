//! Entity module - Contains all SeaORM entity definitions for the database.
//! Template tables are read-only blueprints; board tables hold each student's progress.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod board;
pub mod card;
pub mod checklist_item;
pub mod subject;
pub mod template;
pub mod template_card;
pub mod template_checklist_item;

// Re-export specific types to avoid conflicts
pub use board::{Column as BoardColumn, Entity as Board, Model as BoardModel};
pub use card::{CardStatus, Column as CardColumn, Entity as Card, Model as CardModel, Plan};
pub use checklist_item::{
    Column as ChecklistItemColumn, Entity as ChecklistItem, Model as ChecklistItemModel,
};
pub use subject::{Column as SubjectColumn, Entity as Subject, Model as SubjectModel};
pub use template::{Column as TemplateColumn, Entity as Template, Model as TemplateModel};
pub use template_card::{
    Column as TemplateCardColumn, Entity as TemplateCard, Model as TemplateCardModel,
};
pub use template_checklist_item::{
    Column as TemplateChecklistItemColumn, Entity as TemplateChecklistItem,
    Model as TemplateChecklistItemModel,
};
