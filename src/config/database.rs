//! Database configuration module for `StudentBoard`.
//!
//! This module handles the database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Uniqueness rules that the entity macros
//! cannot express (per-board card positions, one template per subject and grade) are added
//! as explicit indexes afterwards.

use crate::entities::{
    Board, Card, ChecklistItem, Subject, Template, TemplateCard, TemplateChecklistItem, board,
    card, checklist_item, template,
};
use crate::errors::Result;
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/studentboard.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable, falling back to a
/// local `SQLite` file.
pub fn get_database_url() -> Result<String> {
    Ok(super::optional_env("DATABASE_URL")?.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()))
}

/// Establishes a connection to the database named by [`get_database_url`].
///
/// For a file-backed `SQLite` URL the parent directory is created first.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url()?;
    if let Some(parent) = sqlite_file_parent(&database_url) {
        std::fs::create_dir_all(parent)?;
    }
    info!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

fn sqlite_file_parent(database_url: &str) -> Option<&Path> {
    let file = database_url.strip_prefix("sqlite://")?;
    let file = file.split('?').next().unwrap_or(file);
    Path::new(file)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
}

/// Creates every table and index if it does not exist yet.
///
/// Tables are created parents-first so foreign keys always point at an existing table.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Subject).await?;
    create_table(db, &schema, Template).await?;
    create_table(db, &schema, TemplateCard).await?;
    create_table(db, &schema, TemplateChecklistItem).await?;
    create_table(db, &schema, Board).await?;
    create_table(db, &schema, Card).await?;
    create_table(db, &schema, ChecklistItem).await?;

    let indexes = [
        Index::create()
            .name("idx_templates_subject_grade")
            .table(Template)
            .col(template::Column::SubjectId)
            .col(template::Column::Grade)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_boards_user")
            .table(Board)
            .col(board::Column::UserId)
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_cards_board_position")
            .table(Card)
            .col(card::Column::BoardId)
            .col(card::Column::DisplayOrder)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_checklist_items_card_position")
            .table(ChecklistItem)
            .col(checklist_item::Column::CardId)
            .col(checklist_item::Column::DisplayOrder)
            .unique()
            .if_not_exists()
            .to_owned(),
    ];
    for index in &indexes {
        create_index(db, index).await?;
    }

    info!("Database tables ensured");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    debug!("Ensuring table {}", entity.table_name());
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(db.get_database_backend().build(&statement))
        .await?;
    Ok(())
}

async fn create_index(db: &DatabaseConnection, index: &IndexCreateStatement) -> Result<()> {
    db.execute(db.get_database_backend().build(index)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BoardModel, CardModel, ChecklistItemModel, SubjectModel, TemplateModel};
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<SubjectModel> = Subject::find().limit(1).all(&db).await?;
        let _: Vec<TemplateModel> = Template::find().limit(1).all(&db).await?;
        let _: Vec<BoardModel> = Board::find().limit(1).all(&db).await?;
        let _: Vec<CardModel> = Card::find().limit(1).all(&db).await?;
        let _: Vec<ChecklistItemModel> = ChecklistItem::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[test]
    fn test_sqlite_file_parent() {
        assert_eq!(
            sqlite_file_parent("sqlite://data/studentboard.sqlite?mode=rwc"),
            Some(Path::new("data"))
        );
        assert_eq!(sqlite_file_parent("sqlite://board.sqlite"), None);
        assert_eq!(sqlite_file_parent("sqlite::memory:"), None);
        assert_eq!(sqlite_file_parent("postgres://localhost/boards"), None);
    }
}
