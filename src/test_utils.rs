//! Shared test utilities for `StudentBoard`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test subjects, templates and boards with sensible defaults.

use crate::{
    core::{
        Actor,
        board::{self, NewBoard},
    },
    entities::{self, Card, ChecklistItem, card, checklist_item, subject, template},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The student every fixture board belongs to.
pub fn test_actor() -> Actor {
    Actor::new("student-1")
}

/// Request matching the template created by [`setup_with_board`].
pub fn test_new_board() -> NewBoard {
    NewBoard {
        grade: 10,
        subject_id: "g10-maths".to_string(),
        name: "Maths revision".to_string(),
        show_weekly: true,
        show_monthly: false,
    }
}

/// Creates a test subject with sensible defaults.
///
/// # Defaults
/// * `name`: the id
/// * `country`: "LK"
/// * `exam`: "O/L"
/// * `display_order`: 0
pub async fn create_test_subject(
    db: &DatabaseConnection,
    id: &str,
    grade: i32,
) -> Result<subject::Model> {
    subject::ActiveModel {
        id: Set(id.to_string()),
        name: Set(id.to_string()),
        grade: Set(grade),
        country: Set("LK".to_string()),
        exam: Set("O/L".to_string()),
        display_order: Set(0),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a template for an existing subject.
///
/// `cards` is a list of `(title, checklist items)`; card and item positions start at 1 in
/// the order given.
pub async fn create_test_template(
    db: &DatabaseConnection,
    subject_id: &str,
    grade: i32,
    checklist_enabled: bool,
    cards: &[(&str, &[&str])],
) -> Result<template::Model> {
    let template = template::ActiveModel {
        id: Set(Uuid::new_v4()),
        subject_id: Set(subject_id.to_string()),
        grade: Set(grade),
        country: Set("LK".to_string()),
        checklist_enabled: Set(checklist_enabled),
    }
    .insert(db)
    .await?;

    for (card_position, (title, items)) in (1..).zip(cards) {
        let card = entities::template_card::ActiveModel {
            id: Set(Uuid::new_v4()),
            template_id: Set(template.id),
            title: Set((*title).to_string()),
            display_order: Set(card_position),
        }
        .insert(db)
        .await?;

        for (item_position, text) in (1..).zip(items.iter()) {
            entities::template_checklist_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                template_card_id: Set(card.id),
                text: Set((*text).to_string()),
                display_order: Set(item_position),
            }
            .insert(db)
            .await?;
        }
    }
    Ok(template)
}

/// Inserts a board with no cards, bypassing template instantiation.
pub async fn insert_empty_board(
    db: &DatabaseConnection,
    actor: &Actor,
    subject_id: &str,
) -> Result<entities::BoardModel> {
    let now = Utc::now();
    entities::board::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(actor.user_id.clone()),
        subject_id: Set(subject_id.to_string()),
        grade: Set(10),
        name: Set("Empty".to_string()),
        show_weekly: Set(false),
        show_monthly: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// A database holding one freshly created board.
pub struct BoardFixture {
    /// The database
    pub db: DatabaseConnection,
    /// Owner of the board
    pub actor: Actor,
    /// The board
    pub board: entities::BoardModel,
    /// The board's cards in position order
    pub cards: Vec<card::Model>,
}

impl BoardFixture {
    /// First checklist item of the first card that has any.
    pub async fn first_checklist_item(&self) -> Result<checklist_item::Model> {
        ChecklistItem::find()
            .inner_join(Card)
            .filter(card::Column::BoardId.eq(self.board.id))
            .order_by_asc(card::Column::DisplayOrder)
            .order_by_asc(checklist_item::Column::DisplayOrder)
            .one(&self.db)
            .await?
            .ok_or_else(|| Error::not_found("checklist item", self.board.id))
    }
}

/// Sets up a complete test environment with a board.
///
/// The board is created through [`board::create_board`] from a checklist-enabled
/// "g10-maths" template with four cards carrying 0, 2, 3 and 1 checklist items.
pub async fn setup_with_board() -> Result<BoardFixture> {
    let db = setup_test_db().await?;
    create_test_subject(&db, "g10-maths", 10).await?;
    create_test_template(
        &db,
        "g10-maths",
        10,
        true,
        &[
            ("Number systems", &[]),
            ("Algebra", &["Read notes", "Exercises"]),
            ("Geometry", &["Theorems", "Constructions", "Past papers"]),
            ("Statistics", &["Summary sheet"]),
        ],
    )
    .await?;

    let actor = test_actor();
    let created = board::create_board(&db, &actor, test_new_board()).await?;
    let cards = Card::find()
        .filter(card::Column::BoardId.eq(created.board.id))
        .order_by_asc(card::Column::DisplayOrder)
        .all(&db)
        .await?;

    Ok(BoardFixture {
        db,
        actor,
        board: created.board,
        cards,
    })
}
