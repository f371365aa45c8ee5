//! Template store business logic.
//!
//! Templates are read-only to the rest of the core. The only writer is
//! [`seed_templates`], which loads subjects and their templates from the seed file and
//! never touches a template that already exists.

use crate::{
    config::templates::SeedFile,
    entities::{
        Subject, Template, TemplateCard, TemplateChecklistItem, subject, template, template_card,
        template_checklist_item,
    },
    errors::Result,
};
use sea_orm::{LoaderTrait, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument, warn};

/// A template card together with its checklist items, both in display order.
#[derive(Debug, Clone)]
pub struct TemplateCardWithItems {
    /// The template card
    pub card: template_card::Model,
    /// Its checklist items, sorted by position
    pub checklist_items: Vec<template_checklist_item::Model>,
}

/// Finds the template for a subject and grade.
pub async fn find_template<C>(
    db: &C,
    subject_id: &str,
    grade: i32,
) -> Result<Option<template::Model>>
where
    C: ConnectionTrait,
{
    Template::find()
        .filter(template::Column::SubjectId.eq(subject_id))
        .filter(template::Column::Grade.eq(grade))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Loads a template's cards in position order, each with its checklist items in position
/// order.
pub async fn load_template_cards<C>(db: &C, template_id: Uuid) -> Result<Vec<TemplateCardWithItems>>
where
    C: ConnectionTrait,
{
    let cards = TemplateCard::find()
        .filter(template_card::Column::TemplateId.eq(template_id))
        .order_by_asc(template_card::Column::DisplayOrder)
        .all(db)
        .await?;
    let items = cards.load_many(TemplateChecklistItem, db).await?;

    Ok(cards
        .into_iter()
        .zip(items)
        .map(|(card, mut checklist_items)| {
            checklist_items.sort_by_key(|item| item.display_order);
            TemplateCardWithItems {
                card,
                checklist_items,
            }
        })
        .collect())
}

/// What a seeding run added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Subjects inserted
    pub subjects_created: usize,
    /// Templates inserted
    pub templates_created: usize,
    /// Templates left alone because one already existed for the subject and grade
    pub templates_skipped: usize,
}

/// Inserts every subject and template from the seed file that isn't in the database yet.
///
/// Runs in a single transaction. Existing subjects and templates are never modified, so the
/// seed can be applied on every start-up.
#[instrument(skip(db, seed), fields(subjects = seed.subjects.len()))]
pub async fn seed_templates(db: &DatabaseConnection, seed: &SeedFile) -> Result<SeedSummary> {
    let txn = db.begin().await?;
    let mut summary = SeedSummary::default();

    for subject_seed in &seed.subjects {
        let country = subject_seed
            .country
            .clone()
            .unwrap_or_else(|| seed.country.clone());

        if Subject::find_by_id(subject_seed.id.clone())
            .one(&txn)
            .await?
            .is_none()
        {
            subject::ActiveModel {
                id: Set(subject_seed.id.clone()),
                name: Set(subject_seed.name.clone()),
                grade: Set(subject_seed.grade),
                country: Set(country.clone()),
                exam: Set(subject_seed.exam.clone()),
                display_order: Set(subject_seed.display_order),
            }
            .insert(&txn)
            .await?;
            summary.subjects_created += 1;
        }

        if find_template(&txn, &subject_seed.id, subject_seed.grade)
            .await?
            .is_some()
        {
            debug!("Template for '{}' already present", subject_seed.id);
            summary.templates_skipped += 1;
            continue;
        }

        if subject_seed.cards.is_empty() {
            warn!(
                "Template for '{}' has no cards; boards cannot be created from it",
                subject_seed.id
            );
        }

        let template = template::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject_id: Set(subject_seed.id.clone()),
            grade: Set(subject_seed.grade),
            country: Set(country),
            checklist_enabled: Set(subject_seed.checklist_enabled),
        }
        .insert(&txn)
        .await?;

        for (card_position, card_seed) in (1..).zip(&subject_seed.cards) {
            let template_card = template_card::ActiveModel {
                id: Set(Uuid::new_v4()),
                template_id: Set(template.id),
                title: Set(card_seed.title.clone()),
                display_order: Set(card_position),
            }
            .insert(&txn)
            .await?;

            for (item_position, text) in (1..).zip(&card_seed.checklist) {
                template_checklist_item::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    template_card_id: Set(template_card.id),
                    text: Set(text.clone()),
                    display_order: Set(item_position),
                }
                .insert(&txn)
                .await?;
            }
        }
        summary.templates_created += 1;
    }

    txn.commit().await?;
    info!(
        "Seeded {} subjects and {} templates ({} already present)",
        summary.subjects_created, summary.templates_created, summary.templates_skipped
    );
    Ok(summary)
}
