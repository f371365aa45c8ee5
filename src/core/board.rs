//! Board business logic - the board lifecycle.
//!
//! A board is instantiated once from a template snapshot, mutated afterwards only through
//! its two plan-flag settings, and can be reset to its freshly created state at any time.
//! All reads here are scoped to the acting user's boards.

use crate::{
    core::{
        Actor,
        progress::{self, BoardStats, ChecklistProgress, PlanFilter, Tracked},
        template::{self, TemplateCardWithItems},
    },
    entities::{
        Board, Card, CardStatus, ChecklistItem, Plan, Subject, board, card, checklist_item,
        subject,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{
    DatabaseTransaction, LoaderTrait, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
    prelude::*,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument, warn};

/// How many not-started cards "start today" moves into progress.
pub const START_TODAY_BATCH: u64 = 3;

/// Input for [`create_board`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewBoard {
    /// Grade to look the template up by; must be positive
    pub grade: i32,
    /// Subject to look the template up by; must not be blank
    pub subject_id: String,
    /// Display name; must not be blank
    pub name: String,
    /// Offer the "this week" plan filter; absent or null means off
    #[serde(deserialize_with = "null_as_false")]
    pub show_weekly: bool,
    /// Offer the "this month" plan filter; absent or null means off
    #[serde(deserialize_with = "null_as_false")]
    pub show_monthly: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl NewBoard {
    fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.grade <= 0 {
            missing.push("grade");
        }
        if self.subject_id.trim().is_empty() {
            missing.push("subject_id");
        }
        if self.name.trim().is_empty() {
            missing.push("name");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Result of instantiating a board from its template.
#[derive(Debug, Clone, Serialize)]
pub struct BoardCreation {
    /// The persisted board
    pub board: board::Model,
    /// Template cards copied onto the board
    pub cards_created: usize,
    /// Template cards that could not be written and were left out
    pub cards_skipped: usize,
    /// Checklist items copied onto the new cards
    pub checklist_items_created: usize,
}

/// Creates a board for the actor from the template matching the subject and grade.
///
/// The board row, every card and every checklist item are written inside one transaction.
/// Each card is written with its checklist items inside a nested savepoint: if that write
/// fails the card is rolled back, logged and counted in
/// [`BoardCreation::cards_skipped`], and instantiation continues with the next template card.
/// Template lookup failures and a failed board insert abort the whole creation.
///
/// # Errors
/// * [`Error::Validation`] if grade, subject or name is missing
/// * [`Error::NotFound`] if no template exists for the subject and grade
/// * [`Error::Integrity`] if the template has no cards
#[instrument(skip(db, actor, request), fields(user_id = %actor.user_id, subject_id = %request.subject_id, grade = request.grade))]
pub async fn create_board(
    db: &DatabaseConnection,
    actor: &Actor,
    request: NewBoard,
) -> Result<BoardCreation> {
    request.validate()?;
    let subject_id = request.subject_id.trim().to_string();

    let txn = db.begin().await?;

    let template = template::find_template(&txn, &subject_id, request.grade)
        .await?
        .ok_or_else(|| {
            Error::not_found("template", format!("{subject_id} (grade {})", request.grade))
        })?;

    let template_cards = template::load_template_cards(&txn, template.id).await?;
    if template_cards.is_empty() {
        return Err(Error::Integrity {
            message: format!("Template {} has no cards", template.id),
        });
    }

    let now = Utc::now();
    let board = board::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(actor.user_id.clone()),
        subject_id: Set(subject_id),
        grade: Set(request.grade),
        name: Set(request.name.trim().to_string()),
        show_weekly: Set(request.show_weekly),
        show_monthly: Set(request.show_monthly),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let mut cards_created = 0;
    let mut cards_skipped = 0;
    let mut checklist_items_created = 0;

    for template_card in &template_cards {
        match instantiate_card(
            &txn,
            board.id,
            template_card,
            template.checklist_enabled,
            now,
        )
        .await
        {
            Ok(item_count) => {
                cards_created += 1;
                checklist_items_created += item_count;
            }
            Err(e) => {
                cards_skipped += 1;
                warn!(
                    "Skipping template card '{}' (position {}): {}",
                    template_card.card.title, template_card.card.display_order, e
                );
            }
        }
    }

    txn.commit().await?;

    if cards_skipped > 0 {
        warn!(
            "Board {} created with {} of {} cards",
            board.id,
            cards_created,
            template_cards.len()
        );
    } else {
        info!("Board {} created with {} cards", board.id, cards_created);
    }

    Ok(BoardCreation {
        board,
        cards_created,
        cards_skipped,
        checklist_items_created,
    })
}

/// Writes one card and (if enabled) its checklist items inside a savepoint.
/// Returns the number of checklist items written.
async fn instantiate_card(
    txn: &DatabaseTransaction,
    board_id: Uuid,
    template_card: &TemplateCardWithItems,
    checklist_enabled: bool,
    now: DateTime<Utc>,
) -> Result<usize> {
    let savepoint = txn.begin().await?;
    match insert_card_rows(&savepoint, board_id, template_card, checklist_enabled, now).await {
        Ok(item_count) => {
            savepoint.commit().await?;
            Ok(item_count)
        }
        Err(e) => {
            savepoint.rollback().await?;
            Err(e)
        }
    }
}

async fn insert_card_rows(
    savepoint: &DatabaseTransaction,
    board_id: Uuid,
    template_card: &TemplateCardWithItems,
    checklist_enabled: bool,
    now: DateTime<Utc>,
) -> Result<usize> {
    let card = card::ActiveModel {
        id: Set(Uuid::new_v4()),
        board_id: Set(board_id),
        title: Set(template_card.card.title.clone()),
        notes: Set(None),
        status: Set(CardStatus::NotStarted),
        plan: Set(Plan::None),
        display_order: Set(template_card.card.display_order),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(savepoint)
    .await?;

    if !checklist_enabled {
        return Ok(0);
    }

    for item in &template_card.checklist_items {
        checklist_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            card_id: Set(card.id),
            text: Set(item.text.clone()),
            is_done: Set(false),
            display_order: Set(item.display_order),
        }
        .insert(savepoint)
        .await?;
    }
    Ok(template_card.checklist_items.len())
}

/// Rows touched by [`reset_board`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResetSummary {
    /// Cards returned to not started with no plan
    pub cards_reset: u64,
    /// Checklist items unticked
    pub checklist_items_reset: u64,
}

/// Returns every card on the board to not started with no plan and unticks every checklist
/// item. Notes are kept. Both updates run in one transaction; a board without cards is left
/// as it is and still reports success.
///
/// # Errors
/// [`Error::NotFound`] if the board does not exist or belongs to someone else.
#[instrument(skip(db, actor), fields(user_id = %actor.user_id))]
pub async fn reset_board(
    db: &DatabaseConnection,
    actor: &Actor,
    board_id: Uuid,
) -> Result<ResetSummary> {
    let txn = db.begin().await?;
    let board = get_board(&txn, actor, board_id).await?;
    let now = Utc::now();

    let cards_reset = Card::update_many()
        .set(card::ActiveModel {
            status: Set(CardStatus::NotStarted),
            plan: Set(Plan::None),
            updated_at: Set(now),
            ..Default::default()
        })
        .filter(card::Column::BoardId.eq(board.id))
        .exec(&txn)
        .await?
        .rows_affected;

    if cards_reset == 0 {
        debug!("Board {} has no cards; nothing to reset", board.id);
        txn.commit().await?;
        return Ok(ResetSummary::default());
    }

    let board_cards = Card::find()
        .select_only()
        .column(card::Column::Id)
        .filter(card::Column::BoardId.eq(board.id))
        .into_query();
    let checklist_items_reset = ChecklistItem::update_many()
        .set(checklist_item::ActiveModel {
            is_done: Set(false),
            ..Default::default()
        })
        .filter(checklist_item::Column::CardId.in_subquery(board_cards))
        .exec(&txn)
        .await?
        .rows_affected;

    let mut active: board::ActiveModel = board.into();
    active.updated_at = Set(now);
    active.update(&txn).await?;

    txn.commit().await?;
    info!(
        "Board {} reset: {} cards, {} checklist items",
        board_id, cards_reset, checklist_items_reset
    );

    Ok(ResetSummary {
        cards_reset,
        checklist_items_reset,
    })
}

/// A single board setting change. Only the plan-filter flags are editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum BoardSettingUpdate {
    /// Offer or hide the "this week" filter
    ShowWeekly(bool),
    /// Offer or hide the "this month" filter
    ShowMonthly(bool),
}

/// Applies one setting change to the actor's board.
#[instrument(skip(db, actor))]
pub async fn update_board_setting(
    db: &DatabaseConnection,
    actor: &Actor,
    board_id: Uuid,
    update: BoardSettingUpdate,
) -> Result<board::Model> {
    let board = get_board(db, actor, board_id).await?;

    let mut active: board::ActiveModel = board.into();
    match update {
        BoardSettingUpdate::ShowWeekly(value) => active.show_weekly = Set(value),
        BoardSettingUpdate::ShowMonthly(value) => active.show_monthly = Set(value),
    }
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Moves the first [`START_TODAY_BATCH`] not-started cards (by position) into progress and
/// returns them. Their plan flags are left alone.
#[instrument(skip(db, actor))]
pub async fn start_today(
    db: &DatabaseConnection,
    actor: &Actor,
    board_id: Uuid,
) -> Result<Vec<card::Model>> {
    let txn = db.begin().await?;
    let board = get_board(&txn, actor, board_id).await?;

    let ids: Vec<Uuid> = Card::find()
        .filter(card::Column::BoardId.eq(board.id))
        .filter(card::Column::Status.eq(CardStatus::NotStarted))
        .order_by_asc(card::Column::DisplayOrder)
        .limit(START_TODAY_BATCH)
        .all(&txn)
        .await?
        .into_iter()
        .map(|card| card.id)
        .collect();

    if ids.is_empty() {
        txn.commit().await?;
        return Ok(Vec::new());
    }

    Card::update_many()
        .set(card::ActiveModel {
            status: Set(CardStatus::InProgress),
            updated_at: Set(Utc::now()),
            ..Default::default()
        })
        .filter(card::Column::Id.is_in(ids.clone()))
        .exec(&txn)
        .await?;

    let started = Card::find()
        .filter(card::Column::Id.is_in(ids))
        .order_by_asc(card::Column::DisplayOrder)
        .all(&txn)
        .await?;

    txn.commit().await?;
    debug!("Started {} cards on board {}", started.len(), board_id);
    Ok(started)
}

/// Finds one of the actor's boards. Boards owned by someone else are reported as missing.
pub async fn get_board<C>(db: &C, actor: &Actor, board_id: Uuid) -> Result<board::Model>
where
    C: ConnectionTrait,
{
    Board::find_by_id(board_id)
        .filter(board::Column::UserId.eq(actor.user_id.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("board", board_id))
}

/// A card with its checklist items (in position order) and their tick counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardWithChecklist {
    /// The card
    #[serde(flatten)]
    pub card: card::Model,
    /// Checklist items, sorted by position
    pub checklist_items: Vec<checklist_item::Model>,
    /// Ticked vs total items
    #[serde(flatten)]
    pub checklist: ChecklistProgress,
}

impl Tracked for CardWithChecklist {
    fn status(&self) -> CardStatus {
        self.card.status
    }

    fn plan(&self) -> Plan {
        self.card.plan
    }

    fn position(&self) -> i32 {
        self.card.display_order
    }
}

/// Everything needed to render one board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    /// The board
    pub board: board::Model,
    /// The subject the board studies
    pub subject: Option<subject::Model>,
    /// Cards in position order
    pub cards: Vec<CardWithChecklist>,
    /// Lane counts and completion
    pub stats: BoardStats,
}

/// Loads one of the actor's boards with all of its cards and checklist items.
pub async fn get_board_view(
    db: &DatabaseConnection,
    actor: &Actor,
    board_id: Uuid,
) -> Result<BoardView> {
    let board = get_board(db, actor, board_id).await?;
    let subject = Subject::find_by_id(board.subject_id.clone()).one(db).await?;

    let cards = Card::find()
        .filter(card::Column::BoardId.eq(board.id))
        .order_by_asc(card::Column::DisplayOrder)
        .all(db)
        .await?;
    let items = cards.load_many(ChecklistItem, db).await?;

    let cards: Vec<CardWithChecklist> = cards
        .into_iter()
        .zip(items)
        .map(|(card, mut checklist_items)| {
            checklist_items.sort_by_key(|item| item.display_order);
            CardWithChecklist {
                checklist: ChecklistProgress::from_items(&checklist_items),
                card,
                checklist_items,
            }
        })
        .collect();
    let stats = BoardStats::from_cards(&cards);

    Ok(BoardView {
        board,
        subject,
        cards,
        stats,
    })
}

/// Cards of one lane of the actor's board, narrowed by plan when the lane is in progress.
pub async fn get_filtered_cards(
    db: &DatabaseConnection,
    actor: &Actor,
    board_id: Uuid,
    lane: CardStatus,
    plan_filter: PlanFilter,
) -> Result<Vec<CardWithChecklist>> {
    let view = get_board_view(db, actor, board_id).await?;
    Ok(
        progress::filter_by_lane_and_plan(&view.cards, lane, plan_filter)
            .into_iter()
            .cloned()
            .collect(),
    )
}

/// A board with its subject and progress, as listed on the boards page.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSummary {
    /// The board
    #[serde(flatten)]
    pub board: board::Model,
    /// The subject the board studies
    pub subject: Option<subject::Model>,
    /// Lane counts and completion
    pub stats: BoardStats,
}

/// A board as shown on the dashboard: its summary plus what is currently in progress.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardBoard {
    /// Board, subject and progress
    #[serde(flatten)]
    pub summary: BoardSummary,
    /// In-progress cards in position order
    pub in_progress_cards: Vec<card::Model>,
}

/// The actor's boards, most recently updated first, with their progress.
pub async fn list_boards(db: &DatabaseConnection, actor: &Actor) -> Result<Vec<BoardSummary>> {
    Ok(load_boards_with_cards(db, actor)
        .await?
        .into_iter()
        .map(|(summary, _)| summary)
        .collect())
}

/// The actor's boards with progress and in-progress cards, most recently updated first.
pub async fn get_dashboard(
    db: &DatabaseConnection,
    actor: &Actor,
) -> Result<Vec<DashboardBoard>> {
    Ok(load_boards_with_cards(db, actor)
        .await?
        .into_iter()
        .map(|(summary, cards)| DashboardBoard {
            in_progress_cards: progress::filter_by_lane_and_plan(
                &cards,
                CardStatus::InProgress,
                PlanFilter::All,
            )
            .into_iter()
            .cloned()
            .collect(),
            summary,
        })
        .collect())
}

async fn load_boards_with_cards(
    db: &DatabaseConnection,
    actor: &Actor,
) -> Result<Vec<(BoardSummary, Vec<card::Model>)>> {
    let (boards, subjects): (Vec<board::Model>, Vec<Option<subject::Model>>) = Board::find()
        .filter(board::Column::UserId.eq(actor.user_id.as_str()))
        .order_by_desc(board::Column::UpdatedAt)
        .find_also_related(Subject)
        .all(db)
        .await?
        .into_iter()
        .unzip();
    let cards = boards.load_many(Card, db).await?;

    Ok(boards
        .into_iter()
        .zip(subjects)
        .zip(cards)
        .map(|((board, subject), cards)| {
            let summary = BoardSummary {
                stats: BoardStats::from_cards(&cards),
                board,
                subject,
            };
            (summary, cards)
        })
        .collect())
}
