//! Card business logic - the card workflow.
//!
//! A card may move from any lane to any other lane; the forward path offered by the UI
//! ([`CardStatus::next`]) is only a suggestion. Status, plan and notes are independent fields
//! and each write touches exactly one of them.

use crate::{
    core::Actor,
    entities::{Board, Card, CardStatus, Plan, board, card},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use std::str::FromStr;
use tracing::{debug, instrument};

impl CardStatus {
    /// Stored/serialized form, e.g. `"in_progress"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// Human-readable lane name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }

    /// Next lane on the canonical path not started → in progress → done → not started.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::NotStarted => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::NotStarted,
        }
    }
}

impl FromStr for CardStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(Error::validation(format!("unknown card status '{other}'"))),
        }
    }
}

impl Plan {
    /// Stored/serialized form, e.g. `"this_week"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ThisWeek => "this_week",
            Self::ThisMonth => "this_month",
        }
    }

    /// Human-readable plan name; empty when no plan is set.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "",
            Self::ThisWeek => "This Week",
            Self::ThisMonth => "This Month",
        }
    }
}

impl FromStr for Plan {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Self::None),
            "this_week" => Ok(Self::ThisWeek),
            "this_month" => Ok(Self::ThisMonth),
            other => Err(Error::validation(format!("unknown plan '{other}'"))),
        }
    }
}

/// Finds a card on one of the actor's boards.
///
/// A card on somebody else's board is reported exactly like a missing card.
pub async fn get_card<C>(db: &C, actor: &Actor, card_id: Uuid) -> Result<card::Model>
where
    C: ConnectionTrait,
{
    Card::find_by_id(card_id)
        .inner_join(Board)
        .filter(board::Column::UserId.eq(actor.user_id.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("card", card_id))
}

/// Moves a card to `status`. Any lane may move to any other lane; plan, notes and checklist
/// items are left untouched.
#[instrument(skip(db, actor))]
pub async fn set_status(
    db: &DatabaseConnection,
    actor: &Actor,
    card_id: Uuid,
    status: CardStatus,
) -> Result<card::Model> {
    let card = get_card(db, actor, card_id).await?;
    debug!(from = card.status.as_str(), to = status.as_str(), "Moving card");

    let mut active: card::ActiveModel = card.into();
    active.status = Set(status);
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Overwrites a card's plan flag, whatever lane the card is in.
#[instrument(skip(db, actor))]
pub async fn set_plan(
    db: &DatabaseConnection,
    actor: &Actor,
    card_id: Uuid,
    plan: Plan,
) -> Result<card::Model> {
    let card = get_card(db, actor, card_id).await?;

    let mut active: card::ActiveModel = card.into();
    active.plan = Set(plan);
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}

/// Overwrites a card's notes. No length limit is enforced here.
#[instrument(skip(db, actor, notes))]
pub async fn set_notes(
    db: &DatabaseConnection,
    actor: &Actor,
    card_id: Uuid,
    notes: String,
) -> Result<card::Model> {
    let card = get_card(db, actor, card_id).await?;

    let mut active: card::ActiveModel = card.into();
    active.notes = Set(Some(notes));
    active.updated_at = Set(Utc::now());
    active.update(db).await.map_err(Into::into)
}
