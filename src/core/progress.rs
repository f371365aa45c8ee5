//! Progress aggregation business logic.
//!
//! Everything here is a pure function over cards already loaded from the database; nothing
//! is cached, so a board's progress is always recomputed from its current cards on read.

use crate::entities::{CardStatus, Plan, card, checklist_item};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anything that sits in a board lane: a card, or a card bundled with its checklist.
pub trait Tracked {
    /// Current workflow lane
    fn status(&self) -> CardStatus;
    /// Current plan flag
    fn plan(&self) -> Plan;
    /// Position within the board
    fn position(&self) -> i32;
}

impl Tracked for card::Model {
    fn status(&self) -> CardStatus {
        self.status
    }

    fn plan(&self) -> Plan {
        self.plan
    }

    fn position(&self) -> i32 {
        self.display_order
    }
}

/// Completion percentage of `done` out of `total`, rounded half up.
///
/// Returns 0 for an empty collection, and never exceeds 100 even if `done > total`.
/// The arithmetic is integral: `(200 * done + total) / (2 * total)` is `done / total * 100`
/// rounded half up, so `percentage(1, 8)` is 13 and `percentage(1, 2)` is 50.
#[must_use]
pub fn percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    let rounded = done.saturating_mul(200).saturating_add(total) / total.saturating_mul(2);
    u8::try_from(rounded).unwrap_or(100)
}

/// Number of cards in the given lane.
#[must_use]
pub fn count_by_status<T: Tracked>(cards: &[T], status: CardStatus) -> usize {
    cards.iter().filter(|card| card.status() == status).count()
}

/// Plan filter applied to the in-progress lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum PlanFilter {
    /// Show every card in the lane
    #[default]
    All,
    /// Show only cards carrying this plan flag
    Only(Plan),
}

impl FromStr for PlanFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        s.parse::<Plan>()
            .map(Self::Only)
            .map_err(|_| format!("unknown plan filter '{s}'"))
    }
}

impl TryFrom<String> for PlanFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PlanFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(plan) => f.write_str(plan.as_str()),
        }
    }
}

/// Cards in `lane`, in board position order.
///
/// The plan filter only narrows the in-progress lane; for the other lanes it is ignored.
#[must_use]
pub fn filter_by_lane_and_plan<T: Tracked>(
    cards: &[T],
    lane: CardStatus,
    plan_filter: PlanFilter,
) -> Vec<&T> {
    let mut matching: Vec<&T> = cards
        .iter()
        .filter(|card| card.status() == lane)
        .filter(|card| match (lane, plan_filter) {
            (CardStatus::InProgress, PlanFilter::Only(plan)) => card.plan() == plan,
            _ => true,
        })
        .collect();
    matching.sort_by_key(|card| card.position());
    matching
}

/// Per-lane counts and overall completion of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoardStats {
    /// Number of cards on the board
    pub total: usize,
    /// Cards not yet started
    pub not_started: usize,
    /// Cards in progress
    pub in_progress: usize,
    /// Cards done
    pub done: usize,
    /// `done` as a percentage of `total`
    pub completion_percentage: u8,
}

impl BoardStats {
    /// Aggregates the given cards.
    #[must_use]
    pub fn from_cards<T: Tracked>(cards: &[T]) -> Self {
        let done = count_by_status(cards, CardStatus::Done);
        Self {
            total: cards.len(),
            not_started: count_by_status(cards, CardStatus::NotStarted),
            in_progress: count_by_status(cards, CardStatus::InProgress),
            done,
            completion_percentage: percentage(done, cards.len()),
        }
    }
}

/// Ticked vs total checklist items of one card. Display only; never affects the card's lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ChecklistProgress {
    /// Number of checklist items
    pub checklist_total: usize,
    /// Number of ticked items
    pub checklist_done: usize,
}

impl ChecklistProgress {
    /// Counts the given items.
    #[must_use]
    pub fn from_items(items: &[checklist_item::Model]) -> Self {
        Self {
            checklist_total: items.len(),
            checklist_done: items.iter().filter(|item| item.is_done).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fake {
        status: CardStatus,
        plan: Plan,
        position: i32,
    }

    impl Tracked for Fake {
        fn status(&self) -> CardStatus {
            self.status
        }

        fn plan(&self) -> Plan {
            self.plan
        }

        fn position(&self) -> i32 {
            self.position
        }
    }

    const fn fake(position: i32, status: CardStatus, plan: Plan) -> Fake {
        Fake {
            status,
            plan,
            position,
        }
    }

    fn positions(cards: &[&Fake]) -> Vec<i32> {
        cards.iter().map(|card| card.position).collect()
    }

    #[test]
    fn test_percentage_of_empty_board_is_zero() {
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(3, 8), 38);
        assert_eq!(percentage(1, 200), 1);
    }

    #[test]
    fn test_percentage_bounds() {
        for total in 0..=40 {
            for done in 0..=total {
                assert!(percentage(done, total) <= 100);
            }
        }
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(7, 5), 100);
    }

    #[test]
    fn test_count_by_status() {
        let cards = [
            fake(1, CardStatus::Done, Plan::None),
            fake(2, CardStatus::InProgress, Plan::ThisWeek),
            fake(3, CardStatus::Done, Plan::ThisWeek),
        ];
        assert_eq!(count_by_status(&cards, CardStatus::Done), 2);
        assert_eq!(count_by_status(&cards, CardStatus::InProgress), 1);
        assert_eq!(count_by_status(&cards, CardStatus::NotStarted), 0);
    }

    #[test]
    fn test_filter_in_progress_by_plan() {
        let cards = [
            fake(4, CardStatus::InProgress, Plan::ThisWeek),
            fake(1, CardStatus::InProgress, Plan::ThisMonth),
            fake(2, CardStatus::InProgress, Plan::ThisWeek),
            fake(3, CardStatus::Done, Plan::ThisWeek),
        ];

        let week = filter_by_lane_and_plan(
            &cards,
            CardStatus::InProgress,
            PlanFilter::Only(Plan::ThisWeek),
        );
        assert_eq!(positions(&week), vec![2, 4]);

        let all = filter_by_lane_and_plan(&cards, CardStatus::InProgress, PlanFilter::All);
        assert_eq!(positions(&all), vec![1, 2, 4]);
    }

    #[test]
    fn test_plan_filter_ignored_outside_in_progress() {
        let cards = [
            fake(2, CardStatus::Done, Plan::ThisWeek),
            fake(1, CardStatus::Done, Plan::None),
            fake(3, CardStatus::NotStarted, Plan::ThisWeek),
        ];

        let done = filter_by_lane_and_plan(&cards, CardStatus::Done, PlanFilter::All);
        assert_eq!(positions(&done), vec![1, 2]);

        let done_filtered = filter_by_lane_and_plan(
            &cards,
            CardStatus::Done,
            PlanFilter::Only(Plan::ThisMonth),
        );
        assert_eq!(positions(&done_filtered), vec![1, 2]);
    }

    #[test]
    fn test_plan_filter_parsing() {
        assert_eq!("all".parse::<PlanFilter>(), Ok(PlanFilter::All));
        assert_eq!(
            "this_week".parse::<PlanFilter>(),
            Ok(PlanFilter::Only(Plan::ThisWeek))
        );
        assert_eq!("none".parse::<PlanFilter>(), Ok(PlanFilter::Only(Plan::None)));
        assert!("someday".parse::<PlanFilter>().is_err());
        assert_eq!(PlanFilter::Only(Plan::ThisMonth).to_string(), "this_month");
    }

    #[test]
    fn test_board_stats() {
        let cards = [
            fake(1, CardStatus::Done, Plan::None),
            fake(2, CardStatus::InProgress, Plan::None),
            fake(3, CardStatus::NotStarted, Plan::None),
        ];
        let stats = BoardStats::from_cards(&cards);
        assert_eq!(
            stats,
            BoardStats {
                total: 3,
                not_started: 1,
                in_progress: 1,
                done: 1,
                completion_percentage: 33,
            }
        );

        let empty: [Fake; 0] = [];
        assert_eq!(BoardStats::from_cards(&empty), BoardStats::default());
    }
}
