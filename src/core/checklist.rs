//! Checklist business logic - ticking a card's sub-tasks.
//!
//! Items are toggled one at a time and never move their card between lanes.

use crate::{
    core::Actor,
    entities::{Card, ChecklistItem, board, card, checklist_item},
    errors::{Error, Result},
};
use sea_orm::{JoinType, QuerySelect, RelationTrait, Set, prelude::*};
use tracing::instrument;

/// Finds a checklist item on a card of one of the actor's boards.
pub async fn get_checklist_item<C>(
    db: &C,
    actor: &Actor,
    item_id: Uuid,
) -> Result<checklist_item::Model>
where
    C: ConnectionTrait,
{
    ChecklistItem::find_by_id(item_id)
        .inner_join(Card)
        .join(JoinType::InnerJoin, card::Relation::Board.def())
        .filter(board::Column::UserId.eq(actor.user_id.as_str()))
        .one(db)
        .await?
        .ok_or_else(|| Error::not_found("checklist item", item_id))
}

/// Sets an item's `is_done`. Setting the value it already has is not an error.
#[instrument(skip(db, actor))]
pub async fn toggle(
    db: &DatabaseConnection,
    actor: &Actor,
    item_id: Uuid,
    is_done: bool,
) -> Result<checklist_item::Model> {
    let item = get_checklist_item(db, actor, item_id).await?;

    let mut active: checklist_item::ActiveModel = item.into();
    active.is_done = Set(is_done);
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::CardStatus;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_toggle_is_idempotent() -> Result<()> {
        let fixture = setup_with_board().await?;
        let item_id = fixture.first_checklist_item().await?.id;

        let first = toggle(&fixture.db, &fixture.actor, item_id, true).await?;
        assert!(first.is_done);

        let second = toggle(&fixture.db, &fixture.actor, item_id, true).await?;
        assert!(second.is_done);

        let stored = ChecklistItem::find_by_id(item_id)
            .one(&fixture.db)
            .await?
            .unwrap();
        assert!(stored.is_done);
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_does_not_move_card() -> Result<()> {
        let fixture = setup_with_board().await?;
        let item = fixture.first_checklist_item().await?;

        // Tick every item on the card; the card itself stays where it is
        let items = ChecklistItem::find()
            .filter(checklist_item::Column::CardId.eq(item.card_id))
            .all(&fixture.db)
            .await?;
        for item in items {
            toggle(&fixture.db, &fixture.actor, item.id, true).await?;
        }

        let card = Card::find_by_id(item.card_id)
            .one(&fixture.db)
            .await?
            .unwrap();
        assert_eq!(card.status, CardStatus::NotStarted);
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_unknown_item() -> Result<()> {
        let fixture = setup_with_board().await?;

        let result = toggle(&fixture.db, &fixture.actor, Uuid::new_v4(), true).await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "checklist item",
                ..
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_on_other_users_board_is_not_found() -> Result<()> {
        let fixture = setup_with_board().await?;
        let item_id = fixture.first_checklist_item().await?.id;

        let result = toggle(&fixture.db, &Actor::new("someone-else"), item_id, true).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));
        Ok(())
    }
}
