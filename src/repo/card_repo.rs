use crate::db::DbPool;
use crate::models::Card;
use crate::schema::cards;
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Inserts a new card into the database
///
/// The card is constructed (and validated) by the caller via [`Card::new`];
/// this function only persists it.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `new_card` - The card to persist
///
/// ### Returns
///
/// A Result containing the persisted Card if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool, new_card), fields(card_id = %new_card.get_id()))]
pub fn create_card(pool: &DbPool, new_card: Card) -> Result<Card> {
    debug!("Inserting new card");

    let conn = &mut pool.get()?;

    diesel::insert_into(cards::table)
        .values(&new_card)
        .execute(conn)?;

    info!("Created card {}", new_card.get_id());

    Ok(new_card)
}

/// Lists all cards in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result containing a vector of all Cards in the database
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub fn list_cards(pool: &DbPool) -> Result<Vec<Card>> {
    debug!("Listing all cards");

    let conn = &mut pool.get()?;

    let all_cards = cards::table.load::<Card>(conn)?;

    debug!("Found {} cards", all_cards.len());

    Ok(all_cards)
}

/// Deletes a card by its ID, returning the deleted card
///
/// The lookup and the delete are one `DELETE ... RETURNING` statement, so a
/// card observed here cannot be deleted twice.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `card_id` - The ID of the card to delete
///
/// ### Returns
///
/// A Result containing the deleted Card, or None if no card had that ID
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database delete operation fails
#[instrument(skip(pool), fields(card_id = %card_id))]
pub fn delete_card(pool: &DbPool, card_id: &str) -> Result<Option<Card>> {
    debug!("Deleting card");

    let conn = &mut pool.get()?;

    let deleted = diesel::delete(cards::table.find(card_id))
        .returning(Card::as_returning())
        .get_result::<Card>(conn)
        .optional()?;

    if deleted.is_some() {
        info!("Deleted card {}", card_id);
    } else {
        debug!("Card not found");
    }

    Ok(deleted)
}

/// Adds `user_id` to a card's like set
///
/// Runs inside an immediate transaction so concurrent likes of the same card
/// serialize instead of losing updates. Liking a card the user already likes
/// leaves it unchanged.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `card_id` - The ID of the card to like
/// * `user_id` - The ID of the liking user
///
/// ### Returns
///
/// A Result containing the updated Card, or None if no card had that ID
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The transaction fails
#[instrument(skip(pool), fields(card_id = %card_id, user_id = %user_id))]
pub fn like_card(pool: &DbPool, card_id: &str, user_id: &str) -> Result<Option<Card>> {
    debug!("Adding like to card");

    let conn = &mut pool.get()?;

    let updated = conn.immediate_transaction(|conn| -> Result<Option<Card>> {
        let card = cards::table
            .find(card_id)
            .first::<Card>(conn)
            .optional()?;

        let mut card = match card {
            Some(card) => card,
            None => return Ok(None),
        };

        if card.add_like(user_id) {
            diesel::update(cards::table.find(card_id))
                .set(cards::likes.eq(card.get_likes()))
                .execute(conn)?;
            info!("User {} liked card {}", user_id, card_id);
        } else {
            debug!("User {} had already liked card {}", user_id, card_id);
        }

        Ok(Some(card))
    })?;

    if updated.is_none() {
        debug!("Card not found");
    }

    Ok(updated)
}

/// Removes `user_id` from a card's like set
///
/// Runs inside an immediate transaction so concurrent mutations of the same
/// card serialize instead of losing updates. Removing a like that was never
/// added leaves the card unchanged.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `card_id` - The ID of the card to unlike
/// * `user_id` - The ID of the user removing their like
///
/// ### Returns
///
/// A Result containing the updated Card, or None if no card had that ID
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The transaction fails
#[instrument(skip(pool), fields(card_id = %card_id, user_id = %user_id))]
pub fn unlike_card(pool: &DbPool, card_id: &str, user_id: &str) -> Result<Option<Card>> {
    debug!("Removing like from card");

    let conn = &mut pool.get()?;

    let updated = conn.immediate_transaction(|conn| -> Result<Option<Card>> {
        let card = cards::table
            .find(card_id)
            .first::<Card>(conn)
            .optional()?;

        let mut card = match card {
            Some(card) => card,
            None => return Ok(None),
        };

        if card.remove_like(user_id) {
            diesel::update(cards::table.find(card_id))
                .set(cards::likes.eq(card.get_likes()))
                .execute(conn)?;
            info!("User {} unliked card {}", user_id, card_id);
        } else {
            debug!("User {} had not liked card {}", user_id, card_id);
        }

        Ok(Some(card))
    })?;

    if updated.is_none() {
        debug!("Card not found");
    }

    Ok(updated)
}
