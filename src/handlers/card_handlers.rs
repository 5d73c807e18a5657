use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::dto::CreateCardDto;
use crate::errors::{self, ApiError};
use crate::models::Card;
use crate::repo;

/// Handler for listing all cards
///
/// This function handles GET requests to `/cards`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
///
/// ### Returns
///
/// A list of all cards as JSON
#[instrument(skip(pool))]
pub async fn list_cards_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<Card>>, ApiError> {
    debug!("Listing cards");

    // Call the repository function to list all cards
    let cards = repo::list_cards(&pool).map_err(ApiError::Database)?;

    info!("Retrieved {} cards", cards.len());

    // Return the list of cards as JSON
    Ok(Json(cards))
}

/// Handler for creating a new card
///
/// This function handles POST requests to `/cards`. The acting user becomes
/// the card's owner. A body that fails to deserialize, or card data that
/// fails validation, yields a 400 with a fixed message.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `user` - The authenticated acting user
/// * `payload` - The request payload containing the card name and link
///
/// ### Returns
///
/// The newly created card as JSON with a 201 status
#[instrument(skip(pool, user, payload), fields(user_id = %user.id()))]
pub async fn create_card_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the acting user attached by the identification middleware
    Extension(user): Extension<AuthUser>,
    // Extract and deserialize the JSON request body; a rejection becomes a 400
    WithRejection(Json(payload), _): WithRejection<Json<CreateCardDto>, ApiError>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    info!("Creating new card");

    // Schema validation happens at construction
    let new_card = Card::new(payload.name, payload.link, user.id().to_string()).map_err(|err| {
        debug!("Card data failed validation: {}", err);
        ApiError::Validation(errors::INVALID_CARD_DATA)
    })?;

    // Call the repository function to persist the card
    let card = repo::create_card(&pool, new_card).map_err(ApiError::Database)?;

    info!("Successfully created card with id: {}", card.get_id());

    // Return the created card as JSON
    Ok((StatusCode::CREATED, Json(card)))
}

/// Handler for deleting a card
///
/// This function handles DELETE requests to `/cards/{card_id}`. Any
/// authenticated user may delete any card; ownership is not checked.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `card_id` - The ID of the card to delete, extracted from the URL path
///
/// ### Returns
///
/// The deleted card as JSON
#[instrument(skip(pool), fields(card_id = %card_id))]
pub async fn delete_card_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the card ID from the URL path
    Path(card_id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    debug!("Deleting card");

    // Reject malformed identifiers before touching the store
    if Uuid::parse_str(&card_id).is_err() {
        debug!("Malformed card id");
        return Err(ApiError::Validation(errors::INVALID_DELETE_ID));
    }

    // Call the repository function to delete the card
    let card = repo::delete_card(&pool, &card_id)
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound(errors::CARD_NOT_FOUND))?;

    info!("Successfully deleted card");

    // Return the deleted card as JSON
    Ok(Json(card))
}

/// Handler for liking a card
///
/// This function handles PUT requests to `/cards/{card_id}/likes`. Liking a
/// card the user already likes changes nothing.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `user` - The authenticated acting user
/// * `card_id` - The ID of the card to like, extracted from the URL path
///
/// ### Returns
///
/// The updated card as JSON
#[instrument(skip(pool, user), fields(card_id = %card_id, user_id = %user.id()))]
pub async fn like_card_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the acting user attached by the identification middleware
    Extension(user): Extension<AuthUser>,
    // Extract the card ID from the URL path
    Path(card_id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    debug!("Adding like to card");

    // Reject malformed identifiers before touching the store
    if Uuid::parse_str(&card_id).is_err() {
        debug!("Malformed card id");
        return Err(ApiError::Validation(errors::INVALID_LIKE_DATA));
    }

    // Call the repository function to add the like
    let card = repo::like_card(&pool, &card_id, user.id())
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound(errors::NONEXISTENT_CARD_ID))?;

    info!("Card now has {} likes", card.get_likes().len());

    // Return the updated card as JSON
    Ok(Json(card))
}

/// Handler for removing a like from a card
///
/// This function handles DELETE requests to `/cards/{card_id}/likes`.
/// Removing a like the user never added changes nothing.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `user` - The authenticated acting user
/// * `card_id` - The ID of the card to unlike, extracted from the URL path
///
/// ### Returns
///
/// The updated card as JSON
#[instrument(skip(pool, user), fields(card_id = %card_id, user_id = %user.id()))]
pub async fn unlike_card_handler(
    // Extract the database pool from the application state
    State(pool): State<Arc<DbPool>>,
    // Extract the acting user attached by the identification middleware
    Extension(user): Extension<AuthUser>,
    // Extract the card ID from the URL path
    Path(card_id): Path<String>,
) -> Result<Json<Card>, ApiError> {
    debug!("Removing like from card");

    // Reject malformed identifiers before touching the store
    if Uuid::parse_str(&card_id).is_err() {
        debug!("Malformed card id");
        return Err(ApiError::Validation(errors::INVALID_UNLIKE_DATA));
    }

    // Call the repository function to remove the like
    let card = repo::unlike_card(&pool, &card_id, user.id())
        .map_err(ApiError::Database)?
        .ok_or(ApiError::NotFound(errors::NONEXISTENT_CARD_ID))?;

    info!("Card now has {} likes", card.get_likes().len());

    // Return the updated card as JSON
    Ok(Json(card))
}
