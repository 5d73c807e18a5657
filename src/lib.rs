//! Pinboard: a card-sharing REST backend
//!
//! This library provides the server side of a shared photo-card board:
//! data models, database access, and a web API for creating, listing,
//! deleting, liking, and unliking cards.
//!
//! ### Modules
//!
//! - `auth`: Request identification middleware
//! - `config`: Layered configuration loading
//! - `db`: Database connection management
//! - `dto`: Request payload types
//! - `errors`: The API error type and its HTTP mapping
//! - `handlers`: Axum handlers for the REST endpoints
//! - `models`: Data structures representing cards
//! - `repo`: Repository layer for database operations
//! - `schema`: Database schema definitions
//!
//! ### Web API
//!
//! The library exposes a RESTful API using Axum with the following endpoints:
//!
//! - `GET /cards`: List all cards
//! - `POST /cards`: Create a new card
//! - `DELETE /cards/{card_id}`: Delete a card
//! - `PUT /cards/{card_id}/likes`: Like a card
//! - `DELETE /cards/{card_id}/likes`: Remove a like from a card
//!
//! Every request must carry an `x-user-id` header naming the acting user.

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod schema;

#[cfg(test)]
pub mod test_utils;

use axum::{
    middleware,
    routing::{delete, get, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use handlers::{
    create_card_handler, delete_card_handler, like_card_handler, list_cards_handler,
    unlike_card_handler,
};

/// Creates the application router with all routes
///
/// This function sets up the Axum router with all the API endpoints, the
/// identification middleware, and a permissive CORS layer for browser
/// clients.
///
/// ### Arguments
///
/// * `pool` - The database connection pool to be shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the database pool as state
pub fn create_app(pool: Arc<db::DbPool>) -> Router {
    Router::new()
        // Routes for listing and creating cards
        .route("/cards", get(list_cards_handler).post(create_card_handler))
        // Route for deleting a card by ID
        .route("/cards/{card_id}", delete(delete_card_handler))
        // Routes for liking and unliking a card
        .route(
            "/cards/{card_id}/likes",
            put(like_card_handler).delete(unlike_card_handler),
        )
        // Identify the acting user before any handler runs
        .layer(middleware::from_fn(auth::identify_user))
        // Allow browser clients from any origin
        .layer(CorsLayer::permissive())
        // Add the database pool to the application state
        .with_state(pool)
}

/// Runs the embedded migrations
///
/// This function applies all database migrations to set up the schema. It is
/// called at server startup and by the test harnesses.
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
///
/// ### Panics
///
/// This function will panic if the migrations fail to run
pub fn run_migrations(conn: &mut diesel::SqliteConnection) {
    use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

    // Define the embedded migrations
    const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

    // Run all pending migrations
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run migrations");
}
