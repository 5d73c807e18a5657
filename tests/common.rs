/// Common test utilities for pinboard integration tests
///
/// This file contains shared functions and utilities for all integration tests,
/// including test application setup, helper functions for sending authenticated
/// requests, and helpers for creating common test objects.

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    Router,
};
use pinboard::{db::init_pool, models::Card};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::Service;
use uuid::Uuid;

/// The user most tests act as
pub const TEST_USER: &str = "user-1";

/// A second user, for tests exercising multi-user behavior
pub const OTHER_USER: &str = "user-2";

/// Creates a test application with an in-memory SQLite database
///
/// This helper function:
/// 1. Creates an in-memory SQLite database shared across the pool
/// 2. Runs migrations to set up the schema
/// 3. Creates an Axum application with the database
///
/// Using an in-memory database ensures that:
/// - Tests run quickly
/// - Tests are isolated from each other
/// - No cleanup is needed after tests
///
/// ### Returns
///
/// An Axum Router configured with all routes and connected to an in-memory database
pub fn create_test_app() -> Router {
    // A plain ":memory:" URL would give every pooled connection its own
    // private database, so the schema set up here would be invisible to
    // the connections handling requests. A named shared-cache database
    // keeps the whole pool on one database, and the unique name keeps
    // concurrently running tests apart.
    let database_url = format!("file:test_{}?mode=memory&cache=shared", Uuid::new_v4().simple());
    let pool = Arc::new(init_pool(&database_url));

    // Run migrations on the in-memory database to set up the schema
    let conn = &mut pool.get().unwrap();
    pinboard::run_migrations(conn);

    // Create and return the application with the configured database pool
    pinboard::create_app(pool)
}

/// Builds a request carrying the `x-user-id` header
///
/// Every route in the application sits behind the identification middleware,
/// so almost every test request needs this header.
///
/// ### Arguments
///
/// * `method` - The HTTP method to use
/// * `uri` - The request URI
/// * `user` - The user id to send in the `x-user-id` header
/// * `body` - An optional JSON body
///
/// ### Returns
///
/// A request ready to be sent to the test application
pub fn authed_request(method: &str, uri: String, user: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .uri(uri)
        .method(method)
        .header("x-user-id", user);

    match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Creates a card via the API
///
/// This helper function:
/// 1. Sends a POST request to /cards with the provided name and link
/// 2. Verifies the response has a 201 Created status
/// 3. Parses and returns the created Card
///
/// ### Arguments
///
/// * `app` - The test application
/// * `user` - The user creating the card
/// * `name` - The name for the new card
/// * `link` - The image URL for the new card
///
/// ### Returns
///
/// The created Card with its ID, owner, and creation timestamp
pub async fn create_card(app: &mut Router, user: &str, name: &str, link: &str) -> Card {
    let request = authed_request(
        "POST",
        "/cards".to_string(),
        user,
        Some(json!({
            "name": name,
            "link": link
        })),
    );

    // Send the request and get the response
    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Parse the response body
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let card: Card = serde_json::from_slice(&body).unwrap();

    card
}

/// Lists all cards via the API
///
/// This helper function:
/// 1. Sends a GET request to /cards
/// 2. Verifies the response has a 200 OK status
/// 3. Parses and returns the cards
///
/// ### Arguments
///
/// * `app` - The test application
/// * `user` - The user issuing the request
///
/// ### Returns
///
/// A vector of all Cards on the board
pub async fn list_cards(app: &mut Router, user: &str) -> Vec<Card> {
    let request = authed_request("GET", "/cards".to_string(), user, None);

    // Send the request and get the response
    let response = app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Parse the response body
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let cards: Vec<Card> = serde_json::from_slice(&body).unwrap();

    cards
}

/// Extracts the `message` field from an error response body
///
/// All error responses share the shape `{"message": "..."}`, so tests
/// asserting on error bodies can use this to get at the text.
///
/// ### Arguments
///
/// * `response` - The response to read the body of
///
/// ### Returns
///
/// The message string from the response body
pub async fn read_message(response: Response<Body>) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();

    value["message"].as_str().unwrap().to_string()
}
