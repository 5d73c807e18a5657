use crate::*;
use crate::models::{NAME_MAX_CHARS, NAME_MIN_CHARS};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use diesel::sql_types::Text;
use diesel::{QueryableByName, RunQueryDsl};
use proptest::prelude::*;
use std::sync::Arc;
use tower::ServiceExt;

/// Sets up a test database with migrations applied
///
/// This function:
/// 1. Creates an in-memory SQLite database
/// 2. Runs all migrations to set up the schema
///
/// ### Returns
///
/// An Arc-wrapped database connection pool connected to the in-memory database
pub fn setup_test_db() -> Arc<db::DbPool> {
    // Each test gets its own uniquely named shared in-memory database.
    // Plain ":memory:" gives every pooled connection a private database, so
    // migrations applied on one connection would be invisible to the rest;
    // a file: URI with cache=shared keeps the whole pool on one database
    // while isolating it from other tests.
    let unique_id = uuid::Uuid::new_v4();
    let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
    let pool = db::init_pool(&database_url);

    // Run all migrations to set up the schema
    let mut conn = pool.get().expect("Failed to get connection");
    run_migrations(&mut conn);

    // Wrap the pool in an Arc for thread-safe sharing
    Arc::new(pool)
}

/// Strategy for card names: any string of an accepted character length
pub fn arb_card_name() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), NAME_MIN_CHARS..=NAME_MAX_CHARS)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for card links: URLs assembled from lowercase host and path parts
pub fn arb_link() -> impl Strategy<Value = String> {
    ("[a-z]{1,12}", "[a-z0-9]{0,12}")
        .prop_map(|(host, path)| format!("https://{}.example/{}", host, path))
}

/// Strategy for user IDs: UUIDs derived from the proptest seed
pub fn arb_user_id() -> impl Strategy<Value = String> {
    any::<u128>().prop_map(|n| uuid::Uuid::from_u128(n).to_string())
}

#[derive(QueryableByName, Debug)]
struct TableName {
    #[diesel(sql_type = Text)]
    name: String,
}

/// Tests the setup_test_db function
///
/// This test verifies that:
/// 1. The test database can be created and connected to
/// 2. The database has the expected tables
/// 3. The database can be queried through the router
#[tokio::test]
async fn test_setup_test_db() {
    let pool = setup_test_db();
    assert!(pool.get().is_ok());

    // Check that all migrations were run, i.e. the tables were created
    let mut conn = pool.get().unwrap();
    let table_names: Vec<TableName> =
        diesel::sql_query("SELECT name FROM sqlite_master WHERE type='table'")
            .load(&mut conn)
            .expect("Failed to load table names");

    for table in ["cards", "__diesel_schema_migrations"] {
        assert!(
            table_names.iter().any(|t| t.name == table),
            "Table '{}' not found in database",
            table
        );
    }

    drop(conn);

    // Test interacting with the app
    let app = create_app(pool.clone());

    let request = Request::builder()
        .uri("/cards")
        .method("GET")
        .header(auth::USER_ID_HEADER, "user-1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
