/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for interacting with the database: creating,
/// listing, deleting, and mutating cards.
///
/// The repository pattern abstracts away the details of database access
/// and provides a clean API for the rest of the application to use.

mod card_repo;

// Re-export all repository functions
pub use card_repo::*;
