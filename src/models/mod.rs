/// Data models module
///
/// This module defines the card entity and its like set: the database model
/// mapped to the `cards` table, the validation performed when a card is
/// constructed, and the set semantics behind likes.

// Re-export all model types
mod like_set;
pub use like_set::LikeSet;

mod card;
pub use card::{Card, InvalidCard, NAME_MAX_CHARS, NAME_MIN_CHARS};
