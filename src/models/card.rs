use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

use super::LikeSet;

/// Minimum length of a card name, in characters
pub const NAME_MIN_CHARS: usize = 2;

/// Maximum length of a card name, in characters
pub const NAME_MAX_CHARS: usize = 30;

/// A rejection produced when card data fails schema validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCard {
    /// The name falls outside the accepted length range
    #[error("card name must be between 2 and 30 characters, got {0}")]
    NameLength(usize),

    /// The link does not parse as a URL
    #[error("card link is not a valid URL: {0}")]
    Link(String),
}

/// Represents a card pinned to the shared board
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Card {
    /// Unique identifier for the card (UUID v4 as string)
    id: String,

    /// The display name of the card
    name: String,

    /// The URL the card points at
    link: String,

    /// The ID of the user who created the card; set once, never mutated
    owner: String,

    /// The IDs of the users that have liked the card, stored as JSON TEXT
    likes: LikeSet,

    /// When this card was created
    created_at: NaiveDateTime,
}

impl Card {
    /// Creates a new card owned by `owner`, validating the supplied data
    ///
    /// ### Arguments
    ///
    /// * `name` - The display name of the card, 2 to 30 characters
    /// * `link` - The URL the card points at
    /// * `owner` - The ID of the creating user
    ///
    /// ### Returns
    ///
    /// A new `Card` with a generated ID and no likes, or the [`InvalidCard`]
    /// describing the first validation failure
    pub fn new(name: String, link: String, owner: String) -> Result<Self, InvalidCard> {
        let name_chars = name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_chars) {
            return Err(InvalidCard::NameLength(name_chars));
        }
        if Url::parse(&link).is_err() {
            return Err(InvalidCard::Link(link));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            link,
            owner,
            likes: LikeSet::new(),
            created_at: Utc::now().naive_utc(),
        })
    }

    /// Gets the card's ID
    ///
    /// ### Returns
    ///
    /// The unique identifier of the card
    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    /// Gets the card's display name
    ///
    /// ### Returns
    ///
    /// The display name of the card
    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    /// Gets the card's link
    ///
    /// ### Returns
    ///
    /// The URL the card points at
    pub fn get_link(&self) -> String {
        self.link.clone()
    }

    /// Gets the card's owner
    ///
    /// ### Returns
    ///
    /// The ID of the user who created the card
    pub fn get_owner(&self) -> String {
        self.owner.clone()
    }

    /// Gets the card's like set
    ///
    /// ### Returns
    ///
    /// The IDs of the users that have liked the card
    pub fn get_likes(&self) -> LikeSet {
        self.likes.clone()
    }

    /// Gets the card's creation timestamp as a DateTime<Utc>
    ///
    /// ### Returns
    ///
    /// The timestamp when this card was created
    pub fn get_created_at(&self) -> DateTime<Utc> {
        DateTime::from_naive_utc_and_offset(self.created_at, Utc)
    }

    /// Records that `user_id` likes this card
    ///
    /// Liking a card twice with the same user leaves the set unchanged.
    ///
    /// ### Returns
    ///
    /// `true` if the like set changed
    pub fn add_like(&mut self, user_id: &str) -> bool {
        self.likes.insert(user_id)
    }

    /// Removes `user_id`'s like from this card
    ///
    /// Removing a like that was never added leaves the set unchanged.
    ///
    /// ### Returns
    ///
    /// `true` if the like set changed
    pub fn remove_like(&mut self, user_id: &str) -> bool {
        self.likes.remove(user_id)
    }

    /// Whether `user_id` has liked this card
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.contains(user_id)
    }
}
