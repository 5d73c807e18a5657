use diesel::deserialize::FromSql;
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::sqlite::{Sqlite, SqliteValue};
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};

/// The set of user IDs that have liked a card, stored as a JSON array in a
/// TEXT column.
///
/// Backed by a `Vec` so the stored JSON keeps insertion order; duplicates are
/// refused by [`LikeSet::insert`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, AsExpression, FromSqlRow)]
#[diesel(sql_type = Text)]
#[serde(transparent)]
pub struct LikeSet(Vec<String>);

impl LikeSet {
    /// Creates an empty like set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds `user_id` to the set.
    ///
    /// ### Returns
    ///
    /// `true` if the set changed, `false` if the user had already liked the
    /// card.
    pub fn insert(&mut self, user_id: &str) -> bool {
        if self.contains(user_id) {
            false
        } else {
            self.0.push(user_id.to_string());
            true
        }
    }

    /// Removes `user_id` from the set.
    ///
    /// ### Returns
    ///
    /// `true` if the set changed, `false` if the user had not liked the card.
    pub fn remove(&mut self, user_id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|id| id != user_id);
        self.0.len() != before
    }

    /// Whether `user_id` has liked the card.
    pub fn contains(&self, user_id: &str) -> bool {
        self.0.iter().any(|id| id == user_id)
    }

    /// The number of users that have liked the card.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the card has no likes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The liking user IDs in insertion order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl FromSql<Text, Sqlite> for LikeSet {
    fn from_sql(value: SqliteValue<'_, '_, '_>) -> diesel::deserialize::Result<Self> {
        let text = <String as FromSql<Text, Sqlite>>::from_sql(value)?;
        let ids = serde_json::from_str(&text)?;
        Ok(LikeSet(ids))
    }
}

impl ToSql<Text, Sqlite> for LikeSet {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(serde_json::to_string(&self.0)?);
        Ok(IsNull::No)
    }
}
