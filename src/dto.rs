use serde::Deserialize;

/// Data transfer object for creating a new card
///
/// This struct is used to deserialize JSON requests for creating cards.
/// The owner is never part of the payload; it comes from the authenticated
/// request context.
#[derive(Deserialize, Debug)]
pub struct CreateCardDto {
    /// The display name of the card
    pub name: String,

    /// The URL the card points at
    pub link: String,
}
