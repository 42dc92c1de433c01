//! Public user projections.

use serde::{Deserialize, Serialize};

/// The public reduction of a user used wherever a channel or subscriber is
/// rendered inside another resource (subscriber listings, channel listings,
/// watch-history owner blocks). Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCard {
    pub username: String,
    pub full_name: String,
    pub avatar_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}
