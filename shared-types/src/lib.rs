use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of media attached to a stop. Exactly one tag, no combinations.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    None,
    Image,
    Video,
    Audio,
}

/// One point of interest within a tour.
///
/// The id is unique only within the owning tour's stop sequence. Coordinates
/// are stored as submitted; no bounds validation is performed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Stop {
    pub id: String,
    pub title: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    pub media_kind: MediaKind,
}

/// An ordered itinerary owned by one creator.
///
/// Stops have no independent lifecycle; they are persisted and deleted
/// atomically with their tour. Stop order is meaningful: playback and
/// path-drawing follow sequence order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Tour {
    /// Globally unique identifier. Empty means "not yet assigned"; the store
    /// generates `tour-<epochMillis>` on first save. Immutable afterwards.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Owner reference. Not enforced as a foreign key.
    pub author_id: String,
    pub stops: Vec<Stop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    /// Set by the store on first insert.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Set by the store on every save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Tour {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}
