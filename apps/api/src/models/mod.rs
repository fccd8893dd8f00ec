use serde::{Deserialize, Serialize};

pub use book::{BookRecord, ScoredBook};

mod book;

/// The user's three-step mood selection
///
/// Fields are optional on the wire so a missing dimension is reported as a
/// validation failure rather than a deserialization error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodSelection {
    pub energy_id: Option<String>,
    pub genre_id: Option<String>,
    pub depth_id: Option<String>,
}

impl MoodSelection {
    pub fn new(energy_id: &str, genre_id: &str, depth_id: &str) -> Self {
        Self {
            energy_id: Some(energy_id.to_string()),
            genre_id: Some(genre_id.to_string()),
            depth_id: Some(depth_id.to_string()),
        }
    }
}

/// Request body for a refresh page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub mood_data: MoodSelection,
    #[serde(default)]
    pub exclude_book_ids: Vec<String>,
}

/// One `{label, color}` chip per mood dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodTag {
    pub label: String,
    pub color: String,
}

/// Human-readable summary of a resolved mood selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodSummary {
    pub title: String,
    pub description: String,
    pub emoji: String,
    pub tags: Vec<MoodTag>,
}

/// Response structure for mood recommendations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub recommendations: Vec<ScoredBook>,
    pub mood_summary: MoodSummary,
    /// Number of scored candidates before truncation to the returned page
    pub total_found: usize,
    pub mood_data: MoodSelection,
}

/// A selectable option for one mood dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodOption {
    pub id: String,
    pub title: String,
    pub emoji: String,
    pub description: String,
    pub color: String,
}

/// All options of the three-step mood picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodOptionsResponse {
    pub energy: Vec<MoodOption>,
    pub genre: Vec<MoodOption>,
    pub depth: Vec<MoodOption>,
}
