use serde::{Deserialize, Serialize};

/// A book as returned by the search service
///
/// Missing numeric metadata is reported as `0` rather than absent, so scoring
/// never has to special-case unknown values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub average_rating: f32,
    #[serde(default)]
    pub ratings_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// A candidate book augmented with its mood match details
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredBook {
    #[serde(flatten)]
    pub book: BookRecord,
    pub match_score: f64,
    /// Display form of `match_score`, always within 0..=98
    pub match_percentage: u8,
    pub match_reasons: Vec<String>,
    pub mood_tags: Vec<String>,
}
