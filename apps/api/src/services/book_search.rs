use crate::error::Result;
use crate::models::BookRecord;
use async_trait::async_trait;

/// Restricts a search to one indexed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Subject,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Subject => "subject",
        }
    }
}

/// External book search service
///
/// Calls are network bound and may fail independently of one another; no
/// ordering guarantee beyond best-effort relevance is assumed.
#[async_trait]
pub trait BookSearch: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<BookRecord>>;

    async fn search_by_field(
        &self,
        query: &str,
        field: SearchField,
        max_results: usize,
    ) -> Result<Vec<BookRecord>>;
}
