use crate::{
    error::{ApiError, Result},
    models::{MoodSelection, MoodSummary, MoodTag, RecommendationResult},
    services::{
        book_search::BookSearch,
        candidates::{dedupe, exclude},
        fetcher::fetch_all,
        mood_table::{MoodDimension, ResolvedMood, MOOD_TABLE},
        query_builder::{build_queries, Breadth},
        scoring::{rank, score_books},
    },
};
use std::{collections::HashSet, sync::Arc};
use tracing::{debug, info};

/// Number of recommendations returned per page
pub const PAGE_SIZE: usize = 10;

/// Mood-based recommendation engine
///
/// Holds no state besides the search client; every call builds its queries,
/// candidates and scores from scratch.
#[derive(Clone)]
pub struct RecommendationService {
    search: Arc<dyn BookSearch>,
}

impl RecommendationService {
    pub fn new(search: Arc<dyn BookSearch>) -> Self {
        Self { search }
    }

    /// First page of recommendations for a mood
    pub async fn recommend(&self, mood_data: &MoodSelection) -> Result<RecommendationResult> {
        let mood = validate(mood_data)?;
        info!(
            "Recommending for mood energy={} genre={} depth={}",
            mood.energy.id, mood.genre.id, mood.depth.id
        );

        self.run(mood_data, mood, Breadth::Standard, &HashSet::new())
            .await
    }

    /// A fresh page that never repeats any of `exclude_book_ids`
    ///
    /// Uses the expanded query set so enough unseen candidates remain after
    /// exclusion.
    pub async fn refresh(
        &self,
        mood_data: &MoodSelection,
        exclude_book_ids: &[String],
    ) -> Result<RecommendationResult> {
        let mood = validate(mood_data)?;
        info!(
            "Refreshing for mood energy={} genre={} depth={}, excluding {} books",
            mood.energy.id,
            mood.genre.id,
            mood.depth.id,
            exclude_book_ids.len()
        );

        let excluded: HashSet<String> = exclude_book_ids.iter().cloned().collect();
        self.run(mood_data, mood, Breadth::Expanded, &excluded)
            .await
    }

    async fn run(
        &self,
        mood_data: &MoodSelection,
        mood: ResolvedMood,
        breadth: Breadth,
        excluded: &HashSet<String>,
    ) -> Result<RecommendationResult> {
        let queries = build_queries(&mood, breadth);
        debug!("Built {} {:?} queries", queries.len(), breadth);

        let fetched = fetch_all(
            self.search.as_ref(),
            &queries,
            breadth.max_results_per_query(),
        )
        .await;

        let unique = dedupe(fetched);
        let candidates = exclude(unique, excluded);
        debug!("{} unique candidates after exclusion", candidates.len());

        let scored = score_books(candidates, &mood);
        let total_found = scored.len();
        let recommendations = rank(scored, PAGE_SIZE);

        info!(
            "Returning {} of {} scored books. First book: {:?}",
            recommendations.len(),
            total_found,
            recommendations.first().map(|b| b.book.title.clone())
        );

        Ok(RecommendationResult {
            recommendations,
            mood_summary: mood_summary(&mood),
            total_found,
            mood_data: mood_data.clone(),
        })
    }
}

/// Check that all three ids are present and known, then resolve them
pub fn validate(mood_data: &MoodSelection) -> Result<ResolvedMood> {
    let energy_id = require(MoodDimension::Energy, mood_data.energy_id.as_deref())?;
    let genre_id = require(MoodDimension::Genre, mood_data.genre_id.as_deref())?;
    let depth_id = require(MoodDimension::Depth, mood_data.depth_id.as_deref())?;

    ResolvedMood::resolve(energy_id, genre_id, depth_id)
}

fn require(dimension: MoodDimension, id: Option<&str>) -> Result<&str> {
    let id = id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::InvalidInput(format!("{} is required", dimension.field_name())))?;

    if !MOOD_TABLE.contains(dimension, id) {
        return Err(ApiError::InvalidInput(format!(
            "Unknown {} '{}'",
            dimension.field_name(),
            id
        )));
    }

    Ok(id)
}

fn mood_summary(mood: &ResolvedMood) -> MoodSummary {
    let dimensions = [mood.energy, mood.genre, mood.depth];

    MoodSummary {
        title: format!("{} {}", mood.energy.title, mood.genre.title),
        description: format!(
            "{}. {}. {}.",
            mood.energy.description, mood.genre.description, mood.depth.description
        ),
        emoji: dimensions.iter().map(|c| c.emoji).collect(),
        tags: dimensions
            .iter()
            .map(|c| MoodTag {
                label: c.title.to_string(),
                color: c.color.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::BookRecord,
        services::book_search::SearchField,
    };
    use async_trait::async_trait;
    use std::{
        collections::HashMap,
        sync::atomic::{AtomicUsize, Ordering},
    };

    /// Canned search results keyed by query text
    #[derive(Default)]
    struct MockSearch {
        results: HashMap<String, Vec<BookRecord>>,
        failing: HashSet<String>,
        calls: AtomicUsize,
        max_results_seen: AtomicUsize,
    }

    impl MockSearch {
        fn with(mut self, query: &str, books: Vec<BookRecord>) -> Self {
            self.results.insert(query.to_string(), books);
            self
        }

        fn failing(mut self, query: &str) -> Self {
            self.failing.insert(query.to_string());
            self
        }

        fn respond(&self, query: &str, max_results: usize) -> Result<Vec<BookRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.max_results_seen.fetch_max(max_results, Ordering::SeqCst);

            if self.failing.contains(query) {
                return Err(ApiError::ExternalServiceError(format!(
                    "search for '{}' timed out",
                    query
                )));
            }
            Ok(self.results.get(query).cloned().unwrap_or_default())
        }
    }

    #[async_trait]
    impl BookSearch for MockSearch {
        async fn search(&self, query: &str, max_results: usize) -> Result<Vec<BookRecord>> {
            self.respond(query, max_results)
        }

        async fn search_by_field(
            &self,
            query: &str,
            field: SearchField,
            max_results: usize,
        ) -> Result<Vec<BookRecord>> {
            assert_eq!(field, SearchField::Subject);
            self.respond(query, max_results)
        }
    }

    fn book(id: &str) -> BookRecord {
        BookRecord {
            id: id.to_string(),
            title: format!("Book {}", id),
            author: "Author".to_string(),
            description: String::new(),
            categories: vec!["Mystery".to_string()],
            page_count: 320,
            average_rating: 3.0,
            ratings_count: 10,
            thumbnail: None,
        }
    }

    fn rated(id: &str, rating: f32) -> BookRecord {
        BookRecord {
            average_rating: rating,
            ..book(id)
        }
    }

    fn service(mock: MockSearch) -> (RecommendationService, Arc<MockSearch>) {
        let mock = Arc::new(mock);
        (RecommendationService::new(mock.clone()), mock)
    }

    fn mystery_mood() -> MoodSelection {
        MoodSelection::new("high", "mystery", "light")
    }

    #[tokio::test]
    async fn test_recommend_issues_standard_queries() {
        let (service, mock) = service(MockSearch::default());

        let result = service.recommend(&mystery_mood()).await.unwrap();

        assert_eq!(mock.calls.load(Ordering::SeqCst), 9);
        assert_eq!(mock.max_results_seen.load(Ordering::SeqCst), 15);
        assert!(result.recommendations.is_empty());
        assert_eq!(result.total_found, 0);
        assert_eq!(result.mood_data, mystery_mood());
    }

    #[tokio::test]
    async fn test_refresh_issues_expanded_queries() {
        let (service, mock) = service(MockSearch::default());

        service.refresh(&mystery_mood(), &[]).await.unwrap();

        assert_eq!(mock.calls.load(Ordering::SeqCst), 48);
        assert_eq!(mock.max_results_seen.load(Ordering::SeqCst), 25);
    }

    #[tokio::test]
    async fn test_missing_dimension_fails_before_any_search() {
        let (service, mock) = service(MockSearch::default());

        let mut mood = mystery_mood();
        mood.depth_id = None;
        let err = service.recommend(&mood).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(ref msg) if msg.contains("depthId")));

        let mut mood = mystery_mood();
        mood.energy_id = Some("  ".to_string());
        let err = service.refresh(&mood, &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(ref msg) if msg.contains("energyId")));

        assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_id_fails_validation() {
        let (service, mock) = service(MockSearch::default());

        let err = service
            .recommend(&MoodSelection::new("high", "poetry", "light"))
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidInput(ref msg) if msg.contains("genreId")));
        assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_queries_are_absorbed() {
        let mock = MockSearch::default()
            .failing("mystery")
            .failing("crime")
            .failing("mystery fun")
            .with("detective", vec![book("d1")])
            .with("thriller", vec![book("t1")])
            .with("mystery thriller", vec![book("mt1")])
            .with("mystery action", vec![book("ma1")])
            .with("detective thriller", vec![book("dt1")])
            .with("detective action", vec![book("da1")]);
        let (service, mock) = service(mock);

        let result = service.recommend(&mystery_mood()).await.unwrap();

        assert_eq!(mock.calls.load(Ordering::SeqCst), 9);
        assert_eq!(result.total_found, 6);
        let mut ids: Vec<&str> = result
            .recommendations
            .iter()
            .map(|b| b.book.id.as_str())
            .collect();
        ids.sort();
        assert_eq!(ids, vec!["d1", "da1", "dt1", "ma1", "mt1", "t1"]);
    }

    #[tokio::test]
    async fn test_duplicates_across_queries_are_merged() {
        let mock = MockSearch::default()
            .with("mystery", vec![book("a"), book("b")])
            .with("detective", vec![book("b"), book("c")])
            .with("mystery thriller", vec![book("a")]);
        let (service, _) = service(mock);

        let result = service.recommend(&mystery_mood()).await.unwrap();

        assert_eq!(result.total_found, 3);
        let ids: HashSet<&str> = result
            .recommendations
            .iter()
            .map(|b| b.book.id.as_str())
            .collect();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_results_are_ranked_and_paged() {
        let books: Vec<BookRecord> = (0..14)
            .map(|i| rated(&format!("b{}", i), if i == 13 { 4.9 } else { 3.0 }))
            .collect();
        let mock = MockSearch::default().with("mystery", books);
        let (service, _) = service(mock);

        let result = service.recommend(&mystery_mood()).await.unwrap();

        assert_eq!(result.total_found, 14);
        assert_eq!(result.recommendations.len(), PAGE_SIZE);
        assert_eq!(result.recommendations[0].book.id, "b13");
        assert!(result
            .recommendations
            .windows(2)
            .all(|w| w[0].match_score >= w[1].match_score));
        assert!(result
            .recommendations
            .iter()
            .all(|b| b.match_percentage <= 98));
    }

    #[tokio::test]
    async fn test_refresh_never_returns_excluded_books() {
        let mock = MockSearch::default()
            .with("mystery", vec![rated("star", 5.0), book("a"), book("b")])
            .with("Crime", vec![rated("star", 5.0), book("c")]);
        let (service, _) = service(mock);

        let result = service
            .refresh(&mystery_mood(), &["star".to_string(), "b".to_string()])
            .await
            .unwrap();

        let ids: Vec<&str> = result
            .recommendations
            .iter()
            .map(|b| b.book.id.as_str())
            .collect();
        assert!(!ids.contains(&"star"));
        assert!(!ids.contains(&"b"));
        assert_eq!(result.total_found, 2);
    }

    #[tokio::test]
    async fn test_refresh_with_everything_excluded_is_empty_page() {
        let mock = MockSearch::default().with("mystery", vec![book("a"), book("b")]);
        let (service, _) = service(mock);

        let result = service
            .refresh(&mystery_mood(), &["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        assert!(result.recommendations.is_empty());
        assert_eq!(result.total_found, 0);
    }

    #[test]
    fn test_mood_summary() {
        let mood = validate(&mystery_mood()).unwrap();
        let summary = mood_summary(&mood);

        assert_eq!(summary.title, "High Energy Mystery");
        assert_eq!(summary.emoji, "⚡🔍☁️");
        let labels: Vec<&str> = summary.tags.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["High Energy", "Mystery", "Light & Easy"]);
        assert_eq!(summary.tags[1].color, "#5D5C61");
    }
}
