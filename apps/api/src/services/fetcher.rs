use crate::{
    models::BookRecord,
    services::{
        book_search::{BookSearch, SearchField},
        query_builder::{Query, QueryKind},
    },
};
use futures::future::join_all;
use tracing::{debug, info, warn};

/// Issue every query concurrently and flatten the results
///
/// A failing query is logged and contributes nothing; it never aborts the
/// batch. Results stay grouped per query, in the order the queries were built.
pub async fn fetch_all(
    search: &dyn BookSearch,
    queries: &[Query],
    max_results: usize,
) -> Vec<BookRecord> {
    info!(
        "Fanning out {} book searches ({} results each)",
        queries.len(),
        max_results
    );

    let requests = queries.iter().map(move |query| async move {
        let result = match query.kind {
            QueryKind::Subject => {
                search
                    .search_by_field(&query.text, SearchField::Subject, max_results)
                    .await
            }
            QueryKind::General => search.search(&query.text, max_results).await,
        };

        match result {
            Ok(books) => {
                debug!("Query {:?} '{}' returned {} books", query.kind, query.text, books.len());
                books
            }
            Err(e) => {
                warn!("Query {:?} '{}' failed: {}", query.kind, query.text, e);
                Vec::new()
            }
        }
    });

    let results = join_all(requests).await;
    let books: Vec<BookRecord> = results.into_iter().flatten().collect();

    info!("Fetched {} books before deduplication", books.len());
    books
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, Result};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Slower responses for earlier queries, so completion order is reversed
    struct DelayedSearch;

    fn book(id: &str) -> BookRecord {
        BookRecord {
            id: id.to_string(),
            title: id.to_string(),
            author: "Author".to_string(),
            description: String::new(),
            categories: Vec::new(),
            page_count: 0,
            average_rating: 0.0,
            ratings_count: 0,
            thumbnail: None,
        }
    }

    #[async_trait]
    impl BookSearch for DelayedSearch {
        async fn search(&self, query: &str, _max_results: usize) -> Result<Vec<BookRecord>> {
            let delay: u64 = query.trim_start_matches('q').parse().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(40 - delay * 10)).await;
            if query == "q2" {
                return Err(ApiError::ExternalServiceError("boom".to_string()));
            }
            Ok(vec![book(&format!("{}-a", query)), book(&format!("{}-b", query))])
        }

        async fn search_by_field(
            &self,
            query: &str,
            field: SearchField,
            max_results: usize,
        ) -> Result<Vec<BookRecord>> {
            let books = self.search(query, max_results).await?;
            Ok(books
                .into_iter()
                .map(|mut b| {
                    b.id = format!("{}:{}", field.as_str(), b.id);
                    b
                })
                .collect())
        }
    }

    fn query(kind: QueryKind, text: &str) -> Query {
        Query {
            kind,
            text: text.to_string(),
            weight: 1.0,
        }
    }

    #[tokio::test]
    async fn test_results_follow_query_order() {
        let queries = vec![
            query(QueryKind::General, "q0"),
            query(QueryKind::Subject, "q1"),
            query(QueryKind::General, "q2"),
            query(QueryKind::General, "q3"),
        ];

        let books = fetch_all(&DelayedSearch, &queries, 15).await;
        let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();

        assert_eq!(
            ids,
            vec![
                "q0-a",
                "q0-b",
                "subject:q1-a",
                "subject:q1-b",
                "q3-a",
                "q3-b"
            ]
        );
    }

    #[tokio::test]
    async fn test_all_queries_failing_yields_nothing() {
        let queries = vec![query(QueryKind::General, "q2")];
        assert!(fetch_all(&DelayedSearch, &queries, 15).await.is_empty());
    }
}
