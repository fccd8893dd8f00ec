use crate::{
    error::{ApiError, Result},
    models::BookRecord,
    services::book_search::{BookSearch, SearchField},
};
use async_trait::async_trait;
use reqwest::{header::HeaderMap, Client};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Largest page the volumes endpoint will return
const MAX_RESULTS_LIMIT: usize = 40;

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    id: Option<String>,
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    title: Option<String>,
    #[serde(default)]
    authors: Vec<String>,
    description: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    page_count: Option<u32>,
    average_rating: Option<f32>,
    ratings_count: Option<u32>,
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

impl Volume {
    fn into_record(self) -> Option<BookRecord> {
        let id = self.id?;
        let info = self.volume_info;
        let author = if info.authors.is_empty() {
            "Unknown Author".to_string()
        } else {
            info.authors.join(", ")
        };

        Some(BookRecord {
            id,
            title: info.title.unwrap_or_else(|| "Untitled".to_string()),
            author,
            description: info.description.unwrap_or_default(),
            categories: info.categories,
            page_count: info.page_count.unwrap_or(0),
            average_rating: info.average_rating.unwrap_or(0.0),
            ratings_count: info.ratings_count.unwrap_or(0),
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
        })
    }
}

/// Client for the Google Books volumes API
#[derive(Debug, Clone)]
pub struct GoogleBooksClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GoogleBooksClient {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn query_volumes(&self, q: &str, max_results: usize) -> Result<Vec<BookRecord>> {
        let max_results = max_results.clamp(1, MAX_RESULTS_LIMIT).to_string();
        let mut params = vec![
            ("q", q),
            ("maxResults", max_results.as_str()),
            ("printType", "books"),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.as_str()));
        }

        debug!("Querying Google Books volumes: q='{}'", q);

        let response = self
            .client
            .get(format!("{}/volumes", self.base_url))
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::ExternalServiceError(format!(
                "Google Books query failed with {}: {}",
                status, error_text
            )));
        }

        let volumes: VolumesResponse = response.json().await?;
        Ok(volumes
            .items
            .into_iter()
            .filter_map(Volume::into_record)
            .collect())
    }
}

#[async_trait]
impl BookSearch for GoogleBooksClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<BookRecord>> {
        self.query_volumes(query, max_results).await
    }

    async fn search_by_field(
        &self,
        query: &str,
        field: SearchField,
        max_results: usize,
    ) -> Result<Vec<BookRecord>> {
        let qualified = format!("{}:{}", field.as_str(), query);
        self.query_volumes(&qualified, max_results).await
    }
}
