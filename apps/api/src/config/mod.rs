use crate::error::Result;
use serde::Deserialize;

pub const DEFAULT_GOOGLE_BOOKS_URL: &str = "https://www.googleapis.com/books/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub google_books_base_url: String,
    pub google_books_api_key: Option<String>,
    /// Timeout for a single call to the book search service
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    ///
    /// Expects `.env` to have been loaded already if one is used.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("google_books_base_url", DEFAULT_GOOGLE_BOOKS_URL)?
            .set_default("request_timeout_secs", 10)?
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }
}
