pub mod book_search;
pub mod candidates;
pub mod fetcher;
pub mod google_books;
pub mod mood_table;
pub mod query_builder;
pub mod recommendation;
pub mod scoring;

// Re-export public types
pub use book_search::{BookSearch, SearchField};
pub use google_books::GoogleBooksClient;
pub use recommendation::RecommendationService;
