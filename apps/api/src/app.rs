use crate::{
    config::Config,
    error::Result,
    routes::api_routes,
    services::{BookSearch, GoogleBooksClient, RecommendationService},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::{net::TcpListener, sync::Arc, time::Duration};

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let bind_address = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}", bind_address);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        let google_books = GoogleBooksClient::new(
            &self.config.google_books_base_url,
            self.config.google_books_api_key.clone(),
            Duration::from_secs(self.config.request_timeout_secs),
        )
        .context("Failed to initialize Google Books client")?;
        if self.config.google_books_api_key.is_none() {
            info!("No Google Books API key configured, using anonymous quota");
        }

        let search: Arc<dyn BookSearch> = Arc::new(google_books);
        let recommendation_service = web::Data::new(RecommendationService::new(search));

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommendation_service.clone())
                .service(api_routes())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
