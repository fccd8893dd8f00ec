use log::info;
use mood_reads_api::{app::Application, config::Config, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenv::dotenv().ok();

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // Default to info level if RUST_LOG is not set
                "mood_reads_api=info,actix_web=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Loading configuration...");
    let config = Config::load()?;

    let application = Application::new(&config);
    application.run().await
}
