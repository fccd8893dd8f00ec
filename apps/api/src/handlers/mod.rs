pub mod health;
pub mod moods;
pub mod recommendations;

pub use health::health_check;
pub use moods::mood_options;
pub use recommendations::recommendations_config;
