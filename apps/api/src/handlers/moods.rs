use crate::services::mood_table::MOOD_TABLE;
use actix_web::{get, HttpResponse};

/// Options for the three-step mood picker, in display order
#[get("/moods")]
pub async fn mood_options() -> HttpResponse {
    HttpResponse::Ok().json(MOOD_TABLE.options_response())
}
