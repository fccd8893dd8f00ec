use crate::{
    error::ApiError,
    models::{MoodSelection, RefreshRequest},
    services::RecommendationService,
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/recommendations/mood").route(web::post().to(recommend_by_mood)))
        .service(
            web::resource("/recommendations/mood/refresh")
                .route(web::post().to(refresh_recommendations)),
        );
}

/// First page of book recommendations for a mood selection
pub async fn recommend_by_mood(
    request: Json<MoodSelection>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let result = recommendation_service.recommend(&request).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// Another page for the same mood, skipping books the client has already shown
pub async fn refresh_recommendations(
    request: Json<RefreshRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse, ApiError> {
    let result = recommendation_service
        .refresh(&request.mood_data, &request.exclude_book_ids)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
