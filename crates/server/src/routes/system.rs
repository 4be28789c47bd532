use actix_web::{get, web, HttpResponse};

use crate::state::AppState;
use crate::types::HealthResponse;

/// GET /api/health - Liveness plus provider configuration status
#[get("/health")]
pub async fn health(state: web::Data<std::sync::Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        provider_configured: state.converter.is_configured(),
        provider: state.converter.provider_name().map(str::to_string),
        model: state.converter.model().to_string(),
    })
}
