use actix_web::{http::StatusCode, post, web, HttpResponse};
use biztone_common::BizToneError;
use biztone_llm::ConversionRequest;
use tracing::error;

use crate::state::AppState;
use crate::types::ErrorResponse;

/// POST /api/convert - Convert free-form text into a business message
///
/// The body is taken as a `Result` so a missing API key is reported before
/// any body parse failure.
#[post("/convert")]
pub async fn convert(
    req: Result<web::Json<ConversionRequest>, actix_web::Error>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> HttpResponse {
    if !state.converter.is_configured() {
        error!("Completion provider not initialized (GROQ_API_KEY missing)");
        return error_response(&BizToneError::config("completion provider not initialized"));
    }

    // The JsonConfig error handler already built the 400 body
    let req = match req {
        Ok(req) => req,
        Err(e) => return e.error_response(),
    };

    match state.converter.convert(&req).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(&e),
    }
}

/// Translate an error into its status and user-safe body
pub fn error_response(err: &BizToneError) -> HttpResponse {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(ErrorResponse::new(err.user_message()))
}
