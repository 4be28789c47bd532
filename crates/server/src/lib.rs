//! BizTone HTTP Server
//!
//! Actix-web 기반 변환 API 및 정적 프론트엔드 서버

pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{error::InternalError, web, App, HttpResponse, HttpServer};
use biztone_common::{AppConfig, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

pub use state::AppState;

use crate::types::ErrorResponse;

/// JSON extractor config: malformed bodies get the same `{"error": ..}` shape
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        warn!("Rejected request body: {}", err);
        let response = HttpResponse::BadRequest().json(ErrorResponse::new("잘못된 요청 형식입니다."));
        InternalError::from_response(err, response).into()
    })
}

/// Register `/api` routes
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .service(routes::convert::convert)
            .service(routes::system::health),
    );
}

/// Start the HTTP server and block until it stops
pub async fn start_server(config: AppConfig) -> Result<()> {
    let bind_addr = config.server_bind_address();
    let frontend_dir = config.frontend_dir.clone();

    if !frontend_dir.join("index.html").exists() {
        warn!("Frontend entry not found: {}", frontend_dir.join("index.html").display());
    }

    let state = web::Data::new(Arc::new(AppState::new(config)?));

    info!("Serving frontend from {}", frontend_dir.display());
    info!("HTTP server binding to {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure_api)
            // Registered last so API routes take precedence
            .service(Files::new("/", frontend_dir.clone()).index_file("index.html"))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    info!("HTTP server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HealthResponse;
    use actix_web::{http::StatusCode, test};
    use async_trait::async_trait;
    use biztone_common::BizToneError;
    use biztone_llm::{
        ChatCompletionRequest, ChatCompletionResponse, Choice, ChoiceMessage, CompletionProvider,
        ConversionOptions, ConversionResult, Converter,
    };
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Clone, Copy)]
    enum Reply {
        Text(&'static str),
        RateLimited,
        Unreachable,
        ApiFailure,
    }

    struct StubProvider {
        reply: Reply,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionProvider for StubProvider {
        async fn chat_completion(
            &self,
            request: &ChatCompletionRequest,
        ) -> biztone_common::Result<ChatCompletionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Text(text) => Ok(ChatCompletionResponse {
                    model: request.model.clone(),
                    choices: vec![Choice {
                        index: 0,
                        message: ChoiceMessage {
                            content: Some(text.to_string()),
                        },
                        finish_reason: Some("stop".to_string()),
                    }],
                    usage: None,
                }),
                Reply::RateLimited => Err(BizToneError::rate_limited("HTTP 429: Rate limit reached for model")),
                Reply::Unreachable => Err(BizToneError::connection("Connection failed: tcp connect error")),
                Reply::ApiFailure => Err(BizToneError::api("HTTP 401: Invalid API Key")),
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    fn stub(reply: Reply) -> Arc<StubProvider> {
        Arc::new(StubProvider {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn state_with(provider: Option<Arc<StubProvider>>) -> web::Data<Arc<AppState>> {
        let provider = provider.map(|p| p as Arc<dyn CompletionProvider>);
        let converter = Converter::new(provider, ConversionOptions::new("test-model"));
        web::Data::new(Arc::new(AppState::with_converter(AppConfig::default(), converter)))
    }

    fn frontend_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../frontend")
    }

    macro_rules! init_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state)
                    .configure(configure_api)
                    .service(Files::new("/", frontend_dir()).index_file("index.html")),
            )
            .await
        };
    }

    macro_rules! post_convert {
        ($app:expr, $body:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/convert")
                .set_json($body)
                .to_request();
            let resp = test::call_service($app, req).await;
            let status = resp.status();
            let body: serde_json::Value = test::read_body_json(resp).await;
            (status, body)
        }};
    }

    #[actix_web::test]
    async fn test_convert_success() {
        let provider = stub(Reply::Text("회의 일정 변경을 요청드립니다."));
        let app = init_app!(state_with(Some(provider.clone())));

        let req = test::TestRequest::post()
            .uri("/api/convert")
            .set_json(serde_json::json!({
                "keywords": "내일 회의 일정 변경 요청",
                "persona": "upward"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: ConversionResult = test::read_body_json(resp).await;
        assert_eq!(body.converted_message, "회의 일정 변경을 요청드립니다.");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_convert_strips_wrapping_quotes() {
        let app = init_app!(state_with(Some(stub(Reply::Text("\"확인 부탁드려요.\"")))));
        let (status, body) = post_convert!(&app, serde_json::json!({"keywords": "확인 요청", "persona": "lateral"}));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["converted_message"], "확인 부탁드려요.");
    }

    #[actix_web::test]
    async fn test_convert_validation_errors() {
        let provider = stub(Reply::Text("unused"));
        let app = init_app!(state_with(Some(provider.clone())));

        let cases = [
            (serde_json::json!({"persona": "upward"}), "변환할 내용을 입력해주세요."),
            (serde_json::json!({"keywords": "", "persona": "upward"}), "변환할 내용을 입력해주세요."),
            (
                serde_json::json!({"keywords": "a".repeat(501), "persona": "upward"}),
                "입력 내용은 500자를 초과할 수 없습니다.",
            ),
            (serde_json::json!({"keywords": "보고서 제출"}), "대상을 선택해주세요."),
            (serde_json::json!({"keywords": "보고서 제출", "persona": ""}), "대상을 선택해주세요."),
        ];

        for (payload, message) in cases {
            let (status, body) = post_convert!(&app, payload);
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], message);
        }

        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[actix_web::test]
    async fn test_convert_unknown_persona_is_accepted() {
        let provider = stub(Reply::Text("자료 공유 부탁드려요."));
        let app = init_app!(state_with(Some(provider.clone())));
        let (status, _) = post_convert!(&app, serde_json::json!({"keywords": "자료 공유", "persona": "unknown"}));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[actix_web::test]
    async fn test_convert_without_api_key() {
        let app = init_app!(state_with(None));
        let (status, body) = post_convert!(&app, serde_json::json!({"keywords": "보고서 제출", "persona": "upward"}));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "서비스 설정 오류가 발생했습니다. 관리자에게 문의하세요.");
    }

    #[actix_web::test]
    async fn test_convert_provider_failures() {
        let cases = [
            (Reply::RateLimited, StatusCode::TOO_MANY_REQUESTS, "요청이 너무 많습니다. 잠시 후 다시 시도해주세요."),
            (Reply::Unreachable, StatusCode::SERVICE_UNAVAILABLE, "AI 서버와 연결할 수 없습니다. 잠시 후 다시 시도해주세요."),
            (Reply::ApiFailure, StatusCode::INTERNAL_SERVER_ERROR, "변환 중 오류가 발생했습니다. 다시 시도해주세요."),
        ];

        for (reply, expected_status, message) in cases {
            let app = init_app!(state_with(Some(stub(reply))));
            let (status, body) = post_convert!(&app, serde_json::json!({"keywords": "보고서 제출", "persona": "external"}));
            assert_eq!(status, expected_status);
            assert_eq!(body["error"], message);
            // Provider detail never reaches the caller
            assert!(!body.to_string().contains("HTTP"));
        }
    }

    #[actix_web::test]
    async fn test_convert_malformed_body() {
        let app = init_app!(state_with(Some(stub(Reply::Text("unused")))));
        let req = test::TestRequest::post()
            .uri("/api/convert")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "잘못된 요청 형식입니다.");
    }

    #[actix_web::test]
    async fn test_convert_without_api_key_ignores_body_errors() {
        let app = init_app!(state_with(None));

        let requests = [
            test::TestRequest::post()
                .uri("/api/convert")
                .insert_header(("content-type", "application/json"))
                .set_payload("{not json"),
            test::TestRequest::post()
                .uri("/api/convert")
                .insert_header(("content-type", "text/plain"))
                .set_payload("hello"),
            test::TestRequest::post()
                .uri("/api/convert")
                .set_json(serde_json::json!({"keywords": 5, "persona": "upward"})),
        ];

        for req in requests {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body.error, "서비스 설정 오류가 발생했습니다. 관리자에게 문의하세요.");
        }
    }

    #[actix_web::test]
    async fn test_health() {
        let app = init_app!(state_with(None));
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "ok");
        assert!(!body.provider_configured);
        assert_eq!(body.provider, None);
        assert_eq!(body.model, "test-model");
    }

    #[actix_web::test]
    async fn test_health_reports_provider() {
        let app = init_app!(state_with(Some(stub(Reply::Text("unused")))));
        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert!(body.provider_configured);
        assert_eq!(body.provider.as_deref(), Some("stub"));
    }

    #[actix_web::test]
    async fn test_static_frontend() {
        let app = init_app!(state_with(None));

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("convert-btn"));

        let req = test::TestRequest::get().uri("/js/script.js").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
