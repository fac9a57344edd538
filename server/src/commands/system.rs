// System Commands
//
// 页面与健康检查

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use crate::infrastructure::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub provider: String,
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        provider: state.chat_module.provider_id().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::commands::router;
    use crate::infrastructure::AppState;
    use crate::modules::chat::MockLLMAdapter;
    use crate::modules::ChatModule;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        router(AppState::new(ChatModule::new(Arc::new(MockLLMAdapter::new()))))
    }

    #[tokio::test]
    async fn test_health_reports_provider() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["provider"], "mock");
    }

    #[tokio::test]
    async fn test_index_serves_html() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("/chat"));
        assert!(html.contains("/reset"));
    }
}
