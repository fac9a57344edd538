// Chat Commands
//
// 聊天相关的 HTTP 处理器，业务逻辑全部交给 ChatModule

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::infrastructure::AppState;
use crate::modules::chat::{
    Emotion, GenerationFailure, GetHistoryQuery, ResetConversationCommand, SendMessageCommand,
    Turn, EMPTY_MESSAGE_ERROR,
};
use crate::shared::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub emotion: Emotion,
    pub user_emotion: Emotion,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<GenerationFailure>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub turns: Vec<Turn>,
    pub capacity: usize,
}

/// POST /chat
pub async fn chat_send_message(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(request) =
        payload.map_err(|rejection| AppError::ValidationError(rejection.body_text()))?;

    // 缺失、为空或仅含空白都按空消息处理
    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::ValidationError(EMPTY_MESSAGE_ERROR.to_string()))?;

    tracing::info!(chars = message.chars().count(), "[chat_send_message] Processing message");

    let result = state
        .chat_module
        .send_message(SendMessageCommand::new(message))
        .await?;

    Ok(Json(ChatResponse {
        response: result.reply,
        emotion: result.emotion,
        user_emotion: result.user_emotion,
        failure: result.failure,
    }))
}

/// POST /reset
pub async fn chat_reset(State(state): State<AppState>) -> AppResult<Json<StatusResponse>> {
    state
        .chat_module
        .reset_conversation(ResetConversationCommand)
        .await?;

    Ok(Json(StatusResponse { status: "ok" }))
}

/// GET /history
pub async fn chat_history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<Json<HistoryResponse>> {
    let result = state
        .chat_module
        .get_history(GetHistoryQuery::new(params.limit))
        .await?;

    Ok(Json(HistoryResponse {
        turns: result.turns,
        capacity: result.capacity,
    }))
}

#[cfg(test)]
mod tests {
    use crate::commands::router;
    use crate::infrastructure::AppState;
    use crate::modules::chat::{MockFailure, MockLLMAdapter};
    use crate::modules::ChatModule;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(llm: Arc<MockLLMAdapter>) -> Router {
        router(AppState::new(ChatModule::new(llm)))
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(
            app,
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_chat_returns_reply_and_emotions() {
        let app = app_with(Arc::new(MockLLMAdapter::replying("Que ótimo! 🎉")));

        let (status, body) =
            post_json(&app, "/chat", json!({"message": "Estou animado com a viagem"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Que ótimo! 🎉");
        assert_eq!(body["emotion"], "feliz");
        assert_eq!(body["user_emotion"], "feliz");
        assert!(body.get("failure").is_none());
    }

    #[tokio::test]
    async fn test_empty_message_is_bad_request() {
        let app = app_with(Arc::new(MockLLMAdapter::new()));

        let (status, body) = post_json(&app, "/chat", json!({"message": ""})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Mensagem vazia");

        let (status, body) = post_json(&app, "/chat", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Mensagem vazia");
    }

    #[tokio::test]
    async fn test_whitespace_message_never_reaches_model() {
        let llm = Arc::new(MockLLMAdapter::new());
        let app = app_with(llm.clone());

        let (status, body) = post_json(&app, "/chat", json!({"message": "  \n\t "})).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Mensagem vazia");
        assert!(llm.recorded_prompts().await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_body_is_bad_request() {
        let app = app_with(Arc::new(MockLLMAdapter::new()));

        let (status, body) = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/chat")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_upstream_failure_still_returns_ok() {
        let app = app_with(Arc::new(MockLLMAdapter::failing(MockFailure::Http(500))));

        let (status, body) =
            post_json(&app, "/chat", json!({"message": "Estou com medo do futuro"})).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["response"]
            .as_str()
            .unwrap()
            .starts_with("Desculpe, tive um problema técnico"));
        assert_eq!(body["emotion"], "neutro");
        assert_eq!(body["user_emotion"], "ansioso");
        assert_eq!(body["failure"]["kind"], "http_error");
    }

    #[tokio::test]
    async fn test_reset_drops_prior_context() {
        let llm = Arc::new(MockLLMAdapter::replying("ok"));
        let app = app_with(llm.clone());

        post_json(&app, "/chat", json!({"message": "primeira mensagem"})).await;

        let (status, body) = post_json(&app, "/reset", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));

        post_json(&app, "/chat", json!({"message": "depois do reset"})).await;

        let prompts = llm.recorded_prompts().await;
        assert_eq!(prompts.len(), 2);
        assert!(!prompts[1].contains("primeira mensagem"));
        assert!(!prompts[1].contains("Contexto da conversa"));
    }

    #[tokio::test]
    async fn test_history_lists_turns() {
        let app = app_with(Arc::new(MockLLMAdapter::replying("resposta")));

        post_json(&app, "/chat", json!({"message": "um"})).await;
        post_json(&app, "/chat", json!({"message": "dois"})).await;

        let (status, body) = send(
            &app,
            Request::builder()
                .uri("/history?limit=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["capacity"], 20);
        let turns = body["turns"].as_array().unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0]["user"], "dois");
        assert_eq!(turns[0]["assistant"], "resposta");
    }
}
