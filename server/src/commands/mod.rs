// HTTP Commands
//
// 对外暴露的 HTTP 接口

pub mod chat;
pub mod system;

pub use chat::*;
pub use system::*;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::infrastructure::AppState;

/// 构建应用路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/chat", post(chat_send_message))
        .route("/reset", post(chat_reset))
        .route("/history", get(chat_history))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
