use std::sync::Arc;

use super::config::AppConfig;
use crate::modules::chat::{
    GeminiAdapter, InMemoryHistoryRepository, LLMPort, MockLLMAdapter, PromptBuilder,
};
use crate::modules::ChatModule;
use crate::shared::AppResult;

/// 应用全局状态
///
/// 在请求之间共享；对话历史由 ChatModule 持有
#[derive(Clone)]
pub struct AppState {
    pub chat_module: Arc<ChatModule>,
}

impl AppState {
    pub fn new(chat_module: ChatModule) -> Self {
        Self {
            chat_module: Arc::new(chat_module),
        }
    }

    /// 根据配置组装 ChatModule
    ///
    /// 未配置 API Key 时使用模拟提供商
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let llm_port: Arc<dyn LLMPort> = if config.has_api_key() {
            tracing::info!(model = %config.gemini.model, "Using Gemini provider");
            Arc::new(GeminiAdapter::new(config.gemini.clone())?)
        } else {
            tracing::warn!("No Gemini API key configured, falling back to simulated replies");
            Arc::new(MockLLMAdapter::new())
        };

        let history_repository = Arc::new(InMemoryHistoryRepository::with_capacity(
            config.conversation.max_history,
        ));

        let chat_module = ChatModule::with_components(
            history_repository,
            llm_port,
            PromptBuilder::with_context_turns(config.conversation.context_turns),
            config.generation,
        );

        Ok(Self::new(chat_module))
    }
}
