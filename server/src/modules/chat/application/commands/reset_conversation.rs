use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::ports::HistoryRepository;

/// 重置对话命令
#[derive(Debug, Clone, Default)]
pub struct ResetConversationCommand;

/// 重置对话命令响应
#[derive(Debug, Clone)]
pub struct ResetConversationResponse {
    /// 被清除的轮数
    pub cleared_turns: usize,
}

/// 重置对话命令处理器
pub struct ResetConversationHandler {
    history_repository: Arc<dyn HistoryRepository>,
}

impl ResetConversationHandler {
    pub fn new(history_repository: Arc<dyn HistoryRepository>) -> Self {
        Self { history_repository }
    }
}

#[async_trait]
impl CommandHandler<ResetConversationCommand, ResetConversationResponse>
    for ResetConversationHandler
{
    async fn handle(
        &self,
        _command: ResetConversationCommand,
    ) -> Result<ResetConversationResponse, ApplicationError> {
        let cleared_turns = self.history_repository.clear().await?;
        tracing::info!(cleared_turns, "Conversation history cleared");

        Ok(ResetConversationResponse { cleared_turns })
    }
}
