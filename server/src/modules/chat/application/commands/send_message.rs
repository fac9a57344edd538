use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Emotion, EmotionAnalyzer, PromptBuilder, Turn};
use crate::modules::chat::ports::{
    GenerationConfig, GenerationRequest, HistoryRepository, LLMError, LLMPort,
};

/// 空消息的提示
pub const EMPTY_MESSAGE_ERROR: &str = "Mensagem vazia";

/// 生成失败时的兜底回复
pub fn fallback_message(error: &LLMError) -> String {
    format!(
        "Desculpe, tive um problema técnico... 😔 Mas estou aqui para você! Erro: {}",
        error
    )
}

/// 发送消息命令
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// 用户消息内容
    pub content: String,
}

impl SendMessageCommand {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// 生成失败的结构化描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationFailure {
    pub kind: String,
    pub detail: String,
}

impl From<&LLMError> for GenerationFailure {
    fn from(error: &LLMError) -> Self {
        Self {
            kind: error.kind().to_string(),
            detail: error.to_string(),
        }
    }
}

/// 发送消息响应
#[derive(Debug, Clone)]
pub struct SendMessageResponse {
    /// 助手回复（失败时为兜底回复）
    pub reply: String,
    /// 回复所对应的情感；失败时为中性
    pub emotion: Emotion,
    /// 从用户消息检测到的情感
    pub user_emotion: Emotion,
    /// 生成失败信息
    pub failure: Option<GenerationFailure>,
    /// 写入历史的轮次（仅成功时）
    pub turn: Option<Turn>,
}

/// 发送消息命令处理器
pub struct SendMessageHandler {
    history_repository: Arc<dyn HistoryRepository>,
    llm_port: Arc<dyn LLMPort>,
    prompt_builder: PromptBuilder,
    emotion_analyzer: EmotionAnalyzer,
    generation_config: GenerationConfig,
}

impl SendMessageHandler {
    pub fn new(
        history_repository: Arc<dyn HistoryRepository>,
        llm_port: Arc<dyn LLMPort>,
    ) -> Self {
        Self {
            history_repository,
            llm_port,
            prompt_builder: PromptBuilder::new(),
            emotion_analyzer: EmotionAnalyzer::new(),
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn with_prompt_builder(mut self, prompt_builder: PromptBuilder) -> Self {
        self.prompt_builder = prompt_builder;
        self
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = config;
        self
    }

    /// 构建本次请求的提示词
    async fn build_prompt(
        &self,
        content: &str,
        emotion: Emotion,
    ) -> Result<String, ApplicationError> {
        let recent = self
            .history_repository
            .recent(self.prompt_builder.context_turns())
            .await?;

        Ok(self.prompt_builder.build(content, emotion, &recent))
    }
}

#[async_trait]
impl CommandHandler<SendMessageCommand, SendMessageResponse> for SendMessageHandler {
    async fn handle(
        &self,
        command: SendMessageCommand,
    ) -> Result<SendMessageResponse, ApplicationError> {
        // 仅含空白的消息同样视为空，不会转发给模型
        if command.content.trim().is_empty() {
            return Err(ApplicationError::ValidationError(
                EMPTY_MESSAGE_ERROR.to_string(),
            ));
        }

        let user_emotion = self.emotion_analyzer.analyze(&command.content);
        let prompt = self.build_prompt(&command.content, user_emotion).await?;

        let request = GenerationRequest::new(prompt).with_config(self.generation_config);

        match self.llm_port.generate(request).await {
            Ok(response) => {
                let turn = Turn::new(command.content, response.text.clone());
                self.history_repository.append(turn.clone()).await?;

                tracing::info!(
                    provider = self.llm_port.provider_id(),
                    emotion = %user_emotion,
                    tokens = ?response.usage.map(|u| u.total_tokens),
                    "Generated reply"
                );

                Ok(SendMessageResponse {
                    reply: response.text,
                    emotion: user_emotion,
                    user_emotion,
                    failure: None,
                    turn: Some(turn),
                })
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.llm_port.provider_id(),
                    kind = e.kind(),
                    error = %e,
                    "Generation failed, replying with fallback"
                );

                Ok(SendMessageResponse {
                    reply: fallback_message(&e),
                    emotion: Emotion::Neutral,
                    user_emotion,
                    failure: Some(GenerationFailure::from(&e)),
                    turn: None,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::infrastructure::{
        InMemoryHistoryRepository, MockFailure, MockLLMAdapter,
    };

    fn handler_with(
        llm: Arc<MockLLMAdapter>,
    ) -> (SendMessageHandler, Arc<InMemoryHistoryRepository>) {
        let history = Arc::new(InMemoryHistoryRepository::new());
        let handler = SendMessageHandler::new(history.clone(), llm);
        (handler, history)
    }

    #[tokio::test]
    async fn test_send_message() {
        let llm = Arc::new(MockLLMAdapter::replying("Que bom ouvir isso! 😊"));
        let (handler, history) = handler_with(llm.clone());

        let response = handler
            .handle(SendMessageCommand::new("Estou muito feliz hoje"))
            .await
            .unwrap();

        assert_eq!(response.reply, "Que bom ouvir isso! 😊");
        assert_eq!(response.emotion, Emotion::Happy);
        assert_eq!(response.user_emotion, Emotion::Happy);
        assert!(response.failure.is_none());

        let turns = history.list().await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].user(), "Estou muito feliz hoje");
        assert_eq!(turns[0].assistant(), "Que bom ouvir isso! 😊");

        let prompts = llm.recorded_prompts().await;
        assert!(prompts[0].contains("A pessoa está feliz!"));
        assert!(prompts[0].ends_with("Mensagem atual do usuário: Estou muito feliz hoje"));
    }

    #[tokio::test]
    async fn test_send_empty_message() {
        let llm = Arc::new(MockLLMAdapter::new());
        let (handler, _) = handler_with(llm.clone());

        let result = handler.handle(SendMessageCommand::new("   ")).await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert!(llm.recorded_prompts().await.is_empty());
    }

    #[tokio::test]
    async fn test_failure_returns_fallback_and_keeps_user_emotion() {
        let llm = Arc::new(MockLLMAdapter::failing(MockFailure::Timeout));
        let (handler, history) = handler_with(llm);

        let response = handler
            .handle(SendMessageCommand::new("Estou triste e sozinho"))
            .await
            .unwrap();

        assert!(response.reply.starts_with("Desculpe, tive um problema técnico"));
        assert!(response.reply.contains("timed out"));
        assert_eq!(response.emotion, Emotion::Neutral);
        assert_eq!(response.user_emotion, Emotion::Sad);
        assert_eq!(response.failure.unwrap().kind, "timeout");
        assert_eq!(history.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_previous_turns_reach_the_prompt() {
        let llm = Arc::new(MockLLMAdapter::replying("resposta"));
        let (handler, _) = handler_with(llm.clone());

        handler
            .handle(SendMessageCommand::new("primeira"))
            .await
            .unwrap();
        handler
            .handle(SendMessageCommand::new("segunda"))
            .await
            .unwrap();

        let prompts = llm.recorded_prompts().await;
        assert!(!prompts[0].contains("Contexto da conversa"));
        assert!(prompts[1].contains("Usuário: primeira\nLuna: resposta\n"));
    }

    #[tokio::test]
    async fn test_custom_generation_config_is_forwarded() {
        let llm = Arc::new(MockLLMAdapter::replying("ok"));
        let history = Arc::new(InMemoryHistoryRepository::new());
        let config = GenerationConfig {
            temperature: 0.2,
            max_output_tokens: 64,
            ..GenerationConfig::default()
        };

        let handler = SendMessageHandler::new(history, llm.clone())
            .with_prompt_builder(PromptBuilder::with_context_turns(1))
            .with_generation_config(config);

        handler.handle(SendMessageCommand::new("um")).await.unwrap();
        handler.handle(SendMessageCommand::new("dois")).await.unwrap();
        handler.handle(SendMessageCommand::new("três")).await.unwrap();

        assert_eq!(llm.recorded_configs().await, vec![config; 3]);

        // 只带最近一轮上下文
        let prompts = llm.recorded_prompts().await;
        assert!(prompts[2].contains("Usuário: dois\n"));
        assert!(!prompts[2].contains("Usuário: um\n"));
    }

    #[test]
    fn test_fallback_message_embeds_detail() {
        let err = LLMError::HttpError {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(
            fallback_message(&err),
            "Desculpe, tive um problema técnico... 😔 Mas estou aqui para você! Erro: HTTP error: 500 - boom"
        );
    }
}
