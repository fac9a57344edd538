// Chat Module - 聊天模块
//
// 实现六边形架构（Hexagonal Architecture）：
// - domain: 领域层，包含实体、值对象和领域服务
// - ports: 端口层，定义与外部世界的抽象接口
// - infrastructure: 基础设施层，实现端口的具体适配器
// - application: 应用层，实现 CQRS 命令和查询处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型
pub use application::{
    fallback_message, ApplicationError, CommandHandler, GenerationFailure, GetHistoryHandler,
    GetHistoryQuery, GetHistoryResponse, QueryHandler, ResetConversationCommand,
    ResetConversationHandler, ResetConversationResponse, SendMessageCommand, SendMessageHandler,
    SendMessageResponse, EMPTY_MESSAGE_ERROR,
};

pub use domain::{Emotion, EmotionAnalyzer, PromptBuilder, Turn, TurnId};

pub use infrastructure::{
    GeminiAdapter, GeminiConfig, InMemoryHistoryRepository, MockBehavior, MockFailure,
    MockLLMAdapter, DEFAULT_HISTORY_CAPACITY,
};

pub use ports::{
    GenerationConfig, GenerationRequest, GenerationResponse, HistoryRepository, LLMError,
    LLMPort, RepositoryError, TokenUsage,
};

use std::sync::Arc;

/// Chat 模块容器
///
/// 管理模块内的依赖注入。历史仓储由模块持有，处理器共享同一实例。
pub struct ChatModule {
    // Repositories
    history_repository: Arc<dyn HistoryRepository>,
    // LLM
    llm_port: Arc<dyn LLMPort>,
    // Handlers
    send_message_handler: SendMessageHandler,
    reset_conversation_handler: ResetConversationHandler,
    get_history_handler: GetHistoryHandler,
}

impl ChatModule {
    /// 创建新的 ChatModule 实例（默认容量的内存历史）
    pub fn new(llm_port: Arc<dyn LLMPort>) -> Self {
        Self::with_components(
            Arc::new(InMemoryHistoryRepository::new()),
            llm_port,
            PromptBuilder::new(),
            GenerationConfig::default(),
        )
    }

    /// 使用自定义组件创建 ChatModule
    pub fn with_components(
        history_repository: Arc<dyn HistoryRepository>,
        llm_port: Arc<dyn LLMPort>,
        prompt_builder: PromptBuilder,
        generation_config: GenerationConfig,
    ) -> Self {
        let send_message_handler =
            SendMessageHandler::new(history_repository.clone(), llm_port.clone())
                .with_prompt_builder(prompt_builder)
                .with_generation_config(generation_config);
        let reset_conversation_handler =
            ResetConversationHandler::new(history_repository.clone());
        let get_history_handler = GetHistoryHandler::new(history_repository.clone());

        Self {
            history_repository,
            llm_port,
            send_message_handler,
            reset_conversation_handler,
            get_history_handler,
        }
    }

    // Command handlers

    /// 发送消息
    pub async fn send_message(
        &self,
        command: SendMessageCommand,
    ) -> Result<SendMessageResponse, ApplicationError> {
        self.send_message_handler.handle(command).await
    }

    /// 重置对话
    pub async fn reset_conversation(
        &self,
        command: ResetConversationCommand,
    ) -> Result<ResetConversationResponse, ApplicationError> {
        self.reset_conversation_handler.handle(command).await
    }

    // Query handlers

    /// 获取历史
    pub async fn get_history(
        &self,
        query: GetHistoryQuery,
    ) -> Result<GetHistoryResponse, ApplicationError> {
        self.get_history_handler.handle(query).await
    }

    // Accessors

    /// 当前 LLM 提供商 ID
    pub fn provider_id(&self) -> &str {
        self.llm_port.provider_id()
    }

    /// 获取历史仓储
    pub fn history_repository(&self) -> &Arc<dyn HistoryRepository> {
        &self.history_repository
    }
}
