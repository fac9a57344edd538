use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::modules::chat::ports::{
    GenerationConfig, GenerationRequest, GenerationResponse, LLMError, LLMPort, TokenUsage,
};

/// 模拟失败的类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Timeout,
    Http(u16),
    Parse,
    Network,
}

impl MockFailure {
    fn to_error(self) -> LLMError {
        match self {
            MockFailure::Timeout => LLMError::Timeout { timeout_secs: 30 },
            MockFailure::Http(status) => LLMError::HttpError {
                status,
                body: "simulated upstream failure".to_string(),
            },
            MockFailure::Parse => LLMError::ParseError("simulated malformed body".to_string()),
            MockFailure::Network => LLMError::NetworkError("simulated connection reset".to_string()),
        }
    }
}

/// 模拟行为
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// 回显最新消息的模拟回复
    Simulate,
    /// 固定回复
    Reply(String),
    /// 固定失败
    Fail(MockFailure),
}

/// Mock LLM 适配器
///
/// 未配置 API Key 时用作离线提供商，也用于测试。会记录收到的每个请求。
pub struct MockLLMAdapter {
    behavior: MockBehavior,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockLLMAdapter {
    pub fn new() -> Self {
        Self::with_behavior(MockBehavior::Simulate)
    }

    pub fn with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_behavior(MockBehavior::Reply(text.into()))
    }

    pub fn failing(failure: MockFailure) -> Self {
        Self::with_behavior(MockBehavior::Fail(failure))
    }

    /// 已收到的提示词，按调用顺序
    pub async fn recorded_prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }

    /// 已收到的采样参数，按调用顺序
    pub async fn recorded_configs(&self) -> Vec<GenerationConfig> {
        self.requests.lock().await.iter().map(|r| r.config).collect()
    }
}

impl Default for MockLLMAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LLMPort for MockLLMAdapter {
    fn provider_id(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LLMError> {
        self.requests.lock().await.push(request.clone());

        let text = match &self.behavior {
            MockBehavior::Simulate => {
                let latest = request
                    .prompt
                    .rsplit("Mensagem atual do usuário: ")
                    .next()
                    .unwrap_or("");
                format!(
                    "Recebi sua mensagem: «{}» 💜\n\nEsta é uma resposta simulada. Configure uma chave da API Gemini para conversar de verdade.",
                    latest
                )
            }
            MockBehavior::Reply(text) => text.clone(),
            MockBehavior::Fail(failure) => return Err(failure.to_error()),
        };

        Ok(GenerationResponse {
            text,
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 50,
                total_tokens: 60,
            }),
        })
    }
}
