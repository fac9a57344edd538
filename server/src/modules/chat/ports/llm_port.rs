use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// LLM 错误类型
///
/// 生成调用失败时的类型化结果，由调用方决定如何呈现给用户
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("HTTP error: {status} - {body}")]
    HttpError { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Response contained no candidate text")]
    EmptyResponse,

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),
}

impl LLMError {
    /// 机器可读的错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            LLMError::Timeout { .. } => "timeout",
            LLMError::HttpError { .. } => "http_error",
            LLMError::ParseError(_) => "parse_error",
            LLMError::NetworkError(_) => "network_error",
            LLMError::EmptyResponse => "empty_response",
            LLMError::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// 采样参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 300,
        }
    }
}

/// 生成请求
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// 完整提示词
    pub prompt: String,
    /// 采样参数
    pub config: GenerationConfig,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            config: GenerationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }
}

/// Token 使用统计
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// 生成响应
#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

/// LLM 服务端口 - 核心抽象接口
///
/// 每个请求只发出一次调用，不做重试
#[async_trait]
pub trait LLMPort: Send + Sync {
    /// 获取提供商 ID
    fn provider_id(&self) -> &str;

    /// 单次生成请求
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, LLMError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sampling_parameters() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 0.9);
        assert_eq!(config.top_k, 40);
        assert_eq!(config.top_p, 0.95);
        assert_eq!(config.max_output_tokens, 300);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(LLMError::Timeout { timeout_secs: 30 }.kind(), "timeout");
        assert_eq!(
            LLMError::HttpError {
                status: 500,
                body: String::new()
            }
            .kind(),
            "http_error"
        );
        assert_eq!(LLMError::ParseError("x".into()).kind(), "parse_error");
        assert_eq!(LLMError::EmptyResponse.kind(), "empty_response");
    }

    #[test]
    fn test_error_display_carries_detail() {
        let err = LLMError::HttpError {
            status: 403,
            body: "API key not valid".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 403 - API key not valid");
    }
}
