//! 应用配置
//!
//! 通过 `config` crate 从环境变量加载，前缀 `LUNA`，层级分隔符 `__`，
//! 例如 `LUNA_GEMINI__API_KEY`、`LUNA_SERVER__PORT`。
//! 未设置 `LUNA_GEMINI__API_KEY` 时回退到 `GEMINI_API_KEY`。

use serde::Deserialize;

use crate::modules::chat::{GeminiConfig, GenerationConfig, DEFAULT_HISTORY_CAPACITY};

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP 服务配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Gemini 提供商配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 采样参数
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 对话历史配置
    #[serde(default)]
    pub conversation: ConversationConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 监听地址
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 对话历史配置
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// 历史最大轮数
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// 写入提示词的历史轮数
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,
}

fn default_max_history() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_context_turns() -> usize {
    3
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
            context_turns: default_context_turns(),
        }
    }
}

impl AppConfig {
    /// 从进程环境变量加载配置
    ///
    /// # Errors
    ///
    /// 配置值无法解析时返回错误
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(
            config::Environment::with_prefix("LUNA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
            std::env::var("GEMINI_API_KEY").ok(),
        )
    }

    fn load(
        environment: config::Environment,
        fallback_api_key: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .set_default("gemini.api_key", fallback_api_key.unwrap_or_default())?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// 是否配置了 Gemini API Key
    pub fn has_api_key(&self) -> bool {
        !self.gemini.api_key.trim().is_empty()
    }
}
