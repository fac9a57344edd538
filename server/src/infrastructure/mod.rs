// Infrastructure Layer - 应用级基础设施
//
// - config: 环境变量配置
// - state: 请求间共享的应用状态

pub mod config;
pub mod state;

pub use self::config::{AppConfig, ConversationConfig, ServerConfig};
pub use self::state::AppState;
