// Chat Domain - Services
// 领域服务处理不属于任何实体的业务逻辑

mod emotion_analyzer;
mod prompt_builder;

pub use emotion_analyzer::*;
pub use prompt_builder::*;
