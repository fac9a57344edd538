// Chat Ports Layer
// 端口定义了模块与外部世界的接口

mod history_repository;
mod llm_port;

pub use history_repository::*;
pub use llm_port::*;
