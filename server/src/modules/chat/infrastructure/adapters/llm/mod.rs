// LLM Adapters
// 各种 LLM 提供商的适配器实现

mod gemini;
mod mock;

pub use gemini::*;
pub use mock::*;
