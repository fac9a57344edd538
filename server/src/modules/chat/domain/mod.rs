// Chat Domain Layer
// 领域层包含业务实体、值对象和领域服务

pub mod entities;
pub mod services;
pub mod value_objects;

// 重导出常用类型
pub use entities::Turn;
pub use services::{EmotionAnalyzer, PromptBuilder};
pub use value_objects::{Emotion, TurnId};
