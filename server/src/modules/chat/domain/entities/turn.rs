use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::value_objects::TurnId;

/// 对话轮次实体
///
/// 一条用户消息与一条助手回复成对保存，创建后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    user: String,
    assistant: String,
    created_at: DateTime<Utc>,
}

impl Turn {
    /// 创建新的对话轮次
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            user: user.into(),
            assistant: assistant.into(),
            created_at: Utc::now(),
        }
    }

    // Getters
    pub fn id(&self) -> TurnId {
        self.id
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn assistant(&self) -> &str {
        &self.assistant
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
