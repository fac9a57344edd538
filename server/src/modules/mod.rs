// Modules Layer - 业务模块
//
// 按照六边形架构组织的业务模块：
// - chat: 聊天模块，处理情感识别、提示词构建和对话历史

pub mod chat;

pub use chat::ChatModule;
