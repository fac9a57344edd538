// Chat Commands - 命令定义和处理器

mod reset_conversation;
mod send_message;

pub use reset_conversation::*;
pub use send_message::*;
