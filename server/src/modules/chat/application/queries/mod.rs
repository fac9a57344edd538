// Chat Queries - 查询定义和处理器

mod get_history;

pub use get_history::*;
