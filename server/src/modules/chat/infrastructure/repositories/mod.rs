// Chat Infrastructure - Repositories
//
// 仓储实现：
// - InMemoryHistoryRepository: 进程内有界历史，不做持久化

mod in_memory_history_repository;

pub use in_memory_history_repository::*;
