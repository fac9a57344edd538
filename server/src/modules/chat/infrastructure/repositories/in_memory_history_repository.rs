use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::RwLock;

use crate::modules::chat::domain::Turn;
use crate::modules::chat::ports::{HistoryRepository, RepositoryError};

/// 默认历史容量
pub const DEFAULT_HISTORY_CAPACITY: usize = 20;

/// 内存历史仓储
///
/// 进程内有界 FIFO。追加与淘汰在同一个写锁内完成，
/// 因此并发请求不会丢失记录，也不会超过容量。重启后清空。
pub struct InMemoryHistoryRepository {
    turns: RwLock<VecDeque<Turn>>,
    capacity: usize,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// 创建指定容量的仓储（最小为 1）
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            turns: RwLock::new(VecDeque::with_capacity(capacity + 1)),
            capacity,
        }
    }
}

impl Default for InMemoryHistoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, turn: Turn) -> Result<(), RepositoryError> {
        let mut turns = self.turns.write().await;
        turns.push_back(turn);

        while turns.len() > self.capacity {
            if let Some(evicted) = turns.pop_front() {
                tracing::debug!(turn_id = %evicted.id(), "Evicted oldest turn from history");
            }
        }

        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<Turn>, RepositoryError> {
        let turns = self.turns.read().await;
        let skip = turns.len().saturating_sub(limit);

        Ok(turns.iter().skip(skip).cloned().collect())
    }

    async fn list(&self) -> Result<Vec<Turn>, RepositoryError> {
        let turns = self.turns.read().await;
        Ok(turns.iter().cloned().collect())
    }

    async fn clear(&self) -> Result<usize, RepositoryError> {
        let mut turns = self.turns.write().await;
        let removed = turns.len();
        turns.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        Ok(self.turns.read().await.len())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
