use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::Turn;

/// 仓储错误类型
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// 对话历史仓储端口
///
/// 有界的历史存储：超过容量时从最旧的一轮开始淘汰
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// 追加一轮对话，必要时淘汰最旧的记录
    async fn append(&self, turn: Turn) -> Result<(), RepositoryError>;

    /// 获取最近的 `limit` 轮，按时间顺序
    async fn recent(&self, limit: usize) -> Result<Vec<Turn>, RepositoryError>;

    /// 获取全部历史，按时间顺序
    async fn list(&self) -> Result<Vec<Turn>, RepositoryError>;

    /// 清空历史，返回被删除的轮数
    async fn clear(&self) -> Result<usize, RepositoryError>;

    /// 当前轮数
    async fn count(&self) -> Result<usize, RepositoryError>;

    /// 最大容量
    fn capacity(&self) -> usize;
}
