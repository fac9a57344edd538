use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::Turn;
use crate::modules::chat::ports::HistoryRepository;

/// 获取历史查询
#[derive(Debug, Clone, Default)]
pub struct GetHistoryQuery {
    /// 只取最近的若干轮；为空时返回全部
    pub limit: Option<usize>,
}

impl GetHistoryQuery {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }
}

/// 获取历史响应
#[derive(Debug, Clone)]
pub struct GetHistoryResponse {
    pub turns: Vec<Turn>,
    pub capacity: usize,
}

/// 获取历史查询处理器
pub struct GetHistoryHandler {
    history_repository: Arc<dyn HistoryRepository>,
}

impl GetHistoryHandler {
    pub fn new(history_repository: Arc<dyn HistoryRepository>) -> Self {
        Self { history_repository }
    }
}

#[async_trait]
impl QueryHandler<GetHistoryQuery, GetHistoryResponse> for GetHistoryHandler {
    async fn handle(&self, query: GetHistoryQuery) -> Result<GetHistoryResponse, ApplicationError> {
        let turns = match query.limit {
            Some(limit) => self.history_repository.recent(limit).await?,
            None => self.history_repository.list().await?,
        };

        Ok(GetHistoryResponse {
            turns,
            capacity: self.history_repository.capacity(),
        })
    }
}
