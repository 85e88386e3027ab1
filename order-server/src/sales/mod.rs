//! Sales Aggregation
//!
//! 订单 → 行项目 → 菜单价格 → 合计
//!
//! - [`range`] - `YYYY-MM` 区间解析与时间窗口
//! - [`store`] - 数据源抽象 ([`SalesStore`]) 及其两种实现
//! - [`aggregator`] - 汇总计算

pub mod aggregator;
pub mod range;
pub mod store;

pub use aggregator::SalesAggregator;
pub use range::{MonthRange, TimeWindow, YearMonth};
pub use store::{DbSalesStore, MemorySalesStore, SalesStore};

use thiserror::Error;

use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};

/// Sales report errors
#[derive(Debug, Error)]
pub enum SalesError {
    /// Partial or malformed `startDate` / `endDate`
    #[error("Invalid date range: {0}")]
    InvalidRange(String),

    /// Store failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] RepoError),
}

impl From<SalesError> for AppError {
    fn from(err: SalesError) -> Self {
        match err {
            SalesError::InvalidRange(msg) => AppError::with_message(ErrorCode::InvalidDateRange, msg),
            SalesError::Store(e) => e.into(),
        }
    }
}
