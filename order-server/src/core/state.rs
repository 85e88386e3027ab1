use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::db::repository::{MenuItemRepository, OrderRepository};
use crate::sales::{DbSalesStore, SalesAggregator};
use crate::utils::time::{Clock, SystemClock};
use crate::utils::{AppError, AppResult};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (SurrealDB 句柄 / Arc)，axum 每个请求克隆一份。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | clock | Arc<dyn Clock> | 时间源 (订单时间戳) |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 时间源
    pub clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`ServerState::initialize`]；测试中用来注入固定时钟
    pub fn new(config: Config, db: Surreal<Db>, clock: Arc<dyn Clock>) -> Self {
        Self { config, db, clock }
    }

    /// 初始化服务器状态
    ///
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database)
    /// 3. 系统时钟
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::config(format!(
                "Failed to create work directory {}: {}",
                config.work_dir, e
            ))
        })?;

        let db_service = DbService::new(&config.database_dir()).await?;

        Ok(Self::new(config.clone(), db_service.db, Arc::new(SystemClock)))
    }

    /// 菜单仓库
    pub fn menu_items(&self) -> MenuItemRepository {
        MenuItemRepository::new(self.db.clone())
    }

    /// 订单仓库
    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.db.clone())
    }

    /// 销售汇总 (数据库存储 + 业务时区)
    pub fn sales(&self) -> SalesAggregator<DbSalesStore> {
        SalesAggregator::new(DbSalesStore::new(self.db.clone()), self.config.timezone)
    }

    /// 当前时间 (Unix millis)
    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }
}
