//! Order Server - restaurant ordering backend
//!
//! # 架构概述
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 文档存储 (菜单、订单)
//! - **销售汇总** (`sales`): 订单行 × 当前菜单价格 → 营业额报表
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! order-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── db/            # 数据库层 (repositories)
//! ├── sales/         # 销售汇总
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、时间、校验
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod sales;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use sales::{MemorySalesStore, SalesAggregator, SalesError, SalesStore};
pub use utils::time::{Clock, FixedClock, SystemClock};
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置环境: 加载 `.env`，读取配置，初始化日志
pub fn setup_environment() -> Config {
    // .env 是可选的
    dotenv::dotenv().ok();

    let config = Config::from_env();
    if let Some(dir) = &config.log_dir {
        // 日志目录不存在时只输出到 stdout
        let _ = std::fs::create_dir_all(dir);
    }
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    config
}
