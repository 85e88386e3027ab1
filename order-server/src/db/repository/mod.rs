//! Repository Module
//!
//! CRUD operations over the SurrealDB tables.

pub mod menu_item;
pub mod order;

pub use menu_item::MenuItemRepository;
pub use order::OrderRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Database(msg) => AppError::database(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: API 层只见纯 key
// =============================================================================
//
// 记录以 type::thing(TABLE, $id) 寻址，查询投影 record::id(id) AS id，
// 所以模型里的 `id` 永远是不带表前缀的字符串 (uuid v4)。
// 客户端传入 "menu_item:abc" 也接受，前缀会被去掉。

/// Strip an optional `table:` prefix from an incoming id
pub fn pure_id<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// New record key
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Whether a record exists
    pub async fn exists(&self, table: &'static str, id: &str) -> RepoResult<bool> {
        let mut result = self
            .db
            .query("SELECT VALUE record::id(id) FROM type::thing($table, $id)")
            .bind(("table", table))
            .bind(("id", id.to_string()))
            .await?;
        let ids: Vec<String> = result.take(0)?;
        Ok(!ids.is_empty())
    }

    /// Hard delete; NotFound when the record is missing
    pub async fn delete(&self, table: &'static str, id: &str) -> RepoResult<String> {
        if !self.exists(table, id).await? {
            return Err(RepoError::NotFound(format!("{table} {id}")));
        }
        self.db
            .query("DELETE type::thing($table, $id)")
            .bind(("table", table))
            .bind(("id", id.to_string()))
            .await?
            .check()?;
        Ok(id.to_string())
    }
}
