//! Order Repository
//!
//! 时间参数一律是 Unix millis；日期→时间戳转换由调用方完成。

use serde::Serialize;
use serde_json::{Map, Value};
use shared::models::{LineItem, Order, OrderCreate, OrderStatus, OrderUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_id, pure_id};

const TABLE: &str = "orders";

const PROJECTION: &str =
    "record::id(id) AS id, name, address, phone, items, status, created_at, updated_at";

/// Stored document (id lives in the record key)
#[derive(Debug, Serialize)]
struct OrderRecord {
    name: String,
    address: String,
    phone: String,
    items: Vec<LineItem>,
    status: OrderStatus,
    created_at: i64,
    updated_at: i64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM {TABLE} ORDER BY created_at DESC"
            ))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let pure_id = pure_id(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {PROJECTION} FROM type::thing($table, $id)"))
            .bind(("table", TABLE))
            .bind(("id", pure_id))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Orders in one status, newest first
    pub async fn find_by_status(&self, status: OrderStatus) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM {TABLE} WHERE status = $status ORDER BY created_at DESC"
            ))
            .bind(("status", status.as_str()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders with `start <= created_at <= end` (both inclusive)
    pub async fn find_in_range(&self, start: i64, end: i64) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM {TABLE} \
                 WHERE created_at >= $start AND created_at <= $end \
                 ORDER BY created_at"
            ))
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Create a new order stamped with `now`
    pub async fn create(&self, data: OrderCreate, now: i64) -> RepoResult<Order> {
        if data.items.is_empty() {
            return Err(RepoError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }

        let id = new_id();
        let record = OrderRecord {
            name: data.name,
            address: data.address,
            phone: data.phone,
            items: data.items,
            status: data.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.base
            .db()
            .query("CREATE type::thing($table, $id) CONTENT $data RETURN NONE")
            .bind(("table", TABLE))
            .bind(("id", id.clone()))
            .bind(("data", record))
            .await?
            .check()?;

        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Partial update; `updated_at` is always set to `now`
    pub async fn update(&self, id: &str, data: OrderUpdate, now: i64) -> RepoResult<Order> {
        let pure_id = pure_id(TABLE, id);
        if !self.base.exists(TABLE, pure_id).await? {
            return Err(RepoError::NotFound(format!("Order {pure_id}")));
        }

        let mut patch = Map::new();
        if let Some(name) = data.name {
            patch.insert("name".into(), Value::from(name));
        }
        if let Some(address) = data.address {
            patch.insert("address".into(), Value::from(address));
        }
        if let Some(phone) = data.phone {
            patch.insert("phone".into(), Value::from(phone));
        }
        if let Some(items) = data.items {
            if items.is_empty() {
                return Err(RepoError::Validation(
                    "Order must contain at least one item".to_string(),
                ));
            }
            let items = serde_json::to_value(items)
                .map_err(|e| RepoError::Database(format!("Failed to encode items: {e}")))?;
            patch.insert("items".into(), items);
        }
        if let Some(status) = data.status {
            patch.insert("status".into(), Value::from(status.as_str()));
        }
        patch.insert("updated_at".into(), Value::from(now));

        self.base
            .db()
            .query("UPDATE type::thing($table, $id) MERGE $data RETURN NONE")
            .bind(("table", TABLE))
            .bind(("id", pure_id.to_string()))
            .bind(("data", Value::Object(patch)))
            .await?
            .check()?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {pure_id}")))
    }

    /// Hard delete an order; referenced menu items are left untouched
    pub async fn delete(&self, id: &str) -> RepoResult<String> {
        let pure_id = pure_id(TABLE, id);
        self.base.delete(TABLE, pure_id).await.map_err(|e| match e {
            RepoError::NotFound(_) => RepoError::NotFound(format!("Order {pure_id}")),
            other => other,
        })
    }
}
