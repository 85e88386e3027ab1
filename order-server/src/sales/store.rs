//! Sales data source
//!
//! 汇总只需要两件事：按时间窗口取订单，按 id 取菜单项。

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{MenuItem, Order};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::TimeWindow;
use crate::db::repository::{MenuItemRepository, OrderRepository, RepoResult};

/// Read-only view of orders and the menu catalog
#[async_trait]
pub trait SalesStore: Send + Sync {
    /// Orders with `created_at` inside the window, or all orders when `None`
    async fn find_orders(&self, window: Option<TimeWindow>) -> RepoResult<Vec<Order>>;

    /// Menu item by id; `None` when the reference is dangling
    async fn resolve_menu_item(&self, id: &str) -> RepoResult<Option<MenuItem>>;
}

/// SurrealDB-backed store
#[derive(Clone)]
pub struct DbSalesStore {
    orders: OrderRepository,
    menu_items: MenuItemRepository,
}

impl DbSalesStore {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            menu_items: MenuItemRepository::new(db),
        }
    }
}

#[async_trait]
impl SalesStore for DbSalesStore {
    async fn find_orders(&self, window: Option<TimeWindow>) -> RepoResult<Vec<Order>> {
        match window {
            Some(w) => self.orders.find_in_range(w.start_millis, w.end_millis).await,
            None => self.orders.find_all().await,
        }
    }

    async fn resolve_menu_item(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        self.menu_items.find_by_id(id).await
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemorySalesStore {
    orders: RwLock<Vec<Order>>,
    menu_items: RwLock<HashMap<String, MenuItem>>,
}

impl MemorySalesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_menu_item(&self, item: MenuItem) {
        self.menu_items.write().insert(item.id.clone(), item);
    }

    pub fn remove_menu_item(&self, id: &str) -> Option<MenuItem> {
        self.menu_items.write().remove(id)
    }

    pub fn insert_order(&self, order: Order) {
        self.orders.write().push(order);
    }
}

#[async_trait]
impl SalesStore for MemorySalesStore {
    async fn find_orders(&self, window: Option<TimeWindow>) -> RepoResult<Vec<Order>> {
        let orders = self.orders.read();
        Ok(match window {
            Some(w) => orders
                .iter()
                .filter(|o| w.contains(o.created_at))
                .cloned()
                .collect(),
            None => orders.clone(),
        })
    }

    async fn resolve_menu_item(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        Ok(self.menu_items.read().get(id).cloned())
    }
}
