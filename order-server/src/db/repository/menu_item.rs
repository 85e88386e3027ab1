//! Menu Item Repository

use serde::Serialize;
use serde_json::{Map, Value};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuSearchQuery};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_id, pure_id};

const TABLE: &str = "menu_item";

const PROJECTION: &str =
    "record::id(id) AS id, name, description, category, price, is_available";

/// Stored document (id lives in the record key)
#[derive(Debug, Serialize)]
struct MenuItemRecord {
    name: String,
    description: Option<String>,
    category: Option<String>,
    price: f64,
    is_available: bool,
}

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all menu items ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query(format!("SELECT {PROJECTION} FROM {TABLE} ORDER BY name"))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Search by name substring (case-insensitive) and/or exact category
    pub async fn search(&self, query: &MenuSearchQuery) -> RepoResult<Vec<MenuItem>> {
        let q = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let category = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let mut conditions = Vec::new();
        if q.is_some() {
            conditions.push("string::contains(string::lowercase(name), $q)");
        }
        if category.is_some() {
            conditions.push("category = $category");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let mut db_query = self.base.db().query(format!(
            "SELECT {PROJECTION} FROM {TABLE}{where_clause} ORDER BY name"
        ));
        if let Some(q) = q {
            db_query = db_query.bind(("q", q));
        }
        if let Some(category) = category {
            db_query = db_query.bind(("category", category));
        }

        let items: Vec<MenuItem> = db_query.await?.take(0)?;
        Ok(items)
    }

    /// Find menu item by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let pure_id = pure_id(TABLE, id).to_string();
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PROJECTION} FROM type::thing($table, $id)"
            ))
            .bind(("table", TABLE))
            .bind(("id", pure_id))
            .await?;
        let items: Vec<MenuItem> = result.take(0)?;
        Ok(items.into_iter().next())
    }

    /// Create a new menu item
    pub async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        let id = new_id();
        let record = MenuItemRecord {
            name: data.name,
            description: data.description,
            category: data.category,
            price: data.price,
            is_available: data.is_available.unwrap_or(true),
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
            .ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    /// Partial update; only present fields are merged
    pub async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let pure_id = pure_id(TABLE, id);
        if !self.base.exists(TABLE, pure_id).await? {
            return Err(RepoError::NotFound(format!("Menu item {pure_id}")));
        }

        let mut patch = Map::new();
        if let Some(name) = data.name {
            patch.insert("name".into(), Value::from(name));
        }
        if let Some(description) = data.description {
            patch.insert("description".into(), Value::from(description));
        }
        if let Some(category) = data.category {
            patch.insert("category".into(), Value::from(category));
        }
        if let Some(price) = data.price {
            patch.insert("price".into(), Value::from(price));
        }
        if let Some(is_available) = data.is_available {
            patch.insert("is_available".into(), Value::from(is_available));
        }

        if !patch.is_empty() {
            self.base
                .db()
                .query("UPDATE type::thing($table, $id) MERGE $data RETURN NONE")
                .bind(("table", TABLE))
                .bind(("id", pure_id.to_string()))
                .bind(("data", Value::Object(patch)))
                .await?
                .check()?;
        }

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {pure_id}")))
    }

    /// Hard delete a menu item; orders referencing it are left untouched
    pub async fn delete(&self, id: &str) -> RepoResult<String> {
        let pure_id = pure_id(TABLE, id);
        self.base.delete(TABLE, pure_id).await.map_err(|e| match e {
            RepoError::NotFound(_) => RepoError::NotFound(format!("Menu item {pure_id}")),
            other => other,
        })
    }
}
