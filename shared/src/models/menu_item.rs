//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu item entity (catalog entry referenced by order line items)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Current unit price, read at report time
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: f64,
    pub is_available: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub is_available: Option<bool>,
}

/// Menu search query (`GET /api/menu/search?q=..&category=..`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuSearchQuery {
    /// Case-insensitive substring of the item name
    pub q: Option<String>,
    /// Exact category match
    pub category: Option<String>,
}
