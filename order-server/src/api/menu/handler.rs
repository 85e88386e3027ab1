//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuSearchQuery};

use crate::api::Deleted;
use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn menu_item_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
        .with_detail("id", id)
}

fn map_repo_error(id: &str, err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => menu_item_not_found(id),
        other => other.into(),
    }
}

fn check_price(price: f64) -> AppResult<()> {
    validate_price(price, "price").map_err(|e| AppError {
        code: ErrorCode::InvalidPrice,
        ..e
    })
}

fn validate_create(payload: &MenuItemCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    check_price(payload.price)
}

fn validate_update(payload: &MenuItemUpdate) -> AppResult<()> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    if let Some(price) = payload.price {
        check_price(price)?;
    }
    Ok(())
}

/// GET /api/menu - 获取所有菜单项
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.menu_items().find_all().await?;
    Ok(Json(items))
}

/// GET /api/menu/search?q=&category= - 搜索菜单项
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<MenuSearchQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = state.menu_items().search(&query).await?;
    Ok(Json(items))
}

/// GET /api/menu/:id - 获取单个菜单项
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let item = state
        .menu_items()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| menu_item_not_found(&id))?;
    Ok(Json(item))
}

/// POST /api/menu - 创建菜单项
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_create(&payload)?;

    let item = state.menu_items().create(payload).await?;
    tracing::info!(id = %item.id, name = %item.name, "Menu item created");
    Ok(Json(item))
}

/// PUT /api/menu/:id - 更新菜单项
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    validate_update(&payload)?;

    let item = state
        .menu_items()
        .update(&id, payload)
        .await
        .map_err(|e| map_repo_error(&id, e))?;
    tracing::info!(id = %item.id, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/menu/:id - 删除菜单项 (引用它的订单不受影响)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Deleted>> {
    let id = state
        .menu_items()
        .delete(&id)
        .await
        .map_err(|e| map_repo_error(&id, e))?;
    tracing::info!(id = %id, "Menu item deleted");
    Ok(Json(Deleted { id }))
}
