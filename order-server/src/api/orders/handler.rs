//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    LineItem, Order, OrderCreate, OrderStatus, OrderUpdate, SalesQuery, SalesReport,
};

use crate::api::Deleted;
use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_quantity, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn order_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
        .with_detail("id", id)
}

fn map_repo_error(id: &str, err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(_) => order_not_found(id),
        other => other.into(),
    }
}

fn validate_items(items: &[LineItem]) -> AppResult<()> {
    if items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for (index, line) in items.iter().enumerate() {
        validate_required_text(&line.item, &format!("items[{index}].item"), MAX_SHORT_TEXT_LEN)?;
        validate_quantity(line.quantity, &format!("items[{index}].quantity")).map_err(|e| {
            AppError {
                code: ErrorCode::InvalidQuantity,
                ..e
            }
        })?;
    }
    Ok(())
}

fn validate_create(payload: &OrderCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_items(&payload.items)
}

fn validate_update(payload: &OrderUpdate) -> AppResult<()> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(address) = &payload.address {
        validate_required_text(address, "address", MAX_ADDRESS_LEN)?;
    }
    if let Some(phone) = &payload.phone {
        validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(items) = &payload.items {
        validate_items(items)?;
    }
    Ok(())
}

/// GET /api/orders - 获取所有订单 (新的在前)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.orders().find_all().await?;
    Ok(Json(orders))
}

/// GET /api/orders/status/:status - 按状态过滤
pub async fn list_by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let status = status.parse::<OrderStatus>().map_err(|e| {
        AppError::with_message(ErrorCode::InvalidOrderStatus, format!("{e}"))
            .with_detail("status", status.clone())
    })?;
    let orders = state.orders().find_by_status(status).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state
        .orders()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| order_not_found(&id))?;
    Ok(Json(order))
}

/// POST /api/orders - 创建订单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    validate_create(&payload)?;

    let order = state
        .orders()
        .create(payload, state.now_millis())
        .await?;
    tracing::info!(
        id = %order.id,
        items = order.items.len(),
        status = %order.status,
        "Order created"
    );
    Ok(Json(order))
}

/// PUT /api/orders/:id - 更新订单 (部分字段)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    validate_update(&payload)?;

    let order = state
        .orders()
        .update(&id, payload, state.now_millis())
        .await
        .map_err(|e| map_repo_error(&id, e))?;
    tracing::info!(id = %order.id, status = %order.status, "Order updated");
    Ok(Json(order))
}

/// DELETE /api/orders/:id - 删除订单 (不影响菜单项)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Deleted>> {
    let id = state
        .orders()
        .delete(&id)
        .await
        .map_err(|e| map_repo_error(&id, e))?;
    tracing::info!(id = %id, "Order deleted");
    Ok(Json(Deleted { id }))
}

/// GET /api/orders/sales?startDate=YYYY-MM&endDate=YYYY-MM - 销售报表
pub async fn sales_report(
    State(state): State<ServerState>,
    Query(query): Query<SalesQuery>,
) -> AppResult<Json<SalesReport>> {
    compute_sales(&state, query).await
}

/// POST /api/orders/sales - 销售报表 (JSON body)
pub async fn sales_report_body(
    State(state): State<ServerState>,
    Json(query): Json<SalesQuery>,
) -> AppResult<Json<SalesReport>> {
    compute_sales(&state, query).await
}

async fn compute_sales(state: &ServerState, query: SalesQuery) -> AppResult<Json<SalesReport>> {
    let report = state.sales().compute_total_sales(&query).await?;
    tracing::info!(
        start = query.start_date.as_deref().unwrap_or("-"),
        end = query.end_date.as_deref().unwrap_or("-"),
        total = report.total,
        "Sales report"
    );
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(item: &str, quantity: i32) -> LineItem {
        LineItem {
            item: item.into(),
            quantity,
        }
    }

    fn payload(items: Vec<LineItem>) -> OrderCreate {
        OrderCreate {
            name: "Ada".into(),
            address: "1 Main St".into(),
            phone: "555-0100".into(),
            items,
            status: None,
        }
    }

    #[test]
    fn test_validate_create() {
        assert!(validate_create(&payload(vec![line("pizza", 2)])).is_ok());
        assert_eq!(
            validate_create(&payload(vec![])).unwrap_err().code,
            ErrorCode::OrderEmpty
        );
        assert_eq!(
            validate_create(&payload(vec![line("pizza", 0)])).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );
        assert_eq!(
            validate_create(&payload(vec![line("pizza", 10_000)])).unwrap_err().code,
            ErrorCode::InvalidQuantity
        );
        assert_eq!(
            validate_create(&payload(vec![line("", 1)])).unwrap_err().code,
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn test_validate_create_requires_contact_fields() {
        let mut p = payload(vec![line("pizza", 1)]);
        p.phone = "  ".into();
        let err = validate_create(&p).unwrap_err();
        assert_eq!(err.details.unwrap()["field"], "phone");
    }

    #[test]
    fn test_validate_update() {
        assert!(validate_update(&OrderUpdate::default()).is_ok());
        let bad = OrderUpdate {
            items: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(validate_update(&bad).unwrap_err().code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_not_found_maps_to_order_code() {
        let err = map_repo_error("x", RepoError::NotFound("orders x".into()));
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }
}
