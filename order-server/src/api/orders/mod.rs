//! Order API Module
//!
//! 订单 CRUD、按状态过滤、销售报表

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Orders by status
        .route("/status/{status}", get(handler::list_by_status))
        // Sales report: query string or JSON body
        .route("/sales", get(handler::sales_report).post(handler::sales_report_body))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
