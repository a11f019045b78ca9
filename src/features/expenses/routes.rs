use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::expenses::handlers;
use crate::features::expenses::services::ExpenseService;

/// Create routes for the expenses feature
///
/// Note: these routes require a bearer token; the auth middleware is
/// attached when the protected router is assembled
pub fn routes(service: Arc<ExpenseService>) -> Router {
    Router::new()
        .route(
            "/api/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route(
            "/api/expenses/{id}",
            get(handlers::get_expense)
                .put(handlers::update_expense)
                .delete(handlers::delete_expense),
        )
        .with_state(service)
}
