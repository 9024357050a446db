use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum_auto_routes::route;

use crate::models::action::ActionDescriptor;
use crate::state::AppState;

use super::negotiation::negotiate;

#[route(get, "/api/tip/:amount")]
pub async fn get_tip_amount(
    State(state): State<Arc<AppState>>,
    Path(amount): Path<String>,
    headers: HeaderMap,
) -> Response {
    let descriptor = ActionDescriptor::single_tip(&state.conf, &amount);
    negotiate(&state.conf, &headers, descriptor, Some(&amount))
}
