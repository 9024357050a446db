use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum_auto_routes::route;

use crate::models::action::ActionDescriptor;
use crate::state::AppState;

use super::negotiation::negotiate;

#[route(get, "/api/tip")]
pub async fn get_tip(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let descriptor = ActionDescriptor::tip_menu(&state.conf);
    negotiate(&state.conf, &headers, descriptor, None)
}
