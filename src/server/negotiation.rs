use axum::{
    http::{
        header::{ACCEPT, USER_AGENT},
        HeaderMap,
    },
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::config::TipConfig;
use crate::models::action::ActionDescriptor;
use crate::utils::html::build_page;

fn header_str<'a>(headers: &'a HeaderMap, name: axum::http::header::HeaderName) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

/// Browsers ask for `text/html`; the Twitter card scraper only identifies
/// itself through its user agent.
pub fn wants_html(headers: &HeaderMap) -> bool {
    header_str(headers, ACCEPT).contains("text/html")
        || header_str(headers, USER_AGENT)
            .to_lowercase()
            .contains("twitterbot")
}

/// Preview page or JSON descriptor, depending on who is asking.
pub fn negotiate(
    conf: &TipConfig,
    headers: &HeaderMap,
    descriptor: ActionDescriptor,
    amount: Option<&str>,
) -> Response {
    if wants_html(headers) {
        Html(build_page(
            conf,
            &descriptor.title,
            &descriptor.description,
            &descriptor.icon,
            amount,
        ))
        .into_response()
    } else {
        Json(descriptor).into_response()
    }
}
