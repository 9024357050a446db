use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_auto_routes::route;

use crate::models::transfer::{TipQuery, TransactionResponse};
use crate::state::AppState;
use crate::utils::starknet_tx::prepare_transfer_with_timeout;
use crate::utils::TipError;

use super::responses::ApiResponse;

#[route(post, "/api/tip")]
pub async fn post_tip(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TipQuery>,
) -> Response {
    let amount = query.amount.unwrap_or_default();
    match prepare_transfer_with_timeout(&state, amount.clone()).await {
        Ok(transaction) => (StatusCode::OK, Json(TransactionResponse { transaction })).into_response(),
        Err(err) => {
            match &err {
                TipError::InvalidAmount(_) => {
                    state
                        .logger
                        .async_info(format!("rejected tip amount {:?}: {}", amount, err))
                        .await
                }
                TipError::Timeout(_) => {
                    state
                        .logger
                        .async_warning(format!("tip of {:?} not prepared: {}", amount, err))
                        .await
                }
                TipError::Encoding(_) => {
                    state
                        .logger
                        .async_severe(format!("unable to prepare tip of {:?}: {}", amount, err))
                        .await
                }
            }
            error_response(&err)
        }
    }
}

fn error_response(err: &TipError) -> Response {
    (
        err.status_code(),
        Json(ApiResponse::new(err.status(), err.to_string())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use starknet::core::types::Felt;

    use super::*;
    use crate::models::transfer::TransferCall;
    use crate::server::test_utils::{body_string, test_state};

    fn query(amount: Option<&str>) -> Query<TipQuery> {
        Query(TipQuery {
            amount: amount.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn test_prepare_tip() {
        let state = test_state();
        let response = post_tip(State(state.clone()), query(Some("10"))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: TransactionResponse = serde_json::from_str(&body_string(response).await).unwrap();
        let call: TransferCall = serde_json::from_str(&body.transaction).unwrap();
        assert_eq!(call.entrypoint, "transfer");
        assert_eq!(call.calldata[0], state.conf.donation_wallet);
        assert_eq!(call.calldata[1], Felt::from(10_000_000_000_000_000_000_u128));
        assert_eq!(call.calldata[2], Felt::ZERO);
    }

    #[tokio::test]
    async fn test_invalid_amounts_are_rejected() {
        for amount in [None, Some(""), Some("abc"), Some("-5")] {
            let response = post_tip(State(test_state()), query(amount)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{:?}", amount);

            let body: serde_json::Value =
                serde_json::from_str(&body_string(response).await).unwrap();
            assert_eq!(body["status"], "bad_request");
            assert!(body["data"].as_str().unwrap().starts_with("invalid amount"));
            assert!(body.get("transaction").is_none());
        }
    }

    #[tokio::test]
    async fn test_upstream_failure_envelopes() {
        let response = error_response(&TipError::Timeout(2000));
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "gateway_timeout");
        assert_eq!(
            body["data"],
            "transaction preparation timed out after 2000 ms"
        );

        let response = error_response(&TipError::Encoding("bad call".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "bad_gateway");
    }
}
