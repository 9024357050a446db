use std::{sync::Arc, time::Duration};

use crate::config::TipConfig;
use crate::models::transfer::TransferCall;
use crate::state::AppState;

use super::starknet::parse_token_amount;
use super::TipError;

pub const TRANSFER_ENTRYPOINT: &str = "transfer";

/// ERC20 `transfer(recipient, amount: u256)` towards the donation wallet.
pub fn transfer_call(conf: &TipConfig, amount: &str) -> Result<TransferCall, TipError> {
    let [low, high] = parse_token_amount(amount, conf.token_decimals)?.to_felts();
    Ok(TransferCall {
        contract_address: conf.token_contract,
        entrypoint: TRANSFER_ENTRYPOINT.to_string(),
        calldata: vec![conf.donation_wallet, low, high],
    })
}

/// Serialized unsigned transfer call. Nothing is signed or sent.
pub fn prepare_transfer(conf: &TipConfig, amount: &str) -> Result<String, TipError> {
    let call = transfer_call(conf, amount)?;
    serde_json::to_string(&call).map_err(|e| TipError::Encoding(e.to_string()))
}

/// Runs `prepare_transfer` on the blocking pool, bounded by `prepare_timeout_ms`.
pub async fn prepare_transfer_with_timeout(
    state: &Arc<AppState>,
    amount: String,
) -> Result<String, TipError> {
    let task_state = state.clone();
    run_bounded(state.conf.prepare_timeout_ms, move || {
        prepare_transfer(&task_state.conf, &amount)
    })
    .await
}

async fn run_bounded<F>(timeout_ms: u64, job: F) -> Result<String, TipError>
where
    F: FnOnce() -> Result<String, TipError> + Send + 'static,
{
    let task = tokio::task::spawn_blocking(job);
    match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
        Ok(Ok(res)) => res,
        Ok(Err(join_err)) => Err(TipError::Encoding(join_err.to_string())),
        Err(_) => Err(TipError::Timeout(timeout_ms)),
    }
}
