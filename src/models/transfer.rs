use serde::{Deserialize, Serialize};
use starknet::core::types::Felt;

/// Unsigned invoke description, in the shape wallets expect for a `Call`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferCall {
    pub contract_address: Felt,
    pub entrypoint: String,
    pub calldata: Vec<Felt>,
}

pub_struct!(Debug, Clone, Serialize, Deserialize; TransactionResponse {
    transaction: String,
});

pub_struct!(Debug, Deserialize; TipQuery {
    amount: Option<String>,
});
