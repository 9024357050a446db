#[macro_use]
pub mod macros;
pub mod html;
pub mod starknet;
pub mod starknet_tx;

use axum::http::StatusCode;
use thiserror::Error;

use crate::server::responses::Status;

#[derive(Error, Debug)]
pub enum TipError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("unable to encode transfer call: {0}")]
    Encoding(String),
    #[error("transaction preparation timed out after {0} ms")]
    Timeout(u64),
}

impl TipError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TipError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            TipError::Encoding(_) => StatusCode::BAD_GATEWAY,
            TipError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn status(&self) -> Status {
        match self {
            TipError::InvalidAmount(_) => Status::BadRequest,
            TipError::Encoding(_) => Status::BadGateway,
            TipError::Timeout(_) => Status::GatewayTimeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_statuses() {
        let cases = [
            (
                TipError::InvalidAmount("x".to_string()),
                StatusCode::BAD_REQUEST,
                Status::BadRequest,
            ),
            (
                TipError::Encoding("x".to_string()),
                StatusCode::BAD_GATEWAY,
                Status::BadGateway,
            ),
            (
                TipError::Timeout(5),
                StatusCode::GATEWAY_TIMEOUT,
                Status::GatewayTimeout,
            ),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.status_code(), code);
            assert_eq!(err.status(), status);
        }
    }
}
