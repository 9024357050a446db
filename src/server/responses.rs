use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    BadRequest,
    BadGateway,
    GatewayTimeout,
}

/// Envelope for every error body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T = String> {
    pub status: Status,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(status: Status, data: T) -> Self {
        ApiResponse { status, data }
    }
}
