//! API response types

use crate::models::IndexState;
use serde::{Deserialize, Serialize};

/// Envelope for the full registry state
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexListResponse {
    pub index_details: Vec<IndexState>,
}

/// Error body returned alongside non-2xx statuses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub timestamp: i64,
}
