//! Request payloads for the index API
//!
//! Field-level validation (blank names, positive numbers, member minimums)
//! lives here at the boundary; the engine only enforces invariants that
//! depend on runtime state.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

/// Body of `POST /api/create`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIndexRequest {
    #[validate(length(min = 1, message = "Index name cannot be blank"))]
    pub index_name: String,
    #[validate(length(min = 2, message = "An index must have at least two shares"))]
    pub index_members: Vec<ShareRequest>,
}

impl CreateIndexRequest {
    /// Full payload validation: derive rules plus per-member checks and
    /// duplicate member names, which the derive cannot express.
    pub fn validate_payload(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())?;
        let mut seen = HashSet::new();
        for member in &self.index_members {
            member.validate_payload()?;
            if !seen.insert(member.share_name.as_str()) {
                return Err(format!(
                    "Duplicate share in index members: {}",
                    member.share_name
                ));
            }
        }
        Ok(())
    }
}

/// One index member in a creation request. Also serializable: the length
/// rule on `index_members` reports the offending value in its error params.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareRequest {
    #[validate(length(min = 1, message = "Share name cannot be blank"))]
    pub share_name: String,
    pub share_price: f64,
    pub number_of_shares: f64,
}

impl ShareRequest {
    pub fn validate_payload(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())?;
        if self.share_price <= 0.0 {
            return Err("Share price must be positive".to_string());
        }
        if self.number_of_shares <= 0.0 {
            return Err("Number of shares must be positive".to_string());
        }
        Ok(())
    }
}

/// Body of `POST /api/indexAdjustment`: carries exactly one operation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexAdjustmentRequest {
    pub addition_operation: Option<ShareAdditionRequest>,
    pub deletion_operation: Option<ShareDeletionRequest>,
    pub dividend_operation: Option<ShareDividendRequest>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareAdditionRequest {
    #[validate(length(min = 1, message = "Share name cannot be blank"))]
    pub share_name: String,
    pub share_price: f64,
    pub number_of_shares: f64,
    #[validate(length(min = 1, message = "Index name cannot be blank"))]
    pub index_name: String,
}

impl ShareAdditionRequest {
    pub fn validate_payload(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())?;
        if self.share_price <= 0.0 {
            return Err("Share price must be positive".to_string());
        }
        if self.number_of_shares <= 0.0 {
            return Err("Number of shares must be positive".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareDeletionRequest {
    #[validate(length(min = 1, message = "Share name cannot be blank"))]
    pub share_name: String,
    #[validate(length(min = 1, message = "Index name cannot be blank"))]
    pub index_name: String,
}

impl ShareDeletionRequest {
    pub fn validate_payload(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShareDividendRequest {
    #[validate(length(min = 1, message = "Share name cannot be blank"))]
    pub share_name: String,
    pub dividend: f64,
}

impl ShareDividendRequest {
    pub fn validate_payload(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }
}
