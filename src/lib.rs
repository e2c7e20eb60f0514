//! In-memory equity index registry with value-preserving rebalancing
//!
//! The core is a concurrent, per-index-locked store (`store`) plus the
//! rebalancing engine (`engine`) implementing constituent addition,
//! deletion and cross-index cash dividends, each expressed as a
//! proportional quantity rescale that keeps an index's aggregate value
//! unchanged. The `api` module exposes the operations over HTTP.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use engine::RebalanceEngine;
pub use error::EngineError;
pub use models::{Index, IndexMemberState, IndexState, Share};
