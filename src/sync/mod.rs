//! Boundary to the external ads backend.
//!
//! Syncs pull a full [`snapshot::AccountSnapshot`] through the
//! [`AdsDataSource`] trait; the production implementation reads exported
//! JSON files and tests inject an in-memory fake. Live API transport sits
//! behind this seam and is not part of this crate.

pub mod json_file;
pub mod snapshot;

use thiserror::Error;

use crate::domain::types::CustomerId;
use crate::sync::snapshot::AccountSnapshot;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no snapshot available for customer {0}")]
    NotFound(String),
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Supplies the current remote state of one ads account.
pub trait AdsDataSource {
    fn fetch_snapshot(&self, customer_id: &CustomerId) -> Result<AccountSnapshot, SourceError>;
}
