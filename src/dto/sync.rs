//! Result payload of one account sync, rendered by the sync progress modal.

use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SyncReport {
    /// Correlation id, also written to the server log.
    pub sync_id: Uuid,
    pub account_id: i32,
    pub synced_at: NaiveDateTime,
    pub campaigns: usize,
    pub ad_groups: usize,
    pub ads: usize,
    pub keywords: usize,
    pub audiences: usize,
    pub metric_rows: usize,
    pub recommendations: usize,
}
