use serde::{Deserialize, Serialize};

use crate::domain::campaign::EntityStatus;

/// An ad group inside a campaign.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdGroup {
    pub id: i32,
    pub campaign_id: i32,
    pub remote_id: i64,
    pub name: String,
    pub status: EntityStatus,
    pub default_bid_micros: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAdGroup {
    pub remote_id: i64,
    pub name: String,
    pub status: EntityStatus,
    pub default_bid_micros: i64,
}

impl NewAdGroup {
    #[must_use]
    pub fn new(remote_id: i64, name: String, status: EntityStatus, default_bid_micros: i64) -> Self {
        Self {
            remote_id,
            name: name.trim().to_string(),
            status,
            default_bid_micros: default_bid_micros.max(0),
        }
    }
}
