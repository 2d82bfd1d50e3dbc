use serde::{Deserialize, Serialize};

use crate::domain::campaign::EntityStatus;
use crate::domain::types::FinalUrl;

/// A responsive search ad. Two headlines plus a description, as rendered in
/// the dashboard's ad preview cards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Ad {
    pub id: i32,
    pub ad_group_id: i32,
    pub remote_id: i64,
    pub headline: String,
    pub headline2: String,
    pub description: String,
    pub final_url: String,
    pub status: EntityStatus,
}

#[derive(Clone, Debug)]
pub struct NewAd {
    pub remote_id: i64,
    pub headline: String,
    pub headline2: String,
    pub description: String,
    pub final_url: FinalUrl,
    pub status: EntityStatus,
}

impl NewAd {
    #[must_use]
    pub fn new(
        remote_id: i64,
        headline: String,
        headline2: String,
        description: String,
        final_url: FinalUrl,
        status: EntityStatus,
    ) -> Self {
        Self {
            remote_id,
            headline: headline.trim().to_string(),
            headline2: headline2.trim().to_string(),
            description: description.trim().to_string(),
            final_url,
            status,
        }
    }
}
