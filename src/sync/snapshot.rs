//! Wire format of an exported account snapshot.
//!
//! The payload nests the account tree the way the export produces it:
//! campaigns own their ad groups and audiences, ad groups own ads and
//! keywords. Metric rows and recommendations arrive flat, keyed by the
//! remote ids of the entities they belong to.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::audience::{AudienceType, TargetingMode};
use crate::domain::campaign::{CampaignType, EntityStatus};
use crate::domain::keyword::MatchType;
use crate::domain::metrics::EntityType;
use crate::domain::recommendation::{
    RecommendationDetail, RecommendationPriority, RecommendationResult, RecommendationStatus,
};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccountSnapshot {
    pub customer_id: String,
    #[serde(default)]
    pub campaigns: Vec<CampaignSnapshot>,
    #[serde(default)]
    pub metrics: Vec<MetricSnapshot>,
    #[serde(default)]
    pub recommendations: Vec<RecommendationSnapshot>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CampaignSnapshot {
    pub remote_id: i64,
    pub name: String,
    pub campaign_type: CampaignType,
    pub status: EntityStatus,
    pub daily_budget_micros: i64,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub ad_groups: Vec<AdGroupSnapshot>,
    #[serde(default)]
    pub audiences: Vec<AudienceSnapshot>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AdGroupSnapshot {
    pub remote_id: i64,
    pub name: String,
    pub status: EntityStatus,
    pub default_bid_micros: i64,
    #[serde(default)]
    pub ads: Vec<AdSnapshot>,
    #[serde(default)]
    pub keywords: Vec<KeywordSnapshot>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AdSnapshot {
    pub remote_id: i64,
    pub headline: String,
    #[serde(default)]
    pub headline2: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub final_url: String,
    pub status: EntityStatus,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct KeywordSnapshot {
    pub remote_id: i64,
    pub text: String,
    pub match_type: MatchType,
    pub status: EntityStatus,
    pub bid_micros: i64,
    #[serde(default)]
    pub quality_score: Option<i32>,
    #[serde(default)]
    pub search_impression_share: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AudienceSnapshot {
    pub remote_id: i64,
    pub name: String,
    pub audience_type: AudienceType,
    pub targeting_mode: TargetingMode,
    pub status: EntityStatus,
    #[serde(default)]
    pub bid_adjustment_percent: i32,
    pub size_range: String,
}

/// One day of metrics for one entity, addressed by remote id.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MetricSnapshot {
    pub entity_type: EntityType,
    pub entity_remote_id: i64,
    pub date: NaiveDate,
    pub impressions: i64,
    pub clicks: i64,
    pub cost_micros: i64,
    pub conversions: f64,
    #[serde(default)]
    pub reported_ctr: Option<f64>,
    #[serde(default)]
    pub reported_avg_cpc_micros: Option<i64>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RecommendationSnapshot {
    pub remote_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: RecommendationPriority,
    #[serde(default)]
    pub estimated_impact: Option<String>,
    #[serde(default)]
    pub entity_type: Option<EntityType>,
    #[serde(default)]
    pub entity_remote_id: Option<i64>,
    #[serde(default)]
    pub entity_name: Option<String>,
    #[serde(default = "pending_status")]
    pub status: RecommendationStatus,
    #[serde(default)]
    pub applied_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub detail: Option<RecommendationDetail>,
    #[serde(default)]
    pub result: Option<RecommendationResult>,
}

fn pending_status() -> RecommendationStatus {
    RecommendationStatus::Pending
}
