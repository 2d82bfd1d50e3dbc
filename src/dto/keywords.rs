//! Row DTO for the account-wide keyword table.

use serde::Serialize;

use crate::domain::campaign::EntityStatus;
use crate::domain::keyword::{Keyword, MatchType};
use crate::domain::metrics::{DerivedMetrics, MetricTotals, MetricsPolicy, micros_to_currency};
use crate::listview::{FieldValue, ListRow};

/// One keyword with its ad group name; search covers both, matching the
/// dashboard's keyword box.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeywordRow {
    pub id: i32,
    pub ad_group_id: i32,
    pub ad_group_name: String,
    pub text: String,
    pub match_type: MatchType,
    pub status: EntityStatus,
    pub bid: f64,
    pub quality_score: Option<i32>,
    pub search_impression_share: Option<f64>,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: f64,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl KeywordRow {
    pub fn new(
        keyword: &Keyword,
        ad_group_name: String,
        totals: &MetricTotals,
        policy: MetricsPolicy,
    ) -> Self {
        Self {
            id: keyword.id,
            ad_group_id: keyword.ad_group_id,
            ad_group_name,
            text: keyword.text.clone(),
            match_type: keyword.match_type,
            status: keyword.status,
            bid: micros_to_currency(keyword.bid_micros),
            quality_score: keyword.quality_score,
            search_impression_share: keyword.search_impression_share,
            impressions: totals.impressions,
            clicks: totals.clicks,
            conversions: totals.conversions,
            metrics: policy.derive(totals),
        }
    }
}

impl ListRow for KeywordRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "text" => Some(FieldValue::text(&self.text)),
            "ad_group_name" => Some(FieldValue::text(&self.ad_group_name)),
            "match_type" => Some(FieldValue::text(self.match_type.as_str())),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "bid" => Some(self.bid.into()),
            "quality_score" => self.quality_score.map(|score| f64::from(score).into()),
            "search_impression_share" => self.search_impression_share.map(FieldValue::from),
            "impressions" => Some(self.impressions.into()),
            "clicks" => Some(self.clicks.into()),
            "conversions" => Some(self.conversions.into()),
            "cost" => Some(self.metrics.cost.into()),
            "ctr" => Some(self.metrics.ctr.into()),
            "avg_cpc" => Some(self.metrics.avg_cpc.into()),
            "conversion_rate" => Some(self.metrics.conversion_rate.into()),
            "cost_per_conversion" => self.metrics.cost_per_conversion.map(FieldValue::from),
            _ => None,
        }
    }
}
