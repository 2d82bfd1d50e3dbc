//! Row DTO for the account-wide audience table.

use serde::Serialize;

use crate::domain::audience::{Audience, AudienceType, TargetingMode};
use crate::domain::campaign::EntityStatus;
use crate::domain::metrics::{DerivedMetrics, MetricTotals, MetricsPolicy};
use crate::listview::{FieldValue, ListRow};

/// One audience attachment with its campaign name; search covers both.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AudienceRow {
    pub id: i32,
    pub campaign_id: i32,
    pub campaign_name: String,
    pub name: String,
    pub audience_type: AudienceType,
    pub targeting_mode: TargetingMode,
    pub status: EntityStatus,
    pub bid_adjustment_percent: i32,
    pub size_range: String,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: f64,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl AudienceRow {
    pub fn new(
        audience: &Audience,
        campaign_name: String,
        totals: &MetricTotals,
        policy: MetricsPolicy,
    ) -> Self {
        Self {
            id: audience.id,
            campaign_id: audience.campaign_id,
            campaign_name,
            name: audience.name.clone(),
            audience_type: audience.audience_type,
            targeting_mode: audience.targeting_mode,
            status: audience.status,
            bid_adjustment_percent: audience.bid_adjustment_percent,
            size_range: audience.size_range.clone(),
            impressions: totals.impressions,
            clicks: totals.clicks,
            conversions: totals.conversions,
            metrics: policy.derive(totals),
        }
    }
}

impl ListRow for AudienceRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::text(&self.name)),
            "campaign_name" => Some(FieldValue::text(&self.campaign_name)),
            "audience_type" => Some(FieldValue::text(self.audience_type.as_str())),
            "targeting_mode" => Some(FieldValue::text(self.targeting_mode.as_str())),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "bid_adjustment_percent" => Some(f64::from(self.bid_adjustment_percent).into()),
            "size_range" => Some(FieldValue::text(&self.size_range)),
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
