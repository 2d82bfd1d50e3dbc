//! Flat row DTOs for the campaign drill-down tables.
//!
//! Each row carries the entity's own columns plus the derived metrics for
//! the requested date window, flattened so the client sees one flat JSON
//! object per table row.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::ad::Ad;
use crate::domain::ad_group::AdGroup;
use crate::domain::campaign::{Campaign, CampaignType, EntityStatus};
use crate::domain::metrics::{DerivedMetrics, MetricTotals, MetricsPolicy, micros_to_currency};
use crate::domain::types::DateRange;
use crate::listview::{FieldValue, ListRow};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CampaignRow {
    pub id: i32,
    pub name: String,
    pub campaign_type: CampaignType,
    pub status: EntityStatus,
    pub daily_budget: f64,
    /// Cost over the window as a percentage of the budget available in it.
    pub budget_used_percent: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: f64,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl CampaignRow {
    pub fn new(
        campaign: &Campaign,
        totals: &MetricTotals,
        policy: MetricsPolicy,
        range: &DateRange,
    ) -> Self {
        let metrics = policy.derive(totals);
        let daily_budget = micros_to_currency(campaign.daily_budget_micros);
        let window_budget = daily_budget * range.days() as f64;
        let budget_used_percent = if window_budget > 0.0 {
            metrics.cost / window_budget * 100.0
        } else {
            0.0
        };

        Self {
            id: campaign.id,
            name: campaign.name.clone(),
            campaign_type: campaign.campaign_type,
            status: campaign.status,
            daily_budget,
            budget_used_percent,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
            impressions: totals.impressions,
            clicks: totals.clicks,
            conversions: totals.conversions,
            metrics,
        }
    }
}

impl ListRow for CampaignRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::text(&self.name)),
            "campaign_type" => Some(FieldValue::text(self.campaign_type.as_str())),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "daily_budget" => Some(self.daily_budget.into()),
            "budget_used_percent" => Some(self.budget_used_percent.into()),
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

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdGroupRow {
    pub id: i32,
    pub campaign_id: i32,
    pub name: String,
    pub status: EntityStatus,
    pub default_bid: f64,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: f64,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl AdGroupRow {
    pub fn new(ad_group: &AdGroup, totals: &MetricTotals, policy: MetricsPolicy) -> Self {
        Self {
            id: ad_group.id,
            campaign_id: ad_group.campaign_id,
            name: ad_group.name.clone(),
            status: ad_group.status,
            default_bid: micros_to_currency(ad_group.default_bid_micros),
            impressions: totals.impressions,
            clicks: totals.clicks,
            conversions: totals.conversions,
            metrics: policy.derive(totals),
        }
    }
}

impl ListRow for AdGroupRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::text(&self.name)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "default_bid" => Some(self.default_bid.into()),
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

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdRow {
    pub id: i32,
    pub ad_group_id: i32,
    pub headline: String,
    pub headline2: String,
    pub description: String,
    pub final_url: String,
    pub status: EntityStatus,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: f64,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl AdRow {
    pub fn new(ad: &Ad, totals: &MetricTotals, policy: MetricsPolicy) -> Self {
        Self {
            id: ad.id,
            ad_group_id: ad.ad_group_id,
            headline: ad.headline.clone(),
            headline2: ad.headline2.clone(),
            description: ad.description.clone(),
            final_url: ad.final_url.clone(),
            status: ad.status,
            impressions: totals.impressions,
            clicks: totals.clicks,
            conversions: totals.conversions,
            metrics: policy.derive(totals),
        }
    }
}

impl ListRow for AdRow {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "headline" => Some(FieldValue::text(&self.headline)),
            "description" => Some(FieldValue::text(&self.description)),
            "final_url" => Some(FieldValue::text(&self.final_url)),
            "status" => Some(FieldValue::text(self.status.as_str())),
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
