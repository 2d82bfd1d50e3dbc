//! Account-level summary payload, the value cached between syncs.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::metrics::{DerivedMetrics, MetricTotals, MetricsPolicy};
use crate::domain::types::{AccountId, DateRange};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AccountSummary {
    pub account_id: i32,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: f64,
    #[serde(flatten)]
    pub metrics: DerivedMetrics,
}

impl AccountSummary {
    pub fn new(
        account_id: AccountId,
        range: &DateRange,
        totals: &MetricTotals,
        policy: MetricsPolicy,
    ) -> Self {
        Self {
            account_id: account_id.get(),
            from: range.from(),
            to: range.to(),
            impressions: totals.impressions,
            clicks: totals.clicks,
            conversions: totals.conversions,
            metrics: policy.derive(totals),
        }
    }
}
