//! Daily performance rows and the arithmetic that turns them into the rates
//! the dashboard displays.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

pub const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Converts platform micro-amounts into currency units.
pub fn micros_to_currency(micros: i64) -> f64 {
    micros as f64 / MICROS_PER_UNIT
}

/// Kind of entity a metric row or recommendation points at.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Campaign,
    AdGroup,
    Ad,
    Keyword,
    Audience,
}

impl EntityType {
    pub const fn as_str(self) -> &'static str {
        match self {
            EntityType::Campaign => "CAMPAIGN",
            EntityType::AdGroup => "AD_GROUP",
            EntityType::Ad => "AD",
            EntityType::Keyword => "KEYWORD",
            EntityType::Audience => "AUDIENCE",
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CAMPAIGN" => Ok(EntityType::Campaign),
            "AD_GROUP" => Ok(EntityType::AdGroup),
            "AD" => Ok(EntityType::Ad),
            "KEYWORD" => Ok(EntityType::Keyword),
            "AUDIENCE" => Ok(EntityType::Audience),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown entity type: {other}"
            ))),
        }
    }
}

/// One day of performance for one entity.
///
/// `reported_ctr` is a fraction (0.027 = 2.7%) and both reported fields are
/// optional; the API omits them for some rows.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MetricRow {
    pub id: i32,
    pub entity_type: EntityType,
    pub entity_id: i32,
    pub date: NaiveDate,
    pub impressions: i64,
    pub clicks: i64,
    pub cost_micros: i64,
    pub conversions: f64,
    pub reported_ctr: Option<f64>,
    pub reported_avg_cpc_micros: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMetricRow {
    pub entity_type: EntityType,
    pub entity_id: i32,
    pub date: NaiveDate,
    pub impressions: i64,
    pub clicks: i64,
    pub cost_micros: i64,
    pub conversions: f64,
    pub reported_ctr: Option<f64>,
    pub reported_avg_cpc_micros: Option<i64>,
}

impl NewMetricRow {
    #[must_use]
    pub fn new(
        entity_type: EntityType,
        entity_id: i32,
        date: NaiveDate,
        impressions: i64,
        clicks: i64,
        cost_micros: i64,
        conversions: f64,
        reported_ctr: Option<f64>,
        reported_avg_cpc_micros: Option<i64>,
    ) -> Self {
        Self {
            entity_type,
            entity_id,
            date,
            impressions: impressions.max(0),
            clicks: clicks.max(0),
            cost_micros: cost_micros.max(0),
            conversions: conversions.max(0.0),
            reported_ctr: reported_ctr.filter(|ctr| (0.0..=1.0).contains(ctr)),
            reported_avg_cpc_micros: reported_avg_cpc_micros.filter(|cpc| *cpc >= 0),
        }
    }
}

/// Raw sums over a set of metric rows.
///
/// Reported rates cannot simply be added, so the accumulator keeps weighted
/// sums: ctr weighted by impressions, avg-cpc weighted by clicks. Days
/// without a reported value contribute nothing to the weighted mean.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricTotals {
    pub impressions: i64,
    pub clicks: i64,
    pub cost_micros: i64,
    pub conversions: f64,
    ctr_weighted_sum: f64,
    ctr_weight: f64,
    cpc_weighted_sum: f64,
    cpc_weight: f64,
}

impl MetricTotals {
    pub fn add_row(&mut self, row: &MetricRow) {
        self.add_parts(
            row.impressions,
            row.clicks,
            row.cost_micros,
            row.conversions,
            row.reported_ctr,
            row.reported_avg_cpc_micros,
        );
    }

    /// Accumulates one row given as loose values, used at the database
    /// boundary where full domain rows are not materialized.
    pub fn add_parts(
        &mut self,
        impressions: i64,
        clicks: i64,
        cost_micros: i64,
        conversions: f64,
        reported_ctr: Option<f64>,
        reported_avg_cpc_micros: Option<i64>,
    ) {
        self.impressions += impressions;
        self.clicks += clicks;
        self.cost_micros += cost_micros;
        self.conversions += conversions;
        if let Some(ctr) = reported_ctr {
            self.ctr_weighted_sum += ctr * impressions as f64;
            self.ctr_weight += impressions as f64;
        }
        if let Some(cpc) = reported_avg_cpc_micros {
            self.cpc_weighted_sum += cpc as f64 * clicks as f64;
            self.cpc_weight += clicks as f64;
        }
    }

    pub fn from_rows<'a, I: IntoIterator<Item = &'a MetricRow>>(rows: I) -> Self {
        let mut totals = Self::default();
        for row in rows {
            totals.add_row(row);
        }
        totals
    }

    /// Impressions-weighted mean of reported ctr values, as a fraction.
    pub fn reported_ctr(&self) -> Option<f64> {
        (self.ctr_weight > 0.0).then(|| self.ctr_weighted_sum / self.ctr_weight)
    }

    /// Clicks-weighted mean of reported average cpc, in micros.
    pub fn reported_avg_cpc_micros(&self) -> Option<f64> {
        (self.cpc_weight > 0.0).then(|| self.cpc_weighted_sum / self.cpc_weight)
    }
}

/// Display-ready rates. `ctr` and `conversion_rate` are percentages, `cost`
/// and `avg_cpc` currency units. `cost_per_conversion` is absent when there
/// are no conversions; the frontend renders that as "N/A".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub cost: f64,
    pub ctr: f64,
    pub avg_cpc: f64,
    pub conversion_rate: f64,
    pub cost_per_conversion: Option<f64>,
}

/// How derived rates are produced when the API also reports its own.
///
/// `ComputeFromRaw` keeps every displayed rate consistent with the raw counts
/// shown next to it. `TrustReported` prefers the platform's own ctr/avg-cpc
/// figures and falls back to raw arithmetic where they are absent. Configured
/// once per deployment.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricsPolicy {
    #[default]
    ComputeFromRaw,
    TrustReported,
}

impl MetricsPolicy {
    /// Derives display rates from totals. Zero denominators yield 0 (or
    /// `None` for cost per conversion), never an error.
    pub fn derive(self, totals: &MetricTotals) -> DerivedMetrics {
        let cost = micros_to_currency(totals.cost_micros);
        let raw_ctr = if totals.impressions > 0 {
            totals.clicks as f64 / totals.impressions as f64 * 100.0
        } else {
            0.0
        };
        let raw_avg_cpc = if totals.clicks > 0 {
            cost / totals.clicks as f64
        } else {
            0.0
        };
        let conversion_rate = if totals.clicks > 0 {
            totals.conversions / totals.clicks as f64 * 100.0
        } else {
            0.0
        };
        let cost_per_conversion =
            (totals.conversions > 0.0).then(|| cost / totals.conversions);

        let (ctr, avg_cpc) = match self {
            MetricsPolicy::ComputeFromRaw => (raw_ctr, raw_avg_cpc),
            MetricsPolicy::TrustReported => (
                totals.reported_ctr().map_or(raw_ctr, |ctr| ctr * 100.0),
                totals
                    .reported_avg_cpc_micros()
                    .map_or(raw_avg_cpc, |cpc| cpc / MICROS_PER_UNIT),
            ),
        };

        DerivedMetrics {
            cost,
            ctr,
            avg_cpc,
            conversion_rate,
            cost_per_conversion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        impressions: i64,
        clicks: i64,
        cost_micros: i64,
        conversions: f64,
        reported_ctr: Option<f64>,
        reported_avg_cpc_micros: Option<i64>,
    ) -> MetricRow {
        MetricRow {
            id: 1,
            entity_type: EntityType::Campaign,
            entity_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            impressions,
            clicks,
            cost_micros,
            conversions,
            reported_ctr,
            reported_avg_cpc_micros,
        }
    }

    #[test]
    fn compute_from_raw_derives_all_rates() {
        let totals = MetricTotals::from_rows(&[row(1000, 50, 25_000_000, 5.0, None, None)]);
        let derived = MetricsPolicy::ComputeFromRaw.derive(&totals);

        assert_eq!(derived.cost, 25.0);
        assert_eq!(derived.ctr, 5.0);
        assert_eq!(derived.avg_cpc, 0.5);
        assert_eq!(derived.conversion_rate, 10.0);
        assert_eq!(derived.cost_per_conversion, Some(5.0));
    }

    #[test]
    fn zero_denominators_yield_zero_rates_and_absent_cpa() {
        let totals = MetricTotals::from_rows(&[row(0, 0, 0, 0.0, None, None)]);
        let derived = MetricsPolicy::ComputeFromRaw.derive(&totals);

        assert_eq!(derived.ctr, 0.0);
        assert_eq!(derived.avg_cpc, 0.0);
        assert_eq!(derived.conversion_rate, 0.0);
        assert_eq!(derived.cost_per_conversion, None);

        let derived = MetricsPolicy::TrustReported.derive(&totals);
        assert_eq!(derived.ctr, 0.0);
        assert_eq!(derived.cost_per_conversion, None);
    }

    #[test]
    fn trust_reported_prefers_api_rates_and_falls_back() {
        let totals = MetricTotals::from_rows(&[row(
            1000,
            50,
            25_000_000,
            5.0,
            Some(0.031),
            None,
        )]);
        let derived = MetricsPolicy::TrustReported.derive(&totals);

        // Reported ctr wins, absent reported cpc falls back to arithmetic.
        assert!((derived.ctr - 3.1).abs() < 1e-9);
        assert_eq!(derived.avg_cpc, 0.5);
    }

    #[test]
    fn reported_ctr_is_weighted_by_impressions() {
        let totals = MetricTotals::from_rows(&[
            row(900, 10, 0, 0.0, Some(0.02), None),
            row(100, 10, 0, 0.0, Some(0.12), None),
            // No reported value: excluded from the weighted mean.
            row(5000, 10, 0, 0.0, None, None),
        ]);

        let ctr = totals.reported_ctr().unwrap();
        assert!((ctr - 0.03).abs() < 1e-9);
        assert_eq!(totals.impressions, 6000);
    }

    #[test]
    fn new_row_clamps_negative_counts_and_out_of_range_rates() {
        let row = NewMetricRow::new(
            EntityType::Keyword,
            7,
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            -5,
            -1,
            -100,
            -2.0,
            Some(1.5),
            Some(-10),
        );
        assert_eq!(row.impressions, 0);
        assert_eq!(row.clicks, 0);
        assert_eq!(row.cost_micros, 0);
        assert_eq!(row.conversions, 0.0);
        assert_eq!(row.reported_ctr, None);
        assert_eq!(row.reported_avg_cpc_micros, None);
    }
}
