//! Diesel models for daily metric rows.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::metrics::{MetricRow as DomainMetricRow, NewMetricRow as DomainNewMetricRow};
use crate::domain::types::TypeConstraintError;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::metric_rows)]
/// Diesel model for [`crate::domain::metrics::MetricRow`].
pub struct MetricRow {
    pub id: i32,
    pub entity_type: String,
    pub entity_id: i32,
    pub date: NaiveDate,
    pub impressions: i64,
    pub clicks: i64,
    pub cost_micros: i64,
    pub conversions: f64,
    pub reported_ctr: Option<f64>,
    pub reported_avg_cpc_micros: Option<i64>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::metric_rows)]
/// Insertable form of [`MetricRow`].
pub struct NewMetricRow<'a> {
    pub entity_type: &'a str,
    pub entity_id: i32,
    pub date: NaiveDate,
    pub impressions: i64,
    pub clicks: i64,
    pub cost_micros: i64,
    pub conversions: f64,
    pub reported_ctr: Option<f64>,
    pub reported_avg_cpc_micros: Option<i64>,
}

impl TryFrom<MetricRow> for DomainMetricRow {
    type Error = TypeConstraintError;

    fn try_from(row: MetricRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            entity_type: row.entity_type.parse()?,
            entity_id: row.entity_id,
            date: row.date,
            impressions: row.impressions,
            clicks: row.clicks,
            cost_micros: row.cost_micros,
            conversions: row.conversions,
            reported_ctr: row.reported_ctr,
            reported_avg_cpc_micros: row.reported_avg_cpc_micros,
        })
    }
}

impl<'a> From<&'a DomainNewMetricRow> for NewMetricRow<'a> {
    fn from(row: &'a DomainNewMetricRow) -> Self {
        Self {
            entity_type: row.entity_type.as_str(),
            entity_id: row.entity_id,
            date: row.date,
            impressions: row.impressions,
            clicks: row.clicks,
            cost_micros: row.cost_micros,
            conversions: row.conversions,
            reported_ctr: row.reported_ctr,
            reported_avg_cpc_micros: row.reported_avg_cpc_micros,
        }
    }
}
