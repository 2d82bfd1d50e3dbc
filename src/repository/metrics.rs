//! Repository implementation for daily metric rows.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::domain::metrics::{EntityType, MetricTotals, NewMetricRow};
use crate::domain::types::{AccountId, DateRange};
use crate::models::metrics::{MetricRow as DbMetricRow, NewMetricRow as DbNewMetricRow};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, MetricsReader, MetricsWriter};

impl MetricsReader for DieselRepository {
    fn totals_for_entity(
        &self,
        entity_type: EntityType,
        entity_id: i32,
        range: &DateRange,
    ) -> RepositoryResult<MetricTotals> {
        use crate::schema::metric_rows;

        let mut conn = self.conn()?;
        let rows = metric_rows::table
            .filter(metric_rows::entity_type.eq(entity_type.as_str()))
            .filter(metric_rows::entity_id.eq(entity_id))
            .filter(metric_rows::date.between(range.from(), range.to()))
            .load::<DbMetricRow>(&mut conn)?;

        let mut totals = MetricTotals::default();
        for row in &rows {
            totals.add_parts(
                row.impressions,
                row.clicks,
                row.cost_micros,
                row.conversions,
                row.reported_ctr,
                row.reported_avg_cpc_micros,
            );
        }
        Ok(totals)
    }

    fn totals_for_entities(
        &self,
        entity_type: EntityType,
        entity_ids: &[i32],
        range: &DateRange,
    ) -> RepositoryResult<HashMap<i32, MetricTotals>> {
        use crate::schema::metric_rows;

        if entity_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut conn = self.conn()?;
        let rows = metric_rows::table
            .filter(metric_rows::entity_type.eq(entity_type.as_str()))
            .filter(metric_rows::entity_id.eq_any(entity_ids))
            .filter(metric_rows::date.between(range.from(), range.to()))
            .load::<DbMetricRow>(&mut conn)?;

        let mut totals_by_id: HashMap<i32, MetricTotals> = HashMap::new();
        for row in &rows {
            totals_by_id.entry(row.entity_id).or_default().add_parts(
                row.impressions,
                row.clicks,
                row.cost_micros,
                row.conversions,
                row.reported_ctr,
                row.reported_avg_cpc_micros,
            );
        }
        Ok(totals_by_id)
    }

    fn totals_for_account(
        &self,
        account_id: AccountId,
        range: &DateRange,
    ) -> RepositoryResult<MetricTotals> {
        use crate::schema::{campaigns, metric_rows};

        let mut conn = self.conn()?;
        let campaign_ids: Vec<i32> = campaigns::table
            .filter(campaigns::account_id.eq(account_id.get()))
            .select(campaigns::id)
            .load(&mut conn)?;

        if campaign_ids.is_empty() {
            return Ok(MetricTotals::default());
        }

        let rows = metric_rows::table
            .filter(metric_rows::entity_type.eq(EntityType::Campaign.as_str()))
            .filter(metric_rows::entity_id.eq_any(&campaign_ids))
            .filter(metric_rows::date.between(range.from(), range.to()))
            .load::<DbMetricRow>(&mut conn)?;

        let mut totals = MetricTotals::default();
        for row in &rows {
            totals.add_parts(
                row.impressions,
                row.clicks,
                row.cost_micros,
                row.conversions,
                row.reported_ctr,
                row.reported_avg_cpc_micros,
            );
        }
        Ok(totals)
    }
}

impl MetricsWriter for DieselRepository {
    fn upsert_metric_rows(&self, rows: &[NewMetricRow]) -> RepositoryResult<usize> {
        use crate::schema::metric_rows;

        if rows.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let written = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut written = 0;
            for row in rows {
                let db_row: DbNewMetricRow = row.into();
                written += diesel::insert_into(metric_rows::table)
                    .values(&db_row)
                    .on_conflict((
                        metric_rows::entity_type,
                        metric_rows::entity_id,
                        metric_rows::date,
                    ))
                    .do_update()
                    .set((
                        metric_rows::impressions.eq(excluded(metric_rows::impressions)),
                        metric_rows::clicks.eq(excluded(metric_rows::clicks)),
                        metric_rows::cost_micros.eq(excluded(metric_rows::cost_micros)),
                        metric_rows::conversions.eq(excluded(metric_rows::conversions)),
                        metric_rows::reported_ctr.eq(excluded(metric_rows::reported_ctr)),
                        metric_rows::reported_avg_cpc_micros
                            .eq(excluded(metric_rows::reported_avg_cpc_micros)),
                    ))
                    .execute(conn)?;
            }
            Ok(written)
        })?;

        Ok(written)
    }
}
