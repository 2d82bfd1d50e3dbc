//! Repository implementation for AI recommendations.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::domain::recommendation::{NewRecommendation, Recommendation, RecommendationStatus};
use crate::domain::types::{AccountId, RecommendationId};
use crate::models::recommendation::{
    NewRecommendation as DbNewRecommendation, Recommendation as DbRecommendation,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, RecommendationListQuery, RecommendationReader, RecommendationWriter,
};

impl RecommendationReader for DieselRepository {
    fn get_recommendation_by_id(
        &self,
        id: RecommendationId,
    ) -> RepositoryResult<Option<Recommendation>> {
        use crate::schema::recommendations;

        let mut conn = self.conn()?;
        let db_recommendation = recommendations::table
            .filter(recommendations::id.eq(id.get()))
            .first::<DbRecommendation>(&mut conn)
            .optional()?;

        match db_recommendation {
            Some(db_recommendation) => Ok(Some(
                Recommendation::try_from(db_recommendation).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_recommendations(
        &self,
        query: RecommendationListQuery,
    ) -> RepositoryResult<Vec<Recommendation>> {
        use crate::schema::recommendations;

        let mut conn = self.conn()?;
        let mut stmt = recommendations::table
            .filter(recommendations::account_id.eq(query.account_id.get()))
            .order(recommendations::id.asc())
            .into_boxed();

        if let Some(statuses) = &query.statuses {
            let statuses: Vec<&str> = statuses.iter().map(|status| status.as_str()).collect();
            stmt = stmt.filter(recommendations::status.eq_any(statuses));
        }

        let db_recommendations = stmt.load::<DbRecommendation>(&mut conn)?;
        db_recommendations
            .into_iter()
            .map(|db_recommendation| {
                Recommendation::try_from(db_recommendation).map_err(RepositoryError::from)
            })
            .collect()
    }
}

impl RecommendationWriter for DieselRepository {
    fn upsert_recommendations(
        &self,
        account_id: AccountId,
        new_recommendations: &[NewRecommendation],
    ) -> RepositoryResult<usize> {
        use crate::schema::recommendations;

        if new_recommendations.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let written = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            let mut written = 0;
            for new_recommendation in new_recommendations {
                let db_new =
                    DbNewRecommendation::from_domain(account_id.get(), new_recommendation);
                // Content columns refresh on conflict; status and applied_at
                // stay whatever the user set locally.
                written += diesel::insert_into(recommendations::table)
                    .values(&db_new)
                    .on_conflict((recommendations::account_id, recommendations::remote_id))
                    .do_update()
                    .set((
                        recommendations::title.eq(excluded(recommendations::title)),
                        recommendations::description.eq(excluded(recommendations::description)),
                        recommendations::category.eq(excluded(recommendations::category)),
                        recommendations::priority.eq(excluded(recommendations::priority)),
                        recommendations::estimated_impact
                            .eq(excluded(recommendations::estimated_impact)),
                        recommendations::entity_type.eq(excluded(recommendations::entity_type)),
                        recommendations::entity_id.eq(excluded(recommendations::entity_id)),
                        recommendations::entity_name.eq(excluded(recommendations::entity_name)),
                        recommendations::detail.eq(excluded(recommendations::detail)),
                        recommendations::result.eq(excluded(recommendations::result)),
                    ))
                    .execute(conn)?;
            }
            Ok(written)
        })?;

        Ok(written)
    }

    fn set_recommendation_status(
        &self,
        id: RecommendationId,
        status: RecommendationStatus,
        applied_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Recommendation> {
        use crate::schema::recommendations;

        let mut conn = self.conn()?;
        let db_recommendation =
            diesel::update(recommendations::table.filter(recommendations::id.eq(id.get())))
                .set((
                    recommendations::status.eq(status.as_str()),
                    recommendations::applied_at.eq(applied_at),
                ))
                .get_result::<DbRecommendation>(&mut conn)?;

        Recommendation::try_from(db_recommendation).map_err(RepositoryError::from)
    }
}
