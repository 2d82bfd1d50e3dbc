//! Repository implementation for audiences.

use diesel::prelude::*;

use crate::domain::audience::{Audience, NewAudience};
use crate::domain::metrics::EntityType;
use crate::domain::types::{AudienceId, CampaignId};
use crate::models::audience::{Audience as DbAudience, NewAudience as DbNewAudience};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AudienceListQuery, AudienceReader, AudienceWriter, DieselRepository};

impl AudienceReader for DieselRepository {
    fn get_audience_by_id(&self, id: AudienceId) -> RepositoryResult<Option<Audience>> {
        use crate::schema::audiences;

        let mut conn = self.conn()?;
        let db_audience = audiences::table
            .filter(audiences::id.eq(id.get()))
            .first::<DbAudience>(&mut conn)
            .optional()?;

        match db_audience {
            Some(db_audience) => Ok(Some(
                Audience::try_from(db_audience).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_audiences(
        &self,
        query: AudienceListQuery,
    ) -> RepositoryResult<Vec<(Audience, String)>> {
        use crate::schema::{audiences, campaigns};

        let mut conn = self.conn()?;
        let rows = audiences::table
            .inner_join(campaigns::table)
            .filter(campaigns::account_id.eq(query.account_id.get()))
            .order(audiences::id.asc())
            .select((audiences::all_columns, campaigns::name))
            .load::<(DbAudience, String)>(&mut conn)?;

        rows.into_iter()
            .map(|(db_audience, campaign_name)| {
                let audience = Audience::try_from(db_audience).map_err(RepositoryError::from)?;
                Ok((audience, campaign_name))
            })
            .collect()
    }
}

impl AudienceWriter for DieselRepository {
    fn replace_campaign_audiences(
        &self,
        campaign_id: CampaignId,
        new_audiences: &[NewAudience],
    ) -> RepositoryResult<Vec<Audience>> {
        use crate::schema::{audiences, metric_rows};

        let mut conn = self.conn()?;
        let db_audiences = conn.transaction::<Vec<DbAudience>, diesel::result::Error, _>(|conn| {
            let old_audience_ids: Vec<i32> = audiences::table
                .filter(audiences::campaign_id.eq(campaign_id.get()))
                .select(audiences::id)
                .load(conn)?;

            if !old_audience_ids.is_empty() {
                diesel::delete(
                    metric_rows::table
                        .filter(metric_rows::entity_type.eq(EntityType::Audience.as_str()))
                        .filter(metric_rows::entity_id.eq_any(&old_audience_ids)),
                )
                .execute(conn)?;
                diesel::delete(
                    audiences::table.filter(audiences::campaign_id.eq(campaign_id.get())),
                )
                .execute(conn)?;
            }

            if new_audiences.is_empty() {
                return Ok(Vec::new());
            }

            let db_new_audiences: Vec<DbNewAudience> = new_audiences
                .iter()
                .map(|new_audience| DbNewAudience::from_domain(campaign_id.get(), new_audience))
                .collect();

            diesel::insert_into(audiences::table)
                .values(&db_new_audiences)
                .get_results::<DbAudience>(conn)
        })?;

        db_audiences
            .into_iter()
            .map(|db_audience| Audience::try_from(db_audience).map_err(RepositoryError::from))
            .collect()
    }
}
