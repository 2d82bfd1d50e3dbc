//! Repository implementation for ad groups.

use diesel::prelude::*;

use crate::domain::ad_group::{AdGroup, NewAdGroup};
use crate::domain::metrics::EntityType;
use crate::domain::types::{AdGroupId, CampaignId};
use crate::models::ad_group::{AdGroup as DbAdGroup, NewAdGroup as DbNewAdGroup};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdGroupListQuery, AdGroupReader, AdGroupWriter, DieselRepository};

impl AdGroupReader for DieselRepository {
    fn get_ad_group_by_id(&self, id: AdGroupId) -> RepositoryResult<Option<AdGroup>> {
        use crate::schema::ad_groups;

        let mut conn = self.conn()?;
        let db_ad_group = ad_groups::table
            .filter(ad_groups::id.eq(id.get()))
            .first::<DbAdGroup>(&mut conn)
            .optional()?;

        match db_ad_group {
            Some(db_ad_group) => Ok(Some(
                AdGroup::try_from(db_ad_group).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_ad_groups(&self, query: AdGroupListQuery) -> RepositoryResult<Vec<AdGroup>> {
        use crate::schema::ad_groups;

        let mut conn = self.conn()?;
        let db_ad_groups = ad_groups::table
            .filter(ad_groups::campaign_id.eq(query.campaign_id.get()))
            .order(ad_groups::id.asc())
            .load::<DbAdGroup>(&mut conn)?;

        db_ad_groups
            .into_iter()
            .map(|db_ad_group| AdGroup::try_from(db_ad_group).map_err(RepositoryError::from))
            .collect()
    }
}

impl AdGroupWriter for DieselRepository {
    fn replace_campaign_ad_groups(
        &self,
        campaign_id: CampaignId,
        new_ad_groups: &[NewAdGroup],
    ) -> RepositoryResult<Vec<AdGroup>> {
        use crate::schema::{ad_groups, ads, keywords, metric_rows};

        let mut conn = self.conn()?;
        let db_ad_groups = conn.transaction::<Vec<DbAdGroup>, diesel::result::Error, _>(|conn| {
            let old_ad_group_ids: Vec<i32> = ad_groups::table
                .filter(ad_groups::campaign_id.eq(campaign_id.get()))
                .select(ad_groups::id)
                .load(conn)?;

            if !old_ad_group_ids.is_empty() {
                let old_ad_ids: Vec<i32> = ads::table
                    .filter(ads::ad_group_id.eq_any(&old_ad_group_ids))
                    .select(ads::id)
                    .load(conn)?;
                let old_keyword_ids: Vec<i32> = keywords::table
                    .filter(keywords::ad_group_id.eq_any(&old_ad_group_ids))
                    .select(keywords::id)
                    .load(conn)?;

                let metric_scopes = [
                    (EntityType::AdGroup, &old_ad_group_ids),
                    (EntityType::Ad, &old_ad_ids),
                    (EntityType::Keyword, &old_keyword_ids),
                ];
                for (entity_type, ids) in metric_scopes {
                    if ids.is_empty() {
                        continue;
                    }
                    diesel::delete(
                        metric_rows::table
                            .filter(metric_rows::entity_type.eq(entity_type.as_str()))
                            .filter(metric_rows::entity_id.eq_any(ids)),
                    )
                    .execute(conn)?;
                }

                diesel::delete(ads::table.filter(ads::ad_group_id.eq_any(&old_ad_group_ids)))
                    .execute(conn)?;
                diesel::delete(
                    keywords::table.filter(keywords::ad_group_id.eq_any(&old_ad_group_ids)),
                )
                .execute(conn)?;
                diesel::delete(
                    ad_groups::table.filter(ad_groups::campaign_id.eq(campaign_id.get())),
                )
                .execute(conn)?;
            }

            if new_ad_groups.is_empty() {
                return Ok(Vec::new());
            }

            let db_new_ad_groups: Vec<DbNewAdGroup> = new_ad_groups
                .iter()
                .map(|new_ad_group| DbNewAdGroup::from_domain(campaign_id.get(), new_ad_group))
                .collect();

            diesel::insert_into(ad_groups::table)
                .values(&db_new_ad_groups)
                .get_results::<DbAdGroup>(conn)
        })?;

        db_ad_groups
            .into_iter()
            .map(|db_ad_group| AdGroup::try_from(db_ad_group).map_err(RepositoryError::from))
            .collect()
    }
}
