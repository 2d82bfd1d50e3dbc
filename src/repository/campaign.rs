//! Repository implementation for campaigns.
//!
//! Replacing an account's campaigns removes the previous campaign tree
//! (ad groups, ads, keywords, audiences) together with the metric rows
//! that referenced it, inside a single transaction.

use diesel::prelude::*;

use crate::domain::campaign::{Campaign, NewCampaign};
use crate::domain::metrics::EntityType;
use crate::domain::types::{AccountId, CampaignId};
use crate::models::campaign::{Campaign as DbCampaign, NewCampaign as DbNewCampaign};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CampaignListQuery, CampaignReader, CampaignWriter, DieselRepository};

impl CampaignReader for DieselRepository {
    fn get_campaign_by_id(&self, id: CampaignId) -> RepositoryResult<Option<Campaign>> {
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let db_campaign = campaigns::table
            .filter(campaigns::id.eq(id.get()))
            .first::<DbCampaign>(&mut conn)
            .optional()?;

        match db_campaign {
            Some(db_campaign) => Ok(Some(
                Campaign::try_from(db_campaign).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<Vec<Campaign>> {
        use crate::schema::campaigns;

        let mut conn = self.conn()?;
        let db_campaigns = campaigns::table
            .filter(campaigns::account_id.eq(query.account_id.get()))
            .order(campaigns::id.asc())
            .load::<DbCampaign>(&mut conn)?;

        db_campaigns
            .into_iter()
            .map(|db_campaign| Campaign::try_from(db_campaign).map_err(RepositoryError::from))
            .collect()
    }
}

impl CampaignWriter for DieselRepository {
    fn replace_account_campaigns(
        &self,
        account_id: AccountId,
        new_campaigns: &[NewCampaign],
    ) -> RepositoryResult<Vec<Campaign>> {
        use crate::schema::{ad_groups, ads, audiences, campaigns, keywords, metric_rows};

        let mut conn = self.conn()?;
        let db_campaigns = conn.transaction::<Vec<DbCampaign>, diesel::result::Error, _>(|conn| {
            let old_campaign_ids: Vec<i32> = campaigns::table
                .filter(campaigns::account_id.eq(account_id.get()))
                .select(campaigns::id)
                .load(conn)?;

            if !old_campaign_ids.is_empty() {
                let old_ad_group_ids: Vec<i32> = ad_groups::table
                    .filter(ad_groups::campaign_id.eq_any(&old_campaign_ids))
                    .select(ad_groups::id)
                    .load(conn)?;
                let old_ad_ids: Vec<i32> = ads::table
                    .filter(ads::ad_group_id.eq_any(&old_ad_group_ids))
                    .select(ads::id)
                    .load(conn)?;
                let old_keyword_ids: Vec<i32> = keywords::table
                    .filter(keywords::ad_group_id.eq_any(&old_ad_group_ids))
                    .select(keywords::id)
                    .load(conn)?;
                let old_audience_ids: Vec<i32> = audiences::table
                    .filter(audiences::campaign_id.eq_any(&old_campaign_ids))
                    .select(audiences::id)
                    .load(conn)?;

                let metric_scopes = [
                    (EntityType::Campaign, &old_campaign_ids),
                    (EntityType::AdGroup, &old_ad_group_ids),
                    (EntityType::Ad, &old_ad_ids),
                    (EntityType::Keyword, &old_keyword_ids),
                    (EntityType::Audience, &old_audience_ids),
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
                    ad_groups::table.filter(ad_groups::campaign_id.eq_any(&old_campaign_ids)),
                )
                .execute(conn)?;
                diesel::delete(
                    audiences::table.filter(audiences::campaign_id.eq_any(&old_campaign_ids)),
                )
                .execute(conn)?;
                diesel::delete(campaigns::table.filter(campaigns::account_id.eq(account_id.get())))
                    .execute(conn)?;
            }

            if new_campaigns.is_empty() {
                return Ok(Vec::new());
            }

            let db_new_campaigns: Vec<DbNewCampaign> = new_campaigns
                .iter()
                .map(|new_campaign| DbNewCampaign::from_domain(account_id.get(), new_campaign))
                .collect();

            diesel::insert_into(campaigns::table)
                .values(&db_new_campaigns)
                .get_results::<DbCampaign>(conn)
        })?;

        db_campaigns
            .into_iter()
            .map(|db_campaign| Campaign::try_from(db_campaign).map_err(RepositoryError::from))
            .collect()
    }
}
