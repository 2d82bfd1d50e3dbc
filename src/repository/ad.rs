//! Repository implementation for ads.

use diesel::prelude::*;

use crate::domain::ad::{Ad, NewAd};
use crate::domain::metrics::EntityType;
use crate::domain::types::{AdGroupId, AdId};
use crate::models::ad::{Ad as DbAd, NewAd as DbNewAd};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AdListQuery, AdReader, AdWriter, DieselRepository};

impl AdReader for DieselRepository {
    fn get_ad_by_id(&self, id: AdId) -> RepositoryResult<Option<Ad>> {
        use crate::schema::ads;

        let mut conn = self.conn()?;
        let db_ad = ads::table
            .filter(ads::id.eq(id.get()))
            .first::<DbAd>(&mut conn)
            .optional()?;

        match db_ad {
            Some(db_ad) => Ok(Some(Ad::try_from(db_ad).map_err(RepositoryError::from)?)),
            None => Ok(None),
        }
    }

    fn list_ads(&self, query: AdListQuery) -> RepositoryResult<Vec<Ad>> {
        use crate::schema::ads;

        let mut conn = self.conn()?;
        let db_ads = ads::table
            .filter(ads::ad_group_id.eq(query.ad_group_id.get()))
            .order(ads::id.asc())
            .load::<DbAd>(&mut conn)?;

        db_ads
            .into_iter()
            .map(|db_ad| Ad::try_from(db_ad).map_err(RepositoryError::from))
            .collect()
    }
}

impl AdWriter for DieselRepository {
    fn replace_ad_group_ads(
        &self,
        ad_group_id: AdGroupId,
        new_ads: &[NewAd],
    ) -> RepositoryResult<Vec<Ad>> {
        use crate::schema::{ads, metric_rows};

        let mut conn = self.conn()?;
        let db_ads = conn.transaction::<Vec<DbAd>, diesel::result::Error, _>(|conn| {
            let old_ad_ids: Vec<i32> = ads::table
                .filter(ads::ad_group_id.eq(ad_group_id.get()))
                .select(ads::id)
                .load(conn)?;

            if !old_ad_ids.is_empty() {
                diesel::delete(
                    metric_rows::table
                        .filter(metric_rows::entity_type.eq(EntityType::Ad.as_str()))
                        .filter(metric_rows::entity_id.eq_any(&old_ad_ids)),
                )
                .execute(conn)?;
                diesel::delete(ads::table.filter(ads::ad_group_id.eq(ad_group_id.get())))
                    .execute(conn)?;
            }

            if new_ads.is_empty() {
                return Ok(Vec::new());
            }

            let db_new_ads: Vec<DbNewAd> = new_ads
                .iter()
                .map(|new_ad| DbNewAd::from_domain(ad_group_id.get(), new_ad))
                .collect();

            diesel::insert_into(ads::table)
                .values(&db_new_ads)
                .get_results::<DbAd>(conn)
        })?;

        db_ads
            .into_iter()
            .map(|db_ad| Ad::try_from(db_ad).map_err(RepositoryError::from))
            .collect()
    }
}
