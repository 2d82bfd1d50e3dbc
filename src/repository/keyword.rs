//! Repository implementation for keywords.

use diesel::prelude::*;

use crate::domain::keyword::{Keyword, NewKeyword};
use crate::domain::metrics::EntityType;
use crate::domain::types::{AdGroupId, KeywordId};
use crate::models::keyword::{Keyword as DbKeyword, NewKeyword as DbNewKeyword};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, KeywordListQuery, KeywordReader, KeywordWriter};

impl KeywordReader for DieselRepository {
    fn get_keyword_by_id(&self, id: KeywordId) -> RepositoryResult<Option<Keyword>> {
        use crate::schema::keywords;

        let mut conn = self.conn()?;
        let db_keyword = keywords::table
            .filter(keywords::id.eq(id.get()))
            .first::<DbKeyword>(&mut conn)
            .optional()?;

        match db_keyword {
            Some(db_keyword) => Ok(Some(
                Keyword::try_from(db_keyword).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_keywords(
        &self,
        query: KeywordListQuery,
    ) -> RepositoryResult<Vec<(Keyword, String)>> {
        use crate::schema::{ad_groups, campaigns, keywords};

        let mut conn = self.conn()?;
        let rows = keywords::table
            .inner_join(ad_groups::table.inner_join(campaigns::table))
            .filter(campaigns::account_id.eq(query.account_id.get()))
            .order(keywords::id.asc())
            .select((keywords::all_columns, ad_groups::name))
            .load::<(DbKeyword, String)>(&mut conn)?;

        rows.into_iter()
            .map(|(db_keyword, ad_group_name)| {
                let keyword = Keyword::try_from(db_keyword).map_err(RepositoryError::from)?;
                Ok((keyword, ad_group_name))
            })
            .collect()
    }
}

impl KeywordWriter for DieselRepository {
    fn replace_ad_group_keywords(
        &self,
        ad_group_id: AdGroupId,
        new_keywords: &[NewKeyword],
    ) -> RepositoryResult<Vec<Keyword>> {
        use crate::schema::{keywords, metric_rows};

        let mut conn = self.conn()?;
        let db_keywords = conn.transaction::<Vec<DbKeyword>, diesel::result::Error, _>(|conn| {
            let old_keyword_ids: Vec<i32> = keywords::table
                .filter(keywords::ad_group_id.eq(ad_group_id.get()))
                .select(keywords::id)
                .load(conn)?;

            if !old_keyword_ids.is_empty() {
                diesel::delete(
                    metric_rows::table
                        .filter(metric_rows::entity_type.eq(EntityType::Keyword.as_str()))
                        .filter(metric_rows::entity_id.eq_any(&old_keyword_ids)),
                )
                .execute(conn)?;
                diesel::delete(keywords::table.filter(keywords::ad_group_id.eq(ad_group_id.get())))
                    .execute(conn)?;
            }

            if new_keywords.is_empty() {
                return Ok(Vec::new());
            }

            let db_new_keywords: Vec<DbNewKeyword> = new_keywords
                .iter()
                .map(|new_keyword| DbNewKeyword::from_domain(ad_group_id.get(), new_keyword))
                .collect();

            diesel::insert_into(keywords::table)
                .values(&db_new_keywords)
                .get_results::<DbKeyword>(conn)
        })?;

        db_keywords
            .into_iter()
            .map(|db_keyword| Keyword::try_from(db_keyword).map_err(RepositoryError::from))
            .collect()
    }
}
