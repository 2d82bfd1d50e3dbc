//! Account-wide keyword table.

use crate::domain::metrics::{EntityType, MetricsPolicy};
use crate::domain::types::{AccountId, DateRange};
use crate::dto::keywords::KeywordRow;
use crate::listview::{ListConfig, ListState, PageView, select_page};
use crate::repository::{AccountReader, KeywordListQuery, KeywordReader, MetricsReader};
use crate::services::{ServiceError, ServiceResult};

pub const KEYWORD_LIST: ListConfig = ListConfig {
    searchable_fields: &["text", "ad_group_name"],
    page_size: 10,
};

pub fn list_keyword_rows<R>(
    repo: &R,
    account_id: AccountId,
    range: &DateRange,
    policy: MetricsPolicy,
    state: &ListState,
) -> ServiceResult<PageView<KeywordRow>>
where
    R: AccountReader + KeywordReader + MetricsReader + ?Sized,
{
    if repo.get_account_by_id(account_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let keywords = repo.list_keywords(KeywordListQuery::new(account_id))?;
    let ids: Vec<i32> = keywords.iter().map(|(keyword, _)| keyword.id).collect();
    let totals = repo.totals_for_entities(EntityType::Keyword, &ids, range)?;

    let rows: Vec<KeywordRow> = keywords
        .into_iter()
        .map(|(keyword, ad_group_name)| {
            let entity_totals = totals.get(&keyword.id).copied().unwrap_or_default();
            KeywordRow::new(&keyword, ad_group_name, &entity_totals, policy)
        })
        .collect();

    Ok(select_page(rows, state, &KEYWORD_LIST))
}
