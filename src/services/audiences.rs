//! Account-wide audience table.

use crate::domain::metrics::{EntityType, MetricsPolicy};
use crate::domain::types::{AccountId, DateRange};
use crate::dto::audiences::AudienceRow;
use crate::listview::{ListConfig, ListState, PageView, select_page};
use crate::repository::{AccountReader, AudienceListQuery, AudienceReader, MetricsReader};
use crate::services::{ServiceError, ServiceResult};

pub const AUDIENCE_LIST: ListConfig = ListConfig {
    searchable_fields: &["name", "campaign_name"],
    page_size: 10,
};

pub fn list_audience_rows<R>(
    repo: &R,
    account_id: AccountId,
    range: &DateRange,
    policy: MetricsPolicy,
    state: &ListState,
) -> ServiceResult<PageView<AudienceRow>>
where
    R: AccountReader + AudienceReader + MetricsReader + ?Sized,
{
    if repo.get_account_by_id(account_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let audiences = repo.list_audiences(AudienceListQuery::new(account_id))?;
    let ids: Vec<i32> = audiences.iter().map(|(audience, _)| audience.id).collect();
    let totals = repo.totals_for_entities(EntityType::Audience, &ids, range)?;

    let rows: Vec<AudienceRow> = audiences
        .into_iter()
        .map(|(audience, campaign_name)| {
            let entity_totals = totals.get(&audience.id).copied().unwrap_or_default();
            AudienceRow::new(&audience, campaign_name, &entity_totals, policy)
        })
        .collect();

    Ok(select_page(rows, state, &AUDIENCE_LIST))
}
