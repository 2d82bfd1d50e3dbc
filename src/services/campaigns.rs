//! The three drill-down tables: campaigns of an account, ad groups of a
//! campaign, ads of an ad group.
//!
//! Each level loads its scoped entities, attaches metric totals for the
//! requested window in one bulk query, maps to flat rows and hands the
//! result to the list view-model.

use crate::domain::metrics::{EntityType, MetricsPolicy};
use crate::domain::types::{AccountId, AdGroupId, CampaignId, DateRange};
use crate::dto::campaigns::{AdGroupRow, AdRow, CampaignRow};
use crate::listview::{ListConfig, ListState, PageView, select_page};
use crate::repository::{
    AdGroupListQuery, AdGroupReader, AdListQuery, AdReader, AccountReader, CampaignListQuery,
    CampaignReader, MetricsReader,
};
use crate::services::{ServiceError, ServiceResult};

pub const CAMPAIGN_LIST: ListConfig = ListConfig {
    searchable_fields: &["name"],
    page_size: 10,
};

pub const AD_GROUP_LIST: ListConfig = ListConfig {
    searchable_fields: &["name"],
    page_size: 10,
};

pub const AD_LIST: ListConfig = ListConfig {
    searchable_fields: &["headline", "description"],
    page_size: 10,
};

pub fn list_campaign_rows<R>(
    repo: &R,
    account_id: AccountId,
    range: &DateRange,
    policy: MetricsPolicy,
    state: &ListState,
) -> ServiceResult<PageView<CampaignRow>>
where
    R: AccountReader + CampaignReader + MetricsReader + ?Sized,
{
    if repo.get_account_by_id(account_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let campaigns = repo.list_campaigns(CampaignListQuery::new(account_id))?;
    let ids: Vec<i32> = campaigns.iter().map(|campaign| campaign.id).collect();
    let totals = repo.totals_for_entities(EntityType::Campaign, &ids, range)?;

    let rows: Vec<CampaignRow> = campaigns
        .iter()
        .map(|campaign| {
            let entity_totals = totals.get(&campaign.id).copied().unwrap_or_default();
            CampaignRow::new(campaign, &entity_totals, policy, range)
        })
        .collect();

    Ok(select_page(rows, state, &CAMPAIGN_LIST))
}

pub fn list_ad_group_rows<R>(
    repo: &R,
    campaign_id: CampaignId,
    range: &DateRange,
    policy: MetricsPolicy,
    state: &ListState,
) -> ServiceResult<PageView<AdGroupRow>>
where
    R: CampaignReader + AdGroupReader + MetricsReader + ?Sized,
{
    if repo.get_campaign_by_id(campaign_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let ad_groups = repo.list_ad_groups(AdGroupListQuery::new(campaign_id))?;
    let ids: Vec<i32> = ad_groups.iter().map(|ad_group| ad_group.id).collect();
    let totals = repo.totals_for_entities(EntityType::AdGroup, &ids, range)?;

    let rows: Vec<AdGroupRow> = ad_groups
        .iter()
        .map(|ad_group| {
            let entity_totals = totals.get(&ad_group.id).copied().unwrap_or_default();
            AdGroupRow::new(ad_group, &entity_totals, policy)
        })
        .collect();

    Ok(select_page(rows, state, &AD_GROUP_LIST))
}

pub fn list_ad_rows<R>(
    repo: &R,
    ad_group_id: AdGroupId,
    range: &DateRange,
    policy: MetricsPolicy,
    state: &ListState,
) -> ServiceResult<PageView<AdRow>>
where
    R: AdGroupReader + AdReader + MetricsReader + ?Sized,
{
    if repo.get_ad_group_by_id(ad_group_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let ads = repo.list_ads(AdListQuery::new(ad_group_id))?;
    let ids: Vec<i32> = ads.iter().map(|ad| ad.id).collect();
    let totals = repo.totals_for_entities(EntityType::Ad, &ids, range)?;

    let rows: Vec<AdRow> = ads
        .iter()
        .map(|ad| {
            let entity_totals = totals.get(&ad.id).copied().unwrap_or_default();
            AdRow::new(ad, &entity_totals, policy)
        })
        .collect();

    Ok(select_page(rows, state, &AD_LIST))
}

#[cfg(test)]
#[cfg(feature = "test-mocks")]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::campaign::{Campaign, CampaignType, EntityStatus};
    use crate::domain::metrics::MetricTotals;
    use crate::repository::mock::MockRepository;

    fn campaign(id: i32, name: &str) -> Campaign {
        Campaign {
            id,
            account_id: 1,
            remote_id: 1000 + i64::from(id),
            name: name.to_string(),
            campaign_type: CampaignType::Search,
            status: EntityStatus::Enabled,
            daily_budget_micros: 10_000_000,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: None,
        }
    }

    fn account_stub() -> crate::domain::account::AdsAccount {
        crate::domain::account::AdsAccount {
            id: 1,
            customer_id: "123-456-7890".to_string(),
            name: "Acme".to_string(),
            account_type: crate::domain::account::AccountType::Standard,
            parent_customer_id: None,
            connected: true,
            last_synced_at: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    fn window() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn campaign_rows_search_and_attach_metrics() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_id()
            .returning(|_| Ok(Some(account_stub())));
        repo.expect_list_campaigns().returning(|_| {
            Ok(vec![
                campaign(1, "Shorts Verano"),
                campaign(2, "Camisetas"),
                campaign(3, "Shopping - Productos"),
            ])
        });
        repo.expect_totals_for_entities().returning(|_, ids, _| {
            let mut totals = HashMap::new();
            for id in ids {
                let mut entity_totals = MetricTotals::default();
                entity_totals.add_parts(1000, 10 * i64::from(*id), 0, 0.0, None, None);
                totals.insert(*id, entity_totals);
            }
            Ok(totals)
        });

        let mut state = ListState::default();
        state.set_search_term("shorts");

        let page = list_campaign_rows(
            &repo,
            AccountId::new(1).unwrap(),
            &window(),
            MetricsPolicy::ComputeFromRaw,
            &state,
        )
        .unwrap();

        assert_eq!(page.total_count, 3);
        assert_eq!(page.filtered_count, 1);
        assert_eq!(page.items[0].name, "Shorts Verano");
        assert_eq!(page.items[0].clicks, 10);
    }

    #[test]
    fn unknown_account_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_id().returning(|_| Ok(None));

        let err = list_campaign_rows(
            &repo,
            AccountId::new(77).unwrap(),
            &window(),
            MetricsPolicy::ComputeFromRaw,
            &ListState::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn entities_without_rows_get_zero_metrics() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_id()
            .returning(|_| Ok(Some(account_stub())));
        repo.expect_list_campaigns()
            .returning(|_| Ok(vec![campaign(1, "Display - Awareness")]));
        repo.expect_totals_for_entities()
            .returning(|_, _, _| Ok(HashMap::new()));

        let page = list_campaign_rows(
            &repo,
            AccountId::new(1).unwrap(),
            &window(),
            MetricsPolicy::ComputeFromRaw,
            &ListState::default(),
        )
        .unwrap();
        assert_eq!(page.items[0].impressions, 0);
        assert_eq!(page.items[0].metrics.cost_per_conversion, None);
    }
}
