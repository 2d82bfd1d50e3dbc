//! Account summary with read-through caching.

use std::time::Duration;

use chrono::NaiveDate;

use crate::cache::TtlCache;
use crate::domain::metrics::MetricsPolicy;
use crate::domain::types::{AccountId, DateRange};
use crate::dto::metrics::AccountSummary;
use crate::repository::{AccountReader, MetricsReader};
use crate::services::{ServiceError, ServiceResult};

/// Cache key: one entry per account and date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SummaryCacheKey {
    pub account_id: i32,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

pub type SummaryCache = TtlCache<SummaryCacheKey, AccountSummary>;

pub fn account_summary<R>(
    repo: &R,
    cache: &SummaryCache,
    ttl: Duration,
    account_id: AccountId,
    range: &DateRange,
    policy: MetricsPolicy,
) -> ServiceResult<AccountSummary>
where
    R: AccountReader + MetricsReader + ?Sized,
{
    if repo.get_account_by_id(account_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let key = SummaryCacheKey {
        account_id: account_id.get(),
        from: range.from(),
        to: range.to(),
    };
    if let Some(summary) = cache.get(&key) {
        return Ok(summary);
    }

    let totals = repo.totals_for_account(account_id, range)?;
    let summary = AccountSummary::new(account_id, range, &totals, policy);
    cache.put(key, summary.clone(), ttl);
    Ok(summary)
}

/// Drops every cached window of the account. Called after a sync rewrites
/// the metric rows the summaries were computed from.
pub fn invalidate_account_summaries(cache: &SummaryCache, account_id: AccountId) -> usize {
    let id = account_id.get();
    cache.invalidate_if(|key| key.account_id == id)
}

#[cfg(test)]
#[cfg(feature = "test-mocks")]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::metrics::MetricTotals;
    use crate::repository::mock::MockRepository;

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
    fn summary_is_computed_once_within_ttl() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_id()
            .returning(|_| Ok(Some(account_stub())));
        repo.expect_totals_for_account().times(1).returning(|_, _| {
            let mut totals = MetricTotals::default();
            totals.add_parts(1000, 50, 25_000_000, 5.0, None, None);
            Ok(totals)
        });

        let cache = SummaryCache::new();
        let ttl = Duration::from_secs(300);
        let account_id = AccountId::new(1).unwrap();

        let first = account_summary(
            &repo,
            &cache,
            ttl,
            account_id,
            &window(),
            MetricsPolicy::ComputeFromRaw,
        )
        .unwrap();
        // Second call must come from the cache; the mock would panic on a
        // second repository hit.
        let second = account_summary(
            &repo,
            &cache,
            ttl,
            account_id,
            &window(),
            MetricsPolicy::ComputeFromRaw,
        )
        .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.clicks, 50);
    }

    #[test]
    fn invalidation_forces_recomputation() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_id()
            .returning(|_| Ok(Some(account_stub())));
        repo.expect_totals_for_account()
            .times(2)
            .returning(|_, _| Ok(MetricTotals::default()));

        let cache = SummaryCache::new();
        let ttl = Duration::from_secs(300);
        let account_id = AccountId::new(1).unwrap();

        account_summary(
            &repo,
            &cache,
            ttl,
            account_id,
            &window(),
            MetricsPolicy::ComputeFromRaw,
        )
        .unwrap();
        assert_eq!(invalidate_account_summaries(&cache, account_id), 1);
        account_summary(
            &repo,
            &cache,
            ttl,
            account_id,
            &window(),
            MetricsPolicy::ComputeFromRaw,
        )
        .unwrap();
    }

    #[test]
    fn different_windows_cache_separately() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_id()
            .returning(|_| Ok(Some(account_stub())));
        repo.expect_totals_for_account()
            .times(2)
            .returning(|_, _| Ok(MetricTotals::default()));

        let cache = SummaryCache::new();
        let ttl = Duration::from_secs(300);
        let account_id = AccountId::new(1).unwrap();
        let other = DateRange::new(
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 5, 31).unwrap(),
        )
        .unwrap();

        account_summary(
            &repo,
            &cache,
            ttl,
            account_id,
            &window(),
            MetricsPolicy::ComputeFromRaw,
        )
        .unwrap();
        account_summary(
            &repo,
            &cache,
            ttl,
            account_id,
            &other,
            MetricsPolicy::ComputeFromRaw,
        )
        .unwrap();
        assert_eq!(cache.len(), 2);
    }
}
