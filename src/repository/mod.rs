//! Persistence layer: query builders, Reader/Writer traits and the Diesel
//! implementation.
//!
//! List queries return the full scoped vector ordered by insertion id;
//! free-text search, sorting and pagination happen in the service layer
//! through the list view-model, never in SQL.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::account::{AccountType, AdsAccount, NewAdsAccount};
use crate::domain::ad::{Ad, NewAd};
use crate::domain::ad_group::{AdGroup, NewAdGroup};
use crate::domain::audience::{Audience, NewAudience};
use crate::domain::campaign::{Campaign, NewCampaign};
use crate::domain::keyword::{Keyword, NewKeyword};
use crate::domain::metrics::{EntityType, MetricTotals, NewMetricRow};
use crate::domain::recommendation::{NewRecommendation, Recommendation, RecommendationStatus};
use crate::domain::types::{
    AccountId, AdGroupId, AdId, AudienceId, CampaignId, CustomerId, DateRange, KeywordId,
    RecommendationId,
};
use crate::repository::errors::RepositoryResult;

pub mod account;
pub mod ad;
pub mod ad_group;
pub mod audience;
pub mod campaign;
pub mod errors;
pub mod keyword;
pub mod metrics;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod recommendation;

/// Diesel-backed repository; cheap to clone, one pooled connection per call.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        self.pool.get().map_err(Into::into)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AccountListQuery {
    pub account_type: Option<AccountType>,
    pub connected: Option<bool>,
}

impl AccountListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account_type(mut self, account_type: AccountType) -> Self {
        self.account_type = Some(account_type);
        self
    }

    pub fn connected(mut self, connected: bool) -> Self {
        self.connected = Some(connected);
        self
    }
}

#[derive(Debug, Clone)]
pub struct CampaignListQuery {
    pub account_id: AccountId,
}

impl CampaignListQuery {
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }
}

#[derive(Debug, Clone)]
pub struct AdGroupListQuery {
    pub campaign_id: CampaignId,
}

impl AdGroupListQuery {
    pub fn new(campaign_id: CampaignId) -> Self {
        Self { campaign_id }
    }
}

#[derive(Debug, Clone)]
pub struct AdListQuery {
    pub ad_group_id: AdGroupId,
}

impl AdListQuery {
    pub fn new(ad_group_id: AdGroupId) -> Self {
        Self { ad_group_id }
    }
}

/// Keywords are listed account-wide; each row carries its ad group name for
/// the two-field search.
#[derive(Debug, Clone)]
pub struct KeywordListQuery {
    pub account_id: AccountId,
}

impl KeywordListQuery {
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }
}

/// Audiences are listed account-wide; each row carries its campaign name.
#[derive(Debug, Clone)]
pub struct AudienceListQuery {
    pub account_id: AccountId,
}

impl AudienceListQuery {
    pub fn new(account_id: AccountId) -> Self {
        Self { account_id }
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationListQuery {
    pub account_id: AccountId,
    pub statuses: Option<Vec<RecommendationStatus>>,
}

impl RecommendationListQuery {
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            statuses: None,
        }
    }

    pub fn status(mut self, status: RecommendationStatus) -> Self {
        self.statuses = Some(vec![status]);
        self
    }

    /// Restricts to any of the given statuses, e.g. applied + failed for the
    /// history view.
    pub fn statuses(mut self, statuses: Vec<RecommendationStatus>) -> Self {
        self.statuses = Some(statuses);
        self
    }
}

pub trait AccountReader {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<AdsAccount>>;
    fn get_account_by_customer_id(
        &self,
        customer_id: &CustomerId,
    ) -> RepositoryResult<Option<AdsAccount>>;
    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<Vec<AdsAccount>>;
}

pub trait AccountWriter {
    fn register_account(&self, new_account: &NewAdsAccount) -> RepositoryResult<AdsAccount>;
    /// Stamps a completed sync: sets `connected` and `last_synced_at`.
    fn mark_account_synced(
        &self,
        id: AccountId,
        synced_at: NaiveDateTime,
    ) -> RepositoryResult<AdsAccount>;
}

pub trait CampaignReader {
    fn get_campaign_by_id(&self, id: CampaignId) -> RepositoryResult<Option<Campaign>>;
    fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<Vec<Campaign>>;
}

pub trait CampaignWriter {
    /// Replaces the account's campaign tree (campaigns and everything under
    /// them, plus their metric rows) with the given set. Returns the inserted
    /// campaigns with their fresh local ids, in input order.
    fn replace_account_campaigns(
        &self,
        account_id: AccountId,
        campaigns: &[NewCampaign],
    ) -> RepositoryResult<Vec<Campaign>>;
}

pub trait AdGroupReader {
    fn get_ad_group_by_id(&self, id: AdGroupId) -> RepositoryResult<Option<AdGroup>>;
    fn list_ad_groups(&self, query: AdGroupListQuery) -> RepositoryResult<Vec<AdGroup>>;
}

pub trait AdGroupWriter {
    fn replace_campaign_ad_groups(
        &self,
        campaign_id: CampaignId,
        ad_groups: &[NewAdGroup],
    ) -> RepositoryResult<Vec<AdGroup>>;
}

pub trait AdReader {
    fn get_ad_by_id(&self, id: AdId) -> RepositoryResult<Option<Ad>>;
    fn list_ads(&self, query: AdListQuery) -> RepositoryResult<Vec<Ad>>;
}

pub trait AdWriter {
    fn replace_ad_group_ads(&self, ad_group_id: AdGroupId, ads: &[NewAd])
    -> RepositoryResult<Vec<Ad>>;
}

pub trait KeywordReader {
    fn get_keyword_by_id(&self, id: KeywordId) -> RepositoryResult<Option<Keyword>>;
    /// Account-wide keyword list; each entry pairs the keyword with its ad
    /// group name.
    fn list_keywords(&self, query: KeywordListQuery)
    -> RepositoryResult<Vec<(Keyword, String)>>;
}

pub trait KeywordWriter {
    fn replace_ad_group_keywords(
        &self,
        ad_group_id: AdGroupId,
        keywords: &[NewKeyword],
    ) -> RepositoryResult<Vec<Keyword>>;
}

pub trait AudienceReader {
    fn get_audience_by_id(&self, id: AudienceId) -> RepositoryResult<Option<Audience>>;
    /// Account-wide audience list; each entry pairs the audience with its
    /// campaign name.
    fn list_audiences(
        &self,
        query: AudienceListQuery,
    ) -> RepositoryResult<Vec<(Audience, String)>>;
}

pub trait AudienceWriter {
    fn replace_campaign_audiences(
        &self,
        campaign_id: CampaignId,
        audiences: &[NewAudience],
    ) -> RepositoryResult<Vec<Audience>>;
}

pub trait MetricsReader {
    fn totals_for_entity(
        &self,
        entity_type: EntityType,
        entity_id: i32,
        range: &DateRange,
    ) -> RepositoryResult<MetricTotals>;
    /// Bulk variant used by list endpoints; entities without rows in the
    /// range are absent from the map.
    fn totals_for_entities(
        &self,
        entity_type: EntityType,
        entity_ids: &[i32],
        range: &DateRange,
    ) -> RepositoryResult<HashMap<i32, MetricTotals>>;
    /// Account-level totals, aggregated over campaign rows of the account.
    fn totals_for_account(
        &self,
        account_id: AccountId,
        range: &DateRange,
    ) -> RepositoryResult<MetricTotals>;
}

pub trait MetricsWriter {
    /// Inserts or refreshes daily rows keyed by (entity type, entity id,
    /// date). Returns the number of rows written.
    fn upsert_metric_rows(&self, rows: &[NewMetricRow]) -> RepositoryResult<usize>;
}

pub trait RecommendationReader {
    fn get_recommendation_by_id(
        &self,
        id: RecommendationId,
    ) -> RepositoryResult<Option<Recommendation>>;
    fn list_recommendations(
        &self,
        query: RecommendationListQuery,
    ) -> RepositoryResult<Vec<Recommendation>>;
}

pub trait RecommendationWriter {
    /// Inserts new recommendations and refreshes the content of known ones
    /// (matched on account + remote id). Never overwrites a locally changed
    /// status or `applied_at`. Returns the number of rows written.
    fn upsert_recommendations(
        &self,
        account_id: AccountId,
        recommendations: &[NewRecommendation],
    ) -> RepositoryResult<usize>;
    fn set_recommendation_status(
        &self,
        id: RecommendationId,
        status: RecommendationStatus,
        applied_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Recommendation>;
}
