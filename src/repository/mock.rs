//! Mock repository implementations for isolating services in tests.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::account::{AdsAccount, NewAdsAccount};
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
use crate::repository::{
    AccountListQuery, AccountReader, AccountWriter, AdGroupListQuery, AdGroupReader,
    AdGroupWriter, AdListQuery, AdReader, AdWriter, AudienceListQuery, AudienceReader,
    AudienceWriter, CampaignListQuery, CampaignReader, CampaignWriter, KeywordListQuery,
    KeywordReader, KeywordWriter, MetricsReader, MetricsWriter, RecommendationListQuery,
    RecommendationReader, RecommendationWriter,
};

mock! {
    pub Repository {}

    impl AccountReader for Repository {
        fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<AdsAccount>>;
        fn get_account_by_customer_id(
            &self,
            customer_id: &CustomerId,
        ) -> RepositoryResult<Option<AdsAccount>>;
        fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<Vec<AdsAccount>>;
    }

    impl AccountWriter for Repository {
        fn register_account(&self, new_account: &NewAdsAccount) -> RepositoryResult<AdsAccount>;
        fn mark_account_synced(
            &self,
            id: AccountId,
            synced_at: NaiveDateTime,
        ) -> RepositoryResult<AdsAccount>;
    }

    impl CampaignReader for Repository {
        fn get_campaign_by_id(&self, id: CampaignId) -> RepositoryResult<Option<Campaign>>;
        fn list_campaigns(&self, query: CampaignListQuery) -> RepositoryResult<Vec<Campaign>>;
    }

    impl CampaignWriter for Repository {
        fn replace_account_campaigns(
            &self,
            account_id: AccountId,
            campaigns: &[NewCampaign],
        ) -> RepositoryResult<Vec<Campaign>>;
    }

    impl AdGroupReader for Repository {
        fn get_ad_group_by_id(&self, id: AdGroupId) -> RepositoryResult<Option<AdGroup>>;
        fn list_ad_groups(&self, query: AdGroupListQuery) -> RepositoryResult<Vec<AdGroup>>;
    }

    impl AdGroupWriter for Repository {
        fn replace_campaign_ad_groups(
            &self,
            campaign_id: CampaignId,
            ad_groups: &[NewAdGroup],
        ) -> RepositoryResult<Vec<AdGroup>>;
    }

    impl AdReader for Repository {
        fn get_ad_by_id(&self, id: AdId) -> RepositoryResult<Option<Ad>>;
        fn list_ads(&self, query: AdListQuery) -> RepositoryResult<Vec<Ad>>;
    }

    impl AdWriter for Repository {
        fn replace_ad_group_ads(
            &self,
            ad_group_id: AdGroupId,
            ads: &[NewAd],
        ) -> RepositoryResult<Vec<Ad>>;
    }

    impl KeywordReader for Repository {
        fn get_keyword_by_id(&self, id: KeywordId) -> RepositoryResult<Option<Keyword>>;
        fn list_keywords(
            &self,
            query: KeywordListQuery,
        ) -> RepositoryResult<Vec<(Keyword, String)>>;
    }

    impl KeywordWriter for Repository {
        fn replace_ad_group_keywords(
            &self,
            ad_group_id: AdGroupId,
            keywords: &[NewKeyword],
        ) -> RepositoryResult<Vec<Keyword>>;
    }

    impl AudienceReader for Repository {
        fn get_audience_by_id(&self, id: AudienceId) -> RepositoryResult<Option<Audience>>;
        fn list_audiences(
            &self,
            query: AudienceListQuery,
        ) -> RepositoryResult<Vec<(Audience, String)>>;
    }

    impl AudienceWriter for Repository {
        fn replace_campaign_audiences(
            &self,
            campaign_id: CampaignId,
            audiences: &[NewAudience],
        ) -> RepositoryResult<Vec<Audience>>;
    }

    impl MetricsReader for Repository {
        fn totals_for_entity(
            &self,
            entity_type: EntityType,
            entity_id: i32,
            range: &DateRange,
        ) -> RepositoryResult<MetricTotals>;
        fn totals_for_entities(
            &self,
            entity_type: EntityType,
            entity_ids: &[i32],
            range: &DateRange,
        ) -> RepositoryResult<HashMap<i32, MetricTotals>>;
        fn totals_for_account(
            &self,
            account_id: AccountId,
            range: &DateRange,
        ) -> RepositoryResult<MetricTotals>;
    }

    impl MetricsWriter for Repository {
        fn upsert_metric_rows(&self, rows: &[NewMetricRow]) -> RepositoryResult<usize>;
    }

    impl RecommendationReader for Repository {
        fn get_recommendation_by_id(
            &self,
            id: RecommendationId,
        ) -> RepositoryResult<Option<Recommendation>>;
        fn list_recommendations(
            &self,
            query: RecommendationListQuery,
        ) -> RepositoryResult<Vec<Recommendation>>;
    }

    impl RecommendationWriter for Repository {
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
}
