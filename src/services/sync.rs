//! Snapshot-driven account sync.
//!
//! One sync replaces the account's whole campaign tree with the snapshot's
//! content, refreshes metric rows and recommendations, stamps the account
//! and flushes its cached summaries. Remote ids are mapped to fresh local
//! ids level by level, parents before children.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::ad::NewAd;
use crate::domain::ad_group::NewAdGroup;
use crate::domain::audience::NewAudience;
use crate::domain::campaign::NewCampaign;
use crate::domain::keyword::NewKeyword;
use crate::domain::metrics::{EntityType, NewMetricRow};
use crate::domain::recommendation::NewRecommendation;
use crate::domain::types::{AccountId, AdGroupId, CampaignId, CustomerId, FinalUrl};
use crate::dto::sync::SyncReport;
use crate::repository::{
    AccountReader, AccountWriter, AdGroupWriter, AdWriter, AudienceWriter, CampaignWriter,
    KeywordWriter, MetricsWriter, RecommendationWriter,
};
use crate::services::metrics::{SummaryCache, invalidate_account_summaries};
use crate::services::{ServiceError, ServiceResult};
use crate::sync::AdsDataSource;

pub fn sync_account<R, S>(
    repo: &R,
    source: &S,
    cache: &SummaryCache,
    account_id: AccountId,
) -> ServiceResult<SyncReport>
where
    R: AccountReader
        + AccountWriter
        + CampaignWriter
        + AdGroupWriter
        + AdWriter
        + KeywordWriter
        + AudienceWriter
        + MetricsWriter
        + RecommendationWriter
        + ?Sized,
    S: AdsDataSource + ?Sized,
{
    let account = repo
        .get_account_by_id(account_id)?
        .ok_or(ServiceError::NotFound)?;
    let customer_id = CustomerId::new(account.customer_id.as_str())?;

    let sync_id = Uuid::new_v4();
    log::info!(
        "sync {sync_id}: fetching snapshot for account {} ({})",
        account.id,
        customer_id
    );
    let snapshot = source.fetch_snapshot(&customer_id)?;

    let new_campaigns: Vec<NewCampaign> = snapshot
        .campaigns
        .iter()
        .map(|campaign| {
            NewCampaign::new(
                campaign.remote_id,
                campaign.name.clone(),
                campaign.campaign_type,
                campaign.status,
                campaign.daily_budget_micros,
                campaign.start_date,
                campaign.end_date,
            )
        })
        .collect();
    let inserted_campaigns = repo.replace_account_campaigns(account_id, &new_campaigns)?;

    let campaign_ids: HashMap<i64, i32> = inserted_campaigns
        .iter()
        .map(|campaign| (campaign.remote_id, campaign.id))
        .collect();
    let mut ad_group_ids: HashMap<i64, i32> = HashMap::new();
    let mut ad_ids: HashMap<i64, i32> = HashMap::new();
    let mut keyword_ids: HashMap<i64, i32> = HashMap::new();
    let mut audience_ids: HashMap<i64, i32> = HashMap::new();

    let mut ad_group_count = 0usize;
    let mut ad_count = 0usize;
    let mut keyword_count = 0usize;
    let mut audience_count = 0usize;

    for campaign_snapshot in &snapshot.campaigns {
        let Some(&local_campaign_id) = campaign_ids.get(&campaign_snapshot.remote_id) else {
            continue;
        };
        let campaign_id = CampaignId::try_from(local_campaign_id)?;

        let new_ad_groups: Vec<NewAdGroup> = campaign_snapshot
            .ad_groups
            .iter()
            .map(|ad_group| {
                NewAdGroup::new(
                    ad_group.remote_id,
                    ad_group.name.clone(),
                    ad_group.status,
                    ad_group.default_bid_micros,
                )
            })
            .collect();
        let inserted_ad_groups = repo.replace_campaign_ad_groups(campaign_id, &new_ad_groups)?;
        ad_group_count += inserted_ad_groups.len();
        for ad_group in &inserted_ad_groups {
            ad_group_ids.insert(ad_group.remote_id, ad_group.id);
        }

        for ad_group_snapshot in &campaign_snapshot.ad_groups {
            let Some(&local_ad_group_id) = ad_group_ids.get(&ad_group_snapshot.remote_id) else {
                continue;
            };
            let ad_group_id = AdGroupId::try_from(local_ad_group_id)?;

            let new_ads: Vec<NewAd> = ad_group_snapshot
                .ads
                .iter()
                .map(|ad| {
                    let final_url = FinalUrl::new(ad.final_url.as_str()).map_err(|_| {
                        ServiceError::Validation(format!(
                            "ad {}: invalid final url {}",
                            ad.remote_id, ad.final_url
                        ))
                    })?;
                    Ok(NewAd::new(
                        ad.remote_id,
                        ad.headline.clone(),
                        ad.headline2.clone().unwrap_or_default(),
                        ad.description.clone().unwrap_or_default(),
                        final_url,
                        ad.status,
                    ))
                })
                .collect::<ServiceResult<_>>()?;
            let inserted_ads = repo.replace_ad_group_ads(ad_group_id, &new_ads)?;
            ad_count += inserted_ads.len();
            for ad in &inserted_ads {
                ad_ids.insert(ad.remote_id, ad.id);
            }

            let new_keywords: Vec<NewKeyword> = ad_group_snapshot
                .keywords
                .iter()
                .map(|keyword| {
                    NewKeyword::new(
                        keyword.remote_id,
                        keyword.text.clone(),
                        keyword.match_type,
                        keyword.status,
                        keyword.bid_micros,
                        keyword.quality_score,
                        keyword.search_impression_share,
                    )
                })
                .collect();
            let inserted_keywords = repo.replace_ad_group_keywords(ad_group_id, &new_keywords)?;
            keyword_count += inserted_keywords.len();
            for keyword in &inserted_keywords {
                keyword_ids.insert(keyword.remote_id, keyword.id);
            }
        }

        let new_audiences: Vec<NewAudience> = campaign_snapshot
            .audiences
            .iter()
            .map(|audience| {
                NewAudience::new(
                    audience.remote_id,
                    audience.name.clone(),
                    audience.audience_type,
                    audience.targeting_mode,
                    audience.status,
                    audience.bid_adjustment_percent,
                    audience.size_range.clone(),
                )
            })
            .collect();
        let inserted_audiences = repo.replace_campaign_audiences(campaign_id, &new_audiences)?;
        audience_count += inserted_audiences.len();
        for audience in &inserted_audiences {
            audience_ids.insert(audience.remote_id, audience.id);
        }
    }

    let mut new_metric_rows = Vec::with_capacity(snapshot.metrics.len());
    for metric in &snapshot.metrics {
        let local_id = match metric.entity_type {
            EntityType::Campaign => campaign_ids.get(&metric.entity_remote_id),
            EntityType::AdGroup => ad_group_ids.get(&metric.entity_remote_id),
            EntityType::Ad => ad_ids.get(&metric.entity_remote_id),
            EntityType::Keyword => keyword_ids.get(&metric.entity_remote_id),
            EntityType::Audience => audience_ids.get(&metric.entity_remote_id),
        };
        let Some(&entity_id) = local_id else {
            log::warn!(
                "sync {sync_id}: dropping metric row for unknown {} {}",
                metric.entity_type,
                metric.entity_remote_id
            );
            continue;
        };
        new_metric_rows.push(NewMetricRow::new(
            metric.entity_type,
            entity_id,
            metric.date,
            metric.impressions,
            metric.clicks,
            metric.cost_micros,
            metric.conversions,
            metric.reported_ctr,
            metric.reported_avg_cpc_micros,
        ));
    }
    let metric_row_count = repo.upsert_metric_rows(&new_metric_rows)?;

    let mut new_recommendations = Vec::with_capacity(snapshot.recommendations.len());
    for recommendation in &snapshot.recommendations {
        let payload = NewRecommendation::new(
            recommendation.remote_id,
            recommendation.title.clone(),
            recommendation.description.clone(),
            recommendation.category.clone(),
            recommendation.priority,
            recommendation.estimated_impact.clone(),
            recommendation.entity_type,
            recommendation.entity_remote_id,
            recommendation.entity_name.clone(),
            recommendation.status,
            recommendation.applied_at,
            recommendation.detail.clone(),
            recommendation.result.clone(),
        )
        .map_err(|err| {
            ServiceError::Validation(format!(
                "recommendation {}: {err}",
                recommendation.remote_id
            ))
        })?;
        new_recommendations.push(payload);
    }
    let recommendation_count = repo.upsert_recommendations(account_id, &new_recommendations)?;

    let synced_at = Utc::now().naive_utc();
    repo.mark_account_synced(account_id, synced_at)?;
    invalidate_account_summaries(cache, account_id);

    let report = SyncReport {
        sync_id,
        account_id: account_id.get(),
        synced_at,
        campaigns: inserted_campaigns.len(),
        ad_groups: ad_group_count,
        ads: ad_count,
        keywords: keyword_count,
        audiences: audience_count,
        metric_rows: metric_row_count,
        recommendations: recommendation_count,
    };
    log::info!(
        "sync {sync_id}: account {} done, {} campaigns / {} ad groups / {} ads / {} keywords / {} audiences, {} metric rows, {} recommendations",
        report.account_id,
        report.campaigns,
        report.ad_groups,
        report.ads,
        report.keywords,
        report.audiences,
        report.metric_rows,
        report.recommendations
    );
    Ok(report)
}
