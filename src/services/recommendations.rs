//! Recommendations feed, apply/dismiss transitions and history.

use chrono::Utc;

use crate::domain::recommendation::{Recommendation, RecommendationPriority, RecommendationStatus};
use crate::domain::types::{AccountId, RecommendationId};
use crate::dto::recommendations::{
    HistoryEntry, PrioritySummary, RecommendationCard, RecommendationFeed,
};
use crate::listview::{ListConfig, ListState, PageView, select_page};
use crate::repository::{
    AccountReader, RecommendationListQuery, RecommendationReader, RecommendationWriter,
};
use crate::services::{ServiceError, ServiceResult};

/// The history modal shows 8 entries per page and has no search box.
pub const HISTORY_LIST: ListConfig = ListConfig {
    searchable_fields: &[],
    page_size: 8,
};

const fn priority_rank(priority: RecommendationPriority) -> u8 {
    match priority {
        RecommendationPriority::High => 0,
        RecommendationPriority::Medium => 1,
        RecommendationPriority::Low => 2,
    }
}

/// The feed defaults to pending cards; an explicit status filter overrides
/// that. Cards order by priority, ties keep insertion order, and the counts
/// summarize what the feed returned.
pub fn recommendation_feed<R>(
    repo: &R,
    account_id: AccountId,
    status: Option<RecommendationStatus>,
) -> ServiceResult<RecommendationFeed>
where
    R: AccountReader + RecommendationReader + ?Sized,
{
    if repo.get_account_by_id(account_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let query = RecommendationListQuery::new(account_id)
        .status(status.unwrap_or(RecommendationStatus::Pending));
    let mut recommendations = repo.list_recommendations(query)?;
    recommendations.sort_by_key(|recommendation| priority_rank(recommendation.priority));

    let recommendations: Vec<RecommendationCard> =
        recommendations.into_iter().map(Into::into).collect();
    let priority_summary = PrioritySummary::count(&recommendations);

    Ok(RecommendationFeed {
        recommendations,
        priority_summary,
    })
}

pub fn apply_recommendation<R>(repo: &R, id: RecommendationId) -> ServiceResult<Recommendation>
where
    R: RecommendationReader + RecommendationWriter + ?Sized,
{
    transition(repo, id, RecommendationStatus::Applied)
}

pub fn dismiss_recommendation<R>(repo: &R, id: RecommendationId) -> ServiceResult<Recommendation>
where
    R: RecommendationReader + RecommendationWriter + ?Sized,
{
    transition(repo, id, RecommendationStatus::Dismissed)
}

fn transition<R>(
    repo: &R,
    id: RecommendationId,
    next: RecommendationStatus,
) -> ServiceResult<Recommendation>
where
    R: RecommendationReader + RecommendationWriter + ?Sized,
{
    let recommendation = repo
        .get_recommendation_by_id(id)?
        .ok_or(ServiceError::NotFound)?;

    if !recommendation.status.can_transition_to(next) {
        return Err(ServiceError::Conflict(format!(
            "recommendation {} is {}, only pending ones can be {}",
            id, recommendation.status, next
        )));
    }

    let applied_at = match next {
        RecommendationStatus::Applied => Some(Utc::now().naive_utc()),
        _ => recommendation.applied_at,
    };
    repo.set_recommendation_status(id, next, applied_at)
        .map_err(ServiceError::from)
}

/// Applied and failed recommendations, newest first, 8 per page.
pub fn recommendation_history<R>(
    repo: &R,
    account_id: AccountId,
    page: usize,
) -> ServiceResult<PageView<HistoryEntry>>
where
    R: AccountReader + RecommendationReader + ?Sized,
{
    if repo.get_account_by_id(account_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let query = RecommendationListQuery::new(account_id).statuses(vec![
        RecommendationStatus::Applied,
        RecommendationStatus::Failed,
    ]);
    let recommendations = repo.list_recommendations(query)?;

    let mut entries: Vec<HistoryEntry> = recommendations.into_iter().map(Into::into).collect();
    // Newest first; entries that never got a timestamp sink to the end.
    entries.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));

    let mut state = ListState::default();
    state.set_page(page);
    Ok(select_page(entries, &state, &HISTORY_LIST))
}
