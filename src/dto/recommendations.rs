//! Payloads for the recommendations feed and history views.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::metrics::EntityType;
use crate::domain::recommendation::{
    Recommendation, RecommendationDetail, RecommendationPriority, RecommendationResult,
    RecommendationStatus,
};
use crate::listview::{FieldValue, ListRow};

/// One card in the recommendations panel.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationCard {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: RecommendationPriority,
    pub estimated_impact: Option<String>,
    pub entity_type: Option<EntityType>,
    pub entity_name: Option<String>,
    pub status: RecommendationStatus,
    pub created_at: NaiveDateTime,
    pub detail: Option<RecommendationDetail>,
}

impl From<Recommendation> for RecommendationCard {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            id: recommendation.id,
            title: recommendation.title,
            description: recommendation.description,
            category: recommendation.category,
            priority: recommendation.priority,
            estimated_impact: recommendation.estimated_impact,
            entity_type: recommendation.entity_type,
            entity_name: recommendation.entity_name,
            status: recommendation.status,
            created_at: recommendation.created_at,
            detail: recommendation.detail,
        }
    }
}

/// Card counts per priority shown above the feed.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct PrioritySummary {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl PrioritySummary {
    pub fn count<'a, I: IntoIterator<Item = &'a RecommendationCard>>(cards: I) -> Self {
        let mut summary = Self::default();
        for card in cards {
            match card.priority {
                RecommendationPriority::High => summary.high += 1,
                RecommendationPriority::Medium => summary.medium += 1,
                RecommendationPriority::Low => summary.low += 1,
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationFeed {
    pub recommendations: Vec<RecommendationCard>,
    pub priority_summary: PrioritySummary,
}

/// One applied or failed recommendation with its measured outcome.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryEntry {
    pub id: i32,
    pub title: String,
    pub category: String,
    pub priority: RecommendationPriority,
    pub status: RecommendationStatus,
    pub applied_at: Option<NaiveDateTime>,
    pub result: Option<RecommendationResult>,
}

impl From<Recommendation> for HistoryEntry {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            id: recommendation.id,
            title: recommendation.title,
            category: recommendation.category,
            priority: recommendation.priority,
            status: recommendation.status,
            applied_at: recommendation.applied_at,
            result: recommendation.result,
        }
    }
}

impl ListRow for HistoryEntry {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "title" => Some(FieldValue::text(&self.title)),
            "applied_at" => self
                .applied_at
                .map(|at| FieldValue::Number(at.and_utc().timestamp() as f64)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(priority: RecommendationPriority) -> RecommendationCard {
        RecommendationCard {
            id: 1,
            title: "Raise budget".to_string(),
            description: "Budget limited".to_string(),
            category: "budget".to_string(),
            priority,
            estimated_impact: None,
            entity_type: None,
            entity_name: None,
            status: RecommendationStatus::Pending,
            created_at: NaiveDateTime::default(),
            detail: None,
        }
    }

    #[test]
    fn priority_summary_counts_each_bucket() {
        let cards = vec![
            card(RecommendationPriority::High),
            card(RecommendationPriority::High),
            card(RecommendationPriority::Low),
        ];
        let summary = PrioritySummary::count(&cards);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.medium, 0);
        assert_eq!(summary.low, 1);
    }
}
