//! AI-generated optimization recommendations and their lifecycle.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::metrics::EntityType;
use crate::domain::types::{SanitizedText, TypeConstraintError, sanitize_opt};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

impl RecommendationPriority {
    pub const fn as_str(self) -> &'static str {
        match self {
            RecommendationPriority::High => "high",
            RecommendationPriority::Medium => "medium",
            RecommendationPriority::Low => "low",
        }
    }
}

impl Display for RecommendationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecommendationPriority {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(RecommendationPriority::High),
            "medium" => Ok(RecommendationPriority::Medium),
            "low" => Ok(RecommendationPriority::Low),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown priority: {other}"
            ))),
        }
    }
}

/// Lifecycle of a recommendation. `Pending` is the only state a user can act
/// on; `Failed` arrives from the generating backend when an application
/// attempt did not stick.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    Pending,
    Applied,
    Dismissed,
    Failed,
}

impl RecommendationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            RecommendationStatus::Pending => "pending",
            RecommendationStatus::Applied => "applied",
            RecommendationStatus::Dismissed => "dismissed",
            RecommendationStatus::Failed => "failed",
        }
    }

    pub const fn is_pending(self) -> bool {
        matches!(self, RecommendationStatus::Pending)
    }

    /// User-initiated transitions only leave `Pending`.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (
                RecommendationStatus::Pending,
                RecommendationStatus::Applied
                    | RecommendationStatus::Dismissed
                    | RecommendationStatus::Failed
            )
        )
    }
}

impl Display for RecommendationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecommendationStatus {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RecommendationStatus::Pending),
            "applied" => Ok(RecommendationStatus::Applied),
            "dismissed" => Ok(RecommendationStatus::Dismissed),
            "failed" => Ok(RecommendationStatus::Failed),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown recommendation status: {other}"
            ))),
        }
    }
}

/// Outcome of the post-application evaluation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Improved,
    NoChange,
    Worsened,
}

/// Explanation block shown in the recommendation detail modal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendationDetail {
    pub justification: String,
    pub target_kpi: String,
    pub current_value: String,
    pub expected_value: String,
}

impl RecommendationDetail {
    fn sanitized(self) -> Self {
        Self {
            justification: ammonia::clean(&self.justification).trim().to_string(),
            target_kpi: ammonia::clean(&self.target_kpi).trim().to_string(),
            current_value: ammonia::clean(&self.current_value).trim().to_string(),
            expected_value: ammonia::clean(&self.expected_value).trim().to_string(),
        }
    }
}

/// Measured effect of an applied recommendation, shown in the history view.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub outcome: RecommendationOutcome,
    pub actual_improvement: String,
    pub comparison_period: String,
    pub kpi_variation: f64,
}

impl RecommendationResult {
    fn sanitized(self) -> Self {
        Self {
            outcome: self.outcome,
            actual_improvement: ammonia::clean(&self.actual_improvement).trim().to_string(),
            comparison_period: ammonia::clean(&self.comparison_period).trim().to_string(),
            kpi_variation: self.kpi_variation,
        }
    }
}

/// An optimization suggestion for one account. `remote_id` is the id assigned
/// by the generating backend and is what syncs deduplicate on.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub id: i32,
    pub account_id: i32,
    pub remote_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: RecommendationPriority,
    pub estimated_impact: Option<String>,
    pub entity_type: Option<EntityType>,
    /// Google-side id of the targeted entity, stable across syncs.
    pub entity_id: Option<i64>,
    pub entity_name: Option<String>,
    pub status: RecommendationStatus,
    pub applied_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub detail: Option<RecommendationDetail>,
    pub result: Option<RecommendationResult>,
}

/// Sanitized payload for inserting or refreshing a recommendation.
///
/// Every free-text field passed through here originates in the AI layer and
/// is HTML-cleaned before it can reach a browser.
#[derive(Clone, Debug)]
pub struct NewRecommendation {
    pub remote_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: RecommendationPriority,
    pub estimated_impact: Option<String>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<i64>,
    pub entity_name: Option<String>,
    pub status: RecommendationStatus,
    pub applied_at: Option<NaiveDateTime>,
    pub detail: Option<RecommendationDetail>,
    pub result: Option<RecommendationResult>,
}

impl NewRecommendation {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        remote_id: i64,
        title: String,
        description: String,
        category: String,
        priority: RecommendationPriority,
        estimated_impact: Option<String>,
        entity_type: Option<EntityType>,
        entity_id: Option<i64>,
        entity_name: Option<String>,
        status: RecommendationStatus,
        applied_at: Option<NaiveDateTime>,
        detail: Option<RecommendationDetail>,
        result: Option<RecommendationResult>,
    ) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            remote_id,
            title: SanitizedText::new(title)?.into_inner(),
            description: SanitizedText::new(description)?.into_inner(),
            category: SanitizedText::new(category)?.into_inner(),
            priority,
            estimated_impact: sanitize_opt(estimated_impact),
            entity_type,
            entity_id,
            entity_name: sanitize_opt(entity_name),
            status,
            applied_at,
            detail: detail.map(RecommendationDetail::sanitized),
            result: result.map(RecommendationResult::sanitized),
        })
    }
}
