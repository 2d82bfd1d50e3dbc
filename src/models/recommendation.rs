//! Diesel models for optimization recommendations.
//!
//! The `detail` and `result` blocks are stored as JSON text columns; decoding
//! is lenient so one malformed blob degrades to an absent block instead of
//! failing a whole listing.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::recommendation::{
    NewRecommendation as DomainNewRecommendation, Recommendation as DomainRecommendation,
};
use crate::domain::types::TypeConstraintError;
use crate::models::account::AdsAccount;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(AdsAccount, foreign_key = account_id))]
#[diesel(table_name = crate::schema::recommendations)]
/// Diesel model for [`crate::domain::recommendation::Recommendation`].
pub struct Recommendation {
    pub id: i32,
    pub account_id: i32,
    pub remote_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub estimated_impact: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub entity_name: Option<String>,
    pub status: String,
    pub applied_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub detail: Option<String>,
    pub result: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::recommendations)]
/// Insertable form of [`Recommendation`]. `created_at` is left to its column
/// default.
pub struct NewRecommendation {
    pub account_id: i32,
    pub remote_id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub estimated_impact: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub entity_name: Option<String>,
    pub status: String,
    pub applied_at: Option<NaiveDateTime>,
    pub detail: Option<String>,
    pub result: Option<String>,
}

impl NewRecommendation {
    /// Binds a domain payload to its account row, serializing the JSON
    /// blocks.
    pub fn from_domain(account_id: i32, rec: &DomainNewRecommendation) -> Self {
        Self {
            account_id,
            remote_id: rec.remote_id,
            title: rec.title.clone(),
            description: rec.description.clone(),
            category: rec.category.clone(),
            priority: rec.priority.as_str().to_string(),
            estimated_impact: rec.estimated_impact.clone(),
            entity_type: rec.entity_type.map(|t| t.as_str().to_string()),
            entity_id: rec.entity_id,
            entity_name: rec.entity_name.clone(),
            status: rec.status.as_str().to_string(),
            applied_at: rec.applied_at,
            detail: rec.detail.as_ref().and_then(|d| serde_json::to_string(d).ok()),
            result: rec.result.as_ref().and_then(|r| serde_json::to_string(r).ok()),
        }
    }
}

impl TryFrom<Recommendation> for DomainRecommendation {
    type Error = TypeConstraintError;

    fn try_from(rec: Recommendation) -> Result<Self, Self::Error> {
        let entity_type = match rec.entity_type {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };
        Ok(Self {
            id: rec.id,
            account_id: rec.account_id,
            remote_id: rec.remote_id,
            title: rec.title,
            description: rec.description,
            category: rec.category,
            priority: rec.priority.parse()?,
            estimated_impact: rec.estimated_impact,
            entity_type,
            entity_id: rec.entity_id,
            entity_name: rec.entity_name,
            status: rec.status.parse()?,
            applied_at: rec.applied_at,
            created_at: rec.created_at,
            detail: rec.detail.as_deref().and_then(|d| serde_json::from_str(d).ok()),
            result: rec.result.as_deref().and_then(|r| serde_json::from_str(r).ok()),
        })
    }
}
