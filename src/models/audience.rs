//! Diesel models for audience segments.

use diesel::prelude::*;

use crate::domain::audience::{Audience as DomainAudience, NewAudience as DomainNewAudience};
use crate::domain::types::TypeConstraintError;
use crate::models::campaign::Campaign;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Campaign, foreign_key = campaign_id))]
#[diesel(table_name = crate::schema::audiences)]
/// Diesel model for [`crate::domain::audience::Audience`].
pub struct Audience {
    pub id: i32,
    pub campaign_id: i32,
    pub remote_id: i64,
    pub name: String,
    pub audience_type: String,
    pub targeting_mode: String,
    pub status: String,
    pub bid_adjustment_percent: i32,
    pub size_range: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::audiences)]
/// Insertable form of [`Audience`].
pub struct NewAudience<'a> {
    pub campaign_id: i32,
    pub remote_id: i64,
    pub name: &'a str,
    pub audience_type: &'a str,
    pub targeting_mode: &'a str,
    pub status: &'a str,
    pub bid_adjustment_percent: i32,
    pub size_range: &'a str,
}

impl<'a> NewAudience<'a> {
    /// Binds a domain payload to its parent campaign row.
    pub fn from_domain(campaign_id: i32, audience: &'a DomainNewAudience) -> Self {
        Self {
            campaign_id,
            remote_id: audience.remote_id,
            name: &audience.name,
            audience_type: audience.audience_type.as_str(),
            targeting_mode: audience.targeting_mode.as_str(),
            status: audience.status.as_str(),
            bid_adjustment_percent: audience.bid_adjustment_percent,
            size_range: &audience.size_range,
        }
    }
}

impl TryFrom<Audience> for DomainAudience {
    type Error = TypeConstraintError;

    fn try_from(audience: Audience) -> Result<Self, Self::Error> {
        Ok(Self {
            id: audience.id,
            campaign_id: audience.campaign_id,
            remote_id: audience.remote_id,
            name: audience.name,
            audience_type: audience.audience_type.parse()?,
            targeting_mode: audience.targeting_mode.parse()?,
            status: audience.status.parse()?,
            bid_adjustment_percent: audience.bid_adjustment_percent,
            size_range: audience.size_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audience::{AudienceType, TargetingMode};
    use crate::domain::campaign::EntityStatus;

    #[test]
    fn audience_round_trip() {
        let domain_new = DomainNewAudience::new(
            15,
            "Compradores recientes".to_string(),
            AudienceType::Remarketing,
            TargetingMode::Targeting,
            EntityStatus::Enabled,
            25,
            "50K - 100K".to_string(),
        );
        let new = NewAudience::from_domain(2, &domain_new);
        assert_eq!(new.audience_type, "REMARKETING");
        assert_eq!(new.targeting_mode, "TARGETING");

        let db = Audience {
            id: 1,
            campaign_id: 2,
            remote_id: 15,
            name: "Compradores recientes".to_string(),
            audience_type: "REMARKETING".to_string(),
            targeting_mode: "OBSERVATION".to_string(),
            status: "PAUSED".to_string(),
            bid_adjustment_percent: -10,
            size_range: "50K - 100K".to_string(),
        };
        let domain = DomainAudience::try_from(db).expect("valid audience");
        assert_eq!(domain.targeting_mode, TargetingMode::Observation);
        assert_eq!(domain.bid_adjustment_percent, -10);
    }
}
