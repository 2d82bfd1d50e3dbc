//! Diesel models for ad groups.

use diesel::prelude::*;

use crate::domain::ad_group::{AdGroup as DomainAdGroup, NewAdGroup as DomainNewAdGroup};
use crate::domain::types::TypeConstraintError;
use crate::models::campaign::Campaign;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(Campaign, foreign_key = campaign_id))]
#[diesel(table_name = crate::schema::ad_groups)]
/// Diesel model for [`crate::domain::ad_group::AdGroup`].
pub struct AdGroup {
    pub id: i32,
    pub campaign_id: i32,
    pub remote_id: i64,
    pub name: String,
    pub status: String,
    pub default_bid_micros: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ad_groups)]
/// Insertable form of [`AdGroup`].
pub struct NewAdGroup<'a> {
    pub campaign_id: i32,
    pub remote_id: i64,
    pub name: &'a str,
    pub status: &'a str,
    pub default_bid_micros: i64,
}

impl<'a> NewAdGroup<'a> {
    /// Binds a domain payload to its parent campaign row.
    pub fn from_domain(campaign_id: i32, ad_group: &'a DomainNewAdGroup) -> Self {
        Self {
            campaign_id,
            remote_id: ad_group.remote_id,
            name: &ad_group.name,
            status: ad_group.status.as_str(),
            default_bid_micros: ad_group.default_bid_micros,
        }
    }
}

impl TryFrom<AdGroup> for DomainAdGroup {
    type Error = TypeConstraintError;

    fn try_from(ad_group: AdGroup) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ad_group.id,
            campaign_id: ad_group.campaign_id,
            remote_id: ad_group.remote_id,
            name: ad_group.name,
            status: ad_group.status.parse()?,
            default_bid_micros: ad_group.default_bid_micros,
        })
    }
}
