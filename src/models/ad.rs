//! Diesel models for ads.

use diesel::prelude::*;

use crate::domain::ad::{Ad as DomainAd, NewAd as DomainNewAd};
use crate::domain::types::TypeConstraintError;
use crate::models::ad_group::AdGroup;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(AdGroup, foreign_key = ad_group_id))]
#[diesel(table_name = crate::schema::ads)]
/// Diesel model for [`crate::domain::ad::Ad`].
pub struct Ad {
    pub id: i32,
    pub ad_group_id: i32,
    pub remote_id: i64,
    pub headline: String,
    pub headline2: String,
    pub description: String,
    pub final_url: String,
    pub status: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ads)]
/// Insertable form of [`Ad`].
pub struct NewAd<'a> {
    pub ad_group_id: i32,
    pub remote_id: i64,
    pub headline: &'a str,
    pub headline2: &'a str,
    pub description: &'a str,
    pub final_url: &'a str,
    pub status: &'a str,
}

impl<'a> NewAd<'a> {
    /// Binds a domain payload to its parent ad group row.
    pub fn from_domain(ad_group_id: i32, ad: &'a DomainNewAd) -> Self {
        Self {
            ad_group_id,
            remote_id: ad.remote_id,
            headline: &ad.headline,
            headline2: &ad.headline2,
            description: &ad.description,
            final_url: ad.final_url.as_str(),
            status: ad.status.as_str(),
        }
    }
}

impl TryFrom<Ad> for DomainAd {
    type Error = TypeConstraintError;

    fn try_from(ad: Ad) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ad.id,
            ad_group_id: ad.ad_group_id,
            remote_id: ad.remote_id,
            headline: ad.headline,
            headline2: ad.headline2,
            description: ad.description,
            final_url: ad.final_url,
            status: ad.status.parse()?,
        })
    }
}
