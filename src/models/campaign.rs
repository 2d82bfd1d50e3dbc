//! Diesel models for campaigns.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::campaign::{Campaign as DomainCampaign, NewCampaign as DomainNewCampaign};
use crate::domain::types::TypeConstraintError;
use crate::models::account::AdsAccount;

#[derive(Debug, Clone, Identifiable, Queryable, Associations)]
#[diesel(belongs_to(AdsAccount, foreign_key = account_id))]
#[diesel(table_name = crate::schema::campaigns)]
/// Diesel model for [`crate::domain::campaign::Campaign`].
pub struct Campaign {
    pub id: i32,
    pub account_id: i32,
    pub remote_id: i64,
    pub name: String,
    pub campaign_type: String,
    pub status: String,
    pub daily_budget_micros: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::campaigns)]
/// Insertable form of [`Campaign`].
pub struct NewCampaign<'a> {
    pub account_id: i32,
    pub remote_id: i64,
    pub name: &'a str,
    pub campaign_type: &'a str,
    pub status: &'a str,
    pub daily_budget_micros: i64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl<'a> NewCampaign<'a> {
    /// Binds a domain payload to its parent account row.
    pub fn from_domain(account_id: i32, campaign: &'a DomainNewCampaign) -> Self {
        Self {
            account_id,
            remote_id: campaign.remote_id,
            name: &campaign.name,
            campaign_type: campaign.campaign_type.as_str(),
            status: campaign.status.as_str(),
            daily_budget_micros: campaign.daily_budget_micros,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
        }
    }
}

impl TryFrom<Campaign> for DomainCampaign {
    type Error = TypeConstraintError;

    fn try_from(campaign: Campaign) -> Result<Self, Self::Error> {
        Ok(Self {
            id: campaign.id,
            account_id: campaign.account_id,
            remote_id: campaign.remote_id,
            name: campaign.name,
            campaign_type: campaign.campaign_type.parse()?,
            status: campaign.status.parse()?,
            daily_budget_micros: campaign.daily_budget_micros,
            start_date: campaign.start_date,
            end_date: campaign.end_date,
        })
    }
}
