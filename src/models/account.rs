//! Diesel models for linked ads accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::account::{
    AdsAccount as DomainAdsAccount, NewAdsAccount as DomainNewAdsAccount,
};
use crate::domain::types::{CustomerId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::ads_accounts)]
/// Diesel model for [`crate::domain::account::AdsAccount`].
pub struct AdsAccount {
    pub id: i32,
    pub customer_id: String,
    pub name: String,
    pub account_type: String,
    pub parent_customer_id: Option<String>,
    pub connected: bool,
    pub last_synced_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ads_accounts)]
/// Insertable form of [`AdsAccount`]. `connected`, `last_synced_at` and
/// `created_at` are left to their column defaults.
pub struct NewAdsAccount<'a> {
    pub customer_id: &'a str,
    pub name: &'a str,
    pub account_type: &'a str,
    pub parent_customer_id: Option<&'a str>,
}

impl TryFrom<AdsAccount> for DomainAdsAccount {
    type Error = TypeConstraintError;

    fn try_from(account: AdsAccount) -> Result<Self, Self::Error> {
        Ok(Self {
            id: account.id,
            customer_id: account.customer_id,
            name: account.name,
            account_type: account.account_type.parse()?,
            parent_customer_id: account.parent_customer_id,
            connected: account.connected,
            last_synced_at: account.last_synced_at,
            created_at: account.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewAdsAccount> for NewAdsAccount<'a> {
    fn from(account: &'a DomainNewAdsAccount) -> Self {
        Self {
            customer_id: account.customer_id.as_str(),
            name: account.name.as_str(),
            account_type: account.account_type.as_str(),
            parent_customer_id: account.parent_customer_id.as_ref().map(CustomerId::as_str),
        }
    }
}
