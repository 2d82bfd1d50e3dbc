use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccountName, CustomerId, TypeConstraintError};

/// A Google Ads account linked to the dashboard.
///
/// `customer_id` and `parent_customer_id` are stored in normalized
/// `123-456-7890` form; normalization happens in [`NewAdsAccount`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdsAccount {
    pub id: i32,
    pub customer_id: String,
    pub name: String,
    pub account_type: AccountType,
    /// Customer id of the managing MCC account, if any.
    pub parent_customer_id: Option<String>,
    /// Set once the first sync has completed.
    pub connected: bool,
    pub last_synced_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Standard,
    Mcc,
}

impl AccountType {
    pub const fn as_str(self) -> &'static str {
        match self {
            AccountType::Standard => "STANDARD",
            AccountType::Mcc => "MCC",
        }
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STANDARD" => Ok(AccountType::Standard),
            "MCC" => Ok(AccountType::Mcc),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown account type: {other}"
            ))),
        }
    }
}

/// Payload for registering a new account link.
#[derive(Clone, Debug)]
pub struct NewAdsAccount {
    pub customer_id: CustomerId,
    pub name: AccountName,
    pub account_type: AccountType,
    pub parent_customer_id: Option<CustomerId>,
}

impl NewAdsAccount {
    #[must_use]
    pub fn new(
        customer_id: CustomerId,
        name: AccountName,
        account_type: AccountType,
        parent_customer_id: Option<CustomerId>,
    ) -> Self {
        Self {
            customer_id,
            name,
            account_type,
            parent_customer_id,
        }
    }
}
