use serde::Deserialize;
use validator::Validate;

use crate::domain::account::{AccountType, NewAdsAccount};
use crate::domain::types::{AccountName, CustomerId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// JSON payload linking a Google Ads account to the dashboard.
pub struct RegisterAccountForm {
    /// Customer id, `123-456-7890` or bare digits.
    #[validate(length(min = 10, max = 20))]
    pub customer_id: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Defaults to a standard account when omitted.
    #[serde(default)]
    pub account_type: Option<AccountType>,
    /// Customer id of the managing MCC account, if any.
    #[serde(default)]
    pub parent_customer_id: Option<String>,
}

impl TryFrom<&RegisterAccountForm> for NewAdsAccount {
    type Error = FormError;

    fn try_from(form: &RegisterAccountForm) -> Result<Self, Self::Error> {
        let customer_id = CustomerId::new(form.customer_id.as_str())
            .map_err(|_| FormError::InvalidCustomerId)?;
        let name = AccountName::new(form.name.as_str()).map_err(|_| FormError::InvalidName)?;
        let parent_customer_id = match form.parent_customer_id.as_deref() {
            Some(parent) => Some(
                CustomerId::new(parent).map_err(|_| FormError::InvalidParentCustomerId)?,
            ),
            None => None,
        };

        Ok(NewAdsAccount::new(
            customer_id,
            name,
            form.account_type.unwrap_or(AccountType::Standard),
            parent_customer_id,
        ))
    }
}
