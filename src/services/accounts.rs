//! Account linking and lookup.

use crate::domain::account::{AdsAccount, NewAdsAccount};
use crate::domain::types::AccountId;
use crate::repository::{AccountListQuery, AccountReader, AccountWriter};
use crate::services::{ServiceError, ServiceResult};

pub fn list_accounts<R>(repo: &R, query: AccountListQuery) -> ServiceResult<Vec<AdsAccount>>
where
    R: AccountReader + ?Sized,
{
    repo.list_accounts(query).map_err(ServiceError::from)
}

pub fn get_account<R>(repo: &R, account_id: AccountId) -> ServiceResult<AdsAccount>
where
    R: AccountReader + ?Sized,
{
    repo.get_account_by_id(account_id)?
        .ok_or(ServiceError::NotFound)
}

/// Links a new ads account. The customer id is unique across the instance;
/// linking the same account twice is a conflict, not an upsert.
pub fn register_account<R>(repo: &R, new_account: &NewAdsAccount) -> ServiceResult<AdsAccount>
where
    R: AccountReader + AccountWriter + ?Sized,
{
    if repo
        .get_account_by_customer_id(&new_account.customer_id)?
        .is_some()
    {
        return Err(ServiceError::Conflict(format!(
            "account {} is already linked",
            new_account.customer_id
        )));
    }

    repo.register_account(new_account)
        .map_err(ServiceError::from)
}

#[cfg(test)]
#[cfg(feature = "test-mocks")]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::account::AccountType;
    use crate::domain::types::{AccountName, CustomerId};
    use crate::repository::mock::MockRepository;

    fn account(id: i32, customer_id: &str) -> AdsAccount {
        AdsAccount {
            id,
            customer_id: customer_id.to_string(),
            name: "Acme".to_string(),
            account_type: AccountType::Standard,
            parent_customer_id: None,
            connected: false,
            last_synced_at: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn register_rejects_duplicate_customer_id() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_customer_id()
            .returning(|_| Ok(Some(account(1, "123-456-7890"))));

        let new_account = NewAdsAccount::new(
            CustomerId::new("123-456-7890").unwrap(),
            AccountName::new("Acme").unwrap(),
            AccountType::Standard,
            None,
        );
        let err = register_account(&repo, &new_account).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn register_inserts_when_unlinked() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_customer_id()
            .returning(|_| Ok(None));
        repo.expect_register_account()
            .returning(|_| Ok(account(5, "123-456-7890")));

        let new_account = NewAdsAccount::new(
            CustomerId::new("123-456-7890").unwrap(),
            AccountName::new("Acme").unwrap(),
            AccountType::Standard,
            None,
        );
        let linked = register_account(&repo, &new_account).unwrap();
        assert_eq!(linked.id, 5);
        assert!(!linked.connected);
    }

    #[test]
    fn get_account_maps_absence_to_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_account_by_id().returning(|_| Ok(None));

        let err = get_account(&repo, AccountId::new(9).unwrap()).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }
}
