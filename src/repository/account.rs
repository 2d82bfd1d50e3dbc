//! Repository implementation for linked ads accounts.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::account::AdsAccount;
use crate::domain::account::NewAdsAccount;
use crate::domain::types::{AccountId, CustomerId};
use crate::models::account::{AdsAccount as DbAdsAccount, NewAdsAccount as DbNewAdsAccount};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{AccountListQuery, AccountReader, AccountWriter, DieselRepository};

impl AccountReader for DieselRepository {
    fn get_account_by_id(&self, id: AccountId) -> RepositoryResult<Option<AdsAccount>> {
        use crate::schema::ads_accounts;

        let mut conn = self.conn()?;
        let db_account = ads_accounts::table
            .filter(ads_accounts::id.eq(id.get()))
            .first::<DbAdsAccount>(&mut conn)
            .optional()?;

        match db_account {
            Some(db_account) => Ok(Some(
                AdsAccount::try_from(db_account).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn get_account_by_customer_id(
        &self,
        customer_id: &CustomerId,
    ) -> RepositoryResult<Option<AdsAccount>> {
        use crate::schema::ads_accounts;

        let mut conn = self.conn()?;
        let db_account = ads_accounts::table
            .filter(ads_accounts::customer_id.eq(customer_id.as_str()))
            .first::<DbAdsAccount>(&mut conn)
            .optional()?;

        match db_account {
            Some(db_account) => Ok(Some(
                AdsAccount::try_from(db_account).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_accounts(&self, query: AccountListQuery) -> RepositoryResult<Vec<AdsAccount>> {
        use crate::schema::ads_accounts;

        let mut conn = self.conn()?;
        let mut stmt = ads_accounts::table
            .order(ads_accounts::id.asc())
            .into_boxed();

        if let Some(account_type) = query.account_type {
            stmt = stmt.filter(ads_accounts::account_type.eq(account_type.as_str()));
        }
        if let Some(connected) = query.connected {
            stmt = stmt.filter(ads_accounts::connected.eq(connected));
        }

        let db_accounts = stmt.load::<DbAdsAccount>(&mut conn)?;
        db_accounts
            .into_iter()
            .map(|db_account| AdsAccount::try_from(db_account).map_err(RepositoryError::from))
            .collect()
    }
}

impl AccountWriter for DieselRepository {
    fn register_account(&self, new_account: &NewAdsAccount) -> RepositoryResult<AdsAccount> {
        use crate::schema::ads_accounts;

        let mut conn = self.conn()?;
        let db_new_account: DbNewAdsAccount = new_account.into();

        let db_account = diesel::insert_into(ads_accounts::table)
            .values(&db_new_account)
            .get_result::<DbAdsAccount>(&mut conn)?;

        AdsAccount::try_from(db_account).map_err(RepositoryError::from)
    }

    fn mark_account_synced(
        &self,
        id: AccountId,
        synced_at: NaiveDateTime,
    ) -> RepositoryResult<AdsAccount> {
        use crate::schema::ads_accounts;

        let mut conn = self.conn()?;
        let db_account = diesel::update(ads_accounts::table.filter(ads_accounts::id.eq(id.get())))
            .set((
                ads_accounts::connected.eq(true),
                ads_accounts::last_synced_at.eq(Some(synced_at)),
            ))
            .get_result::<DbAdsAccount>(&mut conn)?;

        AdsAccount::try_from(db_account).map_err(RepositoryError::from)
    }
}
