use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;
use validator::Validate;

use crate::domain::account::{AccountType, NewAdsAccount};
use crate::domain::types::AccountId;
use crate::forms::FormError;
use crate::forms::accounts::RegisterAccountForm;
use crate::models::config::ServerConfig;
use crate::repository::{AccountListQuery, DieselRepository};
use crate::routes::{RangeParams, error_response, not_found};
use crate::services;
use crate::services::metrics::SummaryCache;
use crate::sync::json_file::JsonFileSource;

#[derive(Debug, Deserialize)]
struct AccountFilterParams {
    account_type: Option<AccountType>,
    connected: Option<bool>,
}

#[get("/accounts")]
pub async fn list_accounts(
    params: web::Query<AccountFilterParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let mut query = AccountListQuery::new();
    if let Some(account_type) = params.account_type {
        query = query.account_type(account_type);
    }
    if let Some(connected) = params.connected {
        query = query.connected(connected);
    }

    match services::accounts::list_accounts(repo.get_ref(), query) {
        Ok(accounts) => HttpResponse::Ok().json(accounts),
        Err(err) => error_response(err),
    }
}

#[post("/accounts")]
pub async fn register_account(
    form: web::Json<RegisterAccountForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(err) = form.validate() {
        return error_response(FormError::from(err).into());
    }
    let new_account = match NewAdsAccount::try_from(&*form) {
        Ok(new_account) => new_account,
        Err(err) => return error_response(err.into()),
    };

    match services::accounts::register_account(repo.get_ref(), &new_account) {
        Ok(account) => HttpResponse::Created().json(account),
        Err(err) => error_response(err),
    }
}

#[get("/accounts/{account_id}")]
pub async fn get_account(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(account_id) = AccountId::new(path.into_inner()) else {
        return not_found();
    };

    match services::accounts::get_account(repo.get_ref(), account_id) {
        Ok(account) => HttpResponse::Ok().json(account),
        Err(err) => error_response(err),
    }
}

#[post("/accounts/{account_id}/sync")]
pub async fn sync_account(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    source: web::Data<JsonFileSource>,
    cache: web::Data<SummaryCache>,
) -> impl Responder {
    let Ok(account_id) = AccountId::new(path.into_inner()) else {
        return not_found();
    };

    match services::sync::sync_account(
        repo.get_ref(),
        source.get_ref(),
        cache.get_ref(),
        account_id,
    ) {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(err) => error_response(err),
    }
}

#[get("/accounts/{account_id}/summary")]
pub async fn account_summary(
    path: web::Path<i32>,
    params: web::Query<RangeParams>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<SummaryCache>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Ok(account_id) = AccountId::new(path.into_inner()) else {
        return not_found();
    };
    let range = match params.date_range() {
        Ok(range) => range,
        Err(err) => return error_response(err),
    };

    match services::metrics::account_summary(
        repo.get_ref(),
        cache.get_ref(),
        Duration::from_secs(server_config.summary_cache_ttl_secs),
        account_id,
        &range,
        server_config.metrics_policy,
    ) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(err) => error_response(err),
    }
}
