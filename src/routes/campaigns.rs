use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::types::{AccountId, AdGroupId, CampaignId};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ListParams, error_response, not_found};
use crate::services;

#[get("/accounts/{account_id}/campaigns")]
pub async fn list_campaigns(
    path: web::Path<i32>,
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Ok(account_id) = AccountId::new(path.into_inner()) else {
        return not_found();
    };
    let range = match params.date_range() {
        Ok(range) => range,
        Err(err) => return error_response(err),
    };

    match services::campaigns::list_campaign_rows(
        repo.get_ref(),
        account_id,
        &range,
        server_config.metrics_policy,
        &params.list_state(),
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/campaigns/{campaign_id}/ad-groups")]
pub async fn list_ad_groups(
    path: web::Path<i32>,
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Ok(campaign_id) = CampaignId::new(path.into_inner()) else {
        return not_found();
    };
    let range = match params.date_range() {
        Ok(range) => range,
        Err(err) => return error_response(err),
    };

    match services::campaigns::list_ad_group_rows(
        repo.get_ref(),
        campaign_id,
        &range,
        server_config.metrics_policy,
        &params.list_state(),
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[get("/ad-groups/{ad_group_id}/ads")]
pub async fn list_ads(
    path: web::Path<i32>,
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let Ok(ad_group_id) = AdGroupId::new(path.into_inner()) else {
        return not_found();
    };
    let range = match params.date_range() {
        Ok(range) => range,
        Err(err) => return error_response(err),
    };

    match services::campaigns::list_ad_rows(
        repo.get_ref(),
        ad_group_id,
        &range,
        server_config.metrics_policy,
        &params.list_state(),
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}
