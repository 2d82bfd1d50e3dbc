use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Deserialize;

use crate::domain::recommendation::RecommendationStatus;
use crate::domain::types::{AccountId, RecommendationId};
use crate::repository::DieselRepository;
use crate::routes::{error_response, not_found};
use crate::services;

#[derive(Debug, Deserialize)]
struct FeedParams {
    status: Option<RecommendationStatus>,
}

#[derive(Debug, Deserialize)]
struct HistoryParams {
    page: Option<usize>,
}

#[get("/accounts/{account_id}/recommendations")]
pub async fn recommendation_feed(
    path: web::Path<i32>,
    params: web::Query<FeedParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(account_id) = AccountId::new(path.into_inner()) else {
        return not_found();
    };

    match services::recommendations::recommendation_feed(repo.get_ref(), account_id, params.status)
    {
        Ok(feed) => HttpResponse::Ok().json(feed),
        Err(err) => error_response(err),
    }
}

#[post("/recommendations/{recommendation_id}/apply")]
pub async fn apply_recommendation(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(recommendation_id) = RecommendationId::new(path.into_inner()) else {
        return not_found();
    };

    match services::recommendations::apply_recommendation(repo.get_ref(), recommendation_id) {
        Ok(recommendation) => HttpResponse::Ok().json(recommendation),
        Err(err) => error_response(err),
    }
}

#[post("/recommendations/{recommendation_id}/dismiss")]
pub async fn dismiss_recommendation(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(recommendation_id) = RecommendationId::new(path.into_inner()) else {
        return not_found();
    };

    match services::recommendations::dismiss_recommendation(repo.get_ref(), recommendation_id) {
        Ok(recommendation) => HttpResponse::Ok().json(recommendation),
        Err(err) => error_response(err),
    }
}

#[get("/accounts/{account_id}/recommendations/history")]
pub async fn recommendation_history(
    path: web::Path<i32>,
    params: web::Query<HistoryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let Ok(account_id) = AccountId::new(path.into_inner()) else {
        return not_found();
    };

    match services::recommendations::recommendation_history(
        repo.get_ref(),
        account_id,
        params.page.unwrap_or(1),
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}
