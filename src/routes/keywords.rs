use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::types::AccountId;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{ListParams, error_response, not_found};
use crate::services;

#[get("/accounts/{account_id}/keywords")]
pub async fn list_keywords(
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

    match services::keywords::list_keyword_rows(
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
