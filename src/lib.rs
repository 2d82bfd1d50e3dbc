use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};

use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::accounts::{
    account_summary, get_account, list_accounts, register_account, sync_account,
};
use crate::routes::audiences::list_audiences;
use crate::routes::campaigns::{list_ad_groups, list_ads, list_campaigns};
use crate::routes::keywords::list_keywords;
use crate::routes::recommendations::{
    apply_recommendation, dismiss_recommendation, recommendation_feed, recommendation_history,
};
use crate::services::metrics::SummaryCache;
use crate::sync::json_file::JsonFileSource;

pub mod cache;
pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod listview;
pub mod models;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod sync;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);
    // Shared across workers; clones see the same entries.
    let summary_cache = SummaryCache::new();
    let snapshot_source = JsonFileSource::new(server_config.snapshot_dir.clone());

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api/v1")
                    .service(list_accounts)
                    .service(register_account)
                    .service(get_account)
                    .service(sync_account)
                    .service(account_summary)
                    .service(list_campaigns)
                    .service(list_ad_groups)
                    .service(list_ads)
                    .service(list_keywords)
                    .service(list_audiences)
                    .service(recommendation_feed)
                    .service(recommendation_history)
                    .service(apply_recommendation)
                    .service(dismiss_recommendation),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(summary_cache.clone()))
            .app_data(web::Data::new(snapshot_source.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
