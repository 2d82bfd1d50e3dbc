use std::path::Path;

use actix_web::{App, http::StatusCode, test, web};
use chrono::{NaiveDate, Utc};
use serde_json::{Value, json};

use adops_dashboard::domain::account::{AccountType, NewAdsAccount};
use adops_dashboard::domain::campaign::{CampaignType, EntityStatus, NewCampaign};
use adops_dashboard::domain::metrics::{EntityType, MetricsPolicy, NewMetricRow};
use adops_dashboard::domain::recommendation::{
    NewRecommendation, RecommendationPriority, RecommendationStatus,
};
use adops_dashboard::domain::types::{AccountId, AccountName, CustomerId};
use adops_dashboard::models::config::ServerConfig;
use adops_dashboard::repository::{
    AccountWriter, CampaignWriter, DieselRepository, MetricsWriter, RecommendationWriter,
};
use adops_dashboard::routes::accounts::{
    account_summary, get_account, list_accounts, register_account, sync_account,
};
use adops_dashboard::routes::audiences::list_audiences;
use adops_dashboard::routes::campaigns::{list_ad_groups, list_ads, list_campaigns};
use adops_dashboard::routes::keywords::list_keywords;
use adops_dashboard::routes::recommendations::{
    apply_recommendation, dismiss_recommendation, recommendation_feed, recommendation_history,
};
use adops_dashboard::services::metrics::SummaryCache;
use adops_dashboard::sync::json_file::JsonFileSource;

mod common;

fn api(cfg: &mut web::ServiceConfig) {
    cfg.service(
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
    );
}

fn test_config(snapshot_dir: &Path) -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 0,
        database_url: "unused-by-handlers".to_string(),
        snapshot_dir: snapshot_dir.to_string_lossy().into_owned(),
        summary_cache_ttl_secs: 300,
        metrics_policy: MetricsPolicy::ComputeFromRaw,
    }
}

fn seed_account(repo: &DieselRepository, customer_id: &str, name: &str) -> AccountId {
    let account = repo
        .register_account(&NewAdsAccount::new(
            CustomerId::new(customer_id).unwrap(),
            AccountName::new(name).unwrap(),
            AccountType::Standard,
            None,
        ))
        .unwrap();
    AccountId::new(account.id).unwrap()
}

fn seed_campaign(remote_id: i64, name: &str) -> NewCampaign {
    NewCampaign::new(
        remote_id,
        name.into(),
        CampaignType::Search,
        EntityStatus::Enabled,
        25_000_000,
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        None,
    )
}

fn pending_recommendation(
    remote_id: i64,
    title: &str,
    priority: RecommendationPriority,
) -> NewRecommendation {
    NewRecommendation::new(
        remote_id,
        title.into(),
        "Generated for the feed.".into(),
        "budget".into(),
        priority,
        None,
        None,
        None,
        None,
        RecommendationStatus::Pending,
        None,
        None,
        None,
    )
    .unwrap()
}

#[actix_web::test]
async fn accounts_register_fetch_and_validate() {
    let test_db = common::TestDb::new("routes_accounts.db");
    let snapshots = tempfile::tempdir().unwrap();
    let repo = DieselRepository::new(test_db.pool());

    let app = test::init_service(
        App::new()
            .configure(api)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(SummaryCache::new()))
            .app_data(web::Data::new(JsonFileSource::new(snapshots.path())))
            .app_data(web::Data::new(test_config(snapshots.path()))),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/accounts")
            .set_json(json!({ "customer_id": "1234567890", "name": "Acme Search" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["customer_id"], "123-456-7890");
    assert_eq!(created["connected"], false);
    let account_id = created["id"].as_i64().unwrap();

    // same customer id again
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/accounts")
            .set_json(json!({ "customer_id": "123-456-7890", "name": "Acme again" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // too short for a customer id
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/accounts")
            .set_json(json!({ "customer_id": "123", "name": "Acme" }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/accounts/{account_id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["name"], "Acme Search");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/accounts").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed: Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/accounts/999")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/accounts/0")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn sync_imports_the_snapshot_tree() {
    let test_db = common::TestDb::new("routes_sync.db");
    let snapshots = tempfile::tempdir().unwrap();
    let repo = DieselRepository::new(test_db.pool());

    let today = Utc::now().date_naive().to_string();
    let snapshot = json!({
        "customer_id": "111-222-3330",
        "campaigns": [{
            "remote_id": 1001,
            "name": "Search - Brand",
            "campaign_type": "SEARCH",
            "status": "ENABLED",
            "daily_budget_micros": 25_000_000,
            "start_date": "2026-01-01",
            "ad_groups": [
                {
                    "remote_id": 2001,
                    "name": "Brand - Exact",
                    "status": "ENABLED",
                    "default_bid_micros": 1_500_000,
                    "ads": [{
                        "remote_id": 5001,
                        "headline": "Buy Acme Widgets",
                        "description": "The widgets professionals trust.",
                        "final_url": "https://acme.example/widgets",
                        "status": "ENABLED"
                    }],
                    "keywords": [
                        {
                            "remote_id": 4001,
                            "text": "acme widgets",
                            "match_type": "EXACT",
                            "status": "ENABLED",
                            "bid_micros": 900_000,
                            "quality_score": 8
                        },
                        {
                            "remote_id": 4002,
                            "text": "widgets online",
                            "match_type": "PHRASE",
                            "status": "ENABLED",
                            "bid_micros": 700_000
                        }
                    ]
                },
                {
                    "remote_id": 2002,
                    "name": "Brand - Broad",
                    "status": "PAUSED",
                    "default_bid_micros": 1_000_000
                }
            ],
            "audiences": [{
                "remote_id": 3001,
                "name": "Cart abandoners",
                "audience_type": "REMARKETING",
                "targeting_mode": "TARGETING",
                "status": "ENABLED",
                "bid_adjustment_percent": 25,
                "size_range": "10K - 50K"
            }]
        }],
        "metrics": [
            {
                "entity_type": "CAMPAIGN",
                "entity_remote_id": 1001,
                "date": today,
                "impressions": 1_200,
                "clicks": 80,
                "cost_micros": 9_000_000,
                "conversions": 6.0
            },
            {
                "entity_type": "KEYWORD",
                "entity_remote_id": 4001,
                "date": today,
                "impressions": 400,
                "clicks": 30,
                "cost_micros": 3_000_000,
                "conversions": 2.0
            },
            {
                "entity_type": "KEYWORD",
                "entity_remote_id": 9999,
                "date": today,
                "impressions": 1,
                "clicks": 0,
                "cost_micros": 0,
                "conversions": 0.0
            }
        ],
        "recommendations": [
            {
                "remote_id": 9001,
                "title": "Raise budget on Search - Brand",
                "description": "Limited by budget on most days.",
                "category": "budget",
                "priority": "high",
                "entity_type": "CAMPAIGN",
                "entity_remote_id": 1001,
                "entity_name": "Search - Brand"
            },
            {
                "remote_id": 9002,
                "title": "Add responsive search ads",
                "description": "Ad coverage is low.",
                "category": "ads",
                "priority": "medium"
            }
        ]
    });
    std::fs::write(
        snapshots.path().join("111-222-3330.json"),
        serde_json::to_vec(&snapshot).unwrap(),
    )
    .unwrap();

    let app = test::init_service(
        App::new()
            .configure(api)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(SummaryCache::new()))
            .app_data(web::Data::new(JsonFileSource::new(snapshots.path())))
            .app_data(web::Data::new(test_config(snapshots.path()))),
    )
    .await;

    let account_id = seed_account(&repo, "111-222-3330", "Acme Widgets").get();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/accounts/{account_id}/sync"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let report: Value = test::read_body_json(resp).await;
    assert_eq!(report["account_id"], account_id);
    assert!(report["sync_id"].as_str().is_some());
    assert_eq!(report["campaigns"], 1);
    assert_eq!(report["ad_groups"], 2);
    assert_eq!(report["ads"], 1);
    assert_eq!(report["keywords"], 2);
    assert_eq!(report["audiences"], 1);
    // the row addressed at an unknown keyword is dropped
    assert_eq!(report["metric_rows"], 2);
    assert_eq!(report["recommendations"], 2);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/accounts/{account_id}"))
            .to_request(),
    )
    .await;
    let account: Value = test::read_body_json(resp).await;
    assert_eq!(account["connected"], true);
    assert!(account["last_synced_at"].as_str().is_some());

    // the default window covers today, so the imported metrics show up
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/accounts/{account_id}/campaigns"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["total_count"], 1);
    assert_eq!(page["items"][0]["name"], "Search - Brand");
    assert_eq!(page["items"][0]["impressions"], 1_200);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/accounts/{account_id}/keywords"))
            .to_request(),
    )
    .await;
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["total_count"], 2);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/accounts/{account_id}/recommendations"))
            .to_request(),
    )
    .await;
    let feed: Value = test::read_body_json(resp).await;
    assert_eq!(feed["recommendations"].as_array().unwrap().len(), 2);
    assert_eq!(feed["recommendations"][0]["priority"], "high");
    assert_eq!(feed["priority_summary"]["high"], 1);

    // an account without a snapshot file
    let orphan_id = seed_account(&repo, "999-888-7770", "No Export Yet").get();
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/accounts/{orphan_id}/sync"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/accounts/999/sync")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn campaign_list_searches_sorts_and_pages() {
    let test_db = common::TestDb::new("routes_campaign_list.db");
    let snapshots = tempfile::tempdir().unwrap();
    let repo = DieselRepository::new(test_db.pool());
    let account_id = seed_account(&repo, "222-333-4440", "Acme Search");

    let mut new_campaigns = Vec::new();
    for i in 1..=12 {
        let name = match i {
            3 => "Brand awareness".to_string(),
            7 => "Brand push".to_string(),
            _ => format!("Campaign {i:02}"),
        };
        new_campaigns.push(seed_campaign(1000 + i, &name));
    }
    let campaigns = repo
        .replace_account_campaigns(account_id, &new_campaigns)
        .unwrap();

    let date = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
    let rows: Vec<NewMetricRow> = campaigns
        .iter()
        .enumerate()
        .map(|(i, campaign)| {
            NewMetricRow::new(
                EntityType::Campaign,
                campaign.id,
                date,
                1_000,
                (i as i64 + 1) * 10,
                5_000_000,
                1.0,
                None,
                None,
            )
        })
        .collect();
    repo.upsert_metric_rows(&rows).unwrap();

    let app = test::init_service(
        App::new()
            .configure(api)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(SummaryCache::new()))
            .app_data(web::Data::new(JsonFileSource::new(snapshots.path())))
            .app_data(web::Data::new(test_config(snapshots.path()))),
    )
    .await;

    let base = format!("/api/v1/accounts/{}/campaigns", account_id.get());
    let window = "from=2026-07-01&to=2026-07-31";

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?{window}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["page"], 1);
    assert_eq!(page["items"].as_array().unwrap().len(), 10);
    assert_eq!(page["total_count"], 12);
    assert_eq!(page["filtered_count"], 12);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["has_next"], true);
    assert_eq!(page["has_previous"], false);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?{window}&page=2"))
            .to_request(),
    )
    .await;
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["has_previous"], true);

    // past the end clamps to the last page
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?{window}&page=99"))
            .to_request(),
    )
    .await;
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["page"], 2);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?{window}&search=brand"))
            .to_request(),
    )
    .await;
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["filtered_count"], 2);
    assert_eq!(page["total_count"], 12);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?{window}&sort=clicks&dir=desc"))
            .to_request(),
    )
    .await;
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["items"][0]["clicks"], 120);
    assert_eq!(page["items"][1]["clicks"], 110);

    // a window before any metric rows
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?from=2026-06-01&to=2026-06-30"))
            .to_request(),
    )
    .await;
    let page: Value = test::read_body_json(resp).await;
    assert_eq!(page["items"][0]["impressions"], 0);

    // only one bound set
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?from=2026-07-01"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn account_summary_serves_the_cached_window() {
    let test_db = common::TestDb::new("routes_summary.db");
    let snapshots = tempfile::tempdir().unwrap();
    let repo = DieselRepository::new(test_db.pool());
    let account_id = seed_account(&repo, "333-444-5550", "Acme Search");

    let campaigns = repo
        .replace_account_campaigns(account_id, &[seed_campaign(1001, "Search - Brand")])
        .unwrap();
    repo.upsert_metric_rows(&[NewMetricRow::new(
        EntityType::Campaign,
        campaigns[0].id,
        NaiveDate::from_ymd_opt(2026, 7, 5).unwrap(),
        1_000,
        50,
        12_500_000,
        4.0,
        None,
        None,
    )])
    .unwrap();

    let app = test::init_service(
        App::new()
            .configure(api)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(SummaryCache::new()))
            .app_data(web::Data::new(JsonFileSource::new(snapshots.path())))
            .app_data(web::Data::new(test_config(snapshots.path()))),
    )
    .await;

    let base = format!("/api/v1/accounts/{}/summary", account_id.get());

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?from=2026-07-01&to=2026-07-31"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let summary: Value = test::read_body_json(resp).await;
    assert_eq!(summary["from"], "2026-07-01");
    assert_eq!(summary["to"], "2026-07-31");
    assert_eq!(summary["impressions"], 1_000);
    assert_eq!(summary["cost"], 12.5);
    assert_eq!(summary["ctr"], 5.0);

    // new rows are invisible while the window stays cached
    repo.upsert_metric_rows(&[NewMetricRow::new(
        EntityType::Campaign,
        campaigns[0].id,
        NaiveDate::from_ymd_opt(2026, 7, 6).unwrap(),
        500,
        10,
        1_000_000,
        0.0,
        None,
        None,
    )])
    .unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?from=2026-07-01&to=2026-07-31"))
            .to_request(),
    )
    .await;
    let cached: Value = test::read_body_json(resp).await;
    assert_eq!(cached["impressions"], 1_000);

    // a different window misses the cache and sees both rows
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{base}?from=2026-07-01&to=2026-08-01"))
            .to_request(),
    )
    .await;
    let fresh: Value = test::read_body_json(resp).await;
    assert_eq!(fresh["impressions"], 1_500);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/accounts/999/summary")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn recommendation_endpoints_drive_the_lifecycle() {
    let test_db = common::TestDb::new("routes_recommendations.db");
    let snapshots = tempfile::tempdir().unwrap();
    let repo = DieselRepository::new(test_db.pool());
    let account_id = seed_account(&repo, "444-555-6660", "Acme Search");

    repo.upsert_recommendations(
        account_id,
        &[
            pending_recommendation(9001, "Tidy up keywords", RecommendationPriority::Low),
            pending_recommendation(9002, "Raise budget", RecommendationPriority::High),
            pending_recommendation(9003, "Add sitelinks", RecommendationPriority::Medium),
        ],
    )
    .unwrap();

    let app = test::init_service(
        App::new()
            .configure(api)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(SummaryCache::new()))
            .app_data(web::Data::new(JsonFileSource::new(snapshots.path())))
            .app_data(web::Data::new(test_config(snapshots.path()))),
    )
    .await;

    let feed_uri = format!("/api/v1/accounts/{}/recommendations", account_id.get());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri(&feed_uri).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let feed: Value = test::read_body_json(resp).await;
    let cards = feed["recommendations"].as_array().unwrap();
    assert_eq!(cards.len(), 3);
    assert_eq!(cards[0]["priority"], "high");
    assert_eq!(cards[1]["priority"], "medium");
    assert_eq!(cards[2]["priority"], "low");
    assert_eq!(feed["priority_summary"], json!({ "high": 1, "medium": 1, "low": 1 }));

    let high_id = cards[0]["id"].as_i64().unwrap();
    let low_id = cards[2]["id"].as_i64().unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/recommendations/{high_id}/apply"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let applied: Value = test::read_body_json(resp).await;
    assert_eq!(applied["status"], "applied");
    assert!(applied["applied_at"].as_str().is_some());

    // applying twice is refused
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/recommendations/{high_id}/apply"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // so is dismissing an applied one
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/recommendations/{high_id}/dismiss"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/recommendations/{low_id}/dismiss"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri(&feed_uri).to_request(),
    )
    .await;
    let feed: Value = test::read_body_json(resp).await;
    assert_eq!(feed["recommendations"].as_array().unwrap().len(), 1);
    assert_eq!(feed["recommendations"][0]["priority"], "medium");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{feed_uri}?status=dismissed"))
            .to_request(),
    )
    .await;
    let dismissed: Value = test::read_body_json(resp).await;
    assert_eq!(dismissed["recommendations"].as_array().unwrap().len(), 1);

    // history keeps applied and failed entries only
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("{feed_uri}/history"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let history: Value = test::read_body_json(resp).await;
    assert_eq!(history["total_count"], 1);
    assert_eq!(history["items"][0]["status"], "applied");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/recommendations/999/apply")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
