mod common;

use std::net::SocketAddr;

use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use common::{admin_token, create_body, user_token, USER_ID};
use configs::{AppConfig, AuthConfig};
use server::routes;
use server::startup::build_state;

struct TestApp {
    base_url: String,
}

/// Real listener on an ephemeral port, backed by in-memory SQLite with migrations applied.
async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;

    let auth = AuthConfig { jwt_secret: common::SECRET.into(), token_ttl_secs: 3600 };
    let app = routes::build_router(build_state(db, &auth), CorsLayer::very_permissive(), None);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()) })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body, json!({ "status": "ok" }));
    Ok(())
}

#[tokio::test]
async fn e2e_commons_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let client = reqwest::Client::new();
    let admin = admin_token();
    let user = user_token();

    // admin creates C1
    let created: Value = client
        .post(format!("{}/api/commons/new", app.base_url))
        .bearer_auth(&admin)
        .json(&create_body("C1"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["name"], "C1");

    // user joins twice; both answers are the commons
    for _ in 0..2 {
        let res = client
            .post(format!("{}/api/commons/join?commonsId={id}", app.base_url))
            .bearer_auth(&user)
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK);
        let body: Value = res.json().await?;
        assert_eq!(body, created);
    }

    let members: Value = client
        .get(format!("{}/api/commons/{id}/users", app.base_url))
        .bearer_auth(&admin)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["userId"], USER_ID);
    assert_eq!(members[0]["cowHealth"], 100);
    assert_eq!(members[0]["numCows"], 1);
    assert_eq!(members[0]["totalWealth"], 1000.0);

    // edit keeps the dates
    let edited: Value = client
        .put(format!("{}/api/commons?id={id}", app.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "name": "C1b", "cowPrice": 20.0, "milkPrice": 5.0, "startingBalance": 1000.0 }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    assert_eq!(edited["cowPrice"], 20.0);
    assert_eq!(edited["startingDate"], created["startingDate"]);

    // remove the member, then delete the commons
    let res = client
        .delete(format!("{}/api/commons/{id}/users/{USER_ID}", app.base_url))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);

    let res = client
        .delete(format!("{}/api/commons/delete?id={id}", app.base_url))
        .bearer_auth(&admin)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], format!("Record {id} deleted"));

    let res = client
        .get(format!("{}/api/commons?id={id}", app.base_url))
        .bearer_auth(&user)
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_user_token_cannot_create() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::Client::new()
        .post(format!("{}/api/commons/new", app.base_url))
        .bearer_auth(user_token())
        .json(&create_body("C1"))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn run_with_config_migrates_and_stops_on_shutdown() -> anyhow::Result<()> {
    let mut cfg = AppConfig::default();
    cfg.server.port = 0;
    cfg.database.url = "sqlite::memory:".into();
    cfg.auth.jwt_secret = common::SECRET.into();

    // shutdown future is already complete: serve returns as soon as it is up
    server::run_with_config(cfg, async {}).await
}
