//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use hearth_core::config::Config;
use hearth_core::db::Database;
use hearth_core::models::{NewRecord, RecordKind};
use hearth_core::test_utils::MockChatServer;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    setup_app_with_db(Database::in_memory().unwrap())
}

fn setup_app_with_db(db: Database) -> Router {
    create_router(db, Config::default(), None)
}

/// The three records used throughout the worked example
fn seeded_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.insert_record(&NewRecord::new("2024-01-05", RecordKind::Income, "Salary", 1000))
        .unwrap();
    db.insert_record(
        &NewRecord::new("2024-01-20", RecordKind::Expense, "Groceries", 300).with_category("food"),
    )
    .unwrap();
    db.insert_record(
        &NewRecord::new("2024-02-01", RecordKind::Expense, "Misc", 200).with_category(""),
    )
    .unwrap();
    db
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Health & Summary Tests ==========

#[tokio::test]
async fn test_health_without_chat() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["chat_configured"], false);
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
}

#[tokio::test]
async fn test_summary_empty() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/summary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json, serde_json::json!({"income": 0, "expense": 0}));
}

#[tokio::test]
async fn test_summary_worked_example() {
    let app = setup_app_with_db(seeded_db());

    let json = get_body_json(app.oneshot(get("/api/summary")).await.unwrap()).await;
    assert_eq!(json["income"], 1000);
    assert_eq!(json["expense"], 500);
}

// ========== Record API Tests ==========

#[tokio::test]
async fn test_create_and_find_record() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "date": "2024-03-10",
        "kind": "expense",
        "title": "Groceries",
        "amount": 4500,
        "category": "food"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/records", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = get_body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);

    let response = app
        .oneshot(get("/api/records?date=2024-03-10"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], id);
    assert_eq!(records[0]["kind"], "expense");
    assert_eq!(records[0]["category"], "food");
}

#[tokio::test]
async fn test_create_record_accepts_type_field() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "date": "2024-03-10",
        "type": "income",
        "title": "Bonus",
        "amount": 100
    });
    let response = app.oneshot(post_json("/api/records", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_record_blank_category_counts_as_other() {
    let db = Database::in_memory().unwrap();
    let app = setup_app_with_db(db.clone());

    let bodies = [
        serde_json::json!({"date": "2024-03-10", "kind": "expense", "title": "Tip", "amount": 40, "category": "   "}),
        serde_json::json!({"date": "2024-03-11", "kind": "expense", "title": "Fee", "amount": 60}),
        serde_json::json!({"date": "2024-03-12", "kind": "expense", "title": "Bus", "amount": 25, "category": " transport "}),
    ];
    for body in bodies {
        let response = app
            .clone()
            .oneshot(post_json("/api/records", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let stored = db.find_records_by_date("2024-03-10").unwrap();
    assert!(stored[0].category.is_none());

    let response = app.oneshot(get("/api/stats/category")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!([
            {"category": "Other", "total": 100},
            {"category": "transport", "total": 25}
        ])
    );
}

#[tokio::test]
async fn test_create_record_rejects_bad_input() {
    let app = setup_test_app();

    let cases = [
        serde_json::json!({"date": "2024/03/10", "kind": "expense", "title": "x", "amount": 1}),
        serde_json::json!({"date": "2024-3-1", "kind": "expense", "title": "x", "amount": 1}),
        serde_json::json!({"date": "2024-03-10", "kind": "expense", "title": "x", "amount": -5}),
        serde_json::json!({"date": "2024-03-10", "kind": "transfer", "title": "x", "amount": 1}),
        serde_json::json!({"date": "2024-03-10", "kind": "expense", "amount": 1}),
    ];

    for body in cases {
        let response = app
            .clone()
            .oneshot(post_json("/api/records", body.clone()))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for {body}"
        );
        let json = get_body_json(response).await;
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_find_records_bad_date() {
    let app = setup_test_app();

    let response = app
        .oneshot(get("/api/records?date=yesterday"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_all_records_projection() {
    let app = setup_app_with_db(seeded_db());

    let response = app.oneshot(get("/api/records/all")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 3);
    for record in records {
        assert!(record.get("date").is_some());
        assert!(record.get("kind").is_some());
        assert!(record.get("amount").is_some());
        assert!(record.get("title").is_none());
    }
}

#[tokio::test]
async fn test_list_recent_records() {
    let db = Database::in_memory().unwrap();
    for day in 1..=12 {
        db.insert_record(&NewRecord::new(
            &format!("2024-05-{:02}", day),
            RecordKind::Expense,
            "Coffee",
            day,
        ))
        .unwrap();
    }
    let app = setup_app_with_db(db);

    // Default limit
    let json = get_body_json(
        app.clone()
            .oneshot(get("/api/records/recent"))
            .await
            .unwrap(),
    )
    .await;
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 10);
    assert_eq!(records[0]["date"], "2024-05-12");
    assert_eq!(records[9]["date"], "2024-05-03");

    // Limit is clamped to at least one
    let json = get_body_json(
        app.oneshot(get("/api/records/recent?limit=0"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_record_twice() {
    let db = seeded_db();
    let id = db.find_records_by_date("2024-01-20").unwrap()[0].id;
    let app = setup_app_with_db(db.clone());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/records/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_body_json(response).await;
        assert_eq!(json["success"], true);
    }

    assert!(db.get_record(id).unwrap().is_none());
    assert_eq!(db.get_totals().unwrap().expense, 200);
}

#[tokio::test]
async fn test_add_form_redirects() {
    let db = Database::in_memory().unwrap();
    let app = setup_app_with_db(db.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/add")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(
                    "date=2024-06-01&type=expense&title=Bread&amount=350&category=food",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let records = db.find_records_by_date("2024-06-01").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "Bread");
    assert_eq!(records[0].category.as_deref(), Some("food"));
}

#[tokio::test]
async fn test_add_form_rejects_bad_amount() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/add")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(
                    "date=2024-06-01&type=expense&title=Bread&amount=lots&category=",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Report API Tests ==========

#[tokio::test]
async fn test_monthly_stats() {
    let app = setup_app_with_db(seeded_db());

    let response = app.oneshot(get("/api/stats/monthly")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(
        json,
        serde_json::json!([
            {"month": "2024-01", "income": 1000, "expense": 300, "profit": 700},
            {"month": "2024-02", "income": 0, "expense": 200, "profit": -200}
        ])
    );
}

#[tokio::test]
async fn test_yearly_stats() {
    let app = setup_app_with_db(seeded_db());

    let json = get_body_json(app.oneshot(get("/api/stats/yearly")).await.unwrap()).await;
    assert_eq!(
        json,
        serde_json::json!([{"year": "2024", "income": 1000, "expense": 500}])
    );
}

#[tokio::test]
async fn test_category_stats() {
    let app = setup_app_with_db(seeded_db());

    let json = get_body_json(
        app.clone()
            .oneshot(get("/api/stats/category"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(
        json,
        serde_json::json!([
            {"category": "food", "total": 300},
            {"category": "Other", "total": 200}
        ])
    );

    let json = get_body_json(
        app.clone()
            .oneshot(get("/api/stats/category?month=2024-02"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(json, serde_json::json!([{"category": "Other", "total": 200}]));

    let response = app
        .oneshot(get("/api/stats/category?month=February"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_current_month_stats() {
    let db = Database::in_memory().unwrap();
    let today = chrono::Local::now().date_naive();
    db.insert_record(&NewRecord::new(
        &today.format("%Y-%m-%d").to_string(),
        RecordKind::Expense,
        "Lunch",
        1200,
    ))
    .unwrap();
    let app = setup_app_with_db(db);

    let response = app.oneshot(get("/api/stats/current-month")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["month"], today.format("%Y-%m").to_string());
    assert_eq!(json["total"], 1200);
}

// ========== Chat API Tests ==========

#[tokio::test]
async fn test_chat_not_configured() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({"message": "How am I doing?"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Chat is not configured");
}

#[tokio::test]
async fn test_chat_empty_message() {
    let state = AppState {
        ai: Some(AIClient::mock()),
        ..AppState::from_config(Database::in_memory().unwrap(), Config::default())
    };
    let app = create_router_with_state(state, None);

    let response = app
        .oneshot(post_json("/api/chat", serde_json::json!({"message": "  "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_with_mock_backend() {
    let state = AppState {
        ai: Some(AIClient::mock()),
        ..AppState::from_config(seeded_db(), Config::default())
    };
    let app = create_router_with_state(state, None);

    let response = app
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({"message": "Where did my money go?"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["model"], "mock");
    assert!(json["reply"]
        .as_str()
        .unwrap()
        .contains("Where did my money go?"));
}

#[tokio::test]
async fn test_chat_against_mock_server() {
    let server = MockChatServer::start().await;

    let mut config = Config::default();
    config.chat.host = Some(server.url());
    config.chat.model = "test-model".to_string();
    config.chat.api_key = Some("sk-test".to_string());
    let app = create_router(seeded_db(), config, None);

    let health = get_body_json(app.clone().oneshot(get("/api/health")).await.unwrap()).await;
    assert_eq!(health["chat_configured"], true);

    let response = app
        .oneshot(post_json(
            "/api/chat",
            serde_json::json!({"message": "Summarize January"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["reply"], "You asked: Summarize January");
    assert_eq!(json["model"], "test-model");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer sk-test"));

    let messages = requests[0].body["messages"].as_array().unwrap();
    let roles: Vec<&str> = messages
        .iter()
        .map(|m| m["role"].as_str().unwrap())
        .collect();
    assert_eq!(roles, vec!["system", "system", "user"]);

    // Second system message is the JSON snapshot
    let snapshot: serde_json::Value =
        serde_json::from_str(messages[1]["content"].as_str().unwrap()).unwrap();
    assert_eq!(snapshot["monthly"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["categories"][0]["category"], "food");
}

#[tokio::test]
async fn test_chat_upstream_failure() {
    let server = MockChatServer::failing().await;

    let mut config = Config::default();
    config.chat.host = Some(server.url());
    let app = create_router(seeded_db(), config, None);

    let response = app
        .oneshot(post_json("/api/chat", serde_json::json!({"message": "hello"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // Upstream details stay in the logs
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Chat service request failed");
}

// ========== Static Files ==========

#[tokio::test]
async fn test_static_dir_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>hearth</h1>").unwrap();

    let app = create_router(
        Database::in_memory().unwrap(),
        Config::default(),
        Some(dir.path().to_str().unwrap()),
    );

    let response = app.oneshot(get("/index.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<h1>hearth</h1>");
}

#[test]
fn test_app_error_from_core() {
    let err = AppError::from_core(hearth_core::Error::InvalidData("bad".into()));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = AppError::from_core(hearth_core::Error::Config("boom".into()));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
