//! Integration tests for the `/api/tasks` endpoints.

mod common;

use axum::http::StatusCode;
use chrono::{Days, Utc};
use common::{body_json, create_board, create_task, delete, get, patch_json, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn column_titles(pool: &PgPool, column_id: i64) -> Vec<(String, i64)> {
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/columns/{column_id}")).await).await;
    json["data"]["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| {
            (
                t["title"].as_str().unwrap().to_string(),
                t["order"].as_i64().unwrap(),
            )
        })
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_applies_defaults_and_attaches_column(pool: PgPool) {
    let board = create_board(&pool, "P").await;
    let column_id = board["columns"][0]["id"].as_i64().unwrap();

    let json = create_task(&pool, json!({ "column_id": column_id, "title": "First" })).await;
    assert_eq!(json["order"], 1);
    assert_eq!(json["description"], "");
    assert_eq!(json["priority"], "medium");
    assert_eq!(json["progress_percentage"], 0);
    assert_eq!(json["created_by"], "Usuario");
    assert_eq!(json["deadline_status"], "no_due_date");
    assert!(json["days_until_due"].is_null());
    assert_eq!(json["column"]["id"], column_id);
    assert_eq!(json["column"]["board"]["id"], board["id"]);

    let second = create_task(&pool, json!({ "column_id": column_id, "title": "Second" })).await;
    assert_eq!(second["order"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_task_validates_input(pool: PgPool) {
    let board = create_board(&pool, "P").await;
    let column_id = board["columns"][0]["id"].as_i64().unwrap();

    let cases = [
        (json!({ "title": "No column" }), "column_id"),
        (json!({ "column_id": 999999, "title": "Ghost column" }), "column_id"),
        (json!({ "column_id": column_id }), "title"),
        (json!({ "column_id": column_id, "title": "T", "priority": "urgent" }), "priority"),
        (json!({ "column_id": column_id, "title": "T", "progress_percentage": 101 }), "progress_percentage"),
        (json!({ "column_id": column_id, "title": "T", "assigned_to": "a".repeat(101) }), "assigned_to"),
    ];

    for (body, field) in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/tasks", body).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{field}");
        let json = body_json(response).await;
        assert!(json["errors"][field].is_array(), "expected error on {field}: {json}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deadline_status_is_derived(pool: PgPool) {
    let board = create_board(&pool, "P").await;
    let column_id = board["columns"][0]["id"].as_i64().unwrap();
    let today = Utc::now().date_naive();

    let cases = [
        (today + Days::new(2), "due_soon", 2),
        (today + Days::new(10), "on_time", 10),
        (today - Days::new(1), "overdue", -1),
    ];
    for (due, status, days) in cases {
        let json = create_task(
            &pool,
            json!({ "column_id": column_id, "title": status, "due_date": due.to_string() }),
        )
        .await;
        assert_eq!(json["deadline_status"], status);
        assert_eq!(json["days_until_due"], days);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_tasks_filters_by_priority_and_progress(pool: PgPool) {
    let board = create_board(&pool, "P").await;
    let first = board["columns"][0]["id"].as_i64().unwrap();
    let second = board["columns"][1]["id"].as_i64().unwrap();

    create_task(&pool, json!({ "column_id": first, "title": "A", "priority": "high" })).await;
    create_task(&pool, json!({ "column_id": second, "title": "B", "progress_percentage": 30 })).await;
    create_task(&pool, json!({ "column_id": first, "title": "C", "priority": "high", "progress_percentage": 30 })).await;

    let titles = |json: serde_json::Value| -> Vec<String> {
        json.as_array()
            .unwrap()
            .iter()
            .map(|t| t["title"].as_str().unwrap().to_string())
            .collect()
    };

    // Raw order ascending, id breaking ties: A(1), B(1), C(2).
    let app = common::build_test_app(pool.clone());
    let all = body_json(get(app, "/api/tasks").await).await;
    assert_eq!(all[0]["column"]["board"]["name"], "P");
    assert_eq!(titles(all), vec!["A", "B", "C"]);

    let app = common::build_test_app(pool.clone());
    let high = body_json(get(app, "/api/tasks?priority=high").await).await;
    assert_eq!(titles(high), vec!["A", "C"]);

    let app = common::build_test_app(pool.clone());
    let both = body_json(get(app, "/api/tasks?priority=high&progress=30").await).await;
    assert_eq!(titles(both), vec!["C"]);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/tasks?progress=lots").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_task_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/tasks/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Task not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_task_fields(pool: PgPool) {
    let board = create_board(&pool, "P").await;
    let column_id = board["columns"][0]["id"].as_i64().unwrap();
    let task = create_task(&pool, json!({ "column_id": column_id, "title": "Old" })).await;
    let id = task["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/tasks/{id}"),
        json!({ "title": "New", "assigned_to": "Ana", "progress_percentage": 80 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "New");
    assert_eq!(json["assigned_to"], "Ana");
    assert_eq!(json["progress_percentage"], 80);
    assert_eq!(json["priority"], "medium");
    assert_eq!(json["order"], 1);

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &format!("/api/tasks/{id}"), json!({ "priority": "critical" })).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = common::build_test_app(pool);
    let response = put_json(app, "/api/tasks/999999", json!({ "title": "X" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_task_with_null_clears_due_date_and_assignee(pool: PgPool) {
    let board = create_board(&pool, "P").await;
    let column_id = board["columns"][0]["id"].as_i64().unwrap();
    let task = create_task(
        &pool,
        json!({
            "column_id": column_id,
            "title": "Dated",
            "due_date": "2030-01-01",
            "assigned_to": "Ana",
        }),
    )
    .await;
    let id = task["id"].as_i64().unwrap();
    assert_eq!(task["deadline_status"], "on_time");

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/tasks/{id}"),
        json!({ "due_date": null, "assigned_to": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["due_date"].is_null());
    assert!(json["assigned_to"].is_null());
    assert_eq!(json["deadline_status"], "no_due_date");
    assert!(json["days_until_due"].is_null());
    assert_eq!(json["title"], "Dated");

    // Omitting the key leaves the value alone.
    let app = common::build_test_app(pool.clone());
    patch_json(app, &format!("/api/tasks/{id}"), json!({ "assigned_to": "Luis" })).await;
    let app = common::build_test_app(pool);
    let json = body_json(
        patch_json(app, &format!("/api/tasks/{id}"), json!({ "title": "Renamed" })).await,
    )
    .await;
    assert_eq!(json["assigned_to"], "Luis");
    assert_eq!(json["title"], "Renamed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn move_task_renumbers_both_columns(pool: PgPool) {
    let board = create_board(&pool, "P").await;
    let source = board["columns"][0]["id"].as_i64().unwrap();
    let target = board["columns"][1]["id"].as_i64().unwrap();

    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let task = create_task(&pool, json!({ "column_id": source, "title": title })).await;
        ids.push(task["id"].as_i64().unwrap());
    }
    create_task(&pool, json!({ "column_id": target, "title": "X" })).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/tasks/{}", ids[0]),
        json!({ "column_id": target, "order": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["column_id"], target);
    assert_eq!(json["order"], 1);
    assert_eq!(json["column"]["id"], target);

    assert_eq!(
        column_titles(&pool, source).await,
        vec![("B".to_string(), 1), ("C".to_string(), 2)]
    );
    assert_eq!(
        column_titles(&pool, target).await,
        vec![("A".to_string(), 1), ("X".to_string(), 2)]
    );

    // Unknown destination is a validation error and changes nothing.
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/tasks/{}", ids[1]),
        json!({ "column_id": 999999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["errors"]["column_id"].is_array());
    assert_eq!(column_titles(&pool, source).await.len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_task_closes_gap(pool: PgPool) {
    let board = create_board(&pool, "P").await;
    let column_id = board["columns"][0]["id"].as_i64().unwrap();

    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let task = create_task(&pool, json!({ "column_id": column_id, "title": title })).await;
        ids.push(task["id"].as_i64().unwrap());
    }

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/tasks/{}", ids[0])).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Task deleted successfully");

    assert_eq!(
        column_titles(&pool, column_id).await,
        vec![("B".to_string(), 1), ("C".to_string(), 2)]
    );

    let app = common::build_test_app(pool);
    assert_eq!(
        delete(app, &format!("/api/tasks/{}", ids[0])).await.status(),
        StatusCode::NOT_FOUND
    );
}
