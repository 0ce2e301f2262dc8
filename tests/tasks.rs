mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use taskboard::auth::Claims;
use taskboard::models::{Task, TaskPriority, TaskStatus};
use uuid::Uuid;

use common::{register_user, send, spawn_app, TEST_SECRET};

#[actix_rt::test]
async fn test_tasks_require_a_token() {
    let app = spawn_app().await;

    let requests = [
        test::TestRequest::get().uri("/tasks"),
        test::TestRequest::post()
            .uri("/tasks")
            .set_json(json!({ "title": "Unauthorized Task" })),
        test::TestRequest::delete().uri(&format!("/tasks/{}", Uuid::new_v4())),
        test::TestRequest::get()
            .uri("/tasks")
            .insert_header(("Authorization", "Bearer not-a-token")),
    ];

    for req in requests {
        let (status, body) = send(&app, req.to_request()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }
}

#[actix_rt::test]
async fn test_expired_token_is_rejected() {
    let app = spawn_app().await;
    let user = register_user(&app, "expired@example.com").await;

    let issued = Utc::now() - Duration::hours(2);
    let expired = encode(
        &Header::default(),
        &Claims {
            sub: user.id,
            iat: issued.timestamp() as usize,
            exp: (issued + Duration::hours(1)).timestamp() as usize,
        },
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(("Authorization", format!("Bearer {}", expired)))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"]
        .as_str()
        .is_some_and(|msg| msg.contains("ExpiredSignature")));

    // The same user with a live token gets through.
    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(user.bearer())
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_rt::test]
async fn test_ownership_and_delete_flow() {
    let app = spawn_app().await;
    let alice = register_user(&app, "alice@example.com").await;
    let bob = register_user(&app, "bob@example.com").await;

    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(alice.bearer())
        .set_json(json!({ "title": "T1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Task = test::read_body_json(resp).await;
    assert_eq!(created.title, "T1");
    assert_eq!(created.priority, TaskPriority::Medium);
    assert_eq!(created.status, TaskStatus::Todo);
    assert_eq!(created.user_id, alice.id);
    assert_eq!(created.description, None);
    assert_eq!(created.due_date, None);

    let task_uri = format!("/tasks/{}", created.id);

    // Bob cannot see, change or delete Alice's task.
    let req = test::TestRequest::get()
        .uri(&task_uri)
        .insert_header(bob.bearer())
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Task not found" }));

    let req = test::TestRequest::put()
        .uri(&task_uri)
        .insert_header(bob.bearer())
        .set_json(json!({ "title": "Hijacked" }))
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&task_uri)
        .insert_header(bob.bearer())
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Task not found" }));

    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(bob.bearer())
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // The failed attempts left the task untouched.
    let req = test::TestRequest::get()
        .uri(&task_uri)
        .insert_header(alice.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Task = test::read_body_json(resp).await;
    assert_eq!(fetched, created);

    let req = test::TestRequest::delete()
        .uri(&task_uri)
        .insert_header(alice.bearer())
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(alice.bearer())
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    // A second delete finds nothing.
    let req = test::TestRequest::delete()
        .uri(&task_uri)
        .insert_header(alice.bearer())
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_create_with_all_fields_and_list_newest_first() {
    let app = spawn_app().await;
    let user = register_user(&app, "lister@example.com").await;

    let payloads = [
        json!({ "title": "First" }),
        json!({
            "title": "Second",
            "description": "With everything set",
            "priority": "high",
            "status": "in-progress",
            "dueDate": "2024-06-01"
        }),
        json!({ "title": "Third", "priority": "low", "status": "done" }),
    ];
    for payload in payloads {
        let req = test::TestRequest::post()
            .uri("/tasks")
            .insert_header(user.bearer())
            .set_json(&payload)
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    }

    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(user.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let tasks: Vec<Task> = test::read_body_json(resp).await;

    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Third", "Second", "First"]);

    let second = &tasks[1];
    assert_eq!(second.description.as_deref(), Some("With everything set"));
    assert_eq!(second.priority, TaskPriority::High);
    assert_eq!(second.status, TaskStatus::InProgress);
    assert_eq!(
        second.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
        Some("2024-06-01".to_string())
    );
}

#[actix_rt::test]
async fn test_list_filters() {
    let app = spawn_app().await;
    let user = register_user(&app, "filter@example.com").await;

    for (title, status, priority) in [
        ("a", "todo", "high"),
        ("b", "done", "high"),
        ("c", "todo", "low"),
    ] {
        let req = test::TestRequest::post()
            .uri("/tasks")
            .insert_header(user.bearer())
            .set_json(json!({ "title": title, "status": status, "priority": priority }))
            .to_request();
        let (created, _) = send(&app, req).await;
        assert_eq!(created, StatusCode::CREATED);
    }

    let cases = [
        ("/tasks?status=todo", vec!["c", "a"]),
        ("/tasks?priority=high", vec!["b", "a"]),
        ("/tasks?status=todo&priority=high", vec!["a"]),
        ("/tasks?status=in-progress", vec![]),
    ];
    for (uri, expected) in cases {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(user.bearer())
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = body
            .as_array()
            .expect("list response is an array")
            .iter()
            .filter_map(|t| t["title"].as_str())
            .collect();
        assert_eq!(titles, expected, "uri {}", uri);
    }

    let req = test::TestRequest::get()
        .uri("/tasks?status=someday")
        .insert_header(user.bearer())
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_update_with_put_and_post() {
    let app = spawn_app().await;
    let user = register_user(&app, "updater@example.com").await;

    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(user.bearer())
        .set_json(json!({ "title": "Draft", "description": "Keep me" }))
        .to_request();
    let created: Task = test::read_body_json(test::call_service(&app, req).await).await;
    let task_uri = format!("/tasks/{}", created.id);

    let req = test::TestRequest::put()
        .uri(&task_uri)
        .insert_header(user.bearer())
        .set_json(json!({ "status": "in-progress" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = test::read_body_json(resp).await;
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.title, "Draft");
    assert_eq!(updated.description.as_deref(), Some("Keep me"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    let req = test::TestRequest::post()
        .uri(&task_uri)
        .insert_header(user.bearer())
        .set_json(json!({ "title": "Final", "priority": "high" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = test::read_body_json(resp).await;
    assert_eq!(updated.title, "Final");
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(updated.status, TaskStatus::InProgress);

    let req = test::TestRequest::put()
        .uri(&task_uri)
        .insert_header(user.bearer())
        .set_json(json!({}))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No fields to update" }));

    let req = test::TestRequest::put()
        .uri(&task_uri)
        .insert_header(user.bearer())
        .set_json(json!({ "title": "   " }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
}

#[actix_rt::test]
async fn test_null_clears_description_and_due_date() {
    let app = spawn_app().await;
    let user = register_user(&app, "clearer@example.com").await;

    let req = test::TestRequest::post()
        .uri("/tasks")
        .insert_header(user.bearer())
        .set_json(json!({ "title": "Trip", "description": "Pack", "dueDate": "2024-06-01" }))
        .to_request();
    let created: Task = test::read_body_json(test::call_service(&app, req).await).await;
    let task_uri = format!("/tasks/{}", created.id);

    let req = test::TestRequest::put()
        .uri(&task_uri)
        .insert_header(user.bearer())
        .set_json(json!({ "priority": "low" }))
        .to_request();
    let kept: Task = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(kept.description.as_deref(), Some("Pack"));
    assert_eq!(kept.due_date, created.due_date);

    let req = test::TestRequest::put()
        .uri(&task_uri)
        .insert_header(user.bearer())
        .set_json(json!({ "description": null, "dueDate": null }))
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["description"], Value::Null);
    assert_eq!(body["dueDate"], Value::Null);
    assert_eq!(body["priority"], "low");
    assert_eq!(body["title"], "Trip");
}

#[actix_rt::test]
async fn test_invalid_task_input() {
    let app = spawn_app().await;
    let user = register_user(&app, "invalid@example.com").await;

    let cases = [
        json!({ "title": "" }),
        json!({ "title": "   " }),
        json!({ "title": "a".repeat(201) }),
        json!({ "title": "ok", "description": "b".repeat(1001) }),
    ];
    for payload in cases {
        let req = test::TestRequest::post()
            .uri("/tasks")
            .insert_header(user.bearer())
            .set_json(&payload)
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert_eq!(body["error"], "Validation failed");
    }

    let malformed = [
        json!({}),
        json!({ "title": "ok", "priority": "urgent" }),
        json!({ "title": "ok", "status": "blocked" }),
        json!({ "title": "ok", "dueDate": "next week" }),
    ];
    for payload in malformed {
        let req = test::TestRequest::post()
            .uri("/tasks")
            .insert_header(user.bearer())
            .set_json(&payload)
            .to_request();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {}", payload);
        assert!(body["error"].is_string());
    }

    let req = test::TestRequest::get()
        .uri("/tasks")
        .insert_header(user.bearer())
        .to_request();
    let (_, body) = send(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn test_malformed_task_id_is_not_found() {
    let app = spawn_app().await;
    let user = register_user(&app, "badid@example.com").await;

    let req = test::TestRequest::get()
        .uri("/tasks/not-a-uuid")
        .insert_header(user.bearer())
        .to_request();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Task not found" }));

    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", Uuid::new_v4()))
        .insert_header(user.bearer())
        .to_request();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
