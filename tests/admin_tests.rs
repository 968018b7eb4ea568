// tests/admin_tests.rs

use std::sync::Arc;

use eduqualify::{config::Config, routes, state::AppState, utils::mail::SmtpNotifier};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

const ADMIN_EMAIL: &str = "admin@eduqualify.example";

async fn spawn_app() -> (String, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        admin_email: Some(ADMIN_EMAIL.to_string()),
        admin_password: None,
        smtp_host: None,
        smtp_user: None,
        smtp_pass: None,
        mail_from: None,
    };

    let notifier = Arc::new(SmtpNotifier::from_config(&config));
    let state = AppState {
        pool: pool.clone(),
        config,
        notifier,
    };

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

async fn register(client: &reqwest::Client, address: &str, email: &str) -> String {
    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Some User",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(response.status().as_u16(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    body["token"].as_str().expect("Token not found").to_string()
}

#[tokio::test]
async fn admin_routes_reject_students_and_anonymous_callers() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let anonymous = client
        .get(format!("{}/api/admin/courses", address))
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status().as_u16(), 401);

    let student_token = register(&client, &address, "student@test.example").await;
    let student = client
        .get(format!("{}/api/admin/courses", address))
        .bearer_auth(&student_token)
        .send()
        .await
        .unwrap();
    assert_eq!(student.status().as_u16(), 403);
}

#[tokio::test]
async fn course_crud_round_trip() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();
    // The configured admin email registers with the admin role.
    let token = register(&client, &address, ADMIN_EMAIL).await;

    let created: serde_json::Value = client
        .post(format!("{}/api/admin/courses", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "title": "Rust Fundamentals",
            "description": "Ownership, borrowing and the rest of it.",
            "eligibility_criteria": "Basic programming experience.",
            "duration": "6 weeks"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let course_id = created["id"].as_i64().unwrap();

    // Visible in the public catalog by default.
    let public: serde_json::Value = client
        .get(format!("{}/api/courses", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(public.as_array().unwrap().len(), 1);

    // Deactivate; it disappears from the catalog but stays in the admin list.
    let update = client
        .put(format!("{}/api/admin/courses/{}", address, course_id))
        .bearer_auth(&token)
        .json(&serde_json::json!({ "is_active": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(update.status().as_u16(), 200);

    let public: serde_json::Value = client
        .get(format!("{}/api/courses", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(public.as_array().unwrap().is_empty());

    let admin_list: serde_json::Value = client
        .get(format!("{}/api/admin/courses", address))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin_list.as_array().unwrap().len(), 1);

    let delete = client
        .delete(format!("{}/api/admin/courses/{}", address, course_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status().as_u16(), 204);
}

#[tokio::test]
async fn question_validation_and_sanitization() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register(&client, &address, ADMIN_EMAIL).await;

    // Three options only: rejected.
    let bad = client
        .post(format!("{}/api/admin/questions", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "text": "Which of these is a Rust keyword?",
            "options": ["match", "switch", "case"],
            "correct_option_index": 0,
            "difficulty": "easy",
            "category": "Rust"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status().as_u16(), 400);

    // Script tags in the text are stripped before storage.
    let created: serde_json::Value = client
        .post(format!("{}/api/admin/questions", address))
        .bearer_auth(&token)
        .json(&serde_json::json!({
            "text": "Which of these is a Rust keyword?<script>alert(1)</script>",
            "options": ["match", "switch", "case", "cond"],
            "correct_option_index": 0,
            "difficulty": "easy",
            "category": "Rust"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let question_id = created["id"].as_i64().unwrap();

    let stored_text: String = sqlx::query_scalar("SELECT text FROM questions WHERE id = ?")
        .bind(question_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(!stored_text.contains("<script>"));
    assert!(stored_text.contains("Rust keyword"));
}

#[tokio::test]
async fn deleting_a_course_removes_its_questions_but_not_attempts() {
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    let admin_token = register(&client, &address, ADMIN_EMAIL).await;
    let student_token = register(&client, &address, "keen@test.example").await;

    let course_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO courses (title, description, eligibility_criteria, duration)
        VALUES ('Doomed Course', 'Soon to be deleted.', 'None.', '1 week')
        RETURNING id
        "#,
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let question_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO questions (text, options, correct_option_index, difficulty, category, course_id)
        VALUES ('Only question', '["A","B","C","D"]', 2, 'medium', 'General', ?)
        RETURNING id
        "#,
    )
    .bind(course_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    // One recorded attempt before the course goes away.
    let result = client
        .post(format!("{}/api/tests/{}/submit", address, course_id))
        .bearer_auth(&student_token)
        .json(&serde_json::json!({ "answers": std::collections::HashMap::from([(question_id, 2)]) }))
        .send()
        .await
        .unwrap();
    assert_eq!(result.status().as_u16(), 200);

    let delete = client
        .delete(format!("{}/api/admin/courses/{}", address, course_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status().as_u16(), 204);

    let questions_left: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE course_id = ?")
            .bind(course_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(questions_left, 0);

    // The historical attempt survives with its weak course reference.
    let attempts_left: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM attempts WHERE course_id = ?")
            .bind(course_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(attempts_left, 1);
}
