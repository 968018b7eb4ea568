// src/handlers/attempts.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::attempt::{Attempt, EligibilityEntry},
    utils::jwt::Claims,
};

fn parse_user_id(claims: &Claims) -> Result<i64, AppError> {
    claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))
}

/// Lists the current user's attempts, most recent first.
pub async fn list_my_attempts(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_user_id(&claims)?;

    let attempts = sqlx::query_as::<_, Attempt>(
        r#"
        SELECT id, user_id, course_id, score, total_questions, is_passed, answers, created_at
        FROM attempts
        WHERE user_id = ?
        ORDER BY id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list attempts: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(attempts))
}

/// Lists the courses the current user is eligible for: per course, the most
/// recent passing attempt (never an average), joined with the course title.
/// This is the data source for certificate rendering.
pub async fn eligibility(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_user_id(&claims)?;

    let entries = sqlx::query_as::<_, EligibilityEntry>(
        r#"
        SELECT a.course_id, c.title, a.score, a.total_questions, a.created_at AS certified_at
        FROM attempts a
        JOIN courses c ON c.id = a.course_id
        WHERE a.user_id = ?
          AND a.is_passed = TRUE
          AND a.id = (
              SELECT MAX(a2.id)
              FROM attempts a2
              WHERE a2.user_id = a.user_id
                AND a2.course_id = a.course_id
                AND a2.is_passed = TRUE
          )
        ORDER BY a.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to list eligibilities: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    Ok(Json(entries))
}
