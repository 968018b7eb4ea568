// src/models/attempt.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};

use crate::models::question::SanitizedQuestion;

/// One graded answer embedded in an attempt, in presentation order.
/// question_id is a weak reference; deleting the question later does not
/// touch the historical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptAnswer {
    pub question_id: i64,
    pub selected_option_index: i64,
    pub is_correct: bool,
}

/// Represents the 'attempts' table in the database.
/// One immutable scored record per submission; never updated or deleted by
/// normal operation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Attempt {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub score: i64,
    pub total_questions: i64,
    pub is_passed: bool,
    pub answers: Json<Vec<AttemptAnswer>>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO returned when a session is started: the sampled paper plus the
/// countdown budget the client must enforce.
#[derive(Debug, Serialize)]
pub struct TestPaper {
    pub course_id: i64,
    pub questions: Vec<SanitizedQuestion>,
    pub duration_seconds: u64,
}

/// DTO for submitting a session.
/// Key: question id. Value: selected option index.
#[derive(Debug, Deserialize)]
pub struct SubmitTestRequest {
    pub answers: HashMap<i64, i64>,
}

/// Result summary handed back to the caller after the attempt is persisted.
#[derive(Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub score: i64,
    pub total: i64,
    pub is_passed: bool,
}

/// Row for the eligibility listing: the most recent passing attempt per
/// course, joined with the course title. Source data for certificates.
#[derive(Debug, Serialize, FromRow)]
pub struct EligibilityEntry {
    pub course_id: i64,
    pub title: String,
    pub score: i64,
    pub total_questions: i64,
    pub certified_at: Option<chrono::DateTime<chrono::Utc>>,
}
