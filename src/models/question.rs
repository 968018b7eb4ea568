// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    /// The text content of the question.
    pub text: String,

    /// Exactly four options, in display order.
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// Index of the correct option, in [0, 3]. Authoritative answer key,
    /// never sent to test-taking clients.
    pub correct_option_index: i64,

    /// 'easy', 'medium' or 'hard'.
    pub difficulty: String,

    /// e.g., 'Math', 'Physics', or related to the course subject.
    pub category: String,

    /// Owning course; global bank questions carry no course.
    pub course_id: Option<i64>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Client-facing view of a question with the answer key stripped.
/// This is the only question shape that crosses the trust boundary to a
/// test-taking client.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SanitizedQuestion {
    pub id: i64,
    pub text: String,
    pub options: Json<Vec<String>>,
}

/// DTO for creating a new question.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 5, max = 1000))]
    pub text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(range(min = 0, max = 3))]
    pub correct_option_index: i64,
    #[validate(custom(function = validate_difficulty))]
    pub difficulty: String,
    #[validate(length(min = 2, max = 100))]
    pub category: String,
    pub course_id: Option<i64>,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() != 4 {
        return Err(validator::ValidationError::new("exactly_four_options_required"));
    }
    for opt in options {
        if opt.is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

fn validate_difficulty(difficulty: &str) -> Result<(), validator::ValidationError> {
    match difficulty {
        "easy" | "medium" | "hard" => Ok(()),
        _ => Err(validator::ValidationError::new("invalid_difficulty")),
    }
}
