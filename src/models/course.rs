// src/models/course.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use url::Url;
use validator::Validate;

/// Represents the 'courses' table in the database.
/// A course is the scope for question sampling and the subject of an attempt.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,

    pub title: String,

    pub description: String,

    /// Human-readable prerequisites shown on the course page.
    pub eligibility_criteria: String,

    /// Display string (e.g., "4 weeks", "6 months").
    pub duration: String,

    /// URL to the cover image, empty when none was provided.
    pub thumbnail: String,

    /// Inactive courses are hidden from students and cannot be started.
    pub is_active: bool,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for creating a new course.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 3, max = 200))]
    pub title: String,
    #[validate(length(min = 10, max = 20000))]
    pub description: String,
    #[validate(length(min = 5, max = 5000))]
    pub eligibility_criteria: String,
    #[validate(length(min = 2, max = 100))]
    pub duration: String,
    #[validate(custom(function = validate_thumbnail_url))]
    pub thumbnail: Option<String>,
    pub is_active: Option<bool>,
}

/// Validates that a thumbnail, when present and non-empty, is a well-formed URL.
fn validate_thumbnail_url(url: &str) -> Result<(), validator::ValidationError> {
    if url.is_empty() {
        return Ok(());
    }
    if url.len() > 500 {
        return Err(validator::ValidationError::new("url_too_long"));
    }
    if Url::parse(url).is_err() {
        return Err(validator::ValidationError::new("invalid_url"));
    }
    Ok(())
}
