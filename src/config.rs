// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Number of questions served per assessment session.
pub const SESSION_QUESTION_COUNT: i64 = 15;

/// Wall-clock budget of one assessment session, in seconds.
pub const SESSION_DURATION_SECS: u64 = 900;

/// Minimum fraction of correct answers required to pass.
pub const PASS_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,

    /// When both are set, an admin account is seeded at startup. A
    /// registration using this email is also granted the admin role.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,

    /// SMTP relay settings for result notifications. All three must be
    /// present for the mailer to be enabled; otherwise sends are no-ops.
    pub smtp_host: Option<String>,
    pub smtp_user: Option<String>,
    pub smtp_pass: Option<String>,
    pub mail_from: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            admin_email: env::var("ADMIN_EMAIL").ok(),
            admin_password: env::var("ADMIN_PASSWORD").ok(),
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_pass: env::var("SMTP_PASS").ok(),
            mail_from: env::var("MAIL_FROM").ok(),
        }
    }
}
