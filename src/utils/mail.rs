// src/utils/mail.rs

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};

use crate::config::Config;

pub type NotifyError = Box<dyn std::error::Error + Send + Sync>;

/// Notification sender boundary. The scoring flow only ever fires
/// notifications best-effort from a detached task, so implementations must
/// not be relied on for delivery guarantees.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// SMTP-backed notifier. Disabled (sends become no-ops) when the SMTP
/// settings are absent, which is the case in local development and tests.
pub struct SmtpNotifier {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl SmtpNotifier {
    pub fn from_config(config: &Config) -> Self {
        let transport = match (&config.smtp_host, &config.smtp_user, &config.smtp_pass) {
            (Some(host), Some(user), Some(pass)) => {
                match AsyncSmtpTransport::<Tokio1Executor>::relay(host) {
                    Ok(builder) => Some(
                        builder
                            .credentials(Credentials::new(user.clone(), pass.clone()))
                            .build(),
                    ),
                    Err(e) => {
                        tracing::warn!("Invalid SMTP configuration, mailer disabled: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        let from = config
            .mail_from
            .clone()
            .unwrap_or_else(|| "EduQualify <no-reply@eduqualify.example>".to_string());

        Self { transport, from }
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        let Some(transport) = &self.transport else {
            tracing::debug!("SMTP not configured, skipping notification to {}", recipient);
            return Ok(());
        };

        let email = Message::builder()
            .from(self.from.parse()?)
            .to(recipient.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())?;

        transport.send(email).await?;
        Ok(())
    }
}

/// Builds the HTML body of the assessment result email.
pub fn result_email_body(
    name: &str,
    course_title: &str,
    score: i64,
    total: i64,
    passed: bool,
) -> String {
    let percentage = if total > 0 {
        (score as f64 / total as f64 * 100.0).round() as i64
    } else {
        0
    };
    let (banner_color, text_color, verdict) = if passed {
        ("#ecfdf5", "#047857", "PASSED")
    } else {
        ("#fef2f2", "#b91c1c", "FAILED")
    };

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #e0e0e0; border-radius: 10px;">
    <div style="text-align: center; margin-bottom: 20px;">
        <h1 style="color: #4F46E5;">EduQualify Results</h1>
    </div>
    <p>Dear {name},</p>
    <p>You have completed the eligibility assessment for <strong>{course_title}</strong>.</p>
    <div style="background-color: {banner_color}; padding: 15px; border-radius: 8px; margin: 20px 0; text-align: center;">
        <h2 style="color: {text_color}; margin: 0;">{verdict}</h2>
        <p style="margin-top: 5px; font-size: 18px;">
            Score: <strong>{score} / {total}</strong> ({percentage}%)
        </p>
    </div>
    <p>You can view your full result history on your dashboard.</p>
    <br/>
    <p style="color: #6b7280; font-size: 14px;">Thank you,<br/>EduQualify Team</p>
</div>"#
    )
}
