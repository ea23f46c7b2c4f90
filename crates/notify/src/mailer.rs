//! The [`Mailer`] seam and its delivery backends.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::EmailError;

/// HTTP request timeout for a single API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A rendered HTML email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub reply_to: Option<String>,
}

/// Delivers a single email. Implementations never retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError>;
}

// ---------------------------------------------------------------------------
// HttpMailer
// ---------------------------------------------------------------------------

/// JSON body accepted by the transactional email API.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

/// Sends email through a transactional email HTTP API using a bearer key.
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, from_address: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            api_url,
            api_key,
            from_address,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        let body = SendEmailRequest {
            from: &self.from_address,
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
            reply_to: message.reply_to.as_deref(),
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EmailError::HttpStatus(response.status().as_u16()));
        }

        tracing::info!(to = ?message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SmtpMailer
// ---------------------------------------------------------------------------

/// Sends email through an SMTP relay (STARTTLS).
pub struct SmtpMailer {
    host: String,
    port: u16,
    user: Option<String>,
    password: Option<String>,
    from_address: String,
}

impl SmtpMailer {
    pub fn new(
        host: String,
        port: u16,
        user: Option<String>,
        password: Option<String>,
        from_address: String,
    ) -> Self {
        Self {
            host,
            port,
            user,
            password,
            from_address,
        }
    }

    fn build_message(&self, message: &EmailMessage) -> Result<lettre::Message, EmailError> {
        use lettre::message::header::ContentType;

        let mut builder = lettre::Message::builder()
            .from(self.from_address.parse()?)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML);
        for to in &message.to {
            builder = builder.to(to.parse()?);
        }
        if let Some(reply_to) = &message.reply_to {
            builder = builder.reply_to(reply_to.parse()?);
        }

        builder
            .body(message.html.clone())
            .map_err(|e| EmailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        use lettre::{
            transport::smtp::authentication::Credentials, AsyncSmtpTransport, AsyncTransport,
            Tokio1Executor,
        };

        let email = self.build_message(message)?;

        let mut transport_builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?.port(self.port);
        if let (Some(user), Some(pass)) = (&self.user, &self.password) {
            transport_builder =
                transport_builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        transport_builder.build().send(email).await?;

        tracing::info!(to = ?message.to, subject = %message.subject, "Email sent via SMTP");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NoopMailer
// ---------------------------------------------------------------------------

/// Logs messages instead of sending them.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), EmailError> {
        tracing::warn!(
            to = ?message.to,
            subject = %message.subject,
            "No email provider configured, message dropped"
        );
        Ok(())
    }
}
