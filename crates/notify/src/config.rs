//! Email provider configuration.

use std::sync::Arc;

use crate::mailer::{HttpMailer, Mailer, NoopMailer, SmtpMailer};

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `EMAIL_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@dealership.local";

/// Which delivery backend to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailProvider {
    /// Transactional email HTTP API.
    Http { api_url: String, api_key: String },
    /// SMTP relay.
    Smtp {
        host: String,
        port: u16,
        user: Option<String>,
        password: Option<String>,
    },
    /// No provider: messages are logged and dropped.
    None,
}

impl EmailProvider {
    pub fn name(&self) -> &'static str {
        match self {
            EmailProvider::Http { .. } => "http",
            EmailProvider::Smtp { .. } => "smtp",
            EmailProvider::None => "none",
        }
    }
}

/// Configuration for outgoing email.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub provider: EmailProvider,
    /// RFC 5322 "From" address.
    pub from_address: String,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable         | Required              | Default                     |
    /// |------------------|-----------------------|-----------------------------|
    /// | `EMAIL_PROVIDER` | no                    | `none`                      |
    /// | `EMAIL_FROM`     | no                    | `noreply@dealership.local`  |
    /// | `EMAIL_API_URL`  | when provider `http`  | -                           |
    /// | `EMAIL_API_KEY`  | when provider `http`  | -                           |
    /// | `SMTP_HOST`      | when provider `smtp`  | -                           |
    /// | `SMTP_PORT`      | no                    | `587`                       |
    /// | `SMTP_USER`      | no                    | -                           |
    /// | `SMTP_PASSWORD`  | no                    | -                           |
    ///
    /// # Panics
    ///
    /// Panics if the selected provider is missing a required variable or if
    /// `EMAIL_PROVIDER` holds an unknown value.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`EmailConfig::from_env`] with an explicit variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let provider = match var("EMAIL_PROVIDER").as_deref().unwrap_or("none") {
            "http" => EmailProvider::Http {
                api_url: var("EMAIL_API_URL")
                    .expect("EMAIL_API_URL must be set when EMAIL_PROVIDER=http"),
                api_key: var("EMAIL_API_KEY")
                    .expect("EMAIL_API_KEY must be set when EMAIL_PROVIDER=http"),
            },
            "smtp" => EmailProvider::Smtp {
                host: var("SMTP_HOST").expect("SMTP_HOST must be set when EMAIL_PROVIDER=smtp"),
                port: var("SMTP_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(DEFAULT_SMTP_PORT),
                user: var("SMTP_USER"),
                password: var("SMTP_PASSWORD"),
            },
            "none" | "" => EmailProvider::None,
            other => panic!("EMAIL_PROVIDER must be one of http, smtp, none (got '{other}')"),
        };

        Self {
            provider,
            from_address: var("EMAIL_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
        }
    }
}

/// Construct the mailer matching the configured provider.
pub fn build_mailer(config: &EmailConfig) -> Arc<dyn Mailer> {
    match &config.provider {
        EmailProvider::Http { api_url, api_key } => Arc::new(HttpMailer::new(
            api_url.clone(),
            api_key.clone(),
            config.from_address.clone(),
        )),
        EmailProvider::Smtp {
            host,
            port,
            user,
            password,
        } => Arc::new(SmtpMailer::new(
            host.clone(),
            *port,
            user.clone(),
            password.clone(),
            config.from_address.clone(),
        )),
        EmailProvider::None => Arc::new(NoopMailer),
    }
}
