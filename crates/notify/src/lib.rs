//! Transactional email for order and contact notifications.
//!
//! - [`Mailer`] is the delivery seam handlers depend on.
//! - [`HttpMailer`] posts to a transactional email HTTP API.
//! - [`SmtpMailer`] sends through an SMTP relay via `lettre`.
//! - [`NoopMailer`] logs and drops messages when no provider is configured.
//! - [`templates`] renders the HTML bodies.

pub mod config;
pub mod error;
pub mod mailer;
pub mod templates;

pub use config::{build_mailer, EmailConfig, EmailProvider};
pub use error::EmailError;
pub use mailer::{EmailMessage, HttpMailer, Mailer, NoopMailer, SmtpMailer};
