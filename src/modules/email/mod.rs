//! Outgoing email
//!
//! [`SmtpMailer`] delivers through an SMTP relay with `lettre`; [`LogMailer`]
//! stands in when no relay is configured and only logs what would be sent.
//! Callers treat delivery failures as non-fatal.

mod log_mailer;
mod mailer;
mod smtp_mailer;

pub use log_mailer::LogMailer;
pub use mailer::{EmailError, Mailer, OutgoingEmail};
pub use smtp_mailer::SmtpMailer;
