use async_trait::async_trait;
use tracing::info;

use super::{EmailError, Mailer, OutgoingEmail};

/// Mailer used when SMTP is not configured
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            "SMTP not configured, email not sent"
        );
        Ok(())
    }
}
