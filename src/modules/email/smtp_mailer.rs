use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::debug;

use super::{EmailError, Mailer, OutgoingEmail};
use crate::core::config::MailConfig;

/// SMTP delivery through `lettre`
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &MailConfig) -> Result<Self, EmailError> {
        let from = format!("{} <{}>", config.from_name, config.from_address)
            .parse::<Mailbox>()
            .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?;

        let creds = Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        Ok(Self { from, transport })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, EmailError> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN);

        if let Some(reply_to) = &email.reply_to {
            let reply_to = reply_to
                .parse::<Mailbox>()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?;
            builder = builder.reply_to(reply_to);
        }

        builder
            .body(email.body.clone())
            .map_err(|e| EmailError::BuildError(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        let message = self.build_message(&email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        debug!("Sent '{}' to {}", email.subject, email.to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MailConfig {
        MailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: "mailer@rsyi.org".to_string(),
            smtp_password: "pw".to_string(),
            from_name: "RSYI Website".to_string(),
            from_address: "mailer@rsyi.org".to_string(),
            manager_email: "manager@rsyi.org".to_string(),
        }
    }

    #[test]
    fn test_build_message_rejects_bad_recipient() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        let result = mailer.build_message(&OutgoingEmail {
            to: "not an address".to_string(),
            subject: "Hi".to_string(),
            body: "Body".to_string(),
            reply_to: None,
        });
        assert!(matches!(result, Err(EmailError::InvalidAddress(_))));
    }

    #[test]
    fn test_build_message_with_reply_to() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        let message = mailer
            .build_message(&OutgoingEmail {
                to: "manager@rsyi.org".to_string(),
                subject: "New contact message".to_string(),
                body: "Body".to_string(),
                reply_to: Some("visitor@example.com".to_string()),
            })
            .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Reply-To:"));
        assert!(raw.contains("visitor@example.com"));
        assert!(raw.contains("Subject: New contact message"));
    }
}
