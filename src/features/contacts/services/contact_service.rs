use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::contacts::dtos::{ContactMessageDto, CreateContactDto};
use crate::features::contacts::models::{ContactMessage, NewContactMessage};
use crate::features::contacts::repositories::ContactRepository;
use crate::modules::email::{Mailer, OutgoingEmail};
use crate::shared::validation::non_blank;

pub const MISSING_FIELDS: &str = "All fields are required.";

pub struct ContactService {
    repository: Arc<dyn ContactRepository>,
    mailer: Arc<dyn Mailer>,
    manager_email: String,
}

impl ContactService {
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        mailer: Arc<dyn Mailer>,
        manager_email: String,
    ) -> Self {
        Self {
            repository,
            mailer,
            manager_email,
        }
    }

    pub async fn submit(&self, dto: CreateContactDto) -> Result<ContactMessageDto> {
        let (Some(name), Some(email), Some(message)) = (
            non_blank(dto.name),
            non_blank(dto.email),
            non_blank(dto.message),
        ) else {
            return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
        };

        if !validator::ValidateEmail::validate_email(&email) {
            return Err(AppError::Validation("Invalid email format".to_string()));
        }

        let saved = self
            .repository
            .insert(NewContactMessage {
                id: Uuid::now_v7(),
                name,
                email: email.to_lowercase(),
                subject: non_blank(dto.subject),
                message,
            })
            .await?;

        tracing::info!("Contact message received: id={}", saved.id);

        if let Err(e) = self.mailer.send(self.notification_email(&saved)).await {
            tracing::warn!("Failed to notify manager of contact message {}: {}", saved.id, e);
        }

        Ok(saved.into())
    }

    fn notification_email(&self, message: &ContactMessage) -> OutgoingEmail {
        let subject = match &message.subject {
            Some(subject) => format!("New contact message: {}", subject),
            None => "New contact message".to_string(),
        };

        OutgoingEmail {
            to: self.manager_email.clone(),
            subject,
            body: format!(
                "From: {} <{}>\n\n{}",
                message.name, message.email, message.message
            ),
            reply_to: Some(message.email.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{InMemoryContactRepository, MockMailer};

    fn service(mailer: Arc<MockMailer>) -> (ContactService, Arc<InMemoryContactRepository>) {
        let repo = Arc::new(InMemoryContactRepository::default());
        (
            ContactService::new(repo.clone(), mailer, "manager@rsyi.org".to_string()),
            repo,
        )
    }

    #[tokio::test]
    async fn test_submit_notifies_manager() {
        let mailer = Arc::new(MockMailer::default());
        let (service, repo) = service(mailer.clone());

        service
            .submit(CreateContactDto {
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
                subject: Some("Volunteering".to_string()),
                message: Some("How can I help?".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "manager@rsyi.org");
        assert_eq!(sent[0].subject, "New contact message: Volunteering");
        assert_eq!(sent[0].reply_to.as_deref(), Some("ada@example.com"));
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let mailer = Arc::new(MockMailer::default());
        let (service, repo) = service(mailer.clone());

        let result = service
            .submit(CreateContactDto {
                name: Some("Ada".to_string()),
                email: None,
                subject: None,
                message: Some("Hi".to_string()),
            })
            .await;

        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, MISSING_FIELDS),
            other => panic!("unexpected result: {:?}", other.map(|m| m.id)),
        }
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(mailer.sent().is_empty());
    }
}
