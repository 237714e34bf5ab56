use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::non_blank;

/// Request DTO for creating a booking
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Date is required"))]
    pub date: String,

    #[validate(length(min = 1, max = 64, message = "Time is required"))]
    pub time: String,

    #[validate(length(min = 1, max = 64, message = "Duration is required"))]
    pub duration: String,

    #[serde(default)]
    #[validate(length(max = 5000, message = "Notes must not exceed 5000 characters"))]
    pub notes: Option<String>,

    #[serde(default)]
    pub category: Option<String>,
}

impl CreateBookingDto {
    /// Trims every field, lower-cases the email and drops blank optionals
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            phone: non_blank(self.phone),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            duration: self.duration.trim().to_string(),
            notes: non_blank(self.notes),
            category: non_blank(self.category),
        }
    }
}

/// Response DTO for a booking
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub date: String,
    pub time: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_then_validated() {
        let dto = CreateBookingDto {
            name: "  Ada ".to_string(),
            email: " Ada@Example.COM ".to_string(),
            phone: Some("   ".to_string()),
            date: "2024-06-01".to_string(),
            time: "10:00".to_string(),
            duration: "2h".to_string(),
            notes: None,
            category: Some(" hall ".to_string()),
        }
        .normalized();

        assert_eq!(dto.name, "Ada");
        assert_eq!(dto.email, "ada@example.com");
        assert_eq!(dto.phone, None);
        assert_eq!(dto.category.as_deref(), Some("hall"));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_blank_required_field_fails_validation() {
        let dto = CreateBookingDto {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            date: "   ".to_string(),
            time: "10:00".to_string(),
            duration: "2h".to_string(),
            notes: None,
            category: None,
        }
        .normalized();

        assert!(dto.validate().is_err());
    }
}
