use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::bookings::dtos::{BookingDto, CreateBookingDto};
use crate::features::bookings::services::BookingService;
use crate::shared::types::ApiResponse;

/// Create a booking
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingDto,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(service): State<Arc<BookingService>>,
    AppJson(dto): AppJson<CreateBookingDto>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>)> {
    let dto = dto.normalized();
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let booking = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(booking),
            Some("Booking created successfully".to_string()),
            None,
        )),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::TestApp;

    #[tokio::test]
    async fn test_create_booking() {
        let app = TestApp::local_disk();
        let server = app.server();

        let response = server
            .post("/api/bookings")
            .json(&json!({
                "name": "Ada",
                "email": "ADA@example.com",
                "date": "2024-06-01",
                "time": "10:00",
                "duration": "2h",
                "category": "hall"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["email"], "ada@example.com");
        assert_eq!(app.mailer.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_create_booking_missing_field() {
        let app = TestApp::local_disk();
        let server = app.server();

        let response = server
            .post("/api/bookings")
            .json(&json!({
                "name": "Ada",
                "email": "ada@example.com",
                "date": "2024-06-01",
                "time": "",
                "duration": "2h"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(app.mailer.sent().is_empty());
    }
}
