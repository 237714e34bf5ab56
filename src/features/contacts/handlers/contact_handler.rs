use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::contacts::dtos::{ContactMessageDto, CreateContactDto};
use crate::features::contacts::services::ContactService;
use crate::shared::types::ApiResponse;

/// Send a message through the contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = CreateContactDto,
    responses(
        (status = 201, description = "Message stored", body = ApiResponse<ContactMessageDto>),
        (status = 400, description = "Missing fields")
    ),
    tag = "contact"
)]
pub async fn submit_contact(
    State(service): State<Arc<ContactService>>,
    AppJson(dto): AppJson<CreateContactDto>,
) -> Result<(StatusCode, Json<ApiResponse<ContactMessageDto>>)> {
    let message = service.submit(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(message),
            Some("Message sent successfully!".to_string()),
            None,
        )),
    ))
}
