use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::guards::RequireAdmin;
use crate::features::gallery::dtos::{DeletedMediaDto, MediaItemDto, UploadMediaForm};
use crate::features::gallery::services::{GalleryService, UploadMedia, UploadedFile};
use crate::shared::types::ApiResponse;

fn multipart_error(e: MultipartError, max_upload_bytes: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "File too large. Maximum size is {} bytes",
            max_upload_bytes
        ))
    } else {
        debug!("Failed to read multipart data: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    }
}

/// Upload a gallery image or video
///
/// Accepts multipart/form-data with:
/// - `media`: the file (required)
/// - `title`: display title (required)
/// - `caption`: optional caption
#[utoipa::path(
    post,
    path = "/api/gallery/upload",
    tag = "gallery",
    request_body(
        content = UploadMediaForm,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Media uploaded", body = MediaItemDto),
        (status = 400, description = "Missing file or title"),
        (status = 401, description = "Authentication required"),
        (status = 413, description = "File too large"),
        (status = 500, description = "Storage or database failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_media(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<GalleryService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaItemDto>)> {
    let max = service.max_upload_bytes();
    let mut form = UploadMedia::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "media" => {
                let content_type = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let file_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "upload".to_string());

                let data = field.bytes().await.map_err(|e| multipart_error(e, max))?;

                form.file = Some(UploadedFile {
                    data: data.to_vec(),
                    file_name,
                    content_type,
                });
            }
            "title" => {
                form.title = Some(field.text().await.map_err(|e| multipart_error(e, max))?);
            }
            "caption" => {
                form.caption = Some(field.text().await.map_err(|e| multipart_error(e, max))?);
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    debug!("Gallery upload by {}", admin.email);
    let item = service.upload(form).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// List all gallery media, newest first
#[utoipa::path(
    get,
    path = "/api/gallery/list",
    tag = "gallery",
    responses(
        (status = 200, description = "Gallery items", body = Vec<MediaItemDto>)
    )
)]
pub async fn list_media(
    State(service): State<Arc<GalleryService>>,
) -> Result<Json<Vec<MediaItemDto>>> {
    let items = service.list().await?;
    Ok(Json(items))
}

/// Delete a gallery item and, best-effort, its stored bytes
#[utoipa::path(
    delete,
    path = "/api/gallery/item/{id}",
    tag = "gallery",
    params(
        ("id" = Uuid, Path, description = "Gallery item id")
    ),
    responses(
        (status = 200, description = "Item deleted", body = ApiResponse<DeletedMediaDto>),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Item not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_media(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<GalleryService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedMediaDto>>> {
    service.delete(id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeletedMediaDto { id, deleted: true }),
        Some("Gallery item deleted".to_string()),
        None,
    )))
}
