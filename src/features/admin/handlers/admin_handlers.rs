use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::features::bookings::dtos::BookingDto;
use crate::features::contacts::dtos::ContactMessageDto;
use crate::features::donations::dtos::DonorDto;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

/// List bookings (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of bookings", body = ApiResponse<Vec<BookingDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_bookings(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<BookingDto>>>> {
    let (items, total) = service
        .list_bookings(params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/api/admin/bookings/{id}",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required"),
        (status = 404, description = "Booking not found")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_booking(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete_booking(id).await?;
    tracing::debug!("Booking {} deleted by {}", id, admin.email);

    Ok(Json(ApiResponse::success(
        None,
        Some("Booking deleted".to_string()),
        None,
    )))
}

/// List contact messages (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/contacts",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of contact messages", body = ApiResponse<Vec<ContactMessageDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_contacts(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ContactMessageDto>>>> {
    let (items, total) = service
        .list_contacts(params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// List donors (paginated)
#[utoipa::path(
    get,
    path = "/api/admin/donors",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of donors", body = ApiResponse<Vec<DonorDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_donors(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    Query(params): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<DonorDto>>>> {
    let (items, total) = service
        .list_donors(params.offset(), params.limit())
        .await?;

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use crate::shared::test_helpers::TestApp;

    #[tokio::test]
    async fn test_admin_lists_bookings_with_total() {
        let app = TestApp::local_disk();
        let server = app.server();

        for name in ["Ada", "Grace"] {
            server
                .post("/api/bookings")
                .json(&json!({
                    "name": name,
                    "email": "guest@example.com",
                    "date": "2024-06-01",
                    "time": "10:00",
                    "duration": "1h"
                }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server
            .get("/api/admin/bookings")
            .add_query_param("page_size", 1)
            .authorization_bearer(app.admin_token())
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["meta"]["total"], 2);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["name"], "Grace");
    }

    #[tokio::test]
    async fn test_admin_page_past_the_end_is_empty() {
        let app = TestApp::local_disk();
        let server = app.server();

        let response = server
            .get("/api/admin/bookings")
            .add_query_param("page", i64::MAX)
            .authorization_bearer(app.admin_token())
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"].as_array().unwrap().len(), 0);
        assert_eq!(body["meta"]["total"], 0);
    }

    #[tokio::test]
    async fn test_admin_delete_unknown_booking() {
        let app = TestApp::local_disk();
        let server = app.server();

        let response = server
            .delete(&format!("/api/admin/bookings/{}", uuid::Uuid::now_v7()))
            .authorization_bearer(app.admin_token())
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_lists_contacts_and_donors() {
        let app = TestApp::local_disk();
        let server = app.server();

        for path in ["/api/admin/contacts", "/api/admin/donors"] {
            let response = server
                .get(path)
                .authorization_bearer(app.admin_token())
                .await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["meta"]["total"], 0);
        }
    }
}
