//! Service wiring and the HTTP router.

use axum::{middleware::from_fn, Router};
use reqwest::Client;
use sqlx::PgPool;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::{Config, StorageBackend, SwaggerConfig};
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::auth::{routes as auth_routes, AuthService, TokenService};
use crate::features::bookings::{routes as bookings_routes, BookingService, PgBookingRepository};
use crate::features::contacts::{routes as contacts_routes, ContactService, PgContactRepository};
use crate::features::donations::{routes as donations_routes, DonationService, PgDonorRepository};
use crate::features::gallery::{routes as gallery_routes, GalleryService, PgMediaRepository};
use crate::modules::email::{LogMailer, Mailer, SmtpMailer};
use crate::modules::payments::{PaymentGateway, StripeClient};
use crate::modules::storage::{CloudinaryClient, LocalDiskStore, MediaStorage};
use crate::shared::constants::LOCAL_GALLERY_URL_PREFIX;

const HTTP_CLIENT_TIMEOUT_SECS: u64 = 60;

/// Everything the router needs, built once at startup
pub struct AppContext {
    pub auth_service: Arc<AuthService>,
    pub token_service: Arc<TokenService>,
    pub gallery_service: Arc<GalleryService>,
    pub booking_service: Arc<BookingService>,
    pub contact_service: Arc<ContactService>,
    pub donation_service: Arc<DonationService>,
    pub admin_service: Arc<AdminService>,
    /// Directory served under `/uploads/gallery`
    pub local_gallery_dir: PathBuf,
    pub cors_allowed_origins: Vec<String>,
    pub swagger: SwaggerConfig,
}

pub fn http_client() -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(HTTP_CLIENT_TIMEOUT_SECS))
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}

/// Builds the media storage for the configured backend.
///
/// The local store is always present so that items saved before a switch to
/// object storage can still be served and deleted.
pub async fn build_media_storage(
    config: &Config,
    http_client: Client,
) -> anyhow::Result<(MediaStorage, Arc<LocalDiskStore>)> {
    let local = Arc::new(LocalDiskStore::new(&config.app.data_root));
    local
        .ensure_directory()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare upload directory: {}", e))?;

    let storage = match &config.storage.backend {
        StorageBackend::ObjectStorage(cloudinary) => MediaStorage::with_object_storage(
            Arc::new(CloudinaryClient::new(cloudinary.clone(), http_client)),
            local.clone(),
        ),
        StorageBackend::LocalDisk => {
            tracing::warn!(
                "Object storage credentials not set; gallery uploads go to {}",
                local.directory().display()
            );
            MediaStorage::local_only(local.clone())
        }
    };
    tracing::info!(
        "Gallery storage backend: {}",
        config.storage.backend.name()
    );

    Ok((storage, local))
}

pub async fn build_context(config: &Config, pool: PgPool) -> anyhow::Result<AppContext> {
    let http_client = http_client()?;

    let token_service = Arc::new(TokenService::new(
        &config.auth.jwt_secret,
        config.auth.token_ttl,
    ));
    let auth_service = Arc::new(AuthService::new(&config.auth, Arc::clone(&token_service)));
    tracing::info!("Auth service initialized for {}", config.auth.admin_email);

    let (storage, local) = build_media_storage(config, http_client.clone()).await?;
    let gallery_service = Arc::new(GalleryService::new(
        Arc::new(PgMediaRepository::new(pool.clone())),
        storage,
        config.app.max_upload_size_bytes,
    ));
    tracing::info!("Gallery service initialized");

    let mailer: Arc<dyn Mailer> = match &config.mail {
        Some(mail) => Arc::new(
            SmtpMailer::new(mail).map_err(|e| anyhow::anyhow!("Failed to set up SMTP: {}", e))?,
        ),
        None => {
            tracing::warn!("SMTP not configured; outgoing email will only be logged");
            Arc::new(LogMailer)
        }
    };
    let manager_email = config
        .mail
        .as_ref()
        .map(|m| m.manager_email.clone())
        .unwrap_or_else(|| config.auth.admin_email.clone());

    let bookings = Arc::new(PgBookingRepository::new(pool.clone()));
    let contacts = Arc::new(PgContactRepository::new(pool.clone()));
    let donors = Arc::new(PgDonorRepository::new(pool.clone()));

    let booking_service = Arc::new(BookingService::new(bookings.clone(), Arc::clone(&mailer)));
    let contact_service = Arc::new(ContactService::new(
        contacts.clone(),
        Arc::clone(&mailer),
        manager_email,
    ));

    let gateway = config.payment.as_ref().map(|payment| {
        Arc::new(StripeClient::new(payment, http_client.clone())) as Arc<dyn PaymentGateway>
    });
    let donation_service = Arc::new(DonationService::new(
        donors.clone(),
        gateway,
        config
            .payment
            .as_ref()
            .and_then(|p| p.webhook_secret.clone()),
        config.app.frontend_url.clone(),
    ));
    tracing::info!("Booking, contact and donation services initialized");

    let admin_service = Arc::new(AdminService::new(bookings, contacts, donors));

    Ok(AppContext {
        auth_service,
        token_service,
        gallery_service,
        booking_service,
        contact_service,
        donation_service,
        admin_service,
        local_gallery_dir: local.directory().to_path_buf(),
        cors_allowed_origins: config.app.cors_allowed_origins.clone(),
        swagger: config.swagger.clone(),
    })
}

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

pub fn build_router(ctx: AppContext) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: ctx.swagger.title.clone(),
        version: ctx.swagger.version.clone(),
        description: ctx.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = ctx.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    // Protected routes (require an admin token)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes())
        .merge(gallery_routes::protected_routes(Arc::clone(
            &ctx.gallery_service,
        )))
        .nest("/api/admin", admin_routes::routes(ctx.admin_service))
        .route_layer(axum::middleware::from_fn_with_state(
            ctx.token_service,
            middleware::auth_middleware,
        ));

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes (no auth required)
    let public_routes = Router::new()
        .merge(auth_routes::public_routes(ctx.auth_service))
        .merge(gallery_routes::public_routes(ctx.gallery_service))
        .merge(bookings_routes::routes(ctx.booking_service))
        .merge(contacts_routes::routes(ctx.contact_service))
        .merge(donations_routes::routes(ctx.donation_service))
        .nest_service(
            LOCAL_GALLERY_URL_PREFIX,
            ServeDir::new(ctx.local_gallery_dir),
        );

    Router::new()
        .merge(swagger)
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(ctx.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::shared::test_helpers::TestApp;

    #[tokio::test]
    async fn test_health_and_request_id() {
        let app = TestApp::local_disk();
        let server = app.server();

        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = TestApp::local_disk();
        let server = app.server();

        server
            .get("/api-docs/openapi.json")
            .await
            .assert_status_ok();
    }
}
