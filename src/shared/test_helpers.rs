//! In-memory doubles and an app harness for handler tests.

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::Utc;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use uuid::Uuid;

use crate::core::app::{build_router, AppContext};
use crate::core::config::{AuthConfig, SwaggerConfig};
use crate::core::error::{AppError, Result};
use crate::features::admin::AdminService;
use crate::features::auth::services::password::hash_password;
use crate::features::auth::{AuthService, TokenService};
use crate::features::bookings::models::{Booking, NewBooking};
use crate::features::bookings::{BookingRepository, BookingService};
use crate::features::contacts::models::{ContactMessage, NewContactMessage};
use crate::features::contacts::{ContactRepository, ContactService};
use crate::features::donations::models::{Donor, NewDonor, PaymentStatus};
use crate::features::donations::{DonationService, DonorRepository};
use crate::features::gallery::models::{MediaItem, NewMediaItem};
use crate::features::gallery::{GalleryService, MediaRepository};
use crate::modules::email::{EmailError, Mailer, OutgoingEmail};
use crate::modules::payments::{CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway};
use crate::modules::storage::{
    LocalDiskStore, MediaReference, MediaStorage, MediaStore, MediaUpload, StorageError,
    StoredMedia,
};
use crate::shared::constants::LOCAL_GALLERY_URL_PREFIX;

pub const TEST_ADMIN_EMAIL: &str = "admin@rsyi.org";
pub const TEST_ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const TEST_WEBHOOK_SECRET: &str = "whsec_test";
const TEST_JWT_SECRET: &str = "test-jwt-secret";
const TEST_MAX_UPLOAD_BYTES: usize = 16 * 1024;

/// Argon2 is slow in debug builds; hash the test password once per run
fn admin_password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| hash_password(TEST_ADMIN_PASSWORD).unwrap())
}

/// Newest-first page over items kept in insertion order
fn newest_page<T: Clone>(items: &[T], offset: i64, limit: i64) -> Vec<T> {
    items
        .iter()
        .rev()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

// =============================================================================
// REPOSITORIES
// =============================================================================

#[derive(Default)]
pub struct InMemoryMediaRepository {
    items: Mutex<Vec<MediaItem>>,
    fail_inserts: AtomicBool,
}

impl InMemoryMediaRepository {
    pub fn count(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Makes every later insert fail like a lost database connection
    pub fn fail_inserts(&self) {
        self.fail_inserts.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn insert(&self, item: NewMediaItem) -> Result<MediaItem> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Internal("simulated catalog failure".to_string()));
        }
        let now = Utc::now();
        let created = MediaItem {
            id: item.id,
            title: item.title,
            caption: item.caption,
            media_type: item.media_type,
            media_url: item.media_url,
            storage_handle: item.storage_handle,
            created_at: now,
            updated_at: now,
        };
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn list_newest_first(&self) -> Result<Vec<MediaItem>> {
        let mut items: Vec<MediaItem> = self.items.lock().unwrap().iter().rev().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() < before)
    }

    async fn list_local_only(&self) -> Result<Vec<MediaItem>> {
        let prefix = format!("{}/", LOCAL_GALLERY_URL_PREFIX);
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.storage_handle.is_none() && i.media_url.starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn update_location(
        &self,
        id: Uuid,
        media_url: &str,
        storage_handle: Option<&str>,
    ) -> Result<Option<MediaItem>> {
        let mut items = self.items.lock().unwrap();
        Ok(items.iter_mut().find(|i| i.id == id).map(|item| {
            item.media_url = media_url.to_string();
            item.storage_handle = storage_handle.map(str::to_string);
            item.updated_at = Utc::now();
            item.clone()
        }))
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepository {
    items: Mutex<Vec<Booking>>,
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn insert(&self, booking: NewBooking) -> Result<Booking> {
        let created = Booking {
            id: booking.id,
            name: booking.name,
            email: booking.email,
            phone: booking.phone,
            date: booking.date,
            time: booking.time,
            duration: booking.duration,
            notes: booking.notes,
            category: booking.category,
            created_at: Utc::now(),
        };
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_newest_first(&self, offset: i64, limit: i64) -> Result<Vec<Booking>> {
        Ok(newest_page(&self.items.lock().unwrap(), offset, limit))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.items.lock().unwrap().len() as i64)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|b| b.id != id);
        Ok(items.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryContactRepository {
    items: Mutex<Vec<ContactMessage>>,
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(&self, message: NewContactMessage) -> Result<ContactMessage> {
        let created = ContactMessage {
            id: message.id,
            name: message.name,
            email: message.email,
            subject: message.subject,
            message: message.message,
            created_at: Utc::now(),
        };
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_newest_first(&self, offset: i64, limit: i64) -> Result<Vec<ContactMessage>> {
        Ok(newest_page(&self.items.lock().unwrap(), offset, limit))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.items.lock().unwrap().len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryDonorRepository {
    items: Mutex<Vec<Donor>>,
}

#[async_trait]
impl DonorRepository for InMemoryDonorRepository {
    async fn insert_pending(&self, donor: NewDonor) -> Result<Donor> {
        let now = Utc::now();
        let created = Donor {
            id: donor.id,
            name: donor.name,
            email: Some(donor.email),
            contact: None,
            amount: donor.amount,
            payment_method: donor.payment_method,
            payment_status: PaymentStatus::Pending,
            checkout_session_id: Some(donor.checkout_session_id),
            created_at: now,
            updated_at: now,
        };
        self.items.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn mark_completed(&self, checkout_session_id: &str) -> Result<bool> {
        let mut items = self.items.lock().unwrap();
        match items
            .iter_mut()
            .find(|d| d.checkout_session_id.as_deref() == Some(checkout_session_id))
        {
            Some(donor) => {
                donor.payment_status = PaymentStatus::Completed;
                donor.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_newest_first(&self, offset: i64, limit: i64) -> Result<Vec<Donor>> {
        Ok(newest_page(&self.items.lock().unwrap(), offset, limit))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.items.lock().unwrap().len() as i64)
    }
}

// =============================================================================
// EXTERNAL SERVICES
// =============================================================================

/// Object storage double; URLs look like `https://res.example/gallery/<n>/<file>`
#[derive(Default)]
pub struct MockRemoteStore {
    stored: AtomicUsize,
    deleted: Mutex<Vec<String>>,
    fail_stores: bool,
    fail_deletes: bool,
}

impl MockRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_stores() -> Self {
        Self {
            fail_stores: true,
            ..Self::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    pub fn stored_count(&self) -> usize {
        self.stored.load(Ordering::SeqCst)
    }

    pub fn deleted_handles(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaStore for MockRemoteStore {
    fn backend_name(&self) -> &'static str {
        "object-storage"
    }

    async fn store(&self, upload: MediaUpload) -> std::result::Result<StoredMedia, StorageError> {
        if self.fail_stores {
            return Err(StorageError::operation("simulated upload outage"));
        }
        let n = self.stored.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = format!("gallery/{}", n);
        Ok(StoredMedia {
            url: format!("https://res.example/{}/{}", handle, upload.original_filename),
            storage_handle: Some(handle),
        })
    }

    async fn delete(&self, reference: &MediaReference<'_>) -> std::result::Result<(), StorageError> {
        if self.fail_deletes {
            return Err(StorageError::operation("simulated remote outage"));
        }
        let handle = reference
            .storage_handle
            .ok_or_else(|| StorageError::invalid_reference("missing handle"))?;
        self.deleted.lock().unwrap().push(handle.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

impl MockMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, email: OutgoingEmail) -> std::result::Result<(), EmailError> {
        if self.fail {
            return Err(EmailError::SendError("simulated SMTP failure".to_string()));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockPaymentGateway {
    requests: Mutex<Vec<CheckoutRequest>>,
}

impl MockPaymentGateway {
    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest,
    ) -> std::result::Result<CheckoutSession, PaymentError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request);
        let id = format!("cs_test_{}", requests.len());
        Ok(CheckoutSession {
            url: format!("https://checkout.test/{}", id),
            id,
        })
    }
}

// =============================================================================
// APP HARNESS
// =============================================================================

/// Full router over in-memory repositories and a temporary data root
pub struct TestApp {
    pub mailer: Arc<MockMailer>,
    pub payments: Arc<MockPaymentGateway>,
    media: Arc<InMemoryMediaRepository>,
    token_service: Arc<TokenService>,
    max_upload_bytes: usize,
    local_dir: PathBuf,
    router: Router,
    _data_root: tempfile::TempDir,
}

impl TestApp {
    pub fn local_disk() -> Self {
        Self::build(None)
    }

    pub fn object_storage() -> Self {
        Self::build(Some(MockRemoteStore::new()))
    }

    pub fn object_storage_failing_stores() -> Self {
        Self::build(Some(MockRemoteStore::failing_stores()))
    }

    pub fn object_storage_failing_deletes() -> Self {
        Self::build(Some(MockRemoteStore::failing_deletes()))
    }

    fn build(remote: Option<MockRemoteStore>) -> Self {
        let data_root = tempfile::tempdir().unwrap();
        let local = Arc::new(LocalDiskStore::new(data_root.path()));
        let local_dir = local.directory().to_path_buf();
        let storage = match remote {
            Some(remote) => MediaStorage::with_object_storage(Arc::new(remote), local),
            None => MediaStorage::local_only(local),
        };

        let auth = AuthConfig {
            admin_email: TEST_ADMIN_EMAIL.to_string(),
            admin_password_hash: admin_password_hash().to_string(),
            jwt_secret: TEST_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(3600),
        };
        let token_service = Arc::new(TokenService::new(&auth.jwt_secret, auth.token_ttl));
        let auth_service = Arc::new(AuthService::new(&auth, Arc::clone(&token_service)));

        let media = Arc::new(InMemoryMediaRepository::default());
        let gallery_service = Arc::new(GalleryService::new(
            media.clone(),
            storage,
            TEST_MAX_UPLOAD_BYTES,
        ));

        let mailer = Arc::new(MockMailer::default());
        let payments = Arc::new(MockPaymentGateway::default());
        let bookings = Arc::new(InMemoryBookingRepository::default());
        let contacts = Arc::new(InMemoryContactRepository::default());
        let donors = Arc::new(InMemoryDonorRepository::default());

        let ctx = AppContext {
            auth_service,
            token_service: Arc::clone(&token_service),
            gallery_service,
            booking_service: Arc::new(BookingService::new(bookings.clone(), mailer.clone())),
            contact_service: Arc::new(ContactService::new(
                contacts.clone(),
                mailer.clone(),
                "manager@rsyi.org".to_string(),
            )),
            donation_service: Arc::new(DonationService::new(
                donors.clone(),
                Some(payments.clone() as Arc<dyn PaymentGateway>),
                Some(TEST_WEBHOOK_SECRET.to_string()),
                "http://localhost:5173".to_string(),
            )),
            admin_service: Arc::new(AdminService::new(bookings, contacts, donors)),
            local_gallery_dir: local_dir.clone(),
            cors_allowed_origins: vec!["*".to_string()],
            swagger: SwaggerConfig {
                username: None,
                password: None,
                title: "RSYI API".to_string(),
                version: "0.1.0".to_string(),
                description: "test".to_string(),
            },
        };

        Self {
            mailer,
            payments,
            media,
            token_service,
            max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
            local_dir,
            router: build_router(ctx),
            _data_root: data_root,
        }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router.clone()).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token_service.issue(TEST_ADMIN_EMAIL).unwrap()
    }

    /// Path of a file in the served gallery directory
    pub fn local_file(&self, file_name: &str) -> PathBuf {
        self.local_dir.join(file_name)
    }

    pub fn media_count(&self) -> usize {
        self.media.count()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}
