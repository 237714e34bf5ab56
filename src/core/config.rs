use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub mail: Option<MailConfig>,
    pub payment: Option<PaymentConfig>,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_upload_size_bytes: usize,
    pub frontend_url: String,
    /// Root directory under which `uploads/gallery` lives for the local-disk backend
    pub data_root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Cloudinary-style object storage credentials
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    pub folder: String,
    pub api_base: String,
}

/// Storage backend resolved once at startup.
///
/// Object storage is used only when all three Cloudinary credentials are present;
/// otherwise every upload for the process lifetime goes to the local disk.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    ObjectStorage(CloudinaryConfig),
    LocalDisk,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub admin_email: String,
    /// Argon2 PHC string, generated with `rsyi-backend hash-password`
    pub admin_password_hash: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

#[derive(Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_name: String,
    pub from_address: String,
    pub manager_email: String,
}

#[derive(Clone)]
pub struct PaymentConfig {
    pub stripe_secret_key: String,
    pub webhook_secret: Option<String>,
    pub api_base: String,
    pub currency: String,
    pub product_name: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            storage: StorageConfig::from_env()?,
            auth: AuthConfig::from_env()?,
            mail: MailConfig::from_env()?,
            payment: PaymentConfig::from_env(),
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

/// Reads a variable, treating empty values as absent
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 20 * 1024 * 1024; // 20MB
    const DEFAULT_FRONTEND_URL: &'static str = "http://localhost:5173";

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let frontend_url = non_empty_var("FRONTEND_URL")
            .unwrap_or_else(|| Self::DEFAULT_FRONTEND_URL.to_string());

        // Parse CORS allowed origins from comma-separated string, defaulting to the frontend
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| frontend_url.clone())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_bytes = env::var("MAX_UPLOAD_SIZE_BYTES")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_UPLOAD_SIZE_BYTES.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_UPLOAD_SIZE_BYTES must be a valid number".to_string())?;

        let data_root = PathBuf::from(non_empty_var("DATA_ROOT").unwrap_or_else(|| ".".to_string()));

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_upload_size_bytes,
            frontend_url,
            data_root,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    // Default values for database connection pool (conservative defaults for small-medium apps)
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a valid number".to_string())?;

        let min_connections = env::var("DB_MIN_CONNECTIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MIN_CONNECTIONS.to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MIN_CONNECTIONS must be a valid number".to_string())?;

        let acquire_timeout_secs = env::var("DB_ACQUIRE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_ACQUIRE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_ACQUIRE_TIMEOUT_SECS must be a valid number".to_string())?;

        let idle_timeout_secs = env::var("DB_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_IDLE_TIMEOUT_SECS must be a valid number".to_string())?;

        let max_lifetime_secs = env::var("DB_MAX_LIFETIME_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_LIFETIME_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "DB_MAX_LIFETIME_SECS must be a valid number".to_string())?;

        Ok(Self {
            url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
            idle_timeout_secs,
            max_lifetime_secs,
        })
    }
}

impl CloudinaryConfig {
    const DEFAULT_FOLDER: &'static str = "gallery";
    const DEFAULT_API_BASE: &'static str = "https://api.cloudinary.com/v1_1";

    /// Returns `Some` only when cloud name, key and secret are all present
    pub fn from_env() -> Option<Self> {
        Self::from_parts(
            non_empty_var("CLOUDINARY_CLOUD_NAME"),
            non_empty_var("CLOUDINARY_API_KEY"),
            non_empty_var("CLOUDINARY_API_SECRET"),
        )
        .map(|mut config| {
            if let Some(folder) = non_empty_var("CLOUDINARY_FOLDER") {
                config.folder = folder;
            }
            if let Some(api_base) = non_empty_var("CLOUDINARY_API_BASE") {
                config.api_base = api_base.trim_end_matches('/').to_string();
            }
            config
        })
    }

    pub fn from_parts(
        cloud_name: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Option<Self> {
        match (cloud_name, api_key, api_secret) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(Self {
                cloud_name,
                api_key,
                api_secret,
                folder: Self::DEFAULT_FOLDER.to_string(),
                api_base: Self::DEFAULT_API_BASE.to_string(),
            }),
            _ => None,
        }
    }
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[hidden]")
            .field("folder", &self.folder)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl StorageBackend {
    pub fn resolve(cloudinary: Option<CloudinaryConfig>) -> Self {
        match cloudinary {
            Some(config) => StorageBackend::ObjectStorage(config),
            None => StorageBackend::LocalDisk,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StorageBackend::ObjectStorage(_) => "object-storage",
            StorageBackend::LocalDisk => "local-disk",
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            backend: StorageBackend::resolve(CloudinaryConfig::from_env()),
        })
    }
}

impl AuthConfig {
    const DEFAULT_TOKEN_TTL_MINUTES: u64 = 720; // 12 hours

    pub fn from_env() -> Result<Self, String> {
        let admin_email = non_empty_var("ADMIN_EMAIL")
            .ok_or_else(|| "ADMIN_EMAIL environment variable is required".to_string())?;

        let admin_password_hash = non_empty_var("ADMIN_PASSWORD_HASH").ok_or_else(|| {
            "ADMIN_PASSWORD_HASH environment variable is required (see `hash-password`)".to_string()
        })?;

        let jwt_secret = non_empty_var("JWT_SECRET")
            .ok_or_else(|| "JWT_SECRET environment variable is required".to_string())?;

        let ttl_minutes = env::var("JWT_TTL_MINUTES")
            .unwrap_or_else(|_| Self::DEFAULT_TOKEN_TTL_MINUTES.to_string())
            .parse::<u64>()
            .map_err(|_| "JWT_TTL_MINUTES must be a valid number".to_string())?;

        Ok(Self {
            admin_email,
            admin_password_hash,
            jwt_secret,
            token_ttl: Duration::from_secs(ttl_minutes * 60),
        })
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_email", &self.admin_email)
            .field("admin_password_hash", &"[hidden]")
            .field("jwt_secret", &"[hidden]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}

impl MailConfig {
    const DEFAULT_SMTP_PORT: u16 = 587;

    /// Returns `Ok(None)` when `SMTP_HOST` is not set; mail is then only logged
    pub fn from_env() -> Result<Option<Self>, String> {
        let Some(smtp_host) = non_empty_var("SMTP_HOST") else {
            return Ok(None);
        };

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| Self::DEFAULT_SMTP_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| "SMTP_PORT must be a valid port number".to_string())?;

        let smtp_username = non_empty_var("SMTP_USERNAME")
            .ok_or_else(|| "SMTP_USERNAME is required when SMTP_HOST is set".to_string())?;
        let smtp_password = non_empty_var("SMTP_PASSWORD")
            .ok_or_else(|| "SMTP_PASSWORD is required when SMTP_HOST is set".to_string())?;

        let from_name =
            non_empty_var("MAIL_FROM_NAME").unwrap_or_else(|| "RSYI Website".to_string());
        let from_address =
            non_empty_var("MAIL_FROM_ADDRESS").unwrap_or_else(|| smtp_username.clone());
        let manager_email =
            non_empty_var("MANAGER_EMAIL").unwrap_or_else(|| smtp_username.clone());

        Ok(Some(Self {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            from_name,
            from_address,
            manager_email,
        }))
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[hidden]")
            .field("from_name", &self.from_name)
            .field("from_address", &self.from_address)
            .field("manager_email", &self.manager_email)
            .finish()
    }
}

impl PaymentConfig {
    const DEFAULT_API_BASE: &'static str = "https://api.stripe.com/v1";
    const DEFAULT_CURRENCY: &'static str = "usd";
    const DEFAULT_PRODUCT_NAME: &'static str =
        "Reliance Soul International Youth Foundation Donation";

    /// Returns `None` when `STRIPE_SECRET_KEY` is not set
    pub fn from_env() -> Option<Self> {
        let stripe_secret_key = non_empty_var("STRIPE_SECRET_KEY")?;

        Some(Self {
            stripe_secret_key,
            webhook_secret: non_empty_var("STRIPE_WEBHOOK_SECRET"),
            api_base: non_empty_var("STRIPE_API_BASE")
                .unwrap_or_else(|| Self::DEFAULT_API_BASE.to_string()),
            currency: non_empty_var("DONATION_CURRENCY")
                .unwrap_or_else(|| Self::DEFAULT_CURRENCY.to_string()),
            product_name: non_empty_var("DONATION_PRODUCT_NAME")
                .unwrap_or_else(|| Self::DEFAULT_PRODUCT_NAME.to_string()),
        })
    }
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("stripe_secret_key", &"[hidden]")
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "[hidden]"))
            .field("api_base", &self.api_base)
            .field("currency", &self.currency)
            .field("product_name", &self.product_name)
            .finish()
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = non_empty_var("SWAGGER_USERNAME");
        let password = non_empty_var("SWAGGER_PASSWORD");
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "RSYI API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Gallery, bookings, donations and contact API for RSYI".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_storage_requires_all_three_credentials() {
        let full = CloudinaryConfig::from_parts(
            Some("demo".to_string()),
            Some("key".to_string()),
            Some("secret".to_string()),
        );
        assert!(matches!(
            StorageBackend::resolve(full),
            StorageBackend::ObjectStorage(_)
        ));

        let missing_secret =
            CloudinaryConfig::from_parts(Some("demo".to_string()), Some("key".to_string()), None);
        assert!(missing_secret.is_none());
        assert!(matches!(
            StorageBackend::resolve(missing_secret),
            StorageBackend::LocalDisk
        ));

        let missing_name =
            CloudinaryConfig::from_parts(None, Some("key".to_string()), Some("secret".to_string()));
        assert!(missing_name.is_none());
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(StorageBackend::LocalDisk.name(), "local-disk");
        let config = CloudinaryConfig::from_parts(
            Some("demo".to_string()),
            Some("key".to_string()),
            Some("secret".to_string()),
        )
        .unwrap();
        assert_eq!(config.folder, "gallery");
        assert_eq!(StorageBackend::ObjectStorage(config).name(), "object-storage");
    }

    #[test]
    fn test_cloudinary_debug_hides_secret() {
        let config = CloudinaryConfig::from_parts(
            Some("demo".to_string()),
            Some("key".to_string()),
            Some("super-secret".to_string()),
        )
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(debug.contains("demo"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_swagger_credentials() {
        let config = SwaggerConfig {
            username: Some("admin".to_string()),
            password: Some("pw".to_string()),
            title: "t".to_string(),
            version: "v".to_string(),
            description: "d".to_string(),
        };
        assert_eq!(config.credentials(), Some("admin:pw".to_string()));

        let anonymous = SwaggerConfig {
            password: None,
            ..config
        };
        assert_eq!(anonymous.credentials(), None);
    }
}
