//! Cloudinary-style object storage client
//!
//! Talks to the signed upload REST API directly: uploads go to
//! `{api_base}/{cloud}/{resource_type}/upload` as multipart forms and removals
//! to `.../{resource_type}/destroy`. Requests are signed with SHA-256 over the
//! sorted parameters followed by the API secret.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{multipart, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::{MediaReference, MediaStore, MediaUpload, StoredMedia, StorageError};
use crate::core::config::CloudinaryConfig;
use crate::shared::types::MediaType;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct CloudinaryClient {
    config: CloudinaryConfig,
    http_client: Client,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig, http_client: Client) -> Self {
        info!(
            "Object storage client initialized for cloud '{}', folder '{}'",
            config.cloud_name, config.folder
        );
        Self {
            config,
            http_client,
        }
    }

    fn resource_type(media_type: MediaType) -> &'static str {
        match media_type {
            MediaType::Image => "image",
            MediaType::Video => "video",
        }
    }

    fn endpoint(&self, media_type: MediaType, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.config.api_base,
            self.config.cloud_name,
            Self::resource_type(media_type),
            action
        )
    }

    /// Hex SHA-256 of `k1=v1&k2=v2...` (keys sorted) with the API secret appended
    pub fn sign(&self, params: &BTreeMap<&str, String>) -> String {
        let to_sign = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn error_from_response(response: reqwest::Response) -> StorageError {
        let status = response.status().as_u16();
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|e| e.error.message)
            .unwrap_or(text);
        StorageError::Remote { status, message }
    }
}

#[async_trait]
impl MediaStore for CloudinaryClient {
    fn backend_name(&self) -> &'static str {
        "object-storage"
    }

    async fn store(&self, upload: MediaUpload) -> Result<StoredMedia, StorageError> {
        let timestamp = Utc::now().timestamp().to_string();

        let mut params = BTreeMap::new();
        params.insert("folder", self.config.folder.clone());
        params.insert("timestamp", timestamp.clone());
        let signature = self.sign(&params);

        let size = upload.data.len();
        let file_part = multipart::Part::bytes(upload.data)
            .file_name(upload.original_filename.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| {
                StorageError::operation(format!(
                    "invalid content type '{}': {}",
                    upload.content_type, e
                ))
            })?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", self.config.folder.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .http_client
            .post(self.endpoint(upload.media_type, "upload"))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let uploaded: UploadResponse = response.json().await?;
        info!(
            "Uploaded '{}' ({} bytes) to object storage as {}",
            upload.original_filename, size, uploaded.public_id
        );

        Ok(StoredMedia {
            url: uploaded.secure_url,
            storage_handle: Some(uploaded.public_id),
        })
    }

    async fn delete(&self, reference: &MediaReference<'_>) -> Result<(), StorageError> {
        let public_id = reference.storage_handle.ok_or_else(|| {
            StorageError::invalid_reference(format!(
                "'{}' has no object storage handle",
                reference.media_url
            ))
        })?;

        let timestamp = Utc::now().timestamp().to_string();
        let mut params = BTreeMap::new();
        params.insert("public_id", public_id.to_string());
        params.insert("timestamp", timestamp.clone());
        let signature = self.sign(&params);

        let form = [
            ("public_id", public_id.to_string()),
            ("timestamp", timestamp),
            ("api_key", self.config.api_key.clone()),
            ("signature", signature),
            ("signature_algorithm", "sha256".to_string()),
        ];

        let response = self
            .http_client
            .post(self.endpoint(reference.media_type, "destroy"))
            .form(&form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let destroyed: DestroyResponse = response.json().await?;
        match destroyed.result.as_str() {
            "ok" => {
                info!("Removed object {}", public_id);
                Ok(())
            }
            "not found" => {
                debug!("Object {} already gone", public_id);
                Ok(())
            }
            other => Err(StorageError::operation(format!(
                "unexpected destroy result for {}: {}",
                public_id, other
            ))),
        }
    }
}
