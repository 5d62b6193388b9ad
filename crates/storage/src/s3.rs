//! S3-compatible media store (AWS S3, MinIO, R2).

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::{join_url, validate_key, MediaStore, StorageError, StorageResult};

/// Connection settings for [`S3Store`].
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    /// Custom endpoint for S3-compatible services. Enables path-style
    /// addressing.
    pub endpoint: Option<String>,
    /// Static credentials. When absent the default AWS provider chain is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    /// Base URL the public site loads media from (usually a CDN).
    pub public_base_url: Option<String>,
}

impl S3Config {
    /// Base URL for public object links.
    ///
    /// Falls back to the endpoint (path-style) or the regional virtual-host
    /// URL when no CDN base is configured.
    pub fn resolved_public_base_url(&self) -> String {
        if let Some(base) = &self.public_base_url {
            return base.clone();
        }
        match &self.endpoint {
            Some(endpoint) => join_url(endpoint, &self.bucket),
            None => format!("https://{}.s3.{}.amazonaws.com", self.bucket, self.region),
        }
    }
}

pub struct S3Store {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3Store {
    /// Build a client from `config`. Does not contact the service.
    pub async fn connect(config: &S3Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            loader = loader.credentials_provider(Credentials::new(
                key_id.clone(),
                secret.clone(),
                None,
                None,
                "vitrine-static",
            ));
        }

        let shared = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint,
            "S3 media store configured"
        );

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: config.resolved_public_base_url(),
        }
    }
}

fn backend_error<E: std::error::Error>(op: &str, key: &str, err: E) -> StorageError {
    let message = DisplayErrorContext(&err).to_string();
    tracing::error!(op, key, error = %message, "S3 request failed");
    StorageError::Backend(format!("{op} {key}: {message}"))
}

#[async_trait]
impl MediaStore for S3Store {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        validate_key(key)?;
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| backend_error("put_object", key, e))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        validate_key(key)?;
        // S3 reports success for missing keys.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| backend_error("delete_object", key, e))?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }
}
