use vitrine_core::content::{parse_kind_list, ContentKind};
use vitrine_storage::S3Config;

use crate::auth::session::SessionConfig;

/// Default upload size limit (25 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development except
/// the session secret and administrator credentials.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Largest accepted upload in bytes (default: 25 MiB).
    pub max_upload_bytes: usize,
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub ordering: OrderingConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:4321`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `MAX_UPLOAD_BYTES`     | `26214400`                 |
    ///
    /// See [`SessionConfig::from_env`], [`StorageConfig::from_env`] and
    /// [`OrderingConfig::from_env`] for the remaining variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:4321".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            max_upload_bytes,
            session: SessionConfig::from_env(),
            storage: StorageConfig::from_env(),
            ordering: OrderingConfig::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// Media storage
// ---------------------------------------------------------------------------

/// Which [`MediaStore`](vitrine_storage::MediaStore) backend to build.
#[derive(Debug, Clone)]
pub enum StorageConfig {
    S3(S3Config),
    /// Process-local store. Objects are lost on restart.
    Memory { public_base_url: String },
}

impl StorageConfig {
    /// | Env Var                 | Default                         |
    /// |-------------------------|---------------------------------|
    /// | `MEDIA_STORE`           | `memory` (`s3` or `memory`)     |
    /// | `S3_BUCKET`             | required for `s3`               |
    /// | `S3_REGION`             | `us-east-1`                     |
    /// | `S3_ENDPOINT`           | unset (AWS)                     |
    /// | `S3_ACCESS_KEY_ID`      | unset (default provider chain)  |
    /// | `S3_SECRET_ACCESS_KEY`  | unset (default provider chain)  |
    /// | `MEDIA_PUBLIC_BASE_URL` | derived from bucket/endpoint    |
    pub fn from_env() -> Self {
        let backend = std::env::var("MEDIA_STORE").unwrap_or_else(|_| "memory".into());
        let public_base_url = non_empty_var("MEDIA_PUBLIC_BASE_URL");

        match backend.as_str() {
            "s3" => Self::S3(S3Config {
                bucket: std::env::var("S3_BUCKET").expect("S3_BUCKET must be set when MEDIA_STORE=s3"),
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".into()),
                endpoint: non_empty_var("S3_ENDPOINT"),
                access_key_id: non_empty_var("S3_ACCESS_KEY_ID"),
                secret_access_key: non_empty_var("S3_SECRET_ACCESS_KEY"),
                public_base_url,
            }),
            "memory" => Self::Memory {
                public_base_url: public_base_url
                    .unwrap_or_else(|| "http://localhost:3000/media".into()),
            },
            other => panic!("MEDIA_STORE must be 's3' or 'memory', got '{other}'"),
        }
    }
}

// ---------------------------------------------------------------------------
// Order overlay
// ---------------------------------------------------------------------------

/// Where order records are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStoreBackend {
    Postgres,
    Memory,
    /// No order store: every listing uses canonical order.
    Disabled,
}

#[derive(Debug, Clone)]
pub struct OrderingConfig {
    pub backend: OrderStoreBackend,
    /// Kinds whose listings apply the custom order overlay.
    pub overlay_kinds: Vec<ContentKind>,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            backend: OrderStoreBackend::Postgres,
            overlay_kinds: ContentKind::DEFAULT_OVERLAY.to_vec(),
        }
    }
}

impl OrderingConfig {
    /// | Env Var               | Default                                         |
    /// |-----------------------|-------------------------------------------------|
    /// | `ORDER_STORE`         | `postgres` (`postgres`, `memory` or `none`)     |
    /// | `ORDER_OVERLAY_KINDS` | `gallery-images,gallery-videos,team-members`    |
    pub fn from_env() -> Self {
        let backend = match std::env::var("ORDER_STORE")
            .unwrap_or_else(|_| "postgres".into())
            .as_str()
        {
            "postgres" => OrderStoreBackend::Postgres,
            "memory" => OrderStoreBackend::Memory,
            "none" => OrderStoreBackend::Disabled,
            other => panic!("ORDER_STORE must be 'postgres', 'memory' or 'none', got '{other}'"),
        };

        let overlay_kinds = match std::env::var("ORDER_OVERLAY_KINDS") {
            Ok(raw) => parse_kind_list(&raw)
                .unwrap_or_else(|e| panic!("Invalid ORDER_OVERLAY_KINDS: {e}")),
            Err(_) => ContentKind::DEFAULT_OVERLAY.to_vec(),
        };

        Self {
            backend,
            overlay_kinds,
        }
    }

    pub fn overlay_enabled(&self, kind: ContentKind) -> bool {
        self.overlay_kinds.contains(&kind)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_overlay_excludes_testimonials() {
        let config = OrderingConfig::default();
        assert!(config.overlay_enabled(ContentKind::TeamMember));
        assert!(config.overlay_enabled(ContentKind::GalleryImage));
        assert!(!config.overlay_enabled(ContentKind::Testimonial));
    }

    #[test]
    fn empty_overlay_list_disables_everything() {
        let config = OrderingConfig {
            backend: OrderStoreBackend::Memory,
            overlay_kinds: Vec::new(),
        };
        assert!(ContentKind::ALL.iter().all(|k| !config.overlay_enabled(*k)));
    }
}
