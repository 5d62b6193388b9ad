//! Object storage for uploaded media (avatars, covers, gallery files).
//!
//! Handlers only see the [`MediaStore`] trait. Production uses [`S3Store`]
//! against any S3-compatible endpoint; tests and local development use
//! [`MemoryStore`].

use async_trait::async_trait;

pub mod error;
pub mod memory;
pub mod s3;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use s3::{S3Config, S3Store};

/// Object storage contract.
#[async_trait]
pub trait MediaStore: Send + Sync + 'static {
    /// Write an object, replacing any existing object under `key`.
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()>;

    /// Delete an object.
    ///
    /// Succeeds even if the object does not exist.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Public URL the site uses to fetch the object.
    fn public_url(&self, key: &str) -> String;
}

/// Reject keys that could escape their prefix or address the bucket root.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidInput("object key is empty".into()));
    }
    if key.starts_with('/') || key.split('/').any(|seg| seg.is_empty() || seg == "..") {
        return Err(StorageError::InvalidInput(format!(
            "object key '{key}' is not a relative path"
        )));
    }
    Ok(())
}

/// Join a public base URL and an object key with exactly one slash.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_key_accepts_nested_paths() {
        assert!(validate_key("gallery/images/abc.png").is_ok());
    }

    #[test]
    fn validate_key_rejects_traversal_and_absolute() {
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("gallery/../secrets").is_err());
        assert!(validate_key("gallery//double").is_err());
    }

    #[test]
    fn join_url_normalizes_trailing_slash() {
        assert_eq!(join_url("https://cdn.test/", "a/b.png"), "https://cdn.test/a/b.png");
        assert_eq!(join_url("https://cdn.test", "a/b.png"), "https://cdn.test/a/b.png");
    }
}
