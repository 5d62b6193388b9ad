//! Upload plumbing shared by the avatar, cover and gallery handlers.

use std::collections::HashMap;

use axum::extract::Multipart;
use vitrine_core::media::{accept_upload, image_dimensions, object_key, MediaKind};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// A parsed `multipart/form-data` upload: one `file` part plus text fields.
#[derive(Debug)]
pub struct UploadForm {
    pub filename: String,
    pub data: Vec<u8>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    /// Read the whole form. The `file` part is required.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut file: Option<(String, Vec<u8>)> = None;
        let mut fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "file" {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((filename, data.to_vec()));
            } else if !name.is_empty() {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                fields.insert(name, text);
            }
        }

        let (filename, data) =
            file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

        Ok(Self {
            filename,
            data,
            fields,
        })
    }

    /// A text field, trimmed, with blanks treated as absent.
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// A validated upload and where it lives in the media store.
#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub key: String,
    pub content_type: &'static str,
    pub size_bytes: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// Validate the upload against the rules for `kind` and derive its
/// content-addressed key under `prefix`. Nothing is written yet.
pub fn prepare_upload(
    state: &AppState,
    kind: MediaKind,
    prefix: &str,
    form: &UploadForm,
) -> AppResult<StoredMedia> {
    let accepted = accept_upload(
        kind,
        &form.filename,
        form.data.len(),
        state.config.max_upload_bytes,
    )?;

    let (width, height) = match kind {
        MediaKind::Image => {
            let (w, h) = image_dimensions(&form.data).ok_or_else(|| {
                AppError::BadRequest(format!("'{}' is not a readable image", form.filename))
            })?;
            (i32::try_from(w).ok(), i32::try_from(h).ok())
        }
        MediaKind::Video => (None, None),
    };

    Ok(StoredMedia {
        key: object_key(prefix, &form.data, &accepted.extension),
        content_type: accepted.content_type,
        size_bytes: form.data.len() as i64,
        width,
        height,
    })
}

/// Write a prepared upload to the media store.
pub async fn put_upload(state: &AppState, media: &StoredMedia, form: &UploadForm) -> AppResult<()> {
    state
        .media_store
        .put(&media.key, form.data.clone(), media.content_type)
        .await?;

    tracing::info!(
        key = %media.key,
        size_bytes = media.size_bytes,
        content_type = media.content_type,
        "Media object stored",
    );
    Ok(())
}

/// [`prepare_upload`] then [`put_upload`].
pub async fn store_upload(
    state: &AppState,
    kind: MediaKind,
    prefix: &str,
    form: &UploadForm,
) -> AppResult<StoredMedia> {
    let media = prepare_upload(state, kind, prefix, form)?;
    put_upload(state, &media, form).await?;
    Ok(media)
}

/// Delete an object whose owning row is already gone. Failures are logged.
pub async fn discard_object(state: &AppState, key: &str) {
    if let Err(e) = state.media_store.delete(key).await {
        tracing::warn!(key, error = %e, "Failed to delete media object");
    }
}

/// Resolve an optional object key to its public URL.
pub fn public_url(state: &AppState, key: Option<&str>) -> Option<String> {
    key.map(|k| state.media_store.public_url(k))
}
