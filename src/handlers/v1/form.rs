//! Multipart form parsing for post bodies and image uploads.
//!
//! Uploaded file parts are spooled to disk before being handed to the image
//! store, and must carry an image content type.

use std::path::{Path, PathBuf};

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use tokio::fs;
use ulid::Ulid;

use crate::post::{PostDraft, PostError};
use crate::store::StorageError;

/// A parsed create/update body: the draft fields plus an optional spooled
/// thumbnail file.
pub struct PostForm {
    pub draft: PostDraft,
    pub file: Option<PathBuf>,
}

/// Parse the multipart body of a create or update request.
///
/// Text fields: `title`, `meta`, `content`, `slug`, `author`, `tags`
/// (JSON array or comma-separated), `featured` (`true`/`1`). The file part
/// may be named `thumbnail` or `file`. Unknown fields are drained and
/// ignored.
pub async fn parse_post_form(
    multipart: &mut Multipart,
    spool_dir: &Path,
) -> Result<PostForm, PostError> {
    let mut file = None;
    match parse_draft_fields(multipart, spool_dir, &mut file).await {
        Ok(draft) => Ok(PostForm { draft, file }),
        Err(e) => {
            // A rejected request must not leave its upload in the spool dir.
            discard_spool(file.as_deref()).await;
            Err(e)
        }
    }
}

async fn parse_draft_fields(
    multipart: &mut Multipart,
    spool_dir: &Path,
    file: &mut Option<PathBuf>,
) -> Result<PostDraft, PostError> {
    let mut title = String::new();
    let mut meta = String::new();
    let mut content = String::new();
    let mut slug = String::new();
    let mut author = String::new();
    let mut tags = Vec::new();
    let mut featured = false;

    while let Some(field) = next_field(multipart).await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = text(field).await?,
            "meta" => meta = text(field).await?,
            "content" => content = text(field).await?,
            "slug" => slug = text(field).await?,
            "author" => author = text(field).await?,
            "tags" => tags = parse_tags(&text(field).await?),
            "featured" => featured = matches!(text(field).await?.as_str(), "true" | "1"),
            "thumbnail" | "file" => {
                let spooled = spool_image(field, spool_dir).await?;
                // A repeated file part supersedes the earlier one.
                if let Some(old) = file.replace(spooled) {
                    discard_spool(Some(old.as_path())).await;
                }
            }
            _ => {
                // Drain unknown fields so parsing can continue.
                let _ = field.bytes().await;
            }
        }
    }

    if slug.trim().is_empty() {
        return Err(PostError::InvalidRequest("slug is required".to_string()));
    }

    Ok(PostDraft {
        title,
        meta,
        content,
        slug,
        author,
        tags,
        featured,
    })
}

/// Spool the first file part of a multipart body, if any.
///
/// Used by the standalone image upload endpoint, which accepts the file
/// under any field name.
pub async fn spool_first_file(
    multipart: &mut Multipart,
    spool_dir: &Path,
) -> Result<Option<PathBuf>, PostError> {
    while let Some(field) = next_field(multipart).await? {
        if field.file_name().is_some() {
            return Ok(Some(spool_image(field, spool_dir).await?));
        }
        let _ = field.bytes().await;
    }
    Ok(None)
}

/// Remove a spooled upload once the image store has consumed it.
pub async fn discard_spool(path: Option<&Path>) {
    if let Some(path) = path {
        let _ = fs::remove_file(path).await;
    }
}

async fn next_field<'a>(
    multipart: &'a mut Multipart,
) -> Result<Option<Field<'a>>, PostError> {
    multipart
        .next_field()
        .await
        .map_err(|e| PostError::InvalidRequest(format!("malformed multipart body: {e}")))
}

async fn text(field: Field<'_>) -> Result<String, PostError> {
    field
        .text()
        .await
        .map_err(|e| PostError::InvalidRequest(format!("malformed multipart field: {e}")))
}

fn parse_tags(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.starts_with('[')
        && let Ok(tags) = serde_json::from_str::<Vec<String>>(raw)
    {
        return tags;
    }
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

async fn spool_image(field: Field<'_>, spool_dir: &Path) -> Result<PathBuf, PostError> {
    let is_image = field
        .content_type()
        .is_some_and(|ct| ct.contains("image"));
    if !is_image {
        return Err(PostError::InvalidRequest("invalid image format".to_string()));
    }

    let ext = field
        .file_name()
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();

    let bytes = field
        .bytes()
        .await
        .map_err(|e| PostError::InvalidRequest(format!("malformed multipart field: {e}")))?;

    fs::create_dir_all(spool_dir).await.map_err(io_err)?;
    let path = spool_dir.join(format!("{}{}", Ulid::new(), ext));
    fs::write(&path, &bytes).await.map_err(io_err)?;
    Ok(path)
}

fn io_err(e: std::io::Error) -> PostError {
    PostError::Storage(StorageError::Io(e))
}
