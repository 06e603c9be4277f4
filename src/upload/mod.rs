// src/upload/mod.rs
//! Image upload: read a local file into a displayable data URL and apply it
//! to an image block in one step.
//!
//! The read is the only asynchronous work in the crate. Its result is applied
//! through a single synchronous mutation; a later upload for the same block
//! simply overwrites an earlier one (last write wins).

use crate::error::AppError;
use crate::model::BlockKind;
use crate::store::{BlockCollection, BlockPatch, Mutation};
use crate::types::BlockId;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use std::path::Path;

/// Where upload bytes come from.
#[async_trait::async_trait]
pub trait UploadSource: Send + Sync {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Reads uploads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsUploadSource;

#[async_trait::async_trait]
impl UploadSource for FsUploadSource {
    async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

/// A finished read, ready to be stored in an image block's `data`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub url: String,
    pub file_name: String,
    pub file_size: u64,
}

/// Reads `path` through `source` and encodes it as a `data:` URL.
pub async fn read_image_upload<S>(source: &S, path: &Path) -> Result<ImageUpload, AppError>
where
    S: UploadSource + ?Sized,
{
    let mime = image_mime(path).ok_or_else(|| AppError::UnsupportedUpload {
        path: path.to_path_buf(),
        mime: "unknown".to_string(),
    })?;

    let bytes = source
        .read(path)
        .await
        .map_err(|err| AppError::UploadFailed {
            path: path.to_path_buf(),
            source: err,
        })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    log::info!("Read upload {} ({} bytes, {})", file_name, bytes.len(), mime);

    Ok(ImageUpload {
        url: format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)),
        file_name,
        file_size: bytes.len() as u64,
    })
}

/// MIME type for image extensions the editor accepts.
fn image_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}

impl BlockCollection {
    /// Applies a finished upload to an image block.
    ///
    /// On success the block gets `url`, `fileName` and `fileSize` and any
    /// previous `uploadError` is cleared. On failure only `uploadError` is
    /// written, so an image that was already showing stays in place.
    /// Missing ids and non-image blocks are a no-op.
    pub fn apply_upload(&self, id: &BlockId, result: Result<ImageUpload, AppError>) -> Mutation {
        let Some(block) = self.get(id) else {
            log::debug!("Upload ignored: no block {}", id);
            return Mutation::Unchanged;
        };
        if block.kind != BlockKind::Image {
            log::debug!("Upload ignored: block {} is a {} block", id, block.kind);
            return Mutation::Unchanged;
        }

        let mut data = block.data.clone();
        match result {
            Ok(upload) => {
                data.insert("url".to_string(), Value::String(upload.url));
                data.insert("fileName".to_string(), Value::String(upload.file_name));
                data.insert("fileSize".to_string(), Value::from(upload.file_size));
                data.remove("uploadError");
            }
            Err(err) => {
                log::warn!("Upload for block {} failed: {}", id, err);
                data.insert("uploadError".to_string(), Value::String(err.to_string()));
            }
        }
        self.update(id, BlockPatch::data(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Block;
    use crate::types::LocalizedText;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MemorySource(HashMap<PathBuf, Vec<u8>>);

    #[async_trait::async_trait]
    impl UploadSource for MemorySource {
        async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
        }
    }

    fn source() -> MemorySource {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("hero.png"), vec![1, 2, 3]);
        MemorySource(files)
    }

    fn image_collection() -> BlockCollection {
        BlockCollection::from_blocks(vec![
            Block::new(BlockId::parse("img").unwrap(), BlockKind::Image),
            Block::new(BlockId::parse("p").unwrap(), BlockKind::Paragraph)
                .with_content(LocalizedText::new().with("en", "text")),
        ])
    }

    #[tokio::test]
    async fn reads_file_into_data_url() {
        let upload = read_image_upload(&source(), Path::new("hero.png")).await.unwrap();
        assert_eq!(upload.url, "data:image/png;base64,AQID");
        assert_eq!(upload.file_name, "hero.png");
        assert_eq!(upload.file_size, 3);
    }

    #[tokio::test]
    async fn rejects_non_image_extensions() {
        let err = read_image_upload(&source(), Path::new("notes.txt")).await.unwrap_err();
        assert!(matches!(err, AppError::UnsupportedUpload { .. }));
    }

    #[tokio::test]
    async fn missing_file_is_an_upload_failure() {
        let err = read_image_upload(&source(), Path::new("gone.png")).await.unwrap_err();
        assert!(matches!(err, AppError::UploadFailed { .. }));
    }

    #[test]
    fn successful_upload_sets_url_and_clears_error() {
        let id = BlockId::parse("img").unwrap();
        let failed = image_collection()
            .apply_upload(
                &id,
                Err(AppError::UnsupportedUpload {
                    path: PathBuf::from("x.txt"),
                    mime: "unknown".into(),
                }),
            )
            .into_next()
            .unwrap();
        assert!(failed.get(&id).unwrap().data.contains_key("uploadError"));

        let upload = ImageUpload {
            url: "data:image/png;base64,AQID".into(),
            file_name: "hero.png".into(),
            file_size: 3,
        };
        let next = failed.apply_upload(&id, Ok(upload)).into_next().unwrap();
        let data = &next.get(&id).unwrap().data;
        assert_eq!(data.get("url"), Some(&json!("data:image/png;base64,AQID")));
        assert_eq!(data.get("fileSize"), Some(&json!(3)));
        assert!(!data.contains_key("uploadError"));
    }

    #[test]
    fn failed_upload_keeps_existing_image() {
        let id = BlockId::parse("img").unwrap();
        let with_image = image_collection()
            .update(
                &id,
                BlockPatch::data_field(
                    image_collection().get(&id).unwrap(),
                    "url",
                    json!("/uploads/old.png"),
                ),
            )
            .into_next()
            .unwrap();
        let err = AppError::UploadFailed {
            path: PathBuf::from("new.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let next = with_image.apply_upload(&id, Err(err)).into_next().unwrap();
        let data = &next.get(&id).unwrap().data;
        assert_eq!(data.get("url"), Some(&json!("/uploads/old.png")));
        assert!(data
            .get("uploadError")
            .and_then(Value::as_str)
            .unwrap()
            .contains("denied"));
    }

    #[test]
    fn uploads_to_other_blocks_are_ignored() {
        let upload = ImageUpload {
            url: "data:image/png;base64,AQID".into(),
            file_name: "hero.png".into(),
            file_size: 3,
        };
        let id = BlockId::parse("p").unwrap();
        assert_eq!(
            image_collection().apply_upload(&id, Ok(upload.clone())),
            Mutation::Unchanged
        );
        let missing = BlockId::parse("nope").unwrap();
        assert_eq!(image_collection().apply_upload(&missing, Ok(upload)), Mutation::Unchanged);
    }
}
