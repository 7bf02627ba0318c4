//! On-disk file store

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use domain_claims::{ClaimError, DocumentUpload, FileStore, StoredFile};

/// Public URL prefix stored files are served under
pub const PUBLIC_PREFIX: &str = "/uploads";

/// File store backed by a local directory
///
/// Stored names follow `<field>-<epoch-ms>-<random-int>.<ext>`. The random
/// component makes names collision-resistant: two concurrent uploads with
/// identical original filenames must never overwrite each other.
#[derive(Debug, Clone)]
pub struct DiskFileStore {
    upload_dir: PathBuf,
}

impl DiskFileStore {
    /// Creates the store, ensuring the upload directory exists
    pub async fn create(upload_dir: impl Into<PathBuf>) -> Result<Self, ClaimError> {
        let upload_dir = upload_dir.into();
        tokio::fs::create_dir_all(&upload_dir).await.map_err(|e| {
            ClaimError::storage(format!(
                "failed to create upload directory {}: {e}",
                upload_dir.display()
            ))
        })?;
        Ok(Self { upload_dir })
    }

    /// Returns the directory uploads are written to
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    fn generate_name(field: &str, original_name: &str) -> String {
        let millis = chrono::Utc::now().timestamp_millis();
        let random = Uuid::new_v4().as_u128() % 1_000_000_000;
        let ext = sanitized_extension(original_name);
        format!("{field}-{millis}-{random}{ext}")
    }

    fn disk_path_for(&self, public_path: &str) -> Option<PathBuf> {
        let name = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(public_path);
        // Refuse anything that could escape the upload directory
        if name.is_empty() || name.contains('/') || name.contains("..") {
            return None;
        }
        Some(self.upload_dir.join(name))
    }
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn store(&self, upload: &DocumentUpload) -> Result<StoredFile, ClaimError> {
        let name = Self::generate_name(&upload.field, &upload.original_name);
        let disk_path = self.upload_dir.join(&name);

        tokio::fs::write(&disk_path, &upload.bytes)
            .await
            .map_err(|e| {
                ClaimError::storage(format!("failed to write {}: {e}", disk_path.display()))
            })?;

        debug!(path = %disk_path.display(), size = upload.bytes.len(), "wrote upload");

        Ok(StoredFile {
            public_path: format!("{PUBLIC_PREFIX}/{name}"),
            disk_path,
            original_name: upload.original_name.clone(),
            content_type: upload.content_type.clone(),
            size: upload.bytes.len() as u64,
        })
    }

    async fn delete(&self, public_path: &str) -> Result<bool, ClaimError> {
        let Some(disk_path) = self.disk_path_for(public_path) else {
            return Err(ClaimError::storage(format!(
                "refusing to delete suspicious path '{public_path}'"
            )));
        };

        match tokio::fs::remove_file(&disk_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ClaimError::storage(format!(
                "failed to delete {}: {e}",
                disk_path.display()
            ))),
        }
    }
}

/// Extracts a safe lowercase extension, dot included, empty if unusable
fn sanitized_extension(original_name: &str) -> String {
    Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("claims-intake-test-{}", Uuid::new_v4()))
    }

    fn upload(name: &str) -> DocumentUpload {
        DocumentUpload::new("insuranceCard", name, "image/png", vec![1, 2, 3, 4])
    }

    #[test]
    fn test_generated_name_shape() {
        let name = DiskFileStore::generate_name("insuranceCard", "card.PNG");
        assert!(name.starts_with("insuranceCard-"));
        assert!(name.ends_with(".png"));
        assert_eq!(name.matches('-').count(), 2);
    }

    #[test]
    fn test_extension_sanitizing() {
        assert_eq!(sanitized_extension("a.png"), ".png");
        assert_eq!(sanitized_extension("archive.tar.GZ"), ".gz");
        assert_eq!(sanitized_extension("no_extension"), "");
        assert_eq!(sanitized_extension("weird.p/ng"), "");
        assert_eq!(sanitized_extension("dot."), "");
    }

    #[tokio::test]
    async fn test_store_and_delete_round_trip() {
        let store = DiskFileStore::create(temp_dir()).await.unwrap();

        let stored = store.store(&upload("card.png")).await.unwrap();
        assert!(stored.public_path.starts_with("/uploads/insuranceCard-"));
        assert_eq!(stored.size, 4);
        assert!(stored.disk_path.exists());

        assert!(store.delete(&stored.public_path).await.unwrap());
        assert!(!stored.disk_path.exists());

        // Second delete tolerates absence
        assert!(!store.delete(&stored.public_path).await.unwrap());
    }

    #[tokio::test]
    async fn test_identical_names_do_not_collide() {
        let store = DiskFileStore::create(temp_dir()).await.unwrap();

        let a = store.store(&upload("card.png")).await.unwrap();
        let b = store.store(&upload("card.png")).await.unwrap();
        assert_ne!(a.public_path, b.public_path);
        assert!(a.disk_path.exists());
        assert!(b.disk_path.exists());
    }

    #[tokio::test]
    async fn test_delete_rejects_path_traversal() {
        let store = DiskFileStore::create(temp_dir()).await.unwrap();
        assert!(store.delete("/uploads/../etc/passwd").await.is_err());
    }
}
