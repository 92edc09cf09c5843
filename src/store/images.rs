//! Image byte storage.

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, ErrorCode};

/// Trait for image byte storage operations.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Writes image bytes under the given id.
    async fn write(&self, id: Uuid, data: Bytes) -> ApiResult<()>;

    /// Reads image bytes for the given id.
    async fn read(&self, id: Uuid) -> ApiResult<Bytes>;

    /// Deletes the image bytes for the given id.
    async fn delete(&self, id: Uuid) -> ApiResult<()>;

    /// Returns the total size of all stored images.
    async fn total_size(&self) -> u64;
}

/// In-memory implementation of the image store.
pub struct MemoryImageStore {
    images: DashMap<Uuid, Bytes>,
    /// Current total size in bytes.
    current_size: AtomicU64,
    /// Maximum size limit (0 = unlimited).
    size_limit: u64,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self {
            images: DashMap::new(),
            current_size: AtomicU64::new(0),
            size_limit: 0,
        }
    }

    pub fn with_limit(limit: u64) -> Self {
        Self {
            images: DashMap::new(),
            current_size: AtomicU64::new(0),
            size_limit: limit,
        }
    }
}

impl Default for MemoryImageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn write(&self, id: Uuid, data: Bytes) -> ApiResult<()> {
        let size = data.len() as u64;

        if self.size_limit > 0 {
            let current = self.current_size.load(Ordering::Relaxed);
            if current + size > self.size_limit {
                return Err(ApiError::with_message(
                    ErrorCode::RequestBodyTooLarge,
                    "Image storage limit exceeded",
                ));
            }
        }

        if let Some(previous) = self.images.insert(id, data) {
            self.current_size
                .fetch_sub(previous.len() as u64, Ordering::Relaxed);
        }
        self.current_size.fetch_add(size, Ordering::Relaxed);
        Ok(())
    }

    async fn read(&self, id: Uuid) -> ApiResult<Bytes> {
        self.images
            .get(&id)
            .map(|data| data.clone())
            .ok_or_else(|| ApiError::new(ErrorCode::ImageNotFound))
    }

    async fn delete(&self, id: Uuid) -> ApiResult<()> {
        if let Some((_, data)) = self.images.remove(&id) {
            self.current_size
                .fetch_sub(data.len() as u64, Ordering::Relaxed);
        }
        Ok(())
    }

    async fn total_size(&self) -> u64 {
        self.current_size.load(Ordering::Relaxed)
    }
}

/// File system implementation of the image store.
pub struct FsImageStore {
    /// Base directory for image files.
    base_path: PathBuf,
    /// Sizes of stored images (for accounting).
    image_sizes: DashMap<Uuid, u64>,
    /// Current total size in bytes.
    current_size: AtomicU64,
}

impl FsImageStore {
    pub async fn new(base_path: PathBuf) -> ApiResult<Self> {
        fs::create_dir_all(&base_path).await.map_err(|e| {
            ApiError::with_message(
                ErrorCode::InternalError,
                format!("Failed to create image directory: {}", e),
            )
        })?;

        Ok(Self {
            base_path,
            image_sizes: DashMap::new(),
            current_size: AtomicU64::new(0),
        })
    }

    fn image_path(&self, id: Uuid) -> PathBuf {
        self.base_path.join(id.to_string())
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn write(&self, id: Uuid, data: Bytes) -> ApiResult<()> {
        let size = data.len() as u64;
        let path = self.image_path(id);

        let mut file = fs::File::create(&path).await.map_err(|e| {
            ApiError::with_message(
                ErrorCode::InternalError,
                format!("Failed to create image file: {}", e),
            )
        })?;

        file.write_all(&data).await.map_err(|e| {
            ApiError::with_message(
                ErrorCode::InternalError,
                format!("Failed to write image data: {}", e),
            )
        })?;

        if let Some((_, previous)) = self.image_sizes.remove(&id) {
            self.current_size.fetch_sub(previous, Ordering::Relaxed);
        }
        self.image_sizes.insert(id, size);
        self.current_size.fetch_add(size, Ordering::Relaxed);
        Ok(())
    }

    async fn read(&self, id: Uuid) -> ApiResult<Bytes> {
        let path = self.image_path(id);

        let data = fs::read(&path)
            .await
            .map_err(|_| ApiError::new(ErrorCode::ImageNotFound))?;

        Ok(Bytes::from(data))
    }

    async fn delete(&self, id: Uuid) -> ApiResult<()> {
        let path = self.image_path(id);

        if let Some((_, size)) = self.image_sizes.remove(&id) {
            self.current_size.fetch_sub(size, Ordering::Relaxed);
        }

        fs::remove_file(&path).await.ok(); // Ignore errors if file doesn't exist
        Ok(())
    }

    async fn total_size(&self) -> u64 {
        self.current_size.load(Ordering::Relaxed)
    }
}
