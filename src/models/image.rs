//! Image metadata model. Image bytes live in the image store; only the
//! descriptive record is kept here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageModel {
    pub id: Uuid,
    pub content_type: String,
    pub size: u64,
    /// Base64 MD5 digest of the image bytes.
    pub md5: String,
    pub uploaded_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl ImageModel {
    pub fn new(id: Uuid, content_type: String, size: u64, md5: String, uploaded_by: Uuid) -> Self {
        Self {
            id,
            content_type,
            size,
            md5,
            uploaded_by,
            created_at: Utc::now(),
        }
    }
}
