//! Administrator and invitation data models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An administrator account.
///
/// The access key never leaves the server after account creation; it is
/// excluded from serialized output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminModel {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub key: String,
    /// Admin who issued the invitation, absent for bootstrap accounts.
    pub invited_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl AdminModel {
    pub fn new(email: String, name: String, key: String, invited_by: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            key,
            invited_by,
            created_at: Utc::now(),
        }
    }
}

/// A single-use invitation to create an administrator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteModel {
    pub token: String,
    pub email: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub redeemed: bool,
}

impl InviteModel {
    pub fn new(email: String, created_by: Uuid, ttl_days: i64) -> Self {
        let now = Utc::now();
        Self {
            token: Uuid::new_v4().to_string(),
            email,
            created_by,
            created_at: now,
            expires_at: now + Duration::days(ttl_days),
            redeemed: false,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
