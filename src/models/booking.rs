//! Booking data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

/// A reservation of spots on a scheduled class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingModel {
    pub id: Uuid,
    pub class_id: Uuid,
    pub name: String,
    pub email: String,
    pub spots: u32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl BookingModel {
    pub fn new(class_id: Uuid, name: String, email: String, spots: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            class_id,
            name,
            email,
            spots,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }
}
