//! Class schedule data models.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discipline taught in a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    #[default]
    Yoga,
    Pilates,
    Meditation,
    Breathwork,
    Sound,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Yoga => "yoga",
            Discipline::Pilates => "pilates",
            Discipline::Meditation => "meditation",
            Discipline::Breathwork => "breathwork",
            Discipline::Sound => "sound",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "yoga" => Some(Discipline::Yoga),
            "pilates" => Some(Discipline::Pilates),
            "meditation" => Some(Discipline::Meditation),
            "breathwork" => Some(Discipline::Breathwork),
            "sound" => Some(Discipline::Sound),
            _ => None,
        }
    }
}

/// A scheduled class on the studio timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassModel {
    pub id: Uuid,
    pub title: String,
    pub discipline: Discipline,
    pub description: String,
    pub instructor: String,
    pub room: String,
    pub starts_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub capacity: u32,
    /// Uploaded image shown on the class page.
    pub image_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClassModel {
    pub fn new(
        title: String,
        discipline: Discipline,
        description: String,
        instructor: String,
        room: String,
        starts_at: DateTime<Utc>,
        duration_minutes: u32,
        capacity: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            discipline,
            description,
            instructor,
            room,
            starts_at,
            duration_minutes,
            capacity,
            image_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Updates the modification time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn ends_at(&self) -> DateTime<Utc> {
        self.starts_at + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Whether the class has already started at `now`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now
    }
}
