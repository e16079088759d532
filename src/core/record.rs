//! The event record and its field-update payload

use crate::core::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status tags used by the booking workflow
pub mod status {
    pub const DRAFT: &str = "draft";
    pub const PROCESSING: &str = "processing";
    pub const CONFIRMED: &str = "confirmed";
    pub const CANCELLED: &str = "cancelled";

    /// Every status the workflow knows about, in workflow order
    pub const ALL: &[&str] = &[DRAFT, PROCESSING, CONFIRMED, CANCELLED];
}

/// User name that may manage every record regardless of authorship
pub const ADMIN_USER: &str = "admin";

/// One entry of a record's menu or services list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub name: String,

    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Unit price
    #[serde(default)]
    pub price: f64,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    pub fn new(name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }

    pub fn cost(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// An event booking
///
/// `id`, `author` and `created_at` are write-once: [`RecordPatch::apply_to`]
/// never changes them. Whether a record may enter a store is decided by
/// [`crate::core::validation::validate`], not by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,

    pub description: String,

    #[serde(with = "timestamp::iso")]
    pub created_at: DateTime<Utc>,

    pub author: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_link: Option<String>,

    #[serde(
        default,
        with = "timestamp::iso_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests_count: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hall: Option<String>,

    #[serde(default)]
    pub menu: Vec<LineItem>,

    #[serde(default)]
    pub services: Vec<LineItem>,
}

impl Record {
    /// Create a new draft record with a fresh id and `created_at = now`
    pub fn new(author: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), author, description, Utc::now())
    }

    /// Create a draft record with explicit identity fields
    pub fn with_id(
        id: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            created_at,
            author: author.into(),
            title: None,
            photo_link: None,
            date: None,
            guests_count: None,
            event_type: None,
            status: Some(status::DRAFT.to_string()),
            hall: None,
            menu: Vec::new(),
            services: Vec::new(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn photo_link(mut self, link: impl Into<String>) -> Self {
        self.photo_link = Some(link.into());
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn guests(mut self, count: i64) -> Self {
        self.guests_count = Some(count);
        self
    }

    pub fn event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn hall(mut self, hall: impl Into<String>) -> Self {
        self.hall = Some(hall.into());
        self
    }

    pub fn menu(mut self, items: Vec<LineItem>) -> Self {
        self.menu = items;
        self
    }

    pub fn services(mut self, items: Vec<LineItem>) -> Self {
        self.services = items;
        self
    }

    /// Whether `user` may edit or cancel this record
    pub fn can_be_managed_by(&self, user: &str) -> bool {
        user == self.author || user == ADMIN_USER
    }

    pub fn menu_total(&self) -> f64 {
        self.menu.iter().map(LineItem::cost).sum()
    }

    pub fn services_total(&self) -> f64 {
        self.services.iter().map(LineItem::cost).sum()
    }
}

/// Field-level update for [`Record`]
///
/// Fields left as `None` keep their current value. The write-once fields
/// (`id`, `author`, `created_at`) are accepted so that payloads scraped from
/// a form deserialize, but they are discarded when the patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordPatch {
    pub id: Option<String>,
    pub author: Option<String>,
    #[serde(with = "timestamp::iso_option")]
    pub created_at: Option<DateTime<Utc>>,

    pub description: Option<String>,
    pub title: Option<String>,
    pub photo_link: Option<String>,
    #[serde(with = "timestamp::iso_option")]
    pub date: Option<DateTime<Utc>>,
    pub guests_count: Option<i64>,
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub hall: Option<String>,
    pub menu: Option<Vec<LineItem>>,
    pub services: Option<Vec<LineItem>>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn guests(mut self, count: i64) -> Self {
        self.guests_count = Some(count);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn hall(mut self, hall: impl Into<String>) -> Self {
        self.hall = Some(hall.into());
        self
    }

    /// Whether the patch tries to change a write-once field
    pub fn touches_write_once(&self) -> bool {
        self.id.is_some() || self.author.is_some() || self.created_at.is_some()
    }

    /// Merge this patch over `existing`, keeping its write-once fields
    pub fn apply_to(&self, existing: &Record) -> Record {
        let mut merged = existing.clone();

        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(title) = &self.title {
            merged.title = Some(title.clone());
        }
        if let Some(link) = &self.photo_link {
            merged.photo_link = Some(link.clone());
        }
        if let Some(date) = self.date {
            merged.date = Some(date);
        }
        if let Some(count) = self.guests_count {
            merged.guests_count = Some(count);
        }
        if let Some(event_type) = &self.event_type {
            merged.event_type = Some(event_type.clone());
        }
        if let Some(status) = &self.status {
            merged.status = Some(status.clone());
        }
        if let Some(hall) = &self.hall {
            merged.hall = Some(hall.clone());
        }
        if let Some(menu) = &self.menu {
            merged.menu = menu.clone();
        }
        if let Some(services) = &self.services {
            merged.services = services.clone();
        }

        merged
    }
}
