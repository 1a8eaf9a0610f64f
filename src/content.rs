/*!
 * Content records and the host collaborators the slug decision relies on.
 */

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Mutex;

/// The only content type slugs are generated for
pub const MANAGED_CONTENT_TYPE: &str = "post";

/// Host value for a publish date that has not been set
pub const UNSET_DATE_SENTINEL: &str = "0000-00-00 00:00:00";

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Publish date of a content record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublishDate {
    #[default]
    Unset,
    At(NaiveDateTime),
}

impl PublishDate {
    /// Parse a host date value.
    ///
    /// The unset sentinel, an empty string and unparseable values all read as
    /// `Unset`. Date-only values are taken at midnight.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == UNSET_DATE_SENTINEL {
            return Self::Unset;
        }

        for format in DATE_TIME_FORMATS {
            if let Ok(at) = NaiveDateTime::parse_from_str(value, format) {
                return Self::At(at);
            }
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map_or(Self::Unset, Self::At)
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::At(_))
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Unset => None,
            Self::At(at) => Some(*at),
        }
    }

    /// Value in the host's storage format
    pub fn to_storage_string(&self) -> String {
        match self {
            Self::Unset => UNSET_DATE_SENTINEL.to_string(),
            Self::At(at) => at.format(DATE_TIME_FORMATS[0]).to_string(),
        }
    }
}

impl From<NaiveDateTime> for PublishDate {
    fn from(at: NaiveDateTime) -> Self {
        Self::At(at)
    }
}

impl Serialize for PublishDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_storage_string())
    }
}

impl<'de> Deserialize<'de> for PublishDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map_or(Self::Unset, Self::parse))
    }
}

/// A content item as handed over by the host right before it is persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContentRecord {
    /// Present only when an existing item is being updated
    #[serde(default)]
    pub id: Option<i64>,

    /// Content type, e.g. "post" or "page"
    pub content_type: String,

    /// Title in the author's language
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub publish_date: PublishDate,

    /// URL slug; empty when none has been assigned
    #[serde(default)]
    pub slug: String,
}

impl ContentRecord {
    /// Create a new, not yet persisted record
    pub fn new(content_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: None,
            content_type: content_type.into(),
            title: title.into(),
            publish_date: PublishDate::Unset,
            slug: String::new(),
        }
    }

    /// Create a new post
    pub fn post(title: impl Into<String>) -> Self {
        Self::new(MANAGED_CONTENT_TYPE, title)
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_publish_date(mut self, publish_date: impl Into<PublishDate>) -> Self {
        self.publish_date = publish_date.into();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn is_managed_type(&self) -> bool {
        self.content_type == MANAGED_CONTENT_TYPE
    }
}

/// Lookup of what is already persisted for a content item
pub trait ContentStore: Send + Sync {
    /// Slug currently stored for `id`, or `None` if the item is unknown
    fn persisted_slug(&self, id: i64) -> Result<Option<String>>;
}

/// In-memory content store
#[derive(Debug, Default)]
pub struct InMemoryContentStore {
    slugs: Mutex<HashMap<i64, String>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the slug persisted for `id`
    pub fn set_slug(&self, id: i64, slug: impl Into<String>) {
        if let Ok(mut slugs) = self.slugs.lock() {
            slugs.insert(id, slug.into());
        }
    }
}

impl ContentStore for InMemoryContentStore {
    fn persisted_slug(&self, id: i64) -> Result<Option<String>> {
        let slugs = self
            .slugs
            .lock()
            .map_err(|e| anyhow::anyhow!("Failed to acquire content store lock: {}", e))?;
        Ok(slugs.get(&id).cloned())
    }
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// A clock stuck at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Midnight of the given day, or `None` for an invalid date
    pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
