//! Thought record model.
//!
//! # Responsibility
//! - Define the canonical captured-thought record and its wire names.
//! - Provide folder/view-mode vocabulary shared by stores and services.
//!
//! # Invariants
//! - `id` is non-empty and never reassigned.
//! - `created_at` is always present; `updated_at` falls back to it.
//! - Empty optional strings behave exactly like absent ones.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque store-assigned identifier.
pub type ThoughtId = String;

/// Input channel a thought was captured through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Text,
    Image,
    Voice,
    Link,
    /// Also used for unknown or missing wire values.
    #[default]
    #[serde(other)]
    Other,
}

impl Modality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Voice => "voice",
            Self::Link => "link",
            Self::Other => "other",
        }
    }

    /// Parses a wire value; anything unrecognized maps to `Other`.
    pub fn parse(value: &str) -> Self {
        match value {
            "text" => Self::Text,
            "image" => Self::Image,
            "voice" => Self::Voice,
            "link" => Self::Link,
            _ => Self::Other,
        }
    }
}

/// Folders the remote store classifies thoughts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Folder {
    Inbox,
    Ideas,
    Tasks,
    Reads,
    Notes,
}

impl Folder {
    /// Folders merged by overview mode, in fetch order.
    pub const OVERVIEW: [Folder; 3] = [Folder::Tasks, Folder::Notes, Folder::Inbox];

    /// Store key used in `list_by_folder` calls.
    pub fn key(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Ideas => "ideas",
            Self::Tasks => "tasks",
            Self::Reads => "reads",
            Self::Notes => "notes",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Inbox => "Inbox",
            Self::Ideas => "Ideas",
            Self::Tasks => "Tasks",
            Self::Reads => "Reads",
            Self::Notes => "Notes",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "inbox" => Some(Self::Inbox),
            "ideas" => Some(Self::Ideas),
            "tasks" => Some(Self::Tasks),
            "reads" => Some(Self::Reads),
            "notes" => Some(Self::Notes),
            _ => None,
        }
    }
}

/// Which collection an overview report is computed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "folder", rename_all = "snake_case")]
pub enum ViewMode {
    /// Merge of `Folder::OVERVIEW`.
    Overview,
    /// One store folder, forwarded unchanged.
    Folder(String),
}

impl ViewMode {
    pub const OVERVIEW_REGION_KEY: &'static str = "overview";

    /// Maps a board region key to a view mode.
    pub fn from_region_key(key: &str) -> Self {
        if key == Self::OVERVIEW_REGION_KEY {
            Self::Overview
        } else {
            Self::Folder(key.to_string())
        }
    }
}

impl Display for ViewMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overview => write!(f, "overview"),
            Self::Folder(key) => write!(f, "folder:{key}"),
        }
    }
}

/// Validation errors for thought records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThoughtValidationError {
    EmptyId,
}

impl Display for ThoughtValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "thought id must not be empty"),
        }
    }
}

impl Error for ThoughtValidationError {}

/// One captured thought as delivered by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThoughtRecord {
    pub id: ThoughtId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "wire::modality")]
    pub modality: Modality,
    #[serde(default)]
    pub source_url: Option<String>,
    /// Presence implies visual content.
    #[serde(default, rename = "image_data_url")]
    pub image_ref: Option<String>,
    /// Store-assigned folder key.
    #[serde(default, deserialize_with = "wire::string_or_empty")]
    pub folder: String,
    #[serde(deserialize_with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Null, empty or unparseable values read as absent.
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    /// Raw structured due value; parsed lazily by the due-date extractor.
    #[serde(default)]
    pub due_at: Option<String>,
}

impl ThoughtRecord {
    /// Creates a record with a generated id and no optional fields.
    pub fn new(folder: impl Into<String>, modality: Modality, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), folder, modality, created_at)
    }

    /// Creates a record with a caller-provided id.
    pub fn with_id(
        id: impl Into<ThoughtId>,
        folder: impl Into<String>,
        modality: Modality,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: None,
            content: None,
            modality,
            source_url: None,
            image_ref: None,
            folder: folder.into(),
            created_at,
            updated_at: None,
            completed: None,
            status: None,
            due_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), ThoughtValidationError> {
        if self.id.trim().is_empty() {
            return Err(ThoughtValidationError::EmptyId);
        }
        Ok(())
    }

    /// `updated_at` when present, otherwise `created_at`.
    pub fn effective_updated_at(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }

    pub fn title_text(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    pub fn content_text(&self) -> Option<&str> {
        non_empty(self.content.as_deref())
    }

    /// Title and content joined by one space, title first.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {}",
            self.title_text().unwrap_or_default(),
            self.content_text().unwrap_or_default()
        )
    }

    pub fn has_image(&self) -> bool {
        non_empty(self.image_ref.as_deref()).is_some()
    }
}

/// Parses a store timestamp: RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` or
/// `YYYY-MM-DD HH:MM:SS[.f]` (read as UTC), or a bare date (UTC midnight).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

/// Lenient decoders for store payloads.
mod wire {
    use super::{parse_timestamp, Modality};
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub(super) fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
    }

    pub(super) fn optional_timestamp<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(parse_timestamp))
    }

    pub(super) fn modality<'de, D>(deserializer: D) -> Result<Modality, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Modality::parse).unwrap_or_default())
    }

    pub(super) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }
}
