//! # CRUD managers
//!
//! Every managed content type follows one pattern: a list screen over
//! [`ManagerList`] and an edit screen over a typed [`Draft`]. The edit screen
//! runs in one of two [`EditMode`]s, picked by whether the route carries an id.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`drafts`] | One draft struct per entity, with validation and multipart conversion |
//! | [`list`] | Client-side filtering, search and two-step delete |
//! | [`editor`] | `use_draft_editor` hook: load, validate, submit |
//! | [`components`] | Shared table, form fields, file picker and confirm dialog |

use std::fmt;

use api::{MultipartForm, Resource};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub mod components;
pub mod drafts;
pub mod editor;
pub mod list;

pub use components::{
    excerpt, ConfirmDelete, ErrorBanner, FilePicker, FormField, ManagerTable, RetryBanner,
};
pub use drafts::{NewspaperDraft, PublicationDraft, ReportDraft, SeminarDraft, ServiceDraft};
pub use editor::{use_draft_editor, DraftEditor};
pub use list::ManagerList;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Edit(i64),
}

impl EditMode {
    pub fn from_id(id: Option<i64>) -> Self {
        match id {
            Some(id) => EditMode::Edit(id),
            None => EditMode::Create,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, EditMode::Create)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Client-side validation failures, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn require_text(&mut self, field: &'static str, label: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{label} is required."));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.first() {
            Some(first) => write!(f, "{}", first.message),
            None => write!(f, "No validation errors"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

/// Form-side representation of one entity.
///
/// Drafts carry typed optional fields so a value that is present but falsy
/// (an empty category, a capacity of zero) is submitted rather than dropped.
pub trait Draft: Clone + Default + PartialEq + 'static {
    type Resource: Resource;

    /// Populate a draft from a fetched entity, converting dates to input format.
    fn from_entity(entity: &<Self::Resource as Resource>::Entity) -> Self;

    fn validate(&self, mode: EditMode) -> Result<(), ValidationErrors>;

    fn to_submission_payload(&self) -> MultipartForm;
}

fn parse_server_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Server date to `<input type="date">` value (`YYYY-MM-DD`). Unparseable input gives `""`.
pub fn to_date_input(raw: Option<&str>) -> String {
    raw.and_then(parse_server_datetime)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Server date to `<input type="datetime-local">` value (`YYYY-MM-DDTHH:MM`).
pub fn to_datetime_input(raw: Option<&str>) -> String {
    raw.and_then(parse_server_datetime)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

/// Parse a non-negative count typed into a number field. Blank means unset.
pub fn parse_count(raw: &str) -> Result<Option<u32>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| format!("\"{raw}\" is not a whole number."))
}

/// A list filter taken from the query string. Blank means no filter.
pub fn filter_param(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_mode_from_route() {
        assert_eq!(EditMode::from_id(None), EditMode::Create);
        assert_eq!(EditMode::from_id(Some(9)), EditMode::Edit(9));
        assert!(EditMode::Create.is_create());
    }

    #[test]
    fn test_date_inputs() {
        assert_eq!(to_date_input(Some("2024-03-05T14:30:00Z")), "2024-03-05");
        assert_eq!(to_date_input(Some("2024-03-05")), "2024-03-05");
        assert_eq!(to_date_input(Some("2024-03-05 08:00:00")), "2024-03-05");
        assert_eq!(to_date_input(Some("not a date")), "");
        assert_eq!(to_date_input(None), "");
    }

    #[test]
    fn test_datetime_input_keeps_sender_wall_clock() {
        assert_eq!(
            to_datetime_input(Some("2024-03-05T14:30:00+02:00")),
            "2024-03-05T14:30"
        );
        assert_eq!(
            to_datetime_input(Some("2024-03-05T14:30:59.123")),
            "2024-03-05T14:30"
        );
        assert_eq!(to_datetime_input(Some("2024-03-05")), "2024-03-05T00:00");
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(""), Ok(None));
        assert_eq!(parse_count(" 0 "), Ok(Some(0)));
        assert_eq!(parse_count("40"), Ok(Some(40)));
        assert!(parse_count("-1").is_err());
        assert!(parse_count("many").is_err());
    }

    #[test]
    fn test_filter_param() {
        assert_eq!(filter_param(""), None);
        assert_eq!(filter_param("  "), None);
        assert_eq!(filter_param(" guides "), Some("guides".to_string()));
    }

    #[test]
    fn test_validation_errors() {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", "  ");
        errors.require_text("summary", "Summary", "ok");
        assert_eq!(errors.get("title"), Some("Title is required."));
        assert_eq!(errors.get("summary"), None);
        assert_eq!(errors.to_string(), "Title is required.");
        assert!(errors.into_result().is_err());
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
