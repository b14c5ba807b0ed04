//! # Publications, services, seminars and journal issues
//!
//! Deserialisation targets for the content endpoints. Only `id` and `title` are
//! required; every other field defaults when the backend leaves it out, and
//! unknown fields are ignored. Dates are kept as the strings the backend sends
//! (usually RFC 3339); edit screens convert them to form-control format.
//!
//! | Struct | Endpoint | Files |
//! |--------|----------|-------|
//! | [`Publication`] | `/publications` | PDF document, optional cover image |
//! | [`Service`] | `/services` | optional image |
//! | [`Seminar`] | `/seminars` | image |
//! | [`Newspaper`] | `/newspapers` | PDF issue, optional cover image |

use serde::{Deserialize, Serialize};

use super::{non_empty, Entity};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Seminar {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub starts_at: Option<String>,
    #[serde(default)]
    pub location: String,
    /// Seats available. `Some(0)` is a real value (fully booked), not "unset".
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One issue of the journal archive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Newspaper {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub issue_number: Option<u32>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

impl Entity for Publication {
    fn id(&self) -> i64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn summary(&self) -> &str {
        &self.summary
    }
    fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }
}

impl Entity for Service {
    fn id(&self) -> i64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn summary(&self) -> &str {
        &self.summary
    }
    fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }
}

impl Entity for Seminar {
    fn id(&self) -> i64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn summary(&self) -> &str {
        &self.summary
    }
    fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }
}

impl Entity for Newspaper {
    fn id(&self) -> i64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn summary(&self) -> &str {
        &self.summary
    }
    fn category(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_publication() {
        let p: Publication =
            serde_json::from_value(json!({"id": 3, "title": "Code of Conduct", "extra": true}))
                .unwrap();
        assert_eq!(p.summary, "");
        assert_eq!(p.category(), None);
        assert!(p.pdf_url.is_none());
    }

    #[test]
    fn test_seminar_zero_capacity_survives() {
        let s: Seminar =
            serde_json::from_value(json!({"id": 1, "title": "AML basics", "capacity": 0})).unwrap();
        assert_eq!(s.capacity, Some(0));
    }
}
