//! Whistleblower reports and their triage status.

use serde::{Deserialize, Serialize};

use super::{non_empty, Entity};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    New,
    InReview,
    Resolved,
    Dismissed,
    /// A status this build does not know about yet.
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    /// Statuses an administrator can assign.
    pub const ASSIGNABLE: [ReportStatus; 4] = [
        ReportStatus::New,
        ReportStatus::InReview,
        ReportStatus::Resolved,
        ReportStatus::Dismissed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::New => "new",
            ReportStatus::InReview => "in_review",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Dismissed => "dismissed",
            ReportStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::New => "New",
            ReportStatus::InReview => "In review",
            ReportStatus::Resolved => "Resolved",
            ReportStatus::Dismissed => "Dismissed",
            ReportStatus::Unknown => "Unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ASSIGNABLE.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Reporter contact, absent for anonymous reports.
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub attachment_url: Option<String>,
}

impl Entity for Report {
    fn id(&self) -> i64 {
        self.id
    }
    fn title(&self) -> &str {
        &self.subject
    }
    fn summary(&self) -> &str {
        &self.description
    }
    fn category(&self) -> Option<&str> {
        non_empty(&self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_wire_format() {
        let r: Report = serde_json::from_value(
            json!({"id": 5, "subject": "Invoice fraud", "status": "in_review"}),
        )
        .unwrap();
        assert_eq!(r.status, ReportStatus::InReview);
        assert_eq!(serde_json::to_value(ReportStatus::InReview).unwrap(), json!("in_review"));
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let r: Report =
            serde_json::from_value(json!({"id": 5, "subject": "x", "status": "escalated"})).unwrap();
        assert_eq!(r.status, ReportStatus::Unknown);
        assert_eq!(ReportStatus::parse("escalated"), None);
        assert_eq!(ReportStatus::parse("resolved"), Some(ReportStatus::Resolved));
    }
}
