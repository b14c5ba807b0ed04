//! Content entities served by the backend.

mod content;
mod report;

pub use content::{Newspaper, Publication, Seminar, Service};
pub use report::{Report, ReportStatus};

/// Fields every managed entity exposes to list screens.
pub trait Entity {
    fn id(&self) -> i64;
    fn title(&self) -> &str;
    fn summary(&self) -> &str;
    /// Category used by list filters; `None` when the entity has none.
    fn category(&self) -> Option<&str>;
}

pub(crate) fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
