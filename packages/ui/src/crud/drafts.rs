//! Per-entity drafts.
//!
//! File fields come in pairs: the newly picked upload (`pdf`, `cover`, ...) and
//! the URL the entity already has (`existing_pdf`, ...). In edit mode a missing
//! upload is left out of the payload so the backend keeps the stored file.

use api::{
    FileUpload, MultipartForm, Newspaper, Newspapers, Publication, Publications, Seminar, Seminars,
    Service, Services,
};

use super::{to_date_input, to_datetime_input, Draft, EditMode, ValidationErrors};

fn check_pdf(errors: &mut ValidationErrors, field: &'static str, file: Option<&FileUpload>) {
    if file.is_some_and(|f| !f.is_pdf()) {
        errors.add(field, "Please choose a PDF file.");
    }
}

fn check_image(errors: &mut ValidationErrors, field: &'static str, file: Option<&FileUpload>) {
    if file.is_some_and(|f| !f.is_image()) {
        errors.add(field, "Please choose an image file.");
    }
}

fn require_file_on_create(
    errors: &mut ValidationErrors,
    mode: EditMode,
    field: &'static str,
    label: &str,
    file: Option<&FileUpload>,
) {
    if mode.is_create() && file.is_none() {
        errors.add(field, format!("{label} is required."));
    }
}

fn non_blank(value: &str) -> Option<&str> {
    Some(value.trim()).filter(|v| !v.is_empty())
}

/// A date the user may clear: blank is sent as `""` when the entity had one,
/// so the backend drops it, and left out otherwise.
fn clearable(value: &str, stored: bool) -> Option<&str> {
    non_blank(value).or(stored.then_some(""))
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PublicationDraft {
    pub title: String,
    pub summary: String,
    pub category: String,
    /// `YYYY-MM-DD`
    pub published_at: String,
    /// The stored entity had a publication date.
    pub had_published_at: bool,
    pub pdf: Option<FileUpload>,
    pub cover: Option<FileUpload>,
    pub existing_pdf: Option<String>,
    pub existing_cover: Option<String>,
}

impl Draft for PublicationDraft {
    type Resource = Publications;

    fn from_entity(p: &Publication) -> Self {
        Self {
            title: p.title.clone(),
            summary: p.summary.clone(),
            category: p.category.clone(),
            published_at: to_date_input(p.published_at.as_deref()),
            had_published_at: p.published_at.is_some(),
            pdf: None,
            cover: None,
            existing_pdf: p.pdf_url.clone(),
            existing_cover: p.cover_url.clone(),
        }
    }

    fn validate(&self, mode: EditMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", &self.title);
        require_file_on_create(&mut errors, mode, "pdf", "PDF document", self.pdf.as_ref());
        check_pdf(&mut errors, "pdf", self.pdf.as_ref());
        check_image(&mut errors, "cover", self.cover.as_ref());
        errors.into_result()
    }

    fn to_submission_payload(&self) -> MultipartForm {
        MultipartForm::new()
            .text("title", self.title.trim())
            .text("summary", &self.summary)
            .text("category", self.category.trim())
            .optional_text("published_at", clearable(&self.published_at, self.had_published_at))
            .optional_file("pdf", self.pdf.as_ref())
            .optional_file("cover", self.cover.as_ref())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ServiceDraft {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub category: String,
    pub image: Option<FileUpload>,
    pub existing_image: Option<String>,
}

impl Draft for ServiceDraft {
    type Resource = Services;

    fn from_entity(s: &Service) -> Self {
        Self {
            title: s.title.clone(),
            summary: s.summary.clone(),
            description: s.description.clone(),
            category: s.category.clone(),
            image: None,
            existing_image: s.image_url.clone(),
        }
    }

    fn validate(&self, _mode: EditMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", &self.title);
        check_image(&mut errors, "image", self.image.as_ref());
        errors.into_result()
    }

    fn to_submission_payload(&self) -> MultipartForm {
        MultipartForm::new()
            .text("title", self.title.trim())
            .text("summary", &self.summary)
            .text("description", &self.description)
            .text("category", self.category.trim())
            .optional_file("image", self.image.as_ref())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeminarDraft {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub category: String,
    /// `YYYY-MM-DDTHH:MM`
    pub starts_at: String,
    pub location: String,
    pub capacity: Option<u32>,
    pub image: Option<FileUpload>,
    pub existing_image: Option<String>,
}

impl Draft for SeminarDraft {
    type Resource = Seminars;

    fn from_entity(s: &Seminar) -> Self {
        Self {
            title: s.title.clone(),
            summary: s.summary.clone(),
            description: s.description.clone(),
            category: s.category.clone(),
            starts_at: to_datetime_input(s.starts_at.as_deref()),
            location: s.location.clone(),
            capacity: s.capacity,
            image: None,
            existing_image: s.image_url.clone(),
        }
    }

    fn validate(&self, mode: EditMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", &self.title);
        errors.require_text("starts_at", "Start date", &self.starts_at);
        require_file_on_create(&mut errors, mode, "image", "Image", self.image.as_ref());
        check_image(&mut errors, "image", self.image.as_ref());
        errors.into_result()
    }

    fn to_submission_payload(&self) -> MultipartForm {
        MultipartForm::new()
            .text("title", self.title.trim())
            .text("summary", &self.summary)
            .text("description", &self.description)
            .text("category", self.category.trim())
            .text("starts_at", self.starts_at.trim())
            .text("location", self.location.trim())
            .optional_text("capacity", self.capacity)
            .optional_file("image", self.image.as_ref())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewspaperDraft {
    pub title: String,
    pub issue_number: Option<u32>,
    pub summary: String,
    /// `YYYY-MM-DD`
    pub published_at: String,
    /// The stored entity had a publication date.
    pub had_published_at: bool,
    pub pdf: Option<FileUpload>,
    pub cover: Option<FileUpload>,
    pub existing_pdf: Option<String>,
    pub existing_cover: Option<String>,
}

impl Draft for NewspaperDraft {
    type Resource = Newspapers;

    fn from_entity(n: &Newspaper) -> Self {
        Self {
            title: n.title.clone(),
            issue_number: n.issue_number,
            summary: n.summary.clone(),
            published_at: to_date_input(n.published_at.as_deref()),
            had_published_at: n.published_at.is_some(),
            pdf: None,
            cover: None,
            existing_pdf: n.pdf_url.clone(),
            existing_cover: n.cover_url.clone(),
        }
    }

    fn validate(&self, mode: EditMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("title", "Title", &self.title);
        require_file_on_create(&mut errors, mode, "pdf", "PDF issue", self.pdf.as_ref());
        check_pdf(&mut errors, "pdf", self.pdf.as_ref());
        check_image(&mut errors, "cover", self.cover.as_ref());
        errors.into_result()
    }

    fn to_submission_payload(&self) -> MultipartForm {
        MultipartForm::new()
            .text("title", self.title.trim())
            .optional_text("issue_number", self.issue_number)
            .text("summary", &self.summary)
            .optional_text("published_at", clearable(&self.published_at, self.had_published_at))
            .optional_file("pdf", self.pdf.as_ref())
            .optional_file("cover", self.cover.as_ref())
    }
}

/// Public whistleblower submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReportDraft {
    pub subject: String,
    pub description: String,
    pub category: String,
    /// Ignored when `anonymous` is set.
    pub contact: String,
    pub anonymous: bool,
    pub attachment: Option<FileUpload>,
}

impl ReportDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("subject", "Subject", &self.subject);
        errors.require_text("description", "Description", &self.description);
        errors.into_result()
    }

    pub fn to_submission_payload(&self) -> MultipartForm {
        let contact = if self.anonymous {
            None
        } else {
            non_blank(&self.contact)
        };
        MultipartForm::new()
            .text("subject", self.subject.trim())
            .text("description", &self.description)
            .text("category", self.category.trim())
            .text("anonymous", self.anonymous)
            .optional_text("contact", contact)
            .optional_file("attachment", self.attachment.as_ref())
    }
}
