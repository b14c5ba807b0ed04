//! Multipart request bodies for endpoints that accept file uploads.

/// A file picked in a form, ready to upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Build an upload, guessing the content type from the file extension.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.content_type == "application/pdf"
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPart {
    Text { name: String, value: String },
    File { name: String, file: FileUpload },
}

/// Ordered multipart form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl ToString) -> Self {
        self.parts.push(FormPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Add a text field only when a value is present.
    pub fn optional_text<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.text(name, value),
            None => self,
        }
    }

    pub fn file(mut self, name: &str, file: FileUpload) -> Self {
        self.parts.push(FormPart::File {
            name: name.to_string(),
            file,
        });
        self
    }

    /// Add a file only when one was picked.
    pub fn optional_file(self, name: &str, file: Option<&FileUpload>) -> Self {
        match file {
            Some(file) => self.file(name, file.clone()),
            None => self,
        }
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            FormPart::Text { name: n, value } if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn file_part(&self, name: &str) -> Option<&FileUpload> {
        self.parts.iter().find_map(|part| match part {
            FormPart::File { name: n, file } if n == name => Some(file),
            _ => None,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.iter().any(|part| match part {
            FormPart::Text { name: n, .. } | FormPart::File { name: n, .. } => n == name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_guess() {
        assert!(FileUpload::new("Report.PDF", vec![]).is_pdf());
        assert!(FileUpload::new("cover.jpeg", vec![]).is_image());
        assert_eq!(
            FileUpload::new("archive", vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn test_optional_parts() {
        let cover = FileUpload::new("cover.png", vec![1, 2, 3]);
        let form = MultipartForm::new()
            .text("title", "Annual report")
            .optional_text("capacity", Some(0))
            .optional_text::<String>("location", None)
            .optional_file("pdf", None)
            .optional_file("cover", Some(&cover));

        assert_eq!(form.text_value("title"), Some("Annual report"));
        assert_eq!(form.text_value("capacity"), Some("0"));
        assert!(!form.contains("location"));
        assert!(!form.contains("pdf"));
        assert_eq!(form.file_part("cover"), Some(&cover));
        assert_eq!(form.parts().len(), 3);
    }
}
