//! Uploaded exam document attached to a resident.
//!
//! # Responsibility
//! - Hold one opaque binary document plus its original file name.
//! - Expose the file-type hint used by pickers (`.pdf`).
//!
//! # Invariants
//! - `file_name` is never blank.
//! - Content is never inspected; the PDF check is a name-based hint only.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::Arc;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
const PDF_EXTENSION: &str = "pdf";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Exam attachment errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamError {
    EmptyFileName,
}

impl Display for ExamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyFileName => write!(f, "exam document file name cannot be empty"),
        }
    }
}

impl Error for ExamError {}

/// Opaque exam blob with its original file name.
///
/// Bytes are shared so that cloning a resident snapshot does not copy the
/// document. Only the name and content type are part of the wire shape.
///
/// Decoding goes through `ExamDocument::new`, so a blank `fileName` is
/// rejected and the content type is derived from the name again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawExamDocument")]
pub struct ExamDocument {
    file_name: String,
    content_type: String,
    #[serde(skip_serializing)]
    bytes: Arc<[u8]>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExamDocument {
    file_name: String,
}

impl TryFrom<RawExamDocument> for ExamDocument {
    type Error = ExamError;

    fn try_from(raw: RawExamDocument) -> Result<Self, Self::Error> {
        Self::new(raw.file_name, Vec::new())
    }
}

impl ExamDocument {
    /// Wraps document bytes under the given original file name.
    ///
    /// # Errors
    /// - `ExamError::EmptyFileName` when `file_name` is blank.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Result<Self, ExamError> {
        let file_name = file_name.into().trim().to_string();
        let bytes: Vec<u8> = bytes.into();
        if file_name.is_empty() {
            return Err(ExamError::EmptyFileName);
        }
        let content_type = if has_pdf_extension(&file_name) {
            PDF_CONTENT_TYPE
        } else {
            FALLBACK_CONTENT_TYPE
        };
        Ok(Self {
            file_name,
            content_type: content_type.to_string(),
            bytes: Arc::from(bytes),
        })
    }

    /// Name offered when the document is downloaded again.
    pub fn download_name(&self) -> &str {
        self.file_name.as_str()
    }

    pub fn content_type(&self) -> &str {
        self.content_type.as_str()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File-type filter hint; does not look at content.
    pub fn looks_like_pdf(&self) -> bool {
        has_pdf_extension(&self.file_name)
    }
}

/// Picker-side filter: accepts names ending in `.pdf` (any case).
pub fn has_pdf_extension(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PDF_EXTENSION))
}
