//! Exam document import/export against the local file system.

use anyhow::{bail, Context, Result};
use carelog_core::{has_pdf_extension, ExamDocument};
use std::path::{Path, PathBuf};

const FALLBACK_EXPORT_NAME: &str = "exam.pdf";

/// Reads a document the way a `.pdf`-filtered file picker would accept it.
pub fn load_exam(path: &Path) -> Result<ExamDocument> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("`{}` has no usable file name", path.display()))?;
    if !has_pdf_extension(file_name) {
        bail!("only .pdf documents can be attached, got `{file_name}`");
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    Ok(ExamDocument::new(file_name, bytes)?)
}

/// Writes the document into `dir` under its original file name.
pub fn export_exam(document: &ExamDocument, dir: &Path) -> Result<PathBuf> {
    let name = Path::new(document.download_name())
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(FALLBACK_EXPORT_NAME);
    let target = dir.join(name);
    std::fs::write(&target, document.bytes())
        .with_context(|| format!("failed to write `{}`", target.display()))?;
    Ok(target)
}
