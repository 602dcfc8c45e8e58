use anyhow::{Context, Result};
use enroll_core::payload::FileAttachment;
use enroll_core::profile::ValidationErrors;
use std::fs;
use std::path::Path;

/// Reads an image from disk into an attachment, guessing the MIME type
/// from the file name.
pub fn load_attachment(path: &Path) -> Result<FileAttachment> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read image file {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("profile")
        .to_string();
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(FileAttachment::new(file_name, mime_type, bytes))
}

/// Prints one line per violated field, in field order.
pub fn print_field_errors(errors: &ValidationErrors) {
    eprintln!("❌ Validation failed:");
    for (field, message) in errors.iter() {
        eprintln!("  {field}: {message}");
    }
}
