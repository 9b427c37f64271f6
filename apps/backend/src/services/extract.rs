//! Text extraction from uploaded files.

use crate::error::{ApiError, Result};

/// Maximum accepted size per uploaded file.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024; // 10MB per file

pub const ALLOWED_EXTENSIONS: &[&str] = &[".pdf", ".txt", ".md"];

pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "text/markdown",
    "text/x-markdown",
];

/// Lowercased extension of a file name, including the dot.
fn extension(file_name: &str) -> Option<String> {
    file_name.rfind('.').map(|idx| file_name[idx..].to_lowercase())
}

/// Check extension/MIME against the allow lists.
pub fn validate_file(file_name: &str, content_type: Option<&str>) -> Result<()> {
    let ext_allowed = extension(file_name)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    let mime_allowed = content_type
        .map(|mime| ALLOWED_MIME_TYPES.contains(&mime))
        .unwrap_or(false);

    if !ext_allowed && !mime_allowed {
        return Err(ApiError::BadRequest(format!(
            "Invalid file type for \"{file_name}\". Allowed: .pdf, .txt, .md"
        )));
    }
    Ok(())
}

/// Decode file bytes to text. PDFs go through pdf-extract; everything else
/// is treated as UTF-8 text.
pub fn extract_text(data: &[u8], file_name: &str, content_type: Option<&str>) -> Result<String> {
    let is_pdf = extension(file_name).as_deref() == Some(".pdf")
        || content_type == Some("application/pdf");

    if is_pdf {
        return pdf_extract::extract_text_from_mem(data)
            .map_err(|e| ApiError::Extraction(format!("PDF extraction error for \"{file_name}\": {e}")));
    }

    Ok(String::from_utf8_lossy(data).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_files_pass_through_as_utf8() {
        let text = extract_text(b"# Notes\nplain text", "notes.txt", Some("text/plain")).unwrap();
        assert_eq!(text, "# Notes\nplain text");
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let text = extract_text(&[0x66, 0xFF, 0x6F], "notes.txt", None).unwrap();
        assert_eq!(text, "f\u{fffd}o");
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert!(validate_file("NOTES.MD", None).is_ok());
        assert!(validate_file("slides.Pdf", None).is_ok());
    }

    #[test]
    fn mime_type_alone_is_sufficient() {
        assert!(validate_file("upload", Some("text/markdown")).is_ok());
    }

    #[test]
    fn unknown_types_are_rejected() {
        let err = validate_file("malware.exe", Some("application/octet-stream")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(err.to_string().contains("malware.exe"));
    }

    #[test]
    fn file_without_extension_and_mime_is_rejected() {
        assert!(validate_file("README", None).is_err());
    }

    #[test]
    fn invalid_pdf_bytes_fail_extraction() {
        let result = extract_text(b"not a pdf", "broken.pdf", Some("application/pdf"));
        assert!(matches!(result, Err(ApiError::Extraction(_))));
    }
}
