use std::path::Path;

/// Extensions the upload form accepts for study materials.
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

fn extension_lower(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Determines if a file name has one of the accepted document extensions.
pub fn is_accepted_document(file_name: &str) -> bool {
    extension_lower(file_name).is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext.as_str()))
}

/// Guesses the MIME type to hand to a download, defaulting to an octet stream.
pub fn content_type_for(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// A short, human-readable label for the document kind.
pub fn document_kind_label(file_name: &str) -> &'static str {
    match extension_lower(file_name).as_deref() {
        Some("pdf") => "PDF",
        Some("doc") | Some("docx") => "Word",
        _ => "File",
    }
}
