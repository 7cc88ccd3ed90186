//! Filename safety for uploaded originals.
//!
//! Uploaded filenames are attacker-controlled: they may carry path
//! components, control characters, or names long enough to break the
//! filesystem. Everything written under the uploads directory goes through
//! [`sanitize_filename`] first.

use crate::defaults::FILENAME_MAX_LENGTH;

/// Sanitize a client-supplied filename for safe storage.
///
/// Strips path components, replaces dangerous characters with `_`, and
/// truncates to [`FILENAME_MAX_LENGTH`] preserving the extension. Empty or
/// whitespace-only names become `unnamed_file`.
pub fn sanitize_filename(filename: &str) -> String {
    // Remove path components
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    // Replace dangerous characters
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let sanitized = sanitized.trim();
    if sanitized.is_empty() {
        return "unnamed_file".to_string();
    }

    // Truncate if too long (preserve extension)
    if sanitized.len() > FILENAME_MAX_LENGTH {
        if let Some(dot_pos) = sanitized.rfind('.') {
            let ext = &sanitized[dot_pos..];
            let name = &sanitized[..FILENAME_MAX_LENGTH - ext.len()];
            return format!("{}{}", name, ext);
        }
        return sanitized[..FILENAME_MAX_LENGTH].to_string();
    }

    sanitized.to_string()
}

/// Split a filename into (stem, extension), if it has an extension.
pub fn split_extension(filename: &str) -> Option<(&str, &str)> {
    filename
        .rsplit_once('.')
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_path() {
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
        assert_eq!(
            sanitize_filename("C:\\Windows\\system32.dll"),
            "system32.dll"
        );
        assert_eq!(sanitize_filename("../../escape.txt"), "escape.txt");
    }

    #[test]
    fn test_sanitize_removes_dangerous_chars() {
        assert_eq!(sanitize_filename("file<>:test.txt"), "file___test.txt");
        assert_eq!(sanitize_filename("file|name?.txt"), "file_name_.txt");
    }

    #[test]
    fn test_sanitize_replaces_control_chars() {
        assert_eq!(sanitize_filename("a\tb\nc.txt"), "a_b_c.txt");
    }

    #[test]
    fn test_sanitize_truncates_long_names() {
        let long_name = format!("{}.txt", "a".repeat(300));
        let sanitized = sanitize_filename(&long_name);
        assert!(sanitized.len() <= FILENAME_MAX_LENGTH);
        assert!(sanitized.ends_with(".txt"));
    }

    #[test]
    fn test_sanitize_handles_empty() {
        assert_eq!(sanitize_filename(""), "unnamed_file");
        assert_eq!(sanitize_filename("   "), "unnamed_file");
    }

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("paper.pdf"), Some(("paper", "pdf")));
        assert_eq!(
            split_extension("notes.2026.txt"),
            Some(("notes.2026", "txt"))
        );
        assert_eq!(split_extension("README"), None);
        assert_eq!(split_extension(".gitignore"), None);
    }
}
