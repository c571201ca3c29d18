//! The finished, downloadable result of an export.

use std::io;
use std::path::{Path, PathBuf};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

const DEFAULT_STEM: &str = "project";
const FILENAME_SUFFIX: &str = "-SRS";

/// Opaque document bytes plus a suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    bytes: Vec<u8>,
    filename: String,
    media_type: &'static str,
}

impl ExportArtifact {
    /// Wraps PDF bytes, deriving `<project>-SRS.pdf` from the project name.
    pub fn pdf(project_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            filename: suggested_filename(project_name, "pdf"),
            media_type: PDF_MEDIA_TYPE,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Writes the artifact into `dir` under its suggested filename.
    pub fn save_into(&self, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Builds `<sanitized project name or "project">-SRS.<extension>`.
pub fn suggested_filename(project_name: &str, extension: &str) -> String {
    let sanitized: String = project_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = sanitized.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let stem = if stem.is_empty() { DEFAULT_STEM } else { stem };
    format!("{stem}{FILENAME_SUFFIX}.{extension}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_keeps_readable_names() {
        assert_eq!(
            suggested_filename("Smart Attendance Management System", "pdf"),
            "Smart Attendance Management System-SRS.pdf"
        );
    }

    #[test]
    fn filename_falls_back_when_empty() {
        assert_eq!(suggested_filename("", "pdf"), "project-SRS.pdf");
        assert_eq!(suggested_filename("   ", "pdf"), "project-SRS.pdf");
        assert_eq!(suggested_filename("..", "pdf"), "project-SRS.pdf");
    }

    #[test]
    fn filename_replaces_path_separators() {
        assert_eq!(suggested_filename("a/b\\c:d", "pdf"), "a_b_c_d-SRS.pdf");
    }

    #[test]
    fn save_into_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ExportArtifact::pdf("Demo", b"%PDF-1.7".to_vec());
        let path = artifact.save_into(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "Demo-SRS.pdf");
        assert_eq!(std::fs::read(path).unwrap(), b"%PDF-1.7");
    }
}
