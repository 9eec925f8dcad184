//! Certificate attachment loaded from disk

use crate::state::validation::MAX_FILE_SIZE;
use anyhow::{Context, Result};
use mime::Mime;
use std::path::Path;

/// Binary attachment sent as the `certificate_file` part
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateFile {
    pub file_name: String,
    pub content_type: Mime,
    /// Empty when the file on disk exceeds the size limit
    pub data: Vec<u8>,
    size: u64,
}

impl CertificateFile {
    #[cfg(test)]
    pub fn new(file_name: impl Into<String>, content_type: Mime, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            size: data.len() as u64,
            data,
        }
    }

    /// Size of the file on disk in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Read a file from disk, deriving its MIME type from the extension.
    ///
    /// A file over `MAX_FILE_SIZE` is only measured, never read, so the
    /// size check can reject it without buffering it.
    pub async fn load(path: &Path) -> Result<Self> {
        let metadata = tokio::fs::metadata(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "certificate".to_string());
        let content_type = mime_for_path(path);

        if metadata.len() > MAX_FILE_SIZE {
            tracing::debug!(
                file = %file_name,
                size = metadata.len(),
                "certificate file over size limit"
            );
            return Ok(Self {
                file_name,
                content_type,
                data: Vec::new(),
                size: metadata.len(),
            });
        }

        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        tracing::debug!(file = %file_name, size = data.len(), "loaded certificate file");

        Ok(Self {
            file_name,
            content_type,
            size: data.len() as u64,
            data,
        })
    }
}

/// MIME type for a path based on its extension.
/// Unknown extensions map to `application/octet-stream`.
pub fn mime_for_path(path: &Path) -> Mime {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => mime::APPLICATION_PDF,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "png" => mime::IMAGE_PNG,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_mime_for_known_extensions() {
        assert_eq!(mime_for_path(Path::new("a.pdf")), mime::APPLICATION_PDF);
        assert_eq!(mime_for_path(Path::new("a.JPG")), mime::IMAGE_JPEG);
        assert_eq!(mime_for_path(Path::new("a.jpeg")), mime::IMAGE_JPEG);
        assert_eq!(mime_for_path(Path::new("dir/scan.png")), mime::IMAGE_PNG);
    }

    #[test]
    fn test_mime_for_unknown_extension() {
        assert_eq!(
            mime_for_path(Path::new("notes.docx")),
            mime::APPLICATION_OCTET_STREAM
        );
        assert_eq!(
            mime_for_path(Path::new("no_extension")),
            mime::APPLICATION_OCTET_STREAM
        );
    }

    #[tokio::test]
    async fn test_load_reads_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diploma.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"%PDF-1.7").unwrap();

        let file = CertificateFile::load(&path).await.unwrap();
        assert_eq!(file.file_name, "diploma.pdf");
        assert_eq!(file.content_type, mime::APPLICATION_PDF);
        assert_eq!(file.size(), 8);
    }

    #[tokio::test]
    async fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = CertificateFile::load(&dir.path().join("missing.png")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_oversized_file_is_measured_not_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.pdf");
        let f = std::fs::File::create(&path).unwrap();
        f.set_len(MAX_FILE_SIZE + 1).unwrap();

        let file = CertificateFile::load(&path).await.unwrap();
        assert_eq!(file.size(), MAX_FILE_SIZE + 1);
        assert!(file.data.is_empty());
        assert_eq!(file.content_type, mime::APPLICATION_PDF);
    }

    #[tokio::test]
    async fn test_file_at_limit_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge.png");
        let f = std::fs::File::create(&path).unwrap();
        f.set_len(MAX_FILE_SIZE).unwrap();

        let file = CertificateFile::load(&path).await.unwrap();
        assert_eq!(file.size(), MAX_FILE_SIZE);
        assert_eq!(file.data.len() as u64, MAX_FILE_SIZE);
    }
}
