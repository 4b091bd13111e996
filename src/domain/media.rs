//! Captured media: the one output contract all acquisition paths share.
//!
//! A slot holds at most one `CapturedMedia`, and it is only constructed
//! through paths that enforce the type and size rules, so holding one is
//! proof the 500 KiB ceiling is met.

use crate::domain::errors::DomainError;

/// Byte ceiling for both the photo and the signature, enforced identically.
pub const MAX_MEDIA_BYTES: usize = 500 * 1024;

/// Accepted image encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Detect the encoding from magic bytes. Returns `None` for anything
    /// that is not JPEG or PNG; the declared file extension is never trusted.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageKind::Jpeg)
        } else if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageKind::Png)
        } else {
            None
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
        }
    }
}

/// An accepted image, ready for submission. Replaced wholesale on
/// re-capture; dropped on remove.
#[derive(Debug, Clone)]
pub struct CapturedMedia {
    pub bytes: Vec<u8>,
    pub kind: ImageKind,
    pub size_bytes: usize,
    pub source_name: String,
}

impl CapturedMedia {
    /// Accept a user-supplied file (picker or drag-drop equivalent).
    ///
    /// Uploads over the ceiling are rejected outright. Compression applies
    /// only to camera snapshots; the user must supply a smaller file.
    pub fn from_upload(source_name: &str, bytes: Vec<u8>) -> Result<Self, DomainError> {
        let kind = ImageKind::detect(&bytes)
            .ok_or_else(|| DomainError::InvalidType(source_name.to_string()))?;
        if bytes.len() > MAX_MEDIA_BYTES {
            return Err(DomainError::TooLarge {
                size: bytes.len(),
                limit: MAX_MEDIA_BYTES,
            });
        }
        Ok(Self {
            size_bytes: bytes.len(),
            kind,
            bytes,
            source_name: source_name.to_string(),
        })
    }

    /// Wrap an already-constrained camera snapshot. Callers must have run
    /// the size-constraint pipeline first.
    pub fn from_snapshot(source_name: String, jpeg_bytes: Vec<u8>) -> Self {
        Self {
            size_bytes: jpeg_bytes.len(),
            kind: ImageKind::Jpeg,
            bytes: jpeg_bytes,
            source_name,
        }
    }
}

/// Human-readable size for preview display ("312.50 KB").
pub fn format_file_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b < KB {
        format!("{} B", bytes)
    } else if b < MB {
        format!("{:.2} KB", b / KB)
    } else {
        format!("{:.2} MB", b / MB)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: [u8; 3] = [0xFF, 0xD8, 0xFF];
    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn fake_jpeg(len: usize) -> Vec<u8> {
        let mut v = vec![0u8; len];
        v[..3].copy_from_slice(&JPEG_HEADER);
        v
    }

    #[test]
    fn detects_jpeg_and_png() {
        assert_eq!(ImageKind::detect(&fake_jpeg(16)), Some(ImageKind::Jpeg));
        let mut png = vec![0u8; 16];
        png[..8].copy_from_slice(&PNG_HEADER);
        assert_eq!(ImageKind::detect(&png), Some(ImageKind::Png));
        assert_eq!(ImageKind::detect(b"GIF89a trailer"), None);
        assert_eq!(ImageKind::detect(&[]), None);
    }

    #[test]
    fn upload_rejects_unknown_type() {
        let err = CapturedMedia::from_upload("notes.pdf", b"%PDF-1.7".to_vec()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidType(_)));
    }

    #[test]
    fn upload_rejects_oversized_without_compression() {
        let err =
            CapturedMedia::from_upload("big.jpg", fake_jpeg(MAX_MEDIA_BYTES + 1)).unwrap_err();
        match err {
            DomainError::TooLarge { size, limit } => {
                assert_eq!(size, MAX_MEDIA_BYTES + 1);
                assert_eq!(limit, MAX_MEDIA_BYTES);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn upload_accepts_at_exact_limit() {
        let media = CapturedMedia::from_upload("ok.jpg", fake_jpeg(MAX_MEDIA_BYTES)).unwrap();
        assert_eq!(media.size_bytes, MAX_MEDIA_BYTES);
        assert_eq!(media.kind, ImageKind::Jpeg);
        assert_eq!(media.source_name, "ok.jpg");
    }

    #[test]
    fn formats_file_sizes() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(320_000), "312.50 KB");
        assert_eq!(format_file_size(2 * 1024 * 1024), "2.00 MB");
    }
}
