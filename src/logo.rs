//! Backer logo reader: image file to `data:` URI

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("Failed to read logo {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Logo is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },
}

/// MIME type for a logo file, chosen by extension
pub fn mime_for(path: &Path) -> Result<&'static str, LogoError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "svg" => Ok("image/svg+xml"),
        "bmp" => Ok("image/bmp"),
        _ => Err(LogoError::UnsupportedType(path.display().to_string())),
    }
}

/// Read an image and encode it as `data:<mime>;base64,<bytes>`
pub fn read_logo(path: impl AsRef<Path>, max_bytes: u64) -> Result<String, LogoError> {
    let path = path.as_ref();
    let mime = mime_for(path)?;

    let io_err = |source| LogoError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > max_bytes {
        return Err(LogoError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let bytes = std::fs::read(path).map_err(io_err)?;
    tracing::debug!(path = %path.display(), size, mime, "read backer logo");

    Ok(format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(bytes)
    ))
}

/// Short label for a logo value, for display in place of the full URI
pub fn describe(data_uri: &str) -> Option<String> {
    let rest = data_uri.strip_prefix("data:")?;
    let (mime, encoded) = rest.split_once(";base64,")?;
    // Encoded length to decoded length, ignoring padding
    let padding = encoded.bytes().rev().take_while(|b| *b == b'=').count();
    let size = (encoded.len() / 4 * 3).saturating_sub(padding);
    Some(format!("{} ({} bytes)", mime, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_png_becomes_data_uri() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"Hello").unwrap();

        let uri = read_logo(&path, 1024).unwrap();
        assert_eq!(uri, "data:image/png;base64,SGVsbG8=");
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(mime_for(Path::new("a/LOGO.JPG")).unwrap(), "image/jpeg");
        assert_eq!(mime_for(Path::new("x.svg")).unwrap(), "image/svg+xml");
    }

    #[test]
    fn test_unsupported_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"text").unwrap();

        let err = read_logo(&path, 1024).unwrap_err();
        assert!(matches!(err, LogoError::UnsupportedType(_)));
    }

    #[test]
    fn test_size_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.gif");
        std::fs::write(&path, vec![0u8; 16]).unwrap();

        match read_logo(&path, 8) {
            Err(LogoError::TooLarge { size, limit }) => {
                assert_eq!(size, 16);
                assert_eq!(limit, 8);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
        assert!(read_logo(&path, 16).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_logo(dir.path().join("gone.webp"), 1024).unwrap_err();
        assert!(matches!(err, LogoError::Io { .. }));
        assert!(err.to_string().contains("gone.webp"));
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            describe("data:image/png;base64,SGVsbG8=").as_deref(),
            Some("image/png (5 bytes)")
        );
        assert_eq!(describe("https://example.com/logo.png"), None);
    }
}
