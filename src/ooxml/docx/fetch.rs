//! Loading image and embedded-document sources that are not supplied inline.

use crate::ooxml::error::{OoxmlError, Result};
use std::path::Path;

/// Reads the bytes behind an image or embedded-document location.
///
/// Implementations should not retry; a failure aborts the render.
pub trait ResourceFetcher: Send + Sync {
    fn fetch(&self, location: &str) -> Result<Vec<u8>>;
}

/// Default fetcher.
///
/// Reads filesystem paths (and `file://` URLs). With the `http` feature,
/// `http://` and `https://` locations are downloaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFetcher;

impl DefaultFetcher {
    fn read_file(location: &str) -> Result<Vec<u8>> {
        let path = location.strip_prefix("file://").unwrap_or(location);
        std::fs::read(Path::new(path)).map_err(|source| OoxmlError::Resource {
            location: location.to_string(),
            source,
        })
    }
}

fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl ResourceFetcher for DefaultFetcher {
    fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if !is_remote(location) {
            return Self::read_file(location);
        }
        fetch_remote(location)
    }
}

#[cfg(feature = "http")]
fn fetch_remote(location: &str) -> Result<Vec<u8>> {
    log::debug!("downloading {}", location);
    let client = reqwest::blocking::Client::builder()
        .build()
        .map_err(|e| OoxmlError::Fetch(format!("{}: {}", location, e)))?;
    let response = client
        .get(location)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| OoxmlError::Fetch(format!("{}: {}", location, e)))?;
    let bytes = response
        .bytes()
        .map_err(|e| OoxmlError::Fetch(format!("{}: {}", location, e)))?;
    Ok(bytes.to_vec())
}

#[cfg(not(feature = "http"))]
fn fetch_remote(location: &str) -> Result<Vec<u8>> {
    Err(OoxmlError::Fetch(format!(
        "{}: remote sources require the `http` feature",
        location
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"pixels").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        assert_eq!(DefaultFetcher.fetch(&path).unwrap(), b"pixels");
        assert_eq!(
            DefaultFetcher.fetch(&format!("file://{}", path)).unwrap(),
            b"pixels"
        );
    }

    #[test]
    fn test_missing_file_is_resource_error() {
        let err = DefaultFetcher.fetch("/definitely/not/here.png").unwrap_err();
        assert!(matches!(err, OoxmlError::Resource { .. }));
    }

    #[test]
    fn test_remote_detection() {
        assert!(is_remote("HTTPS://example.com/a.png"));
        assert!(!is_remote("images/a.png"));
    }
}
