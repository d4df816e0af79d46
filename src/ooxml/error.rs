/// Error types for OOXML generation.
use thiserror::Error;

/// Result type for OOXML operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Error types for OOXML operations.
///
/// Every variant is fatal to the render that raised it: there is no
/// partial-output mode.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// A node or style failed its field-level checks at construction time
    #[error("invalid {model}: {field} {message}")]
    Validation {
        model: &'static str,
        field: &'static str,
        message: String,
    },

    /// No paragraph style is flagged as the default
    #[error("document must declare a default paragraph style")]
    MissingDefaultStyle,

    /// A named style was required but is not registered
    #[error("style {0} is not available in document")]
    StyleNotFound(String),

    /// A named style exists but has the wrong type for where it was used
    #[error("style {id} is a {got} style but should be a table, table_row, or table_cell style")]
    InvalidStyleType { id: String, got: &'static str },

    /// Content supplied where a recognized node was expected
    #[error("invalid content: {0}")]
    InvalidContent(String),

    /// Fetching an external image or embedded document failed
    #[error("failed to load resource {location}: {source}")]
    Resource {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// Remote fetch failure
    #[error("fetch error: {0}")]
    Fetch(String),

    /// A foreign package could not be read as a Word document
    #[error("invalid package: {0}")]
    InvalidPackage(String),

    /// Internal consistency check that would otherwise corrupt the package
    #[error("format invariant violated: {0}")]
    FormatInvariant(String),

    /// XML reading or writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP container error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl OoxmlError {
    pub(crate) fn validation(
        model: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        OoxmlError::Validation {
            model,
            field,
            message: message.into(),
        }
    }
}

impl From<quick_xml::Error> for OoxmlError {
    fn from(err: quick_xml::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for OoxmlError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

impl From<std::fmt::Error> for OoxmlError {
    fn from(err: std::fmt::Error) -> Self {
        OoxmlError::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = OoxmlError::validation("table of contents", "start_level", "must be between 1 and 6");
        assert_eq!(
            err.to_string(),
            "invalid table of contents: start_level must be between 1 and 6"
        );
    }

    #[test]
    fn test_resource_error_keeps_source() {
        use std::error::Error as _;
        let err = OoxmlError::Resource {
            location: "missing.png".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("missing.png"));
        assert!(err.source().is_some());
    }
}
