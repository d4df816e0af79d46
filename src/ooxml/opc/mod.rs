/// Open Packaging Conventions (OPC) plumbing for writing packages.
///
/// This module provides the parts of the packaging conventions a writer needs:
///
/// - Content type, namespace and relationship type constants
/// - The `[Content_Types].xml` manifest
/// - ZIP-based physical packaging
pub mod constants;
pub mod pkgwriter;

// Re-export commonly used types
pub use pkgwriter::{ContentTypesItem, PackageWriter};
