//! Office Open XML (OOXML) package generation.
//!
//! The module is organized into layers:
//!
//! 1. **OPC layer** (`opc`): content types, relationship constants and the
//!    ZIP package writer
//! 2. **Package metadata** (`metadata`, `custom_properties`): the
//!    `docProps/*` parts
//! 3. **WordprocessingML** (`docx`): the document model and its part writers
//!
//! # Example
//!
//! ```rust,no_run
//! use longan::ooxml::docx::{Document, Paragraph, RenderOptions};
//! use longan::ooxml::DocumentProperties;
//!
//! let mut doc = Document::new();
//! doc.push(Paragraph::new("Hello, world"))?;
//!
//! let options = RenderOptions::new().properties(DocumentProperties::new().title("Greeting"));
//! let bytes = doc.render_with(&options)?;
//! std::fs::write("hello.docx", bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod custom_properties;
pub mod docx;
pub mod error;
pub mod metadata;
pub mod opc;

pub use custom_properties::{CustomProperties, CustomProperty, PropertyValue};
pub use error::{OoxmlError, Result};
pub use metadata::DocumentProperties;
