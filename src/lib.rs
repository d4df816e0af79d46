//! Longan - declarative generation of Word-processing (.docx) documents
//!
//! A document is described as a tree of typed content nodes (paragraphs,
//! runs, tables, lists, images, table-of-contents fields, embedded document
//! fragments) plus styles, page geometry, an optional header, footer and
//! theme. Rendering resolves the cross-part relationships, computes the
//! layout values the format needs (column widths, merged-cell markers,
//! conditional table formatting) and writes a complete OOXML package.
//!
//! # Features
//!
//! - **Styles**: paragraph, character and table styles with conditional
//!   table formats; a default style set is registered up front
//! - **Tables**: column spans, row spans, banding, header rows, nested tables
//! - **Lists**: nested ordered and unordered lists with per-level styles
//! - **Headers and footers**: positioned header content and page numbers
//! - **Embedded documents**: splice the body of another `.docx` package
//! - `http` feature: fetch remote image sources over HTTP(S)
//!
//! # Example
//!
//! ```no_run
//! use longan::ooxml::docx::{Document, Paragraph, Table, TableOfContents};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = Document::new();
//! doc.push(TableOfContents::new(1, 3)?)?;
//! doc.push(Paragraph::new("Introduction").style("Heading1"))?;
//! doc.push(Paragraph::new("Figures for the first quarter."))?;
//! doc.push(Table::from_rows([["Month", "Units"], ["January", "120"]]))?;
//! doc.save("report.docx")?;
//! # Ok(())
//! # }
//! ```

/// Unit conversions and XML text helpers
pub mod common;

/// OOXML package generation
pub mod ooxml;

pub use ooxml::docx::Document;
pub use ooxml::{OoxmlError, Result};
