//! Common utilities shared by the OOXML writers.
//!
//! This module provides unit conversions and XML text helpers used by every
//! part writer.

pub mod unit;
pub mod xml;

pub use unit::px_to_emu;
pub use xml::escape_xml;
