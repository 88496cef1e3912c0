//! vCard format writers.
//!
//! A [`FormatWriter`] receives already rendered properties from the
//! dispatcher and turns them into one concrete encoding:
//!
//! - [`TextWriter`] - vCard text (RFC 6350 / 2426 / 2.1)
//! - [`XmlWriter`] - xCard (RFC 6351)
//! - [`JsonWriter`] - jCard (RFC 7095)
//!
//! Writers never see property records, only [`RenderedProperty`] tuples.

mod escape;
mod fold;
mod json;
mod text;
mod xml;

use thiserror::Error;

use super::core::VCardVersion;
use super::scribe::RenderedProperty;

pub use escape::{escape_component, escape_param_value, escape_text};
pub use fold::{MAX_LINE_OCTETS, fold_line, fold_line_at};
pub use json::JsonWriter;
pub use text::TextWriter;
pub use xml::XmlWriter;

/// Errors raised by a format writer.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The writer refuses a value or a call sequence.
    #[error("rejected: {0}")]
    Rejected(String),
}

pub type WriteResult<T> = std::result::Result<T, WriteError>;

/// Consumes rendered properties card by card.
///
/// The dispatcher calls `begin_card`, then `write_property` once per
/// property in order, then `end_card`. A property is handed over whole;
/// a writer that rejects it must leave its output unchanged. If any of
/// these calls fails, the dispatcher calls `abort_card`, which must drop
/// everything written since `begin_card`.
pub trait FormatWriter {
    /// Name of the encoding, used in error messages.
    fn format_name(&self) -> &'static str;

    /// Whether this encoding can express `version`.
    fn supports_version(&self, _version: VCardVersion) -> bool {
        true
    }

    /// Starts a card.
    ///
    /// ## Errors
    /// Returns an error if the underlying output fails.
    fn begin_card(&mut self, version: VCardVersion) -> WriteResult<()>;

    /// Writes one property.
    ///
    /// ## Errors
    /// Returns an error if the property cannot be encoded.
    fn write_property(&mut self, property: &RenderedProperty) -> WriteResult<()>;

    /// Finishes the current card.
    ///
    /// ## Errors
    /// Returns an error if no card is open or the output fails.
    fn end_card(&mut self) -> WriteResult<()>;

    /// Discards the card started by the last `begin_card`, leaving the
    /// output as it was before. Does nothing when no card is open.
    fn abort_card(&mut self);
}

/// Names, groups and parameter names are limited to letters, digits and `-`.
fn check_name(what: &str, name: &str) -> WriteResult<()> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        Ok(())
    } else {
        Err(WriteError::Rejected(format!("invalid {what} {name:?}")))
    }
}
