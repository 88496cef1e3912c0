//! vCard property model and serialization (RFC 6350, RFC 2426, vCard 2.1).
//!
//! ## Overview
//!
//! A [`VCard`] holds property records in order. Writing a card goes through
//! a [`Dispatcher`]: each property's [`PropertyKind`] is looked up in a
//! [`ScribeRegistry`], the scribe renders it for the target
//! [`VCardVersion`], and a [`FormatWriter`](build::FormatWriter) encodes
//! it as vCard text, xCard or jCard.
//!
//! ## Usage
//!
//! ```rust
//! use cardscribe_rfc::rfc::vcard::{
//!     Address, AddressType, Dispatcher, PropertyKind, TextProperty, TextWriter, VCard,
//!     VCardVersion,
//! };
//!
//! let mut adr = Address::new();
//! adr.set_street_addresses(["123 Main St", "Suite 200"]);
//! adr.set_locality(Some("Austin"));
//! adr.add_type(&AddressType::Work);
//!
//! let mut card = VCard::new();
//! card.add_property(TextProperty::new(PropertyKind::FN, "John Doe"));
//! card.add_address(adr);
//!
//! let mut writer = TextWriter::new();
//! let report = Dispatcher::default()
//!     .write(&[card], VCardVersion::V4_0, &mut writer)
//!     .unwrap();
//!
//! assert!(writer.as_str().contains("ADR;TYPE=work:;;123 Main St,Suite 200;Austin;;;\r\n"));
//! assert!(!report.has_warnings());
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Records, parameters and versions
//! - [`validation`] - Compatibility warnings
//! - [`scribe`] - Per-kind renderers and their registry
//! - [`dispatch`] - The write loop
//! - [`build`] - Format writers
//! - [`parse`] - Value-level reading helpers
//! - [`adapter`] - serde integration

pub mod adapter;
pub mod build;
pub mod core;
pub mod dispatch;
pub mod parse;
pub mod scribe;
pub mod validation;


pub use adapter::{Bound, CallSite, FormatAnnotation, JCardAdapter, SiteKey};
pub use build::{FormatWriter, JsonWriter, TextWriter, WriteError, XmlWriter};
pub use core::{
    Address, AddressType, ExtendedProperty, FieldSet, Parameters, Property, PropertyKind,
    TextProperty, VCard, VCardVersion, Warning, WarningCode,
};
pub use dispatch::{CardReport, Dispatcher, WriteReport, WriterOptions};
pub use parse::parse_address_value;
pub use scribe::{PropertyScribe, ScribeRegistry};
pub use validation::{PropertyWarning, validate_property, validate_tags};
