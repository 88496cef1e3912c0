//! vCard core types.
//!
//! - [`VCard`] - Complete vCard representation
//! - [`Property`] - Trait implemented by every property record
//! - [`PropertyKind`] - Runtime kind used for scribe lookup
//! - [`Parameters`] - Property parameter bag
//! - [`FieldSet`] - Multi-valued component storage
//!
//! ## Records
//!
//! - [`Address`] - ADR property
//! - [`TextProperty`] - single text value (FN, NOTE, PRODID, ...)
//! - [`ExtendedProperty`] - `X-` and other non-standard properties

mod address;
mod field_set;
mod parameter;
mod property;
mod vcard;
mod warning;

pub use address::{Address, AddressType};
pub use field_set::FieldSet;
pub use parameter::{Geo, Parameters, Pid, VCardParameter, names as param_names};
pub use property::{ExtendedProperty, Property, PropertyKind, TextProperty, names};
pub use vcard::{VCard, VCardVersion};
pub use warning::{Warning, WarningCode};
