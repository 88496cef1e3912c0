//! vCard value reading.
//!
//! Only the value-level helpers needed to turn an ADR value back into an
//! [`Address`](crate::rfc::vcard::core::Address). Content-line lexing is
//! left to the caller.

mod values;

pub use values::{parse_address_value, split_component, split_structured, unescape_text};
