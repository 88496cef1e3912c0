//! vCard property model and serialization dispatch.
//!
//! See [`rfc::vcard`] for the entry points.

pub mod error;
pub mod rfc;
