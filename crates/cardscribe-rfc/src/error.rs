use thiserror::Error;

use crate::rfc::vcard::build::WriteError;
use crate::rfc::vcard::core::{PropertyKind, VCardVersion};

/// Structural errors that abort a write.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A standard property kind has no registered scribe.
    #[error("No scribe registered for required property {kind} (card {card}, property {position})")]
    Configuration {
        kind: PropertyKind,
        card: usize,
        position: usize,
    },

    /// An extension kind has no scribe and the policy is to fail.
    #[error("No scribe registered for property {kind} (card {card}, property {position})")]
    UnregisteredKind {
        kind: PropertyKind,
        card: usize,
        position: usize,
    },

    #[error("{format} cannot express vCard {version}")]
    UnsupportedVersion {
        format: &'static str,
        version: VCardVersion,
    },

    /// The writer rejected a rendered property.
    #[error("Failed to encode {kind} (card {card}, property {position}): {source}")]
    Encoding {
        kind: PropertyKind,
        card: usize,
        position: usize,
        #[source]
        source: WriteError,
    },

    /// The writer failed outside of a property.
    #[error(transparent)]
    Write(#[from] WriteError),
}

pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
