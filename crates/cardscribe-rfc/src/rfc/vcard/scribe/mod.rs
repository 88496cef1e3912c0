//! Property scribes.
//!
//! A scribe turns one kind of [`Property`] into a [`RenderedProperty`]: the
//! name, parameters and values a [`FormatWriter`](crate::rfc::vcard::build::FormatWriter)
//! needs, already adjusted for the target version. Scribes know nothing
//! about the concrete encoding; writers know nothing about property types.
//!
//! Scribes are looked up by [`PropertyKind`] in a [`ScribeRegistry`].

mod address;
mod registry;
mod structured;
mod text;

use std::fmt;

use thiserror::Error;

use super::core::{
    Parameters, Property, PropertyKind, VCardVersion, WarningCode, param_names,
};

pub use address::AddressScribe;
pub use registry::ScribeRegistry;
pub use structured::{GeoScribe, ListScribe, StructuredScribe};
pub use text::{ProductIdScribe, TextScribe};

/// Parameters only defined by 4.0.
const V4_0_ONLY_PARAMS: &[&str] = &[
    param_names::LABEL,
    param_names::GEO,
    param_names::TZ,
    param_names::PID,
    param_names::ALTID,
];

/// Reasons a scribe declines to render a property. The property is left out
/// of the output; the rest of the card is still written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScribeError {
    #[error("{0}")]
    Skip(String),

    #[error("scribe for {expected} received a {found} property")]
    UnexpectedType {
        expected: PropertyKind,
        found: PropertyKind,
    },
}

impl ScribeError {
    /// Warning code recorded when the property is left out.
    #[must_use]
    pub fn warning_code(&self) -> WarningCode {
        WarningCode::SkippedByScribe
    }
}

pub type ScribeResult<T> = std::result::Result<T, ScribeError>;

/// Per-write settings a scribe renders against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteContext {
    pub version: VCardVersion,
    /// Drop TYPE values the version does not define.
    pub version_strict: bool,
}

impl WriteContext {
    #[must_use]
    pub fn new(version: VCardVersion, version_strict: bool) -> Self {
        Self {
            version,
            version_strict,
        }
    }
}

/// Value type hint used by the typed encodings (xCard, jCard).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
    Uri,
    Unknown,
}

impl ValueType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Uri => "uri",
            Self::Unknown => "unknown",
        }
    }
}

/// One named component of a structured value (e.g. the street of an ADR).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// xCard element name of the component.
    pub name: &'static str,
    pub values: Vec<String>,
}

impl Component {
    #[must_use]
    pub fn new(name: &'static str, values: &[String]) -> Self {
        Self {
            name,
            values: values.to_vec(),
        }
    }
}

/// A rendered property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedValue {
    /// A single text value, unescaped.
    Text(String),
    /// Semicolon-separated components, each holding comma-separated values.
    Structured(Vec<Component>),
    /// Semicolon-separated single values without component names (ORG).
    List(Vec<String>),
}

/// The (name, parameters, values) tuple handed to a format writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedProperty {
    pub group: Option<String>,
    /// Property name as written (uppercase).
    pub name: String,
    pub parameters: Parameters,
    pub value_type: ValueType,
    pub value: RenderedValue,
}

/// Renders one property kind.
pub trait PropertyScribe: Send + Sync + fmt::Debug {
    /// The kind this scribe is registered under.
    fn kind(&self) -> PropertyKind;

    /// Name the property is written with in `version`.
    fn property_name(&self, _version: VCardVersion) -> String {
        self.kind().as_str().to_string()
    }

    /// Renders `property` for the version in `ctx`.
    ///
    /// ## Errors
    /// Returns a [`ScribeError`] when the property cannot be rendered; the
    /// dispatcher then leaves it out.
    fn write(&self, property: &dyn Property, ctx: WriteContext)
    -> ScribeResult<RenderedProperty>;
}

/// Downcasts `property` to the record type a scribe handles.
///
/// ## Errors
/// Returns [`ScribeError::UnexpectedType`] if `property` is another type.
pub fn downcast<'a, P: Property>(
    property: &'a dyn Property,
    expected: &PropertyKind,
) -> ScribeResult<&'a P> {
    property
        .as_any()
        .downcast_ref::<P>()
        .ok_or_else(|| ScribeError::UnexpectedType {
            expected: expected.clone(),
            found: property.kind(),
        })
}

/// Copies `params` and adjusts them for the target version.
///
/// - 4.0: a `TYPE=pref` becomes `PREF=1` (unless a PREF is already set).
/// - 2.1/3.0: a PREF parameter becomes `TYPE=pref`; 4.0-only parameters
///   are dropped.
/// - Strict mode: TYPE values for which `type_supported` is false are
///   dropped.
#[must_use]
pub fn prepare_parameters(
    params: &Parameters,
    ctx: WriteContext,
    type_supported: impl Fn(&str) -> bool,
) -> Parameters {
    let mut prepared = params.clone();

    if ctx.version == VCardVersion::V4_0 {
        if prepared.has_type("pref") {
            prepared.remove_type("pref");
            if prepared.pref().is_none() {
                prepared.set_pref(Some(1));
            }
        }
    } else {
        if prepared.first(param_names::PREF).is_some() {
            prepared.remove_all(param_names::PREF);
            prepared.add_type("pref");
        }
        for name in V4_0_ONLY_PARAMS {
            prepared.remove_all(name);
        }
    }

    if ctx.version_strict {
        let unsupported: Vec<String> = prepared
            .types()
            .into_iter()
            .filter(|t| !type_supported(t))
            .map(str::to_string)
            .collect();
        for value in &unsupported {
            tracing::trace!(value = %value, version = %ctx.version, "Dropping unsupported TYPE");
            prepared.remove_type(value);
        }
    }

    prepared
}
