//! Compatibility validation of properties against a target version.
//!
//! Validation never fails: it returns the warnings it found, and an empty
//! list means the property can be written as-is.

use super::core::{Property, PropertyKind, VCard, VCardVersion, Warning};

/// A category tag (a TYPE value) whose support depends on the version.
pub trait CategoryTag {
    /// The literal value, reported in warnings.
    fn value(&self) -> &str;

    fn is_supported_by(&self, version: VCardVersion) -> bool;

    /// Whether this is the "preferred" tag. 4.0 moves that meaning to the
    /// PREF parameter, so the tag itself is never reported.
    fn is_pref(&self) -> bool;
}

/// Returns one warning per tag the version does not support, in tag order.
/// The preferred tag is never reported.
#[must_use]
pub fn validate_tags<T: CategoryTag>(tags: &[T], version: VCardVersion) -> Vec<Warning> {
    tags.iter()
        .filter(|tag| !tag.is_pref() && !tag.is_supported_by(version))
        .map(|tag| Warning::unsupported_type(tag.value()))
        .collect()
}

/// Checks one property: version support first, then the property's own
/// checks.
#[must_use]
pub fn validate_property(property: &dyn Property, version: VCardVersion) -> Vec<Warning> {
    let mut warnings = Vec::new();
    if !property.is_supported_by(version) {
        warnings.push(Warning::unsupported_property(property.kind().as_str()));
    }
    property.validate_for(version, &mut warnings);
    warnings
}

/// A warning tied to the property that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyWarning {
    /// Index of the property in its card.
    pub position: usize,
    pub kind: PropertyKind,
    pub warning: Warning,
}

impl std::fmt::Display for PropertyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} #{}: {}", self.kind, self.position, self.warning)
    }
}

impl VCard {
    /// Validates every property against `version`.
    #[must_use]
    pub fn validate(&self, version: VCardVersion) -> Vec<PropertyWarning> {
        self.properties
            .iter()
            .enumerate()
            .flat_map(|(position, property)| {
                validate_property(&**property, version)
                    .into_iter()
                    .map(move |warning| PropertyWarning {
                        position,
                        kind: property.kind(),
                        warning,
                    })
            })
            .collect()
    }
}
