//! vCard wrapper type.

use super::address::Address;
use super::property::{Property, PropertyKind, TextProperty};

/// vCard version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (versit).
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3_0,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4_0,
}

impl VCardVersion {
    /// Every version, oldest first.
    pub const ALL: &'static [Self] = &[Self::V2_1, Self::V3_0, Self::V4_0];

    /// Parses from version string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V2_1),
            "3.0" => Some(Self::V3_0),
            "4.0" => Some(Self::V4_0),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2_1 => "2.1",
            Self::V3_0 => "3.0",
            Self::V4_0 => "4.0",
        }
    }
}

impl core::str::FromStr for VCardVersion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}

impl std::fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete vCard.
///
/// Properties keep the order they were added in; writers emit them in that
/// order.
#[derive(Debug, Default)]
pub struct VCard {
    /// vCard version the card was read as (or created for).
    pub version: VCardVersion,
    /// All properties in order of appearance.
    pub properties: Vec<Box<dyn Property>>,
}

impl VCard {
    /// Creates a new vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a vCard with the specified version.
    #[must_use]
    pub fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    /// Adds a property to the vCard.
    pub fn add_property(&mut self, prop: impl Property) {
        self.properties.push(Box::new(prop));
    }

    /// Adds a boxed property to the vCard.
    pub fn add_boxed(&mut self, prop: Box<dyn Property>) {
        self.properties.push(prop);
    }

    /// Adds a mailing address.
    pub fn add_address(&mut self, address: Address) {
        self.add_property(address);
    }

    /// Returns all properties of the given kind.
    #[must_use]
    pub fn properties_of(&self, kind: &PropertyKind) -> Vec<&dyn Property> {
        self.properties
            .iter()
            .filter(|p| p.kind() == *kind)
            .map(|p| &**p)
            .collect()
    }

    /// Returns all properties of the concrete type `P`.
    #[must_use]
    pub fn typed<P: Property>(&self) -> Vec<&P> {
        self.properties
            .iter()
            .filter_map(|p| p.as_any().downcast_ref::<P>())
            .collect()
    }

    /// Returns all ADR (address) values.
    #[must_use]
    pub fn addresses(&self) -> Vec<&Address> {
        self.typed::<Address>()
    }

    /// Returns the FN (formatted name) value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.typed::<TextProperty>()
            .into_iter()
            .find(|p| p.kind() == PropertyKind::FN)
            .map(TextProperty::value)
    }

    /// Returns whether the card has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
