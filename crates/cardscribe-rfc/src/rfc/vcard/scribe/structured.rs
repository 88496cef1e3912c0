//! Scribes for structured text properties (N, GENDER, ORG, GEO).
//!
//! These kinds are held as [`TextProperty`](crate::rfc::vcard::core::TextProperty)
//! values in their escaped vCard form (e.g. `Doe;John;;Dr.;`). The scribes
//! split that form into components for the writers.

use super::text::text_value;
use super::{
    Component, PropertyScribe, RenderedProperty, RenderedValue, ScribeError, ScribeResult,
    ValueType, WriteContext, prepare_parameters,
};
use crate::rfc::vcard::core::{Geo, Property, PropertyKind, VCardVersion};
use crate::rfc::vcard::parse::{split_component, split_structured, unescape_text};

/// xCard component names of N (RFC 6350 §6.2.2).
const NAME_COMPONENTS: &[&str] = &["surname", "given", "additional", "prefix", "suffix"];

/// xCard component names of GENDER (RFC 6350 §6.2.7).
const GENDER_COMPONENTS: &[&str] = &["sex", "identity"];

/// Renders a `;`-separated value as named components.
///
/// ## Summary
/// The first `required` components are always written, empty if missing.
/// Empty trailing components past that are dropped, and components past
/// the known names are ignored.
#[derive(Debug, Clone)]
pub struct StructuredScribe {
    kind: PropertyKind,
    components: &'static [&'static str],
    required: usize,
}

impl StructuredScribe {
    #[must_use]
    pub fn new(kind: PropertyKind, names: &'static [&'static str], required: usize) -> Self {
        Self {
            kind,
            components: names,
            required: required.min(names.len()),
        }
    }

    /// N: all five components are written.
    #[must_use]
    pub fn name() -> Self {
        Self::new(PropertyKind::N, NAME_COMPONENTS, NAME_COMPONENTS.len())
    }

    /// GENDER: the identity is written only when set.
    #[must_use]
    pub fn gender() -> Self {
        Self::new(PropertyKind::GENDER, GENDER_COMPONENTS, 1)
    }
}

impl PropertyScribe for StructuredScribe {
    fn kind(&self) -> PropertyKind {
        self.kind.clone()
    }

    fn write(
        &self,
        property: &dyn Property,
        ctx: WriteContext,
    ) -> ScribeResult<RenderedProperty> {
        let parts = split_structured(text_value(property, &self.kind)?);

        let mut components: Vec<Component> = self
            .components
            .iter()
            .copied()
            .enumerate()
            .map(|(index, name)| Component {
                name,
                values: parts
                    .get(index)
                    .map(|part| split_component(part))
                    .unwrap_or_default(),
            })
            .collect();
        while components.len() > self.required
            && components.last().is_some_and(|c| c.values.is_empty())
        {
            components.pop();
        }

        Ok(RenderedProperty {
            group: property.group().map(str::to_string),
            name: self.property_name(ctx.version),
            parameters: prepare_parameters(property.parameters(), ctx, |_| true),
            value_type: ValueType::Text,
            value: RenderedValue::Structured(components),
        })
    }
}

/// Renders a `;`-separated value as an unnamed list, e.g. the organization
/// name and units of ORG.
#[derive(Debug, Clone)]
pub struct ListScribe {
    kind: PropertyKind,
}

impl ListScribe {
    #[must_use]
    pub fn new(kind: PropertyKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub fn organization() -> Self {
        Self::new(PropertyKind::ORG)
    }
}

impl PropertyScribe for ListScribe {
    fn kind(&self) -> PropertyKind {
        self.kind.clone()
    }

    fn write(
        &self,
        property: &dyn Property,
        ctx: WriteContext,
    ) -> ScribeResult<RenderedProperty> {
        let values = split_structured(text_value(property, &self.kind)?)
            .into_iter()
            .map(unescape_text)
            .collect();

        Ok(RenderedProperty {
            group: property.group().map(str::to_string),
            name: self.property_name(ctx.version),
            parameters: prepare_parameters(property.parameters(), ctx, |_| true),
            value_type: ValueType::Text,
            value: RenderedValue::List(values),
        })
    }
}

/// Renders GEO as a `geo:` URI in 4.0 and as `lat;lon` before.
///
/// Either form is accepted as input. Any other value is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeoScribe;

impl PropertyScribe for GeoScribe {
    fn kind(&self) -> PropertyKind {
        PropertyKind::GEO
    }

    fn write(
        &self,
        property: &dyn Property,
        ctx: WriteContext,
    ) -> ScribeResult<RenderedProperty> {
        let raw = text_value(property, &PropertyKind::GEO)?;
        let geo = parse_geo(raw)
            .ok_or_else(|| ScribeError::Skip(format!("invalid GEO value {raw:?}")))?;

        let (value_type, value) = match ctx.version {
            VCardVersion::V4_0 => (ValueType::Uri, RenderedValue::Text(geo.to_uri())),
            VCardVersion::V2_1 | VCardVersion::V3_0 => (
                ValueType::Text,
                RenderedValue::Structured(vec![
                    Component {
                        name: "latitude",
                        values: vec![geo.latitude.to_string()],
                    },
                    Component {
                        name: "longitude",
                        values: vec![geo.longitude.to_string()],
                    },
                ]),
            ),
        };

        Ok(RenderedProperty {
            group: property.group().map(str::to_string),
            name: self.property_name(ctx.version),
            parameters: prepare_parameters(property.parameters(), ctx, |_| true),
            value_type,
            value,
        })
    }
}

fn parse_geo(value: &str) -> Option<Geo> {
    Geo::from_uri(value).or_else(|| {
        let (latitude, longitude) = value.trim().split_once(';')?;
        Some(Geo::new(
            latitude.trim().parse().ok()?,
            longitude.trim().parse().ok()?,
        ))
    })
}
