//! Scribes for single-text properties.

use cardscribe_core::constants::PRODUCT_ID;

use super::{
    PropertyScribe, RenderedProperty, RenderedValue, ScribeError, ScribeResult, ValueType,
    WriteContext, prepare_parameters,
};
use crate::rfc::vcard::core::{
    ExtendedProperty, Property, PropertyKind, TextProperty, VCardVersion, names,
};

/// Renders [`TextProperty`] and [`ExtendedProperty`] records of one kind.
///
/// Registering a `TextScribe` for an extension kind (e.g. `X-SKYPE`) is how
/// extension properties become writable.
#[derive(Debug, Clone)]
pub struct TextScribe {
    kind: PropertyKind,
}

impl TextScribe {
    #[must_use]
    pub fn new(kind: PropertyKind) -> Self {
        Self { kind }
    }

    fn value_type(&self) -> ValueType {
        match self.kind.as_str() {
            names::URL
            | names::FBURL
            | names::CALADRURI
            | names::CALURI
            | names::MEMBER
            | names::IMPP => ValueType::Uri,
            _ if self.kind.is_standard() => ValueType::Text,
            _ => ValueType::Unknown,
        }
    }
}

impl PropertyScribe for TextScribe {
    fn kind(&self) -> PropertyKind {
        self.kind.clone()
    }

    fn write(
        &self,
        property: &dyn Property,
        ctx: WriteContext,
    ) -> ScribeResult<RenderedProperty> {
        let value = text_value(property, &self.kind)?;
        Ok(RenderedProperty {
            group: property.group().map(str::to_string),
            name: self.property_name(ctx.version),
            parameters: prepare_parameters(property.parameters(), ctx, |_| true),
            value_type: self.value_type(),
            value: RenderedValue::Text(value.to_string()),
        })
    }
}

/// Renders PRODID, the generator-identification property.
///
/// 2.1 has no PRODID, so it is written as `X-PRODID` there.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProductIdScribe;

impl ProductIdScribe {
    /// The marker naming this library and its version.
    #[must_use]
    pub fn generator_marker() -> TextProperty {
        TextProperty::new(PropertyKind::PRODID, PRODUCT_ID)
    }
}

impl PropertyScribe for ProductIdScribe {
    fn kind(&self) -> PropertyKind {
        PropertyKind::PRODID
    }

    fn property_name(&self, version: VCardVersion) -> String {
        match version {
            VCardVersion::V2_1 => names::X_PRODID.to_string(),
            VCardVersion::V3_0 | VCardVersion::V4_0 => names::PRODID.to_string(),
        }
    }

    fn write(
        &self,
        property: &dyn Property,
        ctx: WriteContext,
    ) -> ScribeResult<RenderedProperty> {
        let value = text_value(property, &PropertyKind::PRODID)?;
        Ok(RenderedProperty {
            group: property.group().map(str::to_string),
            name: self.property_name(ctx.version),
            parameters: prepare_parameters(property.parameters(), ctx, |_| true),
            value_type: ValueType::Text,
            value: RenderedValue::Text(value.to_string()),
        })
    }
}

/// Raw value of a [`TextProperty`] or [`ExtendedProperty`].
pub(super) fn text_value<'a>(
    property: &'a dyn Property,
    expected: &PropertyKind,
) -> ScribeResult<&'a str> {
    let any = property.as_any();
    if let Some(text) = any.downcast_ref::<TextProperty>() {
        Ok(text.value())
    } else if let Some(extended) = any.downcast_ref::<ExtendedProperty>() {
        Ok(extended.value())
    } else {
        Err(ScribeError::UnexpectedType {
            expected: expected.clone(),
            found: property.kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_scribe_renders_value_and_group() {
        let prop = TextProperty::grouped("item1", PropertyKind::EMAIL, "jane@example.com");
        let ctx = WriteContext::new(VCardVersion::V4_0, true);
        let rendered = TextScribe::new(PropertyKind::EMAIL)
            .write(&prop, ctx)
            .expect("text renders");

        assert_eq!(rendered.group.as_deref(), Some("item1"));
        assert_eq!(rendered.name, "EMAIL");
        assert_eq!(rendered.value_type, ValueType::Text);
        assert_eq!(
            rendered.value,
            RenderedValue::Text("jane@example.com".to_string())
        );
    }

    #[test]
    fn extension_kinds_render_as_unknown() {
        let prop = ExtendedProperty::new("x-skype", "jane.doe");
        let ctx = WriteContext::new(VCardVersion::V3_0, true);
        let rendered = TextScribe::new(PropertyKind::new("X-SKYPE"))
            .write(&prop, ctx)
            .expect("extension renders");
        assert_eq!(rendered.name, "X-SKYPE");
        assert_eq!(rendered.value_type, ValueType::Unknown);
    }

    #[test]
    fn url_is_a_uri() {
        assert_eq!(
            TextScribe::new(PropertyKind::URL).value_type(),
            ValueType::Uri
        );
    }

    #[test]
    fn product_id_is_renamed_in_v2_1() {
        let marker = ProductIdScribe::generator_marker();
        let ctx = WriteContext::new(VCardVersion::V2_1, true);
        let rendered = ProductIdScribe.write(&marker, ctx).expect("prodid renders");
        assert_eq!(rendered.name, "X-PRODID");
        assert_eq!(rendered.value, RenderedValue::Text(PRODUCT_ID.to_string()));

        assert_eq!(ProductIdScribe.property_name(VCardVersion::V4_0), "PRODID");
    }
}
