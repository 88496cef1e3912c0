//! ADR scribe.

use super::{
    Component, PropertyScribe, RenderedProperty, RenderedValue, ScribeResult, ValueType,
    WriteContext, downcast, prepare_parameters,
};
use crate::rfc::vcard::core::{Address, AddressType, Property, PropertyKind};

/// xCard element names of the seven ADR components, in order.
const COMPONENT_NAMES: [&str; 7] = [
    "pobox", "ext", "street", "locality", "region", "code", "country",
];

/// Renders [`Address`] records.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddressScribe;

impl PropertyScribe for AddressScribe {
    fn kind(&self) -> PropertyKind {
        PropertyKind::ADR
    }

    fn write(
        &self,
        property: &dyn Property,
        ctx: WriteContext,
    ) -> ScribeResult<RenderedProperty> {
        let address: &Address = downcast(property, &PropertyKind::ADR)?;

        let parameters = prepare_parameters(address.parameters(), ctx, |value| {
            AddressType::get(value)
                .supported_versions()
                .contains(&ctx.version)
        });

        let components = COMPONENT_NAMES
            .into_iter()
            .zip(address.components())
            .map(|(name, field)| Component::new(name, field.all()))
            .collect();

        Ok(RenderedProperty {
            group: address.group().map(str::to_string),
            name: self.property_name(ctx.version),
            parameters,
            value_type: ValueType::Text,
            value: RenderedValue::Structured(components),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::{TextProperty, VCardVersion};
    use crate::rfc::vcard::scribe::ScribeError;

    fn sample() -> Address {
        let mut adr = Address::new();
        adr.set_street_addresses(["123 Main St", "Suite 200"]);
        adr.set_locality(Some("Austin"));
        adr.set_region(Some("TX"));
        adr.set_postal_code(Some("78701"));
        adr.set_country(Some("USA"));
        adr.add_type(&AddressType::Work);
        adr
    }

    #[test]
    fn renders_all_components_in_order() {
        let ctx = WriteContext::new(VCardVersion::V4_0, true);
        let rendered = AddressScribe
            .write(&sample(), ctx)
            .expect("address renders");

        assert_eq!(rendered.name, "ADR");
        assert_eq!(rendered.parameters.types(), ["work"]);
        let RenderedValue::Structured(components) = rendered.value else {
            panic!("ADR should render as a structured value");
        };
        let names: Vec<&str> = components.iter().map(|c| c.name).collect();
        assert_eq!(names, COMPONENT_NAMES);
        assert!(components[0].values.is_empty());
        assert_eq!(components[2].values, ["123 Main St", "Suite 200"]);
        assert_eq!(components[3].values, ["Austin"]);
        assert_eq!(components[6].values, ["USA"]);
    }

    #[test]
    fn strict_mode_drops_v3_only_types_in_v4() {
        let mut adr = sample();
        adr.add_type(&AddressType::Parcel);

        let strict = WriteContext::new(VCardVersion::V4_0, true);
        let rendered = AddressScribe.write(&adr, strict).expect("address renders");
        assert_eq!(rendered.parameters.types(), ["work"]);

        let v3 = WriteContext::new(VCardVersion::V3_0, true);
        let rendered = AddressScribe.write(&adr, v3).expect("address renders");
        assert_eq!(rendered.parameters.types(), ["work", "parcel"]);
    }

    #[test]
    fn rejects_other_property_types() {
        let ctx = WriteContext::new(VCardVersion::V4_0, true);
        let fn_prop = TextProperty::new(PropertyKind::FN, "John");
        let err = AddressScribe.write(&fn_prop, ctx).expect_err("wrong type");
        assert!(matches!(err, ScribeError::UnexpectedType { .. }));
    }
}
