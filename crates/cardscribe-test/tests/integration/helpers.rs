#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides sample cards and a shorthand for writing them as vCard text.

use cardscribe_test::component::vcard::{
    Address, AddressType, Dispatcher, ExtendedProperty, PropertyKind, TextProperty, TextWriter,
    VCard, VCardVersion, WriteReport, WriterOptions,
};

/// The Austin office: street over two values, `tag` as its only TYPE.
pub fn austin_office(tag: AddressType) -> Address {
    let mut adr = Address::new();
    adr.set_street_addresses(["123 Main St", "Suite 200"]);
    adr.set_locality(Some("Austin"));
    adr.set_region(Some("TX"));
    adr.set_postal_code(Some("78701"));
    adr.set_country(Some("USA"));
    adr.add_type(&tag);
    adr
}

pub fn card_with_address(tag: AddressType) -> VCard {
    let mut card = VCard::new();
    card.add_address(austin_office(tag));
    card
}

/// A contact with a name, an extension property and the Austin office.
pub fn contact(name: &str) -> VCard {
    let mut card = VCard::new();
    card.add_property(TextProperty::new(PropertyKind::FN, name));
    card.add_property(ExtendedProperty::new("X-MANAGER", "Jane Roe"));
    card.add_address(austin_office(AddressType::Work));
    card
}

pub fn options(add_generator_marker: bool, version_strict: bool) -> WriterOptions {
    WriterOptions {
        add_generator_marker,
        version_strict,
        ..WriterOptions::default()
    }
}

/// Writes `cards` as vCard text and returns the output and report.
pub fn write_text(
    dispatcher: &Dispatcher,
    cards: &[VCard],
    version: VCardVersion,
) -> (String, WriteReport) {
    let mut writer = TextWriter::new();
    let report = dispatcher
        .write(cards, version, &mut writer)
        .expect("write should succeed");
    (writer.into_string(), report)
}

/// Property lines of vCard text, without BEGIN, VERSION and END.
pub fn property_lines(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| {
            !line.starts_with("BEGIN:")
                && !line.starts_with("VERSION:")
                && !line.starts_with("END:")
        })
        .collect()
}
