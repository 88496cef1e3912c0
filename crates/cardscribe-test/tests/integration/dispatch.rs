//! Writing whole cards through the dispatcher.

use cardscribe_test::component::error::DispatchError;
use cardscribe_test::component::vcard::{
    AddressType, Dispatcher, JsonWriter, PropertyKind, TextWriter, VCardVersion, WarningCode,
    XmlWriter, scribe::TextScribe,
};
use cardscribe_test::component::config::UnknownKindPolicy;
use cardscribe_test::component::constants::PRODUCT_ID;

use crate::helpers::{card_with_address, contact, options, property_lines, write_text};

#[test_log::test]
fn austin_office_with_generator_marker() {
    let dispatcher = Dispatcher::new(options(true, true));
    let (output, report) = write_text(
        &dispatcher,
        &[card_with_address(AddressType::Work)],
        VCardVersion::V4_0,
    );

    assert_eq!(
        property_lines(&output),
        [
            "ADR;TYPE=work:;;123 Main St,Suite 200;Austin;TX;78701;USA".to_string(),
            format!("PRODID:{PRODUCT_ID}"),
        ]
    );
    assert_eq!(report.warnings().count(), 0);
}

#[test]
fn unsupported_tag_reported_once_and_dropped() {
    let card = card_with_address(AddressType::Intl);
    let dispatcher = Dispatcher::new(options(false, true));
    let (output, report) = write_text(&dispatcher, &[card], VCardVersion::V4_0);

    let warnings: Vec<_> = report.warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].kind, PropertyKind::ADR);
    assert_eq!(warnings[0].warning.kind(), WarningCode::UnsupportedType);
    assert_eq!(warnings[0].warning.payload(), "intl");
    assert_eq!(
        property_lines(&output),
        ["ADR:;;123 Main St,Suite 200;Austin;TX;78701;USA"]
    );
}

#[test]
fn older_versions_keep_legacy_tags() {
    let dispatcher = Dispatcher::new(options(false, true));
    for version in [VCardVersion::V2_1, VCardVersion::V3_0] {
        let (output, report) = write_text(
            &dispatcher,
            &[card_with_address(AddressType::Intl)],
            version,
        );
        assert!(output.contains("ADR;TYPE=intl:"), "{version}: {output}");
        assert!(!report.has_warnings());
    }
}

#[test]
fn unregistered_extension_is_left_out_by_default() {
    let (output, report) = write_text(
        &Dispatcher::default(),
        &[contact("John Doe")],
        VCardVersion::V4_0,
    );
    assert!(!output.contains("X-MANAGER"));
    assert_eq!(report.omitted(), 1);
    assert!(!report.has_warnings());
}

#[test_log::test]
fn unknown_kind_policies() {
    let cards = [contact("John Doe")];

    let mut dispatcher = Dispatcher::default();
    dispatcher.options_mut().unknown_kinds = UnknownKindPolicy::Warn;
    let (_, report) = write_text(&dispatcher, &cards, VCardVersion::V4_0);
    let warning = report.warnings().next().expect("one warning");
    assert_eq!(warning.warning.kind(), WarningCode::UnregisteredKind);
    assert_eq!(warning.warning.payload(), "X-MANAGER");

    dispatcher.options_mut().unknown_kinds = UnknownKindPolicy::Fail;
    let err = dispatcher
        .write(&cards, VCardVersion::V4_0, &mut TextWriter::new())
        .expect_err("policy is fail");
    assert!(matches!(
        err,
        DispatchError::UnregisteredKind { position: 1, .. }
    ));
    assert!(err.to_string().contains("X-MANAGER"));
}

#[test]
fn third_party_scribe_makes_extension_writable() {
    let mut dispatcher = Dispatcher::default();
    dispatcher.register_scribe(TextScribe::new(PropertyKind::new("x-manager")));

    let (output, _) = write_text(&dispatcher, &[contact("John Doe")], VCardVersion::V4_0);
    let lines = property_lines(&output);
    assert_eq!(lines[0], "FN:John Doe");
    assert_eq!(lines[1], "X-MANAGER:Jane Roe");
    assert!(lines[2].starts_with("ADR;"));
    assert!(lines[3].starts_with("PRODID:"));

    // The default dispatcher is unaffected.
    let (plain, _) = write_text(
        &Dispatcher::default(),
        &[contact("John Doe")],
        VCardVersion::V4_0,
    );
    assert!(!plain.contains("X-MANAGER"));
}

#[test]
fn typed_encodings_need_v4() {
    let cards = [card_with_address(AddressType::Work)];
    let dispatcher = Dispatcher::default();

    for version in [VCardVersion::V2_1, VCardVersion::V3_0] {
        let json = dispatcher.write(&cards, version, &mut JsonWriter::new());
        assert!(matches!(
            json,
            Err(DispatchError::UnsupportedVersion { format: "jCard", .. })
        ));
        let xml = dispatcher.write(&cards, version, &mut XmlWriter::new());
        assert!(matches!(
            xml,
            Err(DispatchError::UnsupportedVersion { format: "xCard", .. })
        ));
    }

    let mut json = JsonWriter::new();
    dispatcher
        .write(&cards, VCardVersion::V4_0, &mut json)
        .expect("jCard write");
    let text = json.into_string().expect("serializes");
    assert!(text.starts_with(r#"[["vcard",[["version",{},"text","4.0"],["adr""#));
    assert!(text.contains(r#"["prodid",{},"text","cardscribe "#));
}

#[test]
fn long_lines_are_folded() {
    let mut card = contact(&"Wolfeschlegelsteinhausenbergerdorff ".repeat(4));
    card.add_property(cardscribe_test::component::vcard::TextProperty::new(
        PropertyKind::NOTE,
        "short",
    ));
    let (output, _) = write_text(&Dispatcher::default(), &[card], VCardVersion::V4_0);

    assert!(output.split("\r\n").all(|line| line.len() <= 75));
    assert!(output.contains("\r\n "));
}
