//! Dispatchers built from loaded settings.

use config::{File, FileFormat};

use cardscribe_test::component::config::{Settings, UnknownKindPolicy};
use cardscribe_test::component::vcard::{AddressType, Dispatcher, VCardVersion};

use crate::helpers::{card_with_address, write_text};

fn load(toml: &str) -> anyhow::Result<Settings> {
    Ok(Settings::builder()?
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()?)
}

#[test]
fn defaults_give_marker_and_strict_v4() -> anyhow::Result<()> {
    let settings = load("")?;
    let dispatcher = Dispatcher::from_config(&settings.writer)?;

    let options = dispatcher.options();
    assert!(options.add_generator_marker);
    assert!(options.version_strict);
    assert_eq!(options.unknown_kinds, UnknownKindPolicy::Skip);
    assert_eq!(options.target_version, VCardVersion::V4_0);
    Ok(())
}

#[test]
fn configured_target_version_is_used_by_default_write() -> anyhow::Result<()> {
    let settings = load(
        r#"
        [writer]
        add_generator_marker = false
        version_strict = false
        target_version = "2.1"
        "#,
    )?;
    let dispatcher = Dispatcher::from_config(&settings.writer)?;

    let mut writer = cardscribe_test::component::vcard::TextWriter::new();
    dispatcher.write_default(&[card_with_address(AddressType::Parcel)], &mut writer)?;
    assert!(writer.as_str().contains("VERSION:2.1\r\n"));
    assert!(!writer.as_str().contains("PRODID"));

    let (lenient, report) = write_text(
        &dispatcher,
        &[card_with_address(AddressType::Parcel)],
        VCardVersion::V4_0,
    );
    assert!(lenient.contains("ADR;TYPE=parcel:"));
    assert!(report.has_warnings());
    Ok(())
}

#[test]
fn unknown_target_version_is_rejected() -> anyhow::Result<()> {
    let settings = load("[writer]\ntarget_version = \"5.0\"")?;
    let err = Dispatcher::from_config(&settings.writer).expect_err("5.0 does not exist");
    assert!(err.to_string().contains("5.0"));
    Ok(())
}
