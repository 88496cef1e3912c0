//! Single/multi accessor contract of multi-valued fields.

use cardscribe_test::component::vcard::{Address, FieldSet};

fn samples() -> Vec<Vec<String>> {
    let words = ["123 Main St", "Suite 200", "", "Floor 3", "日本"];
    (0..=words.len())
        .map(|n| words[..n].iter().map(ToString::to_string).collect())
        .collect()
}

#[test]
fn set_all_then_all_is_identity() {
    for values in samples() {
        let mut set = FieldSet::new();
        set.set_all(values.clone());
        assert_eq!(set.all(), values.as_slice());
    }
}

#[test]
fn set_single_then_single_and_all() {
    for value in ["x", "", "123 Main St, Suite 200"] {
        let mut set: FieldSet = ["a", "b", "c"].into_iter().collect();
        set.set_single(Some(value));
        assert_eq!(set.single(), Some(value));
        assert_eq!(set.all(), [value]);
    }
}

#[test]
fn single_truncates_and_joined_recovers() {
    for values in samples().into_iter().filter(|v| v.len() >= 2) {
        let mut set = FieldSet::new();
        set.set_all(values.clone());
        assert_eq!(set.single(), Some(values[0].as_str()));
        assert_eq!(set.joined(","), Some(values.join(",")));
    }
}

#[test]
fn clearing_is_idempotent() {
    for values in samples() {
        let mut set = FieldSet::new();
        set.set_all(values);
        set.set_single(None::<String>);
        assert!(set.is_empty());
        set.set_single(None::<String>);
        assert!(set.all().is_empty());
        assert_eq!(set.joined(","), None);
    }
}

#[test]
fn address_components_follow_the_same_contract() {
    let mut adr = Address::new();
    adr.set_extended_addresses(["Building 4", "Wing B"]);
    assert_eq!(adr.extended_address(), Some("Building 4"));
    assert_eq!(
        adr.extended_address_full().as_deref(),
        Some("Building 4,Wing B")
    );

    adr.set_extended_address(Some("Annex"));
    assert_eq!(adr.extended_addresses(), ["Annex"]);

    adr.extended_addresses_mut().push("Rear".to_string());
    assert_eq!(adr.extended_address(), Some("Annex"));

    adr.set_extended_address(None::<String>);
    assert!(adr.extended_addresses().is_empty());
    assert!(adr.is_empty());
}
