//! Embedding cards in a host serde structure.

use std::sync::{Arc, OnceLock};

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use cardscribe_test::component::vcard::{
    CallSite, FormatAnnotation, JCardAdapter, SiteKey, VCard,
};

use crate::helpers::contact;

const CONTACT_CARD: SiteKey = SiteKey::from_static("Contact.card");
const CONTACT_ARCHIVED: SiteKey = SiteKey::from_static("Contact.archived");

fn adapter() -> &'static JCardAdapter {
    static ADAPTER: OnceLock<JCardAdapter> = OnceLock::new();
    ADAPTER.get_or_init(JCardAdapter::new)
}

fn serialize_card<S: Serializer>(card: &VCard, serializer: S) -> Result<S::Ok, S::Error> {
    adapter().serialize(card, &CallSite::new(CONTACT_CARD), serializer)
}

fn serialize_archived<S: Serializer>(card: &VCard, serializer: S) -> Result<S::Ok, S::Error> {
    let site = CallSite::annotated(
        CONTACT_ARCHIVED,
        FormatAnnotation {
            add_generator_marker: false,
            version_strict: true,
        },
    );
    adapter().serialize(card, &site, serializer)
}

#[derive(Serialize)]
struct Contact {
    id: u32,
    #[serde(serialize_with = "serialize_card")]
    card: VCard,
    #[serde(serialize_with = "serialize_archived")]
    archived: VCard,
}

fn names(card: &Value) -> Vec<&str> {
    card[1]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|p| p[0].as_str())
        .collect()
}

#[test_log::test]
fn sibling_sites_use_their_own_options() {
    let host = Contact {
        id: 7,
        card: contact("John Doe"),
        archived: contact("John Doe"),
    };
    let value = serde_json::to_value(&host).expect("serializes");

    assert_eq!(value["id"], json!(7));
    assert_eq!(names(&value["card"]), ["version", "fn", "adr", "prodid"]);
    assert_eq!(names(&value["archived"]), ["version", "fn", "adr"]);
    assert_eq!(
        value["card"][1][2],
        json!([
            "adr",
            {"type": "work"},
            "text",
            ["", "", ["123 Main St", "Suite 200"], "Austin", "TX", "78701", "USA"]
        ])
    );
}

#[test]
fn resolution_is_cached_per_site() {
    let adapter = JCardAdapter::new();
    let site = CallSite::annotated(
        SiteKey::new("Report.owner"),
        FormatAnnotation::default(),
    );

    let first = adapter.resolve(&site);
    let again = adapter.resolve(&site);
    assert!(Arc::ptr_eq(&first, &again));
    assert!(!Arc::ptr_eq(&first, adapter.dispatcher()));
    assert!(Arc::ptr_eq(
        first.registry(),
        adapter.dispatcher().registry()
    ));
}

#[test]
fn concurrent_first_use_resolves_once() {
    let adapter = JCardAdapter::new();
    let site = CallSite::annotated(SiteKey::new("Shared.card"), FormatAnnotation::default());

    let resolved: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| adapter.resolve(&site)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread finished"))
            .collect()
    });

    assert!(resolved.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(adapter.resolved_sites(), 1);
}
