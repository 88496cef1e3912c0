//! Kind-keyed scribe lookup.

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    AddressScribe, GeoScribe, ListScribe, ProductIdScribe, PropertyScribe, StructuredScribe,
    TextScribe,
};
use crate::rfc::vcard::core::PropertyKind;

/// Standard kinds rendered by [`TextScribe`].
const TEXT_KINDS: &[PropertyKind] = &[
    PropertyKind::FN,
    PropertyKind::NICKNAME,
    PropertyKind::BDAY,
    PropertyKind::ANNIVERSARY,
    PropertyKind::KIND,
    PropertyKind::NAME,
    PropertyKind::SORT_STRING,
    PropertyKind::LABEL,
    PropertyKind::TEL,
    PropertyKind::EMAIL,
    PropertyKind::IMPP,
    PropertyKind::LANG,
    PropertyKind::MAILER,
    PropertyKind::TZ,
    PropertyKind::TITLE,
    PropertyKind::ROLE,
    PropertyKind::MEMBER,
    PropertyKind::RELATED,
    PropertyKind::CATEGORIES,
    PropertyKind::NOTE,
    PropertyKind::REV,
    PropertyKind::UID,
    PropertyKind::URL,
    PropertyKind::CLASS,
    PropertyKind::FBURL,
    PropertyKind::CALADRURI,
    PropertyKind::CALURI,
];

/// Maps each [`PropertyKind`] to the scribe that renders it.
///
/// Registering a scribe replaces any earlier scribe for the same kind.
/// Cloning is cheap (scribes are shared behind `Arc`), so a dispatcher can
/// hold its own copy and diverge from the one it was created from.
///
/// `register` takes `&mut self`; sharing a registry between threads that
/// register concurrently needs outside synchronization.
#[derive(Debug, Clone, Default)]
pub struct ScribeRegistry {
    scribes: HashMap<PropertyKind, Arc<dyn PropertyScribe>>,
}

impl ScribeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with a scribe for every standard kind.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(AddressScribe);
        registry.register(ProductIdScribe);
        registry.register(GeoScribe);
        registry.register(ListScribe::organization());
        registry.register(StructuredScribe::name());
        registry.register(StructuredScribe::gender());
        for kind in TEXT_KINDS {
            registry.register(TextScribe::new(kind.clone()));
        }
        registry
    }

    /// Registers `scribe` under its kind, returning the scribe it replaced.
    pub fn register(
        &mut self,
        scribe: impl PropertyScribe + 'static,
    ) -> Option<Arc<dyn PropertyScribe>> {
        self.register_shared(Arc::new(scribe))
    }

    /// Registers an already shared scribe.
    pub fn register_shared(
        &mut self,
        scribe: Arc<dyn PropertyScribe>,
    ) -> Option<Arc<dyn PropertyScribe>> {
        let kind = scribe.kind();
        tracing::trace!(kind = %kind, "Registering scribe");
        self.scribes.insert(kind, scribe)
    }

    /// Removes the scribe for `kind`.
    pub fn unregister(&mut self, kind: &PropertyKind) -> Option<Arc<dyn PropertyScribe>> {
        self.scribes.remove(kind)
    }

    /// Returns the scribe for `kind`, if one is registered.
    #[must_use]
    pub fn resolve(&self, kind: &PropertyKind) -> Option<&dyn PropertyScribe> {
        self.scribes.get(kind).map(|scribe| &**scribe)
    }

    #[must_use]
    pub fn contains(&self, kind: &PropertyKind) -> bool {
        self.scribes.contains_key(kind)
    }

    /// Registered kinds, in no particular order.
    pub fn kinds(&self) -> impl Iterator<Item = &PropertyKind> {
        self.scribes.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scribes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scribes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::core::{Property, VCardVersion};
    use crate::rfc::vcard::scribe::{RenderedProperty, ScribeResult, WriteContext};

    #[derive(Debug)]
    struct ShoutingScribe;

    impl PropertyScribe for ShoutingScribe {
        fn kind(&self) -> PropertyKind {
            PropertyKind::FN
        }

        fn property_name(&self, _version: VCardVersion) -> String {
            "FN-SHOUT".to_string()
        }

        fn write(
            &self,
            property: &dyn Property,
            ctx: WriteContext,
        ) -> ScribeResult<RenderedProperty> {
            TextScribe::new(PropertyKind::FN)
                .write(property, ctx)
                .map(|rendered| RenderedProperty {
                    name: self.property_name(ctx.version),
                    ..rendered
                })
        }
    }

    #[test]
    fn standard_registry_covers_every_standard_kind() {
        let registry = ScribeRegistry::standard();
        for kind in PropertyKind::STANDARD {
            let scribe = registry.resolve(kind);
            assert!(scribe.is_some_and(|s| s.kind() == *kind), "{kind}");
        }
        assert_eq!(registry.len(), PropertyKind::STANDARD.len());
        assert!(registry.resolve(&PropertyKind::new("X-CUSTOM")).is_none());
    }

    #[test]
    fn register_overwrites_previous_entry() {
        let mut registry = ScribeRegistry::standard();
        let before = registry.len();

        let replaced = registry.register(ShoutingScribe);
        assert!(replaced.is_some());
        assert_eq!(registry.len(), before);

        let scribe = registry.resolve(&PropertyKind::FN).expect("FN registered");
        assert_eq!(scribe.property_name(VCardVersion::V4_0), "FN-SHOUT");
    }

    #[test]
    fn clones_diverge() {
        let original = ScribeRegistry::standard();
        let mut copy = original.clone();
        copy.register(TextScribe::new(PropertyKind::new("X-SKYPE")));

        assert!(copy.contains(&PropertyKind::new("x-skype")));
        assert!(!original.contains(&PropertyKind::new("X-SKYPE")));
    }

    #[test]
    fn unregister_removes_kind() {
        let mut registry = ScribeRegistry::standard();
        assert!(registry.unregister(&PropertyKind::NOTE).is_some());
        assert!(registry.resolve(&PropertyKind::NOTE).is_none());
        assert!(!registry.is_empty());
        assert!(registry.kinds().all(|k| *k != PropertyKind::NOTE));
    }
}
