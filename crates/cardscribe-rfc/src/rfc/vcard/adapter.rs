//! serde integration.
//!
//! [`JCardAdapter`] lets a card be serialized as jCard from inside any
//! serde serializer. Each place a card is embedded is identified by a
//! [`CallSite`]; the write options of a site are resolved once, on first
//! use, and cached under its [`SiteKey`].

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};

use super::build::JsonWriter;
use super::core::{VCard, VCardVersion};
use super::dispatch::{Dispatcher, WriteReport, WriterOptions};
use super::scribe::PropertyScribe;

/// Identifies one embedding site, e.g. `"Contact.card"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteKey(Cow<'static, str>);

impl SiteKey {
    #[must_use]
    pub const fn from_static(key: &'static str) -> Self {
        Self(Cow::Borrowed(key))
    }

    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(Cow::Owned(key.into()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SiteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-site overrides of the write options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatAnnotation {
    pub add_generator_marker: bool,
    pub version_strict: bool,
}

impl Default for FormatAnnotation {
    fn default() -> Self {
        Self {
            add_generator_marker: true,
            version_strict: true,
        }
    }
}

/// An embedding site and its optional annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub key: SiteKey,
    pub format: Option<FormatAnnotation>,
}

impl CallSite {
    /// A site without an annotation; it uses the adapter's own options.
    #[must_use]
    pub fn new(key: SiteKey) -> Self {
        Self { key, format: None }
    }

    #[must_use]
    pub fn annotated(key: SiteKey, format: FormatAnnotation) -> Self {
        Self {
            key,
            format: Some(format),
        }
    }
}

/// Serializes cards as jCard for a host serde serializer.
///
/// ## Summary
/// Sites without an annotation share the adapter's dispatcher. An
/// annotated site gets a dispatcher of its own built from the annotation
/// and the adapter's registry. Resolution happens once per [`SiteKey`];
/// later lookups with the same key reuse the cached dispatcher even if the
/// annotation differs.
#[derive(Debug)]
pub struct JCardAdapter {
    base: Arc<Dispatcher>,
    sites: RwLock<HashMap<SiteKey, Arc<Dispatcher>>>,
    reports: RwLock<HashMap<SiteKey, WriteReport>>,
}

impl Default for JCardAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl JCardAdapter {
    /// Creates an adapter with the standard scribes and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(Dispatcher::new(WriterOptions::default()))
    }

    #[must_use]
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self {
            base: Arc::new(dispatcher),
            sites: RwLock::new(HashMap::new()),
            reports: RwLock::new(HashMap::new()),
        }
    }

    /// The dispatcher used by sites without an annotation.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.base
    }

    /// Registers a scribe for every site. Cached site resolutions are
    /// dropped so they pick the scribe up.
    pub fn register_scribe(&mut self, scribe: impl PropertyScribe + 'static) {
        Arc::make_mut(&mut self.base).register_scribe(scribe);
        self.sites
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Returns the dispatcher for `site`, resolving it on first use.
    #[must_use]
    pub fn resolve(&self, site: &CallSite) -> Arc<Dispatcher> {
        if let Some(cached) = self
            .sites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&site.key)
        {
            return Arc::clone(cached);
        }

        let resolved = match site.format {
            None => Arc::clone(&self.base),
            Some(format) => {
                let options = WriterOptions {
                    add_generator_marker: format.add_generator_marker,
                    version_strict: format.version_strict,
                    ..*self.base.options()
                };
                Arc::new(Dispatcher::with_registry(
                    Arc::clone(self.base.registry()),
                    options,
                ))
            }
        };

        tracing::debug!(site = %site.key, annotated = site.format.is_some(), "Resolved call site");

        let mut sites = self.sites.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(sites.entry(site.key.clone()).or_insert(resolved))
    }

    /// Number of resolved sites.
    #[must_use]
    pub fn resolved_sites(&self) -> usize {
        self.sites
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Report of the last successful serialization at `key`.
    #[must_use]
    pub fn last_report(&self, key: &SiteKey) -> Option<WriteReport> {
        self.reports
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Serializes `card` as a jCard array with the options of `site`.
    ///
    /// Write warnings are logged and kept as the site's
    /// [`last_report`](Self::last_report).
    ///
    /// ## Errors
    /// Returns the serializer's error if dispatching or serializing fails.
    pub fn serialize<S: Serializer>(
        &self,
        card: &VCard,
        site: &CallSite,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let dispatcher = self.resolve(site);
        let mut writer = JsonWriter::new();
        let report = dispatcher
            .write(std::slice::from_ref(card), VCardVersion::V4_0, &mut writer)
            .map_err(S::Error::custom)?;

        for warning in report.warnings() {
            tracing::warn!(site = %site.key, %warning, "jCard write warning");
        }
        self.reports
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(site.key.clone(), report);

        let value = writer
            .into_cards()
            .pop()
            .ok_or_else(|| S::Error::custom("no card written"))?;
        value.serialize(serializer)
    }

    /// Pairs `card` with `site` so it can be passed wherever a
    /// [`Serialize`] value is expected.
    #[must_use]
    pub fn bind<'a>(&'a self, card: &'a VCard, site: &'a CallSite) -> Bound<'a> {
        Bound {
            adapter: self,
            card,
            site,
        }
    }
}

/// A card bound to a call site. See [`JCardAdapter::bind`].
#[derive(Debug, Clone, Copy)]
pub struct Bound<'a> {
    adapter: &'a JCardAdapter,
    card: &'a VCard,
    site: &'a CallSite,
}

impl Serialize for Bound<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.adapter.serialize(self.card, self.site, serializer)
    }
}
