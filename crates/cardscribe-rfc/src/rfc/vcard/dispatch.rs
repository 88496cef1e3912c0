//! Serialization dispatch.
//!
//! The [`Dispatcher`] walks each card's properties in order, resolves the
//! scribe for every property kind, filters what the target version cannot
//! express, and hands the rendered properties to a [`FormatWriter`].

use std::sync::Arc;

use cardscribe_core::config::{UnknownKindPolicy, WriterConfig};
use cardscribe_core::error::{CoreError, CoreResult};

use super::build::FormatWriter;
use super::core::{Property, PropertyKind, VCard, VCardVersion, Warning, WarningCode};
use super::scribe::{
    ProductIdScribe, PropertyScribe, RenderedProperty, ScribeRegistry, WriteContext,
};
use super::validation::{PropertyWarning, validate_property};
use crate::error::{DispatchError, DispatchResult};

/// Per-dispatcher write options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriterOptions {
    /// Append one PRODID naming this library to every card.
    pub add_generator_marker: bool,
    /// Omit properties the target version does not define and drop TYPE
    /// values it does not support.
    pub version_strict: bool,
    /// Handling of extension properties with no registered scribe.
    pub unknown_kinds: UnknownKindPolicy,
    /// Version used by [`Dispatcher::write_default`].
    pub target_version: VCardVersion,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            add_generator_marker: true,
            version_strict: true,
            unknown_kinds: UnknownKindPolicy::Skip,
            target_version: VCardVersion::V4_0,
        }
    }
}

impl TryFrom<&WriterConfig> for WriterOptions {
    type Error = CoreError;

    fn try_from(config: &WriterConfig) -> CoreResult<Self> {
        let target_version = VCardVersion::parse(&config.target_version).ok_or_else(|| {
            CoreError::InvalidConfiguration(format!(
                "unknown target version {:?}",
                config.target_version
            ))
        })?;
        Ok(Self {
            add_generator_marker: config.add_generator_marker,
            version_strict: config.version_strict,
            unknown_kinds: config.unknown_kinds,
            target_version,
        })
    }
}

/// Outcome of writing one card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardReport {
    /// Warnings in property order.
    pub warnings: Vec<PropertyWarning>,
    /// Properties handed to the writer, generator marker included.
    pub written: usize,
    /// Properties left out of the output.
    pub omitted: usize,
}

/// Outcome of a write call, one entry per card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub cards: Vec<CardReport>,
}

impl WriteReport {
    /// Every warning of every card.
    pub fn warnings(&self) -> impl Iterator<Item = &PropertyWarning> {
        self.cards.iter().flat_map(|card| card.warnings.iter())
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.cards.iter().any(|card| !card.warnings.is_empty())
    }

    #[must_use]
    pub fn written(&self) -> usize {
        self.cards.iter().map(|card| card.written).sum()
    }

    #[must_use]
    pub fn omitted(&self) -> usize {
        self.cards.iter().map(|card| card.omitted).sum()
    }
}

/// A property ready for the writer, with what is needed to report on it.
struct Pending {
    kind: PropertyKind,
    position: usize,
    rendered: RenderedProperty,
}

/// Writes cards through registered scribes.
///
/// ## Summary
/// The registry is shared behind an `Arc`; dispatchers cloned from one
/// another share it until one of them registers a scribe, at which point
/// that dispatcher gets its own copy.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ScribeRegistry>,
    options: WriterOptions,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(WriterOptions::default())
    }
}

impl Dispatcher {
    /// Creates a dispatcher with the standard scribes.
    #[must_use]
    pub fn new(options: WriterOptions) -> Self {
        Self::with_registry(Arc::new(ScribeRegistry::standard()), options)
    }

    #[must_use]
    pub fn with_registry(registry: Arc<ScribeRegistry>, options: WriterOptions) -> Self {
        Self { registry, options }
    }

    /// Builds a dispatcher from loaded settings.
    ///
    /// ## Errors
    /// Returns an error if the configured target version is unknown.
    pub fn from_config(config: &WriterConfig) -> CoreResult<Self> {
        Ok(Self::new(WriterOptions::try_from(config)?))
    }

    #[must_use]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut WriterOptions {
        &mut self.options
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<ScribeRegistry> {
        &self.registry
    }

    /// Registers a scribe on this dispatcher only.
    pub fn register_scribe(&mut self, scribe: impl PropertyScribe + 'static) {
        Arc::make_mut(&mut self.registry).register(scribe);
    }

    /// Writes `cards` in the configured target version.
    ///
    /// ## Errors
    /// See [`Dispatcher::write`].
    pub fn write_default(
        &self,
        cards: &[VCard],
        writer: &mut dyn FormatWriter,
    ) -> DispatchResult<WriteReport> {
        self.write(cards, self.options.target_version, writer)
    }

    /// Writes `cards` in `version` to `writer`.
    ///
    /// ## Summary
    /// Properties are written in card order. A property the scribe declines
    /// or the version cannot express is left out and reported; the
    /// generator marker, when enabled, is written once after the last
    /// property of each card.
    ///
    /// ## Errors
    /// - [`DispatchError::UnsupportedVersion`] if the writer cannot express `version`.
    /// - [`DispatchError::Configuration`] if a standard kind has no scribe.
    /// - [`DispatchError::UnregisteredKind`] if an extension kind has no scribe
    ///   and the policy is [`UnknownKindPolicy::Fail`].
    /// - [`DispatchError::Encoding`] if the writer rejects a property.
    /// - [`DispatchError::Write`] if the writer fails between properties.
    ///
    /// On error, the card being written is discarded from the writer; cards
    /// finished before it stay in the output.
    #[tracing::instrument(skip(self, cards, writer), fields(
        cards = cards.len(),
        format = writer.format_name(),
    ))]
    pub fn write(
        &self,
        cards: &[VCard],
        version: VCardVersion,
        writer: &mut dyn FormatWriter,
    ) -> DispatchResult<WriteReport> {
        if !writer.supports_version(version) {
            return Err(DispatchError::UnsupportedVersion {
                format: writer.format_name(),
                version,
            });
        }

        let ctx = WriteContext::new(version, self.options.version_strict);
        let mut report = WriteReport::default();

        for (index, card) in cards.iter().enumerate() {
            tracing::debug!(
                card = index,
                properties = card.properties.len(),
                "Writing card"
            );

            let (pending, mut card_report) = self.render_card(index, card, ctx)?;

            if let Err(err) = Self::emit_card(index, version, &pending, writer) {
                tracing::debug!(card = index, error = %err, "Discarding partially written card");
                writer.abort_card();
                return Err(err);
            }

            card_report.written = pending.len();
            report.cards.push(card_report);
        }

        Ok(report)
    }

    /// Hands one rendered card to the writer.
    fn emit_card(
        index: usize,
        version: VCardVersion,
        pending: &[Pending],
        writer: &mut dyn FormatWriter,
    ) -> DispatchResult<()> {
        writer.begin_card(version)?;
        for item in pending {
            writer
                .write_property(&item.rendered)
                .map_err(|source| DispatchError::Encoding {
                    kind: item.kind.clone(),
                    card: index,
                    position: item.position,
                    source,
                })?;
        }
        writer.end_card()?;
        Ok(())
    }

    /// Renders every property of `card`, without touching the writer.
    fn render_card(
        &self,
        index: usize,
        card: &VCard,
        ctx: WriteContext,
    ) -> DispatchResult<(Vec<Pending>, CardReport)> {
        let mut pending = Vec::with_capacity(card.properties.len() + 1);
        let mut report = CardReport::default();

        for (position, property) in card.properties.iter().enumerate() {
            let property: &dyn Property = &**property;
            let kind = property.kind();

            if self.options.add_generator_marker && kind == PropertyKind::PRODID {
                tracing::trace!(position, "Replacing existing PRODID with generator marker");
                report.omitted += 1;
                continue;
            }

            let Some(scribe) = self.registry.resolve(&kind) else {
                self.handle_unregistered(index, position, &kind, &mut report)?;
                continue;
            };

            report.warnings.extend(
                validate_property(property, ctx.version)
                    .into_iter()
                    .map(|warning| PropertyWarning {
                        position,
                        kind: kind.clone(),
                        warning,
                    }),
            );

            if ctx.version_strict && !property.is_supported_by(ctx.version) {
                tracing::debug!(
                    kind = %kind,
                    version = %ctx.version,
                    "Omitting unsupported property"
                );
                report.omitted += 1;
                continue;
            }

            match scribe.write(property, ctx) {
                Ok(rendered) => {
                    tracing::trace!(kind = %kind, position, "Rendered property");
                    pending.push(Pending {
                        kind,
                        position,
                        rendered,
                    });
                }
                Err(err) => {
                    tracing::warn!(kind = %kind, position, error = %err, "Scribe skipped property");
                    report.warnings.push(PropertyWarning {
                        position,
                        kind,
                        warning: Warning::new(err.warning_code(), err.to_string()),
                    });
                    report.omitted += 1;
                }
            }
        }

        if self.options.add_generator_marker {
            let marker = ProductIdScribe::generator_marker();
            let position = card.properties.len();
            let rendered = match self.registry.resolve(&PropertyKind::PRODID) {
                Some(scribe) => scribe.write(&marker, ctx),
                None => ProductIdScribe.write(&marker, ctx),
            };
            match rendered {
                Ok(rendered) => pending.push(Pending {
                    kind: PropertyKind::PRODID,
                    position,
                    rendered,
                }),
                Err(err) => {
                    tracing::warn!(error = %err, "Generator marker skipped");
                    report.warnings.push(PropertyWarning {
                        position,
                        kind: PropertyKind::PRODID,
                        warning: Warning::new(err.warning_code(), err.to_string()),
                    });
                }
            }
        }

        Ok((pending, report))
    }

    fn handle_unregistered(
        &self,
        card: usize,
        position: usize,
        kind: &PropertyKind,
        report: &mut CardReport,
    ) -> DispatchResult<()> {
        if kind.is_standard() {
            return Err(DispatchError::Configuration {
                kind: kind.clone(),
                card,
                position,
            });
        }

        match self.options.unknown_kinds {
            UnknownKindPolicy::Skip => {
                tracing::trace!(kind = %kind, position, "Skipping unregistered property");
            }
            UnknownKindPolicy::Warn => {
                tracing::warn!(kind = %kind, position, "No scribe registered, skipping property");
                report.warnings.push(PropertyWarning {
                    position,
                    kind: kind.clone(),
                    warning: Warning::new(WarningCode::UnregisteredKind, kind.as_str()),
                });
            }
            UnknownKindPolicy::Fail => {
                return Err(DispatchError::UnregisteredKind {
                    kind: kind.clone(),
                    card,
                    position,
                });
            }
        }
        report.omitted += 1;
        Ok(())
    }
}
