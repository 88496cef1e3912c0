//! Mailing address (ADR property, RFC 6350 §6.3.1).

use std::any::Any;

use super::field_set::FieldSet;
use super::parameter::{Geo, Parameters, Pid};
use super::property::{Property, PropertyKind};
use super::vcard::VCardVersion;
use super::warning::Warning;
use crate::rfc::vcard::validation::{CategoryTag, validate_tags};

const V2_1_AND_V3_0: &[VCardVersion] = &[VCardVersion::V2_1, VCardVersion::V3_0];

/// A TYPE value of an ADR property.
///
/// Unknown values are kept verbatim and are treated as valid in every
/// version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AddressType {
    /// Domestic delivery address (2.1, 3.0).
    Dom,
    /// International delivery address (2.1, 3.0).
    Intl,
    /// Postal delivery address (2.1, 3.0).
    Postal,
    /// Parcel delivery address (2.1, 3.0).
    Parcel,
    Home,
    Work,
    /// Preferred address (2.1, 3.0). 4.0 expresses this with the PREF
    /// parameter instead.
    Pref,
    /// Extension or unrecognized value.
    Other(String),
}

impl AddressType {
    pub const DOM: &'static str = "dom";
    pub const INTL: &'static str = "intl";
    pub const POSTAL: &'static str = "postal";
    pub const PARCEL: &'static str = "parcel";
    pub const HOME: &'static str = "home";
    pub const WORK: &'static str = "work";
    pub const PREF: &'static str = "pref";

    /// Looks up a TYPE value (case-insensitive).
    #[must_use]
    pub fn get(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            Self::DOM => Self::Dom,
            Self::INTL => Self::Intl,
            Self::POSTAL => Self::Postal,
            Self::PARCEL => Self::Parcel,
            Self::HOME => Self::Home,
            Self::WORK => Self::Work,
            Self::PREF => Self::Pref,
            _ => Self::Other(value.to_string()),
        }
    }

    /// Returns the TYPE value as written.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Dom => Self::DOM,
            Self::Intl => Self::INTL,
            Self::Postal => Self::POSTAL,
            Self::Parcel => Self::PARCEL,
            Self::Home => Self::HOME,
            Self::Work => Self::WORK,
            Self::Pref => Self::PREF,
            Self::Other(s) => s,
        }
    }

    #[must_use]
    pub fn supported_versions(&self) -> &'static [VCardVersion] {
        match self {
            Self::Dom | Self::Intl | Self::Postal | Self::Parcel | Self::Pref => V2_1_AND_V3_0,
            Self::Home | Self::Work | Self::Other(_) => VCardVersion::ALL,
        }
    }
}

impl CategoryTag for AddressType {
    fn value(&self) -> &str {
        AddressType::value(self)
    }

    fn is_supported_by(&self, version: VCardVersion) -> bool {
        self.supported_versions().contains(&version)
    }

    fn is_pref(&self) -> bool {
        matches!(self, Self::Pref)
    }
}

/// A mailing address.
///
/// Each component is a [`FieldSet`]. The single-value accessors
/// (`street_address`, `set_street_address`, ...) read the first value and
/// replace the whole component; the plural ones expose every value.
///
/// ## Only part of the street address is returned
///
/// The card was most likely produced with unescaped commas in the ADR
/// value, which readers split into several values. Use
/// [`street_address_full`](Self::street_address_full) or
/// [`extended_address_full`](Self::extended_address_full).
///
/// ```rust
/// use cardscribe_rfc::rfc::vcard::{Address, AddressType};
///
/// let mut adr = Address::new();
/// adr.set_street_address(Some("123 Main St."));
/// adr.set_locality(Some("Austin"));
/// adr.set_region(Some("TX"));
/// adr.set_postal_code(Some("12345"));
/// adr.set_country(Some("USA"));
/// adr.add_type(&AddressType::Work);
/// adr.set_label(Some("123 Main St.\nAustin, TX 12345\nUSA"));
///
/// assert_eq!(adr.locality(), Some("Austin"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    group: Option<String>,
    po_boxes: FieldSet,
    extended_addresses: FieldSet,
    street_addresses: FieldSet,
    localities: FieldSet,
    regions: FieldSet,
    postal_codes: FieldSet,
    countries: FieldSet,
    params: Parameters,
}

impl Address {
    /// Creates an empty address.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Post office box ---

    #[must_use]
    pub fn po_box(&self) -> Option<&str> {
        self.po_boxes.single()
    }

    #[must_use]
    pub fn po_boxes(&self) -> &[String] {
        self.po_boxes.all()
    }

    pub fn po_boxes_mut(&mut self) -> &mut Vec<String> {
        self.po_boxes.all_mut()
    }

    pub fn set_po_box(&mut self, po_box: Option<impl Into<String>>) {
        self.po_boxes.set_single(po_box);
    }

    pub fn set_po_boxes<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, po_boxes: I) {
        self.po_boxes.set_all(po_boxes);
    }

    // --- Extended address ---

    /// Extended address (e.g. "Suite 200").
    #[must_use]
    pub fn extended_address(&self) -> Option<&str> {
        self.extended_addresses.single()
    }

    #[must_use]
    pub fn extended_addresses(&self) -> &[String] {
        self.extended_addresses.all()
    }

    pub fn extended_addresses_mut(&mut self) -> &mut Vec<String> {
        self.extended_addresses.all_mut()
    }

    /// Every extended address value joined with commas.
    #[must_use]
    pub fn extended_address_full(&self) -> Option<String> {
        self.extended_addresses.joined(",")
    }

    pub fn set_extended_address(&mut self, extended: Option<impl Into<String>>) {
        self.extended_addresses.set_single(extended);
    }

    pub fn set_extended_addresses<I: IntoIterator<Item = S>, S: Into<String>>(
        &mut self,
        extended: I,
    ) {
        self.extended_addresses.set_all(extended);
    }

    // --- Street address ---

    /// Street address (e.g. "123 Main St").
    #[must_use]
    pub fn street_address(&self) -> Option<&str> {
        self.street_addresses.single()
    }

    #[must_use]
    pub fn street_addresses(&self) -> &[String] {
        self.street_addresses.all()
    }

    pub fn street_addresses_mut(&mut self) -> &mut Vec<String> {
        self.street_addresses.all_mut()
    }

    /// Every street address value joined with commas.
    #[must_use]
    pub fn street_address_full(&self) -> Option<String> {
        self.street_addresses.joined(",")
    }

    pub fn set_street_address(&mut self, street: Option<impl Into<String>>) {
        self.street_addresses.set_single(street);
    }

    pub fn set_street_addresses<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, street: I) {
        self.street_addresses.set_all(street);
    }

    // --- Locality ---

    /// Locality (city).
    #[must_use]
    pub fn locality(&self) -> Option<&str> {
        self.localities.single()
    }

    #[must_use]
    pub fn localities(&self) -> &[String] {
        self.localities.all()
    }

    pub fn localities_mut(&mut self) -> &mut Vec<String> {
        self.localities.all_mut()
    }

    pub fn set_locality(&mut self, locality: Option<impl Into<String>>) {
        self.localities.set_single(locality);
    }

    pub fn set_localities<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, localities: I) {
        self.localities.set_all(localities);
    }

    // --- Region ---

    /// Region (state or province).
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.regions.single()
    }

    #[must_use]
    pub fn regions(&self) -> &[String] {
        self.regions.all()
    }

    pub fn regions_mut(&mut self) -> &mut Vec<String> {
        self.regions.all_mut()
    }

    pub fn set_region(&mut self, region: Option<impl Into<String>>) {
        self.regions.set_single(region);
    }

    pub fn set_regions<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, regions: I) {
        self.regions.set_all(regions);
    }

    // --- Postal code ---

    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_codes.single()
    }

    #[must_use]
    pub fn postal_codes(&self) -> &[String] {
        self.postal_codes.all()
    }

    pub fn postal_codes_mut(&mut self) -> &mut Vec<String> {
        self.postal_codes.all_mut()
    }

    pub fn set_postal_code(&mut self, postal_code: Option<impl Into<String>>) {
        self.postal_codes.set_single(postal_code);
    }

    pub fn set_postal_codes<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, codes: I) {
        self.postal_codes.set_all(codes);
    }

    // --- Country ---

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.countries.single()
    }

    #[must_use]
    pub fn countries(&self) -> &[String] {
        self.countries.all()
    }

    pub fn countries_mut(&mut self) -> &mut Vec<String> {
        self.countries.all_mut()
    }

    pub fn set_country(&mut self, country: Option<impl Into<String>>) {
        self.countries.set_single(country);
    }

    pub fn set_countries<I: IntoIterator<Item = S>, S: Into<String>>(&mut self, countries: I) {
        self.countries.set_all(countries);
    }

    /// Components in ADR order: PO box, extended, street, locality, region,
    /// postal code, country.
    #[must_use]
    pub fn components(&self) -> [&FieldSet; 7] {
        [
            &self.po_boxes,
            &self.extended_addresses,
            &self.street_addresses,
            &self.localities,
            &self.regions,
            &self.postal_codes,
            &self.countries,
        ]
    }

    /// Returns whether every component is unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components().iter().all(|c| c.is_empty())
    }

    // --- Parameters ---

    /// TYPE values in order.
    #[must_use]
    pub fn types(&self) -> Vec<AddressType> {
        self.params
            .types()
            .into_iter()
            .map(AddressType::get)
            .collect()
    }

    pub fn add_type(&mut self, address_type: &AddressType) {
        self.params.add_type(address_type.value());
    }

    pub fn remove_type(&mut self, address_type: &AddressType) {
        self.params.remove_type(address_type.value());
    }

    /// Text to print on a mailing label.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.params.label()
    }

    pub fn set_label(&mut self, label: Option<impl Into<String>>) {
        self.params.set_label(label);
    }

    /// Coordinates of the address (4.0).
    #[must_use]
    pub fn geo(&self) -> Option<Geo> {
        self.params.geo()
    }

    pub fn set_geo(&mut self, geo: Option<Geo>) {
        self.params.set_geo(geo);
    }

    /// Timezone of the address, e.g. "America/Chicago" (4.0).
    #[must_use]
    pub fn timezone(&self) -> Option<&str> {
        self.params.timezone()
    }

    pub fn set_timezone(&mut self, timezone: Option<impl Into<String>>) {
        self.params.set_timezone(timezone);
    }

    #[must_use]
    pub fn pref(&self) -> Option<u8> {
        self.params.pref()
    }

    pub fn set_pref(&mut self, pref: Option<u8>) {
        self.params.set_pref(pref);
    }

    #[must_use]
    pub fn pids(&self) -> Vec<Pid> {
        self.params.pids()
    }

    pub fn add_pid(&mut self, local_id: u32, client_pid_map_ref: u32) {
        self.params.add_pid(Pid::new(local_id, client_pid_map_ref));
    }

    pub fn remove_pids(&mut self) {
        self.params.remove_pids();
    }

    #[must_use]
    pub fn alt_id(&self) -> Option<&str> {
        self.params.alt_id()
    }

    pub fn set_alt_id(&mut self, alt_id: Option<impl Into<String>>) {
        self.params.set_alt_id(alt_id);
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.params.language()
    }

    pub fn set_language(&mut self, language: Option<impl Into<String>>) {
        self.params.set_language(language);
    }

    pub fn set_group(&mut self, group: Option<impl Into<String>>) {
        self.group = group.map(Into::into);
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }
}

impl Property for Address {
    fn kind(&self) -> PropertyKind {
        PropertyKind::ADR
    }

    fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn validate_for(&self, version: VCardVersion, warnings: &mut Vec<Warning>) {
        warnings.extend(validate_tags(&self.types(), version));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
