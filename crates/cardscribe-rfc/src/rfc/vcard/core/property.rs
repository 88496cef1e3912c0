//! vCard property types (RFC 6350 §6).

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

use super::parameter::Parameters;
use super::vcard::VCardVersion;
use super::warning::Warning;

const V2_1_AND_V3_0: &[VCardVersion] = &[VCardVersion::V2_1, VCardVersion::V3_0];
const V3_0_ONLY: &[VCardVersion] = &[VCardVersion::V3_0];
const V3_0_AND_V4_0: &[VCardVersion] = &[VCardVersion::V3_0, VCardVersion::V4_0];
const V4_0_ONLY: &[VCardVersion] = &[VCardVersion::V4_0];

/// The runtime kind of a property, keyed on its uppercase name.
///
/// The set is open: third parties create kinds for their own (usually
/// `X-`) properties with [`PropertyKind::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyKind(Cow<'static, str>);

impl PropertyKind {
    // Identification
    pub const FN: Self = Self::from_static(names::FN);
    pub const N: Self = Self::from_static(names::N);
    pub const NICKNAME: Self = Self::from_static(names::NICKNAME);
    pub const BDAY: Self = Self::from_static(names::BDAY);
    pub const ANNIVERSARY: Self = Self::from_static(names::ANNIVERSARY);
    pub const GENDER: Self = Self::from_static(names::GENDER);
    pub const KIND: Self = Self::from_static(names::KIND);
    pub const NAME: Self = Self::from_static(names::NAME);
    pub const SORT_STRING: Self = Self::from_static(names::SORT_STRING);

    // Delivery addressing
    pub const ADR: Self = Self::from_static(names::ADR);
    pub const LABEL: Self = Self::from_static(names::LABEL);

    // Communications
    pub const TEL: Self = Self::from_static(names::TEL);
    pub const EMAIL: Self = Self::from_static(names::EMAIL);
    pub const IMPP: Self = Self::from_static(names::IMPP);
    pub const LANG: Self = Self::from_static(names::LANG);
    pub const MAILER: Self = Self::from_static(names::MAILER);

    // Geographical
    pub const TZ: Self = Self::from_static(names::TZ);
    pub const GEO: Self = Self::from_static(names::GEO);

    // Organizational
    pub const TITLE: Self = Self::from_static(names::TITLE);
    pub const ROLE: Self = Self::from_static(names::ROLE);
    pub const ORG: Self = Self::from_static(names::ORG);
    pub const MEMBER: Self = Self::from_static(names::MEMBER);
    pub const RELATED: Self = Self::from_static(names::RELATED);

    // Explanatory
    pub const CATEGORIES: Self = Self::from_static(names::CATEGORIES);
    pub const NOTE: Self = Self::from_static(names::NOTE);
    pub const PRODID: Self = Self::from_static(names::PRODID);
    pub const REV: Self = Self::from_static(names::REV);
    pub const UID: Self = Self::from_static(names::UID);
    pub const URL: Self = Self::from_static(names::URL);
    pub const CLASS: Self = Self::from_static(names::CLASS);

    // Calendar
    pub const FBURL: Self = Self::from_static(names::FBURL);
    pub const CALADRURI: Self = Self::from_static(names::CALADRURI);
    pub const CALURI: Self = Self::from_static(names::CALURI);

    /// Kinds defined by one of the three vCard versions.
    pub const STANDARD: &'static [Self] = &[
        Self::FN,
        Self::N,
        Self::NICKNAME,
        Self::BDAY,
        Self::ANNIVERSARY,
        Self::GENDER,
        Self::KIND,
        Self::NAME,
        Self::SORT_STRING,
        Self::ADR,
        Self::LABEL,
        Self::TEL,
        Self::EMAIL,
        Self::IMPP,
        Self::LANG,
        Self::MAILER,
        Self::TZ,
        Self::GEO,
        Self::TITLE,
        Self::ROLE,
        Self::ORG,
        Self::MEMBER,
        Self::RELATED,
        Self::CATEGORIES,
        Self::NOTE,
        Self::PRODID,
        Self::REV,
        Self::UID,
        Self::URL,
        Self::CLASS,
        Self::FBURL,
        Self::CALADRURI,
        Self::CALURI,
    ];

    const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a kind from a property name (normalized to uppercase).
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into().to_ascii_uppercase()))
    }

    /// Returns the property name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the kind is part of the standard catalog.
    ///
    /// A standard kind with no registered scribe makes a write fail; an
    /// extension kind falls under the dispatcher's unknown-kind policy.
    #[must_use]
    pub fn is_standard(&self) -> bool {
        Self::STANDARD.contains(self)
    }

    /// Versions in which this kind is defined. Extension kinds are accepted
    /// everywhere.
    #[must_use]
    pub fn supported_versions(&self) -> &'static [VCardVersion] {
        match self.as_str() {
            names::KIND
            | names::GENDER
            | names::ANNIVERSARY
            | names::LANG
            | names::MEMBER
            | names::RELATED
            | names::FBURL
            | names::CALADRURI
            | names::CALURI => V4_0_ONLY,
            names::MAILER | names::LABEL | names::CLASS => V2_1_AND_V3_0,
            names::NAME | names::SORT_STRING => V3_0_ONLY,
            names::NICKNAME | names::CATEGORIES | names::IMPP => V3_0_AND_V4_0,
            _ => VCardVersion::ALL,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property of a contact record.
///
/// Implementors are plain data holders; rendering is done by the
/// [`PropertyScribe`](crate::rfc::vcard::scribe::PropertyScribe) registered
/// for the property's [`kind`](Property::kind).
pub trait Property: fmt::Debug + Send + Sync + Any {
    /// Runtime kind used to look up the scribe.
    fn kind(&self) -> PropertyKind;

    /// Optional property group (e.g., "item1" in "item1.TEL").
    fn group(&self) -> Option<&str> {
        None
    }

    fn parameters(&self) -> &Parameters;

    /// Versions this property can be written in.
    fn supported_versions(&self) -> &'static [VCardVersion] {
        self.kind().supported_versions()
    }

    fn is_supported_by(&self, version: VCardVersion) -> bool {
        self.supported_versions().contains(&version)
    }

    /// Property-specific compatibility checks, run after the version check.
    fn validate_for(&self, _version: VCardVersion, _warnings: &mut Vec<Warning>) {}

    fn as_any(&self) -> &dyn Any;
}

/// A property holding a single text value (FN, NOTE, EMAIL, PRODID, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct TextProperty {
    kind: PropertyKind,
    group: Option<String>,
    value: String,
    params: Parameters,
}

impl TextProperty {
    /// Creates a property with a text value.
    #[must_use]
    pub fn new(kind: PropertyKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            group: None,
            value: value.into(),
            params: Parameters::new(),
        }
    }

    /// Creates a property with a text value and group.
    #[must_use]
    pub fn grouped(group: impl Into<String>, kind: PropertyKind, value: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            ..Self::new(kind, value)
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }
}

impl Property for TextProperty {
    fn kind(&self) -> PropertyKind {
        self.kind.clone()
    }

    fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An extension property (`X-` or otherwise non-standard) with a raw value.
///
/// Its kind is its name, so it is only written when a scribe has been
/// registered for that name.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedProperty {
    kind: PropertyKind,
    group: Option<String>,
    value: String,
    params: Parameters,
}

impl ExtendedProperty {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: PropertyKind::new(name),
            group: None,
            value: value.into(),
            params: Parameters::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.as_str()
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_group(&mut self, group: Option<impl Into<String>>) {
        self.group = group.map(Into::into);
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }
}

impl Property for ExtendedProperty {
    fn kind(&self) -> PropertyKind {
        self.kind.clone()
    }

    fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    fn parameters(&self) -> &Parameters {
        &self.params
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Common property names as constants.
pub mod names {
    // Identification properties
    pub const FN: &str = "FN";
    pub const N: &str = "N";
    pub const NICKNAME: &str = "NICKNAME";
    pub const BDAY: &str = "BDAY";
    pub const ANNIVERSARY: &str = "ANNIVERSARY";
    pub const GENDER: &str = "GENDER";
    pub const KIND: &str = "KIND";
    pub const NAME: &str = "NAME";
    pub const SORT_STRING: &str = "SORT-STRING";

    // Delivery addressing
    pub const ADR: &str = "ADR";
    pub const LABEL: &str = "LABEL";

    // Communications
    pub const TEL: &str = "TEL";
    pub const EMAIL: &str = "EMAIL";
    pub const IMPP: &str = "IMPP";
    pub const LANG: &str = "LANG";
    pub const MAILER: &str = "MAILER";

    // Geographical
    pub const TZ: &str = "TZ";
    pub const GEO: &str = "GEO";

    // Organizational
    pub const TITLE: &str = "TITLE";
    pub const ROLE: &str = "ROLE";
    pub const ORG: &str = "ORG";
    pub const MEMBER: &str = "MEMBER";
    pub const RELATED: &str = "RELATED";

    // Explanatory
    pub const CATEGORIES: &str = "CATEGORIES";
    pub const NOTE: &str = "NOTE";
    pub const PRODID: &str = "PRODID";
    pub const REV: &str = "REV";
    pub const UID: &str = "UID";
    pub const URL: &str = "URL";
    pub const CLASS: &str = "CLASS";

    // Calendar
    pub const FBURL: &str = "FBURL";
    pub const CALADRURI: &str = "CALADRURI";
    pub const CALURI: &str = "CALURI";

    // 2.1 spelling of PRODID
    pub const X_PRODID: &str = "X-PRODID";
}
