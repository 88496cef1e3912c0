//! Compatibility warnings.

use std::fmt;

/// Numeric warning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum WarningCode {
    /// A scribe declined to render the property.
    SkippedByScribe = 0,
    /// The property is not defined in the target version.
    UnsupportedProperty = 2,
    /// A TYPE value is not defined in the target version.
    UnsupportedType = 9,
    /// No scribe is registered for an extension property.
    UnregisteredKind = 30,
}

impl WarningCode {
    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

/// A non-fatal advisory produced by validation or by a write.
///
/// The payload holds the offending literal (a TYPE value, a property name,
/// a scribe's reason) so callers can report or strip it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    code: WarningCode,
    payload: String,
}

impl Warning {
    /// Creates a warning.
    #[must_use]
    pub fn new(code: WarningCode, payload: impl Into<String>) -> Self {
        Self {
            code,
            payload: payload.into(),
        }
    }

    /// A TYPE value the target version does not define.
    #[must_use]
    pub fn unsupported_type(value: impl Into<String>) -> Self {
        Self::new(WarningCode::UnsupportedType, value)
    }

    /// A property the target version does not define.
    #[must_use]
    pub fn unsupported_property(name: impl Into<String>) -> Self {
        Self::new(WarningCode::UnsupportedProperty, name)
    }

    /// Returns the numeric code.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.code.as_u16()
    }

    /// Returns the code as an enum.
    #[must_use]
    pub fn kind(&self) -> WarningCode {
        self.code
    }

    /// Returns the offending literal.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "W{:02}: ", self.code())?;
        match self.code {
            WarningCode::SkippedByScribe => {
                write!(f, "property skipped by its scribe: {}", self.payload)
            }
            WarningCode::UnsupportedProperty => write!(
                f,
                "property {} is not supported by the target version",
                self.payload
            ),
            WarningCode::UnsupportedType => write!(
                f,
                "TYPE value \"{}\" is not supported by the target version",
                self.payload
            ),
            WarningCode::UnregisteredKind => {
                write!(f, "no scribe registered for property {}", self.payload)
            }
        }
    }
}
