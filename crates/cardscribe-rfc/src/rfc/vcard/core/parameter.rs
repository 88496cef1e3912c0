//! vCard parameter types (RFC 6350 §5).

/// A vCard parameter.
///
/// Parameters can have multiple values (e.g., TYPE=home,work).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardParameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values.
    pub values: Vec<String>,
}

impl VCardParameter {
    /// Creates a new parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn multi(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter has the specified value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }
}

/// Parameter names as constants.
pub mod names {
    pub const TYPE: &str = "TYPE";
    pub const LABEL: &str = "LABEL";
    pub const GEO: &str = "GEO";
    pub const TZ: &str = "TZ";
    pub const PREF: &str = "PREF";
    pub const PID: &str = "PID";
    pub const ALTID: &str = "ALTID";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const VALUE: &str = "VALUE";
}

/// Geographic position carried by the GEO parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geo {
    pub latitude: f64,
    pub longitude: f64,
}

impl Geo {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Formats as a `geo:` URI (RFC 5870).
    #[must_use]
    pub fn to_uri(self) -> String {
        format!("geo:{},{}", self.latitude, self.longitude)
    }

    /// Parses a `geo:lat,lon` URI. Extra URI parameters are ignored.
    #[must_use]
    pub fn from_uri(uri: &str) -> Option<Self> {
        let rest = uri.trim().strip_prefix("geo:")?;
        let coords = rest.split(';').next()?;
        let mut parts = coords.split(',');
        let latitude = parts.next()?.trim().parse().ok()?;
        let longitude = parts.next()?.trim().parse().ok()?;
        Some(Self::new(latitude, longitude))
    }
}

/// One PID parameter value: a local id and a CLIENTPIDMAP reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pid {
    pub local_id: u32,
    pub client_pid_map_ref: u32,
}

impl Pid {
    #[must_use]
    pub fn new(local_id: u32, client_pid_map_ref: u32) -> Self {
        Self {
            local_id,
            client_pid_map_ref,
        }
    }

    /// Parses `local.ref` (e.g. `1.2`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (local, reference) = value.trim().split_once('.')?;
        Some(Self::new(local.parse().ok()?, reference.parse().ok()?))
    }
}

impl std::fmt::Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.local_id, self.client_pid_map_ref)
    }
}

/// The parameter bag of a property.
///
/// Parameters keep their order of insertion. Names are compared
/// case-insensitively; values of TYPE are compared case-insensitively.
/// Malformed GEO, PREF and PID values read back as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    params: Vec<VCardParameter>,
}

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterates over the parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = &VCardParameter> {
        self.params.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.iter().all(|p| p.values.is_empty())
    }

    /// Returns every value of every parameter named `name`.
    #[must_use]
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .flat_map(|p| p.values.iter().map(String::as_str))
            .collect()
    }

    /// Returns the first value of the parameter named `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .find_map(VCardParameter::value)
    }

    /// Replaces every parameter named `name` with a single-valued one, or
    /// removes them when `value` is `None`.
    pub fn set(&mut self, name: &str, value: Option<impl Into<String>>) {
        match value {
            None => self.remove_all(name),
            Some(value) => {
                let value = value.into();
                if let Some(idx) = self.position(name) {
                    self.params[idx].values = vec![value];
                    let mut seen = false;
                    self.params.retain(|p| {
                        if !p.name.eq_ignore_ascii_case(name) {
                            return true;
                        }
                        let keep = !seen;
                        seen = true;
                        keep
                    });
                } else {
                    self.params.push(VCardParameter::new(name, value));
                }
            }
        }
    }

    /// Appends a value to the parameter named `name`, creating it if needed.
    pub fn add(&mut self, name: &str, value: impl Into<String>) {
        if let Some(idx) = self.position(name) {
            self.params[idx].values.push(value.into());
        } else {
            self.params.push(VCardParameter::new(name, value));
        }
    }

    /// Removes one value (case-insensitive) from the parameter named `name`.
    pub fn remove(&mut self, name: &str, value: &str) {
        for param in &mut self.params {
            if param.name.eq_ignore_ascii_case(name) {
                param.values.retain(|v| !v.eq_ignore_ascii_case(value));
            }
        }
        self.params.retain(|p| !p.values.is_empty());
    }

    /// Removes every parameter named `name`.
    pub fn remove_all(&mut self, name: &str) {
        self.params.retain(|p| !p.name.eq_ignore_ascii_case(name));
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.params
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
    }

    // --- Typed accessors ---

    /// TYPE values in order.
    #[must_use]
    pub fn types(&self) -> Vec<&str> {
        self.values(names::TYPE)
    }

    /// Adds a TYPE value unless it is already present.
    pub fn add_type(&mut self, value: impl Into<String>) {
        let value = value.into();
        if !self.has_type(&value) {
            self.add(names::TYPE, value);
        }
    }

    pub fn remove_type(&mut self, value: &str) {
        self.remove(names::TYPE, value);
    }

    #[must_use]
    pub fn has_type(&self, value: &str) -> bool {
        self.types().iter().any(|t| t.eq_ignore_ascii_case(value))
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.first(names::LABEL)
    }

    pub fn set_label(&mut self, label: Option<impl Into<String>>) {
        self.set(names::LABEL, label);
    }

    #[must_use]
    pub fn geo(&self) -> Option<Geo> {
        self.first(names::GEO).and_then(Geo::from_uri)
    }

    pub fn set_geo(&mut self, geo: Option<Geo>) {
        self.set(names::GEO, geo.map(Geo::to_uri));
    }

    #[must_use]
    pub fn timezone(&self) -> Option<&str> {
        self.first(names::TZ)
    }

    pub fn set_timezone(&mut self, tz: Option<impl Into<String>>) {
        self.set(names::TZ, tz);
    }

    /// PREF value (1-100, lower is preferred).
    #[must_use]
    pub fn pref(&self) -> Option<u8> {
        self.first(names::PREF)
            .and_then(|v| v.trim().parse().ok())
            .filter(|p| (1..=100).contains(p))
    }

    /// Sets PREF, clamped to 1-100.
    pub fn set_pref(&mut self, pref: Option<u8>) {
        self.set(names::PREF, pref.map(|p| p.clamp(1, 100).to_string()));
    }

    #[must_use]
    pub fn pids(&self) -> Vec<Pid> {
        self.values(names::PID)
            .into_iter()
            .filter_map(Pid::parse)
            .collect()
    }

    pub fn add_pid(&mut self, pid: Pid) {
        self.add(names::PID, pid.to_string());
    }

    pub fn remove_pids(&mut self) {
        self.remove_all(names::PID);
    }

    #[must_use]
    pub fn alt_id(&self) -> Option<&str> {
        self.first(names::ALTID)
    }

    pub fn set_alt_id(&mut self, alt_id: Option<impl Into<String>>) {
        self.set(names::ALTID, alt_id);
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.first(names::LANGUAGE)
    }

    pub fn set_language(&mut self, language: Option<impl Into<String>>) {
        self.set(names::LANGUAGE, language);
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a VCardParameter;
    type IntoIter = std::slice::Iter<'a, VCardParameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
