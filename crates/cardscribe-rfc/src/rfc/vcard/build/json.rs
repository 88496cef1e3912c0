//! jCard writer (RFC 7095).

use serde_json::{Map, Value, json};

use super::{FormatWriter, WriteError, WriteResult, check_name};
use crate::rfc::vcard::core::{Parameters, VCardVersion};
use crate::rfc::vcard::scribe::{RenderedProperty, RenderedValue};

/// Writes cards as jCard arrays.
///
/// Each card becomes `["vcard", [[name, params, type, value...], ...]]`.
/// Only 4.0 can be expressed.
#[derive(Debug, Clone, Default)]
pub struct JsonWriter {
    cards: Vec<Value>,
    current: Option<Vec<Value>>,
}

impl JsonWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished cards, in write order.
    #[must_use]
    pub fn cards(&self) -> &[Value] {
        &self.cards
    }

    #[must_use]
    pub fn into_cards(self) -> Vec<Value> {
        self.cards
    }

    /// All finished cards as one JSON array.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Array(self.cards)
    }

    /// Serializes all finished cards.
    ///
    /// ## Errors
    /// Returns an error if a card is still open or serialization fails.
    pub fn into_string(self) -> WriteResult<String> {
        if self.current.is_some() {
            return Err(WriteError::Rejected("card still open".to_string()));
        }
        Ok(serde_json::to_string(&self.into_value())?)
    }
}

impl FormatWriter for JsonWriter {
    fn format_name(&self) -> &'static str {
        "jCard"
    }

    fn supports_version(&self, version: VCardVersion) -> bool {
        version == VCardVersion::V4_0
    }

    fn begin_card(&mut self, version: VCardVersion) -> WriteResult<()> {
        if !self.supports_version(version) {
            return Err(WriteError::Rejected(format!(
                "jCard cannot express version {version}"
            )));
        }
        if self.current.is_some() {
            return Err(WriteError::Rejected("card already open".to_string()));
        }
        self.current = Some(vec![json!(["version", {}, "text", version.as_str()])]);
        Ok(())
    }

    fn write_property(&mut self, property: &RenderedProperty) -> WriteResult<()> {
        let Some(current) = self.current.as_mut() else {
            return Err(WriteError::Rejected("no card open".to_string()));
        };
        current.push(property_value(property)?);
        Ok(())
    }

    fn end_card(&mut self) -> WriteResult<()> {
        let properties = self
            .current
            .take()
            .ok_or_else(|| WriteError::Rejected("no card open".to_string()))?;
        self.cards.push(json!(["vcard", properties]));
        Ok(())
    }

    fn abort_card(&mut self) {
        self.current = None;
    }
}

fn property_value(property: &RenderedProperty) -> WriteResult<Value> {
    check_name("property name", &property.name)?;

    let mut params = parameters_object(&property.parameters)?;
    if let Some(group) = &property.group {
        check_name("group", group)?;
        params.insert(
            "group".to_string(),
            Value::String(group.to_ascii_lowercase()),
        );
    }

    let mut entry = vec![
        Value::String(property.name.to_ascii_lowercase()),
        Value::Object(params),
        Value::String(property.value_type.as_str().to_string()),
    ];

    match &property.value {
        RenderedValue::Text(text) => entry.push(Value::String(text.clone())),
        RenderedValue::Structured(components) => {
            let value = components
                .iter()
                .map(|component| match component.values.as_slice() {
                    [] => Value::String(String::new()),
                    [single] => Value::String(single.clone()),
                    many => Value::Array(many.iter().cloned().map(Value::String).collect()),
                })
                .collect();
            entry.push(Value::Array(value));
        }
        RenderedValue::List(values) => {
            let value = match values.as_slice() {
                [single] => Value::String(single.clone()),
                many => Value::Array(many.iter().cloned().map(Value::String).collect()),
            };
            entry.push(value);
        }
    }

    Ok(Value::Array(entry))
}

fn parameters_object(parameters: &Parameters) -> WriteResult<Map<String, Value>> {
    let mut object = Map::new();
    for param in parameters {
        check_name("parameter name", &param.name)?;
        let value = match param.values.as_slice() {
            [] => continue,
            [single] => Value::String(single.clone()),
            many => Value::Array(many.iter().cloned().map(Value::String).collect()),
        };
        object.insert(param.name.to_ascii_lowercase(), value);
    }
    Ok(object)
}
