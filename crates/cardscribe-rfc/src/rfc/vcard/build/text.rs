//! vCard text writer.

use super::escape::{escape_component, escape_param_value};
use super::fold::fold_line;
use super::{FormatWriter, WriteError, WriteResult, check_name};
use crate::rfc::vcard::core::{VCardParameter, VCardVersion};
use crate::rfc::vcard::scribe::{RenderedProperty, RenderedValue, ValueType};

/// Writes cards as vCard text with CRLF line endings.
///
/// ## Summary
/// Lines are folded at 75 octets unless folding is disabled. Parameter
/// values use RFC 6868 caret encoding. 2.1 output repeats multi-valued
/// parameters instead of comma-joining them.
#[derive(Debug, Clone)]
pub struct TextWriter {
    output: String,
    open: Option<VCardVersion>,
    /// Output length before the open card.
    card_start: usize,
    fold: bool,
}

impl Default for TextWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::new(),
            open: None,
            card_start: 0,
            fold: true,
        }
    }

    /// Disables line folding.
    #[must_use]
    pub fn without_folding(mut self) -> Self {
        self.fold = false;
        self
    }

    /// Output written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.output
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.output
    }

    fn push_line(&mut self, line: &str) {
        if self.fold {
            self.output.push_str(&fold_line(line));
        } else {
            self.output.push_str(line);
        }
        self.output.push_str("\r\n");
    }
}

impl FormatWriter for TextWriter {
    fn format_name(&self) -> &'static str {
        "vCard"
    }

    fn begin_card(&mut self, version: VCardVersion) -> WriteResult<()> {
        if self.open.is_some() {
            return Err(WriteError::Rejected("card already open".to_string()));
        }
        self.open = Some(version);
        self.card_start = self.output.len();
        self.push_line("BEGIN:VCARD");
        self.push_line(&format!("VERSION:{version}"));
        Ok(())
    }

    fn write_property(&mut self, property: &RenderedProperty) -> WriteResult<()> {
        let version = self
            .open
            .ok_or_else(|| WriteError::Rejected("no card open".to_string()))?;

        // Built in full before anything reaches the output.
        let line = render_line(property, version)?;
        self.push_line(&line);
        Ok(())
    }

    fn end_card(&mut self) -> WriteResult<()> {
        if self.open.take().is_none() {
            return Err(WriteError::Rejected("no card open".to_string()));
        }
        self.push_line("END:VCARD");
        Ok(())
    }

    fn abort_card(&mut self) {
        if self.open.take().is_some() {
            self.output.truncate(self.card_start);
        }
    }
}

fn render_line(property: &RenderedProperty, version: VCardVersion) -> WriteResult<String> {
    let mut line = String::new();

    if let Some(group) = &property.group {
        check_name("group", group)?;
        line.push_str(group);
        line.push('.');
    }

    check_name("property name", &property.name)?;
    line.push_str(&property.name);

    for param in &property.parameters {
        check_name("parameter name", &param.name)?;
        write_parameter(&mut line, param, version);
    }

    line.push(':');
    write_value(&mut line, property, version);
    Ok(line)
}

fn write_parameter(line: &mut String, param: &VCardParameter, version: VCardVersion) {
    if version == VCardVersion::V2_1 {
        for value in &param.values {
            write_parameter_values(line, &param.name, std::slice::from_ref(value));
        }
    } else {
        write_parameter_values(line, &param.name, &param.values);
    }
}

fn write_parameter_values(line: &mut String, name: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    line.push(';');
    line.push_str(name);
    line.push('=');

    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            line.push(',');
        }
        let (escaped, needs_quotes) = escape_param_value(value);
        if needs_quotes {
            line.push('"');
            line.push_str(&escaped);
            line.push('"');
        } else {
            line.push_str(&escaped);
        }
    }
}

fn write_value(line: &mut String, property: &RenderedProperty, version: VCardVersion) {
    let escape_commas = version != VCardVersion::V2_1;
    match &property.value {
        RenderedValue::Text(text) if property.value_type == ValueType::Uri => {
            line.push_str(text);
        }
        RenderedValue::Text(text) => {
            line.push_str(&escape_component(text, escape_commas));
        }
        RenderedValue::Structured(components) => {
            for (i, component) in components.iter().enumerate() {
                if i > 0 {
                    line.push(';');
                }
                let values: Vec<String> = component
                    .values
                    .iter()
                    .map(|v| escape_component(v, escape_commas))
                    .collect();
                line.push_str(&values.join(","));
            }
        }
        RenderedValue::List(values) => {
            let values: Vec<String> = values
                .iter()
                .map(|v| escape_component(v, escape_commas))
                .collect();
            line.push_str(&values.join(";"));
        }
    }
}
