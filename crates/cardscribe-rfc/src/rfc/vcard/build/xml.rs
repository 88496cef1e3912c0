//! xCard writer (RFC 6351).

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::{FormatWriter, WriteError, WriteResult, check_name};
use crate::rfc::vcard::core::{Parameters, VCardVersion, param_names};
use crate::rfc::vcard::scribe::{RenderedProperty, RenderedValue};

/// xCard namespace.
pub const XCARD_NS: &str = "urn:ietf:params:xml:ns:vcard-4.0";

/// Writes cards as an xCard document.
///
/// ## Summary
/// The `<vcards>` root is opened with the first card and closed by
/// [`XmlWriter::finish`]. Only 4.0 can be expressed.
pub struct XmlWriter {
    writer: Writer<Vec<u8>>,
    started: bool,
    in_card: bool,
    /// Output length before the open card, and whether that card opened
    /// the document.
    card_start: usize,
    card_started_document: bool,
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for XmlWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlWriter")
            .field("started", &self.started)
            .field("in_card", &self.in_card)
            .finish_non_exhaustive()
    }
}

impl XmlWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
            started: false,
            in_card: false,
            card_start: 0,
            card_started_document: false,
        }
    }

    fn start_document(&mut self) -> Result<(), quick_xml::Error> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let mut root = BytesStart::new("vcards");
        root.push_attribute(("xmlns", XCARD_NS));
        self.writer.write_event(Event::Start(root))?;
        self.started = true;
        Ok(())
    }

    /// Closes the document and returns it.
    ///
    /// ## Errors
    /// Returns an error if a card is still open or the output is not UTF-8.
    pub fn finish(mut self) -> WriteResult<String> {
        if self.in_card {
            return Err(WriteError::Rejected("card still open".to_string()));
        }
        if !self.started {
            self.start_document()?;
        }
        self.writer
            .write_event(Event::End(BytesEnd::new("vcards")))?;

        String::from_utf8(self.writer.into_inner()).map_err(|e| {
            tracing::error!("Generated invalid UTF-8 in xCard output: {}", e);
            WriteError::Rejected("invalid UTF-8 in XML output".to_string())
        })
    }
}

impl FormatWriter for XmlWriter {
    fn format_name(&self) -> &'static str {
        "xCard"
    }

    fn supports_version(&self, version: VCardVersion) -> bool {
        version == VCardVersion::V4_0
    }

    fn begin_card(&mut self, version: VCardVersion) -> WriteResult<()> {
        if !self.supports_version(version) {
            return Err(WriteError::Rejected(format!(
                "xCard cannot express version {version}"
            )));
        }
        if self.in_card {
            return Err(WriteError::Rejected("card already open".to_string()));
        }
        self.card_start = self.writer.get_ref().len();
        self.card_started_document = !self.started;
        self.in_card = true;
        if !self.started {
            self.start_document()?;
        }
        self.writer
            .write_event(Event::Start(BytesStart::new("vcard")))?;
        Ok(())
    }

    fn write_property(&mut self, property: &RenderedProperty) -> WriteResult<()> {
        if !self.in_card {
            return Err(WriteError::Rejected("no card open".to_string()));
        }
        check_name("property name", &property.name)?;
        if let Some(group) = &property.group {
            check_name("group", group)?;
        }
        for param in &property.parameters {
            check_name("parameter name", &param.name)?;
        }

        // Rendered on the side so a failure leaves the document untouched.
        let mut scratch = Writer::new(Vec::new());
        write_property_element(&mut scratch, property)?;
        self.writer
            .get_mut()
            .extend_from_slice(&scratch.into_inner());
        Ok(())
    }

    fn end_card(&mut self) -> WriteResult<()> {
        if !self.in_card {
            return Err(WriteError::Rejected("no card open".to_string()));
        }
        self.writer
            .write_event(Event::End(BytesEnd::new("vcard")))?;
        self.in_card = false;
        Ok(())
    }

    fn abort_card(&mut self) {
        if !self.in_card {
            return;
        }
        self.writer.get_mut().truncate(self.card_start);
        if self.card_started_document {
            self.started = false;
        }
        self.in_card = false;
    }
}

fn write_property_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    property: &RenderedProperty,
) -> Result<(), quick_xml::Error> {
    if let Some(group) = &property.group {
        let mut elem = BytesStart::new("group");
        elem.push_attribute(("name", group.as_str()));
        writer.write_event(Event::Start(elem))?;
    }

    let name = property.name.to_ascii_lowercase();
    writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;

    if !property.parameters.is_empty() {
        write_parameters(writer, &property.parameters)?;
    }

    match &property.value {
        RenderedValue::Text(text) => {
            write_text_element(writer, property.value_type.as_str(), text)?;
        }
        RenderedValue::Structured(components) => {
            for component in components {
                if component.values.is_empty() {
                    writer.write_event(Event::Empty(BytesStart::new(component.name)))?;
                    continue;
                }
                writer.write_event(Event::Start(BytesStart::new(component.name)))?;
                for value in &component.values {
                    write_text_element(writer, "text", value)?;
                }
                writer.write_event(Event::End(BytesEnd::new(component.name)))?;
            }
        }
        RenderedValue::List(values) => {
            for value in values {
                write_text_element(writer, "text", value)?;
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;

    if property.group.is_some() {
        writer.write_event(Event::End(BytesEnd::new("group")))?;
    }
    Ok(())
}

fn write_parameters<W: std::io::Write>(
    writer: &mut Writer<W>,
    parameters: &Parameters,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new("parameters")))?;
    for param in parameters {
        if param.values.is_empty() {
            continue;
        }
        let name = param.name.to_ascii_lowercase();
        writer.write_event(Event::Start(BytesStart::new(name.as_str())))?;
        let value_type = parameter_value_type(&param.name);
        for value in &param.values {
            write_text_element(writer, value_type, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    }
    writer.write_event(Event::End(BytesEnd::new("parameters")))?;
    Ok(())
}

/// Value element used for a parameter (RFC 6351 §5).
fn parameter_value_type(name: &str) -> &'static str {
    if name.eq_ignore_ascii_case(param_names::PREF) {
        "integer"
    } else if name.eq_ignore_ascii_case(param_names::GEO) {
        "uri"
    } else {
        "text"
    }
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), quick_xml::Error> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::vcard::scribe::{Component, ValueType};

    fn fn_property(value: &str) -> RenderedProperty {
        RenderedProperty {
            group: None,
            name: "FN".to_string(),
            parameters: Parameters::new(),
            value_type: ValueType::Text,
            value: RenderedValue::Text(value.to_string()),
        }
    }

    #[test]
    fn writes_document_with_namespace() {
        let mut writer = XmlWriter::new();
        writer.begin_card(VCardVersion::V4_0).unwrap();
        writer.write_property(&fn_property("Tom & Jerry")).unwrap();
        writer.end_card().unwrap();
        let xml = writer.finish().unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<vcards xmlns=\"urn:ietf:params:xml:ns:vcard-4.0\">"));
        assert!(xml.contains("<vcard><fn><text>Tom &amp; Jerry</text></fn></vcard>"));
        assert!(xml.ends_with("</vcards>"));
    }

    #[test]
    fn structured_value_with_parameters() {
        let mut parameters = Parameters::new();
        parameters.add_type("work");
        parameters.set_pref(Some(1));
        let property = RenderedProperty {
            group: None,
            name: "ADR".to_string(),
            parameters,
            value_type: ValueType::Text,
            value: RenderedValue::Structured(vec![
                Component::new("pobox", &[]),
                Component::new("street", &["1 Elm".to_string(), "Apt 2".to_string()]),
            ]),
        };

        let mut writer = XmlWriter::new();
        writer.begin_card(VCardVersion::V4_0).unwrap();
        writer.write_property(&property).unwrap();
        writer.end_card().unwrap();
        let xml = writer.finish().unwrap();

        assert!(xml.contains(
            "<adr><parameters><type><text>work</text></type><pref><integer>1</integer></pref></parameters>\
             <pobox/><street><text>1 Elm</text><text>Apt 2</text></street></adr>"
        ));
    }

    #[test]
    fn list_value_writes_text_elements() {
        let property = RenderedProperty {
            group: None,
            name: "ORG".to_string(),
            parameters: Parameters::new(),
            value_type: ValueType::Text,
            value: RenderedValue::List(vec!["ABC".to_string(), "Sales".to_string()]),
        };

        let mut writer = XmlWriter::new();
        writer.begin_card(VCardVersion::V4_0).unwrap();
        writer.write_property(&property).unwrap();
        writer.end_card().unwrap();
        let xml = writer.finish().unwrap();

        assert!(xml.contains("<org><text>ABC</text><text>Sales</text></org>"));
    }

    #[test]
    fn older_versions_are_rejected() {
        let mut writer = XmlWriter::new();
        assert!(!writer.supports_version(VCardVersion::V3_0));
        assert!(writer.begin_card(VCardVersion::V3_0).is_err());
    }

    #[test]
    fn aborted_card_leaves_document_untouched() {
        let mut writer = XmlWriter::new();
        writer.begin_card(VCardVersion::V4_0).unwrap();
        writer.write_property(&fn_property("Dropped")).unwrap();
        writer.abort_card();

        let xml = writer.finish().unwrap();
        assert_eq!(xml, XmlWriter::new().finish().unwrap());
    }

    #[test]
    fn empty_document_is_well_formed() {
        let xml = XmlWriter::new().finish().unwrap();
        assert!(xml.ends_with("<vcards xmlns=\"urn:ietf:params:xml:ns:vcard-4.0\"></vcards>"));
    }
}
