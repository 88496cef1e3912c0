//! Structured value splitting.

use crate::rfc::vcard::core::Address;

/// Unescapes a vCard text value.
///
/// vCard escapes: \n, \N (newline), \, (comma), \; (semicolon), \\ (backslash).
/// Unknown escapes are kept as-is.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek() {
            Some('n' | 'N') => {
                chars.next();
                result.push('\n');
            }
            Some(&escaped) if matches!(escaped, ',' | ';' | '\\') => {
                chars.next();
                result.push(escaped);
            }
            _ => result.push(c),
        }
    }

    result
}

/// Splits a structured value on unescaped semicolons. Parts stay escaped.
#[must_use]
pub fn split_structured(s: &str) -> Vec<&str> {
    split_unescaped(s, ';')
}

/// Splits a component on unescaped commas and unescapes each value.
///
/// An empty component yields no values.
#[must_use]
pub fn split_component(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    split_unescaped(s, ',')
        .into_iter()
        .map(unescape_text)
        .collect()
}

fn split_unescaped(s: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            _ if c == separator => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }

    parts.push(&s[start..]);
    parts
}

/// Reads an ADR value into an [`Address`].
///
/// ## Summary
/// Components are `pobox;ext;street;locality;region;code;country`; missing
/// trailing components are empty and extra ones are ignored. Each component
/// is split on unescaped commas, so a street written as `1 Main St, Apt 2`
/// without escaping comes back as two street values; use
/// [`Address::street_address_full`] to recover it.
#[must_use]
pub fn parse_address_value(value: &str) -> Address {
    let parts = split_structured(value);
    let component = |index: usize| {
        parts
            .get(index)
            .map(|part| split_component(part))
            .unwrap_or_default()
    };

    let mut address = Address::new();
    address.set_po_boxes(component(0));
    address.set_extended_addresses(component(1));
    address.set_street_addresses(component(2));
    address.set_localities(component(3));
    address.set_regions(component(4));
    address.set_postal_codes(component(5));
    address.set_countries(component(6));
    address
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_known_sequences() {
        assert_eq!(unescape_text(r"a\,b\;c\nd\\e"), "a,b;c\nd\\e");
        assert_eq!(unescape_text(r"keep\x"), r"keep\x");
    }

    #[test]
    fn split_respects_escapes() {
        assert_eq!(split_structured(r"a;b\;c;d"), ["a", r"b\;c", "d"]);
        assert_eq!(split_structured(r"a\\;b"), [r"a\\", "b"]);
        assert_eq!(split_component(r"x\,y,z"), ["x,y", "z"]);
        assert!(split_component("").is_empty());
    }

    #[test]
    fn parse_full_address() {
        let adr = parse_address_value(";;123 Main St,Suite 200;Austin;TX;78701;USA");
        assert_eq!(adr.po_box(), None);
        assert_eq!(adr.street_addresses(), ["123 Main St", "Suite 200"]);
        assert_eq!(adr.street_address(), Some("123 Main St"));
        assert_eq!(
            adr.street_address_full().as_deref(),
            Some("123 Main St,Suite 200")
        );
        assert_eq!(adr.locality(), Some("Austin"));
        assert_eq!(adr.country(), Some("USA"));
    }

    #[test]
    fn escaped_comma_stays_single_value() {
        let adr = parse_address_value(r";;123 Main St\, Suite 200;Austin");
        assert_eq!(adr.street_addresses(), ["123 Main St, Suite 200"]);
        assert_eq!(adr.region(), None);
    }

    #[test]
    fn short_and_long_values() {
        assert!(parse_address_value("").is_empty());
        let adr = parse_address_value("1;2;3;4;5;6;7;8");
        assert_eq!(adr.country(), Some("7"));
    }
}
