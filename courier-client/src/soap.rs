//! In-place text substitution inside a SOAP envelope.
//!
//! The envelope is never parsed. The body region is located by its literal
//! open and close tags and the first element whose name matches the last
//! path segment has its content replaced. Every byte outside that content is
//! preserved.

use crate::{CourierError, Path, Result};
use std::ops::Range;

/// Accepted envelope body delimiters, tried in order.
const ENVELOPE_BODIES: [(&str, &str); 2] = [
    ("<soapenv:Body>", "</soapenv:Body>"),
    ("<soap:Body>", "</soap:Body>"),
];

/// Rewrites element content inside a SOAP envelope string.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoapMutator;

impl SoapMutator {
    /// Return a copy of `xml` with the content of the element named by the
    /// last segment of `path` replaced by `value`.
    ///
    /// Intermediate segments are accepted but not used for navigation. Only
    /// the first matching element inside the envelope body is changed.
    pub fn set(xml: &str, path: &Path<'_>, value: &str) -> Result<String> {
        let tag = path.last();
        let region = envelope_body(xml)?;
        let section = &xml[region.clone()];

        let tag_start = find_open_tag(section, tag)
            .ok_or_else(|| CourierError::TagNotFound(tag.to_string()))?;
        let gt = section[tag_start..]
            .find('>')
            .map(|offset| tag_start + offset)
            .ok_or_else(|| CourierError::MalformedTag(tag.to_string()))?;

        let base = region.start;
        let mut out = String::with_capacity(xml.len() + value.len());

        if section[..gt].ends_with('/') {
            // <tag/> becomes <tag>value</tag>
            out.push_str(xml[..base + gt - 1].trim_end());
            out.push('>');
            out.push_str(value);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
            out.push_str(&xml[base + gt + 1..]);
            return Ok(out);
        }

        let close = format!("</{}>", tag);
        let content_start = gt + 1;
        let content_end = section[content_start..]
            .find(&close)
            .map(|offset| content_start + offset)
            .ok_or_else(|| CourierError::CloseTagNotFound(tag.to_string()))?;

        out.push_str(&xml[..base + content_start]);
        out.push_str(value);
        out.push_str(&xml[base + content_end..]);
        Ok(out)
    }
}

/// Byte range of the content between the envelope body tags.
fn envelope_body(xml: &str) -> Result<Range<usize>> {
    for (open, close) in ENVELOPE_BODIES {
        if let Some(start) = xml.find(open) {
            let content_start = start + open.len();
            if let Some(len) = xml[content_start..].find(close) {
                return Ok(content_start..content_start + len);
            }
        }
    }
    Err(CourierError::EnvelopeNotFound)
}

/// Position of the first `<tag` that is a whole element name.
fn find_open_tag(section: &str, tag: &str) -> Option<usize> {
    let needle = format!("<{}", tag);
    let mut from = 0;
    while let Some(offset) = section[from..].find(&needle) {
        let start = from + offset;
        let after = start + needle.len();
        match section[after..].chars().next() {
            Some(c) if c == '>' || c == '/' || c.is_whitespace() => return Some(start),
            None => return Some(start),
            _ => from = after,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENVELOPE: &str = concat!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">"#,
        "<soapenv:Header><foo>header</foo></soapenv:Header>",
        "<soapenv:Body><op><foo>old</foo><bar a=\"1\">x</bar></op></soapenv:Body>",
        "</soapenv:Envelope>"
    );

    fn set(xml: &str, path: &str, value: &str) -> Result<String> {
        SoapMutator::set(xml, &Path::parse(path).unwrap(), value)
    }

    #[test]
    fn test_replaces_only_target_content() {
        let out = set(ENVELOPE, "x.y.foo", "new").unwrap();
        assert_eq!(out, ENVELOPE.replace("<foo>old</foo>", "<foo>new</foo>"));
        // header element with the same name is outside the body
        assert!(out.contains("<foo>header</foo>"));
    }

    #[test]
    fn test_keeps_attributes() {
        let out = set(ENVELOPE, "bar", "42").unwrap();
        assert!(out.contains("<bar a=\"1\">42</bar>"));
    }

    #[test]
    fn test_discards_nested_markup() {
        let out = set(ENVELOPE, "op", "flat").unwrap();
        assert!(out.contains("<soapenv:Body><op>flat</op></soapenv:Body>"));
    }

    #[test]
    fn test_soap_prefix_envelope() {
        let xml = "<soap:Envelope><soap:Body><Amount>1</Amount></soap:Body></soap:Envelope>";
        let out = set(xml, "Amount", "2").unwrap();
        assert_eq!(out, xml.replace(">1<", ">2<"));
    }

    #[test]
    fn test_prefix_names_do_not_match() {
        let xml = "<soap:Body><fooBar>1</fooBar><foo>2</foo></soap:Body>";
        let out = set(xml, "foo", "3").unwrap();
        assert_eq!(out, "<soap:Body><fooBar>1</fooBar><foo>3</foo></soap:Body>");
    }

    #[test]
    fn test_self_closing_is_expanded() {
        let xml = "<soap:Body><foo id=\"7\"/></soap:Body>";
        let out = set(xml, "foo", "v").unwrap();
        assert_eq!(out, "<soap:Body><foo id=\"7\">v</foo></soap:Body>");
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            set("<Envelope><Body><foo/></Body></Envelope>", "foo", "v"),
            Err(CourierError::EnvelopeNotFound)
        ));
        assert!(matches!(
            set("<soap:Body><foo>1</foo>", "foo", "v"),
            Err(CourierError::EnvelopeNotFound)
        ));
        assert!(matches!(
            set(ENVELOPE, "missing", "v"),
            Err(CourierError::TagNotFound(_))
        ));
        assert!(matches!(
            set("<soap:Body><foo>1</soap:Body>", "foo", "v"),
            Err(CourierError::CloseTagNotFound(_))
        ));
        assert!(matches!(
            set("<soap:Body><foo attr=\"1\"</soap:Body>", "foo", "v"),
            Err(CourierError::MalformedTag(_))
        ));
    }
}
