//! SOAP 1.1 envelope encoding and decoding.
//!
//! Requests are document/literal:
//!
//! ```xml
//! <soapenv:Envelope xmlns:soapenv="..." xmlns:tns="{namespace}">
//!   <soapenv:Body>
//!     <tns:createTicket>
//!       <createTicketRequest>
//!         <_ticketDefinitionId>3</_ticketDefinitionId>
//!         ...
//! ```
//!
//! Responses are decoded into JSON: text-only elements become strings, empty
//! or `xsi:nil` elements become `null`, repeated siblings become arrays.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::Value;

use crate::error::TransportError;
use crate::Params;

/// The SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Builds the request envelope for `operation`.
///
/// Arrays repeat their element, objects nest, and `null` values are left
/// out.
///
/// # Errors
///
/// - `TransportError::Validation` if a key is not a valid XML element name
/// - `TransportError::InvalidValue` for a list nested directly in a list
pub fn build_request(
    namespace: &str,
    operation: &str,
    params: &Params,
) -> Result<String, TransportError> {
    check_name(operation)?;

    let mut out = String::with_capacity(256);
    out.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    out.push_str(&format!(
        r#"<soapenv:Envelope xmlns:soapenv="{}" xmlns:tns="{}">"#,
        SOAP_ENV_NS,
        escape(namespace)
    ));
    out.push_str("<soapenv:Body>");
    out.push_str(&format!("<tns:{operation}><{operation}Request>"));
    for (key, value) in params {
        write_value(&mut out, key, value)?;
    }
    out.push_str(&format!("</{operation}Request></tns:{operation}>"));
    out.push_str("</soapenv:Body></soapenv:Envelope>");
    Ok(out)
}

fn write_value(out: &mut String, name: &str, value: &Value) -> Result<(), TransportError> {
    check_name(name)?;
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push_str(&format!("<{name}>{b}</{name}>")),
        Value::Number(n) => out.push_str(&format!("<{name}>{n}</{name}>")),
        Value::String(s) => out.push_str(&format!("<{name}>{}</{name}>", escape(s.as_str()))),
        Value::Array(items) => {
            for item in items {
                if item.is_array() {
                    return Err(TransportError::InvalidValue(format!(
                        "{name} contains a list directly inside a list"
                    )));
                }
                write_value(out, name, item)?;
            }
        }
        Value::Object(map) => {
            out.push_str(&format!("<{name}>"));
            for (key, value) in map {
                write_value(out, key, value)?;
            }
            out.push_str(&format!("</{name}>"));
        }
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), TransportError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(TransportError::Validation(format!(
            "{:?} is not a valid element name",
            name
        )))
    }
}

/// Decodes a response envelope.
///
/// Returns the decoded operation response, unwrapped when it holds a
/// single child (the usual `<return>` element).
///
/// # Errors
///
/// - `TransportError::Fault` if the body carries a SOAP fault
/// - `TransportError::Shape` if the document is not a SOAP envelope
pub fn decode_response(xml: &str) -> Result<Value, TransportError> {
    let root = parse_document(xml)?;
    if root.name != "Envelope" {
        return Err(TransportError::Shape(format!(
            "expected a SOAP Envelope, got <{}>",
            root.name
        )));
    }
    let body = root
        .child("Body")
        .ok_or_else(|| TransportError::Shape("envelope has no Body".to_string()))?;

    let Some(payload) = body.children.first() else {
        return Ok(Value::Null);
    };
    if payload.name == "Fault" {
        return Err(fault(payload));
    }

    Ok(match payload.to_value() {
        Value::Object(map) if map.len() == 1 => {
            map.into_iter().next().map_or(Value::Null, |(_, v)| v)
        }
        other => other,
    })
}

fn fault(element: &Element) -> TransportError {
    // SOAP 1.1 uses faultcode/faultstring, SOAP 1.2 Code/Value and Reason/Text.
    let code = element
        .child("faultcode")
        .or_else(|| element.child("Code").and_then(|c| c.child("Value")))
        .map(|e| e.text.clone())
        .unwrap_or_default();
    let message = element
        .child("faultstring")
        .or_else(|| element.child("Reason").and_then(|r| r.child("Text")))
        .map(|e| e.text.clone())
        .unwrap_or_default();
    TransportError::Fault { code, message }
}

/// A parsed XML element, namespace prefixes stripped.
#[derive(Debug, Clone, Default)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self, TransportError> {
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr =
                attr.map_err(|e| TransportError::Shape(format!("malformed attribute: {e}")))?;
            let value = attr
                .unescape_value()
                .map_err(|e| TransportError::Shape(format!("malformed attribute: {e}")))?;
            attributes.push((
                String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned(),
                value.into_owned(),
            ));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            attributes,
            ..Self::default()
        })
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All descendants (depth first) with the given local name.
    pub fn descendants<'a>(&'a self, name: &'a str) -> Box<dyn Iterator<Item = &'a Element> + 'a> {
        Box::new(self.children.iter().flat_map(move |child| {
            let own = (child.name == name).then_some(child);
            own.into_iter().chain(child.descendants(name))
        }))
    }

    /// Value of the attribute with the given local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn to_value(&self) -> Value {
        if self.attribute("nil") == Some("true") {
            return Value::Null;
        }
        // Leaf text is kept verbatim; text between child elements is layout.
        if self.children.is_empty() {
            return if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text.clone())
            };
        }

        let mut map = Params::new();
        for child in &self.children {
            let value = child.to_value();
            match map.get_mut(&child.name) {
                // Element values are never arrays, so an array here means the
                // name has already repeated.
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(child.name.clone(), value);
                }
            }
        }
        Value::Object(map)
    }
}

/// Parses an XML document into an element tree.
pub(crate) fn parse_document(xml: &str) -> Result<Element, TransportError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(Element::from_start(&start)?),
            Ok(Event::Empty(start)) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| TransportError::Shape("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element);
            }
            Ok(Event::Text(text)) => {
                if let Some(top) = stack.last_mut() {
                    let text = text
                        .unescape()
                        .map_err(|e| TransportError::Shape(format!("malformed text: {e}")))?;
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(data)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(TransportError::Shape(format!("malformed XML: {e}"))),
        }
    }

    if !stack.is_empty() {
        return Err(TransportError::Shape("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| TransportError::Shape("empty document".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn envelope(body: &str) -> String {
        format!(
            concat!(
                r#"<?xml version="1.0"?><soap:Envelope xmlns:soap="{}">"#,
                "<soap:Body>{}</soap:Body></soap:Envelope>"
            ),
            SOAP_ENV_NS, body
        )
    }

    #[test]
    fn test_build_request_layout() {
        let xml = build_request(
            "MRWebServices",
            "getItemId",
            &params(json!({"_itemDefinitionId": 76, "_itemNumber": "SR-12", "_submitter": null})),
        )
        .unwrap();

        assert!(xml.contains(r#"xmlns:tns="MRWebServices""#));
        assert!(xml.contains(
            "<tns:getItemId><getItemIdRequest><_itemDefinitionId>76</_itemDefinitionId>\
             <_itemNumber>SR-12</_itemNumber></getItemIdRequest></tns:getItemId>"
        ));
        assert!(!xml.contains("_submitter"));
    }

    #[test]
    fn test_build_request_nested_and_repeated() {
        let xml = build_request(
            "ns",
            "editItem",
            &params(json!({
                "_assignees": ["ann", "bob"],
                "_itemFields": {"itemFields": [
                    {"fieldName": "Title", "fieldValue": {"value": "A & B"}}
                ]}
            })),
        )
        .unwrap();

        assert!(xml.contains("<_assignees>ann</_assignees><_assignees>bob</_assignees>"));
        assert!(xml.contains(
            "<_itemFields><itemFields><fieldName>Title</fieldName>\
             <fieldValue><value>A &amp; B</value></fieldValue></itemFields></_itemFields>"
        ));
    }

    #[test]
    fn test_build_request_rejects_bad_names() {
        let err = build_request("ns", "runSearch", &params(json!({"bad name": 1}))).unwrap_err();
        assert!(matches!(err, TransportError::Validation(_)));

        let err = build_request("ns", "runSearch", &params(json!({"_ids": [[1]]}))).unwrap_err();
        assert!(matches!(err, TransportError::InvalidValue(_)));
    }

    #[test]
    fn test_decode_scalar_return() {
        let xml = envelope(
            r#"<ns1:createTicketResponse xmlns:ns1="MRWebServices">
                 <return>4711</return>
               </ns1:createTicketResponse>"#,
        );
        assert_eq!(decode_response(&xml).unwrap(), json!("4711"));
    }

    #[test]
    fn test_decode_record_with_repeated_fields() {
        let xml = envelope(
            "<getItemDetailsResponse><return>\
               <_itemFields>\
                 <itemFields><fieldName>Title</fieldName>\
                   <fieldValue><value>Hi</value></fieldValue></itemFields>\
                 <itemFields><fieldName>Status</fieldName>\
                   <fieldValue><value>Open</value></fieldValue></itemFields>\
               </_itemFields>\
               <_assignees/>\
             </return></getItemDetailsResponse>",
        );
        let value = decode_response(&xml).unwrap();
        assert_eq!(
            value,
            json!({
                "_itemFields": {"itemFields": [
                    {"fieldName": "Title", "fieldValue": {"value": "Hi"}},
                    {"fieldName": "Status", "fieldValue": {"value": "Open"}}
                ]},
                "_assignees": null
            })
        );
    }

    #[test]
    fn test_decode_nil_and_entities() {
        let xml = envelope(
            r#"<r xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                 <a xsi:nil="true"/><b>x &lt; y</b>
               </r>"#,
        );
        assert_eq!(decode_response(&xml).unwrap(), json!({"a": null, "b": "x < y"}));
    }

    #[test]
    fn test_decode_keeps_leaf_whitespace() {
        let xml = envelope(
            "<runSearchResponse>\n  <return>\n    <title>  padded value  </title>\n    \
             <note> </note>\n  </return>\n</runSearchResponse>",
        );
        assert_eq!(
            decode_response(&xml).unwrap(),
            json!({"title": "  padded value  ", "note": " "})
        );

        let xml =
            envelope("<getItemIdResponse><return>  padded value  </return></getItemIdResponse>");
        assert_eq!(decode_response(&xml).unwrap(), json!("  padded value  "));
    }

    #[test]
    fn test_decode_fault() {
        let xml = envelope(
            "<soap:Fault><faultcode>soap:Server</faultcode>\
             <faultstring>Item definition 99 does not exist</faultstring></soap:Fault>",
        );
        match decode_response(&xml).unwrap_err() {
            TransportError::Fault { code, message } => {
                assert_eq!(code, "soap:Server");
                assert_eq!(message, "Item definition 99 does not exist");
            }
            other => panic!("expected a fault, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_non_envelope() {
        assert!(matches!(
            decode_response("<html><body>Login</body></html>"),
            Err(TransportError::Shape(_))
        ));
        assert!(matches!(decode_response("<a><b></a>"), Err(TransportError::Shape(_))));
        assert!(matches!(decode_response(""), Err(TransportError::Shape(_))));
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(decode_response(&envelope("")).unwrap(), Value::Null);
    }
}
