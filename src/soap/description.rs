//! Service description (WSDL) parsing.
//!
//! Only the parts the client needs are read: the target namespace, the
//! endpoint address, the declared operations and their SOAP actions.

use std::collections::HashMap;

use super::envelope::parse_document;
use crate::error::TransportError;

/// What the client knows about the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescription {
    /// The `targetNamespace` of the WSDL definitions.
    pub target_namespace: String,

    /// The `soap:address` location, if declared.
    pub endpoint: Option<String>,

    /// Operation names declared by the port type, in document order.
    pub operations: Vec<String>,

    /// `soapAction` per operation, from the binding.
    pub soap_actions: HashMap<String, String>,
}

impl ServiceDescription {
    /// Parses a WSDL 1.1 document.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Shape` if the document is not XML or lacks
    /// a `targetNamespace`.
    pub fn parse(wsdl: &str) -> Result<Self, TransportError> {
        let root = parse_document(wsdl)?;
        let target_namespace = root
            .attribute("targetNamespace")
            .ok_or_else(|| {
                TransportError::Shape("service description has no targetNamespace".to_string())
            })?
            .to_string();

        let endpoint = root
            .descendants("address")
            .find_map(|address| address.attribute("location"))
            .map(str::to_string);

        let mut operations: Vec<String> = Vec::new();
        for port_type in root.descendants("portType") {
            for op in port_type.descendants("operation") {
                if let Some(name) = op.attribute("name") {
                    if !operations.iter().any(|known| known == name) {
                        operations.push(name.to_string());
                    }
                }
            }
        }

        let mut soap_actions = HashMap::new();
        for binding in root.descendants("binding") {
            for op in binding.children.iter().filter(|c| c.name == "operation") {
                let action = op
                    .child("operation")
                    .and_then(|inner| inner.attribute("soapAction"));
                if let (Some(name), Some(action)) = (op.attribute("name"), action) {
                    soap_actions.insert(name.to_string(), action.to_string());
                }
            }
        }

        Ok(Self {
            target_namespace,
            endpoint,
            operations,
            soap_actions,
        })
    }

    /// Returns true if the description declares `operation`.
    ///
    /// A description that declares no operations at all is treated as
    /// permitting everything.
    pub fn declares(&self, operation: &str) -> bool {
        self.operations.is_empty() || self.operations.iter().any(|op| op == operation)
    }

    /// The `soapAction` for `operation`, empty if none was declared.
    pub fn soap_action(&self, operation: &str) -> &str {
        self.soap_actions
            .get(operation)
            .map(String::as_str)
            .unwrap_or("")
    }
}
