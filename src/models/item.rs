//! Generic item records.

use std::fmt;

use serde_json::Value;

use super::{identifier, Record};
use crate::args::require_fields;
use crate::error::{FootprintsError, Result, ServiceErrorKind};
use crate::inputs::{ItemUpdate, OperationInput};
use crate::requester::Requester;
use crate::Params;

/// An item as returned by `getItemDetails`.
#[derive(Clone)]
pub struct Item<'a> {
    record: Record<'a>,
}

impl<'a> Item<'a> {
    /// Wraps an item payload.
    ///
    /// # Errors
    ///
    /// Returns `ResourceDoesNotExist` if the payload is not a mapping.
    pub fn new(requester: &'a Requester, payload: Value) -> Result<Self> {
        Ok(Self {
            record: Record::new(requester, payload, None)?,
        })
    }

    /// Returns a non-null attribute by its snake_case name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    /// The normalized attributes.
    pub fn attributes(&self) -> &Params {
        self.record.attributes()
    }

    /// The payload exactly as the service returned it.
    pub fn original(&self) -> &Value {
        self.record.original()
    }

    /// The original payload as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `FootprintsError::Serialization` if the payload cannot be
    /// rendered.
    pub fn to_json(&self) -> Result<String> {
        self.record.to_json()
    }

    /// The item id, if known.
    pub fn item_id(&self) -> Option<&Value> {
        self.get("item_id")
    }

    /// The item definition id, if known.
    pub fn item_definition_id(&self) -> Option<&Value> {
        self.get("item_definition_id")
    }

    /// Edits this item through `editItem` and returns the item id.
    ///
    /// # Errors
    ///
    /// - `ItemDefinitionDoesNotExist` if no definition id is given or known
    /// - `RequiredFieldMissing` if no item id is given or known
    /// - any error from the dispatch itself
    pub async fn update(&self, update: ItemUpdate) -> Result<String> {
        let mut params = update.to_params()?;

        if !params.contains_key("item_definition_id") {
            let id = self.item_definition_id().cloned().ok_or_else(|| {
                FootprintsError::service(ServiceErrorKind::ItemDefinitionDoesNotExist)
            })?;
            params.insert("item_definition_id".to_string(), id);
        }
        if !params.contains_key("item_id") {
            if let Some(id) = self.item_id() {
                params.insert("item_id".to_string(), id.clone());
            }
        }
        require_fields(&params, &["item_id"])?;

        let response = self
            .record
            .requester()
            .dispatch(ItemUpdate::OPERATION, params, update.extra().clone())
            .await?;
        identifier(&response)
    }
}

impl fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.record.fmt_named("Item", f)
    }
}

impl fmt::Debug for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("attributes", self.attributes())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requester::tests::MockTransport;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_custom_fields_are_ignored() {
        let requester = Requester::with_transport(Box::new(MockTransport::new()));
        let item = Item::new(
            &requester,
            json!({
                "_itemFields": {"itemFields": {
                    "fieldName": "Title",
                    "fieldValue": {"value": "Laptop"}
                }},
                "_customFields": {"itemFields": [
                    {"fieldName": "Service", "fieldValue": {"value": "x"}}
                ]},
                "_itemId": 8
            }),
        )
        .unwrap();

        assert_eq!(item.get("title"), Some(&json!("Laptop")));
        assert_eq!(item.get("service"), None);
        assert_eq!(item.to_string(), "Item(title='Laptop', item_id=8)");
    }

    #[tokio::test]
    async fn test_update_defaults_ids() {
        let transport = MockTransport::new().respond(json!("8"));
        let calls = transport.calls.clone();
        let requester = Requester::with_transport(Box::new(transport));
        let item = Item::new(&requester, json!({"_itemId": 8, "_itemDefinitionId": 12})).unwrap();

        let id = item
            .update(ItemUpdate::new(json!({"itemFields": []})).with_assignees(["ann"]))
            .await
            .unwrap();

        assert_eq!(id, "8");
        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].0, "editItem");
        assert_eq!(
            calls[0].1.keys().collect::<Vec<_>>(),
            vec!["_itemFields", "_assignees", "_itemDefinitionId", "_itemId"]
        );
        assert_eq!(calls[0].1.get("_itemId"), Some(&json!(8)));
    }

    #[tokio::test]
    async fn test_update_missing_ids() {
        let requester = Requester::with_transport(Box::new(MockTransport::new()));
        let item = Item::new(&requester, json!({"_itemId": 8})).unwrap();
        let err = item.update(ItemUpdate::new(json!({}))).await.unwrap_err();
        assert_eq!(err.kind(), Some(ServiceErrorKind::ItemDefinitionDoesNotExist));

        let item = Item::new(&requester, json!({"_itemDefinitionId": 12})).unwrap();
        let err = item.update(ItemUpdate::new(json!({}))).await.unwrap_err();
        assert_eq!(err.kind(), Some(ServiceErrorKind::RequiredFieldMissing));
        assert!(err.to_string().contains("item_id"));
    }

    #[tokio::test]
    async fn test_non_identifier_response() {
        let transport = MockTransport::new().respond(json!({"unexpected": true}));
        let requester = Requester::with_transport(Box::new(transport));
        let item = Item::new(&requester, json!({"_itemId": 8, "_itemDefinitionId": 12})).unwrap();

        let err = item.update(ItemUpdate::new(json!({}))).await.unwrap_err();
        assert_eq!(err.kind(), Some(ServiceErrorKind::ResourceDoesNotExist));
    }
}
