//! Request dispatcher for the FootPrints SOAP API.
//!
//! [`Requester`] owns the transport and is the only path to the network.
//! Every call is checked against the [`Operation`] table, its parameter
//! keys are rewritten to the service's `_camelCase` convention, and the
//! result is recorded in a small newest-first history.
//!
//! # Security
//!
//! Dispatches are logged with the operation name and parameter keys only.
//! Parameter values and credentials are never logged.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::Value;

use crate::config::Config;
use crate::error::{FootprintsError, Phase, Result};
use crate::keys::{transform_keys, Convention};
use crate::operation::Operation;
use crate::soap::{HttpSoapTransport, SoapTransport};
use crate::Params;

/// Number of responses kept in the history.
pub const HISTORY_CAPACITY: usize = 5;

/// Identifier fields copied from the outbound parameters onto a result that
/// lacks them. Each entry lists the parameter keys to try, in order.
const BACKFILL_FIELDS: &[(&str, &[&str])] = &[
    ("_itemId", &["_itemId"]),
    ("_itemDefinitionId", &["_itemDefinitionId"]),
    ("_ticketDefinitionId", &["_ticketDefinitionId", "_itemDefinitionId"]),
    ("_ticketNumber", &["_ticketNumber"]),
];

/// Dispatches operations to a [`SoapTransport`].
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let requester = Requester::connect(&config).await?;
///
/// let mut params = Params::new();
/// params.insert("item_definition_id".into(), 76.into());
/// params.insert("item_number".into(), "1234".into());
/// let id = requester.request("getItemId", params, Params::new()).await?;
/// ```
pub struct Requester {
    transport: Box<dyn SoapTransport>,

    /// Most recent responses, newest first.
    history: Mutex<VecDeque<Value>>,
}

impl Requester {
    /// Connects to the service described by `config`.
    ///
    /// # Errors
    ///
    /// See [`HttpSoapTransport::connect`].
    pub async fn connect(config: &Config) -> Result<Self> {
        let transport = HttpSoapTransport::connect(config).await?;
        tracing::debug!(endpoint = %transport.endpoint(), "Requester connected");
        Ok(Self::with_transport(Box::new(transport)))
    }

    /// Creates a requester over an existing transport.
    pub fn with_transport(transport: Box<dyn SoapTransport>) -> Self {
        Self {
            transport,
            history: Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY)),
        }
    }

    /// Invokes the operation named `method_name`.
    ///
    /// `extra` is merged into `params` unless `params` carries a `kwargs`
    /// key. Keys may be given in any convention; they are sent as
    /// `_camelCase`.
    ///
    /// # Errors
    ///
    /// - `FootprintsError::InvalidArgument` for a name outside the operation
    ///   table (nothing is sent)
    /// - `FootprintsError::Service` for transport failures, classified per
    ///   [`TransportError::classify`](crate::error::TransportError::classify)
    pub async fn request(&self, method_name: &str, params: Params, extra: Params) -> Result<Value> {
        let operation: Operation = method_name.parse()?;
        self.dispatch(operation, params, extra).await
    }

    /// Invokes `operation`. Same as [`Requester::request`] without the name lookup.
    pub async fn dispatch(
        &self,
        operation: Operation,
        mut params: Params,
        extra: Params,
    ) -> Result<Value> {
        if !params.contains_key("kwargs") {
            params.extend(extra);
        }

        let outbound = if params.is_empty() {
            params
        } else {
            transform_keys(&params, Convention::ModifiedCamel)
        };

        tracing::debug!(
            operation = %operation,
            params = ?outbound.keys().collect::<Vec<_>>(),
            "Dispatching operation"
        );

        let mut response = self
            .transport
            .call(operation.wire_name(), &outbound)
            .await
            .map_err(|e| {
                let classified = e.classify(Phase::Request);
                tracing::debug!(operation = %operation, error = %classified, "Operation failed");
                FootprintsError::Service(classified)
            })?;

        backfill_identifiers(&mut response, &outbound);
        self.remember(response.clone());

        Ok(response)
    }

    /// Returns the most recent responses, newest first.
    pub fn history(&self) -> Vec<Value> {
        self.lock_history().iter().cloned().collect()
    }

    fn remember(&self, response: Value) {
        let mut history = self.lock_history();
        history.push_front(response);
        history.truncate(HISTORY_CAPACITY);
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, VecDeque<Value>> {
        // History is plain data; a poisoned lock still holds a usable value.
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Requester")
            .field("history_len", &self.lock_history().len())
            .finish_non_exhaustive()
    }
}

/// Copies identifier fields the result lacks from the outbound parameters.
/// Results that are not objects are left alone.
fn backfill_identifiers(response: &mut Value, outbound: &Params) {
    let Value::Object(fields) = response else {
        return;
    };

    for (field, sources) in BACKFILL_FIELDS {
        if fields.contains_key(*field) {
            continue;
        }
        if let Some(value) = sources.iter().find_map(|key| outbound.get(*key)) {
            fields.insert((*field).to_string(), value.clone());
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{ErrorOrigin, ServiceErrorKind, TransportError};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// A transport that replays canned results and records every call.
    #[derive(Default)]
    pub(crate) struct MockTransport {
        responses: Mutex<VecDeque<std::result::Result<Value, TransportError>>>,
        pub(crate) calls: Arc<Mutex<Vec<(String, Params)>>>,
        pub(crate) count: Arc<AtomicUsize>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(self, response: Value) -> Self {
            self.push(Ok(response))
        }

        pub(crate) fn fail(self, error: TransportError) -> Self {
            self.push(Err(error))
        }

        fn push(self, result: std::result::Result<Value, TransportError>) -> Self {
            self.responses.lock().unwrap().push_back(result);
            self
        }
    }

    #[async_trait]
    impl SoapTransport for MockTransport {
        async fn call(
            &self,
            operation: &str,
            params: &Params,
        ) -> std::result::Result<Value, TransportError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            self.calls
                .lock()
                .unwrap()
                .push((operation.to_string(), params.clone()));
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Value::Null))
        }
    }

    pub(crate) fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_operation_never_reaches_transport() {
        let transport = MockTransport::new();
        let count = transport.count.clone();
        let requester = Requester::with_transport(Box::new(transport));

        let err = requester
            .request("deleteEverything", Params::new(), Params::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FootprintsError::InvalidArgument(ref m) if m == "Unsupported method."
        ));
        assert_eq!(err.origin(), ErrorOrigin::LocalValidation);
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_keys_are_sent_in_modified_camel() {
        let transport = MockTransport::new().respond(json!("42"));
        let calls = transport.calls.clone();
        let requester = Requester::with_transport(Box::new(transport));

        let result = requester
            .request(
                "getItemId",
                params(json!({"item_definition_id": 76, "item_number": "1234"})),
                Params::new(),
            )
            .await
            .unwrap();

        assert_eq!(result, json!("42"));
        let calls = calls.lock().unwrap();
        assert_eq!(calls[0].0, "getItemId");
        assert_eq!(
            Value::Object(calls[0].1.clone()),
            json!({"_itemDefinitionId": 76, "_itemNumber": "1234"})
        );
    }

    #[tokio::test]
    async fn test_extra_merged_unless_kwargs_present() {
        let transport = MockTransport::new();
        let calls = transport.calls.clone();
        let requester = Requester::with_transport(Box::new(transport));

        requester
            .request(
                "listSearches",
                params(json!({"item_type_name": "Ticket"})),
                params(json!({"submitter": "jdoe"})),
            )
            .await
            .unwrap();
        requester
            .request(
                "listSearches",
                params(json!({"kwargs": "x"})),
                params(json!({"submitter": "jdoe"})),
            )
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(
            calls[0].1.keys().collect::<Vec<_>>(),
            vec!["_itemTypeName", "_submitter"]
        );
        assert!(!calls[1].1.contains_key("_submitter"));
    }

    #[tokio::test]
    async fn test_empty_params_sent_as_is() {
        let transport = MockTransport::new();
        let calls = transport.calls.clone();
        let requester = Requester::with_transport(Box::new(transport));

        requester
            .request("listContainerDefinitions", Params::new(), Params::new())
            .await
            .unwrap();

        assert!(calls.lock().unwrap()[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_backfills_identifiers() {
        let transport = MockTransport::new().respond(json!({"_title": "Printer down"}));
        let requester = Requester::with_transport(Box::new(transport));

        let result = requester
            .request(
                "getTicketDetails",
                params(json!({"item_definition_id": 76, "item_id": 1234})),
                Params::new(),
            )
            .await
            .unwrap();

        assert_eq!(
            result,
            json!({
                "_title": "Printer down",
                "_itemId": 1234,
                "_itemDefinitionId": 76,
                "_ticketDefinitionId": 76
            })
        );
    }

    #[tokio::test]
    async fn test_backfill_keeps_existing_values() {
        let transport = MockTransport::new().respond(json!({"_itemId": 9, "_ticketNumber": "T-1"}));
        let requester = Requester::with_transport(Box::new(transport));

        let result = requester
            .request(
                "getItemDetails",
                params(json!({"item_id": 1, "ticket_number": "T-2"})),
                Params::new(),
            )
            .await
            .unwrap();

        assert_eq!(result["_itemId"], json!(9));
        assert_eq!(result["_ticketNumber"], json!("T-1"));
        assert!(result.get("_itemDefinitionId").is_none());
    }

    #[tokio::test]
    async fn test_scalar_results_are_not_backfilled() {
        let transport = MockTransport::new().respond(json!("1234"));
        let requester = Requester::with_transport(Box::new(transport));

        let result = requester
            .request("createTicket", params(json!({"item_id": 1})), Params::new())
            .await
            .unwrap();

        assert_eq!(result, json!("1234"));
    }

    #[tokio::test]
    async fn test_history_is_bounded_newest_first() {
        let mut transport = MockTransport::new();
        for i in 0..6 {
            transport = transport.respond(json!(i));
        }
        let requester = Requester::with_transport(Box::new(transport));

        for _ in 0..6 {
            requester
                .request("listSearches", Params::new(), Params::new())
                .await
                .unwrap();
        }

        assert_eq!(
            requester.history(),
            vec![json!(5), json!(4), json!(3), json!(2), json!(1)]
        );
    }

    #[tokio::test]
    async fn test_failures_are_not_recorded() {
        let transport = MockTransport::new().fail(TransportError::Shape("nope".into()));
        let requester = Requester::with_transport(Box::new(transport));

        let err = requester
            .request("runSearch", Params::new(), Params::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ServiceErrorKind::ResourceDoesNotExist));
        assert!(requester.history().is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_mapping() {
        let transport = MockTransport::new().fail(TransportError::Status {
            status: StatusCode::UNAUTHORIZED,
            body: String::new(),
        });
        let requester = Requester::with_transport(Box::new(transport));

        let err = requester
            .request("getItemId", Params::new(), Params::new())
            .await
            .unwrap_err();

        assert_eq!(err.origin(), ErrorOrigin::RemoteService);
        assert_eq!(
            err.to_string(),
            "401 Unauthorized to access the requested resource."
        );
    }

    #[tokio::test]
    async fn test_fault_and_invalid_value_mapping() {
        let transport = MockTransport::new()
            .fail(TransportError::Fault {
                code: "soap:Server".into(),
                message: "Item 99 not found".into(),
            })
            .fail(TransportError::InvalidValue("bad".into()))
            .fail(TransportError::Status {
                status: StatusCode::BAD_GATEWAY,
                body: String::new(),
            });
        let requester = Requester::with_transport(Box::new(transport));

        let fault = requester
            .request("getTicketDetails", Params::new(), Params::new())
            .await
            .unwrap_err();
        assert_eq!(fault.to_string(), "404 Item 99 not found");

        let forbidden = requester
            .request("editTicket", Params::new(), Params::new())
            .await
            .unwrap_err();
        assert_eq!(forbidden.kind(), Some(ServiceErrorKind::Forbidden));

        let http = requester
            .request("editTicket", Params::new(), Params::new())
            .await
            .unwrap_err();
        assert_eq!(http.kind(), Some(ServiceErrorKind::FootprintsException));
        assert_eq!(http.status_code(), Some(StatusCode::NOT_IMPLEMENTED));
    }
}
