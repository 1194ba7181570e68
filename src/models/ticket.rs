//! Ticket records.

use std::fmt;

use serde_json::Value;

use super::{identifier, Record};
use crate::args::require_fields;
use crate::attributes::CUSTOM_ATTRS;
use crate::error::{FootprintsError, Result, ServiceErrorKind};
use crate::inputs::{OperationInput, TicketUpdate};
use crate::requester::Requester;
use crate::Params;

/// A ticket as returned by `getTicketDetails`.
///
/// Besides the common attributes, tickets carry the organisation-specific
/// fields listed in [`CUSTOM_ATTRS`].
#[derive(Clone)]
pub struct Ticket<'a> {
    record: Record<'a>,
}

impl<'a> Ticket<'a> {
    /// Wraps a ticket payload.
    ///
    /// # Errors
    ///
    /// Returns `ResourceDoesNotExist` if the payload is not a mapping.
    pub fn new(requester: &'a Requester, payload: Value) -> Result<Self> {
        Ok(Self {
            record: Record::new(requester, payload, Some(CUSTOM_ATTRS))?,
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

    /// The ticket's item id, if known.
    pub fn item_id(&self) -> Option<&Value> {
        self.get("item_id")
    }

    /// The ticket definition id, if known.
    pub fn ticket_definition_id(&self) -> Option<&Value> {
        self.get("ticket_definition_id")
    }

    /// Edits this ticket through `editTicket` and returns the ticket id.
    ///
    /// The ticket id and definition id default to this ticket's own.
    ///
    /// # Errors
    ///
    /// - `ItemDefinitionDoesNotExist` if no definition id is given or known
    /// - `RequiredFieldMissing` if no ticket id is given or known
    /// - any error from the dispatch itself
    pub async fn update(&self, update: TicketUpdate) -> Result<String> {
        let mut params = update.to_params()?;

        if !params.contains_key("ticket_definition_id") {
            let id = self.ticket_definition_id().cloned().ok_or_else(|| {
                FootprintsError::service(ServiceErrorKind::ItemDefinitionDoesNotExist)
            })?;
            params.insert("ticket_definition_id".to_string(), id);
        }
        if !params.contains_key("ticket_id") {
            if let Some(id) = self.item_id() {
                params.insert("ticket_id".to_string(), id.clone());
            }
        }
        require_fields(&params, &["ticket_id"])?;

        let response = self
            .record
            .requester()
            .dispatch(TicketUpdate::OPERATION, params, update.extra().clone())
            .await?;
        identifier(&response)
    }
}

impl fmt::Display for Ticket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.record.fmt_named("Ticket", f)
    }
}

impl fmt::Debug for Ticket<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ticket")
            .field("attributes", self.attributes())
            .finish_non_exhaustive()
    }
}
