//! Typed parameters for each FootPrints operation.
//!
//! Every input struct serializes to a snake_case mapping; unset optional
//! fields are dropped by [`cleanup_args`] before the requester rewrites the
//! keys for the wire. Each struct also carries an `extra` bag for parameters
//! the typed fields do not cover. Those are merged in at dispatch time.
//!
//! Field payloads (`ticket_fields`, `item_fields`, ...) are passed through
//! untouched as JSON, typically a mapping with `itemFields` entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::args::cleanup_args;
use crate::error::Result;
use crate::operation::Operation;
use crate::Params;

/// An identifier the service accepts either as a number or as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// A numeric identifier.
    Number(i64),
    /// A textual identifier (for tickets, usually the item number).
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{}", n),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Id {
    fn from(value: i64) -> Self {
        Id::Number(value)
    }
}

impl From<i32> for Id {
    fn from(value: i32) -> Self {
        Id::Number(value.into())
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Id::Number(value.into())
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::Text(value.to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::Text(value)
    }
}

/// Parameters for a single operation.
pub trait OperationInput: Serialize {
    /// The operation these parameters are sent to.
    const OPERATION: Operation;

    /// Additional parameters merged in at dispatch time.
    fn extra(&self) -> &Params;

    /// The typed fields as a cleaned parameter mapping.
    ///
    /// # Errors
    ///
    /// Returns `FootprintsError::Serialization` if a field cannot be
    /// serialized.
    fn to_params(&self) -> Result<Params> {
        cleanup_args(&serde_json::to_value(self)?)
    }
}

/// Implements [`OperationInput`] plus the `with_submitter` and `with_extra`
/// builders shared by every input.
macro_rules! operation_input {
    ($($input:ident => $operation:ident),+ $(,)?) => {
        $(
            impl OperationInput for $input {
                const OPERATION: Operation = Operation::$operation;

                fn extra(&self) -> &Params {
                    &self.extra
                }
            }

            impl $input {
                /// Sets the userid/username of the submitter.
                #[must_use]
                pub fn with_submitter(mut self, submitter: impl Into<String>) -> Self {
                    self.submitter = Some(submitter.into());
                    self
                }

                /// Adds a parameter not covered by the typed fields.
                #[must_use]
                pub fn with_extra(
                    mut self,
                    key: impl Into<String>,
                    value: impl Into<Value>,
                ) -> Self {
                    self.extra.insert(key.into(), value.into());
                    self
                }
            }
        )+
    };
}

operation_input! {
    GetItemIdInput => GetItemId,
    GetItemDetailsInput => GetItemDetails,
    GetTicketInput => GetTicketDetails,
    GetContactAssociatedTicketsInput => GetContactAssociatedTickets,
    ListContainerDefinitionsInput => ListContainerDefinitions,
    ListItemDefinitionsInput => ListItemDefinitions,
    ListFieldDefinitionsInput => ListFieldDefinitions,
    ListQuickTemplatesInput => ListQuickTemplates,
    ListSearchesInput => ListSearches,
    RunSearchInput => RunSearch,
    CreateCiInput => CreateCi,
    CreateContactInput => CreateContact,
    CreateItemInput => CreateItem,
    CreateOrEditContactInput => CreateOrEditContact,
    CreateTicketInput => CreateTicket,
    CreateTicketAndLinkAssetsInput => CreateTicketAndLinkAssets,
    LinkItemsInput => LinkItems,
    LinkTicketsInput => LinkTickets,
    UpdateCiInput => EditCi,
    UpdateContactInput => EditContact,
    UpdateItemInput => EditItem,
    UpdateTicketInput => EditTicket,
    TicketUpdate => EditTicket,
    ItemUpdate => EditItem,
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Input for `getItemId`: resolves an item number to an item id.
#[derive(Debug, Clone, Serialize)]
pub struct GetItemIdInput {
    /// The item definition (workspace) id.
    pub item_definition_id: Id,
    /// The human-facing item number.
    pub item_number: Id,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl GetItemIdInput {
    /// Creates the input.
    pub fn new(item_definition_id: impl Into<Id>, item_number: impl Into<Id>) -> Self {
        Self {
            item_definition_id: item_definition_id.into(),
            item_number: item_number.into(),
            submitter: None,
            extra: Params::new(),
        }
    }
}

/// Input for `getItemDetails`.
#[derive(Debug, Clone, Serialize)]
pub struct GetItemDetailsInput {
    /// The item definition id.
    pub item_definition_id: Id,
    /// The item id.
    pub item_id: Id,
    /// External field names to retrieve; all fields when unset.
    pub fields_to_retrieve: Option<Vec<String>>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl GetItemDetailsInput {
    /// Creates the input.
    pub fn new(item_definition_id: impl Into<Id>, item_id: impl Into<Id>) -> Self {
        Self {
            item_definition_id: item_definition_id.into(),
            item_id: item_id.into(),
            fields_to_retrieve: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Restricts the fields retrieved.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields_to_retrieve = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// Input for `getTicketDetails`.
///
/// A textual `item_id` is treated as the ticket's item number and resolved
/// through `getItemId` first.
#[derive(Debug, Clone, Serialize)]
pub struct GetTicketInput {
    /// The ticket (item) definition id.
    pub item_definition_id: Id,
    /// The item id, or the item number as text.
    pub item_id: Id,
    /// External field names to retrieve; all fields when unset.
    pub fields_to_retrieve: Option<Vec<String>>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl GetTicketInput {
    /// Creates the input.
    pub fn new(item_definition_id: impl Into<Id>, item_id: impl Into<Id>) -> Self {
        Self {
            item_definition_id: item_definition_id.into(),
            item_id: item_id.into(),
            fields_to_retrieve: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Restricts the fields retrieved.
    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields_to_retrieve = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// Input for `getContactAssociatedTickets`.
#[derive(Debug, Clone, Serialize)]
pub struct GetContactAssociatedTicketsInput {
    /// The address book (contact) definition id.
    pub contact_definition_id: Id,
    /// The contact's primary key, usually an email address.
    pub primary_key_value: String,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl GetContactAssociatedTicketsInput {
    /// Creates the input.
    pub fn new(contact_definition_id: impl Into<Id>, primary_key_value: impl Into<String>) -> Self {
        Self {
            contact_definition_id: contact_definition_id.into(),
            primary_key_value: primary_key_value.into(),
            submitter: None,
            extra: Params::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Definitions and searches
// ---------------------------------------------------------------------------

/// Input for `listContainerDefinitions`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListContainerDefinitionsInput {
    /// Container subtype, e.g. `"Address Book"` or `"Workspace"`.
    pub container_subtype_name: Option<String>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl ListContainerDefinitionsInput {
    /// Creates an unfiltered input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by container subtype.
    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.container_subtype_name = Some(subtype.into());
        self
    }
}

/// Input for `listItemDefinitions`.
#[derive(Debug, Clone, Serialize)]
pub struct ListItemDefinitionsInput {
    /// The container definition id.
    pub container_definition_id: Id,
    /// Item subtype, e.g. `"Ticket"`.
    pub item_subtype_name: Option<String>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl ListItemDefinitionsInput {
    /// Creates the input.
    pub fn new(container_definition_id: impl Into<Id>) -> Self {
        Self {
            container_definition_id: container_definition_id.into(),
            item_subtype_name: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Filters by item subtype.
    #[must_use]
    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.item_subtype_name = Some(subtype.into());
        self
    }
}

/// Input for `listFieldDefinitions`.
#[derive(Debug, Clone, Serialize)]
pub struct ListFieldDefinitionsInput {
    /// The item definition id.
    pub item_definition_id: Id,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl ListFieldDefinitionsInput {
    /// Creates the input.
    pub fn new(item_definition_id: impl Into<Id>) -> Self {
        Self {
            item_definition_id: item_definition_id.into(),
            submitter: None,
            extra: Params::new(),
        }
    }
}

/// Input for `listQuickTemplates`.
#[derive(Debug, Clone, Serialize)]
pub struct ListQuickTemplatesInput {
    /// The item definition id.
    pub item_definition_id: Id,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl ListQuickTemplatesInput {
    /// Creates the input.
    pub fn new(item_definition_id: impl Into<Id>) -> Self {
        Self {
            item_definition_id: item_definition_id.into(),
            submitter: None,
            extra: Params::new(),
        }
    }
}

/// Input for `listSearches`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListSearchesInput {
    /// Item type, e.g. `"Ticket"`.
    pub item_type_name: Option<String>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl ListSearchesInput {
    /// Creates an unfiltered input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by item type.
    #[must_use]
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type_name = Some(item_type.into());
        self
    }
}

/// Input for `runSearch`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSearchInput {
    /// The saved search id.
    pub search_id: Id,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl RunSearchInput {
    /// Creates the input.
    pub fn new(search_id: impl Into<Id>) -> Self {
        Self {
            search_id: search_id.into(),
            submitter: None,
            extra: Params::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Input for `createCI`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCiInput {
    /// The CMDB definition id.
    pub cmdb_definition_id: Id,
    /// CI field payload.
    pub cifields: Option<Value>,
    /// Initial status.
    pub status: Option<String>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl CreateCiInput {
    /// Creates the input.
    pub fn new(cmdb_definition_id: impl Into<Id>) -> Self {
        Self {
            cmdb_definition_id: cmdb_definition_id.into(),
            cifields: None,
            status: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Sets the CI field payload.
    #[must_use]
    pub fn with_fields(mut self, fields: Value) -> Self {
        self.cifields = Some(fields);
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Input for `createContact`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateContactInput {
    /// The address book definition id.
    pub address_book_definition_id: Id,
    /// Contact field payload.
    pub contact_fields: Value,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl CreateContactInput {
    /// Creates the input.
    pub fn new(address_book_definition_id: impl Into<Id>, contact_fields: Value) -> Self {
        Self {
            address_book_definition_id: address_book_definition_id.into(),
            contact_fields,
            submitter: None,
            extra: Params::new(),
        }
    }
}

/// Input for `createItem`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateItemInput {
    /// The item definition id.
    pub item_definition_id: Id,
    /// Item field payload.
    pub item_fields: Value,
    /// Quick template to apply.
    pub quick_template_id: Option<Id>,
    /// People to assign to the item.
    pub assignees: Option<Vec<String>>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl CreateItemInput {
    /// Creates the input.
    pub fn new(item_definition_id: impl Into<Id>, item_fields: Value) -> Self {
        Self {
            item_definition_id: item_definition_id.into(),
            item_fields,
            quick_template_id: None,
            assignees: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Applies a quick template.
    #[must_use]
    pub fn with_quick_template(mut self, id: impl Into<Id>) -> Self {
        self.quick_template_id = Some(id.into());
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(
        mut self,
        assignees: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.assignees = Some(assignees.into_iter().map(Into::into).collect());
        self
    }
}

/// Input for `createOrEditContact`. Without a `contact_id` a new contact
/// is created.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrEditContactInput {
    /// The address book definition id.
    pub address_book_definition_id: Id,
    /// Contact field payload.
    pub contact_fields: Value,
    /// The contact to edit.
    pub contact_id: Option<Id>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl CreateOrEditContactInput {
    /// Creates the input.
    pub fn new(address_book_definition_id: impl Into<Id>, contact_fields: Value) -> Self {
        Self {
            address_book_definition_id: address_book_definition_id.into(),
            contact_fields,
            contact_id: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Targets an existing contact.
    #[must_use]
    pub fn with_contact_id(mut self, contact_id: impl Into<Id>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }
}

/// Input for `createTicket`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTicketInput {
    /// The ticket definition id.
    pub ticket_definition_id: Id,
    /// Ticket field payload, keyed by external field names.
    pub ticket_fields: Value,
    /// People to assign to the ticket.
    pub assignees: Option<Vec<String>>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Quick template to apply.
    pub quick_template_id: Option<Id>,
    /// Contact definition id used for contact linking.
    pub contact_definition_id: Option<Id>,
    /// Contact primary key, usually an email address.
    pub select_contact: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl CreateTicketInput {
    /// Creates the input.
    pub fn new(ticket_definition_id: impl Into<Id>, ticket_fields: Value) -> Self {
        Self {
            ticket_definition_id: ticket_definition_id.into(),
            ticket_fields,
            assignees: None,
            submitter: None,
            quick_template_id: None,
            contact_definition_id: None,
            select_contact: None,
            extra: Params::new(),
        }
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(
        mut self,
        assignees: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.assignees = Some(assignees.into_iter().map(Into::into).collect());
        self
    }

    /// Applies a quick template.
    #[must_use]
    pub fn with_quick_template(mut self, id: impl Into<Id>) -> Self {
        self.quick_template_id = Some(id.into());
        self
    }

    /// Links the ticket to a contact.
    #[must_use]
    pub fn with_contact(
        mut self,
        contact_definition_id: impl Into<Id>,
        select_contact: impl Into<String>,
    ) -> Self {
        self.contact_definition_id = Some(contact_definition_id.into());
        self.select_contact = Some(select_contact.into());
        self
    }
}

/// Input for `createTicketAndLinkAssets`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTicketAndLinkAssetsInput {
    /// The ticket definition id.
    pub ticket_definition_id: Id,
    /// Ticket field payload.
    pub ticket_fields: Value,
    /// Assets to link to the new ticket.
    pub assets_list: Option<Value>,
    /// Quick template to apply.
    pub quick_template_id: Option<Id>,
    /// People to assign to the ticket.
    pub assignees: Option<Vec<String>>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl CreateTicketAndLinkAssetsInput {
    /// Creates the input.
    pub fn new(ticket_definition_id: impl Into<Id>, ticket_fields: Value) -> Self {
        Self {
            ticket_definition_id: ticket_definition_id.into(),
            ticket_fields,
            assets_list: None,
            quick_template_id: None,
            assignees: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Sets the assets to link.
    #[must_use]
    pub fn with_assets(mut self, assets: Value) -> Self {
        self.assets_list = Some(assets);
        self
    }

    /// Applies a quick template.
    #[must_use]
    pub fn with_quick_template(mut self, id: impl Into<Id>) -> Self {
        self.quick_template_id = Some(id.into());
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(
        mut self,
        assignees: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.assignees = Some(assignees.into_iter().map(Into::into).collect());
        self
    }
}

// ---------------------------------------------------------------------------
// Links
// ---------------------------------------------------------------------------

/// Input for `linkItems`.
#[derive(Debug, Clone, Serialize)]
pub struct LinkItemsInput {
    /// Definition id of the first item.
    pub first_item_definition_id: Id,
    /// Id of the first item.
    pub first_item_id: Id,
    /// Definition id of the second item.
    pub second_item_definition_id: Id,
    /// Id of the second item.
    pub second_item_id: Id,
    /// Name of the link type, e.g. `"Related"`.
    pub link_type_name: String,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl LinkItemsInput {
    /// Links `first` to `second`; each is a `(definition id, item id)` pair.
    pub fn new(
        first: (impl Into<Id>, impl Into<Id>),
        second: (impl Into<Id>, impl Into<Id>),
        link_type_name: impl Into<String>,
    ) -> Self {
        Self {
            first_item_definition_id: first.0.into(),
            first_item_id: first.1.into(),
            second_item_definition_id: second.0.into(),
            second_item_id: second.1.into(),
            link_type_name: link_type_name.into(),
            submitter: None,
            extra: Params::new(),
        }
    }
}

/// Input for `linkTickets`.
#[derive(Debug, Clone, Serialize)]
pub struct LinkTicketsInput {
    /// Definition id of the first ticket.
    pub first_ticket_definition_id: Id,
    /// Id of the first ticket.
    pub first_ticket_id: Id,
    /// Definition id of the second ticket.
    pub second_ticket_definition_id: Id,
    /// Id of the second ticket.
    pub second_ticket_id: Id,
    /// Name of the link type, e.g. `"Related"`.
    pub link_type_name: String,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl LinkTicketsInput {
    /// Links `first` to `second`; each is a `(definition id, ticket id)` pair.
    pub fn new(
        first: (impl Into<Id>, impl Into<Id>),
        second: (impl Into<Id>, impl Into<Id>),
        link_type_name: impl Into<String>,
    ) -> Self {
        Self {
            first_ticket_definition_id: first.0.into(),
            first_ticket_id: first.1.into(),
            second_ticket_definition_id: second.0.into(),
            second_ticket_id: second.1.into(),
            link_type_name: link_type_name.into(),
            submitter: None,
            extra: Params::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

/// Input for `editCI`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateCiInput {
    /// The CMDB definition id.
    pub cmdb_definition_id: Id,
    /// The CI id.
    pub ci_id: Id,
    /// CI field payload.
    pub ci_fields: Option<Value>,
    /// New status.
    pub status: Option<String>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl UpdateCiInput {
    /// Creates the input.
    pub fn new(cmdb_definition_id: impl Into<Id>, ci_id: impl Into<Id>) -> Self {
        Self {
            cmdb_definition_id: cmdb_definition_id.into(),
            ci_id: ci_id.into(),
            ci_fields: None,
            status: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Sets the CI field payload.
    #[must_use]
    pub fn with_fields(mut self, fields: Value) -> Self {
        self.ci_fields = Some(fields);
        self
    }

    /// Sets the new status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Input for `editContact`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateContactInput {
    /// The address book definition id.
    pub address_book_definition_id: Id,
    /// The contact id.
    pub contact_id: Id,
    /// Contact field payload.
    pub contact_fields: Value,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl UpdateContactInput {
    /// Creates the input.
    pub fn new(
        address_book_definition_id: impl Into<Id>,
        contact_id: impl Into<Id>,
        contact_fields: Value,
    ) -> Self {
        Self {
            address_book_definition_id: address_book_definition_id.into(),
            contact_id: contact_id.into(),
            contact_fields,
            submitter: None,
            extra: Params::new(),
        }
    }
}

/// Input for `editItem`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateItemInput {
    /// The item definition id.
    pub item_definition_id: Id,
    /// The item id.
    pub item_id: Id,
    /// Item field payload.
    pub item_fields: Value,
    /// People to assign to the item.
    pub assignees: Option<Vec<String>>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl UpdateItemInput {
    /// Creates the input.
    pub fn new(
        item_definition_id: impl Into<Id>,
        item_id: impl Into<Id>,
        item_fields: Value,
    ) -> Self {
        Self {
            item_definition_id: item_definition_id.into(),
            item_id: item_id.into(),
            item_fields,
            assignees: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(
        mut self,
        assignees: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.assignees = Some(assignees.into_iter().map(Into::into).collect());
        self
    }
}

/// Input for `editTicket`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTicketInput {
    /// The ticket definition id.
    pub ticket_definition_id: Id,
    /// The ticket id.
    pub ticket_id: Id,
    /// Ticket field payload.
    pub ticket_fields: Value,
    /// Contact definition id used for contact linking.
    pub contact_definition_id: Option<Id>,
    /// Contact primary key, usually an email address.
    pub select_contact: Option<String>,
    /// People to assign to the ticket.
    pub assignees: Option<Vec<String>>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl UpdateTicketInput {
    /// Creates the input.
    pub fn new(
        ticket_definition_id: impl Into<Id>,
        ticket_id: impl Into<Id>,
        ticket_fields: Value,
    ) -> Self {
        Self {
            ticket_definition_id: ticket_definition_id.into(),
            ticket_id: ticket_id.into(),
            ticket_fields,
            contact_definition_id: None,
            select_contact: None,
            assignees: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(
        mut self,
        assignees: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.assignees = Some(assignees.into_iter().map(Into::into).collect());
        self
    }

    /// Links the ticket to a contact.
    #[must_use]
    pub fn with_contact(
        mut self,
        contact_definition_id: impl Into<Id>,
        select_contact: impl Into<String>,
    ) -> Self {
        self.contact_definition_id = Some(contact_definition_id.into());
        self.select_contact = Some(select_contact.into());
        self
    }
}

/// Changes applied through [`Ticket::update`](crate::models::Ticket::update).
///
/// The ticket id and definition id default to the ticket's own.
#[derive(Debug, Clone, Serialize)]
pub struct TicketUpdate {
    /// Ticket field payload.
    pub ticket_fields: Value,
    /// Overrides the ticket id.
    pub ticket_id: Option<Id>,
    /// Overrides the ticket definition id.
    pub ticket_definition_id: Option<Id>,
    /// Contact definition id used for contact linking.
    pub contact_definition_id: Option<Id>,
    /// Contact primary key, usually an email address.
    pub select_contact: Option<String>,
    /// People to assign to the ticket.
    pub assignees: Option<Vec<String>>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl TicketUpdate {
    /// Creates an update of `ticket_fields`.
    pub fn new(ticket_fields: Value) -> Self {
        Self {
            ticket_fields,
            ticket_id: None,
            ticket_definition_id: None,
            contact_definition_id: None,
            select_contact: None,
            assignees: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Overrides the ticket id.
    #[must_use]
    pub fn with_ticket_id(mut self, ticket_id: impl Into<Id>) -> Self {
        self.ticket_id = Some(ticket_id.into());
        self
    }

    /// Overrides the ticket definition id.
    #[must_use]
    pub fn with_ticket_definition_id(mut self, id: impl Into<Id>) -> Self {
        self.ticket_definition_id = Some(id.into());
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(
        mut self,
        assignees: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.assignees = Some(assignees.into_iter().map(Into::into).collect());
        self
    }

    /// Links the ticket to a contact.
    #[must_use]
    pub fn with_contact(
        mut self,
        contact_definition_id: impl Into<Id>,
        select_contact: impl Into<String>,
    ) -> Self {
        self.contact_definition_id = Some(contact_definition_id.into());
        self.select_contact = Some(select_contact.into());
        self
    }
}

/// Changes applied through [`Item::update`](crate::models::Item::update).
///
/// The item id and definition id default to the item's own.
#[derive(Debug, Clone, Serialize)]
pub struct ItemUpdate {
    /// Item field payload.
    pub item_fields: Value,
    /// Overrides the item id.
    pub item_id: Option<Id>,
    /// Overrides the item definition id.
    pub item_definition_id: Option<Id>,
    /// People to assign to the item.
    pub assignees: Option<Vec<String>>,
    /// Userid/username of the submitter.
    pub submitter: Option<String>,
    /// Parameters not covered by the typed fields.
    #[serde(skip)]
    pub extra: Params,
}

impl ItemUpdate {
    /// Creates an update of `item_fields`.
    pub fn new(item_fields: Value) -> Self {
        Self {
            item_fields,
            item_id: None,
            item_definition_id: None,
            assignees: None,
            submitter: None,
            extra: Params::new(),
        }
    }

    /// Overrides the item id.
    #[must_use]
    pub fn with_item_id(mut self, item_id: impl Into<Id>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    /// Overrides the item definition id.
    #[must_use]
    pub fn with_item_definition_id(mut self, id: impl Into<Id>) -> Self {
        self.item_definition_id = Some(id.into());
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(
        mut self,
        assignees: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.assignees = Some(assignees.into_iter().map(Into::into).collect());
        self
    }
}
