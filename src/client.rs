//! The FootPrints client.
//!
//! [`Footprints`] exposes every supported operation as a method taking its
//! typed input from [`crate::inputs`]. Operations that create, edit or link
//! records return the resulting identifier; lookups return decoded records
//! or the typed [`Ticket`] and [`Item`] wrappers.
//!
//! # Example
//!
//! ```ignore
//! use footprints::{Config, Footprints};
//! use footprints::inputs::{CreateTicketInput, GetTicketInput};
//! use serde_json::json;
//!
//! let client = Footprints::connect(&Config::from_env()?).await?;
//!
//! let id = client
//!     .create_ticket(CreateTicketInput::new(76, json!({"itemFields": []})))
//!     .await?;
//! let ticket = client.get_ticket(GetTicketInput::new(76, id.parse::<i64>()?)).await?;
//! println!("{}", ticket);
//! ```

use serde_json::Value;

use crate::config::Config;
use crate::error::Result;
use crate::inputs::*;
use crate::models::{identifier, Item, Ticket};
use crate::operation::ResultShape;
use crate::requester::Requester;
use crate::Params;

/// Client for the FootPrints SOAP API.
#[derive(Debug)]
pub struct Footprints {
    requester: Requester,
}

impl Footprints {
    /// Connects using `config`: loads the service description and prepares
    /// the HTTP transport.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the credentials are rejected
    /// - `BadRequest` for any other HTTP failure loading the description
    /// - `ResourceDoesNotExist` if the server cannot be reached
    /// - `FootprintsError::Config` / `FootprintsError::HttpClient` for local
    ///   setup failures
    pub async fn connect(config: &Config) -> Result<Self> {
        Ok(Self::with_requester(Requester::connect(config).await?))
    }

    /// Creates a client over an existing requester.
    pub fn with_requester(requester: Requester) -> Self {
        Self { requester }
    }

    /// The underlying requester.
    pub fn requester(&self) -> &Requester {
        &self.requester
    }

    /// The most recent responses, newest first.
    pub fn history(&self) -> Vec<Value> {
        self.requester.history()
    }

    /// Invokes an operation by its wire name with untyped parameters.
    ///
    /// # Errors
    ///
    /// See [`Requester::request`].
    pub async fn request(&self, method_name: &str, params: Params, extra: Params) -> Result<Value> {
        self.requester.request(method_name, params, extra).await
    }

    async fn call<I: OperationInput>(&self, input: &I) -> Result<Value> {
        self.requester
            .dispatch(I::OPERATION, input.to_params()?, input.extra().clone())
            .await
    }

    async fn call_for_details<I: OperationInput>(&self, input: &I) -> Result<Value> {
        expect_shape::<I>(ResultShape::Details);
        self.call(input).await
    }

    async fn call_for_id<I: OperationInput>(&self, input: &I) -> Result<String> {
        expect_shape::<I>(ResultShape::Identifier);
        identifier(&self.call(input).await?)
    }

    async fn call_for_list<I: OperationInput>(&self, input: &I) -> Result<Vec<Value>> {
        expect_shape::<I>(ResultShape::List);
        Ok(into_list(self.call(input).await?))
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Creates a configuration item. Calls `createCI`.
    pub async fn create_ci(&self, input: CreateCiInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Creates an address book contact. Calls `createContact`.
    pub async fn create_contact(&self, input: CreateContactInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Creates an item. Calls `createItem`.
    pub async fn create_item(&self, input: CreateItemInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Creates a contact, or edits it when a contact id is given.
    /// Calls `createOrEditContact`.
    pub async fn create_or_edit_contact(&self, input: CreateOrEditContactInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Creates a ticket and returns its item id. Calls `createTicket`.
    pub async fn create_ticket(&self, input: CreateTicketInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Creates a ticket and links assets to it. Calls `createTicketAndLinkAssets`.
    pub async fn create_ticket_and_link_assets(
        &self,
        input: CreateTicketAndLinkAssetsInput,
    ) -> Result<String> {
        self.call_for_id(&input).await
    }

    // =========================================================================
    // Updates
    // =========================================================================

    /// Edits a configuration item. Calls `editCI`.
    pub async fn update_ci(&self, input: UpdateCiInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Edits a contact. Calls `editContact`.
    pub async fn update_contact(&self, input: UpdateContactInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Edits an item. Calls `editItem`.
    pub async fn update_item(&self, input: UpdateItemInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Edits a ticket. Calls `editTicket`.
    pub async fn update_ticket(&self, input: UpdateTicketInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Lists the tickets associated with a contact.
    /// Calls `getContactAssociatedTickets`.
    pub async fn get_contact_associated_tickets(
        &self,
        input: GetContactAssociatedTicketsInput,
    ) -> Result<Vec<Value>> {
        self.call_for_list(&input).await
    }

    /// Returns the raw details of an item. Calls `getItemDetails`.
    pub async fn get_item_details(&self, input: GetItemDetailsInput) -> Result<Value> {
        self.call_for_details(&input).await
    }

    /// Returns an item. Calls `getItemDetails`.
    pub async fn get_item(&self, input: GetItemDetailsInput) -> Result<Item<'_>> {
        let payload = self.call_for_details(&input).await?;
        Item::new(&self.requester, payload)
    }

    /// Resolves an item number to an item id. Calls `getItemId`.
    pub async fn get_item_id(&self, input: GetItemIdInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Returns a ticket. Calls `getTicketDetails`.
    ///
    /// A textual item id is taken as the ticket's item number and resolved
    /// through `getItemId` first.
    pub async fn get_ticket(&self, mut input: GetTicketInput) -> Result<Ticket<'_>> {
        if let Id::Text(number) = &input.item_id {
            let mut lookup = GetItemIdInput::new(input.item_definition_id.clone(), number.clone());
            lookup.submitter = input.submitter.clone();

            let resolved = self.get_item_id(lookup).await?;
            tracing::debug!(item_number = %number, item_id = %resolved, "Resolved item number");
            input.item_id = Id::Text(resolved);
        }

        let payload = self.call_for_details(&input).await?;
        Ticket::new(&self.requester, payload)
    }

    // =========================================================================
    // Links
    // =========================================================================

    /// Links two items. Calls `linkItems`.
    pub async fn link_items(&self, input: LinkItemsInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    /// Links two tickets. Calls `linkTickets`.
    pub async fn link_tickets(&self, input: LinkTicketsInput) -> Result<String> {
        self.call_for_id(&input).await
    }

    // =========================================================================
    // Definitions and searches
    // =========================================================================

    /// Lists container definitions (workspaces, address books, CMDBs).
    /// Calls `listContainerDefinitions`.
    pub async fn get_container_definitions(
        &self,
        input: ListContainerDefinitionsInput,
    ) -> Result<Vec<Value>> {
        self.call_for_list(&input).await
    }

    /// Lists the field definitions of an item definition.
    /// Calls `listFieldDefinitions`.
    pub async fn get_field_definitions(
        &self,
        input: ListFieldDefinitionsInput,
    ) -> Result<Vec<Value>> {
        self.call_for_list(&input).await
    }

    /// Lists the item definitions of a container.
    /// Calls `listItemDefinitions`.
    pub async fn get_item_definitions(
        &self,
        input: ListItemDefinitionsInput,
    ) -> Result<Vec<Value>> {
        self.call_for_list(&input).await
    }

    /// Lists the quick templates of an item definition.
    /// Calls `listQuickTemplates`.
    pub async fn get_quick_templates(&self, input: ListQuickTemplatesInput) -> Result<Vec<Value>> {
        self.call_for_list(&input).await
    }

    /// Lists saved searches. Calls `listSearches`.
    pub async fn get_searches(&self, input: ListSearchesInput) -> Result<Vec<Value>> {
        self.call_for_list(&input).await
    }

    /// Runs a saved search. Calls `runSearch`.
    pub async fn get_search(&self, input: RunSearchInput) -> Result<Vec<Value>> {
        self.call_for_list(&input).await
    }
}

/// The conversion a method applies must match the operation table.
fn expect_shape<I: OperationInput>(shape: ResultShape) {
    debug_assert_eq!(
        I::OPERATION.result_shape(),
        shape,
        "{} is not converted as its table entry says",
        I::OPERATION
    );
}

/// Normalizes a list result: a single record decodes as a bare object and
/// an empty list as `null`.
fn into_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => vec![other],
    }
}
