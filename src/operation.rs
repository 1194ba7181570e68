//! The FootPrints operation table.
//!
//! Every wire operation the client can invoke is listed here once. Both
//! name validation and dispatch go through [`Operation`], so an operation
//! missing from this table can never reach the network.

use std::fmt;
use std::str::FromStr;

use crate::error::FootprintsError;

/// What an operation returns on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// A single identifier (ticket id, contact id, link id).
    Identifier,
    /// A record payload.
    Details,
    /// A list of records.
    List,
}

macro_rules! operations {
    ($($variant:ident => $wire:literal, $shape:ident;)+) => {
        /// A SOAP operation exposed by the FootPrints service.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Operation {
            $(
                #[doc = concat!("`", $wire, "`")]
                $variant,
            )+
        }

        impl Operation {
            /// Every supported operation, in wire-name order.
            pub const ALL: &'static [Operation] = &[$(Operation::$variant),+];

            /// The operation name as it appears on the wire.
            #[must_use]
            pub fn wire_name(self) -> &'static str {
                match self {
                    $(Operation::$variant => $wire,)+
                }
            }

            /// The shape of a successful result.
            #[must_use]
            pub fn result_shape(self) -> ResultShape {
                match self {
                    $(Operation::$variant => ResultShape::$shape,)+
                }
            }
        }
    };
}

operations! {
    CreateCi => "createCI", Identifier;
    CreateContact => "createContact", Identifier;
    CreateItem => "createItem", Identifier;
    CreateOrEditContact => "createOrEditContact", Identifier;
    CreateTicket => "createTicket", Identifier;
    CreateTicketAndLinkAssets => "createTicketAndLinkAssets", Identifier;
    EditCi => "editCI", Identifier;
    EditContact => "editContact", Identifier;
    EditItem => "editItem", Identifier;
    EditTicket => "editTicket", Identifier;
    GetContactAssociatedTickets => "getContactAssociatedTickets", List;
    GetItemDetails => "getItemDetails", Details;
    GetItemId => "getItemId", Identifier;
    GetTicketDetails => "getTicketDetails", Details;
    LinkItems => "linkItems", Identifier;
    LinkTickets => "linkTickets", Identifier;
    ListContainerDefinitions => "listContainerDefinitions", List;
    ListFieldDefinitions => "listFieldDefinitions", List;
    ListItemDefinitions => "listItemDefinitions", List;
    ListQuickTemplates => "listQuickTemplates", List;
    ListSearches => "listSearches", List;
    RunSearch => "runSearch", List;
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for Operation {
    type Err = FootprintsError;

    /// Looks an operation up by its exact wire name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.wire_name() == s)
            .ok_or_else(|| FootprintsError::invalid_argument("Unsupported method."))
    }
}
