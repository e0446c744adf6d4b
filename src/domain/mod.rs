//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    BlacklistAdd, BlacklistRemove, BlacklistVerify, CONTACT_VARIABLES_MAX, ContactVariables,
    CreateContact, DuplicateScope, Operation, Protocol, RemoveContact, TransportMode,
    UpdateContact,
};
pub use response::{
    BlacklistCheck, CATEGORY_ERROR, CATEGORY_MESSAGE, KnownResponseCode, LiveUpdateResponse,
    ResponseCode,
};
pub use validation::ValidationError;
pub use value::{ConnectionId, GroupId, KnownService, Password, PhoneNumber, ServiceId};
