//! Transport layer: Live Update wire-format details (form encoding and the
//! `;`-delimited response grammar).

mod blacklist;
mod contact;
mod form;
mod wire;

pub use blacklist::{
    encode_blacklist_add_form, encode_blacklist_remove_form, encode_blacklist_verify_form,
};
pub use contact::{
    encode_create_contact_form, encode_remove_contact_form, encode_update_contact_form,
};
pub use form::{append_query, merge_params, serialize_form};
pub use wire::{
    decode_wire_response, encode_wire_response, local_error, synthesize_error_body,
    synthesize_local,
};
