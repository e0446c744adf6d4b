//! Typed Rust client for the SMSLink Live Update HTTP API.
//!
//! Live Update manages the account blacklist (add/remove/verify) and contacts
//! inside numbered groups (create/update/remove). The crate is split into a
//! domain layer of strong types, a transport layer for the `;`-delimited wire
//! format, and a small client layer that sends requests and keeps an audit log.
//!
//! ```rust,no_run
//! use smslink::{BlacklistAdd, Credentials, LiveUpdateClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smslink::LiveUpdateError> {
//!     let mut client = LiveUpdateClient::new(Credentials::new("connection-id", "password")?);
//!     let response = client.blacklist_add(BlacklistAdd::new("+40 721 234 567")).await;
//!     if !response.status {
//!         eprintln!("{} ({})", response.message, response.code.as_i32());
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    AuditEntry, AuditLog, AuditTarget, Credentials, LiveUpdateClient, LiveUpdateClientBuilder,
    LiveUpdateError,
};
pub use domain::{
    BlacklistAdd, BlacklistCheck, BlacklistRemove, BlacklistVerify, ConnectionId,
    ContactVariables, CreateContact, DuplicateScope, GroupId, KnownResponseCode, KnownService,
    LiveUpdateResponse, Operation, Password, PhoneNumber, Protocol, RemoveContact, ResponseCode,
    ServiceId, TransportMode, UpdateContact, ValidationError,
};
pub use transport::{decode_wire_response, encode_wire_response, synthesize_local};
