use serde::Serialize;

use crate::domain::request::Operation;
use crate::domain::value::ServiceId;

/// Category token the service uses for successful requests.
pub const CATEGORY_MESSAGE: &str = "MESSAGE";
/// Category token used for failures, including locally synthesized ones.
pub const CATEGORY_ERROR: &str = "ERROR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Structured form of a `CATEGORY;CODE;MESSAGE;PARAM1,PARAM2` response.
///
/// `status` is `true` iff `category == "MESSAGE"` for responses parsed from the
/// wire; locally synthesized responses carry whatever status they were built with.
pub struct LiveUpdateResponse {
    pub status: bool,
    pub category: String,
    pub code: ResponseCode,
    pub message: String,
    pub params: Vec<String>,
}

impl LiveUpdateResponse {
    /// Look up the documented meaning of [`Self::code`] for `operation`.
    pub fn known_code(&self, operation: Operation) -> Option<KnownResponseCode> {
        self.code.known(operation)
    }

    /// Returns `true` when the category is `ERROR`.
    pub fn is_error(&self) -> bool {
        self.category == CATEGORY_ERROR
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Result of `blacklist-verify` with the blacklist verdict already derived.
pub struct BlacklistCheck {
    pub is_request_error: bool,
    pub is_blacklisted: bool,
    #[serde(flatten)]
    pub response: LiveUpdateResponse,
}

impl BlacklistCheck {
    /// Derive the verdict: codes 12 and 13 mean blacklisted, 14 means not
    /// blacklisted, anything else (or a failed request) is a request error.
    pub fn from_response(response: LiveUpdateResponse) -> Self {
        let (is_request_error, is_blacklisted) = if !response.status {
            (true, false)
        } else {
            match response.code.as_i32() {
                12 | 13 => (false, true),
                14 => (false, false),
                _ => (true, false),
            }
        };
        Self {
            is_request_error,
            is_blacklisted,
            response,
        }
    }

    /// Services the number is blacklisted for when the response lists them
    /// (code 13). Params that are not numeric ids are skipped.
    pub fn services(&self) -> Vec<ServiceId> {
        self.response
            .params
            .iter()
            .filter_map(|param| param.trim().parse::<u32>().ok())
            .map(ServiceId::new)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
/// Response code returned by Live Update.
///
/// This value is preserved as-is even when unknown to this crate. The same
/// number means different things for different operations, see [`Self::known`].
pub struct ResponseCode(i32);

impl ResponseCode {
    /// Construct a response code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Live Update.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a documented meaning for `operation`, if one exists.
    pub fn known(self, operation: Operation) -> Option<KnownResponseCode> {
        KnownResponseCode::from_code(operation, self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Documented Live Update response codes.
///
/// The client never branches on these except for `blacklist-verify`; they are
/// offered so callers can render or react to remote errors.
pub enum KnownResponseCode {
    AlreadyBlacklisted,
    NotBlacklisted,
    BlacklistedForAllServices,
    BlacklistedForSomeServices,
    GroupPermissionDenied,
    InvalidGroup,
    DuplicateInGroup,
    DuplicateInAccount,
    ContactNotFound,
    NothingToUpdate,
    MethodNotPermitted,
}

impl KnownResponseCode {
    pub fn from_code(operation: Operation, code: i32) -> Option<Self> {
        use Operation::*;

        Some(match (operation, code) {
            (BlacklistAdd, 14) => Self::AlreadyBlacklisted,
            (BlacklistRemove, 12) => Self::NotBlacklisted,
            (BlacklistVerify, 12) => Self::BlacklistedForAllServices,
            (BlacklistVerify, 13) => Self::BlacklistedForSomeServices,
            (BlacklistVerify, 14) => Self::NotBlacklisted,
            (ContactCreate, 10) => Self::GroupPermissionDenied,
            (ContactCreate, 15) => Self::DuplicateInGroup,
            (ContactCreate, 22) => Self::DuplicateInAccount,
            (ContactUpdate, 24) => Self::GroupPermissionDenied,
            (ContactUpdate, 25) => Self::ContactNotFound,
            (ContactUpdate, 26) => Self::NothingToUpdate,
            (ContactRemove, 13) => Self::GroupPermissionDenied,
            (ContactRemove, 17) => Self::InvalidGroup,
            (ContactRemove, 32 | 33) => Self::ContactNotFound,
            (ContactCreate | ContactUpdate | ContactRemove, 30) => Self::MethodNotPermitted,
            _ => return None,
        })
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::AlreadyBlacklisted => "phone number is already blacklisted",
            Self::NotBlacklisted => "phone number is not blacklisted",
            Self::BlacklistedForAllServices => "phone number is blacklisted for all services",
            Self::BlacklistedForSomeServices => {
                "phone number is blacklisted for the listed services"
            }
            Self::GroupPermissionDenied => "permission denied for the specified group",
            Self::InvalidGroup => "invalid group",
            Self::DuplicateInGroup => "phone number already exists in the specified group",
            Self::DuplicateInAccount => "phone number already exists in the account groups",
            Self::ContactNotFound => "phone number not found",
            Self::NothingToUpdate => "no data passed for updating",
            Self::MethodNotPermitted => "Live Update method not permitted for this connection",
        }
    }
}
