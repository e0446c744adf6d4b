use std::fmt;

use serde::Serialize;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Live Update connection id issued by SMSLink.
///
/// Invariant: non-empty after trimming.
pub struct ConnectionId(String);

impl ConnectionId {
    /// Parameter name used by Live Update (`connection_id`).
    pub const FIELD: &'static str = "connection_id";

    /// Create a validated [`ConnectionId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated connection id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Live Update password paired with a [`ConnectionId`].
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Parameter name used by Live Update (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number in the digits-only form expected by Live Update (`receiver_number`).
///
/// Invariant: non-empty and made of ASCII digits only.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parameter name used by Live Update (`receiver_number`).
    pub const FIELD: &'static str = "receiver_number";

    /// Canonicalize a human-entered number: every `+` becomes `00`, then every
    /// character that is not an ASCII digit is dropped.
    ///
    /// There is no length or checksum validation and the result may be empty.
    pub fn normalize(input: &str) -> String {
        input
            .replace('+', "00")
            .chars()
            .filter(char::is_ascii_digit)
            .collect()
    }

    /// Normalize `input` and reject it if nothing is left.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        let input = input.as_ref();
        let normalized = Self::normalize(input);
        if normalized.is_empty() {
            return Err(ValidationError::InvalidPhoneNumber {
                input: input.to_owned(),
            });
        }
        Ok(Self(normalized))
    }

    /// Borrow the normalized digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
/// Contact group identifier (`group_id`).
///
/// `0` is reserved: for update and remove it targets every group of the account,
/// while contact creation rejects it.
pub struct GroupId(u32);

impl GroupId {
    /// Parameter name used by Live Update (`group_id`).
    pub const FIELD: &'static str = "group_id";

    /// Wildcard id addressing all groups.
    pub const ALL: Self = Self(0);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Returns `true` for the [`GroupId::ALL`] wildcard.
    pub fn is_all(self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for GroupId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// Identifier of one of the account's messaging services.
///
/// This value is preserved as-is even when unknown to this crate.
pub struct ServiceId(u32);

impl ServiceId {
    /// Parameter name used by Live Update (`service_ids`), sent comma-joined.
    pub const FIELD: &'static str = "service_ids";

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Map this id to a known service, if one exists.
    pub fn known(self) -> Option<KnownService> {
        KnownService::from_id(self.0)
    }
}

impl From<u32> for ServiceId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<KnownService> for ServiceId {
    fn from(value: KnownService) -> Self {
        Self(value.id())
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// SMSLink services a number can be blacklisted for.
pub enum KnownService {
    SmsMarketing,
    MailToSms,
    GatewayHttp,
    Alerts,
    TwoWaySms,
    Connectors,
    GatewayBulk,
    GatewaySoap,
    GatewayJson,
}

impl KnownService {
    pub fn from_id(id: u32) -> Option<Self> {
        Some(match id {
            1 => Self::SmsMarketing,
            2 => Self::MailToSms,
            3 => Self::GatewayHttp,
            4 => Self::Alerts,
            5 => Self::TwoWaySms,
            7 => Self::Connectors,
            9 => Self::GatewayBulk,
            10 => Self::GatewaySoap,
            11 => Self::GatewayJson,
            _ => return None,
        })
    }

    pub fn id(self) -> u32 {
        match self {
            Self::SmsMarketing => 1,
            Self::MailToSms => 2,
            Self::GatewayHttp => 3,
            Self::Alerts => 4,
            Self::TwoWaySms => 5,
            Self::Connectors => 7,
            Self::GatewayBulk => 9,
            Self::GatewaySoap => 10,
            Self::GatewayJson => 11,
        }
    }

    /// Service name as shown in the SMSLink dashboard.
    pub fn name(self) -> &'static str {
        match self {
            Self::SmsMarketing => "SMS Marketing",
            Self::MailToSms => "Mail to SMS",
            Self::GatewayHttp => "SMS Gateway (HTTP)",
            Self::Alerts => "SMS Alerts",
            Self::TwoWaySms => "2-Way SMS",
            Self::Connectors => "SMS Connectors",
            Self::GatewayBulk => "SMS Gateway (BULK)",
            Self::GatewaySoap => "SMS Gateway (SOAP)",
            Self::GatewayJson => "SMS Gateway (JSON)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_newtypes_trim_or_validate() {
        let id = ConnectionId::new("  conn ").unwrap();
        assert_eq!(id.as_str(), "conn");
        assert!(ConnectionId::new("  ").is_err());

        let password = Password::new(" secret ").unwrap();
        assert_eq!(password.as_str(), " secret ");
        assert!(Password::new("").is_err());
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
    }

    #[test]
    fn normalize_turns_plus_into_double_zero() {
        assert_eq!(PhoneNumber::normalize("+40712345678"), "0040712345678");
        assert_eq!(PhoneNumber::normalize("+407xyzzzzzz"), "00407");
    }

    #[test]
    fn normalize_strips_non_digits() {
        assert_eq!(PhoneNumber::normalize("07x-y z"), "07");
        assert_eq!(PhoneNumber::normalize("(0721) 234.567"), "0721234567");
        assert_eq!(PhoneNumber::normalize("abcd"), "");
        assert_eq!(PhoneNumber::normalize(""), "");
    }

    #[test]
    fn normalize_drops_non_ascii_digits() {
        assert_eq!(PhoneNumber::normalize("07٣1"), "071");
    }

    #[test]
    fn phone_number_rejects_empty_after_normalization() {
        let pn = PhoneNumber::new(" 0721 234 567 ").unwrap();
        assert_eq!(pn.as_str(), "0721234567");
        assert_eq!(
            PhoneNumber::new("abcd"),
            Err(ValidationError::InvalidPhoneNumber {
                input: "abcd".to_owned()
            })
        );
    }

    #[test]
    fn group_id_zero_is_wildcard() {
        assert!(GroupId::ALL.is_all());
        assert!(GroupId::default().is_all());
        assert!(!GroupId::new(54321).is_all());
        assert_eq!(GroupId::from(7).as_u32(), 7);
    }

    #[test]
    fn service_ids_map_to_known_services() {
        assert_eq!(ServiceId::new(1).known(), Some(KnownService::SmsMarketing));
        assert_eq!(ServiceId::new(11).known(), Some(KnownService::GatewayJson));
        assert_eq!(ServiceId::new(6).known(), None);
        assert_eq!(ServiceId::from(KnownService::TwoWaySms).as_u32(), 5);
        assert_eq!(KnownService::GatewayBulk.name(), "SMS Gateway (BULK)");
    }

    #[test]
    fn known_service_ids_round_trip() {
        for id in 0..16 {
            if let Some(service) = KnownService::from_id(id) {
                assert_eq!(service.id(), id);
            }
        }
    }
}
