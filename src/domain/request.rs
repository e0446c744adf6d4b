use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ValidationError;
use crate::domain::value::{GroupId, ServiceId};

/// Maximum number of named variables a contact can carry.
pub const CONTACT_VARIABLES_MAX: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Live Update operation, sent as the `mode` parameter.
pub enum Operation {
    BlacklistAdd,
    BlacklistRemove,
    BlacklistVerify,
    ContactCreate,
    ContactUpdate,
    ContactRemove,
}

impl Operation {
    /// Parameter name used by Live Update (`mode`).
    pub const FIELD: &'static str = "mode";

    /// Wire value of the `mode` parameter.
    pub fn mode(self) -> &'static str {
        match self {
            Self::BlacklistAdd => "blacklist-add",
            Self::BlacklistRemove => "blacklist-remove",
            Self::BlacklistVerify => "blacklist-verify",
            Self::ContactCreate => "receiver-add",
            Self::ContactUpdate => "receiver-update",
            Self::ContactRemove => "receiver-remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Which of the two Live Update endpoints requests go to.
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("HTTP"),
            Self::Https => f.write_str("HTTPS"),
        }
    }
}

impl FromStr for Protocol {
    type Err = ValidationError;

    /// Accepts `HTTP` or `HTTPS` in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("https") {
            Ok(Self::Https)
        } else if s.eq_ignore_ascii_case("http") {
            Ok(Self::Http)
        } else {
            Err(ValidationError::UnknownProtocol {
                input: s.to_owned(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// How a request is carried to the endpoint.
pub enum TransportMode {
    /// Parameters in the URL query string, HTTP GET.
    #[default]
    QueryGet,
    /// Parameters as an `application/x-www-form-urlencoded` body, HTTP POST.
    BodyPost,
    /// Plain GET with default client settings: no TLS override, no timeout.
    SimpleFetch,
}

impl TransportMode {
    /// Human-readable label used in the audit log.
    pub fn label(self) -> &'static str {
        match self {
            Self::QueryGet => "HTTP GET",
            Self::BodyPost => "HTTP POST",
            Self::SimpleFetch => "simple fetch",
        }
    }

    /// Legacy numeric code (1 = GET, 2 = POST, 3 = simple fetch).
    pub fn code(self) -> u8 {
        match self {
            Self::QueryGet => 1,
            Self::BodyPost => 2,
            Self::SimpleFetch => 3,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryGet => f.write_str("query-get"),
            Self::BodyPost => f.write_str("body-post"),
            Self::SimpleFetch => f.write_str("simple-fetch"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "query-get" | "get" => Ok(Self::QueryGet),
            "body-post" | "post" => Ok(Self::BodyPost),
            "simple-fetch" | "fetch" => Ok(Self::SimpleFetch),
            _ => Err(ValidationError::UnknownTransportMode {
                input: s.to_owned(),
            }),
        }
    }
}

impl TryFrom<u8> for TransportMode {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::QueryGet),
            2 => Ok(Self::BodyPost),
            3 => Ok(Self::SimpleFetch),
            other => Err(ValidationError::UnknownTransportMode {
                input: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Where the remote service looks for an existing contact with the same number.
pub enum DuplicateScope {
    /// Only inside the target group.
    #[default]
    Group,
    /// Across every group of the account.
    Account,
}

impl DuplicateScope {
    /// Parameter name used by Live Update (`duplicate_scope`).
    pub const FIELD: &'static str = "duplicate_scope";

    pub fn code(self) -> u8 {
        match self {
            Self::Group => 1,
            Self::Account => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Named free-form values attached to a contact, in insertion order.
///
/// Each entry is sent as its own top-level parameter. At most
/// [`CONTACT_VARIABLES_MAX`] entries are accepted when the request is sent.
pub struct ContactVariables(Vec<(String, String)>);

impl ContactVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing an earlier value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for ContactVariables
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (name, value) in iter {
            vars.insert(name, value);
        }
        vars
    }
}

#[derive(Debug, Clone)]
/// Add a phone number to the account blacklist (`blacklist-add`).
pub struct BlacklistAdd {
    phone: String,
    service_ids: Vec<ServiceId>,
    force_update: bool,
}

impl BlacklistAdd {
    /// Blacklist `phone` for every service, overwriting an existing entry.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            service_ids: Vec::new(),
            force_update: true,
        }
    }

    /// Restrict the entry to the given services. An empty list means all services.
    pub fn service_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ServiceId>,
    {
        self.service_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Whether an existing entry for the number is overwritten.
    pub fn force_update(mut self, force: bool) -> Self {
        self.force_update = force;
        self
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn services(&self) -> &[ServiceId] {
        &self.service_ids
    }

    pub fn is_forced(&self) -> bool {
        self.force_update
    }
}

#[derive(Debug, Clone)]
/// Remove a phone number from the account blacklist (`blacklist-remove`).
pub struct BlacklistRemove {
    phone: String,
}

impl BlacklistRemove {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

#[derive(Debug, Clone)]
/// Check whether a phone number is blacklisted (`blacklist-verify`).
pub struct BlacklistVerify {
    phone: String,
}

impl BlacklistVerify {
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
        }
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

#[derive(Debug, Clone)]
/// Create a contact inside a group (`receiver-add`).
pub struct CreateContact {
    phone: String,
    group: GroupId,
    name: Option<String>,
    variables: ContactVariables,
    allow_duplicate: bool,
    duplicate_scope: DuplicateScope,
}

impl CreateContact {
    /// Duplicates are rejected within the group unless configured otherwise.
    pub fn new(phone: impl Into<String>, group: impl Into<GroupId>) -> Self {
        Self {
            phone: phone.into(),
            group: group.into(),
            name: None,
            variables: ContactVariables::new(),
            allow_duplicate: false,
            duplicate_scope: DuplicateScope::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn variables(mut self, variables: ContactVariables) -> Self {
        self.variables = variables;
        self
    }

    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name, value);
        self
    }

    pub fn allow_duplicate(mut self, allow: bool) -> Self {
        self.allow_duplicate = allow;
        self
    }

    pub fn duplicate_scope(mut self, scope: DuplicateScope) -> Self {
        self.duplicate_scope = scope;
        self
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn full_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn contact_variables(&self) -> &ContactVariables {
        &self.variables
    }

    pub fn allows_duplicate(&self) -> bool {
        self.allow_duplicate
    }

    pub fn scope(&self) -> DuplicateScope {
        self.duplicate_scope
    }
}

#[derive(Debug, Clone)]
/// Update a contact in one group or, with [`GroupId::ALL`], in every group (`receiver-update`).
pub struct UpdateContact {
    phone: String,
    group: GroupId,
    name: Option<String>,
    variables: ContactVariables,
}

impl UpdateContact {
    /// Update the contact in every group of the account.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            group: GroupId::ALL,
            name: None,
            variables: ContactVariables::new(),
        }
    }

    pub fn group(mut self, group: impl Into<GroupId>) -> Self {
        self.group = group.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn variables(mut self, variables: ContactVariables) -> Self {
        self.variables = variables;
        self
    }

    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name, value);
        self
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn group_id(&self) -> GroupId {
        self.group
    }

    pub fn full_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn contact_variables(&self) -> &ContactVariables {
        &self.variables
    }
}

#[derive(Debug, Clone)]
/// Remove a contact from one group or, with [`GroupId::ALL`], from every group (`receiver-remove`).
pub struct RemoveContact {
    phone: String,
    group: GroupId,
}

impl RemoveContact {
    /// Remove the contact from every group of the account.
    pub fn new(phone: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            group: GroupId::ALL,
        }
    }

    pub fn group(mut self, group: impl Into<GroupId>) -> Self {
        self.group = group.into();
        self
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn group_id(&self) -> GroupId {
        self.group
    }
}
