//! Client layer: owns configuration, dispatches requests, and keeps the audit log.

mod http;
mod log;

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{
    BlacklistAdd, BlacklistCheck, BlacklistRemove, BlacklistVerify, ConnectionId, CreateContact,
    LiveUpdateResponse, Operation, Password, Protocol, RemoveContact, TransportMode,
    UpdateContact, ValidationError,
};
use crate::transport::{decode_wire_response, encode_wire_response, local_error, merge_params};

pub use log::{AuditEntry, AuditLog, AuditTarget};

use self::http::{BoxError, HttpTransport, ReqwestTransport};

const DEFAULT_HTTP_ENDPOINT: &str = "http://www.smslink.ro/sms/marketing/communicate/index.php";
const DEFAULT_HTTPS_ENDPOINT: &str =
    "https://secure.smslink.ro/sms/marketing/communicate/index.php";

/// Environment variable read by [`Credentials::from_env`] for the connection id.
pub const CONNECTION_ID_ENV: &str = "SMSLINK_CONNECTION_ID";
/// Environment variable read by [`Credentials::from_env`] for the password.
pub const PASSWORD_ENV: &str = "SMSLINK_PASSWORD";

#[derive(Debug, Clone)]
/// Live Update credentials, sent with every request.
///
/// Generate them in the SMSLink account under SMS Marketing / Live Update.
pub struct Credentials {
    connection_id: ConnectionId,
    password: Password,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        connection_id: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            connection_id: ConnectionId::new(connection_id)?,
            password: Password::new(password)?,
        })
    }

    /// Read credentials from `SMSLINK_CONNECTION_ID` and `SMSLINK_PASSWORD`.
    pub fn from_env() -> Result<Self, LiveUpdateError> {
        let connection_id = env_var(CONNECTION_ID_ENV)?;
        let password = env_var(PASSWORD_ENV)?;
        Ok(Self::new(connection_id, password)?)
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    fn form_params(&self) -> Vec<(String, String)> {
        vec![
            (
                ConnectionId::FIELD.to_owned(),
                self.connection_id.as_str().to_owned(),
            ),
            (Password::FIELD.to_owned(), self.password.as_str().to_owned()),
        ]
    }
}

fn env_var(var: &'static str) -> Result<String, LiveUpdateError> {
    std::env::var(var).map_err(|_| LiveUpdateError::MissingEnvironment { var })
}

#[derive(Debug, thiserror::Error)]
/// Errors raised while configuring a [`LiveUpdateClient`].
///
/// Operations themselves never fail; they report problems inside
/// [`LiveUpdateResponse`].
pub enum LiveUpdateError {
    /// The underlying HTTP client could not be built (TLS backend, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// A required environment variable is not set or not valid unicode.
    #[error("environment variable {var} is required")]
    MissingEnvironment { var: &'static str },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`LiveUpdateClient`].
///
/// Use this when you need to customize endpoints, timeout, user-agent, or TLS policy.
pub struct LiveUpdateClientBuilder {
    credentials: Credentials,
    protocol: Protocol,
    transport_mode: TransportMode,
    http_endpoint: String,
    https_endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    accept_invalid_certs: bool,
}

impl LiveUpdateClientBuilder {
    /// Create a builder with the default endpoints, HTTPS, and query GET.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            protocol: Protocol::default(),
            transport_mode: TransportMode::default(),
            http_endpoint: DEFAULT_HTTP_ENDPOINT.to_owned(),
            https_endpoint: DEFAULT_HTTPS_ENDPOINT.to_owned(),
            timeout: None,
            user_agent: None,
            accept_invalid_certs: false,
        }
    }

    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn transport_mode(mut self, mode: TransportMode) -> Self {
        self.transport_mode = mode;
        self
    }

    /// Override the endpoint used when the protocol is [`Protocol::Http`].
    pub fn http_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.http_endpoint = endpoint.into();
        self
    }

    /// Override the endpoint used when the protocol is [`Protocol::Https`].
    pub fn https_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.https_endpoint = endpoint.into();
        self
    }

    /// Set a timeout for the whole request.
    ///
    /// Applies to [`TransportMode::QueryGet`] and [`TransportMode::BodyPost`];
    /// [`TransportMode::SimpleFetch`] always uses the client defaults.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Skip TLS certificate and hostname verification for GET and POST modes.
    ///
    /// This reproduces the legacy Live Update integration and exposes the
    /// credentials to anyone able to intercept the connection. Off by default.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Build a [`LiveUpdateClient`].
    pub fn build(self) -> Result<LiveUpdateClient, LiveUpdateError> {
        let transport = self.transport()?;
        Ok(LiveUpdateClient {
            credentials: self.credentials,
            protocol: self.protocol,
            transport_mode: self.transport_mode,
            http_endpoint: self.http_endpoint,
            https_endpoint: self.https_endpoint,
            http: Arc::new(transport),
            log: AuditLog::default(),
        })
    }

    fn is_customized(&self) -> bool {
        self.timeout.is_some() || self.user_agent.is_some() || self.accept_invalid_certs
    }

    fn transport(&self) -> Result<ReqwestTransport, LiveUpdateError> {
        if !self.is_customized() {
            return Ok(default_transport());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|err| LiveUpdateError::Transport(Box::new(err)))?;
        let plain = reqwest::Client::builder()
            .build()
            .map_err(|err| LiveUpdateError::Transport(Box::new(err)))?;
        Ok(ReqwestTransport::split(client, plain))
    }
}

fn default_transport() -> ReqwestTransport {
    ReqwestTransport::shared(reqwest::Client::new())
}

#[derive(Clone)]
/// High-level SMSLink Live Update client.
///
/// Each operation normalizes the phone number, validates its inputs, and sends
/// exactly one request (none if validation fails). Operations never return an
/// error: transport failures and rejected inputs come back as a
/// [`LiveUpdateResponse`] with category `ERROR` and code `0`. Every call appends
/// one entry to [`LiveUpdateClient::audit_log`].
///
/// By default requests go to the HTTPS endpoint as a query-string GET with
/// verified TLS.
pub struct LiveUpdateClient {
    credentials: Credentials,
    protocol: Protocol,
    transport_mode: TransportMode,
    http_endpoint: String,
    https_endpoint: String,
    http: Arc<dyn HttpTransport>,
    log: AuditLog,
}

impl LiveUpdateClient {
    /// Create a client with the default settings.
    ///
    /// For more customization, use [`LiveUpdateClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            protocol: Protocol::default(),
            transport_mode: TransportMode::default(),
            http_endpoint: DEFAULT_HTTP_ENDPOINT.to_owned(),
            https_endpoint: DEFAULT_HTTPS_ENDPOINT.to_owned(),
            http: Arc::new(default_transport()),
            log: AuditLog::default(),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> LiveUpdateClientBuilder {
        LiveUpdateClientBuilder::new(credentials)
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Switch protocol by name (`HTTP` or `HTTPS`, any case).
    ///
    /// Returns `false` and keeps the current protocol for any other name.
    pub fn set_protocol(&mut self, name: &str) -> bool {
        match name.parse::<Protocol>() {
            Ok(protocol) => {
                self.protocol = protocol;
                true
            }
            Err(_) => false,
        }
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn set_transport_mode(&mut self, mode: TransportMode) {
        self.transport_mode = mode;
    }

    /// Switch transport mode by name, see [`TransportMode`]'s `FromStr`.
    ///
    /// Returns `false` and keeps the current mode for an unknown name.
    pub fn set_transport_mode_name(&mut self, name: &str) -> bool {
        match name.parse::<TransportMode>() {
            Ok(mode) => {
                self.transport_mode = mode;
                true
            }
            Err(_) => false,
        }
    }

    /// Switch transport mode by legacy code (1 = GET, 2 = POST, 3 = simple fetch).
    ///
    /// Returns `false` and keeps the current mode for any other code.
    pub fn set_transport_mode_code(&mut self, code: u8) -> bool {
        match TransportMode::try_from(code) {
            Ok(mode) => {
                self.transport_mode = mode;
                true
            }
            Err(_) => false,
        }
    }

    /// Base URL selected by the current protocol.
    pub fn endpoint(&self) -> &str {
        match self.protocol {
            Protocol::Http => &self.http_endpoint,
            Protocol::Https => &self.https_endpoint,
        }
    }

    /// Every request handled so far, oldest first.
    pub fn audit_log(&self) -> &AuditLog {
        &self.log
    }

    pub fn last_audit_entry(&self) -> Option<&AuditEntry> {
        self.log.last()
    }

    /// Add a phone number to the blacklist.
    ///
    /// Known remote codes: `ERROR` 14 when the number is already blacklisted.
    pub async fn blacklist_add(&mut self, request: BlacklistAdd) -> LiveUpdateResponse {
        let form = crate::transport::encode_blacklist_add_form(&request);
        self.dispatch(Operation::BlacklistAdd, form).await
    }

    /// Remove a phone number from the blacklist.
    ///
    /// Known remote codes: `ERROR` 12 when the number is not blacklisted.
    pub async fn blacklist_remove(&mut self, request: BlacklistRemove) -> LiveUpdateResponse {
        let form = crate::transport::encode_blacklist_remove_form(&request);
        self.dispatch(Operation::BlacklistRemove, form).await
    }

    /// Check whether a phone number is blacklisted.
    ///
    /// `MESSAGE` 12 (all services) and 13 (services listed in the params) mean
    /// blacklisted, 14 means not blacklisted. Any other outcome sets
    /// [`BlacklistCheck::is_request_error`].
    pub async fn is_blacklisted(&mut self, request: BlacklistVerify) -> BlacklistCheck {
        let form = crate::transport::encode_blacklist_verify_form(&request);
        let response = self.dispatch(Operation::BlacklistVerify, form).await;
        BlacklistCheck::from_response(response)
    }

    /// Create a contact in a group. Group `0` is rejected locally.
    pub async fn create_contact(&mut self, request: CreateContact) -> LiveUpdateResponse {
        let form = crate::transport::encode_create_contact_form(&request);
        self.dispatch(Operation::ContactCreate, form).await
    }

    /// Update a contact in one group or in all of them.
    pub async fn update_contact(&mut self, request: UpdateContact) -> LiveUpdateResponse {
        let form = crate::transport::encode_update_contact_form(&request);
        self.dispatch(Operation::ContactUpdate, form).await
    }

    /// Remove a contact from one group or from all of them.
    pub async fn remove_contact(&mut self, request: RemoveContact) -> LiveUpdateResponse {
        let form = crate::transport::encode_remove_contact_form(&request);
        self.dispatch(Operation::ContactRemove, form).await
    }

    async fn dispatch(
        &mut self,
        operation: Operation,
        form: Result<Vec<(String, String)>, ValidationError>,
    ) -> LiveUpdateResponse {
        let params = match form {
            Ok(params) => params,
            Err(err) => return self.reject(operation, &err),
        };

        let mode = self.transport_mode;
        let url = self.endpoint().to_owned();
        let params = merge_params(self.credentials.form_params(), params);
        debug!(
            operation = %operation,
            mode = %mode,
            protocol = %self.protocol,
            "sending Live Update request"
        );

        let exchange = http::execute(self.http.as_ref(), mode, &url, params).await;
        let response = decode_wire_response(&exchange.raw);
        self.log.push(AuditEntry::sent(
            mode,
            exchange.url,
            exchange.body,
            exchange.raw,
        ));

        debug!(
            operation = %operation,
            category = %response.category,
            code = response.code.as_i32(),
            "Live Update response"
        );
        response
    }

    fn reject(&mut self, operation: Operation, err: &ValidationError) -> LiveUpdateResponse {
        warn!(operation = %operation, error = %err, "request rejected before sending");
        let response = local_error(&format!("Error thrown in {operation}: {err}"));
        self.log
            .push(AuditEntry::rejected(operation, encode_wire_response(&response)));
        response
    }
}
