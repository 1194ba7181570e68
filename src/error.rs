//! Error types for the Footprints client.
//!
//! This module defines `FootprintsError`, the unified error type returned by
//! every public operation, and the taxonomy used to classify failures coming
//! back from the FootPrints service.
//!
//! Failures classified by the remote service (or by the transport talking to
//! it) travel as a [`ServiceError`]: a [`ServiceErrorKind`], a human-readable
//! message and a status code. Local validation failures (bad arguments,
//! missing configuration) are separate variants of `FootprintsError`;
//! [`FootprintsError::origin`] tells the two apart.
//!
//! # Security
//!
//! Error messages never contain the client secret. Use `sanitize_message()`
//! when building a message from text the server sent back.

use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// The classification labels of the service error taxonomy.
///
/// Status codes are used as labels that mirror HTTP semantics; they are not
/// necessarily the status the wire returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    /// Generic or uncategorized failure from the operation layer.
    FootprintsException,
    /// The target item definition is malformed or could not be resolved.
    ItemDefinitionDoesNotExist,
    /// The outbound request failed validation.
    BadRequest,
    /// The credentials were rejected.
    Unauthorized,
    /// The requested resource could not be located.
    ResourceDoesNotExist,
    /// A required field was absent in a local pre-check.
    RequiredFieldMissing,
    /// Access was denied, or a parameter value was rejected.
    Forbidden,
}

impl ServiceErrorKind {
    /// Status code applied when none is supplied explicitly.
    #[must_use]
    pub fn default_status(self) -> StatusCode {
        match self {
            Self::FootprintsException => StatusCode::NOT_IMPLEMENTED,
            Self::ItemDefinitionDoesNotExist | Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::ResourceDoesNotExist => StatusCode::NOT_FOUND,
            Self::RequiredFieldMissing => StatusCode::NOT_ACCEPTABLE,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    /// Message applied when none is supplied or none could be extracted.
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            Self::FootprintsException => "An unexpected error occured.",
            Self::ItemDefinitionDoesNotExist => {
                "The item definition was not found. Please check the item definition."
            }
            Self::BadRequest => {
                "Footprints was unable to understand the request. \
                 Please check the attributes sent to Footprints."
            }
            Self::Unauthorized => "Unauthorized to access the requested resource.",
            Self::ResourceDoesNotExist => "Footprints could not locate the requested resource.",
            Self::RequiredFieldMissing => "Required parameter(s) missing.",
            Self::Forbidden => {
                "Footprints has denied access to the resource. \
                 This is most likely due to a permission issue. \
                 Please check your credentials before proceeding."
            }
        }
    }

    /// The kind's name, as used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::FootprintsException => "FootprintsException",
            Self::ItemDefinitionDoesNotExist => "ItemDefinitionDoesNotExist",
            Self::BadRequest => "BadRequest",
            Self::Unauthorized => "Unauthorized",
            Self::ResourceDoesNotExist => "ResourceDoesNotExist",
            Self::RequiredFieldMissing => "RequiredFieldMissing",
            Self::Forbidden => "Forbidden",
        }
    }
}

impl fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failure classified into the service error taxonomy.
///
/// Displays as `"{status_code} {message}"`, e.g.
/// `401 Unauthorized to access the requested resource.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    kind: ServiceErrorKind,
    message: String,
    status_code: StatusCode,
}

impl ServiceError {
    /// Creates an error carrying the kind's default message and status.
    #[must_use]
    pub fn new(kind: ServiceErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            status_code: kind.default_status(),
        }
    }

    /// Creates an error with a custom message and the kind's default status.
    ///
    /// An empty message falls back to the kind's default.
    pub fn with_message(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::new(kind);
        }
        Self {
            kind,
            message,
            status_code: kind.default_status(),
        }
    }

    /// Builds an error from a loosely shaped payload.
    ///
    /// - a string becomes the message
    /// - a mapping supplies `message` and `status_code` where present
    /// - anything else, or a mapping without a usable `message`, falls back to
    ///   the kind's default message
    pub fn from_payload(kind: ServiceErrorKind, payload: &Value) -> Self {
        match payload {
            Value::String(message) => Self::with_message(kind, message.as_str()),
            Value::Object(map) => {
                let mut error = match map.get("message").and_then(Value::as_str) {
                    Some(message) => Self::with_message(kind, message),
                    None => Self::new(kind),
                };
                if let Some(status) = map.get("status_code").and_then(parse_status) {
                    error.status_code = status;
                }
                error
            }
            _ => Self::new(kind),
        }
    }

    /// Overrides the status code.
    #[must_use]
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = status_code;
        self
    }

    /// The taxonomy kind.
    pub fn kind(&self) -> ServiceErrorKind {
        self.kind
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The classification status code.
    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status_code.as_u16(), self.message)
    }
}

impl std::error::Error for ServiceError {}

fn parse_status(value: &Value) -> Option<StatusCode> {
    let code = match value {
        Value::Number(n) => u16::try_from(n.as_u64()?).ok()?,
        Value::String(s) => s.trim().parse::<u16>().ok()?,
        _ => return None,
    };
    StatusCode::from_u16(code).ok()
}

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// Rejected locally before anything was sent; a programming error.
    LocalValidation,
    /// Classified from the service or its transport.
    RemoteService,
}

/// Unified error type for all Footprints operations.
#[derive(Error, Debug)]
pub enum FootprintsError {
    /// A failure classified into the service error taxonomy.
    #[error("{0}")]
    Service(#[from] ServiceError),

    /// An argument had the wrong shape or an unsupported value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No arguments were supplied where some were required.
    #[error("missing arguments: {0}")]
    MissingArguments(String),

    /// Configuration error - missing or invalid settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FootprintsError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        FootprintsError::InvalidArgument(message.into())
    }

    /// Creates a missing arguments error.
    pub fn missing_arguments(message: impl Into<String>) -> Self {
        FootprintsError::MissingArguments(message.into())
    }

    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        FootprintsError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        FootprintsError::Config(message.into())
    }

    /// Creates a taxonomy error with the kind's default message.
    pub fn service(kind: ServiceErrorKind) -> Self {
        FootprintsError::Service(ServiceError::new(kind))
    }

    /// Creates a taxonomy error with a custom message.
    pub fn service_with_message(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        FootprintsError::Service(ServiceError::with_message(kind, message))
    }

    /// Creates a `RequiredFieldMissing` error naming the absent fields.
    pub fn required_fields_missing(fields: &[&str]) -> Self {
        Self::service_with_message(
            ServiceErrorKind::RequiredFieldMissing,
            format!("Required parameter(s) missing: {}.", fields.join(", ")),
        )
    }

    /// Returns whether the failure was local or came from the service side.
    #[must_use]
    pub fn origin(&self) -> ErrorOrigin {
        match self {
            FootprintsError::Service(_) => ErrorOrigin::RemoteService,
            _ => ErrorOrigin::LocalValidation,
        }
    }

    /// Returns the taxonomy kind, if this is a service error.
    #[must_use]
    pub fn kind(&self) -> Option<ServiceErrorKind> {
        match self {
            FootprintsError::Service(e) => Some(e.kind()),
            _ => None,
        }
    }

    /// Returns the classification status code, if this is a service error.
    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            FootprintsError::Service(e) => Some(e.status_code()),
            _ => None,
        }
    }

    /// Sanitizes a message to remove any occurrence of the client secret.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `secret` - The secret to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the secret replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, secret: &str) -> String {
        if secret.is_empty() {
            return message.to_string();
        }
        message.replace(secret, "[REDACTED]")
    }
}

/// The phase of the exchange in which a transport failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Loading the service description while connecting.
    Connect,
    /// Invoking an operation.
    Request,
}

/// Low-level failures raised by a [`SoapTransport`](crate::soap::SoapTransport).
///
/// These never leave the crate's public operations unclassified; the
/// requester maps them onto [`ServiceError`] with [`TransportError::classify`].
#[derive(Error, Debug)]
pub enum TransportError {
    /// The HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    Status {
        /// The HTTP status code returned.
        status: StatusCode,
        /// The (sanitized, truncated) response body.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("connection failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// The outbound request did not have the shape the service expects.
    #[error("request validation failed: {0}")]
    Validation(String),

    /// The service answered with a SOAP fault.
    #[error("SOAP fault {code}: {message}")]
    Fault {
        /// The fault code, e.g. `soap:Server`.
        code: String,
        /// The fault string.
        message: String,
    },

    /// The response could not be decoded into the expected shape.
    #[error("unexpected response shape: {0}")]
    Shape(String),

    /// A parameter value was rejected before sending.
    #[error("invalid parameter value: {0}")]
    InvalidValue(String),
}

impl TransportError {
    /// Maps this failure onto the service error taxonomy.
    ///
    /// | failure | connect | request |
    /// |---|---|---|
    /// | HTTP 401 | Unauthorized | Unauthorized |
    /// | other HTTP status | BadRequest | FootprintsException |
    /// | connection | ResourceDoesNotExist | FootprintsException |
    /// | validation | BadRequest | BadRequest |
    /// | SOAP fault | ResourceDoesNotExist | ResourceDoesNotExist |
    /// | response shape | ResourceDoesNotExist | ResourceDoesNotExist |
    /// | invalid value | Forbidden | Forbidden |
    #[must_use]
    pub fn classify(self, phase: Phase) -> ServiceError {
        use ServiceErrorKind as Kind;

        match (self, phase) {
            (TransportError::Status { status, .. }, _) if status == StatusCode::UNAUTHORIZED => {
                ServiceError::new(Kind::Unauthorized)
            }
            (TransportError::Status { .. }, Phase::Connect) => ServiceError::new(Kind::BadRequest),
            (TransportError::Status { .. }, Phase::Request) => {
                ServiceError::new(Kind::FootprintsException)
            }
            (TransportError::Connection(_), Phase::Connect) => {
                ServiceError::new(Kind::ResourceDoesNotExist)
            }
            (TransportError::Connection(_), Phase::Request) => {
                ServiceError::new(Kind::FootprintsException)
            }
            (TransportError::Validation(message), _) => {
                ServiceError::with_message(Kind::BadRequest, message)
            }
            (TransportError::Fault { message, .. }, _) => {
                ServiceError::with_message(Kind::ResourceDoesNotExist, message)
            }
            (TransportError::Shape(_), _) => ServiceError::new(Kind::ResourceDoesNotExist),
            (TransportError::InvalidValue(_), _) => ServiceError::new(Kind::Forbidden),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = FootprintsError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unauthorized_display() {
        let err = ServiceError::new(ServiceErrorKind::Unauthorized);
        assert_eq!(
            err.to_string(),
            "401 Unauthorized to access the requested resource."
        );
    }

    #[test]
    fn test_default_statuses() {
        assert_eq!(
            ServiceErrorKind::FootprintsException.default_status().as_u16(),
            501
        );
        assert_eq!(
            ServiceErrorKind::ItemDefinitionDoesNotExist
                .default_status()
                .as_u16(),
            400
        );
        assert_eq!(ServiceErrorKind::BadRequest.default_status().as_u16(), 400);
        assert_eq!(
            ServiceErrorKind::ResourceDoesNotExist.default_status().as_u16(),
            404
        );
        assert_eq!(
            ServiceErrorKind::RequiredFieldMissing.default_status().as_u16(),
            406
        );
        assert_eq!(ServiceErrorKind::Forbidden.default_status().as_u16(), 403);
    }

    #[test]
    fn test_with_message_keeps_default_status() {
        let err = ServiceError::with_message(ServiceErrorKind::BadRequest, "bad field");
        assert_eq!(err.to_string(), "400 bad field");
    }

    #[test]
    fn test_with_empty_message_uses_default() {
        let err = ServiceError::with_message(ServiceErrorKind::Forbidden, "  ");
        assert_eq!(err.message(), ServiceErrorKind::Forbidden.default_message());
    }

    #[test]
    fn test_from_payload_mapping() {
        let err = ServiceError::from_payload(
            ServiceErrorKind::FootprintsException,
            &json!({"message": "backend down", "status_code": 503}),
        );
        assert_eq!(err.to_string(), "503 backend down");
        assert_eq!(err.kind(), ServiceErrorKind::FootprintsException);
    }

    #[test]
    fn test_from_payload_string_status() {
        let err = ServiceError::from_payload(
            ServiceErrorKind::BadRequest,
            &json!({"message": "nope", "status_code": "422"}),
        );
        assert_eq!(err.status_code().as_u16(), 422);
    }

    #[test]
    fn test_from_payload_opaque_falls_back() {
        let err = ServiceError::from_payload(
            ServiceErrorKind::ResourceDoesNotExist,
            &json!({"detail": "something"}),
        );
        assert_eq!(
            err.to_string(),
            "404 Footprints could not locate the requested resource."
        );

        let err = ServiceError::from_payload(ServiceErrorKind::Forbidden, &json!([1, 2]));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_origin() {
        let err = FootprintsError::service(ServiceErrorKind::BadRequest);
        assert_eq!(err.origin(), ErrorOrigin::RemoteService);
        assert_eq!(err.kind(), Some(ServiceErrorKind::BadRequest));

        let err = FootprintsError::invalid_argument("Unsupported method.");
        assert_eq!(err.origin(), ErrorOrigin::LocalValidation);
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_required_fields_missing() {
        let err = FootprintsError::required_fields_missing(&["item_id", "submitter"]);
        assert_eq!(err.kind(), Some(ServiceErrorKind::RequiredFieldMissing));
        assert!(err.to_string().starts_with("406 "));
        assert!(err.to_string().contains("item_id, submitter"));
    }

    #[test]
    fn test_missing_env_error() {
        let err = FootprintsError::missing_env("FOOTPRINTS_CLIENT_SECRET");
        assert!(err.to_string().contains("FOOTPRINTS_CLIENT_SECRET"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_classify_unauthorized_in_both_phases() {
        for phase in [Phase::Connect, Phase::Request] {
            let err = TransportError::Status {
                status: StatusCode::UNAUTHORIZED,
                body: String::new(),
            }
            .classify(phase);
            assert_eq!(err.kind(), ServiceErrorKind::Unauthorized);
            assert_eq!(
                err.to_string(),
                "401 Unauthorized to access the requested resource."
            );
        }
    }

    #[test]
    fn test_classify_status_depends_on_phase() {
        let status = || TransportError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert_eq!(
            status().classify(Phase::Connect).kind(),
            ServiceErrorKind::BadRequest
        );
        assert_eq!(
            status().classify(Phase::Request).kind(),
            ServiceErrorKind::FootprintsException
        );
    }

    #[test]
    fn test_classify_fault_keeps_message() {
        let err = TransportError::Fault {
            code: "soap:Server".to_string(),
            message: "Item 42 not found".to_string(),
        }
        .classify(Phase::Request);
        assert_eq!(err.kind(), ServiceErrorKind::ResourceDoesNotExist);
        assert_eq!(err.to_string(), "404 Item 42 not found");
    }

    #[test]
    fn test_classify_validation_and_values() {
        let err =
            TransportError::Validation("missing _itemId".to_string()).classify(Phase::Request);
        assert_eq!(err.kind(), ServiceErrorKind::BadRequest);
        assert_eq!(err.message(), "missing _itemId");

        let err = TransportError::InvalidValue("NaN".to_string()).classify(Phase::Request);
        assert_eq!(err.kind(), ServiceErrorKind::Forbidden);

        let err = TransportError::Shape("no body".to_string()).classify(Phase::Request);
        assert_eq!(err.kind(), ServiceErrorKind::ResourceDoesNotExist);
    }

    #[test]
    fn test_sanitize_message_removes_secret() {
        let secret = "hunter2-secret";
        let message = format!("login failed for password {}", secret);
        let sanitized = FootprintsError::sanitize_message(&message, secret);
        assert!(!sanitized.contains(secret));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_empty_secret() {
        let message = "Some error message";
        assert_eq!(FootprintsError::sanitize_message(message, ""), message);
    }
}
