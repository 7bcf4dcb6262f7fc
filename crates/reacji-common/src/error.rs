//! Error types for Web API client operations

use bytes::Bytes;
use smol_str::SmolStr;

/// Client error type wrapping all possible error conditions
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP transport error: {0}")]
    Transport(
        #[from]
        #[diagnostic_source]
        TransportError,
    ),

    /// Request serialization failed
    #[error("{0}")]
    Encode(
        #[from]
        #[diagnostic_source]
        EncodeError,
    ),

    /// Response deserialization failed
    #[error("{0}")]
    Decode(
        #[from]
        #[diagnostic_source]
        DecodeError,
    ),

    /// HTTP error response
    #[error("HTTP {0}")]
    Http(
        #[from]
        #[diagnostic_source]
        HttpError,
    ),

    /// The server answered with `ok: false`
    #[error("{0}")]
    Api(
        #[from]
        #[diagnostic_source]
        ApiError,
    ),

    /// The body parsed as JSON but not into any shape we recognise
    #[error("Malformed response: {0}")]
    Malformed(
        #[from]
        #[diagnostic_source]
        MalformedResponse,
    ),
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(DecodeError::Json(e))
    }
}

/// Transport-level errors that occur during HTTP communication
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TransportError {
    /// Failed to establish connection to server
    #[error("Connection error: {0}")]
    Connect(String),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Request construction failed (malformed URI, headers, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Other transport error
    #[error("Transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Classify an error returned by an [`HttpClient`](crate::http_client::HttpClient).
    ///
    /// `reqwest` failures are sorted into connect, timeout and request errors;
    /// anything else becomes [`TransportError::Other`].
    pub fn from_client<E>(e: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(e);
        #[cfg(feature = "reqwest-client")]
        let boxed = match boxed.downcast::<reqwest::Error>() {
            Ok(e) => return Self::from(*e),
            Err(other) => other,
        };
        Self::Other(boxed)
    }
}

#[cfg(feature = "reqwest-client")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else if e.is_builder() || e.is_request() {
            Self::InvalidRequest(e.to_string())
        } else {
            Self::Other(Box::new(e))
        }
    }
}

/// Error type for encoding request parameters
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum EncodeError {
    /// Failed to serialize the form body
    #[error("Failed to serialize form: {0}")]
    Form(
        #[from]
        #[source]
        serde_html_form::ser::Error,
    ),
}

/// Response deserialization errors
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DecodeError {
    /// JSON deserialization failed
    #[error("Failed to deserialize JSON: {0}")]
    Json(
        #[from]
        #[source]
        serde_json::Error,
    ),
}

/// HTTP error response (non-2xx status codes)
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub struct HttpError {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response body if available
    pub body: Option<Bytes>,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(body) = &self.body {
            if let Ok(s) = std::str::from_utf8(body) {
                write!(f, ":\n{}", s)?;
            }
        }
        Ok(())
    }
}

/// Error reported by the server inside the response envelope.
///
/// The `error` string is passed through untouched (`channel_not_found`,
/// `already_reacted`, `invalid_auth`, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("API error: {error}")]
#[diagnostic(code(reacji::api))]
pub struct ApiError {
    /// Server-supplied error code
    pub error: SmolStr,
}

impl ApiError {
    /// The error code the server sent back
    pub fn as_str(&self) -> &str {
        self.error.as_str()
    }
}

/// A response whose shape did not match the one the endpoint documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum MalformedResponse {
    /// A required top-level field was absent
    #[error("missing `{0}` field")]
    #[diagnostic(code(reacji::malformed::missing_field))]
    MissingField(&'static str),

    /// An item carried no `type` discriminator
    #[error("item has no `type` discriminator")]
    #[diagnostic(code(reacji::malformed::missing_type))]
    MissingType,

    /// An item carried a `type` we do not know how to decode
    #[error("unknown item type `{0}`")]
    #[diagnostic(
        code(reacji::malformed::unknown_type),
        help("expected one of `message`, `file`, `file_comment`")
    )]
    UnknownType(SmolStr),

    /// The object named by the discriminator was absent
    #[error("`{kind}` item is missing its `{object}` object")]
    #[diagnostic(code(reacji::malformed::missing_object))]
    MissingObject {
        /// Discriminator value of the item
        kind: &'static str,
        /// Dotted path of the object that should have been present
        object: &'static str,
    },
}

/// Result type for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;
