//! Error types for hub API calls.
//!
//! Every failure keeps the raw response data it was classified from, so
//! callers can log or inspect exactly what the hub sent back.

use http::StatusCode;

/// The error type for hub API calls.
///
/// An error status with a JSON body is delivered as [`Error::Api`] with the
/// decoded body; an error status with a body that is not JSON is delivered
/// as [`Error::Http`] with the raw text. Network-level failures surface the
/// underlying `reqwest` error unchanged.
///
/// # Examples
///
/// ```no_run
/// use scribehub::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder()
///     .hub_url("https://hub.example.com")?
///     .build()?;
///
/// match client.documents().get("doc-1").await {
///     Ok(doc) => println!("got {doc}"),
///     Err(Error::Api { status, body }) => {
///         eprintln!("hub rejected the request ({status}): {body}");
///     }
///     Err(Error::Http { status, raw_response }) => {
///         eprintln!("HTTP {status}: {raw_response}");
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A network-level error occurred (connection failed, DNS lookup
    /// failed, etc.) and no response was received.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The hub returned an error status with a JSON body.
    ///
    /// The decoded body is delivered as-is; hubs attach their diagnostics
    /// (message, trace) to it in whatever shape the endpoint uses.
    #[error("hub error {status}: {body}")]
    Api {
        /// The HTTP status code
        status: StatusCode,
        /// The decoded JSON error body
        body: serde_json::Value,
    },

    /// The server returned an error status with a body that is not JSON.
    #[error("HTTP error {status}: {raw_response}")]
    Http {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body
        raw_response: String,
    },

    /// A success response carried a body that could not be decoded as JSON.
    ///
    /// The raw body is preserved alongside the serde error message.
    #[error("failed to decode response (status {status}): {serde_error}")]
    Decode {
        /// The HTTP status code
        status: StatusCode,
        /// The raw response body that failed to decode
        raw_response: String,
        /// The serde error message
        serde_error: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request payload: {0}")]
    Serialization(String),

    /// Invalid client configuration, such as a missing hub URL or an
    /// invalid header value.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An invalid URL was provided.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// Returns the HTTP status code if this error carries one.
    ///
    /// # Examples
    ///
    /// ```
    /// use scribehub::Error;
    /// use http::StatusCode;
    ///
    /// let err = Error::Http {
    ///     status: StatusCode::NOT_FOUND,
    ///     raw_response: "not found".to_string(),
    /// };
    /// assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    /// ```
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http { status, .. } => Some(*status),
            Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error preserved one.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Http { raw_response, .. } => Some(raw_response),
            Error::Decode { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Returns the decoded error body for [`Error::Api`] errors.
    pub fn api_body(&self) -> Option<&serde_json::Value> {
        match self {
            Error::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// A specialized `Result` type for hub API calls.
pub type Result<T> = std::result::Result<T, Error>;
