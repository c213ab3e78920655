//! Per-call request descriptor.

use http::{HeaderMap, HeaderName, HeaderValue, Method};

/// Describes one HTTP exchange against the hub.
///
/// A descriptor is built fresh for every call and handed to
/// [`Transport::send`](crate::Transport::send); it is not retained
/// afterwards.
///
/// The payload is a dynamic JSON value rather than a typed struct: the
/// hub's endpoints take free-form key/value payloads, and on GET the
/// payload entries become query parameters instead of a body.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method. GET, POST, PUT and DELETE are the documented
    /// surface; other methods are passed through unchanged.
    pub method: Method,

    /// The request path, concatenated onto the hub base URL as-is.
    /// Paths that already contain a query string are unsupported.
    pub path: String,

    /// Optional payload. Sent as a JSON body, except on GET where the
    /// entries are appended to the query string.
    pub payload: Option<serde_json::Value>,

    /// Caller-supplied headers, applied after the defaults and able to
    /// override them.
    pub headers: HeaderMap,

    /// When set, the response body is delivered as unparsed text
    /// instead of a decoded JSON value.
    pub raw: bool,
}

impl Request {
    /// Creates a descriptor with the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            payload: None,
            headers: HeaderMap::new(),
            raw: false,
        }
    }

    /// Sets the payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Adds a header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn with_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, crate::Error> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| crate::Error::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| crate::Error::Configuration(format!("Invalid header value: {}", e)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Requests the response as unparsed text.
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }
}
