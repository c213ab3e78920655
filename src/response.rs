//! Successful response bodies.

/// The body of a successful hub response.
///
/// Unless raw mode was requested, the body is JSON-decoded. A success
/// response with an empty body decodes to JSON `true`, the hub's
/// bare-acknowledgement convention.
///
/// # Examples
///
/// ```
/// use scribehub::ResponseBody;
///
/// let body = ResponseBody::Json(serde_json::json!({"id": "doc-1"}));
/// assert_eq!(body.json().unwrap()["id"], "doc-1");
///
/// let ack = ResponseBody::Json(serde_json::Value::Bool(true));
/// assert!(ack.is_ack());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// A JSON-decoded value. Empty bodies decode to `true`.
    Json(serde_json::Value),
    /// The unparsed response text, delivered when raw mode was requested.
    Raw(String),
}

impl ResponseBody {
    /// Returns the decoded JSON value, if this body was decoded.
    pub fn json(&self) -> Option<&serde_json::Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            ResponseBody::Raw(_) => None,
        }
    }

    /// Returns the unparsed text, if raw mode was requested.
    pub fn raw(&self) -> Option<&str> {
        match self {
            ResponseBody::Raw(text) => Some(text),
            ResponseBody::Json(_) => None,
        }
    }

    /// Converts the body into a JSON value, lifting raw text into a
    /// JSON string.
    pub fn into_value(self) -> serde_json::Value {
        match self {
            ResponseBody::Json(value) => value,
            ResponseBody::Raw(text) => serde_json::Value::String(text),
        }
    }

    /// Returns `true` if this is the bare acknowledgement produced by an
    /// empty success body.
    pub fn is_ack(&self) -> bool {
        matches!(self, ResponseBody::Json(serde_json::Value::Bool(true)))
    }
}
