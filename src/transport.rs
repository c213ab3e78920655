//! The transport layer: one HTTP exchange per call.
//!
//! [`Transport::send`] takes a [`Request`] descriptor, issues a single
//! network exchange against the configured hub host, and resolves to
//! exactly one outcome. It performs no retries and enforces no timeout;
//! those are left to the underlying HTTP stack.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::{Error, Request, ResponseBody, Result};

/// Executes single request/response cycles against a hub host.
///
/// The transport is cheap to clone and can be shared across tasks; it
/// holds no per-request state.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base: String,
}

impl Transport {
    /// Creates a transport for the given hub base URL.
    ///
    /// The URL is validated but otherwise used verbatim: request paths
    /// are concatenated onto it without normalization, so it should not
    /// carry a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(hub_url: impl Into<String>) -> Result<Self> {
        let base = hub_url.into();
        Url::parse(&base)?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base })
    }

    /// Performs one HTTP exchange and classifies the outcome.
    ///
    /// Success band is any status in 200..300 plus 304. Unless raw mode
    /// was requested, a non-empty success body is JSON-decoded and an
    /// empty one resolves to JSON `true`. On the failure band the body
    /// is decoded as JSON when possible ([`Error::Api`]) and delivered
    /// as raw text otherwise ([`Error::Http`]).
    pub async fn send(&self, request: Request) -> Result<ResponseBody> {
        let url = Url::parse(&self.build_url(&request))?;

        tracing::debug!(
            method = %request.method,
            url = %url,
            "issuing hub request"
        );

        let mut headers = HeaderMap::new();
        if !request.raw {
            headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        }
        // Some hub deployments reject DELETE requests that carry a
        // Content-Type header, so DELETE must omit it.
        if request.method != Method::DELETE {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        for (name, value) in &request.headers {
            headers.insert(name, value.clone());
        }

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(headers);

        // GET payloads were already folded into the query string.
        if request.method != Method::GET {
            if let Some(payload) = &request.payload {
                let body = serde_json::to_vec(payload)
                    .map_err(|e| Error::Serialization(e.to_string()))?;
                builder = builder.body(body);
            }
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        tracing::info!(
            status = status.as_u16(),
            method = %request.method,
            path = %request.path,
            "received hub response"
        );

        if status.is_success() || status == StatusCode::NOT_MODIFIED {
            return Self::decode_success(&request, status, text);
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(body) => {
                if let Some(trace) = body.get("trace") {
                    tracing::error!(
                        status = status.as_u16(),
                        path = %request.path,
                        trace = %trace,
                        "hub error carried a diagnostic trace"
                    );
                }
                tracing::warn!(
                    status = status.as_u16(),
                    path = %request.path,
                    "hub returned an error body"
                );
                Err(Error::Api { status, body })
            }
            Err(_) => {
                tracing::warn!(
                    status = status.as_u16(),
                    path = %request.path,
                    response = %text,
                    "hub returned a non-JSON error body"
                );
                Err(Error::Http {
                    status,
                    raw_response: text,
                })
            }
        }
    }

    fn decode_success(request: &Request, status: StatusCode, text: String) -> Result<ResponseBody> {
        if request.raw {
            return Ok(ResponseBody::Raw(text));
        }
        if text.is_empty() {
            // Empty success bodies acknowledge as JSON `true`.
            return Ok(ResponseBody::Json(Value::Bool(true)));
        }
        match serde_json::from_str(&text) {
            Ok(value) => Ok(ResponseBody::Json(value)),
            Err(e) => {
                tracing::error!(
                    status = status.as_u16(),
                    path = %request.path,
                    error = %e,
                    "failed to decode hub response"
                );
                Err(Error::Decode {
                    status,
                    raw_response: text,
                    serde_error: e.to_string(),
                })
            }
        }
    }

    /// Builds the final URL: base + path, GET payload as query pairs,
    /// and the cache-defeating stamp appended last.
    fn build_url(&self, request: &Request) -> String {
        let mut url = format!("{}{}", self.base, request.path);

        if request.method == Method::GET {
            if let Some(Value::Object(map)) = &request.payload {
                if !map.is_empty() {
                    let mut query = url::form_urlencoded::Serializer::new(String::new());
                    for (key, value) in map {
                        query.append_pair(key, &query_value(value));
                    }
                    url.push('?');
                    url.push_str(&query.finish());
                }
            }
        }

        url.push(if url.contains('?') { '&' } else { '?' });
        url.push_str(&cache_stamp().to_string());
        url
    }
}

/// Renders a JSON value as a query parameter value. Strings are used
/// as-is; everything else is its JSON text.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

static STAMP: AtomicU64 = AtomicU64::new(0);

/// Returns a process-wide monotonic millisecond stamp. Two calls in the
/// same millisecond still yield distinct values.
fn cache_stamp() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    let prev = STAMP
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(prev + 1)
}
