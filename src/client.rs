//! Hub client facade.
//!
//! [`Client`] owns the configuration (hub URL, client credentials,
//! path style) and the session token, and routes every domain call
//! through one unified [`Client::request`] entry point.

use std::sync::{Arc, RwLock};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{Blobs, Changes, Collaborators, Documents, Networks, Publications, Versions};
use crate::{Error, Request, ResponseBody, Result, Transport};

/// Which wire convention the hub speaks for its store collections.
///
/// Older hub deployments expose flat top-level collections and take the
/// document id in the payload; newer ones scope the same collections
/// under the document. The client supports both so one binary can talk
/// to either generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStyle {
    /// Flat collections: `/publications`, `/versions`, `/collaborators`,
    /// with the document id carried in the payload or query.
    Flat,
    /// Document-scoped collections: `/documents/{id}/publications` and
    /// friends.
    #[default]
    Nested,
}

/// A granted authorization, returned by [`Client::authenticate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authorization {
    /// The bearer token attached to subsequent requests.
    pub token: String,
    /// Any further fields the hub attaches to the authorization.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Registration profile for [`Client::create_user`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

/// An HTTP client for a document-collaboration hub.
///
/// The client is cheap to clone and safe to share across tasks. All
/// clones share the session token: once [`Client::authenticate`]
/// succeeds, every subsequent request carries `Authorization: token <t>`.
///
/// # Examples
///
/// ```no_run
/// use scribehub::Client;
///
/// # async fn example() -> Result<(), scribehub::Error> {
/// let client = Client::builder()
///     .hub_url("https://hub.example.com")?
///     .client_id("my-app")
///     .client_secret("s3cret")
///     .build()?;
///
/// client.authenticate("alice", "wonderland").await?;
///
/// let doc = client.documents().get("manifesto").await?;
/// println!("document: {doc}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Transport,
    client_id: Option<String>,
    client_secret: Option<String>,
    path_style: PathStyle,
    token: RwLock<Option<String>>,
}

impl Client {
    /// Creates a new [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Returns the current session token, if one is held.
    pub fn token(&self) -> Option<String> {
        self.inner.token.read().ok().and_then(|guard| guard.clone())
    }

    /// The unified request entry point.
    ///
    /// Injects the `Authorization: token <t>` header when a session
    /// token is held and forwards to the transport. Domain methods are
    /// thin wrappers around this; it is public so callers can reach
    /// endpoints the typed surface does not cover.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<Value>,
        raw: bool,
    ) -> Result<ResponseBody> {
        let mut request = Request::new(method, path);
        if let Some(payload) = payload {
            request = request.with_payload(payload);
        }
        if raw {
            request = request.raw();
        }
        if let Some(token) = self.token() {
            request = request.with_header("Authorization", format!("token {}", token))?;
        }
        self.inner.transport.send(request).await
    }

    /// Authenticates with username and password.
    ///
    /// Sends HTTP Basic credentials together with the configured client
    /// id/secret. On success the returned token is stored and attached
    /// to every subsequent request. Overlapping authenticate calls are
    /// last-writer-wins.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Authorization> {
        let mut payload = serde_json::Map::new();
        if let Some(id) = &self.inner.client_id {
            payload.insert("client_id".to_string(), Value::String(id.clone()));
        }
        if let Some(secret) = &self.inner.client_secret {
            payload.insert("client_secret".to_string(), Value::String(secret.clone()));
        }

        let credentials = BASE64.encode(format!("{}:{}", username, password));
        let request = Request::new(Method::POST, "/authorizations")
            .with_payload(Value::Object(payload))
            .with_header("Authorization", format!("Basic {}", credentials))?;

        let body = self.inner.transport.send(request).await?.into_value();
        let authorization: Authorization = decode(body)?;

        if let Ok(mut guard) = self.inner.token.write() {
            *guard = Some(authorization.token.clone());
        }

        Ok(authorization)
    }

    /// Registers a new user, attaching the configured client id/secret
    /// to the profile.
    pub async fn create_user(&self, user: &NewUser) -> Result<Value> {
        let mut payload =
            serde_json::to_value(user).map_err(|e| Error::Serialization(e.to_string()))?;
        if let Value::Object(map) = &mut payload {
            if let Some(id) = &self.inner.client_id {
                map.insert("client_id".to_string(), Value::String(id.clone()));
            }
            if let Some(secret) = &self.inner.client_secret {
                map.insert("client_secret".to_string(), Value::String(secret.clone()));
            }
        }
        self.value(Method::POST, "/register".to_string(), Some(payload))
            .await
    }

    /// Seeds the hub from a named server-side fixture.
    pub async fn seed_name(&self, name: &str) -> Result<Value> {
        tracing::info!(seed = name, "seeding hub");
        let result = self
            .value(Method::GET, format!("/seed/{}", name), None)
            .await;
        match &result {
            Ok(_) => tracing::info!(seed = name, "seeding done"),
            Err(e) => tracing::warn!(seed = name, error = %e, "seeding failed"),
        }
        result
    }

    /// Seeds the hub with an explicit seed object.
    pub async fn seed(&self, seed: Value) -> Result<Value> {
        tracing::info!("seeding hub with object");
        self.value(Method::POST, "/seed".to_string(), Some(seed))
            .await
    }

    /// The documents store API.
    pub fn documents(&self) -> Documents<'_> {
        Documents { client: self }
    }

    /// The blob store API for one document.
    pub fn blobs<'a>(&'a self, document: &'a str) -> Blobs<'a> {
        Blobs {
            client: self,
            document,
        }
    }

    /// The publications API.
    pub fn publications(&self) -> Publications<'_> {
        Publications { client: self }
    }

    /// The versions API.
    pub fn versions(&self) -> Versions<'_> {
        Versions { client: self }
    }

    /// The collaborators API.
    pub fn collaborators(&self) -> Collaborators<'_> {
        Collaborators { client: self }
    }

    /// The networks API.
    pub fn networks(&self) -> Networks<'_> {
        Networks { client: self }
    }

    /// The change-track API for one track.
    pub fn changes<'a>(&'a self, track: &'a str) -> Changes<'a> {
        Changes {
            client: self,
            track,
        }
    }

    pub(crate) fn path_style(&self) -> PathStyle {
        self.inner.path_style
    }

    /// Issues a request and returns the response as a JSON value.
    pub(crate) async fn value(
        &self,
        method: Method,
        path: String,
        payload: Option<Value>,
    ) -> Result<Value> {
        Ok(self
            .request(method, &path, payload, false)
            .await?
            .into_value())
    }

    /// Issues a request where only the acknowledgement matters.
    pub(crate) async fn ack(
        &self,
        method: Method,
        path: String,
        payload: Option<Value>,
    ) -> Result<()> {
        self.request(method, &path, payload, false).await?;
        Ok(())
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|e| Error::Decode {
        status: StatusCode::OK,
        raw_response: value.to_string(),
        serde_error: e.to_string(),
    })
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use scribehub::{ClientBuilder, PathStyle};
///
/// # fn example() -> Result<(), scribehub::Error> {
/// let client = ClientBuilder::new()
///     .hub_url("https://hub.example.com")?
///     .client_id("my-app")
///     .client_secret("s3cret")
///     .path_style(PathStyle::Flat)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    hub_url: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    token: Option<String>,
    path_style: PathStyle,
}

impl ClientBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            hub_url: None,
            client_id: None,
            client_secret: None,
            token: None,
            path_style: PathStyle::default(),
        }
    }

    /// Sets the hub base URL. Required.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn hub_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        url::Url::parse(&url)?;
        self.hub_url = Some(url);
        Ok(self)
    }

    /// Sets the client id sent with authenticate and register calls.
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Sets the client secret sent with authenticate and register calls.
    pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
        self.client_secret = Some(secret.into());
        self
    }

    /// Supplies an initial session token, skipping authenticate.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Selects the wire convention for store collections.
    pub fn path_style(mut self, style: PathStyle) -> Self {
        self.path_style = style;
        self
    }

    /// Builds the configured [`Client`].
    ///
    /// # Errors
    ///
    /// Returns an error if no hub URL was provided.
    pub fn build(self) -> Result<Client> {
        let hub_url = self
            .hub_url
            .ok_or_else(|| Error::Configuration("hub URL is required".to_string()))?;
        let transport = Transport::new(hub_url)?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                transport,
                client_id: self.client_id,
                client_secret: self.client_secret,
                path_style: self.path_style,
                token: RwLock::new(self.token),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
