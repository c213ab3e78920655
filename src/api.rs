//! Store APIs, one accessor object per hub collection.
//!
//! Each accessor borrows the [`Client`] and maps its operations onto a
//! verb, a path template and a payload shape. Collections that exist in
//! both wire generations (publications, versions, collaborators) pick
//! their path template from the client's [`PathStyle`].

use http::Method;
use serde::Serialize;
use serde_json::{json, Value};

use crate::client::PathStyle;
use crate::{Client, Error, Result};

/// Selects a commit range for [`Documents::commits`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommitRange {
    /// Commit to read from. Defaults to the track head on the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    /// Oldest commit to include, exclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<String>,
    /// Newest commit already known to the caller.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

/// Payload for [`Documents::update`]. Absent fields are omitted from
/// the wire payload.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOptions {
    /// Commits to append to the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<Vec<Value>>,
    /// Replacement document metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Replacement ref table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refs: Option<Value>,
}

/// Document store operations.
pub struct Documents<'a> {
    pub(crate) client: &'a Client,
}

impl Documents<'_> {
    /// Creates a document. Extra creation options are merged into the
    /// payload next to the id.
    pub async fn create(&self, id: &str, options: Value) -> Result<Value> {
        let mut payload = match options {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            _ => {
                return Err(Error::Configuration(
                    "document options must be a JSON object".to_string(),
                ))
            }
        };
        payload.insert("id".to_string(), Value::String(id.to_string()));
        self.client
            .value(
                Method::POST,
                "/documents".to_string(),
                Some(Value::Object(payload)),
            )
            .await
    }

    /// Fetches a document by id.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client
            .value(Method::GET, format!("/documents/{}", id), None)
            .await
    }

    /// Lists all documents visible to the session, with metadata.
    pub async fn list(&self) -> Result<Value> {
        self.client
            .value(Method::GET, "/documents".to_string(), None)
            .await
    }

    /// Permanently deletes a document.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .ack(Method::DELETE, format!("/documents/{}", id), None)
            .await
    }

    /// Retrieves a range of the document's commits.
    pub async fn commits(&self, id: &str, range: CommitRange) -> Result<Value> {
        let payload =
            serde_json::to_value(range).map_err(|e| Error::Serialization(e.to_string()))?;
        self.client
            .value(
                Method::GET,
                format!("/documents/{}/commits", id),
                Some(payload),
            )
            .await
    }

    /// Stores new commits, metadata or refs for a document.
    pub async fn update(&self, id: &str, options: UpdateOptions) -> Result<()> {
        let payload =
            serde_json::to_value(options).map_err(|e| Error::Serialization(e.to_string()))?;
        self.client
            .ack(Method::PUT, format!("/documents/{}", id), Some(payload))
            .await
    }
}

/// Blob store operations, scoped to one document.
pub struct Blobs<'a> {
    pub(crate) client: &'a Client,
    pub(crate) document: &'a str,
}

impl Blobs<'_> {
    /// Stores a blob under the document.
    pub async fn create(&self, blob: &str, data: impl Into<String>) -> Result<()> {
        self.client
            .ack(
                Method::POST,
                format!("/documents/{}/blobs/{}", self.document, blob),
                Some(json!({ "data": data.into() })),
            )
            .await
    }

    /// Fetches a blob.
    pub async fn get(&self, blob: &str) -> Result<Value> {
        self.client
            .value(
                Method::GET,
                format!("/documents/{}/blobs/{}", self.document, blob),
                None,
            )
            .await
    }

    /// Deletes a blob.
    pub async fn delete(&self, blob: &str) -> Result<()> {
        self.client
            .ack(
                Method::DELETE,
                format!("/documents/{}/blobs/{}", self.document, blob),
                None,
            )
            .await
    }

    /// Lists the document's blobs.
    pub async fn list(&self) -> Result<Value> {
        self.client
            .value(
                Method::GET,
                format!("/documents/{}/blobs", self.document),
                None,
            )
            .await
    }
}

/// Publication operations.
pub struct Publications<'a> {
    pub(crate) client: &'a Client,
}

impl Publications<'_> {
    /// Publishes a document to a network.
    pub async fn create(&self, document: &str, network: &str) -> Result<Value> {
        match self.client.path_style() {
            PathStyle::Flat => {
                self.client
                    .value(
                        Method::POST,
                        "/publications".to_string(),
                        Some(json!({ "document": document, "network": network })),
                    )
                    .await
            }
            PathStyle::Nested => {
                self.client
                    .value(
                        Method::POST,
                        format!("/documents/{}/publications", document),
                        Some(json!({ "network": network })),
                    )
                    .await
            }
        }
    }

    /// Deletes a publication. Under the flat convention `publication`
    /// is the publication id; under the nested convention it is the
    /// network name, scoped by `document`.
    pub async fn delete(&self, document: &str, publication: &str) -> Result<()> {
        let path = match self.client.path_style() {
            PathStyle::Flat => format!("/publications/{}", publication),
            PathStyle::Nested => {
                format!("/documents/{}/publications/{}", document, publication)
            }
        };
        self.client.ack(Method::DELETE, path, None).await
    }

    /// Lists the publications of a document.
    pub async fn list(&self, document: &str) -> Result<Value> {
        match self.client.path_style() {
            PathStyle::Flat => {
                self.client
                    .value(
                        Method::GET,
                        "/publications".to_string(),
                        Some(json!({ "document": document })),
                    )
                    .await
            }
            PathStyle::Nested => {
                self.client
                    .value(
                        Method::GET,
                        format!("/documents/{}/publications", document),
                        None,
                    )
                    .await
            }
        }
    }
}

/// Version operations.
pub struct Versions<'a> {
    pub(crate) client: &'a Client,
}

impl Versions<'_> {
    /// Publishes a new version of a document. The version data is
    /// JSON-encoded into a string inside the payload, as the hub
    /// expects.
    pub async fn create(&self, document: &str, data: &Value) -> Result<Value> {
        let encoded =
            serde_json::to_string(data).map_err(|e| Error::Serialization(e.to_string()))?;
        match self.client.path_style() {
            PathStyle::Flat => {
                self.client
                    .value(
                        Method::POST,
                        "/versions".to_string(),
                        Some(json!({ "document": document, "data": encoded })),
                    )
                    .await
            }
            PathStyle::Nested => {
                self.client
                    .value(
                        Method::POST,
                        format!("/documents/{}/versions", document),
                        Some(json!({ "data": encoded })),
                    )
                    .await
            }
        }
    }

    /// Deletes all versions of a document, taking it offline.
    pub async fn unpublish(&self, document: &str) -> Result<()> {
        match self.client.path_style() {
            PathStyle::Flat => {
                self.client
                    .ack(
                        Method::DELETE,
                        "/versions".to_string(),
                        Some(json!({ "document": document })),
                    )
                    .await
            }
            PathStyle::Nested => {
                self.client
                    .ack(
                        Method::DELETE,
                        format!("/documents/{}/versions", document),
                        None,
                    )
                    .await
            }
        }
    }
}

/// Collaborator operations.
pub struct Collaborators<'a> {
    pub(crate) client: &'a Client,
}

impl Collaborators<'_> {
    /// Lists the collaborators of a document.
    pub async fn list(&self, document: &str) -> Result<Value> {
        match self.client.path_style() {
            PathStyle::Flat => {
                self.client
                    .value(
                        Method::GET,
                        "/collaborators".to_string(),
                        Some(json!({ "document": document })),
                    )
                    .await
            }
            PathStyle::Nested => {
                self.client
                    .value(
                        Method::GET,
                        format!("/documents/{}/collaborators", document),
                        None,
                    )
                    .await
            }
        }
    }

    /// Grants a collaborator access to a document.
    pub async fn create(&self, document: &str, collaborator: &str) -> Result<Value> {
        match self.client.path_style() {
            PathStyle::Flat => {
                self.client
                    .value(
                        Method::POST,
                        "/collaborators".to_string(),
                        Some(json!({ "collaborator": collaborator, "document": document })),
                    )
                    .await
            }
            PathStyle::Nested => {
                self.client
                    .value(
                        Method::POST,
                        format!("/documents/{}/collaborators", document),
                        Some(json!({ "collaborator": collaborator })),
                    )
                    .await
            }
        }
    }

    /// Revokes a collaborator's access.
    pub async fn delete(&self, document: &str, collaborator: &str) -> Result<()> {
        let path = match self.client.path_style() {
            PathStyle::Flat => format!("/collaborators/{}", collaborator),
            PathStyle::Nested => {
                format!("/documents/{}/collaborators/{}", document, collaborator)
            }
        };
        self.client.ack(Method::DELETE, path, None).await
    }
}

/// Network listing.
pub struct Networks<'a> {
    pub(crate) client: &'a Client,
}

impl Networks<'_> {
    /// Lists all available networks.
    pub async fn list(&self) -> Result<Value> {
        self.client
            .value(Method::GET, "/networks".to_string(), None)
            .await
    }
}

/// Change-track operations, scoped to one track.
pub struct Changes<'a> {
    pub(crate) client: &'a Client,
    pub(crate) track: &'a str,
}

impl Changes<'_> {
    /// Fetches changes on the track after the caller's position.
    pub async fn get(&self, last: Option<&str>, since: Option<&str>) -> Result<Value> {
        let mut payload = serde_json::Map::new();
        if let Some(last) = last {
            payload.insert("last".to_string(), Value::String(last.to_string()));
        }
        if let Some(since) = since {
            payload.insert("since".to_string(), Value::String(since.to_string()));
        }
        self.client
            .value(
                Method::GET,
                format!("/changes/{}", self.track),
                Some(Value::Object(payload)),
            )
            .await
    }

    /// Fetches the latest change on the track.
    pub async fn last(&self) -> Result<Value> {
        self.client
            .value(Method::GET, format!("/changes/{}/last", self.track), None)
            .await
    }

    /// Applies a change command to the track.
    pub async fn apply(&self, command: Value) -> Result<Value> {
        self.client
            .value(
                Method::PUT,
                format!("/changes/{}", self.track),
                Some(json!({ "command": command })),
            )
            .await
    }
}
