//! # Scribehub - an async client for the Scribe document-collaboration hub
//!
//! Scribehub is a thin, type-safe HTTP client for a document-collaboration
//! hub, built on top of `reqwest`. It covers authentication, documents,
//! blobs, publications, versions, collaborators, networks, change tracks
//! and seeding, and classifies every response into exactly one outcome.
//!
//! ## Quick Start
//!
//! ```no_run
//! use scribehub::Client;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), scribehub::Error> {
//!     let client = Client::builder()
//!         .hub_url("https://hub.example.com")?
//!         .client_id("my-app")
//!         .client_secret("s3cret")
//!         .build()?;
//!
//!     // Obtain a session token; it is attached to every later request.
//!     client.authenticate("alice", "wonderland").await?;
//!
//!     // Create and publish a document.
//!     client.documents().create("manifesto", json!({})).await?;
//!     client.publications().create("manifesto", "public").await?;
//!
//!     let docs = client.documents().list().await?;
//!     println!("documents: {docs}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Outcomes
//!
//! Every call resolves exactly once: either to a [`ResponseBody`] (a
//! decoded JSON value, raw text in raw mode, or JSON `true` for an empty
//! success body) or to an [`Error`]. Error statuses with a JSON body are
//! delivered decoded ([`Error::Api`]); anything else arrives as raw text
//! ([`Error::Http`]). Nothing is retried; every failure surfaces to the
//! immediate caller.
//!
//! ## Wire conventions
//!
//! Hub deployments differ in how store collections are addressed:
//! older ones use flat top-level paths (`/publications` with the
//! document in the payload), newer ones scope them under the document
//! (`/documents/{id}/publications`). Select the convention with
//! [`PathStyle`] on the builder; the default is nested.
//!
//! ```no_run
//! use scribehub::{Client, PathStyle};
//!
//! # fn example() -> Result<(), scribehub::Error> {
//! let client = Client::builder()
//!     .hub_url("https://legacy-hub.example.com")?
//!     .path_style(PathStyle::Flat)
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod error;
mod request;
mod response;
mod transport;

pub use api::{
    Blobs, Changes, Collaborators, CommitRange, Documents, Networks, Publications, UpdateOptions,
    Versions,
};
pub use client::{Authorization, Client, ClientBuilder, NewUser, PathStyle};
pub use error::{Error, Result};
pub use request::Request;
pub use response::ResponseBody;
pub use transport::Transport;
