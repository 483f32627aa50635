//! Typed client for the Teams chat service message endpoints.
//!
//! Every call is a single blocking request: the endpoint is resolved for the
//! configured region, credentials are attached, the response status is checked
//! against the one status the operation accepts, and JSON bodies are decoded
//! into typed values.
//!
//! # Example
//!
//! ```no_run
//! use teams_client::{Channel, Credentials, DecodeMode, Region, TeamsClient};
//!
//! # fn example() -> teams_client::Result<()> {
//! let client = TeamsClient::builder()
//!     .region(Region::Emea)
//!     .credentials(Credentials::bearer("token"))
//!     .decode_mode(DecodeMode::Strict)
//!     .build()?;
//!
//! let messages = client.messages();
//! let channel = Channel::new("19:abc@thread.v2");
//!
//! let page = messages.fetch(&channel)?;
//! if let Some(first) = page.first() {
//!     messages.react(&channel.id, &first.id, "like")?;
//! }
//! messages.send(&channel.id, "hello")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Operations
//!
//! | Operation | Method | Expected status |
//! |---|---|---|
//! | [`MessagesApi::fetch`] | `GET` | 200 |
//! | [`MessagesApi::send`] | `POST` | 201 |
//! | [`MessagesApi::react`] | `PUT` | 200 |
//! | [`MessagesApi::unreact`] | `DELETE` | 200 |
//! | [`MessagesApi::delete`] | `DELETE` | 200 |
//!
//! Only the first page (200 messages) of a channel is fetched.

pub mod api;
pub mod auth;
pub mod body;
pub mod client;
pub mod diagnostics;
pub mod endpoint;
pub mod error;
pub mod response;
pub mod transport;
pub mod types;

pub use api::MessagesApi;
pub use auth::{Credentials, RequestBuilder, TokenProvider};
pub use client::{ClientBuilder, ClientOptions, TeamsClient};
pub use diagnostics::{DiagnosticSink, FileDumpSink, NoopSink};
pub use endpoint::{Endpoint, EndpointResolver, Region};
pub use error::{Error, Result};
pub use response::DecodeMode;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportConfig};
pub use types::*;
