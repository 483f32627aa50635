//! Main client implementation.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Method;
use url::Url;

use crate::api::MessagesApi;
use crate::auth::{RequestBuilder, TokenProvider};
use crate::body::DEFAULT_DISPLAY_NAME;
use crate::diagnostics::{DiagnosticSink, FileDumpSink};
use crate::endpoint::{Endpoint, EndpointResolver, Region};
use crate::error::{Error, Result};
use crate::response::{self, DecodeMode, StrictDecode};
use crate::transport::{HttpResponse, ReqwestTransport, Transport, TransportConfig};
use crate::types::{Channel, ChatMessage};

/// Directory raw responses are dumped to when no sink is configured.
pub const DEFAULT_DUMP_DIR: &str = "teams-debug";

/// Per-client behaviour switches.
///
/// Fixed when the client is built. Use [`TeamsClient::with_options`] to get a
/// client with different settings instead of mutating shared state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// How unknown response fields are treated.
    pub decode_mode: DecodeMode,
    /// Hand raw response bodies to the diagnostic sink before decoding.
    pub debug_save: bool,
    /// `imdisplayname` sent with new messages.
    pub display_name: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            decode_mode: DecodeMode::Lenient,
            debug_save: false,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
        }
    }
}

/// Chat service client.
///
/// Cheap to clone; clones share the transport and credentials.
///
/// # Example
///
/// ```no_run
/// use teams_client::{Channel, Credentials, TeamsClient};
///
/// # fn example() -> teams_client::Result<()> {
/// let client = TeamsClient::builder()
///     .credentials(Credentials::bearer("token").with_skype("skype-token"))
///     .build()?;
///
/// let channel = Channel::new("19:abc@thread.v2");
/// for message in client.get_messages(&channel)? {
///     println!("{}: {:?}", message.id, message.content);
/// }
/// client.send_message(&channel.id, "hello")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TeamsClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
#[derive(Clone)]
pub(crate) struct ClientInner {
    transport: Arc<dyn Transport>,
    resolver: EndpointResolver,
    requests: RequestBuilder,
    sink: Arc<dyn DiagnosticSink>,
    options: ClientOptions,
}

impl TeamsClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Settings this client was built with.
    pub fn options(&self) -> &ClientOptions {
        &self.inner.options
    }

    /// Endpoint resolver in use.
    pub fn resolver(&self) -> &EndpointResolver {
        &self.inner.resolver
    }

    /// Same transport and credentials, different options.
    pub fn with_options(&self, options: ClientOptions) -> Self {
        let mut inner = (*self.inner).clone();
        inner.options = options;
        Self {
            inner: Arc::new(inner),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the messages API.
    pub fn messages(&self) -> MessagesApi {
        MessagesApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Forwarding shortcuts
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the first page of messages in a channel.
    pub fn get_messages(&self, channel: &Channel) -> Result<Vec<ChatMessage>> {
        self.messages().fetch(channel)
    }

    /// Post a message to a channel.
    pub fn send_message(&self, channel: &str, message: &str) -> Result<()> {
        self.messages().send(channel, message)
    }

    /// React to a message.
    pub fn react_to_message(&self, channel: &str, message_id: &str, reaction: &str) -> Result<()> {
        self.messages().react(channel, message_id, reaction)
    }

    /// Remove a reaction from a message.
    pub fn remove_reaction(&self, channel: &str, message_id: &str, reaction: &str) -> Result<()> {
        self.messages().unreact(channel, message_id, reaction)
    }

    /// Soft-delete a message.
    pub fn delete_message(&self, channel: &str, message_id: &str) -> Result<()> {
        self.messages().delete(channel, message_id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request pipeline
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an endpoint path.
    pub(crate) fn url(&self, endpoint: Endpoint, path: &str) -> Result<Url> {
        self.inner.resolver.resolve(endpoint, path)
    }

    /// Send one authenticated request and require `expected` status.
    pub(crate) fn execute(
        &self,
        method: Method,
        url: &Url,
        body: Option<Vec<u8>>,
        expected: u16,
    ) -> Result<HttpResponse> {
        let request = self.inner.requests.build(method, url.as_str(), body)?;
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.inner.transport.send(request)?;
        tracing::debug!(status = response.status, bytes = response.body.len(), "received response");

        response::expect_status(&response, expected)?;
        Ok(response)
    }

    /// Decode a response body with this client's options.
    pub(crate) fn decode<T: StrictDecode>(&self, response: &HttpResponse) -> Result<T> {
        let options = &self.inner.options;
        response::decode(
            response,
            options.decode_mode,
            self.inner.sink.as_ref(),
            options.debug_save,
        )
    }
}

/// Builder for creating a TeamsClient.
#[derive(Default)]
pub struct ClientBuilder {
    region: Region,
    messages_url: Option<String>,
    tokens: Option<Arc<dyn TokenProvider>>,
    transport: Option<Arc<dyn Transport>>,
    transport_config: TransportConfig,
    sink: Option<Arc<dyn DiagnosticSink>>,
    dump_dir: Option<PathBuf>,
    options: ClientOptions,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deployment region.
    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    /// Override the messages endpoint base URL (e.g. `http://127.0.0.1:9000/v1`).
    pub fn messages_url(mut self, url: impl Into<String>) -> Self {
        self.messages_url = Some(url.into());
        self
    }

    /// Set the credential source.
    pub fn token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Use fixed credentials.
    pub fn credentials(self, credentials: crate::auth::Credentials) -> Self {
        self.token_provider(Arc::new(credentials))
    }

    /// Use a custom transport instead of the default reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Settings for the default reqwest transport.
    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport_config = config;
        self
    }

    /// Set a custom diagnostic sink.
    pub fn diagnostic_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Directory for raw response dumps when no custom sink is set.
    pub fn dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }

    /// Set all options at once.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Select the decode mode.
    pub fn decode_mode(mut self, mode: DecodeMode) -> Self {
        self.options.decode_mode = mode;
        self
    }

    /// Enable or disable raw response dumps.
    pub fn debug_save(mut self, enabled: bool) -> Self {
        self.options.debug_save = enabled;
        self
    }

    /// Set the display name sent with new messages.
    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.options.display_name = name.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<TeamsClient> {
        let tokens = self
            .tokens
            .ok_or_else(|| Error::Config("credentials are required".to_string()))?;

        let mut resolver = EndpointResolver::for_region(self.region)?;
        if let Some(url) = &self.messages_url {
            resolver = resolver.with_base(Endpoint::Messages, url)?;
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::with_config(self.transport_config)?),
        };

        let sink = self.sink.unwrap_or_else(|| {
            let dir = self.dump_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DUMP_DIR));
            Arc::new(FileDumpSink::new(dir))
        });

        tracing::debug!(
            region = %resolver.region(),
            messages_url = %resolver.base(Endpoint::Messages),
            decode_mode = ?self.options.decode_mode,
            debug_save = self.options.debug_save,
            "created chat service client"
        );

        Ok(TeamsClient {
            inner: Arc::new(ClientInner {
                transport,
                resolver,
                requests: RequestBuilder::new(tokens),
                sink,
                options: self.options,
            }),
        })
    }
}
