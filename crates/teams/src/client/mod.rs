//! Builds the chat service client from the loaded configuration.

use std::time::Duration;

use anyhow::Result;
use teams_client::{
    ClientOptions, Credentials, DecodeMode, TeamsClient, TransportConfig,
    body::DEFAULT_DISPLAY_NAME,
};
use teams_config::TeamsConfig;

/// Map config values onto client options.
pub fn client_options(config: &TeamsConfig) -> ClientOptions {
    ClientOptions {
        decode_mode: if config.strict_decode {
            DecodeMode::Strict
        } else {
            DecodeMode::Lenient
        },
        debug_save: config.debug_save,
        display_name: config
            .display_name
            .clone()
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
    }
}

/// Create a client, resolving tokens from their configured sources.
pub fn build(config: &TeamsConfig) -> Result<TeamsClient> {
    let region = config.region;
    let tokens = config.auth.resolve()?;
    let mut credentials = Credentials::bearer(tokens.bearer);
    if let Some(skype) = tokens.skype {
        credentials = credentials.with_skype(skype);
    }

    let timeout = (config.timeout > 0).then(|| Duration::from_secs(config.timeout));
    tracing::debug!(%region, ?timeout, strict = config.strict_decode, "building client");

    let mut builder = TeamsClient::builder()
        .region(region)
        .credentials(credentials)
        .transport_config(TransportConfig::default().with_timeout(timeout))
        .options(client_options(config));
    if let Some(url) = &config.messages_url {
        builder = builder.messages_url(url.as_str());
    }
    if let Some(dir) = config.dump_dir() {
        builder = builder.dump_dir(dir);
    }

    Ok(builder.build()?)
}
