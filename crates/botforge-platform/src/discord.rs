//! Discord REST binding for the [`CommandPlatform`] capability.
//!
//! Talks to the Discord Bot API (v10) application-command endpoints.  Both
//! replacement calls are bulk overwrites (`PUT`), which Discord applies
//! atomically per scope.  Destination (guild) handles resolved over the
//! network are cached so repeated syncs to the same destinations stay cheap.

use dashmap::DashMap;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{PlatformError, Result};
use crate::traits::{CommandPayload, CommandPlatform, DestinationHandle};

use async_trait::async_trait;

/// Discord API v10 base URL.
const API_BASE_URL: &str = "https://discord.com/api/v10";

/// Discord implementation of [`CommandPlatform`].
///
/// Authentication uses a bot token; command endpoints additionally need the
/// application id.  The platform reports ready only after [`Self::connect`]
/// has verified the credentials against the API.
pub struct DiscordPlatform {
    /// The application id owning the command sets.
    application_id: String,
    /// Discord bot token for authentication.
    bot_token: Option<String>,
    /// Whether `connect` has succeeded.
    connected: bool,
    /// Resolved guild handles, keyed by guild id.
    destinations: DashMap<String, DestinationHandle>,
    /// HTTP client for making requests.
    http: reqwest::Client,
    /// Base URL, overridable for tests.
    base_url: String,
}

impl DiscordPlatform {
    /// Create a new Discord platform binding with no token.
    pub fn new(application_id: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("botforge/0.1")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            application_id: application_id.into(),
            bot_token: None,
            connected: false,
            destinations: DashMap::new(),
            http,
            base_url: API_BASE_URL.to_owned(),
        }
    }

    /// Create a binding with a pre-configured bot token.
    pub fn with_token(application_id: impl Into<String>, bot_token: impl Into<String>) -> Self {
        let mut platform = Self::new(application_id);
        platform.bot_token = Some(bot_token.into());
        platform
    }

    /// Override the API base URL.  Intended for tests against a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Verify credentials against the API and mark the binding ready.
    pub async fn connect(&mut self) -> Result<()> {
        let token = self.resolve_token()?;
        let url = format!("{}/applications/@me", self.base_url);

        let response = self.authorized(self.http.get(&url), &token).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), response.json().await.ok()));
        }

        self.connected = true;
        info!(application_id = %self.application_id, "discord platform connected");
        Ok(())
    }

    /// Mark the binding as no longer ready.
    pub fn disconnect(&mut self) {
        self.connected = false;
        info!(application_id = %self.application_id, "discord platform disconnected");
    }

    /// Resolve the bot token, returning an error if none is available.
    fn resolve_token(&self) -> Result<String> {
        self.bot_token
            .clone()
            .ok_or_else(|| PlatformError::AuthRequired {
                platform: "discord".to_owned(),
            })
    }

    /// Attach the bot authorization header to a request.
    fn authorized(&self, req: reqwest::RequestBuilder, token: &str) -> reqwest::RequestBuilder {
        req.header("Authorization", format!("Bot {token}"))
            .header("Content-Type", "application/json")
    }

    /// Bulk-overwrite a command scope with `commands`.
    ///
    /// Fails fast with [`PlatformError::NotReady`] before any network call
    /// when the binding has not been connected.
    async fn put_commands(&self, url: &str, commands: &[CommandPayload]) -> Result<()> {
        if !self.is_ready() {
            return Err(PlatformError::NotReady);
        }
        let token = self.resolve_token()?;

        let response = self
            .authorized(self.http.put(url), &token)
            .json(commands)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status.as_u16(), response.json().await.ok()));
        }

        debug!(url = %url, count = commands.len(), "command set replaced");
        Ok(())
    }
}

/// Shape a non-success Discord response into a [`PlatformError`].
fn api_error(status: u16, body: Option<Value>) -> PlatformError {
    let reason = body
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|v| v.as_str())
        .unwrap_or("unknown error")
        .to_owned();
    PlatformError::Api { status, reason }
}

#[async_trait]
impl CommandPlatform for DiscordPlatform {
    fn is_ready(&self) -> bool {
        self.connected && self.bot_token.is_some()
    }

    async fn replace_global_commands(&self, commands: &[CommandPayload]) -> Result<()> {
        let url = format!(
            "{}/applications/{}/commands",
            self.base_url, self.application_id
        );
        self.put_commands(&url, commands).await
    }

    async fn replace_destination_commands(
        &self,
        destination: &DestinationHandle,
        commands: &[CommandPayload],
    ) -> Result<()> {
        let url = format!(
            "{}/applications/{}/guilds/{}/commands",
            self.base_url, self.application_id, destination.id
        );
        self.put_commands(&url, commands).await
    }

    fn cached_destination(&self, id: &str) -> Option<DestinationHandle> {
        self.destinations.get(id).map(|entry| entry.clone())
    }

    async fn fetch_destination(&self, id: &str) -> Result<DestinationHandle> {
        if !self.is_ready() {
            return Err(PlatformError::NotReady);
        }
        let token = self.resolve_token()?;
        let url = format!("{}/guilds/{}", self.base_url, id);

        let response = self.authorized(self.http.get(&url), &token).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PlatformError::DestinationNotFound { id: id.to_owned() });
        }
        if !status.is_success() {
            return Err(api_error(status.as_u16(), response.json().await.ok()));
        }

        let body: Value = response.json().await?;
        let handle = DestinationHandle {
            id: id.to_owned(),
            name: body.get("name").and_then(|v| v.as_str()).map(str::to_owned),
        };

        self.destinations.insert(id.to_owned(), handle.clone());
        debug!(destination = %id, "destination resolved and cached");
        Ok(handle)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
