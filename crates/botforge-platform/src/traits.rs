//! Core platform traits and wire types.
//!
//! [`CommandPlatform`] is the capability the command core publishes through;
//! [`BotPlugin`] is the surface a host bot framework pulls callable
//! functions from.  Both are object-safe so the core can hold
//! `Arc<dyn CommandPlatform>` and hosts can hold `Box<dyn BotPlugin>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One application command as submitted to the remote command API.
///
/// This is the wire shape only: local bookkeeping (cooldowns, source paths)
/// never appears here.  Unrecognized platform-specific fields travel in
/// `extra` and are serialized inline, so descriptors can pass fields the
/// core does not interpret straight through to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    /// Command name, 1-32 characters.
    pub name: String,

    /// Command description, 1-100 characters.
    pub description: String,

    /// Application-command kind discriminant (1 = chat input, 2 = user
    /// context, 3 = message context).  Omitted for the chat-input default.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,

    /// Ordered command options, at most 25.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PayloadOption>,

    /// Opaque platform-specific fields passed through untouched
    /// (permissions, localizations, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One option of a command payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadOption {
    /// Option name.
    pub name: String,

    /// Option description.
    pub description: String,

    /// Opaque option fields (type, required, choices, ...) passed through.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A resolved remote destination (e.g. one guild/server).
///
/// Handles are produced by [`CommandPlatform::fetch_destination`] or its
/// local cache and passed back when replacing that destination's command
/// set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationHandle {
    /// The destination's unique id.
    pub id: String,

    /// Human-readable destination name, when the platform provides one.
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Remote command API capability
// ---------------------------------------------------------------------------

/// The remote application-command API as seen by the command core.
///
/// Replacement calls are bulk overwrites: the submitted list becomes the
/// complete command set for that scope.  Repeating a call with an unchanged
/// list is a remote no-op, which is what makes synchronization idempotent
/// without local diffing.
#[async_trait]
pub trait CommandPlatform: Send + Sync {
    /// Whether the platform connection is live and able to take calls.
    fn is_ready(&self) -> bool;

    /// Replace the global application-scoped command set.
    ///
    /// The call is atomic at this granularity: on failure no partial
    /// application may be assumed.
    async fn replace_global_commands(&self, commands: &[CommandPayload]) -> Result<()>;

    /// Replace the command set of one destination.
    async fn replace_destination_commands(
        &self,
        destination: &DestinationHandle,
        commands: &[CommandPayload],
    ) -> Result<()>;

    /// Look up a destination handle in the local cache, without touching
    /// the network.
    fn cached_destination(&self, id: &str) -> Option<DestinationHandle>;

    /// Resolve a destination id remotely.
    ///
    /// Implementations should populate their cache on success so later
    /// [`Self::cached_destination`] calls hit.
    async fn fetch_destination(&self, id: &str) -> Result<DestinationHandle>;
}

// ---------------------------------------------------------------------------
// Host plugin surface
// ---------------------------------------------------------------------------

/// A function a plugin contributes to the host's scripting surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Machine-readable function name (e.g. `command_sync`).
    pub name: String,

    /// Human-readable description of what the function does.
    pub description: String,

    /// JSON Schema describing the function's input parameters.
    pub parameters: serde_json::Value,
}

/// A bundle of callable functions exposed to a host bot framework.
///
/// The host discovers functions via [`BotPlugin::functions`] and executes
/// them via [`BotPlugin::invoke`]; failures surface through the host's own
/// error-reporting convention as [`crate::PlatformError`] values.
#[async_trait]
pub trait BotPlugin: Send + Sync {
    /// Return the unique identifier for this plugin instance.
    fn id(&self) -> &str;

    /// Return the functions this plugin exposes.
    fn functions(&self) -> Vec<FunctionDefinition>;

    /// Execute a named function with the given JSON parameters.
    async fn invoke(&self, name: &str, params: serde_json::Value) -> Result<serde_json::Value>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
