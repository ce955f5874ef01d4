//! Chat-platform seam for botforge — capability traits and the Discord binding.
//!
//! The command core never talks to a chat platform directly.  Everything it
//! needs from the outside world is expressed as two traits defined in
//! [`traits`]:
//!
//! - [`CommandPlatform`] — the remote application-command API: readiness,
//!   bulk replacement of the global or a per-destination command set, and
//!   destination resolution (local cache first, remote fetch as fallback).
//!
//! - [`BotPlugin`] — the host-facing surface: a plugin describes the
//!   functions it contributes and executes them on demand with JSON
//!   parameters.
//!
//! [`discord`] provides the one concrete [`CommandPlatform`] implementation,
//! backed by the Discord REST API (v10).

pub mod discord;
pub mod error;
pub mod traits;

pub use discord::DiscordPlatform;
pub use error::{PlatformError, Result};
pub use traits::{
    BotPlugin, CommandPayload, CommandPlatform, DestinationHandle, FunctionDefinition,
    PayloadOption,
};
