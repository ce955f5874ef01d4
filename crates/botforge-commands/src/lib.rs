//! Application-command registry and synchronization engine for botforge.
//!
//! This crate provides:
//!
//! - **Manifest parser** — declarative `.json`/`.toml` command definitions,
//!   one command or many per file.
//!
//! - **Discovery loader** — walks a directory tree, validates every
//!   candidate, and populates the registry; per-candidate failures are
//!   collected without aborting the walk.
//!
//! - **Registry** — the authoritative in-memory name → descriptor mapping.
//!
//! - **Cooldown tracker** — per-(command, user) throttle windows with
//!   explicit check-and-arm semantics.
//!
//! - **Synchronizer** — full-replace reconciliation of the registry against
//!   the global scope or independent per-destination scopes of a
//!   [`botforge_platform::CommandPlatform`].
//!
//! - **Command manager** — the dependency-injected owner tying the above
//!   together, bridged to host bot frameworks via
//!   [`plugin::CommandFunctions`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use botforge_commands::{CommandManager, ManagerConfig};
//! use botforge_platform::DiscordPlatform;
//!
//! # async fn run() -> botforge_commands::Result<()> {
//! let platform = Arc::new(DiscordPlatform::with_token("app-id", "token"));
//! let mut manager = CommandManager::new(platform, ManagerConfig::default())?;
//!
//! manager.load("commands".as_ref())?;
//! manager.sync(None).await?.into_result()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod cooldown;
pub mod error;
pub mod loader;
pub mod manager;
pub mod manifest;
pub mod plugin;
pub mod registry;
pub mod sync;
pub mod types;
pub mod validate;

#[cfg(test)]
mod testing;

pub use config::ManagerConfig;
pub use cooldown::CooldownTracker;
pub use error::{CommandError, Result};
pub use loader::{LoadFailure, LoadReport, load_dir};
pub use manager::CommandManager;
pub use manifest::{ManifestFormat, parse_manifest};
pub use plugin::CommandFunctions;
pub use registry::CommandRegistry;
pub use sync::SyncReport;
pub use types::{CommandDescriptor, CommandKind, CommandOption, RawCommand, RawOption};
pub use validate::validate;
