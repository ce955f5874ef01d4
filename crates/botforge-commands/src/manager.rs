//! The command manager — owner of the registry, the cooldown tracker, and
//! the platform handle.
//!
//! All collaborators arrive through the constructor (explicit dependency
//! injection; nothing global).  The manager serializes access to its own
//! state through `&mut self`: callers wanting concurrent access wrap it in
//! their own mutual exclusion, as [`crate::plugin::CommandFunctions`] does.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use botforge_platform::{CommandPayload, CommandPlatform};

use crate::config::ManagerConfig;
use crate::cooldown::CooldownTracker;
use crate::error::{CommandError, Result};
use crate::loader::{LoadReport, load_dir};
use crate::registry::CommandRegistry;
use crate::sync::{self, SyncReport};
use crate::validate;

/// Coordinates discovery, registration, synchronization, and cooldowns.
pub struct CommandManager {
    platform: Arc<dyn CommandPlatform>,
    config: ManagerConfig,
    registry: CommandRegistry,
    cooldowns: CooldownTracker,
    /// Most recently loaded root, the `reload` target.
    last_directory: Option<PathBuf>,
}

impl CommandManager {
    /// Create a manager.  When the configuration names a `path`, that
    /// directory is loaded immediately.
    pub fn new(platform: Arc<dyn CommandPlatform>, config: ManagerConfig) -> Result<Self> {
        let mut manager = Self {
            platform,
            config,
            registry: CommandRegistry::new(),
            cooldowns: CooldownTracker::new(),
            last_directory: None,
        };

        if let Some(path) = manager.config.path.clone() {
            manager.load(&path)?;
        }
        Ok(manager)
    }

    /// Load (additively) every command manifest under `dir`.
    ///
    /// On success the resolved directory becomes the [`Self::reload`]
    /// target.  The registry is not cleared first; call [`Self::clear`]
    /// for a clean reload.
    pub fn load(&mut self, dir: &Path) -> Result<LoadReport> {
        let report = load_dir(dir, &mut self.registry)?;

        if report.loaded == 0 && self.config.require_valid_commands {
            return Err(CommandError::NoValidCommands {
                path: report.directory,
                failures: report.failures.len(),
            });
        }

        self.last_directory = Some(report.directory.clone());
        if self.config.show_summary {
            tracing::info!("{}", report.summary());
        }
        Ok(report)
    }

    /// Re-walk the most recently loaded directory.
    pub fn reload(&mut self) -> Result<LoadReport> {
        let dir = self
            .last_directory
            .clone()
            .ok_or_else(|| CommandError::Config("no command directory has been loaded".into()))?;
        self.load(&dir)
    }

    /// Empty the registry.  Chainable; cooldown state is left untouched.
    pub fn clear(&mut self) -> &mut Self {
        self.registry.clear();
        self
    }

    /// The registry's current contents.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The recorded reload target, if any load has succeeded.
    pub fn last_directory(&self) -> Option<&Path> {
        self.last_directory.as_deref()
    }

    /// Synchronize the registry snapshot to the remote platform.
    ///
    /// `None` falls back to the configured default destinations; when those
    /// are empty too, the global scope is replaced.
    pub async fn sync(&self, destinations: Option<&[String]>) -> Result<SyncReport> {
        let snapshot = self.registry.snapshot();

        if self.config.validate_on_sync {
            for descriptor in &snapshot {
                validate::check(descriptor)?;
            }
        }

        let payloads: Vec<CommandPayload> =
            snapshot.iter().map(|desc| desc.to_payload()).collect();

        let destinations = match destinations {
            Some(ids) => Some(ids),
            None if self.config.destinations.is_empty() => None,
            None => Some(self.config.destinations.as_slice()),
        };

        sync::sync(self.platform.as_ref(), &payloads, destinations).await
    }

    /// Record one invocation attempt of `command` by `user`, returning
    /// whether it was throttled.
    ///
    /// Same check-and-arm contract as [`CooldownTracker::try_use`]: call at
    /// most once per actual invocation attempt.  Unknown and unthrottled
    /// commands are never throttled and create no state.
    pub fn try_use_cooldown(&mut self, command: &str, user: &str) -> bool {
        match self.registry.cooldown_of(command) {
            Some(cooldown) => self.cooldowns.try_use(command, user, cooldown),
            None => false,
        }
    }

    /// Remaining cooldown for a pair; zero when not throttled.  Pure read.
    pub fn cooldown_remaining(&self, command: &str, user: &str) -> Duration {
        self.cooldowns.remaining(command, user)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
