//! The in-memory command registry.
//!
//! The registry is the authoritative name → descriptor mapping.  Every
//! descriptor it holds has passed validation; failed candidates never touch
//! it.  Loads are additive — loading a second directory merges into the
//! existing set, and a later descriptor with an existing name overwrites
//! the earlier one (last writer wins).
//!
//! Mutation is not internally synchronized: callers serialize
//! `load`/`clear`/`sync` per instance, per the single-owner model.

use std::collections::HashMap;
use std::time::Duration;

use crate::types::CommandDescriptor;

/// Name-keyed store of validated command descriptors.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every descriptor.  Chainable.
    pub fn clear(&mut self) -> &mut Self {
        self.commands.clear();
        self
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Look up a descriptor by name.
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    /// Insert or overwrite a descriptor, keyed by its name.
    ///
    /// Returns the previous descriptor of the same name, if any.
    pub fn upsert(&mut self, descriptor: CommandDescriptor) -> Option<CommandDescriptor> {
        self.commands.insert(descriptor.name.clone(), descriptor)
    }

    /// Snapshot of all descriptors, in unspecified order.
    ///
    /// Callers needing determinism must sort by name.
    pub fn snapshot(&self) -> Vec<CommandDescriptor> {
        self.commands.values().cloned().collect()
    }

    /// The configured cooldown of a command, or `None` when the command is
    /// unknown or unthrottled.
    pub fn cooldown_of(&self, name: &str) -> Option<Duration> {
        self.commands.get(name).and_then(|cmd| cmd.cooldown)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
