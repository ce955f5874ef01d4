//! Command descriptor types.
//!
//! A [`RawCommand`] is whatever a manifest file deserialized into — every
//! field optional, nothing guaranteed.  Only [`crate::validate::validate`]
//! turns a raw command into a [`CommandDescriptor`], so any descriptor held
//! by the registry has already passed validation.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use botforge_platform::{CommandPayload, PayloadOption};

/// The platform's application-command kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// A slash command invoked by typing its name.
    #[default]
    ChatInput,
    /// A command invoked from a user's context menu.
    UserContext,
    /// A command invoked from a message's context menu.
    MessageContext,
}

impl CommandKind {
    /// The wire discriminant, or `None` for the chat-input default, which
    /// the remote API infers when the field is omitted.
    pub fn wire_discriminant(self) -> Option<u8> {
        match self {
            Self::ChatInput => None,
            Self::UserContext => Some(2),
            Self::MessageContext => Some(3),
        }
    }
}

/// One validated command option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option name, non-empty.
    pub name: String,

    /// Option description, non-empty.
    pub description: String,

    /// Opaque option fields (type, required, choices, ...) passed through
    /// to the wire untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A command candidate as read from a manifest, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCommand {
    /// Command name.
    pub name: Option<String>,

    /// Command description.
    pub description: Option<String>,

    /// Application-command kind; defaults to chat input when absent.
    #[serde(rename = "type")]
    pub kind: Option<CommandKind>,

    /// Command options.
    pub options: Option<Vec<RawOption>>,

    /// Per-user cooldown in milliseconds; absent or zero means no throttle.
    pub cooldown_ms: Option<u64>,

    /// Restrict the command to guild destinations.
    pub guild_only: Option<bool>,

    /// Platform-specific fields the core does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One command option as read from a manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawOption {
    /// Option name.
    pub name: Option<String>,

    /// Option description.
    pub description: Option<String>,

    /// Opaque option fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A validated, canonical command ready for registration and sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    /// Unique registry key, 1-32 characters.
    pub name: String,

    /// Command description, 1-100 characters.
    pub description: String,

    /// Application-command kind.
    #[serde(default)]
    pub kind: CommandKind,

    /// Validated options, at most 25.
    #[serde(default)]
    pub options: Vec<CommandOption>,

    /// Per-user cooldown window.  `None` means no throttle; a zero value
    /// from the manifest is normalized to `None` during validation.
    #[serde(default)]
    pub cooldown: Option<Duration>,

    /// Whether the command is restricted to guild destinations.
    #[serde(default)]
    pub guild_only: bool,

    /// Opaque platform-specific fields (permissions, localizations, ...)
    /// forwarded to the wire without interpretation.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,

    /// The manifest file this descriptor was loaded from, when loaded from
    /// disk.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl CommandDescriptor {
    /// Project the descriptor into its wire form.
    ///
    /// Local-only bookkeeping (cooldown, guild-only flag, source path) is
    /// dropped; the opaque passthrough fields are kept.
    pub fn to_payload(&self) -> CommandPayload {
        CommandPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind.wire_discriminant(),
            options: self
                .options
                .iter()
                .map(|opt| PayloadOption {
                    name: opt.name.clone(),
                    description: opt.description.clone(),
                    extra: opt.extra.clone(),
                })
                .collect(),
            extra: self.extra.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor(name: &str) -> CommandDescriptor {
        CommandDescriptor {
            name: name.into(),
            description: "A command.".into(),
            kind: CommandKind::default(),
            options: Vec::new(),
            cooldown: None,
            guild_only: false,
            extra: serde_json::Map::new(),
            source: None,
        }
    }

    #[test]
    fn chat_input_omits_wire_kind() {
        let payload = descriptor("ping").to_payload();
        assert_eq!(payload.kind, None);
    }

    #[test]
    fn context_kinds_carry_discriminants() {
        let mut desc = descriptor("whois");
        desc.kind = CommandKind::UserContext;
        assert_eq!(desc.to_payload().kind, Some(2));

        desc.kind = CommandKind::MessageContext;
        assert_eq!(desc.to_payload().kind, Some(3));
    }

    #[test]
    fn payload_drops_local_fields_keeps_passthrough() {
        let mut desc = descriptor("ban");
        desc.cooldown = Some(Duration::from_millis(5000));
        desc.guild_only = true;
        desc.extra
            .insert("default_member_permissions".into(), json!("8"));

        let wire = serde_json::to_value(desc.to_payload()).unwrap();
        assert_eq!(wire["default_member_permissions"], "8");
        assert!(wire.get("cooldown").is_none());
        assert!(wire.get("cooldown_ms").is_none());
        assert!(wire.get("guild_only").is_none());
    }

    #[test]
    fn raw_command_collects_unknown_fields() {
        let raw: RawCommand = serde_json::from_value(json!({
            "name": "greet",
            "description": "Say hello.",
            "dm_permission": false,
        }))
        .unwrap();

        assert_eq!(raw.name.as_deref(), Some("greet"));
        assert_eq!(raw.extra["dm_permission"], json!(false));
    }
}
