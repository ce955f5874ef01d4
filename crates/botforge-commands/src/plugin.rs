//! Host plugin bridge — exposes the manager as three callable functions.
//!
//! A host bot framework pulls [`FunctionDefinition`]s from this plugin and
//! invokes them with JSON parameters:
//!
//! - `command_sync` — publish the registry, optionally to an explicit
//!   destination list.
//! - `command_reload` — re-walk the last loaded command directory.
//! - `command_cooldown` — record an invocation attempt and report the
//!   remaining cooldown in milliseconds (zero when not throttled).
//!
//! Failures map into the host's error convention as [`PlatformError`]
//! values; the manager's own error types never cross this boundary.

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Mutex;

use botforge_platform::{BotPlugin, FunctionDefinition, PlatformError, Result};

use crate::manager::CommandManager;

/// The sync function name.
pub const FN_SYNC: &str = "command_sync";
/// The reload function name.
pub const FN_RELOAD: &str = "command_reload";
/// The cooldown-check function name.
pub const FN_COOLDOWN: &str = "command_cooldown";

/// [`BotPlugin`] implementation over a [`CommandManager`].
///
/// The manager's `&mut` API is serialized behind a mutex so the plugin can
/// satisfy the host's shared-reference invocation contract.
pub struct CommandFunctions {
    id: String,
    manager: Mutex<CommandManager>,
}

impl CommandFunctions {
    /// Wrap a manager for host registration.
    pub fn new(manager: CommandManager) -> Self {
        Self {
            id: "commands".to_owned(),
            manager: Mutex::new(manager),
        }
    }

    async fn invoke_sync(&self, params: Value) -> Result<Value> {
        let destinations = parse_destinations(&params)?;

        let manager = self.manager.lock().await;
        if manager.registry().is_empty() {
            return Err(execution_failed(FN_SYNC, "cannot sync an empty command set"));
        }

        let report = manager
            .sync(destinations.as_deref())
            .await
            .and_then(|report| report.into_result())
            .map_err(|e| execution_failed(FN_SYNC, e))?;

        Ok(json!({
            "global": report.global,
            "destinations": report.succeeded,
        }))
    }

    async fn invoke_reload(&self) -> Result<Value> {
        let mut manager = self.manager.lock().await;
        let report = manager
            .reload()
            .map_err(|e| execution_failed(FN_RELOAD, e))?;

        Ok(json!({
            "loaded": report.loaded,
            "failures": report.failures.len(),
        }))
    }

    async fn invoke_cooldown(&self, params: Value) -> Result<Value> {
        let command = require_str(&params, "command", FN_COOLDOWN)?;
        let user = require_str(&params, "user", FN_COOLDOWN)?;

        let mut manager = self.manager.lock().await;
        let throttled = manager.try_use_cooldown(&command, &user);
        let remaining_ms = if throttled {
            manager.cooldown_remaining(&command, &user).as_millis() as u64
        } else {
            0
        };
        Ok(json!(remaining_ms))
    }
}

#[async_trait]
impl BotPlugin for CommandFunctions {
    fn id(&self) -> &str {
        &self.id
    }

    fn functions(&self) -> Vec<FunctionDefinition> {
        vec![
            FunctionDefinition {
                name: FN_SYNC.to_owned(),
                description: "Publish the command registry to the platform, globally or to \
                              explicit destinations."
                    .to_owned(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "destinations": {
                            "type": "array",
                            "items": { "type": "string" },
                            "description": "Destination ids; omit for the global scope."
                        }
                    }
                }),
            },
            FunctionDefinition {
                name: FN_RELOAD.to_owned(),
                description: "Re-walk the last loaded command directory.".to_owned(),
                parameters: json!({ "type": "object", "properties": {} }),
            },
            FunctionDefinition {
                name: FN_COOLDOWN.to_owned(),
                description: "Record an invocation attempt; returns the remaining cooldown in \
                              milliseconds, or 0 when the command may run."
                    .to_owned(),
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "command": { "type": "string" },
                        "user": { "type": "string" }
                    },
                    "required": ["command", "user"]
                }),
            },
        ]
    }

    async fn invoke(&self, name: &str, params: Value) -> Result<Value> {
        match name {
            FN_SYNC => self.invoke_sync(params).await,
            FN_RELOAD => self.invoke_reload().await,
            FN_COOLDOWN => self.invoke_cooldown(params).await,
            other => Err(PlatformError::FunctionNotFound {
                name: other.to_owned(),
            }),
        }
    }
}

fn execution_failed(name: &str, reason: impl ToString) -> PlatformError {
    PlatformError::ExecutionFailed {
        name: name.to_owned(),
        reason: reason.to_string(),
    }
}

fn require_str(params: &Value, key: &str, function: &str) -> Result<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| PlatformError::InvalidParams {
            name: function.to_owned(),
            reason: format!("missing required parameter `{key}`"),
        })
}

fn parse_destinations(params: &Value) -> Result<Option<Vec<String>>> {
    match params.get("destinations") {
        None | Some(Value::Null) => Ok(None),
        // An explicitly empty list means the global scope, not "no targets".
        Some(Value::Array(items)) if items.is_empty() => Ok(None),
        Some(Value::Array(items)) => {
            let ids = items
                .iter()
                .map(|item| {
                    item.as_str()
                        .map(str::to_owned)
                        .ok_or_else(|| PlatformError::InvalidParams {
                            name: FN_SYNC.to_owned(),
                            reason: "`destinations` must be an array of strings".into(),
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(ids))
        }
        Some(_) => Err(PlatformError::InvalidParams {
            name: FN_SYNC.to_owned(),
            reason: "`destinations` must be an array of strings".into(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
