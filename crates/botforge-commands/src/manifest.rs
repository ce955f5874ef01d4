//! Command manifest parsing.
//!
//! Commands are declared in data files rather than loaded as code: a
//! manifest is a `.json` or `.toml` file that yields one command or a
//! sequence of commands through this one fixed interface.
//!
//! ```text
//! # single command          # several commands
//! { "name": "ping", ... }   [ { "name": "ping", ... }, { "name": "roll", ... } ]
//! ```
//!
//! ```text
//! # TOML, single command    # TOML, several commands
//! name = "ping"             [[command]]
//! description = "..."       name = "ping"
//!                           description = "..."
//! ```

use std::path::Path;

use crate::error::{CommandError, Result};
use crate::types::RawCommand;

/// Manifest file formats recognized by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl ManifestFormat {
    /// Detect the manifest format from a file extension.
    ///
    /// Files with other extensions are not command sources and are skipped
    /// silently during discovery.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parse a manifest file's content into its raw command candidates.
pub fn parse_manifest(content: &str, path: &Path) -> Result<Vec<RawCommand>> {
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ManifestFormat::from_extension)
        .ok_or_else(|| CommandError::InvalidManifest {
            path: path.to_path_buf(),
            reason: "unrecognized manifest extension".into(),
        })?;

    match format {
        ManifestFormat::Json => parse_json(content, path),
        ManifestFormat::Toml => parse_toml(content, path),
    }
}

fn parse_json(content: &str, path: &Path) -> Result<Vec<RawCommand>> {
    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| CommandError::InvalidManifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let values = match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    values
        .into_iter()
        .map(|v| {
            serde_json::from_value(v).map_err(|e| CommandError::InvalidManifest {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        })
        .collect()
}

fn parse_toml(content: &str, path: &Path) -> Result<Vec<RawCommand>> {
    let value: toml::Value = content
        .parse()
        .map_err(|e: toml::de::Error| CommandError::InvalidManifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let invalid = |reason: String| CommandError::InvalidManifest {
        path: path.to_path_buf(),
        reason,
    };

    // `[[command]]` tables declare a sequence; otherwise the whole document
    // is one command.
    match value {
        toml::Value::Table(mut table) if table.contains_key("command") => {
            match table.remove("command") {
                Some(toml::Value::Array(items)) => items
                    .into_iter()
                    .map(|item| item.try_into().map_err(|e: toml::de::Error| invalid(e.to_string())))
                    .collect(),
                _ => Err(invalid("`command` must be an array of tables".into())),
            }
        }
        other => Ok(vec![
            other
                .try_into()
                .map_err(|e: toml::de::Error| invalid(e.to_string()))?,
        ]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn json_single_object() {
        let raw = parse_manifest(
            r#"{ "name": "ping", "description": "Measure latency." }"#,
            Path::new("ping.json"),
        )
        .unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].name.as_deref(), Some("ping"));
    }

    #[test]
    fn json_array_yields_many() {
        let raw = parse_manifest(
            r#"[
                { "name": "ping", "description": "Measure latency." },
                { "name": "roll", "description": "Roll dice.", "cooldown_ms": 2000 }
            ]"#,
            Path::new("bundle.json"),
        )
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[1].cooldown_ms, Some(2000));
    }

    #[test]
    fn toml_single_command() {
        let raw = parse_manifest(
            "name = \"ping\"\ndescription = \"Measure latency.\"\n",
            Path::new("ping.toml"),
        )
        .unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].description.as_deref(), Some("Measure latency."));
    }

    #[test]
    fn toml_command_array() {
        let raw = parse_manifest(
            r#"
[[command]]
name = "ping"
description = "Measure latency."

[[command]]
name = "roll"
description = "Roll dice."
type = "user_context"
"#,
            Path::new("bundle.toml"),
        )
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[1].kind, Some(crate::types::CommandKind::UserContext));
    }

    #[test]
    fn malformed_json_carries_path() {
        let err = parse_manifest("{ not json", Path::new("broken.json")).unwrap_err();
        match err {
            CommandError::InvalidManifest { path, .. } => {
                assert_eq!(path, PathBuf::from("broken.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_extension_rejected() {
        let err = parse_manifest("whatever", Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, CommandError::InvalidManifest { .. }));
    }

    #[test]
    fn format_detection() {
        assert_eq!(ManifestFormat::from_extension("json"), Some(ManifestFormat::Json));
        assert_eq!(ManifestFormat::from_extension("toml"), Some(ManifestFormat::Toml));
        assert_eq!(ManifestFormat::from_extension("md"), None);
        assert_eq!(ManifestFormat::from_extension("rs"), None);
    }
}
