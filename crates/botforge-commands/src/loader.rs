//! Command discovery — walks a directory tree and populates the registry.
//!
//! The loader recurses through the tree in enumeration order, parses every
//! recognized manifest, validates each candidate, and upserts the accepted
//! descriptors.  Per-candidate failures are collected and reported without
//! aborting traversal of sibling entries; only directory-level problems
//! (missing, unreadable, empty of manifests) fail the whole call.

use std::path::{Path, PathBuf};

use crate::error::{CommandError, Result};
use crate::manifest::{ManifestFormat, parse_manifest};
use crate::registry::CommandRegistry;
use crate::validate::validate;

/// One candidate that could not be loaded, with enough context to act on.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    /// The manifest file the candidate came from.
    pub path: PathBuf,
    /// Why it was rejected.
    pub reason: String,
}

/// Outcome of one `load` call.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// The resolved directory that was walked.
    pub directory: PathBuf,
    /// Number of descriptors accepted into the registry.
    pub loaded: usize,
    /// Number of manifest files encountered.
    pub manifests: usize,
    /// Candidates rejected during parsing or validation.
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Render the outcome for human consumption.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "loaded {} command(s) from {} ({} manifest(s), {} failure(s))",
            self.loaded,
            self.directory.display(),
            self.manifests,
            self.failures.len(),
        );
        for failure in &self.failures {
            out.push_str(&format!("\n  {}: {}", failure.path.display(), failure.reason));
        }
        out
    }
}

/// Walk `dir` and load every command manifest into `registry`.
///
/// A relative `dir` is resolved against the process working directory.
/// Accepted descriptors overwrite same-named registry entries; the
/// registry is never cleared here, so repeated loads accumulate.
pub fn load_dir(dir: &Path, registry: &mut CommandRegistry) -> Result<LoadReport> {
    let directory = resolve_root(dir)?;

    if !directory.is_dir() {
        return Err(CommandError::DirectoryNotFound { path: directory });
    }

    let mut report = LoadReport {
        directory: directory.clone(),
        loaded: 0,
        manifests: 0,
        failures: Vec::new(),
    };

    walk(&directory, registry, &mut report)?;

    if report.manifests == 0 {
        return Err(CommandError::EmptyDirectory { path: directory });
    }

    tracing::info!(
        dir = %report.directory.display(),
        loaded = report.loaded,
        failures = report.failures.len(),
        "commands loaded"
    );
    Ok(report)
}

/// Resolve the discovery root to an absolute path.
fn resolve_root(dir: &Path) -> Result<PathBuf> {
    if dir.is_absolute() {
        Ok(dir.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

fn walk(dir: &Path, registry: &mut CommandRegistry, report: &mut LoadReport) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|source| CommandError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| CommandError::DirectoryUnreadable {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();

        if path.is_dir() {
            walk(&path, registry, report)?;
            continue;
        }

        // Not a command source; skip silently.
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ManifestFormat::from_extension(ext).is_none() {
            continue;
        }

        report.manifests += 1;
        load_file(&path, registry, report);
    }

    Ok(())
}

/// Load one manifest file, recording rather than propagating its failures.
fn load_file(path: &Path, registry: &mut CommandRegistry, report: &mut LoadReport) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            record_failure(report, path, e.to_string());
            return;
        }
    };

    let candidates = match parse_manifest(&content, path) {
        Ok(candidates) => candidates,
        Err(e) => {
            record_failure(report, path, e.to_string());
            return;
        }
    };

    for raw in candidates {
        match validate(raw) {
            Ok(mut descriptor) => {
                descriptor.source = Some(path.to_path_buf());
                tracing::debug!(
                    name = %descriptor.name,
                    path = %path.display(),
                    "command loaded"
                );
                registry.upsert(descriptor);
                report.loaded += 1;
            }
            Err(e) => record_failure(report, path, e.to_string()),
        }
    }
}

fn record_failure(report: &mut LoadReport, path: &Path, reason: String) {
    tracing::warn!(
        path = %path.display(),
        reason = %reason,
        "failed to load command"
    );
    report.failures.push(LoadFailure {
        path: path.to_path_buf(),
        reason,
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn loads_valid_and_records_invalid() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "ping.json",
            r#"{ "name": "ping", "description": "Measure latency." }"#,
        );
        write(
            tmp.path(),
            "roll.toml",
            "name = \"roll\"\ndescription = \"Roll dice.\"\ncooldown_ms = 2000\n",
        );
        // Invalid: description missing.
        write(tmp.path(), "broken.json", r#"{ "name": "broken" }"#);
        // Invalid: unparsable.
        write(tmp.path(), "garbage.json", "{ nope");

        let mut registry = CommandRegistry::new();
        let report = load_dir(tmp.path(), &mut registry).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.manifests, 4);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("ping").is_some());
        assert_eq!(
            registry.cooldown_of("roll"),
            Some(std::time::Duration::from_millis(2000))
        );
    }

    #[test]
    fn recurses_into_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("moderation").join("bans");
        std::fs::create_dir_all(&nested).unwrap();
        write(
            &nested,
            "ban.json",
            r#"{ "name": "ban", "description": "Ban a member." }"#,
        );

        let mut registry = CommandRegistry::new();
        let report = load_dir(tmp.path(), &mut registry).unwrap();
        assert_eq!(report.loaded, 1);
        assert!(registry.get("ban").is_some());
    }

    #[test]
    fn skips_unrecognized_extensions_silently() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "README.md", "# not a command");
        write(
            tmp.path(),
            "ping.json",
            r#"{ "name": "ping", "description": "Measure latency." }"#,
        );

        let mut registry = CommandRegistry::new();
        let report = load_dir(tmp.path(), &mut registry).unwrap();
        assert_eq!(report.manifests, 1);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn empty_tree_is_an_error_and_registry_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "notes.txt", "nothing here");

        let mut registry = CommandRegistry::new();
        let err = load_dir(tmp.path(), &mut registry).unwrap_err();
        assert!(matches!(err, CommandError::EmptyDirectory { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error_and_registry_untouched() {
        let mut registry = CommandRegistry::new();
        let err = load_dir(Path::new("/nonexistent/commands"), &mut registry).unwrap_err();
        assert!(matches!(err, CommandError::DirectoryNotFound { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn one_file_may_export_many_commands() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "bundle.json",
            r#"[
                { "name": "ping", "description": "Measure latency." },
                { "name": "roll", "description": "Roll dice." },
                { "name": "bad" }
            ]"#,
        );

        let mut registry = CommandRegistry::new();
        let report = load_dir(tmp.path(), &mut registry).unwrap();
        assert_eq!(report.loaded, 2);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn later_load_overwrites_same_name() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        write(
            first.path(),
            "ping.json",
            r#"{ "name": "ping", "description": "Old description." }"#,
        );
        write(
            second.path(),
            "ping.json",
            r#"{ "name": "ping", "description": "New description." }"#,
        );

        let mut registry = CommandRegistry::new();
        load_dir(first.path(), &mut registry).unwrap();
        load_dir(second.path(), &mut registry).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("ping").unwrap().description, "New description.");
    }

    #[test]
    fn descriptor_records_source_path() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "ping.json",
            r#"{ "name": "ping", "description": "Measure latency." }"#,
        );

        let mut registry = CommandRegistry::new();
        load_dir(tmp.path(), &mut registry).unwrap();
        let source = registry.get("ping").unwrap().source.clone().unwrap();
        assert_eq!(source, tmp.path().join("ping.json"));
    }

    #[test]
    fn summary_mentions_failures() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "bad.json", r#"{ "name": "x" }"#);
        write(
            tmp.path(),
            "ping.json",
            r#"{ "name": "ping", "description": "Measure latency." }"#,
        );

        let mut registry = CommandRegistry::new();
        let report = load_dir(tmp.path(), &mut registry).unwrap();
        let summary = report.summary();
        assert!(summary.contains("loaded 1 command(s)"));
        assert!(summary.contains("bad.json"));
    }
}
