//! Remote synchronization of the registry's command set.
//!
//! Synchronization is a full replace, never an incremental diff: the
//! registry snapshot becomes the complete command set of the targeted
//! scope, so repeating a sync with an unchanged registry is a remote
//! no-op.
//!
//! Without destinations the snapshot replaces the global application
//! scope in a single call.  With destinations, each one is synced
//! independently and concurrently; one invalid or unreachable destination
//! never prevents attempts on the others.

use futures::future::join_all;
use tracing::{debug, warn};

use botforge_platform::{CommandPayload, CommandPlatform, DestinationHandle};

use crate::error::{CommandError, Result};

/// Per-destination outcome of a multi-destination sync.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// Whether the global scope was replaced.
    pub global: bool,
    /// Destination ids synced successfully.
    pub succeeded: Vec<String>,
    /// Destination ids that failed, with reasons.
    pub failed: Vec<(String, String)>,
}

impl SyncReport {
    /// Fold the report into a single success/fail signal.
    ///
    /// Partial success counts as failure here; callers wanting the
    /// maximum-partial-success view should inspect the report instead.
    pub fn into_result(self) -> Result<SyncReport> {
        if self.failed.is_empty() {
            Ok(self)
        } else {
            Err(CommandError::SyncFailed {
                failures: self.failed,
            })
        }
    }
}

/// Replace the targeted command set(s) with `commands`.
///
/// Fails fast with [`CommandError::NotReady`] before any network call when
/// the platform is not ready.  `None` targets the global scope; a list
/// targets each destination independently, recording every success and
/// every failure in the returned report.
pub async fn sync(
    platform: &dyn CommandPlatform,
    commands: &[CommandPayload],
    destinations: Option<&[String]>,
) -> Result<SyncReport> {
    if !platform.is_ready() {
        return Err(CommandError::NotReady);
    }

    let Some(ids) = destinations else {
        platform.replace_global_commands(commands).await?;
        debug!(count = commands.len(), "global command set replaced");
        return Ok(SyncReport {
            global: true,
            ..SyncReport::default()
        });
    };

    let attempts = ids.iter().map(|id| async move {
        let outcome = sync_destination(platform, id, commands).await;
        (id.clone(), outcome)
    });

    let mut report = SyncReport::default();
    for (id, outcome) in join_all(attempts).await {
        match outcome {
            Ok(()) => {
                debug!(destination = %id, "destination command set replaced");
                report.succeeded.push(id);
            }
            Err(e) => {
                warn!(destination = %id, error = %e, "destination sync failed");
                report.failed.push((id, e.to_string()));
            }
        }
    }
    Ok(report)
}

/// Sync one destination: resolve its handle (cache first, remote fetch as
/// fallback), then replace its command set.
async fn sync_destination(
    platform: &dyn CommandPlatform,
    id: &str,
    commands: &[CommandPayload],
) -> Result<()> {
    let handle: DestinationHandle = match platform.cached_destination(id) {
        Some(handle) => handle,
        None => platform
            .fetch_destination(id)
            .await
            .map_err(|e| CommandError::Destination {
                id: id.to_owned(),
                reason: e.to_string(),
            })?,
    };

    platform
        .replace_destination_commands(&handle, commands)
        .await
        .map_err(|e| CommandError::Destination {
            id: id.to_owned(),
            reason: e.to_string(),
        })?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
