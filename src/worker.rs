// Refresh cycles: poll the container snapshot, republish gauges.
//
// Two independent cycles (counts, metadata) run as their own tokio tasks on
// the same fixed interval, with no phase alignment between them. Each blocks
// only on the runtime list call and its own tick wait, and stops cleanly on a
// shutdown signal.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::oneshot;
use tokio::time::{Duration, MissedTickBehavior, interval};

use crate::aggregate;
use crate::error::CollectError;
use crate::metrics::{CountGauges, MetadataGauge};
use crate::models::StatusCounts;
use crate::source::{HostIdentity, SnapshotSource};

/// Collaborators for one refresh cycle. The source and host providers are
/// shared read-only across cycles; each cycle owns its gauges.
pub struct CycleDeps {
    pub source: Arc<dyn SnapshotSource>,
    pub host: Arc<dyn HostIdentity>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Cycle timing and snapshot scope.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    pub poll_interval_secs: u64,
    pub include_stopped: bool,
}

/// Spawns the counts cycle; first tick fires immediately.
pub fn spawn_counts(
    deps: CycleDeps,
    gauges: Arc<CountGauges>,
    config: CycleConfig,
) -> tokio::task::JoinHandle<()> {
    let CycleDeps {
        source,
        host,
        mut shutdown_rx,
    } = deps;
    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(config.poll_interval_secs));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) =
                        counts_tick(source.as_ref(), host.as_ref(), &gauges, config.include_stopped).await
                    {
                        tracing::warn!(error = %e, cycle = "counts", "refresh skipped");
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Counts cycle shutting down");
                    break;
                }
            }
        }
    })
}

/// Spawns the metadata cycle; first tick fires immediately.
pub fn spawn_metadata(
    deps: CycleDeps,
    gauge: Arc<MetadataGauge>,
    config: CycleConfig,
) -> tokio::task::JoinHandle<()> {
    let CycleDeps {
        source,
        host,
        mut shutdown_rx,
    } = deps;
    tokio::spawn(async move {
        let mut tick = interval(Duration::from_secs(config.poll_interval_secs));
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) =
                        metadata_tick(source.as_ref(), host.as_ref(), &gauge, config.include_stopped).await
                    {
                        tracing::warn!(error = %e, cycle = "metadata", "refresh skipped");
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Metadata cycle shutting down");
                    break;
                }
            }
        }
    })
}

/// One counts tick: fetch, aggregate, set the four count series for this
/// node. On error nothing is published and the previous values stay visible.
pub async fn counts_tick(
    source: &dyn SnapshotSource,
    host: &dyn HostIdentity,
    gauges: &CountGauges,
    include_stopped: bool,
) -> Result<(), CollectError> {
    let records = source.list_containers(include_stopped).await?;
    let nodename = host.hostname()?;

    let counts = StatusCounts::aggregate(&records);
    gauges.publish(&nodename, &counts);
    gauges.mark_refreshed(&nodename, unix_now_seconds());

    tracing::debug!(
        cycle = "counts",
        total = counts.total,
        running = counts.running,
        "counts refreshed"
    );
    Ok(())
}

/// One metadata tick: fetch, clear every previous label-set, write one
/// presence row per container.
///
/// The clear runs only after a successful fetch, so a failed tick degrades to
/// a stale full set rather than an empty one. Within a tick all row writes
/// happen after the clear and before the next tick's clear; a scrape landing
/// between the clear and the last write sees a partially filled current set,
/// as the registry has no atomic bulk replace.
pub async fn metadata_tick(
    source: &dyn SnapshotSource,
    host: &dyn HostIdentity,
    gauge: &MetadataGauge,
    include_stopped: bool,
) -> Result<(), CollectError> {
    let records = source.list_containers(include_stopped).await?;
    let nodename = host.hostname()?;

    gauge.clear();
    for record in &records {
        gauge.set_row(&aggregate::metadata_labels(record), &nodename);
    }
    gauge.mark_refreshed(&nodename, unix_now_seconds());

    tracing::debug!(cycle = "metadata", rows = records.len(), "metadata rewritten");
    Ok(())
}

fn unix_now_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, operation = "get_timestamp", "system time error");
            0.0
        })
}
