// Prometheus gauge sinks for the two refresh cycles.
//
// Gauges register into an explicit Registry owned by main and handed to the
// exposition endpoint; there is no process-global metric state.

use prometheus::{GaugeVec, Opts, Registry};

use crate::models::{MetadataLabels, StatusCounts};

/// Per-status container counts, one series per node.
pub struct CountGauges {
    total: GaugeVec,
    created: GaugeVec,
    running: GaugeVec,
    exited: GaugeVec,
    last_refresh: GaugeVec,
}

impl CountGauges {
    pub fn register(registry: &Registry) -> prometheus::Result<Self> {
        let total = GaugeVec::new(
            Opts::new(
                "cnexporter_containers_total",
                "Number of Docker containers detected on the node",
            ),
            &["nodename"],
        )?;
        let created = GaugeVec::new(
            Opts::new(
                "cnexporter_containers_created",
                "Number of Docker containers with state 'created'",
            ),
            &["nodename"],
        )?;
        let running = GaugeVec::new(
            Opts::new(
                "cnexporter_containers_running",
                "Number of Docker containers with state 'running'",
            ),
            &["nodename"],
        )?;
        let exited = GaugeVec::new(
            Opts::new(
                "cnexporter_containers_exited",
                "Number of Docker containers with state 'exited'",
            ),
            &["nodename"],
        )?;
        let last_refresh = GaugeVec::new(
            Opts::new(
                "cnexporter_counts_last_refresh_timestamp_seconds",
                "Unix time of the last successful counts refresh",
            ),
            &["nodename"],
        )?;

        registry.register(Box::new(total.clone()))?;
        registry.register(Box::new(created.clone()))?;
        registry.register(Box::new(running.clone()))?;
        registry.register(Box::new(exited.clone()))?;
        registry.register(Box::new(last_refresh.clone()))?;

        Ok(Self {
            total,
            created,
            running,
            exited,
            last_refresh,
        })
    }

    /// Point updates with set semantics; a falling count overwrites the old
    /// value.
    pub fn publish(&self, nodename: &str, counts: &StatusCounts) {
        self.total
            .with_label_values(&[nodename])
            .set(counts.total as f64);
        self.created
            .with_label_values(&[nodename])
            .set(counts.created as f64);
        self.running
            .with_label_values(&[nodename])
            .set(counts.running as f64);
        self.exited
            .with_label_values(&[nodename])
            .set(counts.exited as f64);
    }

    pub fn mark_refreshed(&self, nodename: &str, unix_seconds: f64) {
        self.last_refresh
            .with_label_values(&[nodename])
            .set(unix_seconds);
    }
}

/// Container metadata as label-sets. The labels are the data; every series
/// holds a fixed presence value of 0.
pub struct MetadataGauge {
    metadata: GaugeVec,
    last_refresh: GaugeVec,
}

impl MetadataGauge {
    pub fn register(registry: &Registry) -> prometheus::Result<Self> {
        let metadata = GaugeVec::new(
            Opts::new("cnexporter_containers_metadata", "Container metadata"),
            &["id", "image", "name", "status", "state", "nodename"],
        )?;
        let last_refresh = GaugeVec::new(
            Opts::new(
                "cnexporter_metadata_last_refresh_timestamp_seconds",
                "Unix time of the last successful metadata refresh",
            ),
            &["nodename"],
        )?;

        registry.register(Box::new(metadata.clone()))?;
        registry.register(Box::new(last_refresh.clone()))?;

        Ok(Self {
            metadata,
            last_refresh,
        })
    }

    /// Drop every label-set. Identity-bearing labels (status, state) can't be
    /// updated in place, so each tick clears and rewrites the full set.
    pub fn clear(&self) {
        self.metadata.reset();
    }

    pub fn set_row(&self, row: &MetadataLabels, nodename: &str) {
        self.metadata
            .with_label_values(&[
                &row.id, &row.image, &row.name, &row.status, &row.state, nodename,
            ])
            .set(0.0);
    }

    pub fn mark_refreshed(&self, nodename: &str, unix_seconds: f64) {
        self.last_refresh
            .with_label_values(&[nodename])
            .set(unix_seconds);
    }
}
