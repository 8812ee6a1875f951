// Pure aggregation over one container snapshot. No I/O; unit-testable
// without a runtime client.

use crate::models::{ContainerRecord, MetadataLabels, StatusCounts};

/// Count records whose lifecycle state equals `state` exactly
/// (case-sensitive). Unknown states never match.
pub fn count_by_state(records: &[ContainerRecord], state: &str) -> usize {
    records.iter().filter(|r| r.state == state).count()
}

/// Snapshot size, untracked states included.
pub fn total(records: &[ContainerRecord]) -> usize {
    records.len()
}

impl StatusCounts {
    /// Derive all four counts for one tick.
    pub fn aggregate(records: &[ContainerRecord]) -> Self {
        Self {
            total: total(records),
            created: count_by_state(records, "created"),
            running: count_by_state(records, "running"),
            exited: count_by_state(records, "exited"),
        }
    }
}

/// Label values for one container's metadata series. Runtimes may report the
/// name with a leading '/'; strip at most one, leaving clean names untouched.
pub fn metadata_labels(record: &ContainerRecord) -> MetadataLabels {
    let name = record.name.strip_prefix('/').unwrap_or(&record.name);
    MetadataLabels {
        id: record.id.clone(),
        image: record.image.clone(),
        name: name.to_string(),
        status: record.status.clone(),
        state: record.state.clone(),
    }
}
