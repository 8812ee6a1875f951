// Container snapshot models

/// One row of a container snapshot as reported by the runtime.
///
/// `state` is opaque runtime-provided text (e.g. "running", "exited"), not a
/// closed enum; states we don't track still count toward the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    pub image: String,
    pub name: String,
    /// Human-readable status line, e.g. "Up 2 hours".
    pub status: String,
    /// Lifecycle state, e.g. "created", "running", "exited".
    pub state: String,
}

/// Label values for one container's metadata series; one per container per
/// tick. `name` has at most one leading '/' stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataLabels {
    pub id: String,
    pub image: String,
    pub name: String,
    pub status: String,
    pub state: String,
}

/// Per-state container counts for one tick; replaced wholesale each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub total: usize,
    pub created: usize,
    pub running: usize,
    pub exited: usize,
}
