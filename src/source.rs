// Seams over the container runtime and host identity

use async_trait::async_trait;

use crate::error::CollectError;
use crate::models::ContainerRecord;

/// Lists every container on the host as of right now.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// `include_stopped` widens the listing beyond running containers.
    async fn list_containers(
        &self,
        include_stopped: bool,
    ) -> Result<Vec<ContainerRecord>, CollectError>;
}

/// Resolves the reporting node's name.
///
/// Looked up once per tick rather than cached, so a long-lived process
/// reflects a hostname change.
pub trait HostIdentity: Send + Sync {
    fn hostname(&self) -> Result<String, CollectError>;
}
