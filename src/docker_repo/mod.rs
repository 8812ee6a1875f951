// Container snapshots via bollard

use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::ListContainersOptions;
use bollard::models::ContainerSummary;

use crate::error::CollectError;
use crate::models::ContainerRecord;
use crate::source::SnapshotSource;

/// Read-only Docker client; list calls are safe to issue concurrently from
/// both refresh cycles through one shared instance.
pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix_defaults()?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl SnapshotSource for DockerRepo {
    async fn list_containers(
        &self,
        include_stopped: bool,
    ) -> Result<Vec<ContainerRecord>, CollectError> {
        let options = ListContainersOptions {
            all: include_stopped,
            ..Default::default()
        };
        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(|e| CollectError::SourceUnavailable(e.to_string()))?;

        Ok(containers.into_iter().map(to_record).collect())
    }
}

/// Map a raw listing row into our snapshot model; absent fields become empty
/// strings rather than dropping the row.
fn to_record(c: ContainerSummary) -> ContainerRecord {
    let name = c
        .names
        .as_ref()
        .and_then(|n| n.first())
        .cloned()
        .unwrap_or_default();
    ContainerRecord {
        id: c.id.unwrap_or_default(),
        image: c.image.unwrap_or_default(),
        name,
        status: c.status.unwrap_or_default(),
        state: c.state.map(|s| s.to_string()).unwrap_or_default(),
    }
}
