// Shared test helpers: record builders, in-memory source/host fakes, and
// registry rendering.

use async_trait::async_trait;
use cnexporter::error::CollectError;
use cnexporter::models::ContainerRecord;
use cnexporter::source::{HostIdentity, SnapshotSource};
use prometheus::{Registry, TextEncoder};
use std::collections::VecDeque;
use std::sync::Mutex;

pub fn record(id: &str, name: &str, state: &str) -> ContainerRecord {
    ContainerRecord {
        id: id.into(),
        image: format!("{id}-image:latest"),
        name: name.into(),
        status: format!("status-{id}"),
        state: state.into(),
    }
}

pub fn unavailable() -> CollectError {
    CollectError::SourceUnavailable("connection refused".into())
}

/// Always serves the same snapshot.
pub struct FixedSource(pub Vec<ContainerRecord>);

#[async_trait]
impl SnapshotSource for FixedSource {
    async fn list_containers(
        &self,
        _include_stopped: bool,
    ) -> Result<Vec<ContainerRecord>, CollectError> {
        Ok(self.0.clone())
    }
}

/// Serves one canned response per call, in order.
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<Vec<ContainerRecord>, CollectError>>>,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Vec<ContainerRecord>, CollectError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    async fn list_containers(
        &self,
        _include_stopped: bool,
    ) -> Result<Vec<ContainerRecord>, CollectError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted source ran out of responses")
    }
}

pub struct FixedHost(pub &'static str);

impl HostIdentity for FixedHost {
    fn hostname(&self) -> Result<String, CollectError> {
        Ok(self.0.to_string())
    }
}

pub struct NoHost;

impl HostIdentity for NoHost {
    fn hostname(&self) -> Result<String, CollectError> {
        Err(CollectError::HostnameUnavailable)
    }
}

/// Render the registry in the text exposition format.
pub fn render(registry: &Registry) -> String {
    TextEncoder::new()
        .encode_to_string(&registry.gather())
        .expect("encode registry")
}

/// Sample lines of one metric family (comment lines excluded), sorted for
/// stable comparison.
pub fn family_lines(text: &str, name: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .filter(|l| {
            l.starts_with(name) && matches!(l.as_bytes().get(name.len()), Some(&b'{') | Some(&b' '))
        })
        .map(str::to_string)
        .collect();
    lines.sort();
    lines
}
