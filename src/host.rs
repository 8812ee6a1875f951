// Host identity via sysinfo

use sysinfo::System;

use crate::error::CollectError;
use crate::source::HostIdentity;

/// Resolves the node name from the OS on every call.
pub struct SysinfoHost;

impl HostIdentity for SysinfoHost {
    fn hostname(&self) -> Result<String, CollectError> {
        System::host_name().ok_or(CollectError::HostnameUnavailable)
    }
}
