//! Instance status checks

use crate::instance::InstanceState;
use serde::{Deserialize, Serialize};

/// Result of DescribeInstanceStatus for one instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStatus {
    pub instance_id: String,
    pub availability_zone: Option<String>,
    pub state: InstanceState,
    /// Instance reachability summary (`ok`, `impaired`, `initializing`, ...)
    pub instance_status: Option<String>,
    /// System reachability summary
    pub system_status: Option<String>,
}

impl InstanceStatus {
    /// Both status checks passed
    pub fn is_ok(&self) -> bool {
        self.instance_status.as_deref() == Some("ok") && self.system_status.as_deref() == Some("ok")
    }
}
