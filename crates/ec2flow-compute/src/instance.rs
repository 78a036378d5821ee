//! Instance wrapper types

use crate::error::{ComputeError, Result};
use crate::tag::{Tag, find_tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Instance type used when a run request does not name one
pub const DEFAULT_INSTANCE_TYPE: &str = "t2.micro";

/// Lifecycle state of an instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InstanceState {
    Pending,
    Running,
    ShuttingDown,
    Terminated,
    Stopping,
    Stopped,
    Unknown(String),
}

impl InstanceState {
    pub fn as_str(&self) -> &str {
        match self {
            InstanceState::Pending => "pending",
            InstanceState::Running => "running",
            InstanceState::ShuttingDown => "shutting-down",
            InstanceState::Terminated => "terminated",
            InstanceState::Stopping => "stopping",
            InstanceState::Stopped => "stopped",
            InstanceState::Unknown(s) => s,
        }
    }
}

impl From<&str> for InstanceState {
    fn from(name: &str) -> Self {
        match name {
            "pending" => InstanceState::Pending,
            "running" => InstanceState::Running,
            "shutting-down" => InstanceState::ShuttingDown,
            "terminated" => InstanceState::Terminated,
            "stopping" => InstanceState::Stopping,
            "stopped" => InstanceState::Stopped,
            other => InstanceState::Unknown(other.to_string()),
        }
    }
}

impl From<String> for InstanceState {
    fn from(name: String) -> Self {
        InstanceState::from(name.as_str())
    }
}

impl From<InstanceState> for String {
    fn from(state: InstanceState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Security group reference carried on an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupIdentifier {
    pub group_id: Option<String>,
    pub group_name: Option<String>,
}

/// Compute instance as described by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub instance_id: String,
    pub image_id: Option<String>,
    pub instance_type: Option<String>,
    pub state: InstanceState,
    pub key_name: Option<String>,
    pub launch_time: Option<DateTime<Utc>>,
    pub availability_zone: Option<String>,
    pub private_ip_address: Option<String>,
    pub public_ip_address: Option<String>,
    pub private_dns_name: Option<String>,
    pub public_dns_name: Option<String>,
    pub vpc_id: Option<String>,
    pub subnet_id: Option<String>,
    #[serde(default)]
    pub security_groups: Vec<GroupIdentifier>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub architecture: Option<String>,
    pub platform: Option<String>,
}

impl Instance {
    /// Value of the tag with the given key
    pub fn tag(&self, key: &str) -> Option<&str> {
        find_tag(&self.tags, key)
    }

    /// The `Name` tag
    pub fn name(&self) -> Option<&str> {
        self.tag("Name")
    }

    pub fn is_running(&self) -> bool {
        self.state == InstanceState::Running
    }

    pub fn is_pending(&self) -> bool {
        self.state == InstanceState::Pending
    }
}

/// State transition reported by start/stop/terminate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStateChange {
    pub instance_id: String,
    pub previous_state: Option<InstanceState>,
    pub current_state: Option<InstanceState>,
}

/// Parameters for launching instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub image_id: String,
    pub instance_type: String,
    pub key_name: Option<String>,
    #[serde(default)]
    pub security_group_ids: Vec<String>,
    pub subnet_id: Option<String>,
    /// Plain-text user data; backends encode it as the API requires
    pub user_data: Option<String>,
    pub min_count: i32,
    pub max_count: i32,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl RunRequest {
    pub fn new(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            instance_type: DEFAULT_INSTANCE_TYPE.to_string(),
            key_name: None,
            security_group_ids: Vec::new(),
            subnet_id: None,
            user_data: None,
            min_count: 1,
            max_count: 1,
            tags: Vec::new(),
        }
    }

    pub fn instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = instance_type.into();
        self
    }

    pub fn key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = Some(key_name.into());
        self
    }

    pub fn security_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.security_group_ids.push(group_id.into());
        self
    }

    pub fn subnet_id(mut self, subnet_id: impl Into<String>) -> Self {
        self.subnet_id = Some(subnet_id.into());
        self
    }

    pub fn user_data(mut self, user_data: impl Into<String>) -> Self {
        self.user_data = Some(user_data.into());
        self
    }

    /// Launch exactly `count` instances
    pub fn count(mut self, count: i32) -> Self {
        self.min_count = count;
        self.max_count = count;
        self
    }

    pub fn counts(mut self, min: i32, max: i32) -> Self {
        self.min_count = min;
        self.max_count = max;
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(key, value));
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.image_id.trim().is_empty() {
            return Err(ComputeError::InvalidRequest(
                "image id must not be empty".to_string(),
            ));
        }
        if self.instance_type.trim().is_empty() {
            return Err(ComputeError::InvalidRequest(
                "instance type must not be empty".to_string(),
            ));
        }
        if self.min_count < 1 {
            return Err(ComputeError::InvalidRequest(format!(
                "min count must be at least 1 (got {})",
                self.min_count
            )));
        }
        if self.max_count < self.min_count {
            return Err(ComputeError::InvalidRequest(format!(
                "max count {} is less than min count {}",
                self.max_count, self.min_count
            )));
        }
        Ok(())
    }
}
