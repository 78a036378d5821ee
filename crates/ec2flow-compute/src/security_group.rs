//! Security group wrapper

use crate::tag::{Tag, find_tag};
use serde::{Deserialize, Serialize};

/// Inbound or outbound permission of a security group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpPermission {
    /// `tcp`, `udp`, `icmp` or `-1` for all traffic
    pub protocol: String,
    pub from_port: Option<i32>,
    pub to_port: Option<i32>,
    #[serde(default)]
    pub cidr_ranges: Vec<String>,
}

impl IpPermission {
    /// TCP access to a single port from one CIDR range
    pub fn tcp(port: i32, cidr: impl Into<String>) -> Self {
        Self {
            protocol: "tcp".to_string(),
            from_port: Some(port),
            to_port: Some(port),
            cidr_ranges: vec![cidr.into()],
        }
    }

    /// Human-readable port range (`22`, `8000-8080`, `all`)
    pub fn port_range(&self) -> String {
        match (self.from_port, self.to_port) {
            (Some(-1), Some(-1)) => "all".to_string(),
            (Some(from), Some(to)) if from == to => from.to_string(),
            (Some(from), Some(to)) => format!("{}-{}", from, to),
            _ => "all".to_string(),
        }
    }
}

/// Security group as described by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub group_id: String,
    pub group_name: String,
    pub description: Option<String>,
    pub vpc_id: Option<String>,
    pub owner_id: Option<String>,
    #[serde(default)]
    pub ingress: Vec<IpPermission>,
    #[serde(default)]
    pub egress: Vec<IpPermission>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl SecurityGroup {
    pub fn tag(&self, key: &str) -> Option<&str> {
        find_tag(&self.tags, key)
    }

    /// Whether an ingress rule opens `port` over TCP
    pub fn allows_tcp(&self, port: i32) -> bool {
        self.ingress.iter().any(|p| {
            let proto_ok = p.protocol == "tcp" || p.protocol == "-1";
            let range_ok = match (p.from_port, p.to_port) {
                (Some(from), Some(to)) => (from <= port && port <= to) || p.protocol == "-1",
                _ => true,
            };
            proto_ok && range_ok
        })
    }
}
