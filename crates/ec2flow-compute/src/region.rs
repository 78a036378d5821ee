//! Regions and availability zones

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityZone {
    pub name: String,
    pub region: Option<String>,
    pub state: Option<String>,
}

impl AvailabilityZone {
    pub fn is_available(&self) -> bool {
        self.state.as_deref() == Some("available")
    }
}
