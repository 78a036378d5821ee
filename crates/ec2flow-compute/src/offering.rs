//! Reserved instance offerings

use serde::{Deserialize, Serialize};

/// Reserved instance offering available for purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservedInstancesOffering {
    pub offering_id: String,
    pub instance_type: Option<String>,
    pub availability_zone: Option<String>,
    /// Term length in seconds
    pub duration: Option<i64>,
    pub fixed_price: Option<f32>,
    pub usage_price: Option<f32>,
    pub currency_code: Option<String>,
    pub product_description: Option<String>,
    pub offering_type: Option<String>,
    pub instance_tenancy: Option<String>,
    pub marketplace: bool,
}

impl ReservedInstancesOffering {
    /// Term length in whole days
    pub fn duration_days(&self) -> Option<i64> {
        self.duration.map(|secs| secs / 86_400)
    }
}

/// Narrowing options for DescribeReservedInstancesOfferings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferingQuery {
    pub instance_type: Option<String>,
    pub availability_zone: Option<String>,
    /// e.g. `Linux/UNIX`, `Windows`
    pub product_description: Option<String>,
    /// e.g. `No Upfront`, `All Upfront`
    pub offering_type: Option<String>,
    pub include_marketplace: Option<bool>,
}

impl OfferingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instance_type(mut self, instance_type: impl Into<String>) -> Self {
        self.instance_type = Some(instance_type.into());
        self
    }

    pub fn availability_zone(mut self, zone: impl Into<String>) -> Self {
        self.availability_zone = Some(zone.into());
        self
    }

    pub fn product_description(mut self, description: impl Into<String>) -> Self {
        self.product_description = Some(description.into());
        self
    }

    pub fn offering_type(mut self, offering_type: impl Into<String>) -> Self {
        self.offering_type = Some(offering_type.into());
        self
    }
}
