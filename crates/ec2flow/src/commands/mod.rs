pub mod instances;
pub mod key_pairs;
pub mod offerings;
pub mod regions;
pub mod security_groups;
pub mod statuses;
pub mod tags;
