//! ec2flow compute facade
//!
//! Wrapper types and helpers around a vendor compute API. Backends
//! implement [`ComputeClient`] with direct pass-through calls; this crate
//! layers pagination sequencing and "run and wait" polling on top.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  ec2flow CLI                     │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               ec2flow-compute                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait ComputeClient { ... }              │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  Sequencer   │  │    Waiter    │            │
//! │  └──────────────┘  └──────────────┘            │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!           ┌───────▼───────┐
//!           │  ec2flow-aws  │
//!           │ (aws-sdk-ec2) │
//!           └───────────────┘
//! ```

pub mod client;
pub mod error;
pub mod instance;
pub mod key_pair;
pub mod offering;
pub mod region;
pub mod security_group;
pub mod sequencer;
pub mod status;
pub mod tag;
pub mod waiter;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use client::ComputeClient;
pub use error::{ComputeError, Result};
pub use instance::{
    DEFAULT_INSTANCE_TYPE, GroupIdentifier, Instance, InstanceState, InstanceStateChange,
    RunRequest,
};
pub use key_pair::KeyPair;
pub use offering::{OfferingQuery, ReservedInstancesOffering};
pub use region::{AvailabilityZone, Region};
pub use security_group::{IpPermission, SecurityGroup};
pub use sequencer::{Page, Sequencer};
pub use status::InstanceStatus;
pub use tag::{Filter, Tag, TagDescription};
pub use waiter::{DEFAULT_POLL_INTERVAL, WaitConfig, wait_until};
