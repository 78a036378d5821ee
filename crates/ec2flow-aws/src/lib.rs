//! AWS EC2 backend for ec2flow
//!
//! Implements [`ec2flow_compute::ComputeClient`] on top of
//! `aws_sdk_ec2::Client`. Every required method is a single SDK call;
//! credentials, signing, retries and endpoint resolution stay with the SDK.
//!
//! # Example
//!
//! ```ignore
//! use ec2flow_aws::{ConnectOptions, Ec2};
//! use ec2flow_compute::{ComputeClient, RunRequest, WaitConfig};
//!
//! let ec2 = Ec2::connect(&ConnectOptions::region("ap-northeast-1")).await;
//!
//! let request = RunRequest::new("ami-0abcdef1234567890").key_name("deploy");
//! let instances = ec2.run_and_wait(&request, &WaitConfig::default()).await?;
//! ```

mod convert;
mod error;

pub mod client;

pub use client::{ConnectOptions, Ec2};
