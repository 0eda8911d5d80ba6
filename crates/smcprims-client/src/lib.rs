//! Key operations for the Apple System Management Controller.
//!
//! This is the layer most callers want. [`SmcClient`] composes the frame
//! codec and a transport into the controller's request sequences:
//! - [`SmcClient::key_info`]: declared size/type, memoized in a [`KeyInfoCache`]
//! - [`SmcClient::read_key`]: key info, then a read sized from it
//! - [`SmcClient::write_key`]: key info, local validation, then the write
//! - [`SmcClient::key_at_index`]: one entry of the key table
//!
//! Failures carry both the kernel status and the controller status; see
//! [`SmcError::status`].

pub mod cache;
pub mod client;
pub mod config;
pub mod error;

pub use cache::{CacheStats, KeyInfoCache};
pub use client::SmcClient;
pub use config::ClientConfig;
pub use error::{status_of, OperationResult, Result, SmcError};
