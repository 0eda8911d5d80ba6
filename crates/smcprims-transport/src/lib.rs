//! Privileged transport to the Apple System Management Controller.
//!
//! Provides the lowest layer of smcprims:
//! - [`SmcConnection`]: open/close of the `AppleSMC` IOKit user client (macOS)
//! - [`SmcTransport`]: one fixed-size struct-method exchange per call
//! - [`KernReturn`]: the kernel-level status, distinct from the controller's
//!   own status byte
//!
//! On other platforms the connection type exists but every operation reports
//! [`TransportError::Unsupported`].

pub mod connection;
pub mod error;
pub mod kern;
pub mod traits;

pub use connection::SmcConnection;
pub use error::{Result, TransportError};
pub use kern::KernReturn;
pub use traits::{RawStruct, SmcTransport, KERNEL_INDEX_SMC, STRUCT_SIZE};
