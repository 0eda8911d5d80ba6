//! Apple System Management Controller key access with permissive licensing.
//!
//! smcprims reads and writes controller keys (sensor readings, fan targets,
//! limits) over the privileged `AppleSMC` IOKit connection.
//!
//! # Crate Structure
//!
//! - [`transport`]: Connection open/close and the fixed-size struct call
//! - [`frame`]: Four-char codes, the packed key-data structure, status codes
//! - [`client`]: Key read/write/query operations with a key-info cache
//!
//! ```no_run
//! use smcprims::client::SmcClient;
//!
//! let client = SmcClient::open()?;
//! let value = client.read_key_text("TC0P")?;
//! println!("{} {} {:02x?}", value.key, value.data_type, value.data());
//! # Ok::<(), smcprims::client::SmcError>(())
//! ```

/// Re-export transport types.
pub mod transport {
    pub use smcprims_transport::*;
}

/// Re-export frame types.
pub mod frame {
    pub use smcprims_frame::*;
}

/// Re-export client types.
pub mod client {
    pub use smcprims_client::*;
}
