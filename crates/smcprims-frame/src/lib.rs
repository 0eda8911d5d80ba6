//! Wire types for the Apple System Management Controller protocol.
//!
//! Every exchange with the controller is one fixed 80-byte structure in each
//! direction. This crate owns that structure and the values inside it:
//! - [`FourCharCode`]: keys and data types as big-endian packed 4-char codes
//! - [`KeyData`] with [`encode_key_data`]/[`decode_key_data`]: the packed layout
//! - [`command`]: the `data8` command selectors
//! - [`SmcStatus`]: the controller's result byte
//! - [`SmcValue`]: a key's value with its declared size and type

pub mod codec;
pub mod command;
pub mod error;
pub mod fourcc;
pub mod status;
pub mod value;

pub use codec::{
    decode_key_data, encode_key_data, KeyData, KeyInfo, PowerLimitBlock, VersionBlock,
    DATA_CAPACITY,
};
pub use command::{
    command_name, GET_KEY_FROM_INDEX, READ_KEY, READ_KEY_INFO, READ_POWER_LIMIT, READ_VERSION,
    WRITE_KEY,
};
pub use error::{FrameError, Result};
pub use fourcc::FourCharCode;
pub use status::SmcStatus;
pub use value::SmcValue;
