use crate::codec::DATA_CAPACITY;
use crate::error::{FrameError, Result};
use crate::fourcc::FourCharCode;

/// A key's value as read from or written to the controller.
///
/// Only the first `data_size` bytes of `bytes` are significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmcValue {
    pub key: FourCharCode,
    pub data_size: u32,
    pub data_type: FourCharCode,
    pub bytes: [u8; DATA_CAPACITY],
}

impl SmcValue {
    /// Build a value to write. `data` must fit the fixed buffer.
    pub fn new(key: FourCharCode, data_type: FourCharCode, data: &[u8]) -> Result<Self> {
        if data.len() > DATA_CAPACITY {
            return Err(FrameError::ValueTooLarge {
                size: data.len(),
                max: DATA_CAPACITY,
            });
        }
        let mut bytes = [0u8; DATA_CAPACITY];
        bytes[..data.len()].copy_from_slice(data);
        Ok(Self {
            key,
            data_size: data.len() as u32,
            data_type,
            bytes,
        })
    }

    /// An empty value for `key`, to be filled by a read.
    pub fn empty(key: FourCharCode) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }

    /// The significant prefix of the data buffer.
    pub fn data(&self) -> &[u8] {
        let len = (self.data_size as usize).min(DATA_CAPACITY);
        &self.bytes[..len]
    }
}
