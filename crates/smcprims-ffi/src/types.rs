use smcprims_client::OperationResult;
use smcprims_frame::{FourCharCode, KeyInfo, SmcValue, DATA_CAPACITY};
use smcprims_transport::KernReturn;

#[allow(dead_code)]
pub const SMC_RETURN_SUCCESS: u8 = 0;
#[allow(dead_code)]
pub const SMC_RETURN_ERROR: u8 = 1;
#[allow(dead_code)]
pub const SMC_RETURN_KEY_NOT_FOUND: u8 = 132;
#[allow(dead_code)]
pub const SMC_RETURN_DATA_TYPE_MISMATCH: u8 = 140;

/// Kernel status plus controller status.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmcResult {
    pub kern_res: i32,
    pub smc_res: u8,
}

impl SmcResult {
    pub(crate) fn bad_argument() -> Self {
        Self {
            kern_res: KernReturn::BAD_ARGUMENT.0,
            smc_res: SMC_RETURN_ERROR,
        }
    }
}

impl From<OperationResult> for SmcResult {
    fn from(value: OperationResult) -> Self {
        Self {
            kern_res: value.kern.0,
            smc_res: value.smc.0,
        }
    }
}

/// Four characters plus a NUL terminator.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmcKeyText {
    pub chars: [u8; 5],
}

impl SmcKeyText {
    pub(crate) fn code(&self) -> FourCharCode {
        FourCharCode::from_prefix(&self.chars[..4])
    }

    pub(crate) fn from_code(code: FourCharCode) -> Self {
        Self {
            chars: code.to_c_chars(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmcKeyInfo {
    pub data_size: u32,
    pub data_type: u32,
    pub data_attributes: u8,
}

impl From<KeyInfo> for SmcKeyInfo {
    fn from(value: KeyInfo) -> Self {
        Self {
            data_size: value.data_size,
            data_type: value.data_type.as_u32(),
            data_attributes: value.attributes,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SmcVal {
    pub key: SmcKeyText,
    pub data_size: u32,
    pub data_type: SmcKeyText,
    pub bytes: [u8; DATA_CAPACITY],
}

impl SmcVal {
    pub(crate) fn to_value(self) -> SmcValue {
        SmcValue {
            key: self.key.code(),
            data_size: self.data_size,
            data_type: self.data_type.code(),
            bytes: self.bytes,
        }
    }
}

impl From<SmcValue> for SmcVal {
    fn from(value: SmcValue) -> Self {
        Self {
            key: SmcKeyText::from_code(value.key),
            data_size: value.data_size,
            data_type: SmcKeyText::from_code(value.data_type),
            bytes: value.bytes,
        }
    }
}
