use std::fmt;

/// Status byte the controller writes into the `result` field of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SmcStatus(pub u8);

impl SmcStatus {
    pub const SUCCESS: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const KEY_NOT_FOUND: Self = Self(132);
    pub const DATA_TYPE_MISMATCH: Self = Self(140);

    pub const fn is_success(self) -> bool {
        self.0 == Self::SUCCESS.0
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SUCCESS => "success",
            Self::ERROR => "error",
            Self::KEY_NOT_FOUND => "key not found",
            Self::DATA_TYPE_MISMATCH => "data type mismatch",
            _ => "unknown",
        }
    }
}

impl fmt::Display for SmcStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

impl From<u8> for SmcStatus {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<SmcStatus> for u8 {
    fn from(value: SmcStatus) -> Self {
        value.0
    }
}
