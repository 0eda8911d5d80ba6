use std::fmt;

/// Kernel/IOKit status code (`kern_return_t` / `IOReturn`).
///
/// This is the transport-level status. It is independent of the status byte
/// the controller embeds in its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernReturn(pub i32);

impl KernReturn {
    /// `KERN_SUCCESS` / `kIOReturnSuccess`.
    pub const SUCCESS: Self = Self(0);
    /// `kIOReturnError`: general error.
    pub const ERROR: Self = Self::from_bits(0xe000_02bc);
    /// `kIOReturnNotPrivileged`: privilege violation.
    pub const NOT_PRIVILEGED: Self = Self::from_bits(0xe000_02c1);
    /// `kIOReturnBadArgument`: invalid argument.
    pub const BAD_ARGUMENT: Self = Self::from_bits(0xe000_02c2);
    /// `kIOReturnUnsupported`: unsupported function.
    pub const UNSUPPORTED: Self = Self::from_bits(0xe000_02c7);
    /// `kIOReturnNotOpen`: device not open.
    pub const NOT_OPEN: Self = Self::from_bits(0xe000_02cd);
    /// `kIOReturnNotFound`: data or service not found.
    pub const NOT_FOUND: Self = Self::from_bits(0xe000_02f0);

    /// Build from the unsigned bit pattern IOKit headers use.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits as i32)
    }

    /// The unsigned bit pattern.
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    pub const fn is_success(self) -> bool {
        self.0 == 0
    }

    /// Symbolic name for well-known codes.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Self::SUCCESS => Some("kIOReturnSuccess"),
            Self::ERROR => Some("kIOReturnError"),
            Self::NOT_PRIVILEGED => Some("kIOReturnNotPrivileged"),
            Self::BAD_ARGUMENT => Some("kIOReturnBadArgument"),
            Self::UNSUPPORTED => Some("kIOReturnUnsupported"),
            Self::NOT_OPEN => Some("kIOReturnNotOpen"),
            Self::NOT_FOUND => Some("kIOReturnNotFound"),
            _ => None,
        }
    }
}

impl fmt::Display for KernReturn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} (0x{:08x})", self.bits()),
            None => write!(f, "0x{:08x}", self.bits()),
        }
    }
}

impl From<i32> for KernReturn {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<KernReturn> for i32 {
    fn from(value: KernReturn) -> Self {
        value.0
    }
}
