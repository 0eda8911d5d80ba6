use std::fmt;

use smcprims_frame::{command_name, FourCharCode, FrameError, SmcStatus};
use smcprims_transport::{KernReturn, TransportError};

/// Transport status and protocol status of one operation, reported together.
///
/// Either axis can fail independently: a kernel failure never reaches the
/// controller, and a controller failure arrives over a successful call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationResult {
    pub kern: KernReturn,
    pub smc: SmcStatus,
}

impl OperationResult {
    pub const SUCCESS: Self = Self {
        kern: KernReturn::SUCCESS,
        smc: SmcStatus::SUCCESS,
    };

    pub const fn new(kern: KernReturn, smc: SmcStatus) -> Self {
        Self { kern, smc }
    }

    pub const fn is_success(self) -> bool {
        self.kern.is_success() && self.smc.is_success()
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kern={} smc={}", self.kern, self.smc)
    }
}

/// Errors that can occur in key operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmcError {
    /// Rejected locally before any transport call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport-level failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The controller answered with a non-success status.
    #[error("{} on key {key} failed: {status}", op_name(.command))]
    Protocol {
        key: FourCharCode,
        command: u8,
        status: SmcStatus,
    },

    /// A write did not match the key's declared size and type.
    #[error(
        "data type mismatch on key {key}: expected {expected_type} ({expected_size} bytes), \
         got {actual_type} ({actual_size} bytes)"
    )]
    TypeMismatch {
        key: FourCharCode,
        expected_size: u32,
        expected_type: FourCharCode,
        actual_size: u32,
        actual_type: FourCharCode,
    },

    /// A key or value could not be built.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),
}

impl SmcError {
    /// The status pair this error reports at the C boundary.
    pub fn status(&self) -> OperationResult {
        match self {
            SmcError::InvalidArgument(_) | SmcError::Frame(_) => {
                OperationResult::new(KernReturn::BAD_ARGUMENT, SmcStatus::ERROR)
            }
            SmcError::Transport(err) => OperationResult::new(err.kern_return(), SmcStatus::ERROR),
            SmcError::Protocol { status, .. } => OperationResult::new(KernReturn::SUCCESS, *status),
            SmcError::TypeMismatch { .. } => {
                OperationResult::new(KernReturn::BAD_ARGUMENT, SmcStatus::DATA_TYPE_MISMATCH)
            }
        }
    }

    /// True when the controller reported the key as unknown.
    pub fn is_key_not_found(&self) -> bool {
        matches!(
            self,
            SmcError::Protocol {
                status: SmcStatus::KEY_NOT_FOUND,
                ..
            }
        )
    }
}

pub type Result<T> = std::result::Result<T, SmcError>;

fn op_name(command: &u8) -> &'static str {
    command_name(*command)
}

/// Collapse an operation outcome into its status pair.
pub fn status_of<T>(result: &Result<T>) -> OperationResult {
    match result {
        Ok(_) => OperationResult::SUCCESS,
        Err(err) => err.status(),
    }
}
