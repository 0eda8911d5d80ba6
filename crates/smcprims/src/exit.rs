use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use smcprims_client::SmcError;
use smcprims_transport::{KernReturn, TransportError};

// Process exit codes.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const TRANSPORT_ERROR: i32 = 3;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn transport_error(context: &str, err: TransportError) -> CliError {
    let code = match err.kern_return() {
        KernReturn::NOT_PRIVILEGED => PERMISSION_DENIED,
        _ => TRANSPORT_ERROR,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn smc_error(context: &str, err: SmcError) -> CliError {
    match err {
        SmcError::Transport(err) => transport_error(context, err),
        SmcError::TypeMismatch { .. } => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        SmcError::Protocol { .. } if err.is_key_not_found() => {
            CliError::new(DATA_INVALID, format!("{context}: {err}"))
        }
        SmcError::Protocol { .. } => CliError::new(FAILURE, format!("{context}: {err}")),
        SmcError::InvalidArgument(_) | SmcError::Frame(_) => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
    }
}

/// Run a command, reporting a panic as an internal error instead of unwinding out of `main`.
pub fn run_guarded(command: impl FnOnce() -> CliResult<i32>) -> CliResult<i32> {
    catch_unwind(AssertUnwindSafe(command))
        .unwrap_or_else(|_| Err(CliError::new(INTERNAL, "internal error: command panicked")))
}
