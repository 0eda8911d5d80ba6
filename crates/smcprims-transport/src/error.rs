use crate::kern::KernReturn;

/// Errors that can occur in SMC transport operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// No `AppleSMC` service is registered with IOKit.
    #[error("AppleSMC service not found")]
    ServiceNotFound,

    /// The service exists but opening a user-client connection failed.
    #[error("failed to open AppleSMC connection: {0}")]
    Open(KernReturn),

    /// Closing the connection failed.
    #[error("failed to close AppleSMC connection: {0}")]
    Close(KernReturn),

    /// The struct-method call was rejected by the kernel.
    #[error("struct method {selector} failed: {code}")]
    Call { selector: u32, code: KernReturn },

    /// The privileged transport does not exist on this platform.
    #[error("AppleSMC transport is only available on macOS")]
    Unsupported,
}

impl TransportError {
    /// The kernel status this error surfaces as.
    pub fn kern_return(&self) -> KernReturn {
        match self {
            TransportError::ServiceNotFound => KernReturn::NOT_FOUND,
            TransportError::Open(code) | TransportError::Close(code) => *code,
            TransportError::Call { code, .. } => *code,
            TransportError::Unsupported => KernReturn::UNSUPPORTED,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kern_return_follows_variant() {
        assert_eq!(
            TransportError::ServiceNotFound.kern_return(),
            KernReturn::NOT_FOUND
        );
        assert_eq!(
            TransportError::Unsupported.kern_return(),
            KernReturn::UNSUPPORTED
        );
        let err = TransportError::Call {
            selector: 2,
            code: KernReturn::NOT_OPEN,
        };
        assert_eq!(err.kern_return(), KernReturn::NOT_OPEN);
        assert!(err.to_string().contains("struct method 2"));
    }
}
