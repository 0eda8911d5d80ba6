/// Errors that can occur while building keys and values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// The text is not a valid four-character key.
    #[error("invalid key {text:?}: {reason}")]
    InvalidKey { text: String, reason: &'static str },

    /// The value does not fit the fixed data buffer.
    #[error("value too large ({size} bytes, max {max})")]
    ValueTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
