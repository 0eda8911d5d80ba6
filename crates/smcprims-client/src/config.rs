use smcprims_transport::KERNEL_INDEX_SMC;

/// Controls how a client talks to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// IOKit method index used for every struct call.
    pub kernel_index: u32,
    /// When false, every key-info lookup goes to the controller.
    pub cache_key_info: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            kernel_index: KERNEL_INDEX_SMC,
            cache_key_info: true,
        }
    }
}
