use std::sync::Arc;

use crate::error::Result;

/// Size of the controller's key-data structure, identical for input and output.
pub const STRUCT_SIZE: usize = 80;

/// One fixed-size request or response buffer.
pub type RawStruct = [u8; STRUCT_SIZE];

/// IOKit method index of the SMC user client's struct call.
pub const KERNEL_INDEX_SMC: u32 = 2;

/// A privileged request/response channel to the controller.
///
/// One call is one exchange: the transport writes `input`, and returns the
/// response buffer filled up to its fixed capacity. Implementations perform a
/// single attempt and never retry.
///
/// `call` takes `&self` so a single handle can serve concurrent callers.
pub trait SmcTransport {
    fn call(&self, selector: u32, input: &RawStruct) -> Result<RawStruct>;
}

impl<T: SmcTransport + ?Sized> SmcTransport for &T {
    fn call(&self, selector: u32, input: &RawStruct) -> Result<RawStruct> {
        (**self).call(selector, input)
    }
}

impl<T: SmcTransport + ?Sized> SmcTransport for Arc<T> {
    fn call(&self, selector: u32, input: &RawStruct) -> Result<RawStruct> {
        (**self).call(selector, input)
    }
}

impl<T: SmcTransport + ?Sized> SmcTransport for Box<T> {
    fn call(&self, selector: u32, input: &RawStruct) -> Result<RawStruct> {
        (**self).call(selector, input)
    }
}
