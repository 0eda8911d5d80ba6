use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;

use smcprims_client::SmcError;
use smcprims_transport::TransportError;

use crate::types::SmcResult;

thread_local! {
    static LAST_ERROR: RefCell<CString> = RefCell::new(CString::default());
}

pub(crate) fn clear_error_state() {
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::default();
    });
}

pub(crate) fn set_error_message(message: impl Into<String>) {
    let sanitized = message.into().replace('\0', "?");
    LAST_ERROR.with(|state| {
        *state.borrow_mut() = CString::new(sanitized).unwrap_or_default();
    });
}

pub(crate) fn set_invalid_argument(message: impl Into<String>) -> SmcResult {
    set_error_message(message);
    SmcResult::bad_argument()
}

pub(crate) fn set_panic_error() {
    set_error_message("panic across FFI boundary");
}

pub(crate) fn map_smc_error(err: &SmcError) -> SmcResult {
    set_error_message(err.to_string());
    err.status().into()
}

pub(crate) fn map_transport_error(err: &TransportError) -> i32 {
    set_error_message(err.to_string());
    err.kern_return().0
}

pub(crate) fn last_error_ptr() -> *const c_char {
    LAST_ERROR.with(|state| state.borrow().as_ptr())
}
