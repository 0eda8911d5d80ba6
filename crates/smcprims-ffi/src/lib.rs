//! smcprims-ffi: C-ABI exports for smcprims key operations.
//!
//! Every call returns the kernel status and the controller status together
//! (`SmcResult`). All callers share one process-wide key-info cache, which
//! `smc_cleanup_cache` empties.

mod error;
mod smc;
mod types;

use std::panic::AssertUnwindSafe;

pub use smc::{
    smc_cleanup_cache, smc_close, smc_fourcc_from_string, smc_get_key_from_index,
    smc_get_key_info, smc_open, smc_read_key, smc_string_from_fourcc, smc_write_key,
};
pub use types::{
    SmcKeyInfo, SmcKeyText, SmcResult, SmcVal, SMC_RETURN_DATA_TYPE_MISMATCH, SMC_RETURN_ERROR,
    SMC_RETURN_KEY_NOT_FOUND, SMC_RETURN_SUCCESS,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

#[no_mangle]
pub extern "C" fn smc_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use smcprims_transport::KernReturn;

    use super::*;

    fn last_error() -> String {
        let ptr = smc_last_error();
        assert!(!ptr.is_null());
        // SAFETY: smc_last_error returns a pointer to a thread-local CString.
        unsafe { CStr::from_ptr(ptr).to_string_lossy().into_owned() }
    }

    fn text(s: &[u8; 4]) -> SmcKeyText {
        SmcKeyText {
            chars: [s[0], s[1], s[2], s[3], 0],
        }
    }

    #[test]
    fn fourcc_helpers_roundtrip() {
        let key = text(b"TC0P");
        // SAFETY: `key` is a valid SmcKeyText on the stack.
        let code = unsafe { smc_fourcc_from_string(&key) };
        assert_eq!(code, 0x5443_3050);

        let mut out = SmcKeyText::default();
        // SAFETY: `out` is valid writable storage.
        unsafe { smc_string_from_fourcc(code, &mut out) };
        assert_eq!(&out.chars, b"TC0P\0");
    }

    #[test]
    fn fourcc_helpers_tolerate_null() {
        // SAFETY: null is an accepted input.
        unsafe {
            assert_eq!(smc_fourcc_from_string(std::ptr::null()), 0);
            smc_string_from_fourcc(0x5443_3050, std::ptr::null_mut());
        }
    }

    #[test]
    fn null_arguments_are_rejected_locally() {
        let bad = SmcResult {
            kern_res: KernReturn::BAD_ARGUMENT.0,
            smc_res: SMC_RETURN_ERROR,
        };
        let key = text(b"TC0P");
        let mut val = SmcVal::default();

        // SAFETY: null pointers are rejected before any dereference.
        unsafe {
            assert_eq!(smc_read_key(std::ptr::null(), &mut val, 0), bad);
            assert_eq!(smc_read_key(&key, std::ptr::null_mut(), 0), bad);
            assert_eq!(smc_write_key(std::ptr::null(), 0), bad);
            assert_eq!(smc_get_key_from_index(0, std::ptr::null_mut(), 0), bad);
            assert_eq!(smc_get_key_info(0, std::ptr::null_mut(), 0), bad);
            assert_eq!(smc_open(std::ptr::null_mut()), KernReturn::BAD_ARGUMENT.0);
        }
        assert_eq!(val, SmcVal::default());
        assert!(last_error().contains("cannot be null"));
    }

    #[test]
    fn cleanup_cache_is_safe_to_repeat() {
        smc_cleanup_cache();
        smc_cleanup_cache();
        // Failed lookups are never cached, and off macOS every lookup fails.
        #[cfg(not(target_os = "macos"))]
        assert!(smc::shared_cache().is_empty());
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn operations_report_unsupported_transport() {
        let key = text(b"TC0P");
        let mut val = SmcVal::default();
        val.bytes = [0xFF; 32];

        // SAFETY: all pointers refer to valid stack storage.
        let result = unsafe { smc_read_key(&key, &mut val, 7) };
        assert_eq!(result.kern_res, KernReturn::UNSUPPORTED.0);
        assert_eq!(result.smc_res, SMC_RETURN_ERROR);
        assert_eq!(&val.key.chars, b"TC0P\0");
        assert_eq!(val.data_size, 0);
        assert!(val.bytes.iter().all(|&b| b == 0));
        assert!(last_error().contains("only available on macOS"));

        let mut out = text(b"KEEP");
        // SAFETY: `out` is valid writable storage.
        let result = unsafe { smc_get_key_from_index(0, &mut out, 7) };
        assert_eq!(result.kern_res, KernReturn::UNSUPPORTED.0);
        assert_eq!(&out.chars, b"KEEP\0");

        let mut conn = 99u32;
        // SAFETY: `conn` is valid writable storage.
        assert_eq!(unsafe { smc_open(&mut conn) }, KernReturn::UNSUPPORTED.0);
        assert_eq!(conn, 99);
        assert_eq!(smc_close(conn), KernReturn::UNSUPPORTED.0);
    }
}
