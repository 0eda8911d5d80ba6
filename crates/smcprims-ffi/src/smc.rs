use std::sync::{Arc, OnceLock};

use smcprims_client::{KeyInfoCache, OperationResult, SmcClient};
use smcprims_frame::{FourCharCode, SmcValue};
use smcprims_transport::{KernReturn, SmcConnection, SmcTransport};

use crate::error;
use crate::types::{SmcKeyInfo, SmcKeyText, SmcResult, SmcVal};

static KEY_INFO_CACHE: OnceLock<Arc<KeyInfoCache>> = OnceLock::new();

/// The process-wide key-info cache shared by every C caller.
pub(crate) fn shared_cache() -> Arc<KeyInfoCache> {
    Arc::clone(KEY_INFO_CACHE.get_or_init(|| Arc::new(KeyInfoCache::new())))
}

fn client_for(conn: u32) -> SmcClient<SmcConnection> {
    SmcClient::new(SmcConnection::borrowed(conn)).with_cache(shared_cache())
}

fn success() -> SmcResult {
    SmcResult::from(OperationResult::SUCCESS)
}

fn read_key_with<T: SmcTransport>(
    client: &SmcClient<T>,
    key: &SmcKeyText,
    val: &mut SmcVal,
) -> SmcResult {
    let code = key.code();
    let mut value = SmcValue::empty(code);
    let result = client.read_key_into(code, &mut value);
    *val = SmcVal::from(value);

    match result {
        Ok(()) => success(),
        Err(err) => error::map_smc_error(&err),
    }
}

fn write_key_with<T: SmcTransport>(client: &SmcClient<T>, val: &SmcVal) -> SmcResult {
    match client.write_key(&val.to_value()) {
        Ok(()) => success(),
        Err(err) => error::map_smc_error(&err),
    }
}

fn key_from_index_with<T: SmcTransport>(
    client: &SmcClient<T>,
    index: u32,
    key: &mut SmcKeyText,
) -> SmcResult {
    match client.key_at_index(index) {
        Ok(code) => {
            *key = SmcKeyText::from_code(code);
            success()
        }
        Err(err) => error::map_smc_error(&err),
    }
}

fn key_info_with<T: SmcTransport>(
    client: &SmcClient<T>,
    key: u32,
    info: &mut SmcKeyInfo,
) -> SmcResult {
    match client.key_info(FourCharCode(key)) {
        Ok(found) => {
            *info = SmcKeyInfo::from(found);
            success()
        }
        Err(err) => error::map_smc_error(&err),
    }
}

/// Open a connection to the controller and store it in `*conn`.
///
/// Returns the kernel status; `*conn` is only written on success.
///
/// # Safety
/// `conn` must be null or a valid pointer to writable `uint32_t` storage.
#[no_mangle]
pub unsafe extern "C" fn smc_open(conn: *mut u32) -> i32 {
    crate::ffi_boundary(KernReturn::ERROR.0, || {
        error::clear_error_state();

        if conn.is_null() {
            error::set_error_message("conn cannot be null");
            return KernReturn::BAD_ARGUMENT.0;
        }

        match SmcConnection::open() {
            Ok(connection) => {
                // SAFETY: Pointer validity is guaranteed by the caller.
                unsafe { *conn = connection.into_raw() };
                KernReturn::SUCCESS.0
            }
            Err(err) => error::map_transport_error(&err),
        }
    })
}

/// Close a connection returned by `smc_open`.
#[no_mangle]
pub extern "C" fn smc_close(conn: u32) -> i32 {
    crate::ffi_boundary(KernReturn::ERROR.0, || {
        error::clear_error_state();

        match SmcConnection::from_raw(conn).close() {
            Ok(()) => KernReturn::SUCCESS.0,
            Err(err) => error::map_transport_error(&err),
        }
    })
}

/// Read the value of `key` into `val`.
///
/// On failure after the key is known, `val` keeps the key and, when the key
/// info was read, its size and type; data bytes stay zeroed.
///
/// # Safety
/// `key` must be null or point to a readable `SmcKeyText`; `val` must be null or
/// point to writable `SmcVal` storage.
#[no_mangle]
pub unsafe extern "C" fn smc_read_key(
    key: *const SmcKeyText,
    val: *mut SmcVal,
    conn: u32,
) -> SmcResult {
    crate::ffi_boundary(SmcResult::bad_argument(), || {
        error::clear_error_state();

        if key.is_null() || val.is_null() {
            return error::set_invalid_argument("key and val cannot be null");
        }

        // SAFETY: Pointer validity is guaranteed by the caller.
        let (key, val) = unsafe { (&*key, &mut *val) };
        read_key_with(&client_for(conn), key, val)
    })
}

/// Write `val` to its key after checking its size and type.
///
/// # Safety
/// `val` must be null or point to a readable `SmcVal`.
#[no_mangle]
pub unsafe extern "C" fn smc_write_key(val: *const SmcVal, conn: u32) -> SmcResult {
    crate::ffi_boundary(SmcResult::bad_argument(), || {
        error::clear_error_state();

        if val.is_null() {
            return error::set_invalid_argument("val cannot be null");
        }

        // SAFETY: Pointer validity is guaranteed by the caller.
        let val = unsafe { &*val };
        write_key_with(&client_for(conn), val)
    })
}

/// Store the key at table `index` into `key`. `key` is untouched on failure.
///
/// # Safety
/// `key` must be null or point to writable `SmcKeyText` storage.
#[no_mangle]
pub unsafe extern "C" fn smc_get_key_from_index(
    index: u32,
    key: *mut SmcKeyText,
    conn: u32,
) -> SmcResult {
    crate::ffi_boundary(SmcResult::bad_argument(), || {
        error::clear_error_state();

        if key.is_null() {
            return error::set_invalid_argument("key cannot be null");
        }

        // SAFETY: Pointer validity is guaranteed by the caller.
        let key = unsafe { &mut *key };
        key_from_index_with(&client_for(conn), index, key)
    })
}

/// Store the size, type and attributes of `key` into `info`.
///
/// # Safety
/// `info` must be null or point to writable `SmcKeyInfo` storage.
#[no_mangle]
pub unsafe extern "C" fn smc_get_key_info(
    key: u32,
    info: *mut SmcKeyInfo,
    conn: u32,
) -> SmcResult {
    crate::ffi_boundary(SmcResult::bad_argument(), || {
        error::clear_error_state();

        if info.is_null() {
            return error::set_invalid_argument("info cannot be null");
        }

        // SAFETY: Pointer validity is guaranteed by the caller.
        let info = unsafe { &mut *info };
        key_info_with(&client_for(conn), key, info)
    })
}

/// Drop every cached key info entry. The cache repopulates on next use.
#[no_mangle]
pub extern "C" fn smc_cleanup_cache() {
    crate::ffi_boundary((), || shared_cache().reset());
}

/// Pack a key into its 32-bit code. A null pointer yields 0.
///
/// # Safety
/// `text` must be null or point to a readable `SmcKeyText`.
#[no_mangle]
pub unsafe extern "C" fn smc_fourcc_from_string(text: *const SmcKeyText) -> u32 {
    crate::ffi_boundary(0, || {
        if text.is_null() {
            return 0;
        }
        // SAFETY: Pointer validity is guaranteed by the caller.
        unsafe { (*text).code() }.as_u32()
    })
}

/// Unpack a 32-bit code into NUL-terminated text. A null `out` is ignored.
///
/// # Safety
/// `out` must be null or point to writable `SmcKeyText` storage.
#[no_mangle]
pub unsafe extern "C" fn smc_string_from_fourcc(code: u32, out: *mut SmcKeyText) {
    crate::ffi_boundary((), || {
        if out.is_null() {
            return;
        }
        // SAFETY: Pointer validity is guaranteed by the caller.
        unsafe { *out = SmcKeyText::from_code(FourCharCode(code)) };
    })
}
