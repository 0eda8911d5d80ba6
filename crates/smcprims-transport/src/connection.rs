use tracing::{debug, warn};

use crate::error::{Result, TransportError};
use crate::traits::{RawStruct, SmcTransport, STRUCT_SIZE};

/// A user-client connection to the `AppleSMC` IOKit service.
///
/// Connections created by [`SmcConnection::open`] are closed on drop.
/// Connections wrapped with [`SmcConnection::borrowed`] belong to the caller
/// and are left open.
pub struct SmcConnection {
    conn: u32,
    owned: bool,
}

impl SmcConnection {
    /// IOKit class name of the controller service.
    pub const SERVICE_NAME: &'static str = "AppleSMC";

    /// Look up the `AppleSMC` service and open a connection to it.
    pub fn open() -> Result<Self> {
        let conn = sys::open_service()?;
        debug!(conn, "opened AppleSMC connection");
        Ok(Self { conn, owned: true })
    }

    /// Wrap a raw connection owned elsewhere. It is never closed by this value.
    pub fn borrowed(conn: u32) -> Self {
        Self { conn, owned: false }
    }

    /// Take ownership of a raw connection; it is closed on drop.
    pub fn from_raw(conn: u32) -> Self {
        Self { conn, owned: true }
    }

    /// Release ownership and return the raw connection number.
    pub fn into_raw(mut self) -> u32 {
        self.owned = false;
        self.conn
    }

    /// The raw connection number (`io_connect_t`).
    pub fn raw(&self) -> u32 {
        self.conn
    }

    /// Close the connection and report the kernel status.
    pub fn close(mut self) -> Result<()> {
        self.owned = false;
        let code = sys::close_connection(self.conn)?;
        if code.is_success() {
            debug!(conn = self.conn, "closed AppleSMC connection");
            Ok(())
        } else {
            Err(TransportError::Close(code))
        }
    }
}

impl SmcTransport for SmcConnection {
    fn call(&self, selector: u32, input: &RawStruct) -> Result<RawStruct> {
        let mut output = [0u8; STRUCT_SIZE];
        let code = sys::call_struct_method(self.conn, selector, input, &mut output)?;
        if code.is_success() {
            Ok(output)
        } else {
            Err(TransportError::Call { selector, code })
        }
    }
}

impl Drop for SmcConnection {
    fn drop(&mut self) {
        if !self.owned {
            return;
        }
        match sys::close_connection(self.conn) {
            Ok(code) if code.is_success() => debug!(conn = self.conn, "closed AppleSMC connection"),
            Ok(code) => warn!(conn = self.conn, %code, "failed to close AppleSMC connection"),
            Err(err) => debug!(conn = self.conn, %err, "no connection to close"),
        }
    }
}

impl std::fmt::Debug for SmcConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmcConnection")
            .field("conn", &self.conn)
            .field("owned", &self.owned)
            .finish()
    }
}

#[cfg(target_os = "macos")]
mod sys {
    use std::ffi::{c_char, c_void, CString};

    use tracing::debug;

    use super::SmcConnection;
    use crate::error::{Result, TransportError};
    use crate::kern::KernReturn;
    use crate::traits::{RawStruct, STRUCT_SIZE};

    type MachPort = u32;

    /// `kIOMainPortDefault`.
    const MAIN_PORT_DEFAULT: MachPort = 0;

    #[link(name = "IOKit", kind = "framework")]
    extern "C" {
        fn IOServiceMatching(name: *const c_char) -> *mut c_void;
        fn IOServiceGetMatchingService(main_port: MachPort, matching: *mut c_void) -> MachPort;
        fn IOServiceOpen(
            service: MachPort,
            owning_task: MachPort,
            connect_type: u32,
            connect: *mut MachPort,
        ) -> i32;
        fn IOServiceClose(connect: MachPort) -> i32;
        fn IOObjectRelease(object: MachPort) -> i32;
        fn IOConnectCallStructMethod(
            connection: MachPort,
            selector: u32,
            input: *const c_void,
            input_size: usize,
            output: *mut c_void,
            output_size: *mut usize,
        ) -> i32;
    }

    pub(super) fn open_service() -> Result<u32> {
        let name = CString::new(SmcConnection::SERVICE_NAME)
            .map_err(|_| TransportError::Open(KernReturn::BAD_ARGUMENT))?;

        // SAFETY: `name` is a valid NUL-terminated string for the duration of the call.
        // IOServiceGetMatchingService consumes the matching dictionary reference.
        let service = unsafe {
            let matching = IOServiceMatching(name.as_ptr());
            IOServiceGetMatchingService(MAIN_PORT_DEFAULT, matching)
        };
        if service == 0 {
            return Err(TransportError::ServiceNotFound);
        }

        let mut conn: MachPort = 0;
        // SAFETY: `service` is a live io_service_t owned by us and `conn` is a valid
        // out-pointer. The service reference is released after the open attempt.
        let code = unsafe {
            #[allow(deprecated)]
            let task = libc::mach_task_self();
            let code = IOServiceOpen(service, task, 0, &mut conn);
            IOObjectRelease(service);
            KernReturn(code)
        };

        if code.is_success() {
            Ok(conn)
        } else {
            Err(TransportError::Open(code))
        }
    }

    pub(super) fn close_connection(conn: u32) -> Result<KernReturn> {
        // SAFETY: IOServiceClose validates the port and reports a status for stale values.
        Ok(KernReturn(unsafe { IOServiceClose(conn) }))
    }

    pub(super) fn call_struct_method(
        conn: u32,
        selector: u32,
        input: &RawStruct,
        output: &mut RawStruct,
    ) -> Result<KernReturn> {
        let mut output_size = STRUCT_SIZE;
        // SAFETY: both buffers are STRUCT_SIZE bytes and outlive the call; the kernel
        // writes at most `output_size` bytes into `output`.
        let code = unsafe {
            IOConnectCallStructMethod(
                conn,
                selector,
                input.as_ptr().cast::<c_void>(),
                STRUCT_SIZE,
                output.as_mut_ptr().cast::<c_void>(),
                &mut output_size,
            )
        };
        if output_size != STRUCT_SIZE {
            debug!(output_size, "short struct method response");
        }
        Ok(KernReturn(code))
    }
}

#[cfg(not(target_os = "macos"))]
mod sys {
    use crate::error::{Result, TransportError};
    use crate::kern::KernReturn;
    use crate::traits::RawStruct;

    pub(super) fn open_service() -> Result<u32> {
        Err(TransportError::Unsupported)
    }

    pub(super) fn close_connection(_conn: u32) -> Result<KernReturn> {
        Err(TransportError::Unsupported)
    }

    pub(super) fn call_struct_method(
        _conn: u32,
        _selector: u32,
        _input: &RawStruct,
        _output: &mut RawStruct,
    ) -> Result<KernReturn> {
        Err(TransportError::Unsupported)
    }
}


#[cfg(all(test, target_os = "macos"))]
mod tests {
    use super::*;

    #[test]
    fn borrowed_connection_is_not_closed_on_drop() {
        let conn = SmcConnection::borrowed(0);
        assert_eq!(conn.raw(), 0);
        drop(conn);
    }
}
