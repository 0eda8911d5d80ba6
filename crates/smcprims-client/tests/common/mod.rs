#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use smcprims_frame::{
    decode_key_data, encode_key_data, FourCharCode, KeyData, KeyInfo, SmcStatus, DATA_CAPACITY,
    GET_KEY_FROM_INDEX, READ_KEY, READ_KEY_INFO, WRITE_KEY,
};
use smcprims_transport::{
    KernReturn, RawStruct, SmcTransport, TransportError, KERNEL_INDEX_SMC,
};

#[derive(Debug, Clone, Copy)]
struct FakeKey {
    info: KeyInfo,
    bytes: [u8; DATA_CAPACITY],
}

/// In-memory controller speaking the packed key-data protocol.
#[derive(Default)]
pub struct FakeController {
    keys: Mutex<BTreeMap<FourCharCode, FakeKey>>,
    calls: [AtomicUsize; 16],
    kernel_failure: Mutex<Option<KernReturn>>,
    command_failures: Mutex<BTreeMap<u8, SmcStatus>>,
    info_delay: Mutex<Option<Duration>>,
    /// When set, each key-info response carries a distinct attribute byte.
    vary_attributes: bool,
    info_serial: AtomicU8,
}

pub fn key(text: &str) -> FourCharCode {
    FourCharCode::from_text(text)
}

pub fn key_info(size: u32, ty: &str) -> KeyInfo {
    KeyInfo {
        data_size: size,
        data_type: FourCharCode::from_text(ty),
        attributes: 0xD0,
    }
}

impl FakeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// A controller with a few typical keys.
    pub fn with_sample_keys() -> Self {
        let controller = Self::new();
        controller.add_key("#KEY", key_info(4, "ui32"), &[0, 0, 0, 3]);
        controller.add_key("TC0P", key_info(2, "sp78"), &[0x2A, 0x80]);
        controller.add_key("F0Tg", key_info(4, "flt "), &1200.0f32.to_le_bytes());
        controller
    }

    pub fn with_varying_attributes(mut self) -> Self {
        self.vary_attributes = true;
        self
    }

    pub fn add_key(&self, text: &str, info: KeyInfo, data: &[u8]) {
        let mut bytes = [0u8; DATA_CAPACITY];
        bytes[..data.len()].copy_from_slice(data);
        self.keys
            .lock()
            .unwrap()
            .insert(key(text), FakeKey { info, bytes });
    }

    pub fn set_key_info(&self, text: &str, info: KeyInfo) {
        if let Some(entry) = self.keys.lock().unwrap().get_mut(&key(text)) {
            entry.info = info;
        }
    }

    pub fn stored_bytes(&self, text: &str) -> Option<[u8; DATA_CAPACITY]> {
        self.keys.lock().unwrap().get(&key(text)).map(|k| k.bytes)
    }

    pub fn fail_kernel(&self, code: Option<KernReturn>) {
        *self.kernel_failure.lock().unwrap() = code;
    }

    pub fn fail_command(&self, command: u8, status: SmcStatus) {
        self.command_failures.lock().unwrap().insert(command, status);
    }

    pub fn delay_key_info(&self, delay: Duration) {
        *self.info_delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self, command: u8) -> usize {
        self.calls[usize::from(command) % 16].load(Ordering::SeqCst)
    }

    fn respond(&self, request: &KeyData) -> KeyData {
        let mut response = KeyData::default();

        if let Some(status) = self.command_failures.lock().unwrap().get(&request.data8) {
            response.result = *status;
            return response;
        }

        let mut keys = self.keys.lock().unwrap();
        match request.data8 {
            READ_KEY_INFO => match keys.get(&request.key) {
                Some(entry) => {
                    response.key_info = entry.info;
                    if self.vary_attributes {
                        response.key_info.attributes =
                            self.info_serial.fetch_add(1, Ordering::SeqCst);
                    }
                }
                None => response.result = SmcStatus::KEY_NOT_FOUND,
            },
            READ_KEY => match keys.get(&request.key) {
                Some(entry) if entry.info.data_size == request.key_info.data_size => {
                    response.key_info.data_size = entry.info.data_size;
                    response.bytes = entry.bytes;
                }
                Some(_) => response.result = SmcStatus::ERROR,
                None => response.result = SmcStatus::KEY_NOT_FOUND,
            },
            WRITE_KEY => match keys.get_mut(&request.key) {
                Some(entry) if entry.info.data_size == request.key_info.data_size => {
                    entry.bytes = request.bytes;
                }
                Some(_) => response.result = SmcStatus::DATA_TYPE_MISMATCH,
                None => response.result = SmcStatus::KEY_NOT_FOUND,
            },
            GET_KEY_FROM_INDEX => match keys.keys().nth(request.data32 as usize) {
                Some(found) => response.key = *found,
                None => response.result = SmcStatus::ERROR,
            },
            _ => response.result = SmcStatus::ERROR,
        }
        response
    }
}

impl SmcTransport for FakeController {
    fn call(&self, selector: u32, input: &RawStruct) -> smcprims_transport::Result<RawStruct> {
        let request = decode_key_data(input);
        self.calls[usize::from(request.data8) % 16].fetch_add(1, Ordering::SeqCst);

        if selector != KERNEL_INDEX_SMC {
            return Err(TransportError::Call {
                selector,
                code: KernReturn::BAD_ARGUMENT,
            });
        }
        if let Some(code) = *self.kernel_failure.lock().unwrap() {
            return Err(TransportError::Call { selector, code });
        }
        if request.data8 == READ_KEY_INFO {
            let delay = *self.info_delay.lock().unwrap();
            if let Some(delay) = delay {
                std::thread::sleep(delay);
            }
        }

        Ok(encode_key_data(&self.respond(&request)))
    }
}
