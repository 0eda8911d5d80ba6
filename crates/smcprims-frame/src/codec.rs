use bytes::{Buf, BufMut, BytesMut};
use smcprims_transport::{RawStruct, STRUCT_SIZE};

use crate::fourcc::FourCharCode;
use crate::status::SmcStatus;

/// Capacity of the data buffer carried by every request and response.
pub const DATA_CAPACITY: usize = 32;

/// Byte offsets of the packed key-data structure.
pub mod layout {
    pub const KEY: usize = 0;
    pub const VERSION: usize = 4;
    pub const POWER_LIMIT: usize = 12;
    pub const KEY_INFO: usize = 28;
    pub const RESULT: usize = 40;
    pub const STATUS: usize = 41;
    pub const DATA8: usize = 42;
    pub const DATA32: usize = 44;
    pub const BYTES: usize = 48;
}

/// Controller firmware version block. Passed through uninterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionBlock {
    pub major: u8,
    pub minor: u8,
    pub build: u8,
    pub reserved: u8,
    pub release: u16,
}

/// Power-limit block. Passed through uninterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerLimitBlock {
    pub version: u16,
    pub length: u16,
    pub cpu_limit: u32,
    pub gpu_limit: u32,
    pub mem_limit: u32,
}

/// Declared size, type and attribute flags of one key's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyInfo {
    pub data_size: u32,
    pub data_type: FourCharCode,
    pub attributes: u8,
}

/// The controller's request/response structure.
///
/// Wire layout (80 bytes, C alignment):
/// ```text
/// ┌─────┬─────────┬─────┬─────────────┬────────────────────┬─────┬────────┬────────┬───────┬─────┬────────┬──────────┐
/// │ key │ version │ pad │ power limit │ key info (size,    │ pad │ result │ status │ data8 │ pad │ data32 │ bytes    │
/// │ 4B  │ 6B      │ 2B  │ 16B         │ type, attrs) 9B    │ 3B  │ 1B     │ 1B     │ 1B    │ 1B  │ 4B     │ 32B      │
/// └─────┴─────────┴─────┴─────────────┴────────────────────┴─────┴────────┴────────┴───────┴─────┴────────┴──────────┘
/// ```
/// Integer fields are in host byte order: the kernel copies the structure to
/// the controller driver verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyData {
    pub key: FourCharCode,
    pub version: VersionBlock,
    pub power_limit: PowerLimitBlock,
    pub key_info: KeyInfo,
    pub result: SmcStatus,
    pub status: u8,
    /// Command selector.
    pub data8: u8,
    /// Command context, e.g. the table index.
    pub data32: u32,
    pub bytes: [u8; DATA_CAPACITY],
}

impl Default for KeyData {
    fn default() -> Self {
        Self {
            key: FourCharCode::ZERO,
            version: VersionBlock::default(),
            power_limit: PowerLimitBlock::default(),
            key_info: KeyInfo::default(),
            result: SmcStatus::SUCCESS,
            status: 0,
            data8: 0,
            data32: 0,
            bytes: [0; DATA_CAPACITY],
        }
    }
}

impl KeyData {
    /// A zeroed request for `command` on `key`.
    pub fn request(key: FourCharCode, command: u8) -> Self {
        Self {
            key,
            data8: command,
            ..Self::default()
        }
    }
}

/// Encode a key-data structure into its fixed wire form.
pub fn encode_key_data(data: &KeyData) -> RawStruct {
    let mut dst = BytesMut::with_capacity(STRUCT_SIZE);

    dst.put_u32_ne(data.key.as_u32());

    dst.put_u8(data.version.major);
    dst.put_u8(data.version.minor);
    dst.put_u8(data.version.build);
    dst.put_u8(data.version.reserved);
    dst.put_u16_ne(data.version.release);
    dst.put_bytes(0, layout::POWER_LIMIT - layout::VERSION - 6);

    dst.put_u16_ne(data.power_limit.version);
    dst.put_u16_ne(data.power_limit.length);
    dst.put_u32_ne(data.power_limit.cpu_limit);
    dst.put_u32_ne(data.power_limit.gpu_limit);
    dst.put_u32_ne(data.power_limit.mem_limit);

    dst.put_u32_ne(data.key_info.data_size);
    dst.put_u32_ne(data.key_info.data_type.as_u32());
    dst.put_u8(data.key_info.attributes);
    dst.put_bytes(0, layout::RESULT - layout::KEY_INFO - 9);

    dst.put_u8(data.result.0);
    dst.put_u8(data.status);
    dst.put_u8(data.data8);
    dst.put_bytes(0, layout::DATA32 - layout::DATA8 - 1);
    dst.put_u32_ne(data.data32);

    dst.put_slice(&data.bytes);
    debug_assert_eq!(dst.len(), STRUCT_SIZE);

    let mut raw = [0u8; STRUCT_SIZE];
    raw.copy_from_slice(&dst);
    raw
}

/// Decode a key-data structure from its fixed wire form.
pub fn decode_key_data(raw: &RawStruct) -> KeyData {
    let mut src: &[u8] = raw;

    let key = FourCharCode(src.get_u32_ne());

    let version = VersionBlock {
        major: src.get_u8(),
        minor: src.get_u8(),
        build: src.get_u8(),
        reserved: src.get_u8(),
        release: src.get_u16_ne(),
    };
    src.advance(layout::POWER_LIMIT - layout::VERSION - 6);

    let power_limit = PowerLimitBlock {
        version: src.get_u16_ne(),
        length: src.get_u16_ne(),
        cpu_limit: src.get_u32_ne(),
        gpu_limit: src.get_u32_ne(),
        mem_limit: src.get_u32_ne(),
    };

    let key_info = KeyInfo {
        data_size: src.get_u32_ne(),
        data_type: FourCharCode(src.get_u32_ne()),
        attributes: src.get_u8(),
    };
    src.advance(layout::RESULT - layout::KEY_INFO - 9);

    let result = SmcStatus(src.get_u8());
    let status = src.get_u8();
    let data8 = src.get_u8();
    src.advance(layout::DATA32 - layout::DATA8 - 1);
    let data32 = src.get_u32_ne();

    let mut bytes = [0u8; DATA_CAPACITY];
    src.copy_to_slice(&mut bytes);

    KeyData {
        key,
        version,
        power_limit,
        key_info,
        result,
        status,
        data8,
        data32,
        bytes,
    }
}
