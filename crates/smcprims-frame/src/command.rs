//! Controller command selectors, carried in the `data8` field.

/// Read the value stored at a key.
pub const READ_KEY: u8 = 5;

/// Write a value to a key.
pub const WRITE_KEY: u8 = 6;

/// Read the key stored at a table index (`data32`).
pub const GET_KEY_FROM_INDEX: u8 = 8;

/// Read a key's size, type and attributes.
pub const READ_KEY_INFO: u8 = 9;

/// Read power-limit data.
pub const READ_POWER_LIMIT: u8 = 11;

/// Read the controller firmware version.
pub const READ_VERSION: u8 = 12;

/// Returns a human-readable name for a command selector.
pub fn command_name(command: u8) -> &'static str {
    match command {
        READ_KEY => "READ_KEY",
        WRITE_KEY => "WRITE_KEY",
        GET_KEY_FROM_INDEX => "GET_KEY_FROM_INDEX",
        READ_KEY_INFO => "READ_KEY_INFO",
        READ_POWER_LIMIT => "READ_POWER_LIMIT",
        READ_VERSION => "READ_VERSION",
        _ => "UNKNOWN",
    }
}
