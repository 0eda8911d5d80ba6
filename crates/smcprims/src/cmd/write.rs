use smcprims_frame::SmcValue;
use tracing::info;

use crate::cmd::{open_client, parse_key, WriteArgs};
use crate::exit::{smc_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_value, OutputFormat};

pub fn run(args: WriteArgs, format: OutputFormat) -> CliResult<i32> {
    let key = parse_key(&args.key)?;
    let data = parse_hex(&args.data)?;

    let client = open_client()?;
    let info = client
        .key_info(key)
        .map_err(|err| smc_error(&format!("key info for {key} failed"), err))?;

    let value = SmcValue::new(key, info.data_type, &data)
        .map_err(|err| CliError::new(USAGE, format!("invalid value for {key}: {err}")))?;
    client
        .write_key(&value)
        .map_err(|err| smc_error(&format!("write {key} failed"), err))?;

    info!(key = %key, size = value.data_size, "key written");
    print_value(&value, format);
    Ok(SUCCESS)
}

fn parse_hex(text: &str) -> CliResult<Vec<u8>> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() {
        return Err(CliError::new(USAGE, "hex value must not be empty"));
    }
    hex::decode(digits)
        .map_err(|err| CliError::new(USAGE, format!("invalid hex value {text:?}: {err}")))
}
