use crate::cmd::{open_client, parse_key, ReadArgs};
use crate::exit::{smc_error, CliResult, SUCCESS};
use crate::output::{print_value, OutputFormat};

pub fn run(args: ReadArgs, format: OutputFormat) -> CliResult<i32> {
    let key = parse_key(&args.key)?;
    let client = open_client()?;
    let value = client
        .read_key(key)
        .map_err(|err| smc_error(&format!("read {key} failed"), err))?;
    print_value(&value, format);
    Ok(SUCCESS)
}
