use crate::cmd::{open_client, parse_key, InfoArgs};
use crate::exit::{smc_error, CliResult, SUCCESS};
use crate::output::{print_key_info, OutputFormat};

pub fn run(args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let key = parse_key(&args.key)?;
    let client = open_client()?;
    let info = client
        .key_info(key)
        .map_err(|err| smc_error(&format!("key info for {key} failed"), err))?;
    print_key_info(key, &info, format);
    Ok(SUCCESS)
}
