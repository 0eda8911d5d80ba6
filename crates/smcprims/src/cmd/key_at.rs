use crate::cmd::{open_client, KeyAtArgs};
use crate::exit::{smc_error, CliResult, SUCCESS};
use crate::output::{print_index_key, OutputFormat};

pub fn run(args: KeyAtArgs, format: OutputFormat) -> CliResult<i32> {
    let client = open_client()?;
    let key = client
        .key_at_index(args.index)
        .map_err(|err| smc_error(&format!("key at index {} failed", args.index), err))?;
    print_index_key(args.index, key, format);
    Ok(SUCCESS)
}
