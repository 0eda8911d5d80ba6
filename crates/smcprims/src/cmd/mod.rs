use clap::{Args, Subcommand};
use smcprims_client::SmcClient;
use smcprims_frame::FourCharCode;
use smcprims_transport::SmcConnection;

use crate::exit::{transport_error, CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod info;
pub mod key_at;
pub mod read;
pub mod version;
pub mod write;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a key's current value.
    Read(ReadArgs),
    /// Write raw bytes to a key.
    Write(WriteArgs),
    /// Show a key's declared size, type and attributes.
    Info(InfoArgs),
    /// Print the key at a position in the controller's key table.
    KeyAt(KeyAtArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Read(args) => read::run(args, format),
        Command::Write(args) => write::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::KeyAt(args) => key_at::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Four-character key (e.g. TC0P).
    pub key: String,
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Four-character key (e.g. F0Tg).
    pub key: String,
    /// Value bytes as hex (e.g. 0x2a80). Must match the key's declared size.
    pub data: String,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Four-character key.
    pub key: String,
}

#[derive(Args, Debug)]
pub struct KeyAtArgs {
    /// Zero-based position in the key table.
    pub index: u32,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub(crate) fn parse_key(text: &str) -> CliResult<FourCharCode> {
    text.parse::<FourCharCode>()
        .map_err(|err| CliError::new(USAGE, format!("invalid key {text:?}: {err}")))
}

pub(crate) fn open_client() -> CliResult<SmcClient<SmcConnection>> {
    SmcConnection::open()
        .map(SmcClient::new)
        .map_err(|err| transport_error("failed to open AppleSMC", err))
}
