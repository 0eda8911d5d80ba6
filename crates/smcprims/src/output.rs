use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use smcprims_frame::{FourCharCode, KeyInfo, SmcValue};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct ValueOutput {
    key: String,
    data_type: String,
    data_size: u32,
    bytes: String,
}

#[derive(Serialize)]
struct KeyInfoOutput {
    key: String,
    data_type: String,
    data_size: u32,
    attributes: String,
}

#[derive(Serialize)]
struct IndexOutput {
    index: u32,
    key: String,
    code: String,
}

pub fn print_value(value: &SmcValue, format: OutputFormat) {
    let hex = hex::encode(value.data());
    match format {
        OutputFormat::Json => {
            let out = ValueOutput {
                key: value.key.to_text(),
                data_type: value.data_type.to_text(),
                data_size: value.data_size,
                bytes: hex,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            print_table(
                vec!["KEY", "TYPE", "SIZE", "BYTES"],
                vec![
                    value.key.to_text(),
                    value.data_type.to_text(),
                    value.data_size.to_string(),
                    hex,
                ],
            );
        }
        OutputFormat::Pretty => {
            println!(
                "key={} type={} size={} bytes={}",
                value.key, value.data_type, value.data_size, hex
            );
        }
        OutputFormat::Raw => print_raw(value.data()),
    }
}

pub fn print_key_info(key: FourCharCode, info: &KeyInfo, format: OutputFormat) {
    let attributes = format!("0x{:02x}", info.attributes);
    match format {
        OutputFormat::Json => {
            let out = KeyInfoOutput {
                key: key.to_text(),
                data_type: info.data_type.to_text(),
                data_size: info.data_size,
                attributes,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            print_table(
                vec!["KEY", "TYPE", "SIZE", "ATTRIBUTES"],
                vec![
                    key.to_text(),
                    info.data_type.to_text(),
                    info.data_size.to_string(),
                    attributes,
                ],
            );
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            println!(
                "key={} type={} size={} attributes={}",
                key, info.data_type, info.data_size, attributes
            );
        }
    }
}

pub fn print_index_key(index: u32, key: FourCharCode, format: OutputFormat) {
    let code = format!("0x{:08x}", key.as_u32());
    match format {
        OutputFormat::Json => {
            let out = IndexOutput {
                index,
                key: key.to_text(),
                code,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            print_table(
                vec!["INDEX", "KEY", "CODE"],
                vec![index.to_string(), key.to_text(), code],
            );
        }
        OutputFormat::Pretty => println!("index={index} key={key} code={code}"),
        OutputFormat::Raw => println!("{key}"),
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn print_table(header: Vec<&str>, row: Vec<String>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header)
        .add_row(row);
    println!("{table}");
}
