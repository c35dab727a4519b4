use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use cobsframe_codec::FrameLayout;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

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
struct EncodedOutput {
    payload_size: usize,
    frame_size: usize,
    frame: String,
}

#[derive(Serialize)]
struct DecodedOutput {
    frame_size: usize,
    payload_size: usize,
    payload: String,
    payload_hex: String,
}

#[derive(Serialize)]
struct BlockOutput {
    offset: usize,
    overhead: u8,
    data_size: usize,
    full: bool,
    truncated: bool,
}

#[derive(Serialize)]
struct LayoutOutput {
    frame_size: usize,
    decoded_size: usize,
    terminated: bool,
    delimiter_offset: Option<usize>,
    trailing_size: usize,
    blocks: Vec<BlockOutput>,
}

pub fn print_encoded(payload: &[u8], frame: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                payload_size: payload.len(),
                frame_size: frame.len(),
                frame: hex::encode(frame),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PAYLOAD SIZE", "FRAME SIZE", "FRAME"])
                .add_row(vec![
                    payload.len().to_string(),
                    frame.len().to_string(),
                    spaced_hex(frame),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "payload_size={} frame_size={} frame={}",
                payload.len(),
                frame.len(),
                spaced_hex(frame)
            );
        }
        OutputFormat::Raw => {
            print_raw(frame);
        }
    }
}

pub fn print_decoded(frame: &[u8], payload: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = DecodedOutput {
                frame_size: frame.len(),
                payload_size: payload.len(),
                payload: payload_preview(payload),
                payload_hex: hex::encode(payload),
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FRAME SIZE", "PAYLOAD SIZE", "PAYLOAD"])
                .add_row(vec![
                    frame.len().to_string(),
                    payload.len().to_string(),
                    payload_preview(payload),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "frame_size={} payload_size={} payload={}",
                frame.len(),
                payload.len(),
                payload_preview(payload)
            );
        }
        OutputFormat::Raw => {
            print_raw(payload);
        }
    }
}

pub fn print_layout(layout: &FrameLayout, format: OutputFormat) {
    let out = LayoutOutput {
        frame_size: layout.frame_len(),
        decoded_size: layout.decoded_len(),
        terminated: layout.is_terminated(),
        delimiter_offset: layout.delimiter_offset,
        trailing_size: layout.trailing_len,
        blocks: layout
            .blocks
            .iter()
            .map(|block| BlockOutput {
                offset: block.offset,
                overhead: block.overhead,
                data_size: block.data_len,
                full: block.is_full(),
                truncated: block.is_truncated(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Json | OutputFormat::Raw => print_json(&out),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OFFSET", "OVERHEAD", "DATA", "STATE"]);
            for block in &out.blocks {
                table.add_row(vec![
                    block.offset.to_string(),
                    format!("0x{:02X}", block.overhead),
                    block.data_size.to_string(),
                    block_state(block).to_string(),
                ]);
            }
            println!("{table}");
            println!("{}", layout_summary(&out));
        }
        OutputFormat::Pretty => {
            for block in &out.blocks {
                println!(
                    "offset={} overhead=0x{:02X} data={} state={}",
                    block.offset,
                    block.overhead,
                    block.data_size,
                    block_state(block)
                );
            }
            println!("{}", layout_summary(&out));
        }
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

fn block_state(block: &BlockOutput) -> &'static str {
    if block.truncated {
        "truncated"
    } else if block.full {
        "full"
    } else {
        "short"
    }
}

fn layout_summary(out: &LayoutOutput) -> String {
    match out.delimiter_offset {
        Some(offset) => format!(
            "blocks={} frame_size={} decoded_size={} delimiter_offset={} trailing={}",
            out.blocks.len(),
            out.frame_size,
            out.decoded_size,
            offset,
            out.trailing_size
        ),
        None => format!(
            "blocks={} frame_size={} decoded_size={} unterminated",
            out.blocks.len(),
            out.frame_size,
            out.decoded_size
        ),
    }
}

fn spaced_hex(data: &[u8]) -> String {
    data.iter()
        .map(|byte| format!("{byte:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}
