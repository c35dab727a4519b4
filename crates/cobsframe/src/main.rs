mod cmd;
mod exit;
mod input;
mod logging;
mod output;

use clap::Parser;
use cobsframe_codec::{CodecConfig, MAX_FRAME_SIZE};

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "cobsframe", version, about = "COBS frame codec CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    /// Frames longer than this are discarded before decoding.
    #[arg(
        long,
        value_name = "BYTES",
        env = "COBSFRAME_MAX_FRAME_SIZE",
        default_value_t = MAX_FRAME_SIZE,
        global = true
    )]
    max_frame_size: usize,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let config = CodecConfig {
        max_frame_size: cli.max_frame_size,
    };
    let result = cmd::run(cli.command, format, &config);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode_subcommand() {
        let cli = Cli::try_parse_from(["cobsframe", "encode", "--hex", "010203"])
            .expect("encode args should parse");

        assert!(matches!(cli.command, Command::Encode(_)));
    }

    #[test]
    fn rejects_conflicting_input_args() {
        let err = Cli::try_parse_from([
            "cobsframe",
            "encode",
            "--hex",
            "01",
            "--data",
            "hello",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn max_frame_size_defaults_to_codec_constant() {
        let cli = Cli::try_parse_from(["cobsframe", "decode", "--hex", "0401020301 00"])
            .expect("decode args should parse");
        assert_eq!(cli.max_frame_size, MAX_FRAME_SIZE);
        assert!(matches!(cli.command, Command::Decode(_)));
    }

    #[test]
    fn max_frame_size_is_global() {
        let cli = Cli::try_parse_from([
            "cobsframe",
            "inspect",
            "--hex",
            "0100",
            "--max-frame-size",
            "16",
        ])
        .expect("inspect args should parse");
        assert_eq!(cli.max_frame_size, 16);
    }
}
