use std::fs;
use std::io::Read;

use crate::cmd::InputArgs;
use crate::exit::{io_error, CliError, CliResult, USAGE};

pub fn read_input(args: &InputArgs) -> CliResult<Vec<u8>> {
    if let Some(text) = &args.hex {
        return parse_hex(text);
    }
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }

    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(buf)
}

fn parse_hex(text: &str) -> CliResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact
        .strip_prefix("0x")
        .or_else(|| compact.strip_prefix("0X"))
        .unwrap_or(&compact);

    hex::decode(digits)
        .map_err(|err| CliError::new(USAGE, format!("--hex is not valid hex: {err}")))
}
