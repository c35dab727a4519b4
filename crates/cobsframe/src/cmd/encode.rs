use cobsframe_codec::encode;

use crate::cmd::EncodeArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::input::read_input;
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = read_input(&args.input)?;
    let frame = encode(&payload);

    tracing::debug!(payload_len = payload.len(), frame_len = frame.len(), "encoded payload");
    print_encoded(&payload, &frame, format);
    Ok(SUCCESS)
}
