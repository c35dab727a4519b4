use cobsframe_codec::{decode_frame, CodecConfig};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, frame_too_large, CliResult, SUCCESS};
use crate::input::read_input;
use crate::output::{print_decoded, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat, config: &CodecConfig) -> CliResult<i32> {
    let frame = read_input(&args.input)?;
    check_frame_size(&frame, config)?;

    let payload = decode_frame(&frame).map_err(|err| {
        tracing::warn!(frame_len = frame.len(), error = %err, "frame rejected");
        frame_error("decode failed", err)
    })?;

    print_decoded(&frame, &payload, format);
    Ok(SUCCESS)
}

/// Drop oversized input the way a serial reader would before decoding.
fn check_frame_size(frame: &[u8], config: &CodecConfig) -> CliResult<()> {
    if config.exceeds_max_frame(frame.len()) {
        tracing::warn!(
            frame_len = frame.len(),
            max_frame_size = config.max_frame_size,
            "frame exceeds maximum size, discarding"
        );
        return Err(frame_too_large(frame.len(), config.max_frame_size));
    }
    Ok(())
}
