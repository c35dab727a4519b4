use cobsframe_codec::inspect;

use crate::cmd::InspectArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::input::read_input;
use crate::output::{print_layout, OutputFormat};

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = read_input(&args.input)?;
    let layout = inspect(&frame);

    if !layout.is_terminated() {
        tracing::warn!(frame_len = frame.len(), "no frame delimiter found");
    }
    print_layout(&layout, format);
    Ok(SUCCESS)
}
