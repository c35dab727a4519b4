//! cobsframe-ffi: C-ABI exports for the cobsframe codec.

mod args;
mod codec;
mod error;
mod types;

use std::panic::AssertUnwindSafe;

pub use codec::{
    cobs_checksum, cobs_codec_decode, cobs_codec_free, cobs_codec_message, cobs_codec_new,
    cobs_decode, cobs_encode, cobs_max_encoded_len,
};
pub use types::{
    CobsCodecHandle, CobsResult, COBS_ERR_BUFFER_TOO_SMALL, COBS_ERR_CHECKSUM_MISMATCH,
    COBS_ERR_EMPTY_FRAME, COBS_ERR_INTERNAL, COBS_ERR_INVALID_ARGUMENT, COBS_MAX_FRAME_SIZE,
    COBS_OK,
};

fn ffi_boundary<T>(on_panic: T, f: impl FnOnce() -> T) -> T {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            error::set_panic_error();
            on_panic
        }
    }
}

#[no_mangle]
pub extern "C" fn cobs_clear_error() {
    ffi_boundary((), || {
        error::clear_error_state();
    });
}

#[no_mangle]
pub extern "C" fn cobs_last_error() -> *const std::os::raw::c_char {
    ffi_boundary(std::ptr::null(), error::last_error_ptr)
}
