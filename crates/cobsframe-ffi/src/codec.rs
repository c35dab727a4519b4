use cobsframe_codec::{checksum, decode_frame, encode, max_encoded_len, CobsCodec};

use crate::args::{bytes_arg, out_arg};
use crate::error;
use crate::types::{CobsCodecHandle, CobsResult, CodecHandle};

fn with_codec_mut<T>(
    handle: CobsCodecHandle,
    on_error: T,
    f: impl FnOnce(&mut CodecHandle) -> T,
) -> T {
    if handle.is_null() {
        let _ = error::set_invalid_argument("codec handle cannot be null");
        return on_error;
    }

    let codec_handle = {
        // SAFETY: Pointer validity is guaranteed by the caller.
        unsafe { &mut *(handle as *mut CodecHandle) }
    };

    f(codec_handle)
}

/// Upper bound on the encoded size of a `payload_len`-byte payload.
#[no_mangle]
pub extern "C" fn cobs_max_encoded_len(payload_len: usize) -> usize {
    crate::ffi_boundary(0, || max_encoded_len(payload_len))
}

/// XOR checksum of `len` bytes at `data`. Returns 0 for invalid arguments.
///
/// # Safety
/// If `len > 0`, `data` must be non-null and readable for `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn cobs_checksum(data: *const u8, len: usize) -> u8 {
    crate::ffi_boundary(0, || {
        error::clear_error_state();

        // SAFETY: Pointer/length pairing is validated in helper.
        match unsafe { bytes_arg(data, len, "data") } {
            Some(data) => checksum(data),
            None => 0,
        }
    })
}

/// Encode `payload_len` bytes at `payload` into `out`.
///
/// On success `*out_len` holds the frame length. When `out_cap` is too small
/// nothing is written to `out`, `*out_len` holds the required size and
/// `COBS_ERR_BUFFER_TOO_SMALL` is returned.
///
/// # Safety
/// If `payload_len > 0`, `payload` must be readable for `payload_len` bytes. If `out_cap > 0`,
/// `out` must be writable for `out_cap` bytes. `out_len` must be non-null.
#[no_mangle]
pub unsafe extern "C" fn cobs_encode(
    payload: *const u8,
    payload_len: usize,
    out: *mut u8,
    out_cap: usize,
    out_len: *mut usize,
) -> CobsResult {
    crate::ffi_boundary(CobsResult::Internal, || {
        error::clear_error_state();

        // SAFETY: Null is checked in helper; validity is guaranteed by the caller.
        let Some(out_len) = (unsafe { out_arg(out_len, "out_len") }) else {
            return CobsResult::InvalidArgument;
        };
        // SAFETY: Pointer/length pairing is validated in helper.
        let Some(payload) = (unsafe { bytes_arg(payload, payload_len, "payload") }) else {
            return CobsResult::InvalidArgument;
        };

        let frame = encode(payload);
        *out_len = frame.len();
        if frame.len() > out_cap {
            return error::set_buffer_too_small(frame.len(), out_cap);
        }
        if out.is_null() {
            return error::set_invalid_argument("out cannot be null when out_cap > 0");
        }

        // SAFETY: `out` is non-null and the caller guarantees `out_cap >= frame.len()` writable bytes.
        let dst = unsafe { std::slice::from_raw_parts_mut(out, frame.len()) };
        dst.copy_from_slice(&frame);
        CobsResult::Ok
    })
}

/// Decode one frame without touching any codec state.
///
/// Writes the payload to `out` and its length to `*out_len`. When `out_cap`
/// is too small, `*out_len` holds the required size.
///
/// # Safety
/// If `len > 0`, `frame` must be readable for `len` bytes. If `out_cap > 0`, `out` must be
/// writable for `out_cap` bytes. `out_len` must be non-null.
#[no_mangle]
pub unsafe extern "C" fn cobs_decode(
    frame: *const u8,
    len: usize,
    out: *mut u8,
    out_cap: usize,
    out_len: *mut usize,
) -> CobsResult {
    crate::ffi_boundary(CobsResult::Internal, || {
        error::clear_error_state();

        // SAFETY: Null is checked in helper; validity is guaranteed by the caller.
        let Some(out_len) = (unsafe { out_arg(out_len, "out_len") }) else {
            return CobsResult::InvalidArgument;
        };
        // SAFETY: Pointer/length pairing is validated in helper.
        let Some(frame) = (unsafe { bytes_arg(frame, len, "frame") }) else {
            return CobsResult::InvalidArgument;
        };

        let payload = match decode_frame(frame) {
            Ok(payload) => payload,
            Err(err) => return error::map_frame_error(&err),
        };

        *out_len = payload.len();
        if payload.len() > out_cap {
            return error::set_buffer_too_small(payload.len(), out_cap);
        }
        if payload.is_empty() {
            return CobsResult::Ok;
        }
        if out.is_null() {
            return error::set_invalid_argument("out cannot be null when out_cap > 0");
        }

        // SAFETY: `out` is non-null and the caller guarantees `out_cap >= payload.len()` writable bytes.
        let dst = unsafe { std::slice::from_raw_parts_mut(out, payload.len()) };
        dst.copy_from_slice(&payload);
        CobsResult::Ok
    })
}

/// Create a codec that remembers the last validated message.
#[no_mangle]
pub extern "C" fn cobs_codec_new() -> CobsCodecHandle {
    crate::ffi_boundary(std::ptr::null_mut(), || {
        error::clear_error_state();
        let handle = CodecHandle {
            codec: CobsCodec::new(),
        };
        Box::into_raw(Box::new(handle)) as CobsCodecHandle
    })
}

/// Free a codec handle.
///
/// # Safety
/// `codec` must be null or a handle previously returned by `cobs_codec_new`.
#[no_mangle]
pub unsafe extern "C" fn cobs_codec_free(codec: CobsCodecHandle) {
    crate::ffi_boundary((), || {
        if codec.is_null() {
            return;
        }

        // SAFETY: Caller guarantees this handle was allocated by cobs_codec_new.
        unsafe {
            drop(Box::from_raw(codec as *mut CodecHandle));
        }
    });
}

/// Decode a frame into the codec's message store.
///
/// The stored message is replaced only when `COBS_OK` is returned.
///
/// # Safety
/// `codec` must be a valid codec handle. If `len > 0`, `frame` must be readable for `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn cobs_codec_decode(
    codec: CobsCodecHandle,
    frame: *const u8,
    len: usize,
) -> CobsResult {
    crate::ffi_boundary(CobsResult::Internal, || {
        error::clear_error_state();

        // SAFETY: Pointer/length pairing is validated in helper.
        let Some(frame) = (unsafe { bytes_arg(frame, len, "frame") }) else {
            return CobsResult::InvalidArgument;
        };

        with_codec_mut(codec, CobsResult::InvalidArgument, |handle| {
            match handle.codec.try_decode(frame) {
                Ok(_) => CobsResult::Ok,
                Err(err) => error::map_frame_error(&err),
            }
        })
    })
}

/// Borrow the last validated message.
///
/// The pointer stays valid until the next call that decodes into or frees
/// `codec`. An empty message yields a null pointer and zero length.
///
/// # Safety
/// `codec` must be a valid codec handle. `out_data` and `out_len` must be non-null.
#[no_mangle]
pub unsafe extern "C" fn cobs_codec_message(
    codec: CobsCodecHandle,
    out_data: *mut *const u8,
    out_len: *mut usize,
) -> CobsResult {
    crate::ffi_boundary(CobsResult::Internal, || {
        error::clear_error_state();

        // SAFETY: Null is checked in helper; validity is guaranteed by the caller.
        let Some(out_data) = (unsafe { out_arg(out_data, "out_data") }) else {
            return CobsResult::InvalidArgument;
        };
        // SAFETY: Null is checked in helper; validity is guaranteed by the caller.
        let Some(out_len) = (unsafe { out_arg(out_len, "out_len") }) else {
            return CobsResult::InvalidArgument;
        };

        with_codec_mut(codec, CobsResult::InvalidArgument, |handle| {
            let message = handle.codec.validated_message();
            *out_data = if message.is_empty() {
                std::ptr::null()
            } else {
                message.as_ptr()
            };
            *out_len = message.len();
            CobsResult::Ok
        })
    })
}

#[cfg(test)]
mod tests {
    use std::ffi::CStr;

    use super::*;

    fn last_error() -> String {
        // SAFETY: cobs_last_error returns a pointer to a thread-local CString.
        unsafe { CStr::from_ptr(crate::cobs_last_error()) }
            .to_string_lossy()
            .into_owned()
    }

    fn encode_via_ffi(payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; cobs_max_encoded_len(payload.len())];
        let mut out_len = 0usize;
        // SAFETY: Buffers are valid for the lengths passed.
        let rc = unsafe {
            cobs_encode(
                payload.as_ptr(),
                payload.len(),
                out.as_mut_ptr(),
                out.len(),
                &mut out_len,
            )
        };
        assert_eq!(rc, CobsResult::Ok);
        out.truncate(out_len);
        out
    }

    #[test]
    fn encode_matches_worked_example() {
        assert_eq!(
            encode_via_ffi(&[0x01, 0x02, 0x03]),
            vec![0x04, 0x01, 0x02, 0x03, 0x01, 0x00]
        );
    }

    #[test]
    fn encode_reports_required_size() {
        let payload = [0x11u8; 16];
        let mut out = [0u8; 4];
        let mut out_len = 0usize;
        // SAFETY: Buffers are valid for the lengths passed.
        let rc = unsafe {
            cobs_encode(
                payload.as_ptr(),
                payload.len(),
                out.as_mut_ptr(),
                out.len(),
                &mut out_len,
            )
        };

        assert_eq!(rc, CobsResult::BufferTooSmall);
        assert_eq!(out_len, 19);
        assert_eq!(out, [0u8; 4]);
        assert!(last_error().contains("too small"));
    }

    #[test]
    fn encode_rejects_null_out_len() {
        // SAFETY: Null pointers are part of the contract under test.
        let rc = unsafe {
            cobs_encode(
                std::ptr::null(),
                0,
                std::ptr::null_mut(),
                0,
                std::ptr::null_mut(),
            )
        };
        assert_eq!(rc, CobsResult::InvalidArgument);
        assert!(last_error().contains("out_len"));
    }

    #[test]
    fn stateless_decode_roundtrip() {
        let frame = encode_via_ffi(b"stateless");
        let mut out = [0u8; 32];
        let mut out_len = 0usize;
        // SAFETY: Buffers are valid for the lengths passed.
        let rc = unsafe {
            cobs_decode(
                frame.as_ptr(),
                frame.len(),
                out.as_mut_ptr(),
                out.len(),
                &mut out_len,
            )
        };

        assert_eq!(rc, CobsResult::Ok);
        assert_eq!(&out[..out_len], b"stateless");
    }

    #[test]
    fn stateless_decode_maps_errors() {
        let mut out_len = 0usize;
        // SAFETY: Empty input with null pointers is allowed.
        let rc = unsafe {
            cobs_decode(std::ptr::null(), 0, std::ptr::null_mut(), 0, &mut out_len)
        };
        assert_eq!(rc, CobsResult::EmptyFrame);

        let corrupted = [0x04u8, 0x01, 0x06, 0x03, 0x01, 0x00];
        // SAFETY: Buffers are valid for the lengths passed.
        let rc = unsafe {
            cobs_decode(
                corrupted.as_ptr(),
                corrupted.len(),
                std::ptr::null_mut(),
                0,
                &mut out_len,
            )
        };
        assert_eq!(rc, CobsResult::ChecksumMismatch);
        assert!(last_error().contains("checksum mismatch"));
    }

    #[test]
    fn codec_handle_keeps_last_valid_message() {
        let codec = cobs_codec_new();
        assert!(!codec.is_null());

        let good = encode_via_ffi(b"telemetry");
        let mut bad = encode_via_ffi(b"garbled");
        bad[2] ^= 0x40;

        // SAFETY: The handle is live and buffers are valid for the lengths passed.
        unsafe {
            assert_eq!(cobs_codec_decode(codec, good.as_ptr(), good.len()), CobsResult::Ok);
            assert_eq!(
                cobs_codec_decode(codec, bad.as_ptr(), bad.len()),
                CobsResult::ChecksumMismatch
            );

            let mut data: *const u8 = std::ptr::null();
            let mut len = 0usize;
            assert_eq!(cobs_codec_message(codec, &mut data, &mut len), CobsResult::Ok);
            assert_eq!(std::slice::from_raw_parts(data, len), b"telemetry");

            cobs_codec_free(codec);
        }
    }

    #[test]
    fn codec_message_is_null_before_first_decode() {
        let codec = cobs_codec_new();
        let mut data: *const u8 = std::ptr::NonNull::<u8>::dangling().as_ptr();
        let mut len = 7usize;

        // SAFETY: The handle is live and out pointers are valid.
        unsafe {
            assert_eq!(cobs_codec_message(codec, &mut data, &mut len), CobsResult::Ok);
            cobs_codec_free(codec);
        }
        assert!(data.is_null());
        assert_eq!(len, 0);
    }

    #[test]
    fn null_codec_handle_is_rejected() {
        // SAFETY: Null handle is part of the contract under test.
        let rc = unsafe { cobs_codec_decode(std::ptr::null_mut(), std::ptr::null(), 0) };
        assert_eq!(rc, CobsResult::InvalidArgument);
        assert!(last_error().contains("codec handle"));
    }

    #[test]
    fn checksum_export() {
        let data = [0x01u8, 0x02, 0x03, 0x08];
        // SAFETY: Buffer is valid for its length.
        assert_eq!(unsafe { cobs_checksum(data.as_ptr(), data.len()) }, 0x08);
        // SAFETY: Empty input with a null pointer is allowed.
        assert_eq!(unsafe { cobs_checksum(std::ptr::null(), 0) }, 0);
    }
}
