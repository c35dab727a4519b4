use crate::error;

/// Convert an optional byte pointer + length into a slice.
///
/// # Safety
/// If `len > 0`, `data` must be non-null and readable for `len` bytes.
pub(crate) unsafe fn bytes_arg<'a>(data: *const u8, len: usize, name: &str) -> Option<&'a [u8]> {
    if len == 0 {
        return Some(&[]);
    }
    if data.is_null() {
        let _ = error::set_invalid_argument(format!("{name} cannot be null when len > 0"));
        return None;
    }

    // SAFETY: Pointer and length are validated above and owned by caller for the call duration.
    Some(unsafe { std::slice::from_raw_parts(data, len) })
}

/// Convert an output pointer into a mutable reference.
///
/// # Safety
/// `value` must be null or valid for writes of `T`.
pub(crate) unsafe fn out_arg<'a, T>(value: *mut T, name: &str) -> Option<&'a mut T> {
    if value.is_null() {
        let _ = error::set_invalid_argument(format!("{name} cannot be null"));
        return None;
    }

    // SAFETY: Non-null is checked above; validity is guaranteed by the caller.
    Some(unsafe { &mut *value })
}
