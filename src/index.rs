use crate::error::{ImportError, ImportResult};

/// Turns a face record index into a position inside a buffer of `len` elements.
///
/// Positive indices count from 1, negative ones count back from the end of the buffer (`-1` is
/// the last element). `0` and anything outside the buffer is rejected.
pub fn resolve(index: i64, len: usize) -> ImportResult<usize> {
    let resolved = if index < 0 {
        len as i64 + index
    } else {
        index - 1
    };

    if resolved < 0 || resolved as usize >= len {
        return Err(ImportError::IndexOutOfRange { index, len });
    }
    Ok(resolved as usize)
}
