// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Conversions between C API arguments and Rust values.

use crate::error::{Error, Result};
use std::ffi::c_char;
use std::path::PathBuf;
use std::slice;

// ============================================================================
// Paths
// ============================================================================

/// Reads a null-terminated UTF-16 path.
///
/// Returns `None` for a null pointer, or on non-Windows targets for text
/// that is not valid UTF-16.
///
/// # Safety
/// If `ptr` is not null, it must point to a readable null-terminated
/// sequence of `u16`.
pub(crate) unsafe fn path_from_wide(ptr: *const u16) -> Option<PathBuf> {
    if ptr.is_null() {
        return None;
    }

    let mut len = 0;
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    let units = unsafe { slice::from_raw_parts(ptr, len) };

    #[cfg(windows)]
    {
        use std::os::windows::ffi::OsStringExt;
        Some(PathBuf::from(std::ffi::OsString::from_wide(units)))
    }

    #[cfg(not(windows))]
    {
        String::from_utf16(units).ok().map(PathBuf::from)
    }
}

// ============================================================================
// Output Buffers
// ============================================================================

/// Converts an output length to the C API return type.
pub(crate) fn length_to_i32(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| Error::TooLarge(len))
}

/// Copies `bytes` and a null terminator into `buffer`.
///
/// # Safety
/// `buffer` must be valid for writes of `bytes.len() + 1` bytes.
pub(crate) unsafe fn write_c_string(bytes: &[u8], buffer: *mut c_char) {
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), buffer as *mut u8, bytes.len());
        *buffer.add(bytes.len()) = 0;
    }
}

/// Copies `bytes` into `buffer`.
///
/// # Safety
/// `buffer` must be valid for writes of `bytes.len()` bytes.
pub(crate) unsafe fn write_bytes(bytes: &[u8], buffer: *mut u8) {
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), buffer, bytes.len());
    }
}
