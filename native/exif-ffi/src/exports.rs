// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Exported entry points of the C API.
//!
//! Paths are null-terminated UTF-16 strings. Functions writing into a caller
//! buffer return the required length, so callers can query the size with a
//! null buffer first, then allocate and call again.

#![allow(non_snake_case)]

use crate::conversions::{length_to_i32, path_from_wide, write_bytes, write_c_string};
use crate::error::{Error, Result, clear_last_error, set_last_error};
use crate::file::FileLibrary;
use crate::metadata::{largest_preview, read_exif_xml, read_orientation};
use crate::types::{OPEN_FAILED, ORIENTATION_UNKNOWN};
use std::ffi::c_char;
use std::panic::{AssertUnwindSafe, catch_unwind};

// ============================================================================
// Panic Safety
// ============================================================================

/// Runs an entry point body, converting errors and panics into `$fallback`.
///
/// The error message is kept as the thread's last error.
macro_rules! ffi_guard {
    ($name:literal, $fallback:expr, $body:block) => {{
        clear_last_error();
        match catch_unwind(AssertUnwindSafe(|| -> Result<i32> { $body })) {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => {
                log::debug!("{} failed: {}", $name, e);
                set_last_error(e.to_string());
                $fallback
            }
            Err(_) => {
                log::warn!("A panic occurred in {}", $name);
                set_last_error(Error::Panic($name).to_string());
                $fallback
            }
        }
    }};
}

// ============================================================================
// EXIF Summary
// ============================================================================

/// Builds the XML summary of the image's EXIF tags.
///
/// # Arguments
/// * `file` - Null-terminated UTF-16 path of the image.
/// * `buffer` - Output buffer for the null-terminated UTF-8 document, or null
///   to query the length.
///
/// # Returns
/// The document length in bytes (excluding null terminator), or -1 if the
/// file cannot be opened or read.
///
/// # Safety
/// - `file` must be a valid null-terminated UTF-16 string.
/// - If `buffer` is not null, it must be valid for writes of the returned
///   length plus one bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetExif(file: *const u16, buffer: *mut c_char) -> i32 {
    ffi_guard!("GetExif", OPEN_FAILED, {
        let path = unsafe { path_from_wide(file) }.ok_or(Error::InvalidPath)?;
        let xml = read_exif_xml(&FileLibrary, &path)?;
        let len = length_to_i32(xml.len())?;

        if !buffer.is_null() {
            unsafe { write_c_string(xml.as_bytes(), buffer) };
        }

        Ok(len)
    })
}

/// Builds the XML summary of the image's EXIF tags into a bounded buffer.
///
/// If `buffer` is null or smaller than the document plus its null
/// terminator, nothing is written and the required length is returned.
///
/// # Returns
/// The document length in bytes (excluding null terminator), or -1 if the
/// file cannot be opened or read.
///
/// # Safety
/// - `file` must be a valid null-terminated UTF-16 string.
/// - If `buffer` is not null, it must be valid for writes of `buffer_size` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetExifEx(file: *const u16, buffer: *mut c_char, buffer_size: usize) -> i32 {
    ffi_guard!("GetExifEx", OPEN_FAILED, {
        let path = unsafe { path_from_wide(file) }.ok_or(Error::InvalidPath)?;
        let xml = read_exif_xml(&FileLibrary, &path)?;
        let len = length_to_i32(xml.len())?;

        if !buffer.is_null() && buffer_size > xml.len() {
            unsafe { write_c_string(xml.as_bytes(), buffer) };
        }

        Ok(len)
    })
}

// ============================================================================
// Orientation
// ============================================================================

/// Gets the EXIF orientation code of the image.
///
/// # Returns
/// The stored orientation (1-8 for well-formed files), 1 if the image has no
/// orientation or it cannot be read, or -1 if the file cannot be opened.
///
/// # Safety
/// `file` must be a valid null-terminated UTF-16 string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetOrientation(file: *const u16) -> i32 {
    ffi_guard!("GetOrientation", ORIENTATION_UNKNOWN, {
        let orientation = unsafe { path_from_wide(file) }
            .ok_or(Error::InvalidPath)
            .and_then(|path| read_orientation(&FileLibrary, &path));

        match orientation {
            Ok(orientation) => Ok(orientation.unwrap_or(ORIENTATION_UNKNOWN)),
            Err(e) if e.is_open_failure() => {
                set_last_error(e.to_string());
                Ok(OPEN_FAILED)
            }
            Err(e) => Err(e),
        }
    })
}

// ============================================================================
// Thumbnail
// ============================================================================

/// Extracts the tallest embedded preview image.
///
/// # Arguments
/// * `file` - Null-terminated UTF-16 path of the image.
/// * `buffer` - Output buffer for the preview data, or null to query the size.
///
/// # Returns
/// The preview size in bytes, or -1 if the file cannot be opened or has no
/// preview.
///
/// # Safety
/// - `file` must be a valid null-terminated UTF-16 string.
/// - If `buffer` is not null, it must be valid for writes of the returned
///   size in bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetThumbnail(file: *const u16, buffer: *mut u8) -> i32 {
    ffi_guard!("GetThumbnail", OPEN_FAILED, {
        let path = unsafe { path_from_wide(file) }.ok_or(Error::InvalidPath)?;
        let preview = largest_preview(&FileLibrary, &path)?.ok_or_else(|| Error::NoPreview {
            path: path.display().to_string(),
        })?;
        let size = preview.size() as usize;
        let len = length_to_i32(size)?;

        if buffer.is_null() {
            return Ok(len);
        }

        let data = preview.data()?;
        let bytes = data.get(..size).ok_or(Error::PreviewTruncated {
            expected: size,
            actual: data.len(),
        })?;
        unsafe { write_bytes(bytes, buffer) };

        Ok(len)
    })
}

/// Extracts the tallest embedded preview image into a bounded buffer.
///
/// If `buffer` is null or smaller than the preview, nothing is written and
/// the required size is returned.
///
/// # Returns
/// The preview size in bytes, or -1 if the file cannot be opened or has no
/// preview.
///
/// # Safety
/// - `file` must be a valid null-terminated UTF-16 string.
/// - If `buffer` is not null, it must be valid for writes of `buffer_size` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn GetThumbnailEx(file: *const u16, buffer: *mut u8, buffer_size: usize) -> i32 {
    ffi_guard!("GetThumbnailEx", OPEN_FAILED, {
        let path = unsafe { path_from_wide(file) }.ok_or(Error::InvalidPath)?;
        let preview = largest_preview(&FileLibrary, &path)?.ok_or_else(|| Error::NoPreview {
            path: path.display().to_string(),
        })?;
        let size = preview.size() as usize;
        let len = length_to_i32(size)?;

        if buffer.is_null() || buffer_size < size {
            return Ok(len);
        }

        let data = preview.data()?;
        let bytes = data.get(..size).ok_or(Error::PreviewTruncated {
            expected: size,
            actual: data.len(),
        })?;
        unsafe { write_bytes(bytes, buffer) };

        Ok(len)
    })
}

#[cfg(test)]
#[path = "exports_tests.rs"]
mod tests;
