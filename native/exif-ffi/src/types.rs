// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Return codes of the C API.

/// Returned by every entry point when the file cannot be opened, and by
/// `GetExif`/`GetThumbnail` on any other failure.
pub const OPEN_FAILED: i32 = -1;

/// Returned by `GetOrientation` when no orientation is stored.
///
/// Indistinguishable from a stored orientation of 1 (normal); use
/// [`crate::read_orientation`] from Rust to tell the two apart.
pub const ORIENTATION_UNKNOWN: i32 = 1;
