// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! exif-ffi - C API for image metadata queries.
//!
//! This crate exposes a small C-compatible API that summarizes EXIF tags as
//! XML, reports the stored orientation and extracts embedded previews,
//! designed for FFI bindings to languages like C#.
//!
//! Parsing is delegated to `kamadak-exif` and `image` behind the traits in
//! [`library`]; the same queries are available to Rust callers through
//! [`metadata`].

mod conversions;
pub mod easy_access;
mod error;
mod exports;
mod file;
pub mod key;
pub mod library;
pub mod metadata;
mod types;
pub mod xml;

#[cfg(test)]
mod test_support;

pub use error::*;
pub use exports::*;
pub use file::{ExifTags, FileImage, FileLibrary};
pub use key::ExifKey;
pub use library::{ExifData, ImageHandle, MetadataLibrary, PreviewProperties};
pub use metadata::{largest_preview, read_exif_xml, read_orientation, read_thumbnail};
pub use types::*;

/// Returns the library version as a packed integer.
/// Format: (major << 24) | (minor << 16) | (patch << 8)
#[unsafe(no_mangle)]
pub extern "C" fn exif_version() -> u32 {
    let major: u32 = env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0);
    let minor: u32 = env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0);
    let patch: u32 = env!("CARGO_PKG_VERSION_PATCH").parse().unwrap_or(0);
    (major << 24) | (minor << 16) | (patch << 8)
}
