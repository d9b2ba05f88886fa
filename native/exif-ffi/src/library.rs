// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Interface to the metadata library that does the actual parsing.
//!
//! The entry points only need a handful of capabilities from a metadata
//! backend: open a file, read its metadata, look up and render tags, and
//! enumerate or extract embedded previews. Anything implementing these traits
//! can back the C API; the production backend lives in [`crate::file`].

use crate::error::Result;
use crate::key::ExifKey;
use std::path::Path;

/// Opens images.
pub trait MetadataLibrary {
    type Image: ImageHandle;

    /// Opens the image at `path`.
    ///
    /// Fails when the file is missing, unreadable or not a recognized image.
    fn open(&self, path: &Path) -> Result<Self::Image>;
}

/// One opened image file.
pub trait ImageHandle {
    /// MIME type of the container, e.g. `image/jpeg`.
    fn mime_type(&self) -> &str;

    fn pixel_width(&self) -> u32;

    fn pixel_height(&self) -> u32;

    /// Reads the metadata blocks of the file.
    ///
    /// Until this is called, [`ImageHandle::exif_data`] is empty and no
    /// previews are reported.
    fn read_metadata(&mut self) -> Result<()>;

    fn exif_data(&self) -> &dyn ExifData;

    /// Embedded previews in library order.
    fn preview_properties(&self) -> Result<Vec<PreviewProperties>>;

    /// Raw bytes of the preview described by `properties`.
    fn preview_image(&self, properties: &PreviewProperties) -> Result<Vec<u8>>;
}

/// Key-addressable EXIF tag collection of one image.
///
/// Lookups never fail: an absent tag is reported as `None`.
pub trait ExifData {
    fn is_empty(&self) -> bool;

    fn contains(&self, key: &ExifKey) -> bool;

    /// Human-readable rendering of the tag, using other tags of the
    /// collection as context where the value needs it (units, references).
    fn print(&self, key: &ExifKey) -> Option<String>;

    /// The stored value as plain text without interpretation, e.g. `"6"`
    /// for an orientation of 6.
    fn value_string(&self, key: &ExifKey) -> Option<String>;
}

/// Describes one embedded preview image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewProperties {
    /// Backend-specific identifier used to extract the preview.
    pub id: usize,
    pub mime_type: &'static str,
    pub extension: &'static str,
    /// Size of the preview data in bytes.
    pub size: u32,
    pub width: u32,
    pub height: u32,
}

/// Picks the preview with the greatest height.
///
/// Iterates in library order with a `>=` comparison, so among previews of
/// equal maximum height the last one wins.
pub fn select_largest_preview(previews: &[PreviewProperties]) -> Option<usize> {
    if previews.is_empty() {
        return None;
    }

    let mut target = 0;
    for (i, preview) in previews.iter().enumerate() {
        if preview.height >= previews[target].height {
            target = i;
        }
    }
    Some(target)
}
