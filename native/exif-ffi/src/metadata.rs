// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Rust API behind the exported functions.
//!
//! Every query opens the image, reads its metadata and extracts one piece of
//! information. The handle is dropped when the query returns.

use crate::error::Result;
use crate::key::ExifKey;
use crate::library::{
    ExifData, ImageHandle, MetadataLibrary, PreviewProperties, select_largest_preview,
};
use crate::xml::format_xml;
use std::path::Path;

const ORIENTATION_KEY: &str = "Exif.Image.Orientation";

/// Builds the XML summary of the image at `path`.
pub fn read_exif_xml<L: MetadataLibrary>(library: &L, path: &Path) -> Result<String> {
    let mut image = library.open(path)?;
    image.read_metadata()?;
    Ok(format_xml(&image, image.exif_data()))
}

/// Reads the stored orientation code.
///
/// Returns `None` when the image has no EXIF data, no orientation tag, or a
/// stored value that does not start with an integer.
pub fn read_orientation<L: MetadataLibrary>(library: &L, path: &Path) -> Result<Option<i32>> {
    let mut image = library.open(path)?;
    image.read_metadata()?;

    let data = image.exif_data();
    if data.is_empty() {
        return Ok(None);
    }

    let key: ExifKey = ORIENTATION_KEY.parse()?;
    let Some(text) = data.value_string(&key) else {
        return Ok(None);
    };

    let orientation = parse_leading_int(&text);
    if orientation.is_none() {
        log::warn!(
            "Ignoring non-numeric orientation {:?} in {}",
            text,
            path.display()
        );
    }
    Ok(orientation)
}

/// Parses an optionally signed decimal integer at the start of `text`,
/// ignoring leading whitespace and anything after the digits.
fn parse_leading_int(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len() - sign_len);
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

/// The selected preview of an opened image.
pub struct Preview<I> {
    image: I,
    properties: PreviewProperties,
}

impl<I: ImageHandle> Preview<I> {
    pub fn properties(&self) -> &PreviewProperties {
        &self.properties
    }

    /// Declared size of the preview data in bytes.
    pub fn size(&self) -> u32 {
        self.properties.size
    }

    /// Extracts the preview data from the image.
    pub fn data(&self) -> Result<Vec<u8>> {
        self.image.preview_image(&self.properties)
    }
}

/// Opens the image at `path` and selects its tallest embedded preview.
///
/// Returns `None` when the image has no previews.
pub fn largest_preview<L: MetadataLibrary>(
    library: &L,
    path: &Path,
) -> Result<Option<Preview<L::Image>>> {
    let mut image = library.open(path)?;
    image.read_metadata()?;

    let mut previews = image.preview_properties()?;
    let Some(index) = select_largest_preview(&previews) else {
        log::debug!("No previews in {}", path.display());
        return Ok(None);
    };

    let properties = previews.swap_remove(index);
    log::debug!(
        "Selected preview {} ({}x{}, {} bytes) of {}",
        properties.id,
        properties.width,
        properties.height,
        properties.size,
        path.display()
    );
    Ok(Some(Preview { image, properties }))
}

/// Extracts the tallest embedded preview of the image at `path`.
pub fn read_thumbnail<L: MetadataLibrary>(library: &L, path: &Path) -> Result<Option<Vec<u8>>> {
    largest_preview(library, path)?
        .map(|preview| preview.data())
        .transpose()
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
