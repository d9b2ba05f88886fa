// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Shared test fixtures: an in-memory metadata backend and real JPEG files
//! with embedded EXIF data.

use crate::error::{Error, Result};
use crate::key::ExifKey;
use crate::library::{ExifData, ImageHandle, MetadataLibrary, PreviewProperties};
use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::{ImageFormat, Rgb, RgbImage};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};

// ============================================================================
// In-memory backend
// ============================================================================

/// Tag collection holding pre-rendered values.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeTags {
    entries: Vec<(String, String, String)>,
}

static NO_TAGS: FakeTags = FakeTags {
    entries: Vec::new(),
};

impl FakeTags {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds a tag whose rendered and stored text are both `value`.
    pub(crate) fn with(self, key: &str, value: &str) -> Self {
        self.with_raw(key, value, value)
    }

    pub(crate) fn with_raw(mut self, key: &str, printed: &str, raw: &str) -> Self {
        self.entries
            .push((key.to_string(), printed.to_string(), raw.to_string()));
        self
    }

    fn find(&self, key: &ExifKey) -> Option<&(String, String, String)> {
        let key = key.to_string();
        self.entries.iter().find(|(k, _, _)| *k == key)
    }
}

impl ExifData for FakeTags {
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn contains(&self, key: &ExifKey) -> bool {
        self.find(key).is_some()
    }

    fn print(&self, key: &ExifKey) -> Option<String> {
        self.find(key).map(|(_, printed, _)| printed.clone())
    }

    fn value_string(&self, key: &ExifKey) -> Option<String> {
        self.find(key).map(|(_, _, raw)| raw.clone())
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FakeImage {
    pub(crate) mime_type: &'static str,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) tags: FakeTags,
    pub(crate) previews: Vec<(PreviewProperties, Vec<u8>)>,
    pub(crate) metadata_read: bool,
}

impl FakeImage {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            mime_type: "image/jpeg",
            width,
            height,
            tags: FakeTags::new(),
            previews: Vec::new(),
            metadata_read: false,
        }
    }

    pub(crate) fn with_tags(mut self, tags: FakeTags) -> Self {
        self.tags = tags;
        self
    }

    /// Adds a preview of the given height whose data is `size` copies of `fill`.
    pub(crate) fn with_preview(mut self, height: u32, size: u32, fill: u8) -> Self {
        let properties = PreviewProperties {
            id: self.previews.len(),
            mime_type: "image/jpeg",
            extension: ".jpg",
            size,
            width: height * 4 / 3,
            height,
        };
        self.previews.push((properties, vec![fill; size as usize]));
        self
    }
}

impl ImageHandle for FakeImage {
    fn mime_type(&self) -> &str {
        self.mime_type
    }

    fn pixel_width(&self) -> u32 {
        self.width
    }

    fn pixel_height(&self) -> u32 {
        self.height
    }

    fn read_metadata(&mut self) -> Result<()> {
        self.metadata_read = true;
        Ok(())
    }

    fn exif_data(&self) -> &dyn ExifData {
        if self.metadata_read { &self.tags } else { &NO_TAGS }
    }

    fn preview_properties(&self) -> Result<Vec<PreviewProperties>> {
        if !self.metadata_read {
            return Ok(Vec::new());
        }
        Ok(self.previews.iter().map(|(p, _)| p.clone()).collect())
    }

    fn preview_image(&self, properties: &PreviewProperties) -> Result<Vec<u8>> {
        self.previews
            .get(properties.id)
            .map(|(_, data)| data.clone())
            .ok_or(Error::PreviewNotFound { id: properties.id })
    }
}

/// Serves [`FakeImage`]s by path; any other path fails to open.
#[derive(Debug, Default)]
pub(crate) struct FakeLibrary {
    images: HashMap<PathBuf, FakeImage>,
}

impl FakeLibrary {
    pub(crate) fn with_image(mut self, path: &str, image: FakeImage) -> Self {
        self.images.insert(PathBuf::from(path), image);
        self
    }
}

impl MetadataLibrary for FakeLibrary {
    type Image = FakeImage;

    fn open(&self, path: &Path) -> Result<FakeImage> {
        self.images.get(path).cloned().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }
}

// ============================================================================
// JPEG files
// ============================================================================

/// Encodes a flat-colored JPEG.
pub(crate) fn encode_jpeg(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg)
        .expect("JPEG encoding failed");
    out.into_inner()
}

pub(crate) fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

pub(crate) fn short(tag: Tag, value: u16) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![value]),
    }
}

pub(crate) fn rational(tag: Tag, num: u32, denom: u32) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![(num, denom).into()]),
    }
}

pub(crate) fn srational(tag: Tag, num: i32, denom: i32) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::SRational(vec![(num, denom).into()]),
    }
}

/// Builds a JPEG file carrying an EXIF block with the given fields and an
/// optional IFD1 thumbnail.
pub(crate) struct JpegFixture {
    width: u32,
    height: u32,
    fields: Vec<Field>,
    thumbnail: Option<Vec<u8>>,
}

impl JpegFixture {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fields: Vec::new(),
            thumbnail: None,
        }
    }

    pub(crate) fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub(crate) fn thumbnail(mut self, jpeg: Vec<u8>) -> Self {
        self.thumbnail = Some(jpeg);
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let jpeg = encode_jpeg(self.width, self.height, [180, 120, 60]);
        if self.fields.is_empty() && self.thumbnail.is_none() {
            return jpeg;
        }

        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }
        if let Some(thumbnail) = &self.thumbnail {
            writer.set_jpeg(thumbnail, In::THUMBNAIL);
        }
        let mut tiff = Cursor::new(Vec::new());
        writer
            .write(&mut tiff, false)
            .expect("EXIF serialization failed");
        let tiff = tiff.into_inner();

        // SOI, APP1 "Exif\0\0" + TIFF, then the rest of the encoded stream
        let segment_len = u16::try_from(2 + 6 + tiff.len()).expect("EXIF block too large");
        let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
        out.extend_from_slice(&jpeg[..2]);
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&tiff);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    /// Writes the file into `dir` and returns its path.
    pub(crate) fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).expect("failed to write fixture");
        path
    }
}
