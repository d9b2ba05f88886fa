// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Metadata backend for image files on disk.
//!
//! Container detection and pixel dimensions come from the `image` crate,
//! EXIF parsing and tag rendering from `kamadak-exif`.

use crate::error::{Error, Result};
use crate::key::ExifKey;
use crate::library::{ExifData, ImageHandle, MetadataLibrary, PreviewProperties};
use exif::{Context, Exif, Field, In, Tag, Value};
use image::{ImageFormat, ImageReader};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Opens image files from the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLibrary;

impl MetadataLibrary for FileLibrary {
    type Image = FileImage;

    fn open(&self, path: &Path) -> Result<FileImage> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let Some(format) = reader.format() else {
            return Err(Error::UnknownFormat {
                path: path.display().to_string(),
            });
        };

        let (width, height) = reader.into_dimensions().unwrap_or_else(|e| {
            log::debug!("No pixel dimensions for {}: {}", path.display(), e);
            (0, 0)
        });
        log::debug!(
            "Opened {} as {} ({}x{})",
            path.display(),
            format.to_mime_type(),
            width,
            height
        );

        Ok(FileImage {
            path: path.to_path_buf(),
            format,
            width,
            height,
            tags: ExifTags::default(),
        })
    }
}

/// An opened image file.
#[derive(Debug)]
pub struct FileImage {
    path: PathBuf,
    format: ImageFormat,
    width: u32,
    height: u32,
    tags: ExifTags,
}

/// Containers `kamadak-exif` can pull an EXIF block out of.
fn carries_exif(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Tiff | ImageFormat::Png | ImageFormat::WebP
    )
}

impl ImageHandle for FileImage {
    fn mime_type(&self) -> &str {
        self.format.to_mime_type()
    }

    fn pixel_width(&self) -> u32 {
        self.width
    }

    fn pixel_height(&self) -> u32 {
        self.height
    }

    fn read_metadata(&mut self) -> Result<()> {
        if !carries_exif(self.format) {
            self.tags = ExifTags::default();
            return Ok(());
        }

        let mut reader = BufReader::new(File::open(&self.path)?);
        self.tags = match exif::Reader::new().read_from_container(&mut reader) {
            Ok(exif) => ExifTags(Some(exif)),
            Err(exif::Error::NotFound(_)) => {
                log::debug!("No EXIF data in {}", self.path.display());
                ExifTags(None)
            }
            Err(e) => return Err(e.into()),
        };
        Ok(())
    }

    fn exif_data(&self) -> &dyn ExifData {
        &self.tags
    }

    fn preview_properties(&self) -> Result<Vec<PreviewProperties>> {
        let Some(exif) = &self.tags.0 else {
            return Ok(Vec::new());
        };

        let mut previews = Vec::new();
        for ifd in preview_ifds(exif) {
            let Some(data) = jpeg_preview_data(exif, ifd) else {
                continue;
            };
            let (width, height) = match ifd_dimensions(exif, ifd) {
                Some(dimensions) => dimensions,
                None => probe_dimensions(data),
            };
            previews.push(PreviewProperties {
                id: ifd.index() as usize,
                mime_type: "image/jpeg",
                extension: ".jpg",
                size: u32::try_from(data.len()).map_err(|_| Error::TooLarge(data.len()))?,
                width,
                height,
            });
        }
        Ok(previews)
    }

    fn preview_image(&self, properties: &PreviewProperties) -> Result<Vec<u8>> {
        let id = properties.id;
        let exif = self.tags.0.as_ref().ok_or(Error::PreviewNotFound { id })?;
        let ifd = u16::try_from(id)
            .map(In)
            .map_err(|_| Error::PreviewNotFound { id })?;
        jpeg_preview_data(exif, ifd)
            .map(<[u8]>::to_vec)
            .ok_or(Error::PreviewNotFound { id })
    }
}

// ============================================================================
// Previews
// ============================================================================

/// IFDs after the primary one, in file order.
fn preview_ifds(exif: &Exif) -> Vec<In> {
    let mut ifds: Vec<In> = exif
        .fields()
        .map(|f| f.ifd_num)
        .filter(|ifd| *ifd != In::PRIMARY)
        .collect();
    ifds.sort_by_key(|ifd| ifd.index());
    ifds.dedup();
    ifds
}

/// JPEG stream referenced by `JPEGInterchangeFormat` in `ifd`.
fn jpeg_preview_data(exif: &Exif, ifd: In) -> Option<&[u8]> {
    let offset = exif
        .get_field(Tag::JPEGInterchangeFormat, ifd)?
        .value
        .get_uint(0)? as usize;
    let length = exif
        .get_field(Tag::JPEGInterchangeFormatLength, ifd)?
        .value
        .get_uint(0)? as usize;
    if length == 0 {
        return None;
    }
    exif.buf().get(offset..offset.checked_add(length)?)
}

fn ifd_dimensions(exif: &Exif, ifd: In) -> Option<(u32, u32)> {
    let width = exif.get_field(Tag::ImageWidth, ifd)?.value.get_uint(0)?;
    let height = exif.get_field(Tag::ImageLength, ifd)?.value.get_uint(0)?;
    Some((width, height))
}

/// Reads the dimensions from the preview stream itself.
fn probe_dimensions(data: &[u8]) -> (u32, u32) {
    ImageReader::with_format(Cursor::new(data), ImageFormat::Jpeg)
        .into_dimensions()
        .unwrap_or_else(|e| {
            log::debug!("Failed to probe preview dimensions: {}", e);
            (0, 0)
        })
}

// ============================================================================
// Tags
// ============================================================================

/// EXIF tags of one file; `None` when the file has no EXIF block.
#[derive(Default)]
pub struct ExifTags(Option<Exif>);

impl fmt::Debug for ExifTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExifTags")
            .field("fields", &self.0.as_ref().map_or(0, |exif| exif.fields().len()))
            .finish()
    }
}

/// Where fields of a key group are stored.
fn group_location(group: &str) -> Option<(In, Context)> {
    match group {
        "Image" => Some((In::PRIMARY, Context::Tiff)),
        "Photo" => Some((In::PRIMARY, Context::Exif)),
        "GPSInfo" => Some((In::PRIMARY, Context::Gps)),
        "Iop" => Some((In::PRIMARY, Context::Interop)),
        "Thumbnail" => Some((In::THUMBNAIL, Context::Tiff)),
        _ => None,
    }
}

/// Tag name as used in keys.
fn tag_name(tag: Tag) -> String {
    match tag {
        Tag::PhotographicSensitivity => "ISOSpeedRatings".to_string(),
        _ => tag.to_string(),
    }
}

fn join<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn ascii_text(lines: &[Vec<u8>]) -> String {
    lines
        .iter()
        .map(|line| {
            let end = line.iter().position(|&b| b == 0).unwrap_or(line.len());
            String::from_utf8_lossy(&line[..end]).trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl ExifTags {
    fn find(&self, key: &ExifKey) -> Option<(&Exif, &Field)> {
        let exif = self.0.as_ref()?;
        let (ifd, context) = group_location(key.group())?;
        let number = key.tag_number();

        exif.fields()
            .find(|f| {
                f.ifd_num == ifd
                    && f.tag.context() == context
                    && match number {
                        Some(number) => f.tag.number() == number,
                        None => tag_name(f.tag) == key.tag_name(),
                    }
            })
            .map(|f| (exif, f))
    }
}

impl ExifData for ExifTags {
    fn is_empty(&self) -> bool {
        self.0.as_ref().is_none_or(|exif| exif.fields().len() == 0)
    }

    fn contains(&self, key: &ExifKey) -> bool {
        self.find(key).is_some()
    }

    fn print(&self, key: &ExifKey) -> Option<String> {
        let (exif, field) = self.find(key)?;
        Some(match &field.value {
            Value::Ascii(lines) => ascii_text(lines),
            _ => field.display_value().with_unit(exif).to_string(),
        })
    }

    fn value_string(&self, key: &ExifKey) -> Option<String> {
        let (_, field) = self.find(key)?;
        Some(match &field.value {
            Value::Byte(v) => join(v),
            Value::Short(v) => join(v),
            Value::Long(v) => join(v),
            Value::SByte(v) => join(v),
            Value::SShort(v) => join(v),
            Value::SLong(v) => join(v),
            Value::Float(v) => join(v),
            Value::Double(v) => join(v),
            Value::Ascii(lines) => ascii_text(lines),
            Value::Rational(v) => join(
                &v.iter()
                    .map(|r| format!("{}/{}", r.num, r.denom))
                    .collect::<Vec<_>>(),
            ),
            Value::SRational(v) => join(
                &v.iter()
                    .map(|r| format!("{}/{}", r.num, r.denom))
                    .collect::<Vec<_>>(),
            ),
            _ => field.display_value().to_string(),
        })
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
