// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! XML summary of the EXIF tags shown by the host.

use crate::easy_access::{self, EasyAccessFn};
use crate::key::ExifKey;
use crate::library::{ExifData, ImageHandle};
use std::fmt::Write;

// ============================================================================
// Formatting Helpers
// ============================================================================

/// Escapes `<` and `>` for use in element bodies and attribute values.
///
/// Other characters, `&` and quotes included, pass through unchanged.
pub fn escape_xml(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Appends `  <key Label="label">values</key>` and a newline.
fn append_element(out: &mut String, key: &str, label: &str, values: &[&str]) {
    let _ = write!(out, "  <{} Label=\"{}\">", key, escape_xml(label));
    for value in values {
        out.push_str(&escape_xml(value));
    }
    let _ = writeln!(out, "</{}>", key);
}

/// Renders the tag stored under `key`, or an empty string when the key is
/// malformed or absent.
pub fn print_tag(data: &dyn ExifData, key: &str) -> String {
    key.parse::<ExifKey>()
        .ok()
        .and_then(|key| data.print(&key))
        .unwrap_or_default()
}

/// Renders the tag found by `accessor`, or an empty string when none is found.
pub fn print_tag_with(data: &dyn ExifData, accessor: EasyAccessFn) -> String {
    accessor(data)
        .and_then(|key| data.print(&key))
        .unwrap_or_default()
}

fn has_tag(data: &dyn ExifData, key: &str) -> bool {
    key.parse::<ExifKey>().is_ok_and(|key| data.contains(&key))
}

// ============================================================================
// Field Table
// ============================================================================

/// Where the body of one summary element comes from.
enum Source {
    Key(&'static str),
    Accessor(EasyAccessFn),
    /// First key when present, otherwise the second.
    Fallback(&'static str, &'static str),
    /// Element is emitted only when the key is present.
    IfPresent(&'static str),
}

struct SummaryField {
    element: &'static str,
    label: &'static str,
    source: Source,
}

const fn field(element: &'static str, label: &'static str, source: Source) -> SummaryField {
    SummaryField {
        element,
        label,
        source,
    }
}

/// Metadata-dependent elements, in document order.
const SUMMARY_FIELDS: &[SummaryField] = &[
    field("Exif.Image.Make", "Camera make", Source::Key("Exif.Image.Make")),
    field("Exif.Image.Model", "Camera model", Source::Key("Exif.Image.Model")),
    field("Exif.Photo.LensModel", "Lens model", Source::Accessor(easy_access::lens_name)),
    // DateTimeOriginal lives in the Exif IFD; the element name is kept for hosts.
    field(
        "Exif.Image.DateTimeOriginal",
        "Image timestamp",
        Source::Key("Exif.Photo.DateTimeOriginal"),
    ),
    field(
        "Exif.Photo.ExposureTime",
        "Exposure time",
        Source::Fallback("Exif.Photo.ExposureTime", "Exif.Photo.ShutterSpeedValue"),
    ),
    field(
        "Exif.Photo.ApertureValue",
        "Aperture",
        Source::Fallback("Exif.Photo.FNumber", "Exif.Photo.ApertureValue"),
    ),
    field(
        "Exif.Photo.ExposureBiasValue",
        "Exposure bias",
        Source::Key("Exif.Photo.ExposureBiasValue"),
    ),
    field("Exif.Photo.Flash", "Flash", Source::Key("Exif.Photo.Flash")),
    field("Exif._.FlashBias", "Flash bias", Source::Accessor(easy_access::flash_bias)),
    field(
        "Exif.Photo.FocalLength",
        "Focal length",
        Source::Accessor(easy_access::focal_length),
    ),
    field(
        "Exif.Photo.FocalLengthIn35mmFilm",
        "Focal length (35 mm eq.)",
        Source::IfPresent("Exif.Photo.FocalLengthIn35mmFilm"),
    ),
    field(
        "Exif.Photo.SubjectDistance",
        "Subject distance",
        Source::Accessor(easy_access::subject_distance),
    ),
    field(
        "Exif.Photo.ISOSpeedRatings",
        "ISO speed",
        Source::Accessor(easy_access::iso_speed),
    ),
    field(
        "Exif.Photo.ExposureProgram",
        "Exposure mode",
        Source::Accessor(easy_access::exposure_mode),
    ),
    field(
        "Exif.Photo.MeteringMode",
        "Metering mode",
        Source::Accessor(easy_access::metering_mode),
    ),
    field("Exif._.Macro", "Macro mode", Source::Accessor(easy_access::macro_mode)),
    field("Exif._.Quality", "Image quality", Source::Accessor(easy_access::image_quality)),
    field(
        "Exif._.WhiteBalance",
        "White balance",
        Source::Accessor(easy_access::white_balance),
    ),
    field("Exif.Image.Orientation", "Orientation", Source::Key("Exif.Image.Orientation")),
];

// ============================================================================
// Document
// ============================================================================

/// Builds the `<Exif>` summary document for an opened image.
///
/// MIME type and pixel size always appear; the tag elements only when the
/// image carries EXIF data.
pub fn format_xml(image: &dyn ImageHandle, data: &dyn ExifData) -> String {
    let mut out = String::from("<Exif>\n");

    append_element(&mut out, "_.MIME", "MIME Type", &[image.mime_type()]);
    let width = image.pixel_width().to_string();
    let height = image.pixel_height().to_string();
    append_element(
        &mut out,
        "_.Size",
        "Image Size",
        &[width.as_str(), " x ", height.as_str()],
    );

    if !data.is_empty() {
        for field in SUMMARY_FIELDS {
            let value = match field.source {
                Source::Key(key) => print_tag(data, key),
                Source::Accessor(accessor) => print_tag_with(data, accessor),
                Source::Fallback(preferred, fallback) => {
                    if has_tag(data, preferred) {
                        print_tag(data, preferred)
                    } else {
                        print_tag(data, fallback)
                    }
                }
                Source::IfPresent(key) => {
                    if !has_tag(data, key) {
                        continue;
                    }
                    print_tag(data, key)
                }
            };
            append_element(&mut out, field.element, field.label, &[value.as_str()]);
        }
    }

    out.push_str("</Exif>\n");
    out
}

#[cfg(test)]
#[path = "xml_tests.rs"]
mod tests;
