// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Unit tests for the XML summary.

use super::*;
use crate::test_support::{FakeImage, FakeTags};

fn element_names(xml: &str) -> Vec<String> {
    xml.lines()
        .filter_map(|line| line.strip_prefix("  <"))
        .map(|line| line.split(' ').next().unwrap_or_default().to_string())
        .collect()
}

fn element_body<'a>(xml: &'a str, name: &str) -> Option<&'a str> {
    let open = format!("  <{} Label=\"", name);
    let line = xml.lines().find(|line| line.starts_with(&open))?;
    let start = line.find("\">")? + 2;
    let end = line.rfind("</")?;
    Some(&line[start..end])
}

fn image_with(tags: FakeTags) -> FakeImage {
    let mut image = FakeImage::new(4000, 3000).with_tags(tags);
    image.read_metadata().unwrap();
    image
}

#[test]
fn test_escape_xml() {
    assert_eq!(escape_xml("a<b>c"), "a&lt;b&gt;c");
    assert_eq!(escape_xml("R&D \"quoted\" 'x'"), "R&D \"quoted\" 'x'");
    assert_eq!(escape_xml(""), "");
}

#[test]
fn test_escape_xml_only_touches_angle_brackets() {
    let input = "<<Canon>> EOS 5D\tMark IV\n\u{e9}\u{1F4F7}>";
    let escaped = escape_xml(input);
    assert!(!escaped.contains('<'));
    assert!(!escaped.contains('>'));
    let restored = escaped.replace("&lt;", "<").replace("&gt;", ">");
    assert_eq!(restored, input);
}

#[test]
fn test_empty_metadata_has_only_mime_and_size() {
    let image = image_with(FakeTags::new());
    let xml = format_xml(&image, image.exif_data());

    assert_eq!(
        xml,
        "<Exif>\n  <_.MIME Label=\"MIME Type\">image/jpeg</_.MIME>\n  \
         <_.Size Label=\"Image Size\">4000 x 3000</_.Size>\n</Exif>\n"
    );
}

#[test]
fn test_field_order_is_fixed() {
    let tags = FakeTags::new()
        .with("Exif.Image.Orientation", "top, left")
        .with("Exif.Photo.FocalLengthIn35mmFilm", "28 mm")
        .with("Exif.Image.Make", "Canon");
    let image = image_with(tags);
    let xml = format_xml(&image, image.exif_data());

    assert_eq!(
        element_names(&xml),
        [
            "_.MIME",
            "_.Size",
            "Exif.Image.Make",
            "Exif.Image.Model",
            "Exif.Photo.LensModel",
            "Exif.Image.DateTimeOriginal",
            "Exif.Photo.ExposureTime",
            "Exif.Photo.ApertureValue",
            "Exif.Photo.ExposureBiasValue",
            "Exif.Photo.Flash",
            "Exif._.FlashBias",
            "Exif.Photo.FocalLength",
            "Exif.Photo.FocalLengthIn35mmFilm",
            "Exif.Photo.SubjectDistance",
            "Exif.Photo.ISOSpeedRatings",
            "Exif.Photo.ExposureProgram",
            "Exif.Photo.MeteringMode",
            "Exif._.Macro",
            "Exif._.Quality",
            "Exif._.WhiteBalance",
            "Exif.Image.Orientation",
        ]
    );
}

#[test]
fn test_35mm_focal_length_requires_tag() {
    let image = image_with(FakeTags::new().with("Exif.Image.Make", "Nikon"));
    let xml = format_xml(&image, image.exif_data());

    assert!(!xml.contains("FocalLengthIn35mmFilm"));
    assert_eq!(element_body(&xml, "Exif.Image.Make"), Some("Nikon"));
    // absent tags still produce closed, empty elements
    assert_eq!(element_body(&xml, "Exif.Image.Model"), Some(""));
}

#[test]
fn test_exposure_time_preferred_over_shutter_speed() {
    let tags = FakeTags::new()
        .with("Exif.Photo.ExposureTime", "1/250 s")
        .with("Exif.Photo.ShutterSpeedValue", "7.97 EV");
    let image = image_with(tags);
    let xml = format_xml(&image, image.exif_data());

    assert_eq!(element_body(&xml, "Exif.Photo.ExposureTime"), Some("1/250 s"));
}

#[test]
fn test_shutter_speed_fallback() {
    let image = image_with(FakeTags::new().with("Exif.Photo.ShutterSpeedValue", "7.97 EV"));
    let xml = format_xml(&image, image.exif_data());

    assert_eq!(element_body(&xml, "Exif.Photo.ExposureTime"), Some("7.97 EV"));
}

#[test]
fn test_aperture_fallback_pair() {
    let both = image_with(
        FakeTags::new()
            .with("Exif.Photo.FNumber", "f/2.8")
            .with("Exif.Photo.ApertureValue", "2.97 EV"),
    );
    let xml = format_xml(&both, both.exif_data());
    assert_eq!(element_body(&xml, "Exif.Photo.ApertureValue"), Some("f/2.8"));

    let apex_only = image_with(FakeTags::new().with("Exif.Photo.ApertureValue", "2.97 EV"));
    let xml = format_xml(&apex_only, apex_only.exif_data());
    assert_eq!(element_body(&xml, "Exif.Photo.ApertureValue"), Some("2.97 EV"));
}

#[test]
fn test_accessor_fields_use_resolved_tag() {
    let tags = FakeTags::new()
        .with("Exif.CanonCs.LensType", "EF24-70mm f/2.8L")
        .with("Exif.Photo.ISOSpeedRatings", "400")
        .with("Exif.Photo.WhiteBalance", "Auto");
    let image = image_with(tags);
    let xml = format_xml(&image, image.exif_data());

    assert_eq!(element_body(&xml, "Exif.Photo.LensModel"), Some("EF24-70mm f/2.8L"));
    assert_eq!(element_body(&xml, "Exif.Photo.ISOSpeedRatings"), Some("400"));
    assert_eq!(element_body(&xml, "Exif._.WhiteBalance"), Some("Auto"));
    assert_eq!(element_body(&xml, "Exif._.Macro"), Some(""));
}

#[test]
fn test_values_are_escaped() {
    let image = image_with(FakeTags::new().with("Exif.Image.Model", "<Prototype>"));
    let xml = format_xml(&image, image.exif_data());

    assert_eq!(
        element_body(&xml, "Exif.Image.Model"),
        Some("&lt;Prototype&gt;")
    );
}

#[test]
fn test_print_tag_with_bad_key_is_empty() {
    let tags = FakeTags::new().with("Exif.Image.Make", "Canon");
    assert_eq!(print_tag(&tags, "Exif.Image.Make"), "Canon");
    assert_eq!(print_tag(&tags, "Make"), "");
    assert_eq!(print_tag(&tags, "Exif.Image.Model"), "");
    assert_eq!(print_tag_with(&tags, easy_access::lens_name), "");
}
