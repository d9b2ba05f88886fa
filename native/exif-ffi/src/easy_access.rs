// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Semantic accessors resolving a concept to the tag that carries it.
//!
//! Cameras store the same information under different tags, standard EXIF
//! first and maker notes otherwise. Each accessor walks an ordered list of
//! candidate keys and returns the first one present in the collection.

use crate::key::ExifKey;
use crate::library::ExifData;

/// Resolves a concept to the key of the entry holding it.
pub type EasyAccessFn = fn(&dyn ExifData) -> Option<ExifKey>;

const LENS_NAME: &[&str] = &[
    "Exif.Photo.LensModel",
    "Exif.Canon.LensModel",
    "Exif.CanonCs.LensType",
    "Exif.NikonLd3.LensIDNumber",
    "Exif.Pentax.LensType",
    "Exif.Sony1.LensID",
    "Exif.Olympus.LensModel",
    "Exif.Panasonic.LensType",
];

const FLASH_BIAS: &[&str] = &[
    "Exif.CanonSi.FlashBias",
    "Exif.Panasonic.FlashBias",
    "Exif.Olympus.FlashBias",
    "Exif.OlympusCs.FlashExposureComp",
    "Exif.Minolta.FlashExposureComp",
    "Exif.SonyMinolta.FlashExposureComp",
    "Exif.Sony1.FlashExposureComp",
    "Exif.Sony2.FlashExposureComp",
];

const FOCAL_LENGTH: &[&str] = &[
    "Exif.Photo.FocalLength",
    "Exif.Image.FocalLength",
    "Exif.Canon.FocalLength",
    "Exif.NikonLd2.FocalLength",
    "Exif.NikonLd3.FocalLength",
    "Exif.MinoltaCsNew.FocalLength",
    "Exif.Pentax.FocalLength",
    "Exif.PentaxDng.FocalLength",
    "Exif.Casio2.FocalLength",
];

const SUBJECT_DISTANCE: &[&str] = &[
    "Exif.Photo.SubjectDistance",
    "Exif.Image.SubjectDistance",
    "Exif.CanonSi.SubjectDistance",
    "Exif.CanonFi.FocusDistanceUpper",
    "Exif.CanonFi.FocusDistanceLower",
    "Exif.MinoltaCsNew.FocusDistance",
    "Exif.Nikon1.FocusDistance",
    "Exif.Nikon3.FocusDistance",
    "Exif.NikonLd2.FocusDistance",
    "Exif.NikonLd3.FocusDistance",
    "Exif.Olympus.FocusDistance",
    "Exif.OlympusFi.FocusDistance",
    "Exif.Casio.ObjectDistance",
    "Exif.Casio2.ObjectDistance",
];

const ISO_SPEED: &[&str] = &[
    "Exif.Photo.ISOSpeedRatings",
    "Exif.Image.ISOSpeedRatings",
    "Exif.CanonSi.ISOSpeed",
    "Exif.CanonCs.ISOSpeed",
    "Exif.Nikon1.ISOSpeed",
    "Exif.Nikon2.ISOSpeed",
    "Exif.Nikon3.ISOSpeed",
    "Exif.NikonIi.ISO",
    "Exif.NikonIi.ISO2",
    "Exif.MinoltaCsNew.ISOSetting",
    "Exif.MinoltaCsOld.ISOSetting",
    "Exif.Sony1Cs.ISOSetting",
    "Exif.Sony2Cs.ISOSetting",
    "Exif.Pentax.ISO",
    "Exif.PentaxDng.ISO",
    "Exif.Olympus.ISOSpeed",
    "Exif.Samsung2.ISO",
    "Exif.Casio.ISO",
    "Exif.Casio2.ISO",
    "Exif.Casio2.ISOSpeed",
];

const EXPOSURE_MODE: &[&str] = &[
    "Exif.Photo.ExposureProgram",
    "Exif.Image.ExposureProgram",
    "Exif.CanonCs.ExposureProgram",
    "Exif.MinoltaCs7D.ExposureMode",
    "Exif.MinoltaCs5D.ExposureMode",
    "Exif.MinoltaCsNew.ExposureMode",
    "Exif.MinoltaCsOld.ExposureMode",
    "Exif.Sony1MltCsA100.ExposureMode",
    "Exif.Sony1Cs.ExposureProgram",
    "Exif.Sony2Cs.ExposureProgram",
    "Exif.Sigma.ExposureMode",
];

const METERING_MODE: &[&str] = &[
    "Exif.Photo.MeteringMode",
    "Exif.Image.MeteringMode",
    "Exif.CanonCs.MeteringMode",
    "Exif.MinoltaCs5D.MeteringMode",
    "Exif.MinoltaCsOld.MeteringMode",
    "Exif.OlympusCs.MeteringMode",
    "Exif.Pentax.MeteringMode",
    "Exif.PentaxDng.MeteringMode",
    "Exif.Sigma.MeteringMode",
    "Exif.Sony1MltCsA100.MeteringMode",
];

const MACRO_MODE: &[&str] = &[
    "Exif.CanonCs.Macro",
    "Exif.Fujifilm.Macro",
    "Exif.Olympus.Macro",
    "Exif.Olympus2.Macro",
    "Exif.OlympusCs.MacroMode",
    "Exif.Panasonic.Macro",
    "Exif.MinoltaCsNew.MacroMode",
    "Exif.MinoltaCsOld.MacroMode",
    "Exif.Sony1.Macro",
    "Exif.Sony2.Macro",
];

const IMAGE_QUALITY: &[&str] = &[
    "Exif.CanonCs.Quality",
    "Exif.Fujifilm.Quality",
    "Exif.Sigma.Quality",
    "Exif.Nikon1.Quality",
    "Exif.Nikon2.Quality",
    "Exif.Nikon3.Quality",
    "Exif.Olympus.Quality",
    "Exif.Olympus2.Quality",
    "Exif.OlympusCs.Quality",
    "Exif.Panasonic.Quality",
    "Exif.Pentax.Quality",
    "Exif.PentaxDng.Quality",
    "Exif.Sony1.JPEGQuality",
    "Exif.Sony2.JPEGQuality",
    "Exif.Casio.Quality",
    "Exif.Casio2.QualityMode",
];

const WHITE_BALANCE: &[&str] = &[
    "Exif.CanonSi.WhiteBalance",
    "Exif.Fujifilm.WhiteBalance",
    "Exif.Sigma.WhiteBalance",
    "Exif.Nikon1.WhiteBalance",
    "Exif.Nikon2.WhiteBalance",
    "Exif.Nikon3.WhiteBalance",
    "Exif.Olympus.WhiteBalance",
    "Exif.OlympusCs.WhiteBalance",
    "Exif.Panasonic.WhiteBalance",
    "Exif.MinoltaCs5D.WhiteBalance",
    "Exif.MinoltaCs7D.WhiteBalance",
    "Exif.Sony1.WhiteBalance",
    "Exif.Sony2.WhiteBalance",
    "Exif.Pentax.WhiteBalance",
    "Exif.PentaxDng.WhiteBalance",
    "Exif.Casio.WhiteBalance",
    "Exif.Casio2.WhiteBalance",
    "Exif.Photo.WhiteBalance",
];

fn find_first(data: &dyn ExifData, candidates: &[&str]) -> Option<ExifKey> {
    candidates
        .iter()
        .filter_map(|key| key.parse::<ExifKey>().ok())
        .find(|key| data.contains(key))
}

pub fn lens_name(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, LENS_NAME)
}

pub fn flash_bias(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, FLASH_BIAS)
}

pub fn focal_length(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, FOCAL_LENGTH)
}

pub fn subject_distance(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, SUBJECT_DISTANCE)
}

pub fn iso_speed(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, ISO_SPEED)
}

/// Exposure program (manual, aperture priority, ...).
pub fn exposure_mode(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, EXPOSURE_MODE)
}

pub fn metering_mode(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, METERING_MODE)
}

pub fn macro_mode(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, MACRO_MODE)
}

pub fn image_quality(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, IMAGE_QUALITY)
}

/// Maker-note white balance first, the standard tag last.
pub fn white_balance(data: &dyn ExifData) -> Option<ExifKey> {
    find_first(data, WHITE_BALANCE)
}
