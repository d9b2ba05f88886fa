// Copyright (c) the JPEG XL Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Symbolic EXIF keys of the form `Exif.<Group>.<Tag>`.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

const FAMILY: &str = "Exif";

/// A parsed EXIF key such as `Exif.Photo.ExposureTime`.
///
/// The tag part is either a tag name or a hexadecimal tag number (`0x829a`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExifKey {
    group: String,
    tag: String,
}

impl ExifKey {
    /// Group name, e.g. `Photo` or `Image`.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Tag name as written in the key.
    pub fn tag_name(&self) -> &str {
        &self.tag
    }

    /// Tag number when the key was written with a hexadecimal tag.
    pub fn tag_number(&self) -> Option<u16> {
        let hex = self
            .tag
            .strip_prefix("0x")
            .or_else(|| self.tag.strip_prefix("0X"))?;
        u16::from_str_radix(hex, 16).ok()
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl FromStr for ExifKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let (Some(family), Some(group), Some(tag), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::InvalidKey(s.to_string()));
        };

        if family != FAMILY || !is_valid_part(group) || !is_valid_part(tag) {
            return Err(Error::InvalidKey(s.to_string()));
        }

        Ok(Self {
            group: group.to_string(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for ExifKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", FAMILY, self.group, self.tag)
    }
}
