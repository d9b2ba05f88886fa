// Tool for creating JPEG test files with EXIF metadata.
// Writes an EXIF APP1 segment (optionally with an IFD1 thumbnail) into a
// generated or existing JPEG, replacing any EXIF segment already present.

use exif::experimental::Writer;
use exif::{Field, In, Tag, Value};
use image::{ImageFormat, Rgb, RgbImage};
use std::env;
use std::fs;
use std::io::{self, Cursor};

/// JPEG markers
const MARKER_SOI: u8 = 0xD8;
const MARKER_APP1: u8 = 0xE1;
const MARKER_SOS: u8 = 0xDA;
const MARKER_EOI: u8 = 0xD9;

const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";

/// Represents a parsed marker segment
#[derive(Debug, Clone)]
struct Segment {
    marker: u8,
    data: Vec<u8>,
}

impl Segment {
    fn new(marker: u8, data: Vec<u8>) -> Self {
        Self { marker, data }
    }

    fn is_exif(&self) -> bool {
        self.marker == MARKER_APP1 && self.data.starts_with(EXIF_HEADER)
    }

    /// Serialize the segment to bytes
    fn to_bytes(&self) -> io::Result<Vec<u8>> {
        let length = u16::try_from(self.data.len() + 2).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "Segment exceeds 64 KiB")
        })?;
        let mut result = Vec::with_capacity(4 + self.data.len());
        result.extend_from_slice(&[0xFF, self.marker]);
        result.extend_from_slice(&length.to_be_bytes());
        result.extend_from_slice(&self.data);
        Ok(result)
    }
}

/// Split a JPEG into header segments and the remaining scan data (from SOS on)
fn parse_segments(data: &[u8]) -> io::Result<(Vec<Segment>, &[u8])> {
    if data.len() < 2 || data[0] != 0xFF || data[1] != MARKER_SOI {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "Not a JPEG file"));
    }

    let mut segments = Vec::new();
    let mut offset = 2;

    loop {
        if offset + 4 > data.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Truncated JPEG header",
            ));
        }
        if data[offset] != 0xFF {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Expected marker at offset {}", offset),
            ));
        }

        let marker = data[offset + 1];
        if marker == MARKER_SOS || marker == MARKER_EOI {
            return Ok((segments, &data[offset..]));
        }

        let length = u16::from_be_bytes([data[offset + 2], data[offset + 3]]) as usize;
        if length < 2 || offset + 2 + length > data.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Segment extends beyond file: offset={}, length={}, file_size={}",
                    offset,
                    length,
                    data.len()
                ),
            ));
        }

        let payload = data[offset + 4..offset + 2 + length].to_vec();
        segments.push(Segment::new(marker, payload));
        offset += 2 + length;
    }
}

/// Encode a flat-colored JPEG
fn encode_jpeg(width: u32, height: u32, color: [u8; 3]) -> io::Result<Vec<u8>> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Jpeg)
        .map_err(|e| io::Error::other(format!("JPEG encoding failed: {}", e)))?;
    Ok(out.into_inner())
}

/// Serialize fields (and thumbnail) into a TIFF-structured EXIF block
fn create_exif_block(fields: &[Field], thumbnail: Option<&[u8]>) -> io::Result<Vec<u8>> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    if let Some(jpeg) = thumbnail {
        writer.set_jpeg(jpeg, In::THUMBNAIL);
    }

    let mut tiff = Cursor::new(Vec::new());
    writer
        .write(&mut tiff, false)
        .map_err(|e| io::Error::other(format!("EXIF serialization failed: {}", e)))?;

    let mut data = EXIF_HEADER.to_vec();
    data.extend_from_slice(&tiff.into_inner());
    Ok(data)
}

fn parse_size(text: &str) -> Option<(u32, u32)> {
    let (w, h) = text.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn parse_ratio(text: &str) -> Option<(u32, u32)> {
    match text.split_once('/') {
        Some((n, d)) => Some((n.parse().ok()?, d.parse().ok()?)),
        None => Some((text.parse().ok()?, 1)),
    }
}

fn primary(tag: Tag, value: Value) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value,
    }
}

fn ascii(text: &str) -> Value {
    Value::Ascii(vec![text.as_bytes().to_vec()])
}

fn print_usage() {
    eprintln!("Usage: create-test-image <output.jpg> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input <path>           Start from an existing JPEG (default: generated image)");
    eprintln!("  --size <W>x<H>           Size of the generated image (default: 640x480)");
    eprintln!("  --make <text>            Camera make");
    eprintln!("  --model <text>           Camera model");
    eprintln!("  --lens <text>            Lens model");
    eprintln!("  --datetime <text>        Original timestamp, e.g. '2024:05:01 12:00:00'");
    eprintln!("  --orientation <n>        Orientation code (1-8)");
    eprintln!("  --exposure-time <n/d>    Exposure time in seconds");
    eprintln!("  --fnumber <n/d>          F-number");
    eprintln!("  --focal-length <n/d>     Focal length in mm");
    eprintln!("  --iso <n>                ISO speed");
    eprintln!("  --thumbnail <W>x<H>      Embed a generated JPEG thumbnail of this size");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  create-test-image out.jpg --make Canon --orientation 6 --thumbnail 160x120");
    eprintln!("  create-test-image out.jpg --input photo.jpg --exposure-time 1/250 --fnumber 28/10");
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1].starts_with('-') {
        print_usage();
        std::process::exit(1);
    }

    let output_path = &args[1];

    let mut input_path: Option<String> = None;
    let mut size = (640, 480);
    let mut thumbnail_size: Option<(u32, u32)> = None;
    let mut fields: Vec<Field> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        let option = args[i].as_str();
        if option == "--help" || option == "-h" {
            print_usage();
            std::process::exit(0);
        }

        i += 1;
        let Some(value) = args.get(i) else {
            fail(&format!("{} requires an argument", option));
        };

        match option {
            "--input" => input_path = Some(value.clone()),
            "--size" => {
                size = parse_size(value).unwrap_or_else(|| fail("--size expects <W>x<H>"));
            }
            "--thumbnail" => {
                thumbnail_size = Some(
                    parse_size(value).unwrap_or_else(|| fail("--thumbnail expects <W>x<H>")),
                );
            }
            "--make" => fields.push(primary(Tag::Make, ascii(value))),
            "--model" => fields.push(primary(Tag::Model, ascii(value))),
            "--lens" => fields.push(primary(Tag::LensModel, ascii(value))),
            "--datetime" => fields.push(primary(Tag::DateTimeOriginal, ascii(value))),
            "--orientation" => {
                let code: u16 = value
                    .parse()
                    .unwrap_or_else(|_| fail("--orientation expects a number"));
                fields.push(primary(Tag::Orientation, Value::Short(vec![code])));
            }
            "--iso" => {
                let iso: u16 = value.parse().unwrap_or_else(|_| fail("--iso expects a number"));
                fields.push(primary(Tag::PhotographicSensitivity, Value::Short(vec![iso])));
            }
            "--exposure-time" | "--fnumber" | "--focal-length" => {
                let ratio = parse_ratio(value)
                    .unwrap_or_else(|| fail(&format!("{} expects <n>/<d>", option)));
                let tag = match option {
                    "--exposure-time" => Tag::ExposureTime,
                    "--fnumber" => Tag::FNumber,
                    _ => Tag::FocalLength,
                };
                fields.push(primary(tag, Value::Rational(vec![ratio.into()])));
            }
            _ => {
                eprintln!("Unknown option: {}", option);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Read or generate the base image
    let input_data = match &input_path {
        Some(path) => {
            let data = fs::read(path)?;
            println!("Read {} bytes from {}", data.len(), path);
            data
        }
        None => {
            let data = encode_jpeg(size.0, size.1, [180, 120, 60])?;
            println!("Generated {}x{} JPEG ({} bytes)", size.0, size.1, data.len());
            data
        }
    };

    let (mut segments, scan) = parse_segments(&input_data)?;
    let before = segments.len();
    segments.retain(|s| !s.is_exif());
    if segments.len() != before {
        println!("Removed {} existing EXIF segment(s)", before - segments.len());
    }

    let thumbnail = match thumbnail_size {
        Some((w, h)) => Some(encode_jpeg(w, h, [20, 40, 60])?),
        None => None,
    };

    if fields.is_empty() && thumbnail.is_none() {
        println!("No EXIF fields requested, writing image without EXIF");
    } else {
        let exif = create_exif_block(&fields, thumbnail.as_deref())?;
        println!(
            "Added EXIF segment with {} field(s){} ({} bytes)",
            fields.len(),
            if thumbnail.is_some() { " and a thumbnail" } else { "" },
            exif.len()
        );
        segments.insert(0, Segment::new(MARKER_APP1, exif));
    }

    // Serialize output
    let mut output_data = vec![0xFF, MARKER_SOI];
    for segment in &segments {
        output_data.extend_from_slice(&segment.to_bytes()?);
    }
    output_data.extend_from_slice(scan);

    fs::write(output_path, &output_data)?;
    println!("Wrote {} bytes to {}", output_data.len(), output_path);

    Ok(())
}
