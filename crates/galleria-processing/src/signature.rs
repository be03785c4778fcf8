//! Magic-byte image detection
//!
//! Only the first [`HEADER_LEN`] bytes of a file are ever inspected.

use std::fmt;
use std::io::Read;

/// Number of leading bytes needed to recognise every supported format.
pub const HEADER_LEN: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    WebP,
}

impl ImageFormat {
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::WebP => "webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A format is matched when every `(offset, bytes)` segment is present.
struct Signature {
    format: ImageFormat,
    segments: &'static [(usize, &'static [u8])],
}

const JPEG_SOI: &[u8] = &[0xFF, 0xD8];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
const GIF_MAGIC: &[u8] = b"GIF8";
const BMP_MAGIC: &[u8] = b"BM";
const RIFF_MAGIC: &[u8] = b"RIFF";
const WEBP_FORM: &[u8] = b"WEBP";

// Checked in order; the first match wins.
static SIGNATURES: &[Signature] = &[
    Signature {
        format: ImageFormat::Jpeg,
        segments: &[(0, JPEG_SOI)],
    },
    Signature {
        format: ImageFormat::Png,
        segments: &[(0, PNG_MAGIC)],
    },
    // Covers both GIF87a and GIF89a
    Signature {
        format: ImageFormat::Gif,
        segments: &[(0, GIF_MAGIC)],
    },
    Signature {
        format: ImageFormat::Bmp,
        segments: &[(0, BMP_MAGIC)],
    },
    Signature {
        format: ImageFormat::WebP,
        segments: &[(0, RIFF_MAGIC), (8, WEBP_FORM)],
    },
];

impl Signature {
    fn matches(&self, header: &[u8]) -> bool {
        self.segments.iter().all(|(offset, bytes)| {
            header
                .get(*offset..*offset + bytes.len())
                .is_some_and(|window| window == *bytes)
        })
    }
}

/// Identify the image format from the leading bytes of `data`.
pub fn detect_format(data: &[u8]) -> Option<ImageFormat> {
    let header = &data[..data.len().min(HEADER_LEN)];
    SIGNATURES
        .iter()
        .find(|signature| signature.matches(header))
        .map(|signature| signature.format)
}

/// Read at most [`HEADER_LEN`] bytes from `reader` and identify the format.
///
/// A read error is reported as "not an image" rather than propagated.
pub fn sniff<R: Read>(reader: R) -> Option<ImageFormat> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    match reader.take(HEADER_LEN as u64).read_to_end(&mut header) {
        Ok(_) => detect_format(&header),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to read image header");
            None
        }
    }
}
