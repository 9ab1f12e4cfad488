//! Image metadata decoded from the IHDR payload.

use crate::config::HEADER_PAYLOAD_LEN;
use crate::error::{FormatError, Result, ValidationError};
use serde::Serialize;

/// PNG color modes, as stored in the IHDR color type byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorMode {
    Grayscale,
    Truecolor,
    Indexed,
    GrayscaleAlpha,
    TruecolorAlpha,
}

impl ColorMode {
    /// Whether pixel data references a palette chunk.
    pub fn uses_palette(&self) -> bool {
        matches!(self, ColorMode::Indexed)
    }

    /// Grayscale modes carry no palette and no spare color channels, so the
    /// codec cannot hide messages in them.
    pub fn is_grayscale(&self) -> bool {
        matches!(self, ColorMode::Grayscale | ColorMode::GrayscaleAlpha)
    }
}

impl TryFrom<u8> for ColorMode {
    type Error = ValidationError;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(ColorMode::Grayscale),
            2 => Ok(ColorMode::Truecolor),
            3 => Ok(ColorMode::Indexed),
            4 => Ok(ColorMode::GrayscaleAlpha),
            6 => Ok(ColorMode::TruecolorAlpha),
            other => Err(ValidationError::BadColorMode(other)),
        }
    }
}

impl From<ColorMode> for u8 {
    fn from(mode: ColorMode) -> u8 {
        match mode {
            ColorMode::Grayscale => 0,
            ColorMode::Truecolor => 2,
            ColorMode::Indexed => 3,
            ColorMode::GrayscaleAlpha => 4,
            ColorMode::TruecolorAlpha => 6,
        }
    }
}

/// Image metadata decoded once from the IHDR payload at parse time.
/// Read-only after construction.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ImageHeader {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Bits per sample or palette index.
    pub bit_depth: u8,
    /// Color mode.
    pub color_mode: ColorMode,
    /// Compression method.
    pub compression_method: u8,
    /// Filter method.
    pub filter_method: u8,
    /// Interlace method.
    pub interlace_method: u8,
}

impl ImageHeader {
    /// Decode the fixed 13-byte IHDR payload: width and height as big-endian
    /// u32, then five single-byte fields.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        if payload.len() != HEADER_PAYLOAD_LEN {
            return Err(FormatError::BadHeaderLength(payload.len()).into());
        }

        Ok(Self {
            width: u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]),
            height: u32::from_be_bytes([payload[4], payload[5], payload[6], payload[7]]),
            bit_depth: payload[8],
            color_mode: ColorMode::try_from(payload[9])?,
            compression_method: payload[10],
            filter_method: payload[11],
            interlace_method: payload[12],
        })
    }

    /// Encode back into the 13-byte payload layout.
    pub fn encode(&self) -> [u8; HEADER_PAYLOAD_LEN] {
        let mut out = [0u8; HEADER_PAYLOAD_LEN];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = self.bit_depth;
        out[9] = u8::from(self.color_mode);
        out[10] = self.compression_method;
        out[11] = self.filter_method;
        out[12] = self.interlace_method;
        out
    }
}
