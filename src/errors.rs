//! Contains most common errors that may be encountered in decoding a JPEG image

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::misc::{
    START_OF_FRAME_EXT_AR, START_OF_FRAME_EXT_SEQ, START_OF_FRAME_LOS_SEQ,
    START_OF_FRAME_LOS_SEQ_AR, START_OF_FRAME_PROG_DCT, START_OF_FRAME_PROG_DCT_AR,
};

/// Common decode errors
#[allow(clippy::module_name_repetitions)]
pub enum DecodeErrors {
    /// Anything that does not fall into the kinds below
    Format(String),
    /// Illegal magic bytes, the stream does not begin with SOI
    IllegalMagicBytes(u16),
    /// A marker byte pair outside the supported set
    UnknownMarker(u16),
    /// Problems with the Huffman tables, either a malformed DHT segment or a
    /// failed code lookup in the entropy stream
    HuffmanDecode(String),
    /// Discrete Quantization Tables error
    DqtError(String),
    /// Start of frame errors
    SofError(String),
    /// Start of scan errors
    SosError(String),
    /// Protocol faults inside an entropy coded segment
    MCUError(String),
    /// Unsupported images
    Unsupported(UnsupportedSchemes),
    /// End of buffer before EOI in a non-entropy position
    ExhaustedData,
    /// Image dimensions above the supported maximum
    LargeDimensions(usize),
    /// Image has zero width or height
    ZeroError,
}

impl Display for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::Format(ref reason) => write!(f, "{}", reason),
            Self::IllegalMagicBytes(bytes) => {
                write!(f, "Error parsing image. Illegal start bytes:{:#06x}", bytes)
            }
            Self::UnknownMarker(marker) => {
                write!(f, "Unknown marker {:#06x} in stream, cannot continue", marker)
            }
            Self::HuffmanDecode(ref reason) => {
                write!(f, "Error decoding huffman values. Reason:{}", reason)
            }
            Self::DqtError(ref reason) => write!(f, "Error parsing DQT segment. Reason:{}", reason),
            Self::SofError(ref reason) => write!(f, "Error parsing SOF segment. Reason:{}", reason),
            Self::SosError(ref reason) => write!(f, "Error parsing SOS segment. Reason:{}", reason),
            Self::MCUError(ref reason) => write!(f, "Error decoding MCUs. Reason:{}", reason),
            Self::Unsupported(ref image_type) => write!(f, "{:?}", image_type),
            Self::ExhaustedData => write!(f, "Exhausted data before encountering EOI"),
            Self::LargeDimensions(dimensions) => write!(
                f,
                "Too large dimensions {}, maximum supported is {}",
                dimensions,
                crate::decoder::MAX_DIMENSIONS
            ),
            Self::ZeroError => write!(f, "Image width or height is set to zero, cannot continue"),
        }
    }
}

impl Debug for DecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Error for DecodeErrors {}

/// Contains unsupported/yet-to-be supported JPEG image encoding types.
#[derive(Eq, PartialEq, Copy, Clone)]
pub enum UnsupportedSchemes {
    /// SOF_1 Extended sequential DCT, Huffman coding
    ExtendedSequentialHuffman,
    /// Progressive DCT, Huffman coding
    ProgressiveDctHuffman,
    /// Lossless (sequential), Huffman coding
    LosslessHuffman,
    /// Extended sequential DCT, arithmetic coding
    ExtendedSequentialDctArithmetic,
    /// Progressive DCT, arithmetic coding
    ProgressiveDctArithmetic,
    /// Lossless (sequential), arithmetic coding
    LosslessArithmetic,
}

impl Debug for UnsupportedSchemes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self {
            Self::ExtendedSequentialHuffman => {
                write!(f, "The library cannot decode images encoded with the Extended Sequential Huffman scheme")
            }
            Self::ProgressiveDctHuffman => {
                write!(f, "The library cannot decode images encoded with the Progressive DCT Huffman scheme")
            }
            Self::LosslessHuffman => {
                write!(f, "The library cannot decode images encoded with the Lossless Huffman scheme")
            }
            Self::ExtendedSequentialDctArithmetic => {
                write!(f, "The library cannot decode images encoded with the Extended Sequential DCT Arithmetic scheme")
            }
            Self::ProgressiveDctArithmetic => {
                write!(f, "The library cannot decode images encoded with the Progressive DCT Arithmetic scheme")
            }
            Self::LosslessArithmetic => {
                write!(f, "The library cannot decode images encoded with the Lossless Arithmetic scheme")
            }
        }
    }
}

impl UnsupportedSchemes {
    #[must_use]
    pub fn from_int(int: u16) -> Option<UnsupportedSchemes> {
        match int {
            START_OF_FRAME_PROG_DCT => Some(Self::ProgressiveDctHuffman),
            START_OF_FRAME_PROG_DCT_AR => Some(Self::ProgressiveDctArithmetic),
            START_OF_FRAME_LOS_SEQ => Some(Self::LosslessHuffman),
            START_OF_FRAME_LOS_SEQ_AR => Some(Self::LosslessArithmetic),
            START_OF_FRAME_EXT_SEQ => Some(Self::ExtendedSequentialHuffman),
            START_OF_FRAME_EXT_AR => Some(Self::ExtendedSequentialDctArithmetic),
            _ => None,
        }
    }
}
