//! Classification of JPEG marker bytes

/// Markers that may appear between segments of a JPEG stream.
///
/// A marker is a `0xFF` byte followed by a code byte; this enum carries
/// the code byte, already split into families where the code embeds an
/// index (SOF variant, APP segment number, RST index).
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub(crate) enum Marker {
    /// Start of image
    SOI,
    /// End of image
    EOI,
    /// Start of frame, the argument is the coding scheme (0 = baseline DCT)
    SOF(u8),
    /// Define Huffman tables
    DHT,
    /// Define arithmetic coding conditioning
    DAC,
    /// Define quantization tables
    DQT,
    /// Define restart interval
    DRI,
    /// Define number of lines
    DNL,
    /// Start of scan
    SOS,
    /// Restart marker
    RST(u8),
    /// Application segment
    APP(u8),
    /// Comment
    COM,
}

impl Marker {
    pub fn from_u8(value: u8) -> Option<Marker> {
        match value {
            0xd8 => Some(Marker::SOI),
            0xd9 => Some(Marker::EOI),
            0xda => Some(Marker::SOS),
            0xdb => Some(Marker::DQT),
            0xdc => Some(Marker::DNL),
            0xdd => Some(Marker::DRI),
            0xc4 => Some(Marker::DHT),
            0xcc => Some(Marker::DAC),
            v @ (0xc0..=0xc3 | 0xc5..=0xc7 | 0xc9..=0xcb | 0xcd..=0xcf) => {
                Some(Marker::SOF(v & 0x0f))
            }
            v @ 0xd0..=0xd7 => Some(Marker::RST(v & 0x07)),
            v @ 0xe0..=0xef => Some(Marker::APP(v & 0x0f)),
            0xfe => Some(Marker::COM),
            _ => None,
        }
    }
}
