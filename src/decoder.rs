//! Main decoder logic: the top level marker loop and the public API.

use std::fs::read;
use std::path::Path;

use crate::bitstream::BitStream;
use crate::components::Components;
use crate::errors::{DecodeErrors, UnsupportedSchemes};
use crate::headers::{parse_dqt, parse_dri, parse_huffman, parse_sos, parse_start_of_frame};
use crate::huffman::HuffmanTable;
use crate::marker::Marker;
use crate::misc::ColorSpace;

/// Quantization table slots addressable from headers.
pub(crate) const MAX_QT_TABLES: usize = 4;

/// Huffman table slots per class addressable from headers.
pub(crate) const MAX_HUFFMAN_TABLES: usize = 4;

/// Maximum image dimensions supported.
pub(crate) const MAX_DIMENSIONS: usize = 1 << 27;

/// A Decoder Instance
pub struct Decoder {
    /// Struct to hold image information from SOF
    pub(crate) info: ImageInfo,
    /// Quantization tables in zig-zag storage order, copied into the
    /// components once the frame header binds them
    pub(crate) qt_tables: [Option<[u8; 64]>; MAX_QT_TABLES],
    /// DC Huffman tables
    pub(crate) dc_huffman_tables: [Option<HuffmanTable>; MAX_HUFFMAN_TABLES],
    /// AC Huffman tables
    pub(crate) ac_huffman_tables: [Option<HuffmanTable>; MAX_HUFFMAN_TABLES],
    /// Image components, holds information like DC prediction and
    /// quantization tables of a component
    pub(crate) components: Vec<Components>,
    /// MCU pixel width, 8 with no sub-sampling
    pub(crate) mcu_width: usize,
    /// MCU pixel height
    pub(crate) mcu_height: usize,
    /// Number of MCUs in the x plane
    pub(crate) mcu_x: usize,
    /// Number of MCUs in the y plane
    pub(crate) mcu_y: usize,
    /// Image input colorspace, should be YCbCr for a sane image, might be
    /// grayscale too
    pub(crate) input_colorspace: ColorSpace,
    /// What the input colorspace is reconstructed into
    pub(crate) output_colorspace: ColorSpace,
    /// Restart interval in MCUs, 0 disables restart handling
    pub(crate) restart_interval: usize,
    /// MCUs left until the next restart marker is due
    pub(crate) todo: usize,
    /// Index the next RSTn marker must carry
    pub(crate) next_restart: u8,
    /// Scratch holding one assembled MCU row of output
    pub(crate) scan_out: Vec<u8>,
    /// The final raster
    pub(crate) pixels: Vec<u8>,
    pub(crate) seen_sof: bool,
    pub(crate) seen_scan: bool,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder {
            info: ImageInfo::default(),
            qt_tables: [None; MAX_QT_TABLES],
            dc_huffman_tables: [None, None, None, None],
            ac_huffman_tables: [None, None, None, None],
            components: vec![],
            mcu_width: 8,
            mcu_height: 8,
            mcu_x: 0,
            mcu_y: 0,
            input_colorspace: ColorSpace::YCbCr,
            output_colorspace: ColorSpace::RGB,
            restart_interval: 0,
            todo: 0,
            next_restart: 0,
            scan_out: vec![],
            pixels: vec![],
            seen_sof: false,
            seen_scan: false,
        }
    }
}

impl Decoder {
    /// Create a new Decoder instance
    #[must_use]
    pub fn new() -> Decoder {
        Decoder::default()
    }

    /// Decode a buffer already in memory
    ///
    /// The buffer should be a valid jpeg file, perhaps created by the
    /// command `std::fs::read()` or a JPEG file downloaded from the
    /// internet.
    ///
    /// The returned vector holds the raster in row major top-to-bottom
    /// order, `width * height * channels` bytes, either grayscale or
    /// interleaved RGB depending on the frame's component count.
    ///
    /// # Errors
    /// If the image is not a valid baseline jpeg file
    pub fn decode_buffer(&mut self, buf: &[u8]) -> Result<Vec<u8>, DecodeErrors> {
        let mut stream = BitStream::new(buf);

        self.decode_internal(&mut stream)
    }

    /// Decode a JPEG file
    ///
    /// # Errors
    ///  - `IllegalMagicBytes` - The first two bytes of the image are not `0xffd8`
    ///  - `Unsupported` - The image encoding scheme is not baseline DCT
    pub fn decode_file<P>(&mut self, file: P) -> Result<Vec<u8>, DecodeErrors>
    where
        P: AsRef<Path>,
    {
        let buffer =
            read(file).map_err(|x| DecodeErrors::Format(format!("Could not open file\n{}", x)))?;

        self.decode_buffer(&buffer)
    }

    /// Returns the image information
    ///
    /// This **must** be called after a successful call to `decode_file` or
    /// `decode_buffer`, otherwise it will return `None`
    #[must_use]
    pub fn info(&self) -> Option<ImageInfo> {
        if !self.seen_sof {
            return None;
        }

        return Some(self.info.clone());
    }

    /// Get the output colorspace the image pixels are decoded into
    #[must_use]
    pub fn output_colorspace(&self) -> ColorSpace {
        return self.output_colorspace;
    }

    /// Get the width of the image as a u16
    #[must_use]
    pub fn width(&self) -> u16 {
        self.info.width
    }

    /// Get the height of the image as a u16
    #[must_use]
    pub fn height(&self) -> u16 {
        self.info.height
    }

    /// The top level marker loop.
    ///
    /// Markers are dispatched in file order until EOI, everything else is
    /// driven from here.
    fn decode_internal(&mut self, stream: &mut BitStream) -> Result<Vec<u8>, DecodeErrors> {
        // First two bytes should be the SOI marker
        let magic_bytes = stream.next_word()?;

        if magic_bytes != 0xffd8 {
            return Err(DecodeErrors::IllegalMagicBytes(magic_bytes));
        }

        debug!("SOI");

        while !stream.is_eof() {
            let marker = read_marker(stream)?;

            match marker {
                Marker::EOI => {
                    debug!("EOI");
                    break;
                }
                Marker::DQT => parse_dqt(self, stream)?,
                Marker::DHT => parse_huffman(self, stream)?,
                Marker::SOF(0) => {
                    parse_start_of_frame(self, stream)?;
                    self.seen_sof = true;
                }
                // Other start of frame segments are not supported
                Marker::SOF(v) => {
                    let sof_marker = 0xffc0 | u16::from(v);

                    if let Some(feature) = UnsupportedSchemes::from_int(sof_marker) {
                        return Err(DecodeErrors::Unsupported(feature));
                    }

                    return Err(DecodeErrors::Format(format!(
                        "Unsupported start of frame marker {:#06x}",
                        sof_marker
                    )));
                }
                Marker::DRI => parse_dri(self, stream)?,
                Marker::SOS => {
                    if !self.seen_sof {
                        return Err(DecodeErrors::SosError(
                            "Start of scan before start of frame".to_string(),
                        ));
                    }

                    parse_sos(self, stream)?;
                    self.decode_mcu_rows(stream)?;
                    self.seen_scan = true;
                }
                Marker::APP(n) => {
                    let length = skip_segment(stream)?;

                    debug!("Skipped APP{} segment of length {}", n, length);
                }
                Marker::COM => {
                    let length = skip_segment(stream)?;

                    debug!("Skipped COM segment of length {}", length);
                }
                Marker::DAC | Marker::DNL => {
                    return Err(DecodeErrors::Format(format!(
                        "Parsing of the following header `{:?}` is not supported, cannot continue",
                        marker
                    )));
                }
                Marker::SOI => {
                    return Err(DecodeErrors::Format(
                        "Duplicate SOI marker in stream".to_string(),
                    ));
                }
                Marker::RST(n) => {
                    return Err(DecodeErrors::MCUError(format!(
                        "RST{} marker outside an entropy coded segment",
                        n
                    )));
                }
            }
        }

        if !self.seen_scan {
            return Err(DecodeErrors::Format(
                "No image data found in stream".to_string(),
            ));
        }

        debug!("Finished decoding image");

        Ok(std::mem::take(&mut self.pixels))
    }
}

/// Read the next marker from the stream.
///
/// Markers may be padded with any number of `0xff` fill bytes before the
/// code byte.
fn read_marker(stream: &mut BitStream) -> Result<Marker, DecodeErrors> {
    let mut byte = stream.next_byte()?;

    if byte != 0xff {
        return Err(DecodeErrors::Format(format!(
            "Expected a marker at offset {}, found byte {:#04x}",
            stream.get_offset() - 1,
            byte
        )));
    }

    while byte == 0xff {
        byte = stream.next_byte()?;
    }

    Marker::from_u8(byte).ok_or(DecodeErrors::UnknownMarker(0xff00 | u16::from(byte)))
}

/// Skip over a length prefixed segment we have no use for.
fn skip_segment(stream: &mut BitStream) -> Result<u16, DecodeErrors> {
    let length = stream.next_word()?;

    if length < 2 {
        return Err(DecodeErrors::Format(format!(
            "Bad segment length {}, corrupt JPEG",
            length
        )));
    }

    stream.skip_bytes(usize::from(length) - 2);

    Ok(length)
}

/// A struct representing Image Information
#[derive(Default, Clone, Eq, PartialEq)]
pub struct ImageInfo {
    /// Width of the image
    pub width: u16,
    /// Height of image
    pub height: u16,
    /// Number of components
    pub components: u8,
}

impl ImageInfo {
    /// Set width of the image
    ///
    /// Found in the start of frame
    pub(crate) fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    /// Set height of the image
    ///
    /// Found in the start of frame
    pub(crate) fn set_height(&mut self, height: u16) {
        self.height = height;
    }
}
