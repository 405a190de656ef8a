//! Per-component state carried across the blocks of a scan
//!
//! The data is extracted from a SOF header.

use crate::decoder::MAX_QT_TABLES;
use crate::errors::DecodeErrors;

/// Component data from the start of frame
#[derive(Clone)]
pub(crate) struct Components {
    /// The type of component that has the metadata below, can be Y, Cb or Cr
    pub component_id: ComponentID,
    /// Sub-sampling ratio of this component in the x-plane
    pub horizontal_sample: usize,
    /// Sub-sampling ratio of this component in the y-plane
    pub vertical_sample: usize,
    /// Quantization table number
    pub quantization_table_number: u8,
    /// Quantization table for this component, copied out of the DQT
    /// segment. Kept in zig-zag storage order, dequantization indexes it
    /// by the scan position.
    pub quantization_table: [u8; 64],
    /// DC huffman table position
    pub dc_huff_table: usize,
    /// AC huffman table position for this element
    pub ac_huff_table: usize,
    /// DC prediction for the component
    pub dc_pred: i32,
    /// Dequantized coefficients of the block being decoded
    pub dct_block: [i32; 64],
    /// Reconstructed 8x8 tile, row major
    pub pixels: [u8; 64],
}

impl Components {
    /// Create a new instance from three bytes from the start of frame
    pub fn from(a: [u8; 3]) -> Result<Components, DecodeErrors> {
        let component_id = match a[0] {
            1 => ComponentID::Y,
            2 => ComponentID::Cb,
            3 => ComponentID::Cr,
            r => {
                return Err(DecodeErrors::SofError(format!(
                    "Unknown component id found, {}, expected value between 1 and 3",
                    r
                )));
            }
        };

        let horizontal_sample = usize::from(a[1] >> 4);
        let vertical_sample = usize::from(a[1] & 0x0f);
        let quantization_table_number = a[2];

        if usize::from(quantization_table_number) >= MAX_QT_TABLES {
            return Err(DecodeErrors::SofError(format!(
                "Too large quantization table number {}, expected value between 0 and {}",
                quantization_table_number,
                MAX_QT_TABLES - 1
            )));
        }

        if horizontal_sample != 1 || vertical_sample != 1 {
            return Err(DecodeErrors::SofError(format!(
                "Sub-sampled images are not supported, component {:?} has {}:{} sampling",
                component_id, horizontal_sample, vertical_sample
            )));
        }

        info!(
            "Component ID:{:?}\tHS:{} VS:{} QT:{}",
            component_id, horizontal_sample, vertical_sample, quantization_table_number
        );

        Ok(Components {
            component_id,
            horizontal_sample,
            vertical_sample,
            quantization_table_number,
            // filled in once the frame header binds tables to components
            quantization_table: [0; 64],
            // these two are set by the scan header
            dc_huff_table: 0,
            ac_huff_table: 0,
            dc_pred: 0,
            dct_block: [0; 64],
            pixels: [0; 64],
        })
    }
}

/// Component ID's
#[derive(Copy, Debug, Clone, PartialEq, Eq)]
pub(crate) enum ComponentID {
    /// Luminance channel
    Y,
    /// Blue chrominance
    Cb,
    /// Red chrominance
    Cr,
}
