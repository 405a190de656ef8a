//! Implements routines to decode the entropy coded segment of a scan
//!
//! Blocks are decoded and emitted in strict raster MCU order, one block
//! per component per MCU since nothing is sub-sampled. A component's DC
//! predictor persists across MCUs within a restart interval and resets
//! at every restart boundary.

use std::cmp::min;

use crate::bitstream::BitStream;
use crate::color_convert::{grayscale_to_scratch, ycbcr_to_rgb_scratch};
use crate::decoder::Decoder;
use crate::errors::DecodeErrors;
use crate::idct::idct_block;
use crate::misc::ColorSpace;

impl Decoder {
    /// Run the MCU loop of a baseline scan, filling the output raster.
    pub(crate) fn decode_mcu_rows(&mut self, stream: &mut BitStream) -> Result<(), DecodeErrors> {
        // predictors start at zero for every scan
        self.components.iter_mut().for_each(|c| c.dc_pred = 0);

        if self.restart_interval != 0 {
            self.todo = self.restart_interval;
            self.next_restart = 0;
        }

        let components_in_scan = self.input_colorspace.num_components();
        let mut terminated = false;

        for mcu_y in 0..self.mcu_y {
            // MCUs of the final row that EOI cut off stay black instead of
            // repeating the previous row
            self.scan_out.fill(0);

            for mcu_x in 0..self.mcu_x {
                for position in 0..components_in_scan {
                    self.decode_block(stream, position)?;
                }

                self.assemble_mcu(mcu_x);

                if self.restart_interval != 0 {
                    self.todo -= 1;

                    if self.todo == 0 && self.handle_restart(stream)? {
                        terminated = true;
                        break;
                    }
                }
            }

            // partially filled rows are flushed too, clipped to the image
            // height like any other
            self.flush_scan_row(mcu_y);

            if terminated {
                debug!("EOI inside scan, wrapping up after a partial MCU row");
                break;
            }
        }

        // pending pad bits are not part of whatever marker follows
        stream.reset();

        Ok(())
    }

    /// Decode one component's block: entropy decode + dequantize, then the
    /// inverse transform into the component's pixel tile.
    fn decode_block(&mut self, stream: &mut BitStream, position: usize) -> Result<(), DecodeErrors> {
        let component = &mut self.components[position];

        let dc_table = self.dc_huffman_tables[component.dc_huff_table]
            .as_ref()
            .ok_or_else(|| {
                DecodeErrors::HuffmanDecode(format!(
                    "No DC table for component {:?}",
                    component.component_id
                ))
            })?;

        let ac_table = self.ac_huffman_tables[component.ac_huff_table]
            .as_ref()
            .ok_or_else(|| {
                DecodeErrors::HuffmanDecode(format!(
                    "No AC table for component {:?}",
                    component.component_id
                ))
            })?;

        stream.decode_block(
            dc_table,
            ac_table,
            &component.quantization_table,
            &mut component.dct_block,
            &mut component.dc_pred,
        )?;

        idct_block(&mut component.dct_block, &mut component.pixels);

        Ok(())
    }

    /// Write the decoded tiles of the current MCU into the scratch row.
    fn assemble_mcu(&mut self, mcu_x: usize) {
        let width = usize::from(self.info.width);

        if self.output_colorspace == ColorSpace::GRAYSCALE {
            grayscale_to_scratch(&self.components[0].pixels, &mut self.scan_out, mcu_x, width);
        } else {
            ycbcr_to_rgb_scratch(
                &self.components[0].pixels,
                &self.components[1].pixels,
                &self.components[2].pixels,
                &mut self.scan_out,
                mcu_x,
                width,
            );
        }
    }

    /// Consume the restart marker that is due, resetting predictors.
    ///
    /// Returns `Ok(true)` when the scan ended early on EOI instead.
    fn handle_restart(&mut self, stream: &mut BitStream) -> Result<bool, DecodeErrors> {
        stream.reset();

        let marker = stream.next_word()?;

        if marker == 0xffd9 {
            // EOI where a restart marker was due, end the scan and leave
            // the marker in place for the top level loop
            stream.rewind(2);

            return Ok(true);
        }

        if (marker & 0xfff8) != 0xffd0 || (marker & 0x7) != u16::from(self.next_restart) {
            return Err(DecodeErrors::MCUError(format!(
                "Expected RST{} marker at offset {}, found {:#06x}",
                self.next_restart,
                stream.get_offset() - 2,
                marker
            )));
        }

        trace!("RST{} at offset {}", marker & 0x7, stream.get_offset() - 2);

        self.next_restart = (self.next_restart + 1) & 7;
        self.todo = self.restart_interval;

        // restart boundaries reset every DC prediction
        self.components.iter_mut().for_each(|c| c.dc_pred = 0);

        Ok(false)
    }

    /// Copy the scratch row into the raster, clipped to the image height.
    fn flush_scan_row(&mut self, mcu_y: usize) {
        let width = usize::from(self.info.width);
        let height = usize::from(self.info.height);

        let stride = width * self.output_colorspace.num_components();
        let rows = min(self.mcu_height, height - mcu_y * self.mcu_height);
        let start = mcu_y * self.mcu_height * stride;

        self.pixels[start..start + rows * stride]
            .copy_from_slice(&self.scan_out[..rows * stride]);
    }
}
