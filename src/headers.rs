//! Decode JPEG markers/segments
//!
//! This file deals with decoding header information in a JPEG file
//!
//! A good guide on markers can be found [here](http://vip.sugovica.hu/Sardi/kepnezo/JPEG%20File%20Layout%20and%20Format.htm)

use crate::bitstream::BitStream;
use crate::components::Components;
use crate::decoder::{Decoder, MAX_DIMENSIONS, MAX_HUFFMAN_TABLES, MAX_QT_TABLES};
use crate::errors::DecodeErrors;
use crate::huffman::HuffmanTable;
use crate::misc::ColorSpace;

/// **B.2.4.2 Huffman table-specification syntax**
#[allow(clippy::similar_names)]
pub(crate) fn parse_huffman(
    decoder: &mut Decoder,
    stream: &mut BitStream,
) -> Result<(), DecodeErrors> {
    // Read the length of the Huffman table
    let dht_length = stream.next_word().map_err(|_| {
        DecodeErrors::HuffmanDecode("Could not read Huffman length from image".to_string())
    })?;

    // how much have we read
    let mut length_read: u16 = 2;

    // A single DHT marker may contain multiple Huffman Tables.
    while length_read < dht_length {
        // HT information
        let ht_info = stream.next_byte()?;

        // fifth bit indicates whether the table is DC or AC type
        let is_ac = (ht_info >> 4) & 0x01 == 1;

        // low nibble is the table slot
        let index = usize::from(ht_info & 0x0f);

        if index >= MAX_HUFFMAN_TABLES {
            return Err(DecodeErrors::HuffmanDecode(format!(
                "Too large Huffman table slot {}, expected value between 0 and {}",
                index,
                MAX_HUFFMAN_TABLES - 1
            )));
        }

        // read the number of symbols for every code length
        let mut num_symbols = [0_u8; 16];

        for count in &mut num_symbols {
            *count = stream.next_byte()?;
        }

        let symbols_sum: u16 = num_symbols.iter().map(|f| u16::from(*f)).sum();

        if symbols_sum > 255 {
            return Err(DecodeErrors::HuffmanDecode(
                "Encountered Huffman table with excessive length in DHT".to_string(),
            ));
        }

        // the symbols, in increasing code length
        let mut symbols = vec![0_u8; usize::from(symbols_sum)];

        for symbol in &mut symbols {
            *symbol = stream.next_byte()?;
        }

        length_read += 17 + symbols_sum;

        debug!(
            "DHT {} table, slot:{} symbols:{}",
            if is_ac { "AC" } else { "DC" },
            index,
            symbols_sum
        );

        let table = HuffmanTable::new(&num_symbols, &symbols)?;

        if is_ac {
            decoder.ac_huffman_tables[index] = Some(table);
        } else {
            decoder.dc_huffman_tables[index] = Some(table);
        }
    }

    Ok(())
}

/// **B.2.4.1 Quantization table-specification syntax**
pub(crate) fn parse_dqt(decoder: &mut Decoder, stream: &mut BitStream) -> Result<(), DecodeErrors> {
    let qt_length = stream
        .next_word()
        .map_err(|_| DecodeErrors::DqtError("Could not read DQT length".to_string()))?;

    let mut length_read: u16 = 2;

    // A single DQT header may have multiple QT's
    while length_read < qt_length {
        let qt_info = stream.next_byte()?;

        // 0 = 8 bit, 1 = 16 bit
        let precision = usize::from(qt_info >> 4);

        // low nibble is the table slot
        let table_position = usize::from(qt_info & 0x0f);

        if precision != 0 {
            return Err(DecodeErrors::DqtError(format!(
                "Expected QT precision of 0 (8 bit), found {}",
                precision
            )));
        }

        if table_position >= MAX_QT_TABLES {
            return Err(DecodeErrors::DqtError(format!(
                "Too large QT slot {}, expected value between 0 and {}",
                table_position,
                MAX_QT_TABLES - 1
            )));
        }

        // The table stays in zig-zag storage order, dequantization indexes
        // it by the scan position.
        let mut qt_values = [0_u8; 64];

        for value in &mut qt_values {
            *value = stream.next_byte()?;
        }

        debug!("DQT precision:{} id:{}", precision, table_position);

        decoder.qt_tables[table_position] = Some(qt_values);

        length_read += 65;
    }

    Ok(())
}

/// Section: `B.2.2 Frame header syntax`
pub(crate) fn parse_start_of_frame(
    decoder: &mut Decoder,
    stream: &mut BitStream,
) -> Result<(), DecodeErrors> {
    // Get length of the frame header
    let length = stream
        .next_word()
        .map_err(|_| DecodeErrors::SofError("Cannot read SOF length, exhausted data".to_string()))?;

    // usually 8, but can be 12 and 16, we only support 8
    let dt_precision = stream.next_byte()?;

    if dt_precision != 8 {
        return Err(DecodeErrors::SofError(format!(
            "The library can only parse 8-bit images, the image has {} bits of precision",
            dt_precision
        )));
    }

    let img_height = stream.next_word()?;
    let img_width = stream.next_word()?;

    if img_width == 0 || img_height == 0 {
        return Err(DecodeErrors::ZeroError);
    }

    let dimensions = usize::from(img_width) * usize::from(img_height);

    if dimensions > MAX_DIMENSIONS {
        return Err(DecodeErrors::LargeDimensions(dimensions));
    }

    decoder.info.set_height(img_height);
    decoder.info.set_width(img_width);

    // Number of components for the image
    let num_components = stream.next_byte()?;

    if num_components != 1 && num_components != 3 {
        return Err(DecodeErrors::SofError(format!(
            "Expected 1 or 3 components in the frame header, found {}",
            num_components
        )));
    }

    // length should match the component count
    if length != u16::from(8 + 3 * num_components) {
        return Err(DecodeErrors::SofError(format!(
            "Length of start of frame differs from expected {}, value is {}",
            u16::from(8 + 3 * num_components),
            length
        )));
    }

    decoder.info.components = num_components;

    let mut components = Vec::with_capacity(usize::from(num_components));
    let mut temp = [0; 3];

    for _ in 0..num_components {
        // read 3 bytes for each component
        for byte in &mut temp {
            *byte = stream.next_byte()?;
        }

        let mut component = Components::from(temp)?;

        // Copy the quantization table into the component so it cannot
        // outlive the input buffer the DQT segment was read from.
        let qt_table = decoder.qt_tables[usize::from(component.quantization_table_number)]
            .as_ref()
            .ok_or_else(|| {
                DecodeErrors::DqtError(format!(
                    "No quantization table for component {:?}",
                    component.component_id
                ))
            })?;

        component.quantization_table = *qt_table;

        components.push(component);
    }

    // Every sampling factor is 1, so MCUs are a single 8x8 block per
    // component.
    decoder.mcu_width = 8;
    decoder.mcu_height = 8;
    decoder.mcu_x = (usize::from(img_width) + decoder.mcu_width - 1) / decoder.mcu_width;
    decoder.mcu_y = (usize::from(img_height) + decoder.mcu_height - 1) / decoder.mcu_height;

    if num_components == 1 {
        decoder.input_colorspace = ColorSpace::GRAYSCALE;
        decoder.output_colorspace = ColorSpace::GRAYSCALE;
    } else {
        decoder.input_colorspace = ColorSpace::YCbCr;
        decoder.output_colorspace = ColorSpace::RGB;
    }

    // One MCU row of assembled output plus the final raster.
    let out_components = decoder.output_colorspace.num_components();

    decoder.scan_out = vec![0; usize::from(img_width) * decoder.mcu_height * out_components];
    decoder.pixels = vec![0; dimensions * out_components];

    info!(
        "Baseline DCT {}x{}, {} component(s), {}x{} MCUs",
        img_width, img_height, num_components, decoder.mcu_x, decoder.mcu_y
    );

    decoder.components = components;

    Ok(())
}

/// Parse a start of scan header
pub(crate) fn parse_sos(decoder: &mut Decoder, stream: &mut BitStream) -> Result<(), DecodeErrors> {
    // Scan header length
    let ls = stream.next_word()?;

    // Number of image components in scan
    let ns = stream.next_byte()?;

    if ls != 6 + 2 * u16::from(ns) {
        return Err(DecodeErrors::SosError(
            "Bad SOS length, corrupt JPEG".to_string(),
        ));
    }

    if usize::from(ns) != decoder.components.len() {
        return Err(DecodeErrors::SosError(format!(
            "Scan has {} components, the frame declared {}",
            ns,
            decoder.components.len()
        )));
    }

    for i in 0..usize::from(ns) {
        let component_id = stream.next_byte()?;

        // top nibble selects the DC table, the full low nibble the AC one
        let tables = stream.next_byte()?;

        let dc_table = usize::from(tables >> 4);
        let ac_table = usize::from(tables & 0x0f);

        if dc_table >= MAX_HUFFMAN_TABLES || ac_table >= MAX_HUFFMAN_TABLES {
            return Err(DecodeErrors::SosError(format!(
                "Huffman table out of range in scan header, dc:{} ac:{}",
                dc_table, ac_table
            )));
        }

        decoder.components[i].dc_huff_table = dc_table;
        decoder.components[i].ac_huff_table = ac_table;

        debug!("Scan component {}: dc:{} ac:{}", component_id, dc_table, ac_table);
    }

    // spectral selection and successive approximation; baseline fixes the
    // spectral band to 0..63 and we only check the end of it
    let spec_start = stream.next_byte()?;
    let spec_end = stream.next_byte()?;
    let approximation = stream.next_byte()?;

    if spec_end != 63 {
        return Err(DecodeErrors::SosError(format!(
            "Expected end of spectral selection of 63 for baseline, found {}",
            spec_end
        )));
    }

    trace!(
        "SOS ss:{} se:{} ah/al:{:#04x}",
        spec_start,
        spec_end,
        approximation
    );

    Ok(())
}

/// Section `B.2.4.4 Restart interval definition syntax`
pub(crate) fn parse_dri(decoder: &mut Decoder, stream: &mut BitStream) -> Result<(), DecodeErrors> {
    let length = stream.next_word()?;

    if length != 4 {
        return Err(DecodeErrors::Format(
            "Bad DRI length, corrupt JPEG".to_string(),
        ));
    }

    let interval = usize::from(stream.next_word()?);

    info!("Restart interval: {} MCUs", interval);

    decoder.restart_interval = interval;
    decoder.todo = interval;
    decoder.next_restart = 0;

    Ok(())
}
