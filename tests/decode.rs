//! Decode scenarios over synthesized baseline streams.

use baseline_jpeg::{ColorSpace, Decoder};

mod common;

use common::{solid_mcu, BitWriter, JpegBuilder, QT_UNIT};

#[test]
fn single_pixel_grayscale() {
    // 1x1 image, one block with DC difference 1 and no AC
    let data = JpegBuilder::new()
        .dqt(0, &QT_UNIT)
        .standard_tables()
        .sof0(1, 1, 1)
        .sos(1)
        .entropy(&solid_mcu(&[1]))
        .eoi();

    let mut decoder = Decoder::new();
    let pixels = decoder.decode_buffer(&data).unwrap();

    // ((1 * 8 + 32) >> 6) + 128
    assert_eq!(pixels, vec![128]);
    assert_eq!(decoder.width(), 1);
    assert_eq!(decoder.height(), 1);
    assert_eq!(decoder.output_colorspace(), ColorSpace::GRAYSCALE);
}

#[test]
fn solid_mid_gray_block() {
    let data = JpegBuilder::new()
        .dqt(0, &QT_UNIT)
        .standard_tables()
        .sof0(8, 8, 1)
        .sos(1)
        .entropy(&solid_mcu(&[0]))
        .eoi();

    let pixels = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(pixels, vec![128; 64]);
}

#[test]
fn dc_level_shifts_are_exact() {
    // ((24 * 8 + 32) >> 6) + 128 = 131 and the arithmetic shift floors
    // negative values, ((-24 * 8 + 32) >> 6) + 128 = 125
    for (diff, value) in [(24, 131_u8), (-24, 125), (16, 130), (-16, 126)] {
        let data = JpegBuilder::new()
            .dqt(0, &QT_UNIT)
            .standard_tables()
            .sof0(8, 8, 1)
            .sos(1)
            .entropy(&solid_mcu(&[diff]))
            .eoi();

        let pixels = Decoder::new().decode_buffer(&data).unwrap();

        assert_eq!(pixels, vec![value; 64], "diff {}", diff);
    }
}

#[test]
fn solid_ycbcr_is_gray_rgb() {
    // Y=128, Cb=128, Cr=128 must come out as (128,128,128) everywhere
    let data = JpegBuilder::new()
        .dqt(0, &QT_UNIT)
        .standard_tables()
        .sof0(8, 8, 3)
        .sos(3)
        .entropy(&solid_mcu(&[0, 0, 0]))
        .eoi();

    let mut decoder = Decoder::new();
    let pixels = decoder.decode_buffer(&data).unwrap();

    assert_eq!(decoder.output_colorspace(), ColorSpace::RGB);
    assert_eq!(pixels, vec![128; 8 * 8 * 3]);
}

#[test]
fn restart_markers_reset_predictors() {
    // four MCUs separated by RST0..RST3 with interval 1; every MCU
    // carries the same +24 luma difference, so identical output proves
    // the predictors reset at each boundary
    let mcu = solid_mcu(&[24, 0, 0]);

    let data = JpegBuilder::new()
        .dqt(0, &QT_UNIT)
        .standard_tables()
        .sof0(16, 16, 3)
        .dri(1)
        .sos(3)
        .entropy(&mcu)
        .rst(0)
        .entropy(&mcu)
        .rst(1)
        .entropy(&mcu)
        .rst(2)
        .entropy(&mcu)
        .rst(3)
        .eoi();

    let pixels = Decoder::new().decode_buffer(&data).unwrap();

    // luma 131 with neutral chroma converts to gray 131
    assert_eq!(pixels, vec![131; 16 * 16 * 3]);
}

#[test]
fn odd_dimensions_are_clipped() {
    // 9x9 image needs four MCUs but the raster must hold exactly 81
    // pixels, padding never leaks
    let data = JpegBuilder::new()
        .dqt(0, &QT_UNIT)
        .standard_tables()
        .sof0(9, 9, 1)
        .sos(1)
        .entropy(&solid_mcu(&[0, 0, 0, 0]))
        .eoi();

    let mut decoder = Decoder::new();
    let pixels = decoder.decode_buffer(&data).unwrap();

    assert_eq!(decoder.info().unwrap().width, 9);
    assert_eq!(pixels, vec![128; 81]);
}

#[test]
fn stuffed_ff_is_entropy_data() {
    // the third block's EOB plus padding forms a 0xff entropy byte that
    // the builder stuffs as `ff 00`; a decoder mistaking it for a marker
    // cannot produce this raster
    let mut writer = BitWriter::new();
    // two flat blocks
    writer.dc_diff(0);
    writer.eob();
    writer.dc_diff(0);
    writer.eob();
    // one block with a horizontal ramp
    writer.dc_diff(1);
    writer.ac_small(3);
    writer.eob();

    let entropy = writer.finish();
    // the stuffed byte really is in the stream
    assert!(entropy.windows(2).any(|w| w[0] == 0xff && w[1] == 0x00));

    let data = JpegBuilder::new()
        .dqt(0, &[64; 64])
        .standard_tables()
        .sof0(24, 8, 1)
        .sos(1)
        .entropy(&entropy)
        .eoi();

    let pixels = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(pixels.len(), 24 * 8);

    for row in 0..8 {
        // the two flat blocks stay at mid gray
        assert_eq!(&pixels[row * 24..row * 24 + 16], &[128; 16][..]);
        // the ramp block swings high on the left, low on the right
        assert!((165..=172).contains(&pixels[row * 24 + 16]));
        assert!((99..=106).contains(&pixels[row * 24 + 23]));
    }
}

#[test]
fn trailing_fill_bytes_and_synthesized_bits() {
    // Stream A truncates the entropy data mid-block and follows it with
    // `ff ff ff d9`: the refill walks the padding, rewinds onto EOI and
    // completes the block from synthesized all-one bytes. Stream B is the
    // same block fully written out. Both must decode identically.
    let mut writer = BitWriter::new();
    writer.dc_diff(0);
    for _ in 0..4 {
        writer.ac_small(1);
    }
    writer.eob();

    let full = writer.finish();
    assert_eq!(full[0], 0x2a);

    let truncated = JpegBuilder::new()
        .dqt(0, &QT_UNIT)
        .standard_tables()
        .sof0(8, 8, 1)
        .sos(1)
        .entropy(&full[..1])
        .raw(&[0xff, 0xff])
        .eoi();

    let complete = JpegBuilder::new()
        .dqt(0, &QT_UNIT)
        .standard_tables()
        .sof0(8, 8, 1)
        .sos(1)
        .entropy(&full)
        .eoi();

    let pixels_a = Decoder::new().decode_buffer(&truncated).unwrap();
    let pixels_b = Decoder::new().decode_buffer(&complete).unwrap();

    assert_eq!(pixels_a, pixels_b);
}

#[test]
fn eoi_at_restart_boundary_ends_the_scan() {
    // three MCUs wide, restart interval 1, but the stream ends after the
    // second MCU: the decoded MCUs are flushed, the missing one is black
    let data = JpegBuilder::new()
        .dqt(0, &QT_UNIT)
        .standard_tables()
        .sof0(24, 8, 1)
        .dri(1)
        .sos(1)
        .entropy(&solid_mcu(&[24]))
        .rst(0)
        .entropy(&solid_mcu(&[24]))
        .eoi();

    let pixels = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(pixels.len(), 24 * 8);

    for row in 0..8 {
        assert_eq!(&pixels[row * 24..row * 24 + 16], &[131; 16][..]);
        assert_eq!(&pixels[row * 24 + 16..row * 24 + 24], &[0; 8][..]);
    }
}

#[test]
fn multiple_tables_in_one_segment() {
    // both Huffman tables in a single DHT segment and two quantization
    // tables in one DQT segment
    let data = JpegBuilder::new()
        .dqt_tables(&[(0, &QT_UNIT), (1, &[64; 64])])
        .standard_tables()
        .sof0(8, 8, 1)
        .sos(1)
        .entropy(&solid_mcu(&[0]))
        .eoi();

    let pixels = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(pixels, vec![128; 64]);
}

#[test]
fn info_is_none_before_decoding() {
    let decoder = Decoder::new();

    assert!(decoder.info().is_none());
}

#[test]
fn app_and_com_segments_are_skipped() {
    let mut builder = JpegBuilder::new();
    // a JFIF-looking APP0 and a comment, both ignored
    builder = builder.raw(&[0xff, 0xe0, 0x00, 0x07, b'J', b'F', b'I', b'F', 0x00]);
    builder = builder.raw(&[0xff, 0xfe, 0x00, 0x07, b'h', b'e', b'l', b'l', b'o']);

    let data = builder
        .dqt(0, &QT_UNIT)
        .standard_tables()
        .sof0(8, 8, 1)
        .sos(1)
        .entropy(&solid_mcu(&[0]))
        .eoi();

    let pixels = Decoder::new().decode_buffer(&data).unwrap();

    assert_eq!(pixels, vec![128; 64]);
}
