//! Miscellaneous shared tables and types

/// Start of another frame
pub(crate) const START_OF_FRAME_EXT_SEQ: u16 = 0xffc1;
/// Start of progressive DCT encoding
pub(crate) const START_OF_FRAME_PROG_DCT: u16 = 0xffc2;
/// Start of Lossless sequential Huffman coding
pub(crate) const START_OF_FRAME_LOS_SEQ: u16 = 0xffc3;
/// Start of extended sequential DCT arithmetic coding
pub(crate) const START_OF_FRAME_EXT_AR: u16 = 0xffc9;
/// Start of Progressive DCT arithmetic coding
pub(crate) const START_OF_FRAME_PROG_DCT_AR: u16 = 0xffca;
/// Start of Lossless sequential Arithmetic coding
pub(crate) const START_OF_FRAME_LOS_SEQ_AR: u16 = 0xffcb;

/// Undo run length encoding of coefficients by placing them in natural order
///
/// Maps a zig-zag scan position to its row-major position in an 8x8 block.
#[rustfmt::skip]
pub const UN_ZIGZAG: [usize; 64] = [
    0,  1,  8,  16, 9,  2,  3, 10,
    17, 24, 32, 25, 18, 11, 4,  5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13, 6,  7,  14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

/// Color spaces the decoder works with
///
/// The input colorspace is set from the number of components in the frame
/// header, the output one follows from it (grayscale stays grayscale,
/// YCbCr becomes RGB).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum ColorSpace {
    /// Red,Green,Blue
    RGB,
    /// Monochrome
    GRAYSCALE,
    /// YCbCr, (also known as YUV)
    YCbCr,
}

impl ColorSpace {
    /// Number of channels in this color space
    #[must_use]
    pub const fn num_components(self) -> usize {
        match self {
            Self::RGB | Self::YCbCr => 3,
            Self::GRAYSCALE => 1,
        }
    }
}

impl Default for ColorSpace {
    /// Set default colorspace as RGB
    ///
    /// This is the common behaviour for all (sane) JPEG images
    fn default() -> Self {
        ColorSpace::RGB
    }
}

#[cfg(test)]
mod tests {
    use super::UN_ZIGZAG;

    #[test]
    fn un_zigzag_is_a_permutation() {
        let mut seen = [false; 64];

        for &position in &UN_ZIGZAG {
            assert!(!seen[position]);
            seen[position] = true;
        }
    }

    #[test]
    fn zigzag_round_trip_is_identity() {
        // forward scan order derived from the inverse one
        let mut zigzag = [0_usize; 64];

        for (scan_pos, &natural_pos) in UN_ZIGZAG.iter().enumerate() {
            zigzag[natural_pos] = scan_pos;
        }

        let block: Vec<usize> = (0..64).collect();
        let mut scanned = [0_usize; 64];
        let mut restored = [0_usize; 64];

        for i in 0..64 {
            scanned[zigzag[i]] = block[i];
        }

        for i in 0..64 {
            restored[UN_ZIGZAG[i]] = scanned[i];
        }

        assert_eq!(&restored[..], &block[..]);
    }
}
