//! Huffman table construction and symbol lookup
//!
//! Codes are the canonical JPEG ones (ITU T.81 annex C): the first code of
//! length one is zero, every code is the previous one plus one, and moving
//! to a longer length shifts the running value left once. Lookup walks the
//! lengths shortest first, which is cheap because baseline tables keep few
//! codes per length.

use crate::bitstream::BitStream;
use crate::errors::DecodeErrors;

/// Longest code length the standard allows.
pub(crate) const MAX_CODE_LENGTH: usize = 16;

/// A single DC or AC Huffman decode table.
pub(crate) struct HuffmanTable {
    /// `(code value, symbol)` pairs for every code length, in transmit
    /// order. Index 0 holds the one bit codes.
    codes: [Vec<(u16, u8)>; MAX_CODE_LENGTH],
}

impl HuffmanTable {
    /// Build a table from the 16 per-length counts and the symbol list of
    /// a DHT segment.
    ///
    /// # Errors
    /// Counts that make the code set overflow a length, i.e. a table that
    /// cannot be prefix-free.
    pub fn new(counts: &[u8; 16], symbols: &[u8]) -> Result<HuffmanTable, DecodeErrors> {
        let mut codes: [Vec<(u16, u8)>; MAX_CODE_LENGTH] = Default::default();

        let mut code: u32 = 0;
        let mut read = 0;

        for (length, &count) in counts.iter().enumerate() {
            let list = &mut codes[length];
            list.reserve(usize::from(count));

            for _ in 0..count {
                // a canonical code reaching 2^length cannot be represented
                // in `length` bits, the counts are broken
                if code >= 1 << (length + 1) {
                    return Err(DecodeErrors::HuffmanDecode(format!(
                        "Huffman counts are not prefix-free, code overflow at length {}",
                        length + 1
                    )));
                }

                list.push((code as u16, symbols[read]));
                code += 1;
                read += 1;
            }

            code <<= 1;
        }

        Ok(HuffmanTable { codes })
    }

    /// Decode one variable length code from the stream, returning its
    /// symbol.
    ///
    /// # Errors
    /// No code of any length matches the next 16 bits.
    pub fn decode_symbol(&self, stream: &mut BitStream) -> Result<u8, DecodeErrors> {
        for length in 1..=MAX_CODE_LENGTH {
            let candidate = stream.peek_bits(length as u8)?;

            for &(code, symbol) in &self.codes[length - 1] {
                if code == candidate {
                    stream.drop_bits(length as u8);

                    return Ok(symbol);
                }
            }
        }

        Err(DecodeErrors::HuffmanDecode(format!(
            "No Huffman code matches the next 16 bits near offset {}",
            stream.get_offset()
        )))
    }
}
