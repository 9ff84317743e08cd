//! Bit-level transport: MSB-first packing of code words into bytes and back.
//!
//! Decoders consume any `Iterator<Item = bool>` as their bit source, so [`BitReader`] is
//! only one possible source. A packed container is the bit count as a little-endian `u64`
//! followed by `ceil(bits / 8)` payload bytes; the count keeps padding bits away from the
//! decoder.

use bitvec::prelude::*;

use crate::compressor::{HuffmanError, Result};

const HEADER_LEN: usize = 8;

/// A code word, or any other run of bits, most significant bit first.
pub type CodeWord = BitVec<u8, Msb0>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitWriter {
    bits: BitVec<u8, Msb0>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_bits(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(bits);
        // padding after the last written bit must read as 0
        self.bits.set_uninitialized(false);
    }

    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Serializes the written bits into the packed container layout.
    pub fn to_container(&self) -> Vec<u8> {
        let bytes = self.as_bytes();
        let mut out = Vec::with_capacity(HEADER_LEN + bytes.len());
        out.extend_from_slice(&(self.bit_count() as u64).to_le_bytes());
        out.extend_from_slice(bytes);
        out
    }
}

/// Forward-only MSB-first reader over a byte slice that stops after `bit_count` bits.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    bits: &'a BitSlice<u8, Msb0>,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8], bit_count: usize) -> Result<Self> {
        let view = bytes.view_bits::<Msb0>();
        if bit_count > view.len() {
            return Err(HuffmanError::Container(format!(
                "{} bits requested from {} bytes",
                bit_count,
                bytes.len()
            )));
        }
        Ok(Self { bits: &view[..bit_count] })
    }

    /// Parses the packed container layout written by [`BitWriter::to_container`].
    pub fn from_container(data: &'a [u8]) -> Result<Self> {
        let Some((header, payload)) = data.split_first_chunk::<HEADER_LEN>() else {
            return Err(HuffmanError::Container(format!(
                "expected an {}-byte header, got {} bytes",
                HEADER_LEN,
                data.len()
            )));
        };
        let bit_count = usize::try_from(u64::from_le_bytes(*header))
            .map_err(|_| HuffmanError::Container("bit count does not fit in memory".to_string()))?;

        let expected = bit_count.div_ceil(8);
        if payload.len() != expected {
            return Err(HuffmanError::Container(format!(
                "header announces {} bits ({} bytes) but payload has {} bytes",
                bit_count,
                expected,
                payload.len()
            )));
        }
        Self::new(payload, bit_count)
    }

    pub fn remaining(&self) -> usize {
        self.bits.len()
    }
}

impl<'a> Iterator for BitReader<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let bits: &'a BitSlice<u8, Msb0> = self.bits;
        let (bit, rest) = bits.split_first()?;
        let bit = *bit;
        self.bits = rest;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

impl ExactSizeIterator for BitReader<'_> {}

/// Parses a `'0'`/`'1'` string into bits. Returns the offending character on failure.
pub fn parse_bit_string(bits: &str) -> core::result::Result<CodeWord, char> {
    bits.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(other),
        })
        .collect()
}

pub fn format_bit_string(bits: &BitSlice<u8, Msb0>) -> String {
    bits.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_packs_msb_first() {
        let mut w = BitWriter::new();
        w.push_bits(bits![u8, Msb0; 1, 0, 1]);
        assert_eq!(w.as_bytes(), &[0b1010_0000]);
        assert_eq!(w.bit_count(), 3);

        w.push_bits(bits![u8, Msb0; 1; 6]);
        assert_eq!(w.as_bytes(), &[0b1011_1111, 0b1000_0000]);
        assert_eq!(w.bit_count(), 9);

        w.push_bits(bits![u8, Msb0; 0]);
        assert_eq!(w.as_bytes(), &[0b1011_1111, 0b1000_0000]);
        assert_eq!(w.bit_count(), 10);
    }

    #[test]
    fn reader_stops_at_bit_count_not_byte_boundary() {
        let reader = BitReader::new(&[0b1100_0000], 3).unwrap();
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.collect::<Vec<_>>(), vec![true, true, false]);
    }

    #[test]
    fn reader_rejects_more_bits_than_bytes() {
        assert!(matches!(BitReader::new(&[0xff], 9), Err(HuffmanError::Container(_))));
    }

    #[test]
    fn container_layout() {
        let mut w = BitWriter::new();
        w.push_bits(bits![u8, Msb0; 0, 1, 1, 0, 1, 0, 0, 1, 1]);
        let packed = w.to_container();
        assert_eq!(&packed[..8], &9u64.to_le_bytes());
        assert_eq!(&packed[8..], &[0b0110_1001, 0b1000_0000]);

        let bits: Vec<bool> = BitReader::from_container(&packed).unwrap().collect();
        assert_eq!(bits, BitReader::new(w.as_bytes(), w.bit_count()).unwrap().collect::<Vec<_>>());
    }

    #[test]
    fn empty_container() {
        let packed = BitWriter::new().to_container();
        assert_eq!(packed, vec![0; 8]);
        assert_eq!(BitReader::from_container(&packed).unwrap().count(), 0);
    }

    #[test]
    fn container_errors() {
        assert!(matches!(BitReader::from_container(&[1, 2, 3]), Err(HuffmanError::Container(_))));

        let mut truncated = 20u64.to_le_bytes().to_vec();
        truncated.extend_from_slice(&[0xaa, 0xbb]);
        assert!(matches!(BitReader::from_container(&truncated), Err(HuffmanError::Container(_))));

        let mut trailing = 3u64.to_le_bytes().to_vec();
        trailing.extend_from_slice(&[0xaa, 0xbb]);
        assert!(matches!(BitReader::from_container(&trailing), Err(HuffmanError::Container(_))));
    }

    #[test]
    fn bit_strings() {
        assert_eq!(parse_bit_string("0110"), Ok(bitvec![u8, Msb0; 0, 1, 1, 0]));
        assert_eq!(parse_bit_string(""), Ok(CodeWord::new()));
        assert_eq!(parse_bit_string("01x1"), Err('x'));
        assert_eq!(format_bit_string(bits![u8, Msb0; 1, 0, 0]), "100");
    }
}
