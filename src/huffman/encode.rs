use bitvec::prelude::*;

use crate::{
    bits::{BitWriter, CodeWord},
    compressor::{HuffmanError, Result},
    huffman::Code,
};

if_tracing! {
    use tracing::debug;
}

/// Symbol to code word lookup derived from a [`Code`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Codebook {
    words: [Option<CodeWord>; 256],
}

impl Codebook {
    pub fn word(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.words[symbol as usize].as_deref()
    }
}

impl Code {
    /// Builds the encoder's lookup. The lone symbol of a single-leaf code gets the
    /// one-bit word `0`.
    pub fn codebook(&self) -> Codebook {
        let mut words: [Option<CodeWord>; 256] = core::array::from_fn(|_| None);
        if let Some(root) = self.root() {
            for (symbol, path) in root.leaves() {
                words[symbol as usize] = Some(if path.is_empty() { bitvec![u8, Msb0; 0] } else { path });
            }
        }
        Codebook { words }
    }

    /// Encodes `data` into a bit buffer.
    ///
    /// # Errors
    ///
    /// [`HuffmanError::EmptyInput`] when the code is empty and `data` is not,
    /// [`HuffmanError::UnknownSymbol`] for a byte the code does not cover.
    pub fn encode(&self, data: &[u8]) -> Result<BitWriter> {
        let mut writer = BitWriter::new();
        if data.is_empty() {
            return Ok(writer);
        }
        if self.is_empty() {
            return Err(HuffmanError::EmptyInput("encode"));
        }

        let codebook = self.codebook();
        for &symbol in data {
            let word = codebook.word(symbol).ok_or(HuffmanError::UnknownSymbol(symbol))?;
            writer.push_bits(word);
        }

        if_tracing! {{
            debug!(target = "huffman", input_len = data.len(), bits = writer.bit_count(), "encode complete");
        }}

        Ok(writer)
    }
}
