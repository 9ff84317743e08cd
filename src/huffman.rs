//! Huffman codes: construction from frequencies, the persisted code table, and the
//! encoder/decoder pair built on top of the tree.

use core::fmt::Display;

use anyhow::{Context, anyhow};

use crate::{
    bits::BitReader,
    compressor::{Compressor, HuffmanError},
};

pub mod build;
pub mod decode;
pub mod encode;
pub mod node;
pub mod table;

pub use self::{build::FrequencyTable, node::Node, table::CodeTable};

if_tracing! {
    use tracing::info;
}

/// A prefix-free binary code, stored as the tree that assigns it.
///
/// Built once, either [from frequencies](Code::from_frequencies) or
/// [from a code table](Code::from_table), and read-only afterwards.
/// A code built from zero symbols has no root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Code {
    root: Option<Node>,
}

impl Code {
    pub const fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn symbol_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.leaves().len())
    }
}

/// Self-contained Huffman compressor: the code table travels in front of the data.
///
/// Layout: table text length as a little-endian `u64`, the table in its text form, then the
/// packed bit container.
#[derive(Clone, Copy, Debug, Default)]
pub struct HuffmanCoding;

impl Compressor for HuffmanCoding {
    fn compress_bytes(&mut self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        let code = Code::from_frequency_table(&FrequencyTable::from_bytes(data));
        let table = code.to_table().to_string();
        let bits = code.encode(data).context("encoding with a code built from the same data")?;
        let container = bits.to_container();

        let mut out = Vec::with_capacity(8 + table.len() + container.len());
        out.extend_from_slice(&(table.len() as u64).to_le_bytes());
        out.extend_from_slice(table.as_bytes());
        out.extend_from_slice(&container);

        if_tracing! {{
            info!(target = "huffman", input_len = data.len(), table_len = table.len(), output_len = out.len(), "huffman compress finished");
        }}
        Ok(out)
    }

    fn decompress_bytes(&mut self, data: &[u8]) -> anyhow::Result<Vec<u8>> {
        let (header, rest) = data
            .split_first_chunk::<8>()
            .ok_or_else(|| anyhow!(HuffmanError::Container("missing table length".to_string())))?;
        let table_len = usize::try_from(u64::from_le_bytes(*header))?;
        if table_len > rest.len() {
            return Err(anyhow!(HuffmanError::Container(format!(
                "table length {} exceeds remaining {} bytes",
                table_len,
                rest.len()
            ))));
        }
        let (table, container) = rest.split_at(table_len);

        let table = core::str::from_utf8(table).context("code table is not UTF-8")?;
        let code = Code::from_table_text(table)?;
        let out = code.decode(BitReader::from_container(container)?)?;

        if_tracing! {{
            info!(target = "huffman", input_len = data.len(), output_len = out.len(), "huffman decompress finished");
        }}
        Ok(out)
    }

    fn compressor_name(&self) -> String {
        self.to_string()
    }
}

impl Display for HuffmanCoding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Huffman Coding")
    }
}
