//! Code table persistence.
//!
//! The text form is line oriented, two lines per symbol:
//!
//! ```text
//! 102
//! 0
//! 99
//! 100
//! ```
//!
//! the decimal symbol value, then its code word as `0`/`1` characters. The code word line
//! is empty only for a code with a single symbol. Readers accept records in any order.
//! The JSON form carries the same records and goes through the same validation.

use core::fmt;

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    bits::{format_bit_string, parse_bit_string},
    compressor::{HuffmanError, Result},
    huffman::{
        Code,
        node::{Node, Weight},
    },
};

if_tracing! {
    use tracing::debug;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableEntry {
    pub symbol: u8,
    pub bits: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
    pub entries: Vec<TableEntry>,
}

impl CodeTable {
    /// Parses the two-lines-per-record text form.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        let mut lines = text.lines().enumerate();

        while let Some((i, symbol_line)) = lines.next() {
            let line_no = i + 1;
            let symbol = symbol_line
                .trim()
                .parse::<u8>()
                .map_err(|e| HuffmanError::MalformedTable(format!("line {}: {:?} is not a symbol in 0..=255: {}", line_no, symbol_line, e)))?;

            let Some((_, bits)) = lines.next() else {
                return Err(HuffmanError::MalformedTable(format!(
                    "line {}: symbol {} has no code word line",
                    line_no, symbol
                )));
            };
            if let Err(c) = parse_bit_string(bits) {
                return Err(HuffmanError::MalformedTable(format!(
                    "line {}: unexpected character {:?} in code word {:?}",
                    line_no + 1,
                    c,
                    bits
                )));
            }

            entries.push(TableEntry {
                symbol,
                bits: bits.to_string(),
            });
        }

        if_tracing! {{
            debug!(target = "huffman", entries = entries.len(), "parsed text code table");
        }}

        Ok(Self { entries })
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| HuffmanError::MalformedTable(format!("invalid JSON table: {}", e)))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry.symbol)?;
            writeln!(f, "{}", entry.bits)?;
        }
        Ok(())
    }
}

impl Code {
    /// Lists every leaf with its code word, in depth-first left-before-right order.
    ///
    /// Serializing the same code always yields the same table.
    pub fn to_table(&self) -> CodeTable {
        let entries = self
            .root()
            .map(Node::leaves)
            .unwrap_or_default()
            .into_iter()
            .map(|(symbol, path)| TableEntry {
                symbol,
                bits: format_bit_string(&path),
            })
            .collect();
        CodeTable { entries }
    }

    /// Rebuilds a code by inserting one root-to-leaf path per entry.
    ///
    /// The resulting tree is unweighted and does not depend on entry order.
    pub fn from_table(table: &CodeTable) -> Result<Self> {
        let mut root = None;
        let mut seen = [false; 256];

        for entry in &table.entries {
            if core::mem::replace(&mut seen[entry.symbol as usize], true) {
                return Err(HuffmanError::MalformedTable(format!("symbol {} is listed more than once", entry.symbol)));
            }
            let path = parse_bit_string(&entry.bits).map_err(|c| {
                HuffmanError::MalformedTable(format!(
                    "unexpected character {:?} in code word {:?} of symbol {}",
                    c, entry.bits, entry.symbol
                ))
            })?;
            insert_path(&mut root, entry.symbol, &path)
                .map_err(|reason| HuffmanError::MalformedTable(format!("symbol {} ({:?}): {}", entry.symbol, entry.bits, reason)))?;
        }

        if_tracing! {{
            debug!(target = "huffman", entries = table.entries.len(), "code rebuilt from table");
        }}

        Ok(Code { root })
    }

    pub fn from_table_text(text: &str) -> Result<Self> {
        Self::from_table(&CodeTable::parse(text)?)
    }
}

fn insert_path(root: &mut Option<Node>, symbol: u8, path: &BitSlice<u8, Msb0>) -> core::result::Result<(), String> {
    let leaf = Node::leaf(symbol, Weight::Unweighted);

    let Some((last, steps)) = path.split_last() else {
        if root.is_some() {
            return Err("an empty code word needs the table to hold a single symbol".to_string());
        }
        *root = Some(leaf);
        return Ok(());
    };

    let last = *last;
    let mut node = root.get_or_insert_with(Node::placeholder);
    for bit in steps.iter().by_vals() {
        let slot = match node {
            Node::Internal { left, right, .. } => {
                if bit {
                    right
                } else {
                    left
                }
            }
            Node::Leaf { symbol: other, .. } => return Err(format!("code word runs through the leaf of symbol {}", other)),
        };
        node = slot.get_or_insert_with(|| Box::new(Node::placeholder())).as_mut();
    }

    let slot = match node {
        Node::Internal { left, right, .. } => {
            if last {
                right
            } else {
                left
            }
        }
        Node::Leaf { symbol: other, .. } => return Err(format!("code word runs through the leaf of symbol {}", other)),
    };
    match slot.as_deref() {
        Some(Node::Leaf { symbol: other, .. }) => return Err(format!("same code word as symbol {}", other)),
        Some(Node::Internal { .. }) => return Err("code word is a prefix of other code words".to_string()),
        None => {}
    }
    *slot = Some(Box::new(leaf));
    Ok(())
}
