use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::huffman::{
    Code,
    node::{Node, Weight},
};

if_tracing! {
    use tracing::{debug, info};
}

/// Occurrence counts for every byte value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.count(data);
        table
    }

    pub fn count(&mut self, data: &[u8]) {
        for &b in data {
            self.counts[b as usize] += 1;
        }
    }

    pub fn add(&mut self, symbol: u8, n: u64) {
        let slot = &mut self.counts[symbol as usize];
        *slot = slot.saturating_add(n);
    }

    /// Non-zero `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0..=u8::MAX).zip(self.counts.iter().copied()).filter(|&(_, n)| n != 0)
    }

    pub fn distinct(&self) -> usize {
        self.iter().count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Queue entry. Ordered by weight, then by the smallest symbol in the subtree, which is
/// unique per live subtree and makes the merge order fully deterministic.
struct Pending {
    weight: u64,
    tie_key: u8,
    node: Node,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so invert to pop the lightest entry first.
        (other.weight, other.tie_key).cmp(&(self.weight, self.tie_key))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Code {
    /// Builds a Huffman code by repeatedly merging the two lightest subtrees.
    ///
    /// Zero counts are skipped and a symbol listed more than once has its counts summed.
    /// No symbols gives an empty code, one symbol gives a tree that is a single leaf. The
    /// first subtree popped becomes the `0` branch.
    pub fn from_frequencies<I>(frequencies: I) -> Self
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = FrequencyTable::new();
        for (symbol, n) in frequencies {
            table.add(symbol, n);
        }
        Self::from_frequency_table(&table)
    }

    pub fn from_frequency_table(table: &FrequencyTable) -> Self {
        let mut heap: BinaryHeap<Pending> = table
            .iter()
            .map(|(symbol, n)| Pending {
                weight: n,
                tie_key: symbol,
                node: Node::leaf(symbol, Weight::Counted(n)),
            })
            .collect();

        if_tracing! {{
            debug!(target = "huffman", symbols = heap.len(), "building code from frequencies");
        }}

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            heap.push(Pending {
                weight: left.weight.saturating_add(right.weight),
                tie_key: left.tie_key.min(right.tie_key),
                node: Node::merge(left.node, right.node),
            });
        }

        let code = Code {
            root: heap.pop().map(|p| p.node),
        };

        if_tracing! {{
            info!(target = "huffman", height = code.root().map_or(0, Node::height), "code built from frequencies");
        }}

        code
    }
}
