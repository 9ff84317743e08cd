use core::ops::Add;

use crate::bits::CodeWord;

/// Weight carried by a tree node.
///
/// Trees built from frequencies carry counts, trees rebuilt from a code table carry
/// [`Weight::Unweighted`] everywhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weight {
    Counted(u64),
    Unweighted,
}

impl Weight {
    pub const fn count(self) -> Option<u64> {
        match self {
            Self::Counted(n) => Some(n),
            Self::Unweighted => None,
        }
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        match (self, rhs) {
            (Self::Counted(a), Self::Counted(b)) => Self::Counted(a.saturating_add(b)),
            _ => Self::Unweighted,
        }
    }
}

/// A node of a Huffman code tree.
///
/// Children are optional because a code table does not have to describe a full tree:
/// `{"0", "10"}` is a valid prefix-free table whose `11` branch is simply absent.
/// Trees built from frequencies always have both children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: u8,
        weight: Weight,
    },
    Internal {
        weight: Weight,
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
    },
}

impl Node {
    pub const fn leaf(symbol: u8, weight: Weight) -> Self {
        Self::Leaf { symbol, weight }
    }

    /// Joins two subtrees under a new internal node; `left` takes the `0` branch.
    pub fn merge(left: Node, right: Node) -> Self {
        Self::Internal {
            weight: left.weight() + right.weight(),
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// Childless internal node used while inserting table paths.
    pub const fn placeholder() -> Self {
        Self::Internal {
            weight: Weight::Unweighted,
            left: None,
            right: None,
        }
    }

    pub const fn weight(&self) -> Weight {
        match self {
            Self::Leaf { weight, .. } | Self::Internal { weight, .. } => *weight,
        }
    }

    /// The child reached by following `bit` (`false` is left), if it exists.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { left, right, .. } => {
                if bit {
                    right.as_deref()
                } else {
                    left.as_deref()
                }
            }
        }
    }

    /// Every leaf with its root-to-leaf path, left before right.
    ///
    /// Iterative so that pathologically deep tables cannot overflow the stack.
    pub fn leaves(&self) -> Vec<(u8, CodeWord)> {
        let mut out = Vec::new();
        let mut stack: Vec<(&Node, CodeWord)> = vec![(self, CodeWord::new())];

        while let Some((node, path)) = stack.pop() {
            match node {
                Self::Leaf { symbol, .. } => out.push((*symbol, path)),
                Self::Internal { left, right, .. } => {
                    // pushed in reverse so the left subtree is visited first
                    if let Some(right) = right {
                        let mut p = path.clone();
                        p.push(true);
                        stack.push((right, p));
                    }
                    if let Some(left) = left {
                        let mut p = path;
                        p.push(false);
                        stack.push((left, p));
                    }
                }
            }
        }

        out
    }

    /// Length of the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.leaves().iter().map(|(_, path)| path.len()).max().unwrap_or(0)
    }

    /// Sum of `weight * depth` over all leaves, i.e. the encoded size in bits of the
    /// input the weights were counted from. `None` for unweighted trees.
    pub fn weighted_path_length(&self) -> Option<u64> {
        let mut total = 0u64;
        let mut stack = vec![(self, 0u64)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Self::Leaf { weight, .. } => total = total.saturating_add(weight.count()?.saturating_mul(depth)),
                Self::Internal { left, right, .. } => {
                    stack.extend(left.as_deref().map(|n| (n, depth + 1)));
                    stack.extend(right.as_deref().map(|n| (n, depth + 1)));
                }
            }
        }
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitvec::prelude::*;

    fn sample() -> Node {
        Node::merge(
            Node::leaf(b'a', Weight::Counted(5)),
            Node::merge(Node::leaf(b'b', Weight::Counted(2)), Node::leaf(b'c', Weight::Counted(1))),
        )
    }

    #[test]
    fn merge_sums_weights() {
        assert_eq!(sample().weight(), Weight::Counted(8));
        let mixed = Node::merge(Node::leaf(0, Weight::Counted(3)), Node::leaf(1, Weight::Unweighted));
        assert_eq!(mixed.weight(), Weight::Unweighted);
    }

    #[test]
    fn leaves_are_listed_left_first() {
        let leaves = sample().leaves();
        assert_eq!(
            leaves,
            vec![
                (b'a', bitvec![u8, Msb0; 0]),
                (b'b', bitvec![u8, Msb0; 1, 0]),
                (b'c', bitvec![u8, Msb0; 1, 1]),
            ]
        );
    }

    #[test]
    fn child_lookup() {
        let tree = sample();
        assert!(matches!(tree.child(false), Some(Node::Leaf { symbol: b'a', .. })));
        assert!(matches!(tree.child(true), Some(Node::Internal { .. })));
        assert!(Node::placeholder().child(true).is_none());
        assert!(Node::leaf(1, Weight::Unweighted).child(false).is_none());
    }

    #[test]
    fn height_and_weighted_path_length() {
        let tree = sample();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.weighted_path_length(), Some(5 + 2 * 2 + 2));
        assert_eq!(Node::leaf(7, Weight::Counted(9)).weighted_path_length(), Some(0));
        assert_eq!(Node::merge(Node::leaf(0, Weight::Unweighted), Node::leaf(1, Weight::Unweighted)).weighted_path_length(), None);
    }
}
