//! Huffman tree construction and code assignment.
//!
//! # Construction
//!
//! The builder repeatedly removes the two lightest nodes from the working
//! set, merges them under a new internal node and puts the merge back, until
//! a single root remains. The node removed first becomes the one-branch, the
//! second the zero-branch.
//!
//! Equal counts are ordered by insertion sequence: leaves in the order they
//! are supplied (ascending code point when built from a [`FrequencyTable`]),
//! merged nodes after everything inserted before them. This is the order a
//! stable ascending sort with the merge appended at the end would produce,
//! kept in a binary heap so each merge costs O(log n).
//!
//! # Codes
//!
//! Codes are built by prepending: stepping into the one-branch prepends `'1'`
//! to the accumulated code, the zero-branch prepends `'0'`. The bit nearest
//! the root is therefore the *last* character of a code string, which is the
//! order the message decoder consumes bits in.
//!
//! A tree of a single distinct symbol is a lone leaf with the empty code.

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;

/// A node of the Huffman tree.
///
/// Every node carries a `code` filled in by [`HuffmanTree::assign_codes`].
/// Codes are not persisted; a tree read back from a file has empty codes
/// until they are assigned again.
#[derive(Debug, Clone)]
pub enum Node {
    Leaf {
        symbol: char,
        count: u64,
        code: String,
    },
    Internal {
        count: u64,
        code: String,
        /// Selected by bit `'1'`
        one: Box<Node>,
        /// Selected by bit `'0'`
        zero: Box<Node>,
    },
}

impl Node {
    /// Create a leaf with no code assigned yet.
    pub fn leaf(symbol: char, count: u64) -> Self {
        Node::Leaf {
            symbol,
            count,
            code: String::new(),
        }
    }

    /// Merge two subtrees; the count is the sum of both.
    pub fn internal(one: Node, zero: Node) -> Self {
        Node::Internal {
            count: one.count() + zero.count(),
            code: String::new(),
            one: Box::new(one),
            zero: Box::new(zero),
        }
    }

    pub fn count(&self) -> u64 {
        match self {
            Node::Leaf { count, .. } | Node::Internal { count, .. } => *count,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Node::Leaf { code, .. } | Node::Internal { code, .. } => code,
        }
    }

    /// The leaf's symbol, or `None` for internal nodes.
    pub fn symbol(&self) -> Option<char> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Child selected by `bit`, or `None` at a leaf.
    pub fn child(&self, bit: bool) -> Option<&Node> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { one, zero, .. } => Some(if bit { one } else { zero }),
        }
    }

    fn assign_codes(&mut self, accumulated: String) {
        match self {
            Node::Leaf { code, .. } => *code = accumulated,
            Node::Internal {
                code, one, zero, ..
            } => {
                one.assign_codes(format!("1{accumulated}"));
                zero.assign_codes(format!("0{accumulated}"));
                *code = accumulated;
            }
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Node>) {
        match self {
            Node::Leaf { .. } => out.push(self),
            Node::Internal { one, zero, .. } => {
                one.collect_leaves(out);
                zero.collect_leaves(out);
            }
        }
    }

    fn weighted_depth(&self, depth: u64) -> u64 {
        match self {
            Node::Leaf { count, .. } => count * depth,
            Node::Internal { one, zero, .. } => {
                one.weighted_depth(depth + 1) + zero.weighted_depth(depth + 1)
            }
        }
    }

    fn max_depth(&self) -> u64 {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { one, zero, .. } => 1 + one.max_depth().max(zero.max_depth()),
        }
    }

    fn node_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { one, zero, .. } => 1 + one.node_count() + zero.node_count(),
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        match self {
            Node::Leaf {
                symbol,
                count,
                code,
            } => writeln!(f, "{indent}{symbol:?} ({count}) code: {code}"),
            Node::Internal {
                count,
                code,
                one,
                zero,
            } => {
                let deeper = format!("{indent}   ");
                one.render(f, &deeper)?;
                writeln!(f, "{indent}* ({count}) code: {code}")?;
                zero.render(f, &deeper)
            }
        }
    }
}

/// Structural equality: same shape, symbols and counts. Codes are ignored,
/// so a freshly built tree equals the same tree read back from a file.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Node::Leaf {
                    symbol: a,
                    count: w1,
                    ..
                },
                Node::Leaf {
                    symbol: b,
                    count: w2,
                    ..
                },
            ) => a == b && w1 == w2,
            (
                Node::Internal {
                    count: w1,
                    one: one1,
                    zero: zero1,
                    ..
                },
                Node::Internal {
                    count: w2,
                    one: one2,
                    zero: zero2,
                    ..
                },
            ) => w1 == w2 && one1 == one2 && zero1 == zero2,
            _ => false,
        }
    }
}

impl Eq for Node {}

/// Entry in the builder's working set.
///
/// Ordered for a min-heap: lowest count first, then lowest sequence number.
#[derive(Debug)]
struct Pending {
    node: Node,
    seq: usize,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .node
            .count()
            .cmp(&self.node.count())
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Build a tree from leaf records, returning `None` for an empty input.
///
/// A single record is returned unchanged as a root leaf.
pub fn build_root<I>(leaves: I) -> Option<Node>
where
    I: IntoIterator<Item = Node>,
{
    let mut heap: BinaryHeap<Pending> = leaves
        .into_iter()
        .enumerate()
        .map(|(seq, node)| Pending { node, seq })
        .collect();
    let mut next_seq = heap.len();

    loop {
        let first = heap.pop()?;
        let Some(second) = heap.pop() else {
            return Some(first.node);
        };
        heap.push(Pending {
            node: Node::internal(first.node, second.node),
            seq: next_seq,
        });
        next_seq += 1;
    }
}

/// A Huffman tree over Unicode code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

impl HuffmanTree {
    /// Wrap an existing root node.
    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    /// Build a tree (without codes) from a frequency table.
    ///
    /// # Errors
    /// Returns `HuffmanError::EmptyInput` if the table has no symbols.
    pub fn build(table: &FrequencyTable) -> Result<Self> {
        let leaves = table.iter().map(|(symbol, count)| Node::leaf(symbol, count));
        let root = build_root(leaves).ok_or(HuffmanError::EmptyInput)?;
        log::debug!(
            "built tree: {} symbols, root count {}",
            table.len(),
            root.count()
        );
        Ok(Self { root })
    }

    /// Count symbols, build the tree and assign codes.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut tree = Self::build(&FrequencyTable::from_text(text))?;
        tree.assign_codes();
        Ok(tree)
    }

    /// Fill in the `code` of every node, starting from the empty code at the root.
    pub fn assign_codes(&mut self) {
        self.root.assign_codes(String::new());
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight; equals the length of the text the tree was built from.
    pub fn count(&self) -> u64 {
        self.root.count()
    }

    /// Leaf records in pre-order, one-branch before zero-branch.
    pub fn leaves(&self) -> Vec<&Node> {
        let mut leaves = Vec::new();
        self.root.collect_leaves(&mut leaves);
        leaves
    }

    /// Total number of nodes (leaves plus internal nodes).
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Symbol-to-code lookup over the assigned codes.
    pub fn code_table(&self) -> HashMap<char, &str> {
        self.leaves()
            .into_iter()
            .filter_map(|leaf| leaf.symbol().map(|symbol| (symbol, leaf.code())))
            .collect()
    }

    /// Number of bits the encoder produces for the text this tree was built from.
    ///
    /// Each symbol contributes its depth; a lone root leaf is encoded with one
    /// bit per symbol.
    pub fn encoded_len(&self) -> u64 {
        match &self.root {
            Node::Leaf { count, .. } => *count,
            Node::Internal { .. } => self.root.weighted_depth(0),
        }
    }

    /// Upper bound on the leading zeros of any encoding under this tree.
    ///
    /// Only the leaf on the all-zero path has an all-zero code, so a run of
    /// zeros is at most every copy of that code plus a strict prefix of one
    /// other code.
    pub fn max_leading_zeros(&self) -> u64 {
        let mut node = &self.root;
        let mut zero_depth = 0u64;
        while let Some(zero) = node.child(false) {
            node = zero;
            zero_depth += 1;
        }
        node.count()
            .saturating_mul(zero_depth)
            .saturating_add(self.root.max_depth().saturating_sub(1))
    }
}

/// In-order rendering, one node per line, indented by depth.
impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.render(f, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_for(text: &str) -> HuffmanTree {
        HuffmanTree::from_text(text).unwrap()
    }

    #[test]
    fn test_empty_input() {
        let result = HuffmanTree::build(&FrequencyTable::from_text(""));
        assert!(matches!(
            result,
            Err(crate::error::Error::Huffman(HuffmanError::EmptyInput))
        ));
        assert!(build_root(Vec::new()).is_none());
    }

    #[test]
    fn test_single_symbol_is_lone_leaf() {
        let tree = tree_for("aaaa");
        assert_eq!(tree.root(), &Node::leaf('a', 4));
        assert_eq!(tree.root().code(), "");
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.encoded_len(), 4);
    }

    #[test]
    fn test_two_symbols() {
        let tree = tree_for("ab");
        assert!(!tree.root().is_leaf());
        assert_eq!(tree.count(), 2);
        assert_eq!(tree.node_count(), 3);

        // Equal counts: 'a' was inserted first, so it is taken first (one-branch)
        let table = tree.code_table();
        assert_eq!(table[&'a'], "1");
        assert_eq!(table[&'b'], "0");
    }

    #[test]
    fn test_leaf_and_internal_counts() {
        let text = "Helllhdfdfsvbdkjnvs.hdbv";
        let tree = tree_for(text);
        let distinct = FrequencyTable::from_text(text).len();

        assert_eq!(tree.leaves().len(), distinct);
        assert_eq!(tree.node_count(), 2 * distinct - 1);
        assert_eq!(tree.count(), text.chars().count() as u64);
    }

    #[test]
    fn test_lightest_pair_merged_first() {
        // a:1 b:2 c:4 -> (a,b) merge to 3, then (3,c)
        let tree = tree_for("abbcccc");
        let root = tree.root();
        assert_eq!(root.count(), 7);

        let one = root.child(true).unwrap();
        let zero = root.child(false).unwrap();
        assert_eq!(one.count(), 3);
        assert_eq!(zero, &Node::leaf('c', 4));
        assert_eq!(one.child(true).unwrap(), &Node::leaf('a', 1));
        assert_eq!(one.child(false).unwrap(), &Node::leaf('b', 2));
    }

    #[test]
    fn test_tie_prefers_earlier_insertion() {
        // a:1 b:1 merge to 2; then c:2 (inserted before the merge) is taken first
        let tree = tree_for("abcc");
        let root = tree.root();
        assert_eq!(root.child(true).unwrap(), &Node::leaf('c', 2));
        assert_eq!(root.child(false).unwrap().count(), 2);
    }

    #[test]
    fn test_codes_are_prepended() {
        let tree = tree_for("abbcccc");
        let table = tree.code_table();
        // 'a' sits at one -> one; the root-adjacent bit is the last character
        assert_eq!(table[&'a'], "11");
        assert_eq!(table[&'b'], "01");
        assert_eq!(table[&'c'], "0");
        assert_eq!(tree.root().code(), "");
    }

    #[test]
    fn test_codes_are_prefix_free() {
        let tree = tree_for("the quick brown fox jumps over the lazy dog");
        let codes: Vec<String> = tree
            .leaves()
            .iter()
            .map(|leaf| leaf.code().chars().rev().collect())
            .collect();

        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a.as_str()), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_encoded_len() {
        let tree = tree_for("abbcccc");
        // a:1*2 + b:2*2 + c:4*1
        assert_eq!(tree.encoded_len(), 10);
    }

    #[test]
    fn test_max_leading_zeros() {
        assert_eq!(tree_for("aaaa").max_leading_zeros(), 0);
        assert_eq!(tree_for("ab").max_leading_zeros(), 1);

        for text in ["abbcccc", "Helllhdfdfsvbdkjnvs.hdbv", "aabbbbcccccccc"] {
            let tree = tree_for(text);
            let bits = crate::message::encode(&tree, text).unwrap();
            assert!(bits.leading_zeros() as u64 <= tree.max_leading_zeros());
        }
    }

    #[test]
    fn test_equality_ignores_codes() {
        let with_codes = tree_for("abbcccc");
        let without_codes = HuffmanTree::build(&FrequencyTable::from_text("abbcccc")).unwrap();
        assert_eq!(with_codes, without_codes);
    }

    #[test]
    fn test_display() {
        let rendered = tree_for("ab").to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   'a' (1) code: 1");
        assert_eq!(lines[1], "* (2) code: ");
        assert_eq!(lines[2], "   'b' (1) code: 0");
    }

    #[test]
    fn test_deterministic() {
        let text = "mississippi river banks";
        assert_eq!(tree_for(text).code_table(), tree_for(text).code_table());
    }
}
