use std::cmp::Ordering;
use std::fmt::{self, Write as _};

use crate::code_table::CodeTable;
use crate::error::{HuffError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

/// Index of a node inside a [`HuffmanTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: usize,
        symbol: u8,
    },
    Internal {
        weight: usize,
        left: NodeId,
        right: NodeId,
    },
}

impl HuffNode {
    pub fn weight(&self) -> usize {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Heap entry ordered by weight, then by insertion sequence.
///
/// Equal weights therefore leave the heap first-in first-out: leaves in
/// ascending symbol order, then merged nodes in the order they were made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    weight: usize,
    seq: usize,
    node: NodeId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman tree stored as an arena; children are referenced by index.
///
/// The tree is never modified after construction.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<HuffNode>,
    root: NodeId,
}

impl HuffmanTree {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::sample(bytes))
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(HuffError::EmptyInput);
        }

        let mut nodes = Vec::with_capacity(frequencies.len() * 2 - 1);
        let leaves: Vec<Pending> = frequencies
            .iter()
            .map(|(symbol, weight)| {
                let node = NodeId(nodes.len());
                nodes.push(HuffNode::Leaf { weight, symbol });
                Pending { weight, seq: node.0, node }
            })
            .collect();

        let heap = MinHeap::build(leaves);
        let root = Self::merge_all(heap, &mut nodes)?;

        let tree = HuffmanTree { nodes, root };
        log::debug!(
            "built huffman tree: {} leaves, {} nodes, root weight {}",
            tree.leaf_count(),
            tree.len(),
            tree.weight()
        );
        Ok(tree)
    }

    fn merge_all(mut heap: MinHeap<Pending>, nodes: &mut Vec<HuffNode>) -> Result<NodeId> {
        while heap.heap_size() > 1 {
            let x = heap.extract_min()?;
            let y = heap.extract_min()?;

            let weight = x.weight + y.weight;
            let node = NodeId(nodes.len());
            nodes.push(HuffNode::Internal {
                weight,
                left: x.node,
                right: y.node,
            });
            heap.insert(Pending { weight, seq: node.0, node });
        }

        Ok(heap.into_last()?.node)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &HuffNode {
        &self.nodes[id.0]
    }

    /// Total node count, leaves and internal nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Weight of the root, equal to the sampled buffer length.
    pub fn weight(&self) -> usize {
        self.node(self.root).weight()
    }

    /// Depth of the leaf holding `symbol`, root at depth 0.
    pub fn depth_of(&self, symbol: u8) -> Option<usize> {
        let mut stack = vec![(self.root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match self.node(id) {
                HuffNode::Leaf { symbol: s, .. } if *s == symbol => return Some(depth),
                HuffNode::Leaf { .. } => {}
                HuffNode::Internal { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        None
    }

    /// Derives the code of every leaf: left edge '0', right edge '1'.
    ///
    /// A tree made of a single leaf gets the one-token code "0"; the empty
    /// path would never match during decoding.
    pub fn generate_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        match self.node(self.root) {
            HuffNode::Leaf { symbol, .. } => {
                table.insert(*symbol, "0".to_string());
            }
            HuffNode::Internal { .. } => {
                let mut path = String::new();
                self.walk(self.root, &mut path, &mut table);
            }
        }
        table
    }

    fn walk(&self, id: NodeId, path: &mut String, table: &mut CodeTable) {
        match self.node(id) {
            HuffNode::Leaf { symbol, .. } => {
                table.insert(*symbol, path.clone());
            }
            HuffNode::Internal { left, right, .. } => {
                path.push('0');
                self.walk(*left, path, table);
                path.pop();

                path.push('1');
                self.walk(*right, path, table);
                path.pop();
            }
        }
    }

    /// Indented dump of the tree, one node per line.
    pub fn structure(&self) -> String {
        let mut out = String::new();
        // writing into a String cannot fail
        if self.write_node(&mut out, self.root, 0, "root").is_err() {
            out.clear();
        }
        out
    }

    fn write_node<W: fmt::Write>(
        &self,
        out: &mut W,
        id: NodeId,
        depth: usize,
        label: &str,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self.node(id) {
            HuffNode::Leaf { symbol, weight } => {
                writeln!(out, "{}{}-> Leaf: {} [weight: {}]", indent, label, symbol, weight)
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(out, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                self.write_node(out, *left, depth + 1, "L")?;
                self.write_node(out, *right, depth + 1, "R")
            }
        }
    }
}
