use std::fmt;
use std::fmt::Write as _;

use log::{debug, trace};

use crate::frequency::FrequencyTable;
use crate::priority_list::{Entry, PriorityList};

/// Index of a node inside a [`HuffmanTree`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    /// `symbol` is inherited from the right child and only serves as a
    /// tie-breaker while the node is queued.
    Internal {
        symbol: u8,
        freq: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn freq(&self) -> u64 {
        match self {
            Node::Leaf { freq, .. } => *freq,
            Node::Internal { freq, .. } => *freq,
        }
    }

    pub fn symbol(&self) -> u8 {
        match self {
            Node::Leaf { symbol, .. } => *symbol,
            Node::Internal { symbol, .. } => *symbol,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// A Huffman tree stored in an arena. Every node except the root has exactly
/// one parent.
#[derive(Clone, Debug)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Builds the tree for `frequencies`, or `None` when no symbol occurs.
    ///
    /// The two lowest-ranked nodes are merged into a parent (first popped on
    /// the left) until one node remains. The same frequencies always give the
    /// same tree, which is what lets the decoder rebuild the encoder's codes
    /// from the header alone.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        let distinct = frequencies.distinct();
        debug!("Building Huffman Tree from {} unique symbols", distinct);

        let mut nodes = Vec::with_capacity(distinct.saturating_mul(2));
        let mut queue = PriorityList::with_capacity(distinct);

        for (symbol, freq) in frequencies.iter() {
            let node = NodeId(nodes.len());
            nodes.push(Node::Leaf { symbol, freq });
            queue.insert(Entry { freq, symbol, node });
        }

        let root = loop {
            let left = queue.pop_min()?;
            let Some(right) = queue.pop_min() else {
                break left.node;
            };

            let freq = left.freq + right.freq;
            let node = NodeId(nodes.len());
            nodes.push(Node::Internal {
                symbol: right.symbol,
                freq,
                left: left.node,
                right: right.node,
            });
            trace!(
                "Merged {:?} (freq {}) and {:?} (freq {}) into {:?}",
                left.node, left.freq, right.node, right.freq, node
            );
            queue.insert(Entry {
                freq,
                symbol: right.symbol,
                node,
            });
        };

        debug!("Tree construction complete: {} nodes", nodes.len());
        Some(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Follows the edge for `bit` (`false` left, `true` right). Leaves have no
    /// children.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.node(id) {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { *right } else { *left }),
        }
    }

    /// Number of characters the tree was built for.
    pub fn total(&self) -> u64 {
        self.node(self.root).freq()
    }

    pub fn symbol_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Assigns every leaf the path leading to it from the root.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut path = Vec::with_capacity(256);
        self.assign_codes(self.root, &mut path, &mut table);
        table
    }

    fn assign_codes(&self, id: NodeId, path: &mut Vec<bool>, table: &mut CodeTable) {
        match self.node(id) {
            Node::Leaf { symbol, .. } => {
                let code = Code::from(path.as_slice());
                trace!(
                    "Assigning code to byte {:#04x} ('{}') : '{}'",
                    symbol,
                    (*symbol as char).escape_default(),
                    code
                );
                table.insert(*symbol, code);
            }
            Node::Internal { left, right, .. } => {
                path.push(false);
                self.assign_codes(*left, path, table);
                path.pop();
                path.push(true);
                self.assign_codes(*right, path, table);
                path.pop();
            }
        }
    }
}

/// The bit sequence assigned to one symbol.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl From<&[bool]> for Code {
    fn from(bits: &[bool]) -> Self {
        Self {
            bits: bits.to_vec(),
        }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Codes of every symbol present in a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
}

impl Default for CodeTable {
    fn default() -> Self {
        Self {
            codes: vec![None; 256],
        }
    }
}

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, symbol: u8, code: Code) {
        self.codes[symbol as usize] = Some(code);
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Present symbols with their codes, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }

    /// Renders a `Symbol/Freq/Code` chart. Printable ASCII symbols are shown
    /// as themselves, everything else as `=<decimal value>`.
    pub fn chart(&self, frequencies: &FrequencyTable) -> String {
        let mut out = String::from("Symbol\tFreq\tCode\n");
        for (symbol, code) in self.iter() {
            if (33..=126).contains(&symbol) {
                let _ = write!(out, "{}", symbol as char);
            } else {
                let _ = write!(out, "={}", symbol);
            }
            let _ = writeln!(out, "\t{}\t{}", frequencies.get(symbol), code);
        }
        out
    }
}
