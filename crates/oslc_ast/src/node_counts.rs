// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

use crate::ast::NodeType;

/// Per-variant tallies of live AST nodes, and the largest number that were
/// ever live at once. The arena updates these on every allocation and free.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeCounts {
    live: [usize; NodeType::COUNT],
    peak: [usize; NodeType::COUNT],
}

impl NodeCounts {
    pub fn new() -> NodeCounts {
        NodeCounts::default()
    }

    pub(crate) fn register(&mut self, node_type: NodeType) {
        let i = node_type as usize;
        self.live[i] += 1;
        self.peak[i] = self.peak[i].max(self.live[i]);
    }

    pub(crate) fn deregister(&mut self, node_type: NodeType) {
        let i = node_type as usize;
        self.live[i] = self.live[i].saturating_sub(1);
    }

    pub fn live(&self, node_type: NodeType) -> usize {
        self.live[node_type as usize]
    }

    pub fn peak(&self, node_type: NodeType) -> usize {
        self.peak[node_type as usize]
    }

    pub fn total_live(&self) -> usize {
        self.live.iter().sum()
    }

    /// One line for each variant that still has live nodes.
    pub fn report(&self) -> Vec<String> {
        NodeType::ALL
            .iter()
            .filter(|t| self.live(**t) > 0)
            .map(|t| {
                format!(
                    "ASTNode type {:2}: {:5}   (peak {:5})",
                    *t as usize,
                    self.live(*t),
                    self.peak(*t)
                )
            })
            .collect()
    }
}

#[test]
fn test_live_and_peak() {
    let mut counts = NodeCounts::new();
    counts.register(NodeType::Literal);
    counts.register(NodeType::Literal);
    counts.deregister(NodeType::Literal);
    counts.register(NodeType::Index);
    assert_eq!(counts.live(NodeType::Literal), 1);
    assert_eq!(counts.peak(NodeType::Literal), 2);
    assert_eq!(counts.total_live(), 2);
    assert_eq!(counts.report().len(), 2);
}
