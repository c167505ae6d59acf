//! Per-node adjacency records
//!
//! Every node owns exactly three neighbor-keyed collections: incoming
//! directed edges, outgoing directed edges, and undirected edges. Each maps
//! a neighbor key to the edge keys joining the pair, so parallel edges share
//! one neighbor entry.

use super::linked::{self, LinkedKeys};
use super::types::{EdgeKey, NodeKey};
use rustc_hash::FxHashMap;

/// One neighbor-keyed edge collection
///
/// Edges are chained twice in registration order: once across the whole
/// collection, and once per neighbor. Both chains unlink in O(1), so
/// `insert` and `remove` never depend on the node's degree.
///
/// Invariants:
/// - no neighbor entry holds an empty chain
/// - `edges` holds exactly the edges found under `neighbors`, each mapped
///   to the neighbor it is filed under
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    edges: LinkedKeys<EdgeKey, NodeKey>,
    neighbors: FxHashMap<NodeKey, LinkedKeys<EdgeKey, ()>>,
}

impl Adjacency {
    /// Record `edge` as joining this node to `neighbor`.
    ///
    /// Returns false when the edge was already recorded, which only happens
    /// for the second side of an undirected self-loop.
    pub(crate) fn insert(&mut self, neighbor: &NodeKey, edge: &EdgeKey) -> bool {
        if !self.edges.push_back(edge.clone(), neighbor.clone()) {
            return false;
        }
        self.neighbors
            .entry(neighbor.clone())
            .or_default()
            .push_back(edge.clone(), ());
        true
    }

    /// Forget `edge`, dropping the neighbor entry once its last edge is gone.
    ///
    /// Panics if the edge was never recorded under `neighbor`: the store
    /// calls this exactly once per recorded edge, so a miss means the index
    /// is corrupt.
    pub(crate) fn remove(&mut self, neighbor: &NodeKey, edge: &EdgeKey) {
        let filed_under = self.edges.remove(edge);
        assert!(
            filed_under.as_ref() == Some(neighbor),
            "adjacency entry for {} does not hold edge {}",
            neighbor,
            edge
        );
        let emptied = match self.neighbors.get_mut(neighbor) {
            Some(edges) => {
                edges.remove(edge);
                edges.is_empty()
            }
            None => panic!("no adjacency entry for neighbor {} (edge {})", neighbor, edge),
        };
        if emptied {
            self.neighbors.remove(neighbor);
        }
    }

    /// Distinct neighbors, ordered by their oldest surviving edge
    pub fn neighbors(&self) -> Neighbors<'_> {
        Neighbors {
            adjacency: self,
            edges: self.edges.iter(),
        }
    }

    pub fn has_neighbor(&self, neighbor: &NodeKey) -> bool {
        self.neighbors.contains_key(neighbor)
    }

    /// Edges joining this node to `neighbor`, in registration order
    pub fn edges_to(&self, neighbor: &NodeKey) -> PairEdges<'_> {
        PairEdges {
            edges: self.neighbors.get(neighbor).map(LinkedKeys::iter),
        }
    }

    /// Number of parallel edges joining this node to `neighbor`
    pub fn multiplicity(&self, neighbor: &NodeKey) -> usize {
        self.neighbors.get(neighbor).map_or(0, LinkedKeys::len)
    }

    pub fn contains_edge(&self, neighbor: &NodeKey, edge: &EdgeKey) -> bool {
        self.edges.get(edge) == Some(neighbor)
    }

    /// Every edge in this collection, in registration order
    pub fn edges(&self) -> Edges<'_> {
        Edges {
            edges: self.edges.iter(),
        }
    }

    pub fn neighbor_count(&self) -> usize {
        self.neighbors.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Edges of one collection, in registration order
#[derive(Debug, Clone)]
pub struct Edges<'a> {
    edges: linked::Iter<'a, EdgeKey, NodeKey>,
}

impl<'a> Iterator for Edges<'a> {
    type Item = &'a EdgeKey;

    fn next(&mut self) -> Option<Self::Item> {
        self.edges.next().map(|(edge, _)| edge)
    }
}

/// Neighbors of one collection
///
/// Walks the registration-ordered edge chain and reports a neighbor at the
/// oldest edge filed under it, so no neighbor is reported twice.
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    adjacency: &'a Adjacency,
    edges: linked::Iter<'a, EdgeKey, NodeKey>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a NodeKey;

    fn next(&mut self) -> Option<Self::Item> {
        let adjacency = self.adjacency;
        self.edges.find_map(|(edge, neighbor)| {
            let oldest = adjacency.neighbors.get(neighbor).and_then(LinkedKeys::front);
            (oldest == Some(edge)).then_some(neighbor)
        })
    }
}

/// Edges joining one pair of nodes, in registration order
#[derive(Debug, Clone, Default)]
pub struct PairEdges<'a> {
    edges: Option<linked::Iter<'a, EdgeKey, ()>>,
}

impl<'a> Iterator for PairEdges<'a> {
    type Item = &'a EdgeKey;

    fn next(&mut self) -> Option<Self::Item> {
        self.edges.as_mut()?.next().map(|(edge, _)| edge)
    }
}

/// The fixed three-collection adjacency record of a node
#[derive(Debug, Clone, Default)]
pub struct NodeEntry {
    /// Incoming directed edges, keyed by source
    pub inbound: Adjacency,

    /// Outgoing directed edges, keyed by target
    pub outbound: Adjacency,

    /// Undirected edges, keyed by the other endpoint
    pub undirected: Adjacency,
}

impl NodeEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_isolated(&self) -> bool {
        self.inbound.is_empty() && self.outbound.is_empty() && self.undirected.is_empty()
    }
}
