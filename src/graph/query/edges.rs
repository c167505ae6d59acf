//! Edge queries
//!
//! Unlike neighbor queries these keep edge identity: every parallel edge
//! is listed under its own key. Orderings:
//!
//! - whole graph: registration order
//! - one node: incoming, then outgoing, then undirected edges, each group
//!   in registration order; a directed self-loop is listed once, with the
//!   incoming group when that group is read
//! - bunch: per-node results concatenated, each edge at its first occurrence
//! - pair: directed `source -> target` edges, then undirected edges joining
//!   the pair, each group in registration order

use super::{bunch_position, compatible, QueryArg, Stage, Traversal};
use crate::graph::edge::Edge;
use crate::graph::error::{GraphError, GraphResult};
use crate::graph::linked;
use crate::graph::node::{self, NodeEntry, PairEdges};
use crate::graph::store::GraphStore;
use crate::graph::types::{EdgeKey, NodeKey};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Edge queries of one traversal variant over a graph
#[derive(Debug, Clone, Copy)]
pub struct EdgeQuery<'g> {
    store: &'g GraphStore,
    traversal: Traversal,
}

impl<'g> EdgeQuery<'g> {
    pub(crate) fn new(store: &'g GraphStore, traversal: Traversal) -> Self {
        Self { store, traversal }
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Every matching edge of the graph
    pub fn all(&self) -> Vec<EdgeKey> {
        self.iter_all().cloned().collect()
    }

    /// Every matching edge incident to `node`
    pub fn by_node(&self, node: impl Into<NodeKey>) -> GraphResult<Vec<EdgeKey>> {
        Ok(self.iter_by_node(node)?.cloned().collect())
    }

    /// Union of the per-node results of every member of `bunch`
    pub fn by_bunch<I, K>(&self, bunch: I) -> GraphResult<Vec<EdgeKey>>
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        Ok(self.iter_by_bunch(bunch)?.cloned().collect())
    }

    /// Every matching edge directly joining `source` and `target`.
    ///
    /// A valid but disconnected pair yields an empty list.
    pub fn by_pair(
        &self,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
    ) -> GraphResult<Vec<EdgeKey>> {
        Ok(self.iter_by_pair(source, target)?.cloned().collect())
    }

    pub fn iter_all(&self) -> EdgeIter<'g> {
        if !self.is_compatible() {
            return EdgeIter::empty();
        }
        EdgeIter {
            inner: Inner::All {
                records: self.store.edge_walk(),
                traversal: self.traversal,
            },
        }
    }

    pub fn iter_by_node(&self, node: impl Into<NodeKey>) -> GraphResult<EdgeIter<'g>> {
        if !self.is_compatible() {
            return Ok(EdgeIter::empty());
        }
        let node = node.into();
        let entry = self.entry(&node)?;
        Ok(EdgeIter {
            inner: Inner::Node(NodeEdges::new(node, entry, self.traversal)),
        })
    }

    /// Every member is checked up front, so a missing node fails the call
    /// before anything is yielded.
    pub fn iter_by_bunch<I, K>(&self, bunch: I) -> GraphResult<EdgeIter<'g>>
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        if !self.is_compatible() {
            return Ok(EdgeIter::empty());
        }
        let members = bunch
            .into_iter()
            .map(|node| {
                let node = node.into();
                self.entry(&node).map(|entry| (node, entry))
            })
            .collect::<GraphResult<Vec<_>>>()?;

        Ok(EdgeIter {
            inner: Inner::Bunch {
                members: members.into_iter(),
                current: None,
                seen: FxHashSet::default(),
                traversal: self.traversal,
            },
        })
    }

    pub fn iter_by_pair(
        &self,
        source: impl Into<NodeKey>,
        target: impl Into<NodeKey>,
    ) -> GraphResult<EdgeIter<'g>> {
        if !self.is_compatible() {
            return Ok(EdgeIter::empty());
        }
        let source = source.into();
        let target = target.into();
        let entry = self.entry(&source)?;
        self.entry(&target)?;

        let directed = if self.traversal.includes_in() || self.traversal.includes_out() {
            entry.outbound.edges_to(&target)
        } else {
            PairEdges::default()
        };
        let undirected = if self.traversal.includes_undirected() {
            entry.undirected.edges_to(&target)
        } else {
            PairEdges::default()
        };

        Ok(EdgeIter {
            inner: Inner::Pair {
                directed,
                undirected,
            },
        })
    }

    /// Number of matching edges incident to `node`, self-loops counted once
    pub fn degree(&self, node: impl Into<NodeKey>) -> GraphResult<usize> {
        Ok(self.iter_by_node(node)?.count())
    }

    /// Dispatch on positional arguments: none lists the whole graph, a node
    /// or a bunch lists incident edges, two nodes list the edges joining
    /// them. A bunch is only accepted as the sole argument.
    pub fn call(&self, args: &[QueryArg]) -> GraphResult<Vec<EdgeKey>> {
        match args {
            [] => Ok(self.all()),
            [QueryArg::Node(node)] => self.by_node(node),
            [QueryArg::Bunch(bunch)] => self.by_bunch(bunch),
            [QueryArg::Node(source), QueryArg::Node(target)] => self.by_pair(source, target),
            [_, _] => Err(GraphError::BunchNotAccepted {
                operation: self.traversal.edges_operation(),
                position: bunch_position(args),
            }),
            _ => Err(GraphError::InvalidArguments {
                operation: self.traversal.edges_operation(),
                expected: "0, 1 or 2",
                received: args.len(),
            }),
        }
    }

    fn is_compatible(&self) -> bool {
        let discipline = self.store.graph_type();
        let ok = compatible(self.traversal.declared_type(), discipline);
        if !ok {
            trace!(
                "{} on a {} graph: nothing to traverse",
                self.traversal.edges_operation(),
                discipline
            );
        }
        ok
    }

    fn entry(&self, node: &NodeKey) -> GraphResult<&'g NodeEntry> {
        self.store
            .entry(node)
            .ok_or_else(|| GraphError::not_found(self.traversal.edges_operation(), node))
    }
}

/// Lazy, finite walk over edge keys
///
/// Borrows the graph, so the graph cannot be mutated while the walk is
/// alive. Each query call starts a fresh walk.
#[derive(Debug, Clone)]
pub struct EdgeIter<'g> {
    inner: Inner<'g>,
}

#[derive(Debug, Clone)]
enum Inner<'g> {
    Empty,
    All {
        records: linked::Iter<'g, EdgeKey, Edge>,
        traversal: Traversal,
    },
    Node(NodeEdges<'g>),
    Bunch {
        members: std::vec::IntoIter<(NodeKey, &'g NodeEntry)>,
        current: Option<NodeEdges<'g>>,
        seen: FxHashSet<&'g EdgeKey>,
        traversal: Traversal,
    },
    Pair {
        directed: PairEdges<'g>,
        undirected: PairEdges<'g>,
    },
}

impl<'g> EdgeIter<'g> {
    fn empty() -> Self {
        EdgeIter {
            inner: Inner::Empty,
        }
    }
}

impl<'g> Iterator for EdgeIter<'g> {
    type Item = &'g EdgeKey;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Inner::Empty => None,
            Inner::All { records, traversal } => {
                let traversal = *traversal;
                records
                    .find(|(_, edge)| traversal.admits(edge.directed))
                    .map(|(key, _)| key)
            }
            Inner::Node(walk) => walk.next(),
            Inner::Bunch {
                members,
                current,
                seen,
                traversal,
            } => loop {
                if let Some(walk) = current.as_mut() {
                    if let Some(edge) = walk.find(|edge| seen.insert(*edge)) {
                        return Some(edge);
                    }
                }
                let (node, entry) = members.next()?;
                *current = Some(NodeEdges::new(node, entry, *traversal));
            },
            Inner::Pair {
                directed,
                undirected,
            } => directed.next().or_else(|| undirected.next()),
        }
    }
}

/// Walk over the edges incident to one node
#[derive(Debug, Clone)]
struct NodeEdges<'g> {
    node: NodeKey,
    entry: &'g NodeEntry,
    traversal: Traversal,
    stage: Stage,
    edges: Option<node::Edges<'g>>,
}

impl<'g> NodeEdges<'g> {
    fn new(node: NodeKey, entry: &'g NodeEntry, traversal: Traversal) -> Self {
        Self {
            node,
            entry,
            traversal,
            stage: Stage::Start,
            edges: None,
        }
    }
}

impl<'g> Iterator for NodeEdges<'g> {
    type Item = &'g EdgeKey;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(edges) = self.edges.as_mut() {
                // A directed self-loop sits in both `in` and `out`.
                let skip_loops = self.stage == Stage::Out && self.traversal.includes_in();
                let (entry, node) = (self.entry, &self.node);
                let found =
                    edges.find(|edge| !(skip_loops && entry.inbound.contains_edge(node, edge)));
                if found.is_some() {
                    return found;
                }
            }

            self.stage = self.stage.next(self.traversal);
            match self.stage.collection(self.entry) {
                Some(adjacency) => self.edges = Some(adjacency.edges()),
                None => {
                    self.edges = None;
                    return None;
                }
            }
        }
    }
}
