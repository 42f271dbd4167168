use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Index of a node in a [`Graph`](super::Graph).
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Index of an edge in a [`Graph`](super::Graph).
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for EdgeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A single-producer, single-consumer wire between two nodes. Either end may be
/// unbound while the graph is under construction.
#[derive(Debug, Copy, Clone, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub(crate) producer: Option<NodeId>,
    pub(crate) consumer: Option<NodeId>,
}

impl Edge {
    pub fn new(producer: Option<NodeId>, consumer: Option<NodeId>) -> Self {
        Self { producer, consumer }
    }

    /// The node writing to this edge.
    pub fn producer(&self) -> Option<NodeId> {
        self.producer
    }

    /// The node reading from this edge.
    pub fn consumer(&self) -> Option<NodeId> {
        self.consumer
    }

    pub fn is_bound(&self) -> bool {
        self.producer.is_some() && self.consumer.is_some()
    }
}
