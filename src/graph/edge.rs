use crate::graph::node::NodeId;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Undirected link between two distinct nodes.
#[derive(Clone, Debug)]
pub struct Edge {
    id: EdgeId,
    label: String,
    ends: (NodeId, NodeId),
    /// cost used by the hop-count search, >= 1
    length: u32,
    /// remaining bandwidth, 0 <= capacity <= initial_capacity
    capacity: u32,
    initial_capacity: u32,
}

impl Edge {
    pub const DEFAULT_LENGTH: u32 = 1;

    pub fn new(id: EdgeId, a: NodeId, b: NodeId, capacity: u32) -> Self {
        Self {
            id,
            label: format!("{}-{}", a, b),
            ends: (a, b),
            length: Self::DEFAULT_LENGTH,
            capacity,
            initial_capacity: capacity,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn ends(&self) -> (NodeId, NodeId) {
        self.ends
    }

    pub fn joins(&self, a: NodeId, b: NodeId) -> bool {
        (self.ends.0 == a && self.ends.1 == b) || (self.ends.0 == b && self.ends.1 == a)
    }

    /// Endpoint opposite to `node`, or `None` when `node` is not an endpoint.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        match self.ends {
            (a, b) if a == node => Some(b),
            (a, b) if b == node => Some(a),
            _ => None,
        }
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn initial_capacity(&self) -> u32 {
        self.initial_capacity
    }

    pub fn in_use(&self) -> u32 {
        self.initial_capacity - self.capacity
    }

    pub(crate) fn set_capacity(&mut self, capacity: u32) {
        debug_assert!(capacity <= self.initial_capacity);
        self.capacity = capacity;
    }
}
