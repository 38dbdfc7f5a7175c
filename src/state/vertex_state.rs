use crate::graph::node::NodeId;

/// Per-node bookkeeping of a single search call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexState {
    /// best known cost from the source, `None` while unreached
    distance: Option<u64>,
    /// finalized (label-setting) or reached (reachability)
    visited: bool,
    predecessor: Option<NodeId>,
}

impl VertexState {
    pub fn new() -> Self {
        Self {
            distance: None,
            visited: false,
            predecessor: None,
        }
    }

    pub fn source() -> Self {
        Self {
            distance: Some(0),
            visited: true,
            predecessor: None,
        }
    }

    pub fn distance(&self) -> Option<u64> {
        self.distance
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn predecessor(&self) -> Option<NodeId> {
        self.predecessor
    }

    pub fn visit(&mut self) {
        self.visited = true;
    }

    /// Records a cheaper way in. Returns `false` when `distance` is no improvement.
    pub fn relax(&mut self, distance: u64, via: NodeId) -> bool {
        if self.distance.is_some_and(|d| d <= distance) {
            return false;
        }
        self.distance = Some(distance);
        self.predecessor = Some(via);
        true
    }

    pub fn reach(&mut self, via: NodeId) {
        self.visited = true;
        self.predecessor = Some(via);
    }
}

impl Default for VertexState {
    fn default() -> Self {
        Self::new()
    }
}
