use crate::graph::node::NodeId;
use crate::state::vertex_state::VertexState;

/// Result of one search call, owned by the caller. Every search starts from
/// a fresh one covering the whole node set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchState {
    source: NodeId,
    vertices: Vec<VertexState>,
}

impl SearchState {
    pub fn new(node_count: usize, source: NodeId) -> Self {
        let mut vertices = vec![VertexState::new(); node_count];
        vertices[source.index()] = VertexState::source();
        Self { source, vertices }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn vertices(&self) -> &[VertexState] {
        &self.vertices
    }

    pub fn vertex(&self, id: NodeId) -> &VertexState {
        &self.vertices[id.index()]
    }

    pub fn vertex_mut(&mut self, id: NodeId) -> &mut VertexState {
        &mut self.vertices[id.index()]
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.vertices[id.index()].is_visited()
    }

    pub fn distance(&self, id: NodeId) -> Option<u64> {
        self.vertices[id.index()].distance()
    }

    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.vertices[id.index()].predecessor()
    }
}
