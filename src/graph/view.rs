use crate::graph::edge::{Edge, EdgeId};
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;

/// A graph seen through an edge mask. Nodes are always shared with the
/// underlying graph, so ids stay valid across restrictions.
#[derive(Clone)]
pub struct GraphView<'a> {
    graph: &'a Graph,
    /// `None` keeps every edge
    mask: Option<Vec<bool>>,
}

impl<'a> GraphView<'a> {
    pub fn full(graph: &'a Graph) -> Self {
        Self { graph, mask: None }
    }

    pub fn filtered(graph: &'a Graph, mask: Vec<bool>) -> Self {
        debug_assert_eq!(mask.len(), graph.edge_count());
        Self {
            graph,
            mask: Some(mask),
        }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn contains(&self, id: EdgeId) -> bool {
        self.mask.as_ref().is_none_or(|mask| mask[id.index()])
    }

    pub fn edges(&self) -> impl Iterator<Item = &'a Edge> {
        self.graph.edges().iter().filter(|e| self.contains(e.id()))
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Visible edges touching `node`, in insertion order.
    pub fn incident(&self, node: NodeId) -> impl Iterator<Item = &'a Edge> {
        self.graph
            .incident(node)
            .iter()
            .filter(|id| self.contains(**id))
            .map(|id| self.graph.edge_by_id(*id))
    }

    /// Shortest visible edge joining `a` and `b`; the first one on ties.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<&'a Edge> {
        self.incident(a)
            .filter(|e| e.joins(a, b))
            .min_by_key(|e| e.length())
    }
}
