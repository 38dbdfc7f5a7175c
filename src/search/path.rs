use crate::error::{GraphError, Result};
use crate::graph::edge::EdgeId;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::graph::view::GraphView;
use crate::search::widest::CapacityMode;
use crate::state::search_state::SearchState;

/// Edges walked from `source` to `destination`, in that order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    source: NodeId,
    destination: NodeId,
    edges: Vec<EdgeId>,
}

impl Path {
    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn destination(&self) -> NodeId {
        self.destination
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    pub fn length(&self, graph: &Graph) -> u64 {
        self.edges
            .iter()
            .map(|id| graph.edge_by_id(*id).length() as u64)
            .sum()
    }

    /// Smallest capacity along the path as seen by `mode`.
    pub fn bottleneck(&self, graph: &Graph, mode: CapacityMode) -> Option<u32> {
        self.edges
            .iter()
            .map(|id| mode.capacity_of(graph.edge_by_id(*id)))
            .min()
    }

    pub fn nodes(&self, graph: &Graph) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.edges.len() + 1);
        nodes.push(self.source);
        for id in &self.edges {
            let last = nodes[nodes.len() - 1];
            match graph.edge_by_id(*id).other_end(last) {
                Some(next) => nodes.push(next),
                None => break,
            }
        }
        nodes
    }

    pub fn labels<'g>(&self, graph: &'g Graph) -> Vec<&'g str> {
        self.edges
            .iter()
            .map(|id| graph.edge_by_id(*id).label())
            .collect()
    }

    /// Node walk such as `0 -> 1 -> 2`.
    pub fn describe(&self, graph: &Graph) -> String {
        self.nodes(graph)
            .iter()
            .map(|n| graph.node_by_id(*n).name())
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Follows predecessor links from `destination` back to the search source and
/// picks, for every link, the edge of `view` that backs it.
///
/// The state must come from a search over the same view. A link without a
/// backing edge, a node without a predecessor, or a chain longer than the node
/// count all mean the search itself is wrong and are returned as errors.
pub fn reconstruct(view: &GraphView, state: &SearchState, destination: NodeId) -> Result<Path> {
    let source = state.source();
    let mut edges = Vec::new();
    let mut node = destination;

    while node != source {
        if edges.len() >= view.node_count() {
            return Err(GraphError::CyclicPredecessors {
                destination: destination.index(),
            });
        }
        let predecessor = state
            .predecessor(node)
            .ok_or(GraphError::UnreachedPredecessor { node: node.index() })?;
        let edge = view
            .edge_between(node, predecessor)
            .ok_or(GraphError::BrokenPredecessor {
                node: node.index(),
                predecessor: predecessor.index(),
            })?;
        edges.push(edge.id());
        node = predecessor;
    }
    edges.reverse();

    Ok(Path {
        source,
        destination,
        edges,
    })
}
