use crate::error::{GraphError, Result};
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::node::{Node, NodeId};
use crate::graph::view::GraphView;

pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adj: Vec<Vec<EdgeId>>,
}

impl Graph {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        if let Some((position, node)) = nodes
            .iter()
            .enumerate()
            .find(|(i, n)| n.id().index() != *i)
        {
            return Err(GraphError::NodeIdMismatch {
                position,
                found: node.id().index(),
            });
        }

        let mut adj: Vec<Vec<EdgeId>> = vec![Vec::new(); nodes.len()];
        for (position, e) in edges.iter().enumerate() {
            if e.id().index() != position {
                return Err(GraphError::EdgeIdMismatch {
                    position,
                    found: e.id().index(),
                });
            }
            let (a, b) = e.ends();
            if a == b {
                return Err(GraphError::SelfLoop {
                    edge: position,
                    node: a.index(),
                });
            }
            if let Some(missing) = [a, b].into_iter().find(|n| n.index() >= nodes.len()) {
                return Err(GraphError::DanglingEdge {
                    edge: position,
                    node: missing.index(),
                });
            }
            adj[a.index()].push(e.id());
            adj[b.index()].push(e.id());
        }

        Ok(Self { nodes, edges, adj })
    }

    /// Numbered nodes `0..node_count` joined by `(a, b, capacity)` links of unit length.
    pub fn from_links(node_count: usize, links: &[(usize, usize, u32)]) -> Result<Self> {
        let nodes = (0..node_count).map(Node::numbered).collect();
        let edges = links
            .iter()
            .enumerate()
            .map(|(i, &(a, b, capacity))| Edge::new(EdgeId(i), NodeId(a), NodeId(b), capacity))
            .collect();
        Self::new(nodes, edges)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_by_id(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn edge_by_id(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Edges touching `id`, in insertion order.
    pub fn incident(&self, id: NodeId) -> &[EdgeId] {
        &self.adj[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn check_node(&self, id: NodeId) -> Result<()> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownNode {
                node: id.index(),
                node_count: self.nodes.len(),
            })
        }
    }

    /// Rejects requests no search should be asked to answer.
    pub fn check_request(&self, source: NodeId, destination: NodeId) -> Result<()> {
        self.check_node(source)?;
        self.check_node(destination)?;
        if source == destination {
            return Err(GraphError::SameEndpoints(source.index()));
        }
        Ok(())
    }

    pub fn view(&self) -> GraphView<'_> {
        GraphView::full(self)
    }

    /// Same nodes, only the edges accepted by `keep`. Capacities are untouched.
    pub fn restrict(&self, keep: impl Fn(&Edge) -> bool) -> GraphView<'_> {
        GraphView::filtered(self, self.edges.iter().map(keep).collect())
    }

    /// Takes one unit from every edge of `path`. Nothing changes unless all
    /// edges have a unit left.
    pub fn reserve(&mut self, path: &[EdgeId]) -> Result<()> {
        if let Some(e) = path
            .iter()
            .map(|id| &self.edges[id.index()])
            .find(|e| e.capacity() == 0)
        {
            return Err(GraphError::CapacityExhausted {
                edge: e.label().to_string(),
            });
        }
        path.iter().for_each(|id| {
            let e = &mut self.edges[id.index()];
            e.set_capacity(e.capacity() - 1);
        });
        Ok(())
    }

    /// Gives one unit back to every edge of `path`. Nothing changes unless
    /// all edges are below their initial capacity.
    pub fn release(&mut self, path: &[EdgeId]) -> Result<()> {
        if let Some(e) = path
            .iter()
            .map(|id| &self.edges[id.index()])
            .find(|e| e.capacity() >= e.initial_capacity())
        {
            return Err(GraphError::CapacityOverflow {
                edge: e.label().to_string(),
            });
        }
        path.iter().for_each(|id| {
            let e = &mut self.edges[id.index()];
            e.set_capacity(e.capacity() + 1);
        });
        Ok(())
    }

    pub fn total_in_use(&self) -> u64 {
        self.edges.iter().map(|e| e.in_use() as u64).sum()
    }
}
