use crate::error::Result;
use crate::graph::edge::Edge;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::search::path::{Path, reconstruct};
use crate::search::reachability::reach;
use tracing::trace;

/// Which capacity the widest-path search ranks edges by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CapacityMode {
    /// remaining capacity at request time
    Dynamic,
    /// capacity the topology was built with
    Static,
}

impl CapacityMode {
    pub fn capacity_of(self, edge: &Edge) -> u32 {
        match self {
            CapacityMode::Dynamic => edge.capacity(),
            CapacityMode::Static => edge.initial_capacity(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidestPath {
    path: Path,
    bottleneck: u32,
}

impl WidestPath {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }

    pub fn bottleneck(&self) -> u32 {
        self.bottleneck
    }
}

/// Distinct positive capacities of the graph, largest first.
fn thresholds(graph: &Graph, mode: CapacityMode) -> Vec<u32> {
    let mut values = graph
        .edges()
        .iter()
        .map(|e| mode.capacity_of(e))
        .filter(|c| *c > 0)
        .collect::<Vec<u32>>();
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.dedup();
    values
}

/// Path from `source` to `destination` whose smallest edge capacity is as
/// large as possible.
///
/// Thresholds are tried from the largest capacity down. For each one the
/// graph is restricted to edges at or above it and checked for connectivity;
/// the first threshold that connects the endpoints is the bottleneck. Only
/// capacities present in the graph can change connectivity, so scanning those
/// gives the same answer as stepping down one unit at a time. Edges with no
/// capacity never carry a path. `None` when no positive threshold connects
/// the endpoints.
pub fn widest_path(
    graph: &Graph,
    source: NodeId,
    destination: NodeId,
    mode: CapacityMode,
) -> Result<Option<WidestPath>> {
    graph.check_request(source, destination)?;

    for threshold in thresholds(graph, mode) {
        let view = graph.restrict(|e| mode.capacity_of(e) >= threshold);
        let state = reach(&view, source);
        if state.is_visited(destination) {
            let path = reconstruct(&view, &state, destination)?;
            trace!(%source, %destination, threshold, hops = path.hop_count(), "widest path");
            return Ok(Some(WidestPath {
                path,
                bottleneck: threshold,
            }));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::edge::EdgeId;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn triangle() -> Graph {
        Graph::from_links(4, &[(0, 1, 2), (1, 2, 3), (0, 2, 1)]).unwrap()
    }

    /// Best bottleneck over all simple paths, by exhaustive walk.
    fn brute_force(graph: &Graph, source: NodeId, destination: NodeId, mode: CapacityMode) -> Option<u32> {
        fn walk(
            graph: &Graph,
            at: NodeId,
            destination: NodeId,
            mode: CapacityMode,
            on_path: &mut Vec<bool>,
            narrowest: u32,
            best: &mut Option<u32>,
        ) {
            if at == destination {
                *best = (*best).max(Some(narrowest));
                return;
            }
            for id in graph.incident(at) {
                let edge = graph.edge_by_id(*id);
                let next = edge.other_end(at).unwrap();
                let capacity = mode.capacity_of(edge);
                if on_path[next.index()] || capacity == 0 {
                    continue;
                }
                on_path[next.index()] = true;
                walk(graph, next, destination, mode, on_path, narrowest.min(capacity), best);
                on_path[next.index()] = false;
            }
        }

        let mut on_path = vec![false; graph.node_count()];
        on_path[source.index()] = true;
        let mut best = None;
        walk(graph, source, destination, mode, &mut on_path, u32::MAX, &mut best);
        best
    }

    fn random_graph(rng: &mut StdRng) -> Graph {
        let node_count = rng.gen_range(2..=8);
        let mut links = Vec::new();
        for a in 0..node_count {
            for b in a + 1..node_count {
                if rng.gen_bool(0.4) {
                    links.push((a, b, rng.gen_range(0..=6)));
                }
            }
        }
        Graph::from_links(node_count, &links).unwrap()
    }

    #[test]
    fn test_prefers_wider_detour() {
        let graph = triangle();

        let widest = widest_path(&graph, NodeId(0), NodeId(2), CapacityMode::Static)
            .unwrap()
            .unwrap();

        assert_eq!(2, widest.bottleneck());
        assert_eq!(vec!["0-1", "1-2"], widest.path().labels(&graph));
    }

    #[test]
    fn test_dynamic_mode_sees_consumed_capacity() {
        let mut graph = triangle();
        graph.reserve(&[EdgeId(0)]).unwrap();
        graph.reserve(&[EdgeId(0)]).unwrap();
        assert_eq!(0, graph.edge_by_id(EdgeId(0)).capacity());

        let widest = widest_path(&graph, NodeId(0), NodeId(2), CapacityMode::Dynamic)
            .unwrap()
            .unwrap();
        assert_eq!(1, widest.bottleneck());
        assert_eq!(vec!["0-2"], widest.path().labels(&graph));

        let fixed = widest_path(&graph, NodeId(0), NodeId(2), CapacityMode::Static)
            .unwrap()
            .unwrap();
        assert_eq!(vec!["0-1", "1-2"], fixed.path().labels(&graph));
    }

    #[test]
    fn test_isolated_node_has_no_path() {
        let graph = triangle();

        assert_eq!(
            None,
            widest_path(&graph, NodeId(0), NodeId(3), CapacityMode::Dynamic).unwrap()
        );
    }

    #[test]
    fn test_exhausted_edges_carry_nothing() {
        let mut graph = Graph::from_links(2, &[(0, 1, 1)]).unwrap();
        graph.reserve(&[EdgeId(0)]).unwrap();

        assert_eq!(
            None,
            widest_path(&graph, NodeId(0), NodeId(1), CapacityMode::Dynamic).unwrap()
        );
    }

    #[test]
    fn test_empty_graph_has_no_path() {
        let graph = Graph::from_links(2, &[]).unwrap();

        assert_eq!(
            None,
            widest_path(&graph, NodeId(0), NodeId(1), CapacityMode::Static).unwrap()
        );
    }

    #[test]
    fn test_rejects_degenerate_requests() {
        let graph = triangle();

        assert_eq!(
            Err(GraphError::SameEndpoints(1)),
            widest_path(&graph, NodeId(1), NodeId(1), CapacityMode::Dynamic)
        );
        assert!(
            widest_path(&graph, NodeId(0), NodeId(9), CapacityMode::Dynamic)
                .unwrap_err()
                .is_invalid_request()
        );
    }

    #[test]
    fn test_bottleneck_is_tight_and_optimal() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let graph = random_graph(&mut rng);
            let n = graph.node_count();
            let source = NodeId(rng.gen_range(0..n));
            let destination = NodeId((source.index() + rng.gen_range(1..n)) % n);
            let mode = if rng.gen_bool(0.5) {
                CapacityMode::Dynamic
            } else {
                CapacityMode::Static
            };

            let found = widest_path(&graph, source, destination, mode).unwrap();
            let expected = brute_force(&graph, source, destination, mode);
            assert_eq!(expected, found.as_ref().map(|w| w.bottleneck()));

            if let Some(widest) = found {
                let capacities = widest
                    .path()
                    .edges()
                    .iter()
                    .map(|id| mode.capacity_of(graph.edge_by_id(*id)))
                    .collect::<Vec<u32>>();
                assert!(capacities.iter().all(|c| *c >= widest.bottleneck()));
                assert!(capacities.contains(&widest.bottleneck()));
                assert_eq!(Some(widest.bottleneck()), widest.path().bottleneck(&graph, mode));
                assert_eq!(source, widest.path().source());
                assert_eq!(destination, widest.path().destination());
            }
        }
    }

    #[test]
    fn test_search_is_repeatable() {
        let graph = Graph::from_links(5, &[(0, 1, 3), (1, 4, 3), (0, 2, 3), (2, 4, 3), (3, 4, 9)])
            .unwrap();

        let first = widest_path(&graph, NodeId(0), NodeId(4), CapacityMode::Dynamic).unwrap();
        let second = widest_path(&graph, NodeId(0), NodeId(4), CapacityMode::Dynamic).unwrap();
        assert_eq!(first, second);
    }
}
