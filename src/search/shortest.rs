use crate::error::Result;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::search::path::{Path, reconstruct};
use crate::state::search_state::SearchState;
use tracing::trace;

/// Label-setting search by edge length over the whole graph.
///
/// Stops as soon as `destination` is finalized. When it cannot be reached the
/// returned state simply leaves it unvisited with no distance.
pub fn shortest_path(graph: &Graph, source: NodeId, destination: NodeId) -> Result<SearchState> {
    graph.check_request(source, destination)?;
    let view = graph.view();
    let mut state = SearchState::new(graph.node_count(), source);
    let mut current = source;

    loop {
        let base = state.distance(current).unwrap_or(u64::MAX);
        for edge in view.incident(current) {
            let Some(next) = edge.other_end(current) else {
                continue;
            };
            if state.is_visited(next) {
                continue;
            }
            state
                .vertex_mut(next)
                .relax(base.saturating_add(edge.length() as u64), current);
        }

        // linear scan, ties go to the lowest id
        let closest = state
            .vertices()
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_visited())
            .filter_map(|(i, v)| v.distance().map(|d| (d, i)))
            .min();
        let Some((_, next)) = closest else {
            trace!(%source, %destination, "destination unreachable");
            break;
        };

        current = NodeId(next);
        state.vertex_mut(current).visit();
        if current == destination {
            break;
        }
    }

    Ok(state)
}

/// Shortest path by total length, `None` when the endpoints are disconnected.
pub fn shortest_route(graph: &Graph, source: NodeId, destination: NodeId) -> Result<Option<Path>> {
    let state = shortest_path(graph, source, destination)?;
    if !state.is_visited(destination) {
        return Ok(None);
    }
    reconstruct(&graph.view(), &state, destination).map(Some)
}
