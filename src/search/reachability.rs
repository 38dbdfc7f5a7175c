use crate::error::Result;
use crate::graph::node::NodeId;
use crate::graph::view::GraphView;
use crate::search::path::{Path, reconstruct};
use crate::state::search_state::SearchState;

/// Depth-first sweep from `source`. Every node reachable through the view is
/// marked visited with the node it was first reached from.
///
/// Neighbors are explored in edge insertion order, which fixes the tree and
/// therefore the reconstructed path for a given view.
pub fn reach(view: &GraphView, source: NodeId) -> SearchState {
    let mut state = SearchState::new(view.node_count(), source);
    let mut stack = vec![(source, view.incident(source))];

    while let Some((current, edges)) = stack.last_mut() {
        let current = *current;
        match edges.next() {
            Some(edge) => {
                let Some(next) = edge.other_end(current) else {
                    continue;
                };
                if state.is_visited(next) {
                    continue;
                }
                state.vertex_mut(next).reach(current);
                stack.push((next, view.incident(next)));
            }
            None => {
                stack.pop();
            }
        }
    }

    state
}

pub fn is_reachable(view: &GraphView, source: NodeId, destination: NodeId) -> bool {
    reach(view, source).is_visited(destination)
}

/// Any path from `source` to `destination` inside the view, `None` when the
/// two are disconnected.
pub fn find_path(view: &GraphView, source: NodeId, destination: NodeId) -> Result<Option<Path>> {
    view.graph().check_request(source, destination)?;
    let state = reach(view, source);
    if !state.is_visited(destination) {
        return Ok(None);
    }
    reconstruct(view, &state, destination).map(Some)
}
