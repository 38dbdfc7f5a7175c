use crate::error::Result;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::scenario::scenario::{Scenario, draw_pair};
use rand::{SeedableRng, rngs::StdRng};

/// Reference ten-node mesh with link capacities between 3 and 5.
pub struct BasicScenario {
    rng: StdRng,
    node_count: usize,
}

impl BasicScenario {
    const NODE_COUNT: usize = 10;

    const LINKS: [(usize, usize, u32); 16] = [
        (0, 1, 3),
        (0, 3, 3),
        (1, 2, 3),
        (1, 3, 4),
        (2, 4, 4),
        (2, 5, 3),
        (3, 4, 5),
        (3, 7, 3),
        (4, 5, 5),
        (4, 7, 4),
        (5, 6, 3),
        (5, 8, 4),
        (6, 8, 3),
        (7, 8, 4),
        (7, 9, 3),
        (8, 9, 3),
    ];

    pub fn graph() -> Result<Graph> {
        Graph::from_links(Self::NODE_COUNT, &Self::LINKS)
    }

    pub fn build(seed: u64) -> Result<(Graph, Box<dyn Scenario>)> {
        let graph = Self::graph()?;
        let scenario = BasicScenario {
            rng: StdRng::seed_from_u64(seed),
            node_count: graph.node_count(),
        };
        Ok((graph, Box::new(scenario)))
    }
}

impl Scenario for BasicScenario {
    fn name(&self) -> &str {
        "basic"
    }

    fn next_request(&mut self) -> (NodeId, NodeId) {
        draw_pair(&mut self.rng, self.node_count)
    }
}
