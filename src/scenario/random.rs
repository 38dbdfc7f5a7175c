use crate::error::Result;
use crate::graph::edge::{Edge, EdgeId};
use crate::graph::graph::Graph;
use crate::graph::node::{Node, NodeId};
use crate::scenario::scenario::{Scenario, draw_pair};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Connected mesh grown from a random spanning tree plus extra links.
pub struct RandomScenario {
    rng: StdRng,
    node_count: usize,
}

impl RandomScenario {
    const NODE_COUNT: usize = 24;
    const EXTRA_LINKS_PER_NODE: usize = 1;
    const CAPACITIES: [u32; 4] = [2, 3, 4, 5];

    pub fn build(seed: u64) -> Result<(Graph, Box<dyn Scenario>)> {
        Self::build_sized(seed, Self::NODE_COUNT)
    }

    pub fn build_sized(seed: u64, node_count: usize) -> Result<(Graph, Box<dyn Scenario>)> {
        let mut rng = StdRng::seed_from_u64(seed);

        let nodes = (0..node_count).map(Node::numbered).collect::<Vec<Node>>();
        let mut edges = Vec::new();
        let mut has_edge = vec![vec![false; node_count]; node_count];

        let mut add_edge = |rng: &mut StdRng, a: NodeId, b: NodeId| {
            if a == b || has_edge[a.index()][b.index()] {
                return;
            }
            has_edge[a.index()][b.index()] = true;
            has_edge[b.index()][a.index()] = true;
            let capacity = Self::CAPACITIES[rng.gen_range(0..Self::CAPACITIES.len())];
            edges.push(Edge::new(EdgeId(edges.len()), a, b, capacity));
        };

        if node_count > 0 {
            let mut reachable = vec![false; node_count];
            reachable[0] = true;
            let mut frontier = vec![NodeId(0)];
            while reachable.iter().any(|r| !r) {
                let from = frontier[rng.gen_range(0..frontier.len())];
                let to = NodeId(rng.gen_range(0..node_count));
                if !reachable[to.index()] {
                    add_edge(&mut rng, from, to);
                    reachable[to.index()] = true;
                    frontier.push(to);
                }
            }

            for _ in 0..node_count * Self::EXTRA_LINKS_PER_NODE {
                let a = NodeId(rng.gen_range(0..node_count));
                let b = NodeId(rng.gen_range(0..node_count));
                add_edge(&mut rng, a, b);
            }
        }

        let graph = Graph::new(nodes, edges)?;
        let scenario = RandomScenario {
            rng,
            node_count: graph.node_count(),
        };

        Ok((graph, Box::new(scenario)))
    }
}

impl Scenario for RandomScenario {
    fn name(&self) -> &str {
        "random"
    }

    fn next_request(&mut self) -> (NodeId, NodeId) {
        draw_pair(&mut self.rng, self.node_count)
    }
}
