use crate::error::Result;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::scenario::basic::BasicScenario;
use crate::scenario::random::RandomScenario;
use rand::Rng;

/// Source of connection requests for one simulation run.
pub trait Scenario {
    fn name(&self) -> &str;
    /// Next request as two distinct nodes.
    fn next_request(&mut self) -> (NodeId, NodeId);
}

/// Uniform pair of distinct nodes. Both ends are redrawn until they differ.
pub fn draw_pair(rng: &mut impl Rng, node_count: usize) -> (NodeId, NodeId) {
    debug_assert!(node_count >= 2);
    loop {
        let source = rng.gen_range(0..node_count);
        let destination = rng.gen_range(0..node_count);
        if source != destination {
            return (NodeId(source), NodeId(destination));
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ScenarioKind {
    /// ten-node reference mesh
    Basic,
    /// seeded random connected mesh
    Random,
}

impl ScenarioKind {
    pub fn build(self, seed: u64) -> Result<(Graph, Box<dyn Scenario>)> {
        match self {
            ScenarioKind::Basic => BasicScenario::build(seed),
            ScenarioKind::Random => RandomScenario::build(seed),
        }
    }
}
