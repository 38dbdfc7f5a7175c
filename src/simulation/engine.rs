use crate::error::SimulationError;
use crate::graph::edge::EdgeId;
use crate::graph::graph::Graph;
use crate::graph::node::NodeId;
use crate::scenario::scenario::Scenario;
use crate::search::path::Path;
use crate::search::shortest::shortest_route;
use crate::search::widest::{CapacityMode, widest_path};
use crate::simulation::config::{RoutingPolicy, SimulationConfig};
use crate::simulation::window::ConnectionWindow;
use crate::state::edge_state::EdgeState;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockReason {
    /// the endpoints are disconnected at every positive capacity
    NoPath,
    /// a route exists but one of its edges is full
    NoCapacity,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Admitted {
        source: NodeId,
        destination: NodeId,
        path: Path,
        /// narrowest remaining capacity on the path before admission
        bottleneck: u32,
    },
    Blocked {
        source: NodeId,
        destination: NodeId,
        reason: BlockReason,
    },
}

impl StepOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, StepOutcome::Admitted { .. })
    }
}

/// Counters of one run, reported once per holding time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    hold_time: usize,
    steps: usize,
    admitted: usize,
    blocked: usize,
    no_path: usize,
}

impl RunReport {
    pub fn hold_time(&self) -> usize {
        self.hold_time
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn admitted(&self) -> usize {
        self.admitted
    }

    /// Blocked requests, including those with no path at all.
    pub fn blocked(&self) -> usize {
        self.blocked
    }

    pub fn no_path(&self) -> usize {
        self.no_path
    }

    /// Blocked share of the requests seen so far, in `[0, 1]`.
    pub fn blocking_rate(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.blocked as f64 / self.steps as f64
        }
    }
}

pub struct SimulationEngine {
    graph: Graph,
    scenario: Box<dyn Scenario>,
    config: SimulationConfig,
    window: ConnectionWindow,
    edge_states: Vec<EdgeState>,
    step: usize,
    admitted: usize,
    blocked: usize,
    no_path: usize,
}

impl SimulationEngine {
    pub fn new(
        graph: Graph,
        scenario: Box<dyn Scenario>,
        config: SimulationConfig,
    ) -> Result<Self, SimulationError> {
        if graph.node_count() < 2 {
            return Err(SimulationError::TooFewNodes(graph.node_count()));
        }
        let edge_states = vec![EdgeState::new(); graph.edge_count()];
        Ok(Self {
            graph,
            scenario,
            window: ConnectionWindow::new(config.connection_count()),
            config,
            edge_states,
            step: 0,
            admitted: 0,
            blocked: 0,
            no_path: 0,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn edge_states(&self) -> &[EdgeState] {
        &self.edge_states
    }

    pub fn edge_state(&self, id: EdgeId) -> &EdgeState {
        &self.edge_states[id.index()]
    }

    /// Steps taken so far.
    pub fn current_step(&self) -> usize {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.step >= self.config.connection_count()
    }

    pub fn in_flight(&self) -> usize {
        self.window.in_flight().count()
    }

    pub fn report(&self) -> RunReport {
        RunReport {
            hold_time: self.config.hold_time(),
            steps: self.step,
            admitted: self.admitted,
            blocked: self.blocked,
            no_path: self.no_path,
        }
    }

    fn route(&self, source: NodeId, destination: NodeId) -> Result<Option<Path>, SimulationError> {
        let path = match self.config.routing() {
            RoutingPolicy::Widest => {
                widest_path(&self.graph, source, destination, CapacityMode::Dynamic)?
                    .map(|w| w.into_path())
            }
            RoutingPolicy::StaticWidest => {
                widest_path(&self.graph, source, destination, CapacityMode::Static)?
                    .map(|w| w.into_path())
            }
            RoutingPolicy::Shortest => shortest_route(&self.graph, source, destination)?,
        };
        Ok(path)
    }

    /// Handles the next request, then releases the call whose holding time
    /// ends at this step. Fails once every request of the run was handled.
    pub fn step(&mut self) -> Result<StepOutcome, SimulationError> {
        if self.is_finished() {
            return Err(SimulationError::RunFinished(self.config.connection_count()));
        }
        let t = self.step;
        let (source, destination) = self.scenario.next_request();

        let outcome = match self.route(source, destination)? {
            None => StepOutcome::Blocked {
                source,
                destination,
                reason: BlockReason::NoPath,
            },
            Some(path) => match path.bottleneck(&self.graph, CapacityMode::Dynamic) {
                Some(bottleneck) if bottleneck > 0 => {
                    self.graph.reserve(path.edges())?;
                    path.edges()
                        .iter()
                        .for_each(|id| self.edge_states[id.index()].reserve());
                    StepOutcome::Admitted {
                        source,
                        destination,
                        path,
                        bottleneck,
                    }
                }
                _ => StepOutcome::Blocked {
                    source,
                    destination,
                    reason: BlockReason::NoCapacity,
                },
            },
        };

        match &outcome {
            StepOutcome::Admitted { path, bottleneck, .. } => {
                debug!(step = t, %source, %destination, bottleneck, hops = path.hop_count(), "admitted");
                self.admitted += 1;
                self.window.record(t, Some(path.clone()));
            }
            StepOutcome::Blocked { reason, .. } => {
                self.blocked += 1;
                if *reason == BlockReason::NoPath {
                    warn!(step = t, %source, %destination, "no path at any capacity");
                    self.no_path += 1;
                } else {
                    debug!(step = t, %source, %destination, ?reason, "blocked");
                }
                self.window.record(t, None);
            }
        }

        if let Some(expired) = self.window.take_expired(t, self.config.hold_time()) {
            self.release(&expired)?;
        }

        self.step += 1;
        Ok(outcome)
    }

    fn release(&mut self, path: &Path) -> Result<(), SimulationError> {
        self.graph.release(path.edges())?;
        path.edges()
            .iter()
            .for_each(|id| self.edge_states[id.index()].release());
        Ok(())
    }

    /// Steps until every request of the run has been handled.
    pub fn run(&mut self) -> Result<RunReport, SimulationError> {
        while !self.is_finished() {
            self.step()?;
        }
        let report = self.report();
        info!(
            scenario = self.scenario.name(),
            hold_time = report.hold_time(),
            blocked = report.blocked(),
            no_path = report.no_path(),
            rate = report.blocking_rate(),
            "run finished"
        );
        Ok(report)
    }

    /// Releases every call still in flight. Returns how many were released.
    pub fn drain(&mut self) -> Result<usize, SimulationError> {
        let calls = self.window.drain();
        for path in &calls {
            self.release(path)?;
        }
        Ok(calls.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::basic::BasicScenario;
    use crate::scenario::random::RandomScenario;
    use approx::assert_relative_eq;

    pub struct TestScenario {
        requests: Vec<(NodeId, NodeId)>,
        next: usize,
    }

    impl TestScenario {
        pub fn new(requests: Vec<(usize, usize)>) -> Self {
            Self {
                requests: requests
                    .into_iter()
                    .map(|(a, b)| (NodeId(a), NodeId(b)))
                    .collect(),
                next: 0,
            }
        }
    }

    impl Scenario for TestScenario {
        fn name(&self) -> &str {
            "test"
        }

        fn next_request(&mut self) -> (NodeId, NodeId) {
            let request = self.requests[self.next % self.requests.len()];
            self.next += 1;
            request
        }
    }

    fn single_link(hold_time: usize, steps: usize, routing: RoutingPolicy) -> SimulationEngine {
        let graph = Graph::from_links(2, &[(0, 1, 1)]).unwrap();
        let config = SimulationConfig::new(hold_time, steps)
            .unwrap()
            .with_routing(routing);
        SimulationEngine::new(graph, Box::new(TestScenario::new(vec![(0, 1)])), config).unwrap()
    }

    #[test]
    fn test_release_after_exact_hold_time() {
        let mut engine = single_link(2, 6, RoutingPolicy::Widest);

        let admitted = (0..6)
            .map(|_| engine.step().unwrap().is_admitted())
            .collect::<Vec<bool>>();

        assert_eq!(vec![true, false, false, true, false, false], admitted);
        let report = engine.report();
        assert_eq!(2, report.admitted());
        assert_eq!(4, report.blocked());
        // dynamic routing never sees the full link
        assert_eq!(4, report.no_path());
        assert_relative_eq!(4.0 / 6.0, report.blocking_rate());
    }

    #[test]
    fn test_fixed_routes_block_on_capacity() {
        let mut engine = single_link(2, 6, RoutingPolicy::StaticWidest);

        assert!(engine.step().unwrap().is_admitted());
        assert_eq!(
            StepOutcome::Blocked {
                source: NodeId(0),
                destination: NodeId(1),
                reason: BlockReason::NoCapacity,
            },
            engine.step().unwrap()
        );

        let report = engine.run().unwrap();
        assert_eq!(4, report.blocked());
        assert_eq!(0, report.no_path());
    }

    #[test]
    fn test_zero_hold_time_never_holds_capacity() {
        let mut engine = single_link(0, 50, RoutingPolicy::Widest);

        while !engine.is_finished() {
            assert!(engine.step().unwrap().is_admitted());
            assert_eq!(0, engine.graph().total_in_use());
        }
        assert_eq!(0, engine.report().blocked());
        assert_relative_eq!(0.0, engine.report().blocking_rate());
    }

    #[test]
    fn test_admitted_outcome_reports_pre_admission_bottleneck() {
        let graph = Graph::from_links(4, &[(0, 1, 2), (1, 2, 3), (0, 2, 1)]).unwrap();
        let config = SimulationConfig::new(5, 10).unwrap();
        let mut engine =
            SimulationEngine::new(graph, Box::new(TestScenario::new(vec![(0, 2)])), config).unwrap();

        match engine.step().unwrap() {
            StepOutcome::Admitted {
                path, bottleneck, ..
            } => {
                assert_eq!(2, bottleneck);
                assert_eq!(vec!["0-1", "1-2"], path.labels(engine.graph()));
            }
            blocked => panic!("expected admission, got {blocked:?}"),
        }
        assert_eq!(1, engine.graph().edge_by_id(EdgeId(0)).capacity());
        assert_eq!(1, engine.edge_state(EdgeId(0)).in_flight());
        assert_eq!(0, engine.edge_state(EdgeId(2)).in_flight());
    }

    #[test]
    fn test_capacity_stays_in_range_and_drains_back() {
        for routing in [
            RoutingPolicy::Widest,
            RoutingPolicy::StaticWidest,
            RoutingPolicy::Shortest,
        ] {
            let (graph, scenario) = BasicScenario::build(17).unwrap();
            let config = SimulationConfig::new(7, 2000).unwrap().with_routing(routing);
            let mut engine = SimulationEngine::new(graph, scenario, config).unwrap();

            while !engine.is_finished() {
                engine.step().unwrap();
                assert!(engine
                    .graph()
                    .edges()
                    .iter()
                    .all(|e| e.capacity() <= e.initial_capacity()));
                let held = engine
                    .edge_states()
                    .iter()
                    .map(|s| s.in_flight())
                    .sum::<u64>();
                assert_eq!(engine.graph().total_in_use(), held);
            }

            assert!(engine.in_flight() <= 7);
            engine.drain().unwrap();

            assert_eq!(0, engine.in_flight());
            for e in engine.graph().edges() {
                assert_eq!(e.initial_capacity(), e.capacity());
                let state = engine.edge_state(e.id());
                assert_eq!(state.reserved(), state.released());
            }
        }
    }

    #[test]
    fn test_longer_holding_blocks_more() {
        let rate = |hold_time| {
            let (graph, scenario) = BasicScenario::build(3).unwrap();
            let config = SimulationConfig::new(hold_time, 5000).unwrap();
            SimulationEngine::new(graph, scenario, config)
                .unwrap()
                .run()
                .unwrap()
                .blocking_rate()
        };

        assert_relative_eq!(0.0, rate(1));
        assert!(rate(40) > rate(2));
    }

    #[test]
    fn test_runs_are_reproducible() {
        let run = || {
            let (graph, scenario) = RandomScenario::build(21).unwrap();
            let config = SimulationConfig::new(12, 1000).unwrap();
            SimulationEngine::new(graph, scenario, config)
                .unwrap()
                .run()
                .unwrap()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_rejects_single_node_topology() {
        let graph = Graph::from_links(1, &[]).unwrap();
        let config = SimulationConfig::new(1, 1).unwrap();

        assert!(matches!(
            SimulationEngine::new(graph, Box::new(TestScenario::new(vec![(0, 0)])), config),
            Err(SimulationError::TooFewNodes(1))
        ));
    }

    #[test]
    fn test_step_after_finish_keeps_calls_in_flight() {
        let (graph, scenario) = BasicScenario::build(4).unwrap();
        let config = SimulationConfig::new(10, 5).unwrap();
        let mut engine = SimulationEngine::new(graph, scenario, config).unwrap();

        let report = engine.run().unwrap();
        let in_use = engine.graph().total_in_use();
        assert!(in_use > 0);
        assert_eq!(report.admitted(), engine.in_flight());

        for _ in 0..7 {
            assert!(matches!(
                engine.step(),
                Err(SimulationError::RunFinished(5))
            ));
        }
        assert_eq!(report, engine.report());
        assert_eq!(in_use, engine.graph().total_in_use());

        assert_eq!(report.admitted(), engine.drain().unwrap());
        assert_eq!(0, engine.graph().total_in_use());
    }
}
