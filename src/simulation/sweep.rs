use crate::error::SimulationError;
use crate::scenario::scenario::ScenarioKind;
use crate::simulation::config::{RoutingPolicy, SimulationConfig};
use crate::simulation::engine::{RunReport, SimulationEngine};
use std::ops::RangeInclusive;
use tracing::debug;

/// One run per holding time, each on a freshly built topology with the same
/// seed, so every run sees the same request stream.
pub struct Sweep {
    scenario: ScenarioKind,
    seed: u64,
    hold_times: RangeInclusive<usize>,
    connection_count: usize,
    routing: RoutingPolicy,
}

impl Sweep {
    pub fn new(
        scenario: ScenarioKind,
        seed: u64,
        hold_times: RangeInclusive<usize>,
        connection_count: usize,
        routing: RoutingPolicy,
    ) -> Result<Self, SimulationError> {
        if hold_times.is_empty() {
            return Err(SimulationError::EmptySweep {
                min: *hold_times.start(),
                max: *hold_times.end(),
            });
        }
        if connection_count == 0 {
            return Err(SimulationError::NoConnections);
        }
        Ok(Self {
            scenario,
            seed,
            hold_times,
            connection_count,
            routing,
        })
    }

    pub fn run(&self) -> Result<Vec<RunReport>, SimulationError> {
        self.hold_times
            .clone()
            .map(|hold_time| self.run_one(hold_time))
            .collect()
    }

    fn run_one(&self, hold_time: usize) -> Result<RunReport, SimulationError> {
        let (graph, scenario) = self.scenario.build(self.seed)?;
        debug!(
            scenario = scenario.name(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            hold_time,
            "starting run"
        );
        let config =
            SimulationConfig::new(hold_time, self.connection_count)?.with_routing(self.routing);
        SimulationEngine::new(graph, scenario, config)?.run()
    }
}

/// One line per run: holding time, blocking percentage, no-path and blocked counts.
pub fn format_report(report: &RunReport) -> String {
    format!(
        "{}, {}, notfound {}, failed {}",
        report.hold_time(),
        report.blocking_rate() * 100.0,
        report.no_path(),
        report.blocked()
    )
}
