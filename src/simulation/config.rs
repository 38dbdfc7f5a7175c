use crate::error::SimulationError;

pub const DEFAULT_CONNECTION_COUNT: usize = 10_000;
pub const DEFAULT_MIN_HOLD_TIME: usize = 1;
pub const DEFAULT_MAX_HOLD_TIME: usize = 19;
pub const DEFAULT_SEED: u64 = 1;

/// How an incoming request is routed before the capacity check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RoutingPolicy {
    /// widest path over remaining capacity
    #[default]
    Widest,
    /// widest path over initial capacity, i.e. fixed routes
    StaticWidest,
    /// fewest hops, ignoring capacity
    Shortest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// steps an admitted call holds its path
    hold_time: usize,
    /// requests per run, also the length of the release window
    connection_count: usize,
    routing: RoutingPolicy,
}

impl SimulationConfig {
    pub fn new(hold_time: usize, connection_count: usize) -> Result<Self, SimulationError> {
        if connection_count == 0 {
            return Err(SimulationError::NoConnections);
        }
        Ok(Self {
            hold_time,
            connection_count,
            routing: RoutingPolicy::default(),
        })
    }

    pub fn with_routing(mut self, routing: RoutingPolicy) -> Self {
        self.routing = routing;
        self
    }

    pub fn hold_time(&self) -> usize {
        self.hold_time
    }

    pub fn connection_count(&self) -> usize {
        self.connection_count
    }

    pub fn routing(&self) -> RoutingPolicy {
        self.routing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_run() {
        assert!(matches!(
            SimulationConfig::new(3, 0),
            Err(SimulationError::NoConnections)
        ));
    }

    #[test]
    fn test_defaults_to_dynamic_widest_routing() {
        let config = SimulationConfig::new(0, 10).unwrap();

        assert_eq!(0, config.hold_time());
        assert_eq!(RoutingPolicy::Widest, config.routing());
        assert_eq!(
            RoutingPolicy::Shortest,
            config.with_routing(RoutingPolicy::Shortest).routing()
        );
    }
}
