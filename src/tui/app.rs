use crate::simulation::engine::{SimulationEngine, StepOutcome};
use std::collections::VecDeque;

pub struct App {
    pub engine: SimulationEngine,
    pub running: bool,
    recent: VecDeque<StepOutcome>,
    error: Option<String>,
}

impl App {
    pub const RECENT_LEN: usize = 12;
    pub const BURST: usize = 100;

    pub fn new(engine: SimulationEngine) -> Self {
        Self {
            engine,
            running: true,
            recent: VecDeque::with_capacity(Self::RECENT_LEN),
            error: None,
        }
    }

    /// Runs up to `steps` steps. Stops early at the end of the run or on the
    /// first error, which is kept for display.
    pub fn advance(&mut self, steps: usize) {
        for _ in 0..steps {
            if self.engine.is_finished() || self.error.is_some() {
                return;
            }
            match self.engine.step() {
                Ok(outcome) => {
                    if self.recent.len() == Self::RECENT_LEN {
                        self.recent.pop_back();
                    }
                    self.recent.push_front(outcome);
                }
                Err(e) => self.error = Some(e.to_string()),
            }
        }
    }

    /// Latest outcome first.
    pub fn recent(&self) -> &VecDeque<StepOutcome> {
        &self.recent
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
