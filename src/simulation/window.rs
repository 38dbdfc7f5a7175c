use crate::search::path::Path;

/// Ring buffer of calls by arrival step. A slot holds the path of an admitted
/// call until it is released, or `None` for a blocked or released call.
pub struct ConnectionWindow {
    slots: Vec<Option<Path>>,
}

impl ConnectionWindow {
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0);
        Self {
            slots: vec![None; len],
        }
    }

    fn slot(&self, step: usize) -> usize {
        step % self.slots.len()
    }

    pub fn record(&mut self, step: usize, call: Option<Path>) {
        let slot = self.slot(step);
        debug_assert!(self.slots[slot].is_none(), "slot {slot} still in flight");
        self.slots[slot] = call;
    }

    /// Takes the call that arrived `hold_time` steps before `step`, if it was
    /// admitted. The slot is emptied so a call is handed out at most once.
    pub fn take_expired(&mut self, step: usize, hold_time: usize) -> Option<Path> {
        let arrival = step.checked_sub(hold_time)?;
        let slot = self.slot(arrival);
        self.slots[slot].take()
    }

    pub fn in_flight(&self) -> impl Iterator<Item = &Path> {
        self.slots.iter().flatten()
    }

    /// Empties every slot, returning the calls that were still in flight.
    pub fn drain(&mut self) -> Vec<Path> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::graph::Graph;
    use crate::graph::node::NodeId;
    use crate::search::reachability::find_path;

    fn call() -> Path {
        let graph = Graph::from_links(2, &[(0, 1, 1)]).unwrap();
        find_path(&graph.view(), NodeId(0), NodeId(1)).unwrap().unwrap()
    }

    #[test]
    fn test_release_happens_once_after_hold_time() {
        let mut window = ConnectionWindow::new(8);
        window.record(0, Some(call()));

        assert_eq!(None, window.take_expired(0, 3));
        assert_eq!(None, window.take_expired(2, 3));
        assert!(window.take_expired(3, 3).is_some());
        assert_eq!(None, window.take_expired(3, 3));
        assert_eq!(0, window.in_flight().count());
    }

    #[test]
    fn test_zero_hold_time_releases_same_step() {
        let mut window = ConnectionWindow::new(4);
        window.record(5, Some(call()));

        assert!(window.take_expired(5, 0).is_some());
    }

    #[test]
    fn test_blocked_slots_release_nothing() {
        let mut window = ConnectionWindow::new(4);
        window.record(0, None);
        window.record(1, Some(call()));

        assert_eq!(None, window.take_expired(1, 1));
        assert_eq!(1, window.drain().len());
        assert_eq!(0, window.in_flight().count());
    }
}
