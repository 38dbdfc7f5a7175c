/// Admission ledger of a single edge over one simulation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeState {
    reserved: u64,
    released: u64,
}

impl EdgeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserved(&self) -> u64 {
        self.reserved
    }

    pub fn released(&self) -> u64 {
        self.released
    }

    /// Calls currently holding a unit of this edge.
    pub fn in_flight(&self) -> u64 {
        self.reserved - self.released
    }

    pub fn reserve(&mut self) {
        self.reserved += 1;
    }

    pub fn release(&mut self) {
        debug_assert!(self.released < self.reserved);
        self.released += 1;
    }
}
