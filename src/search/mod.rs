pub mod path;
pub mod reachability;
pub mod shortest;
pub mod widest;
