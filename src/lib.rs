//! Widest-path routing and call admission over capacity-limited meshes.

pub mod error;
pub mod graph;
pub mod scenario;
pub mod search;
pub mod simulation;
pub mod state;
pub mod tui;
