//! Error types for graph queries and admission runs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node ids must be dense, starting from zero.
    #[error("node at position {position} has id {found}")]
    NodeIdMismatch { position: usize, found: usize },

    /// Edge ids must be dense, starting from zero.
    #[error("edge at position {position} has id {found}")]
    EdgeIdMismatch { position: usize, found: usize },

    #[error("edge {edge} joins node {node} to itself")]
    SelfLoop { edge: usize, node: usize },

    #[error("edge {edge} references unknown node {node}")]
    DanglingEdge { edge: usize, node: usize },

    #[error("unknown node {node}, graph has {node_count} nodes")]
    UnknownNode { node: usize, node_count: usize },

    #[error("source and destination are the same node {0}")]
    SameEndpoints(usize),

    /// A predecessor link that no edge of the searched graph backs. Only a
    /// defect in the search or restriction logic can produce this.
    #[error("no edge joins node {node} to its predecessor {predecessor}")]
    BrokenPredecessor { node: usize, predecessor: usize },

    #[error("node {node} was left without a predecessor before reaching the source")]
    UnreachedPredecessor { node: usize },

    #[error("predecessor chain from node {destination} does not end at the source")]
    CyclicPredecessors { destination: usize },

    #[error("edge {edge} has no capacity left to reserve")]
    CapacityExhausted { edge: String },

    #[error("edge {edge} is already at its initial capacity")]
    CapacityOverflow { edge: String },
}

impl GraphError {
    /// Whether the error is a caller contract violation rather than a defect.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            GraphError::UnknownNode { .. } | GraphError::SameEndpoints(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("connection count must be positive")]
    NoConnections,

    #[error("requests need at least two nodes, topology has {0}")]
    TooFewNodes(usize),

    #[error("run already handled all {0} requests")]
    RunFinished(usize),

    #[error("holding time range {min}..={max} is empty")]
    EmptySweep { min: usize, max: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
