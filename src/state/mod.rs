pub mod edge_state;
pub mod search_state;
pub mod vertex_state;
