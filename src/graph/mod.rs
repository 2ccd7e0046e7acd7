pub mod analyzer;
pub mod gap_model;
pub mod graph_model;
