pub mod cluster_model;
pub mod clustering;
