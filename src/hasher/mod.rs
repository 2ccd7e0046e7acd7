pub mod fingerprint;
pub mod state_vector;
