pub mod engine;
pub mod levenshtein;
