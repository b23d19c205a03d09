//! Normalization module - broker dispatch from raw exports to the review queue.

mod normalizer;

#[cfg(test)]
mod normalizer_tests;

pub use normalizer::ImportNormalizer;
