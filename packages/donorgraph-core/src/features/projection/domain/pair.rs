//! Scored donor pairs

/// Unordered donor pair in unipartite ids, `a < b` when produced by the engine
///
/// `scores[k]` belongs to the k-th metric the engine was asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityPair {
    pub a: u32,
    pub b: u32,
    pub scores: Vec<f64>,
}

impl SimilarityPair {
    pub fn new(a: u32, b: u32, scores: Vec<f64>) -> Self {
        Self { a, b, scores }
    }
}
