//! Cosine similarity over embedding vectors

use crate::provider::EmbeddingVector;

/// Cosine similarity between two vectors: `dot(a,b) / (|a| * |b|)`.
///
/// Returns 0.0 when the dimensions differ or either vector has zero
/// magnitude, so callers never divide by zero and incomparable vectors
/// simply fall below any positive threshold.
pub fn cosine_similarity(a: &EmbeddingVector, b: &EmbeddingVector) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    dot / (mag_a * mag_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_identical_vectors_similarity_one() {
        let v = vec![0.5, -1.0, 2.0];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors_similarity_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_opposite_vectors_similarity_negative_one() {
        let a = vec![1.0, 2.0];
        let b = vec![-1.0, -2.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_magnitude_is_zero() {
        let zero = vec![0.0, 0.0, 0.0];
        let v = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&zero, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &zero), 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_zero() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_empty_vectors_are_zero() {
        assert_eq!(cosine_similarity(&vec![], &vec![]), 0.0);
    }

    #[quickcheck]
    fn prop_similarity_is_symmetric(a: Vec<f32>, b: Vec<f32>) -> bool {
        let finite =
            |v: &[f32]| v.iter().all(|x| x.is_finite() && x.abs() < 1e6);
        if !finite(&a) || !finite(&b) {
            return true;
        }
        cosine_similarity(&a, &b) == cosine_similarity(&b, &a)
    }

    #[quickcheck]
    fn prop_self_similarity_is_one(a: Vec<f32>) -> bool {
        let usable = a.iter().all(|x| x.is_finite() && x.abs() < 1e3);
        if !usable {
            return true;
        }
        let mag: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let sim = cosine_similarity(&a, &a);
        if mag == 0.0 {
            sim == 0.0
        } else {
            (sim - 1.0).abs() < 1e-3
        }
    }

    #[quickcheck]
    fn prop_mismatched_dimensions_are_zero(a: Vec<f32>, b: Vec<f32>) -> bool {
        if a.len() == b.len() {
            return true;
        }
        cosine_similarity(&a, &b) == 0.0
    }
}
