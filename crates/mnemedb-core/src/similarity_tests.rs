//! Tests for `similarity` module

use super::similarity::SimilarityMetric;

#[test]
fn test_dot_product_worked_example() {
    // dot([0.1, 0.2, 0.9], [0.1, 0.2, 0.9]) = 0.01 + 0.04 + 0.81 = 0.86
    let v = [0.1, 0.2, 0.9];
    let sim = SimilarityMetric::DotProduct.calculate(&v, &v);
    assert!((sim - 0.86).abs() < 1e-6);
}

/// Test: dot product is NOT normalized — magnitude matters
#[test]
fn test_dot_product_is_unnormalized() {
    let unit = [1.0, 0.0];
    let scaled = [2.0, 0.0];
    assert!((SimilarityMetric::DotProduct.calculate(&scaled, &unit) - 2.0).abs() < f32::EPSILON);
}

#[test]
fn test_cosine_identical_direction_is_one() {
    let a = [3.0, 4.0];
    let b = [6.0, 8.0];
    let sim = SimilarityMetric::Cosine.calculate(&a, &b);
    assert!((sim - 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_orthogonal_is_zero() {
    let a = [1.0, 0.0];
    let b = [0.0, 1.0];
    assert_eq!(SimilarityMetric::Cosine.calculate(&a, &b), 0.0);
}

#[test]
fn test_cosine_zero_magnitude_is_zero() {
    let zero = [0.0, 0.0];
    let b = [1.0, 1.0];
    assert_eq!(SimilarityMetric::Cosine.calculate(&zero, &b), 0.0);
}

#[test]
fn test_default_metric_is_dot_product() {
    assert_eq!(SimilarityMetric::default(), SimilarityMetric::DotProduct);
}

#[test]
fn test_metric_serde_snake_case() {
    assert_eq!(
        serde_json::to_string(&SimilarityMetric::DotProduct).unwrap(),
        "\"dot_product\""
    );
    let metric: SimilarityMetric = serde_json::from_str("\"cosine\"").unwrap();
    assert_eq!(metric, SimilarityMetric::Cosine);
}
