//! Tests for cell entropy and cumulative weighted draws

#[cfg(test)]
mod tests {
    use wavetile::math::probability::{cell_entropy, weighted_index};

    // Tests decided and empty cells have zero entropy
    // Verified by returning ln(1) only for a single state
    #[test]
    fn test_entropy_of_decided_cell() {
        assert!(cell_entropy(1, 4, 2.0, 0.0).abs() < f64::EPSILON);
        assert!(cell_entropy(0, 4, 0.0, 0.0).abs() < f64::EPSILON);
    }

    // Tests a fully open cell reports ln of the state count
    // Verified by always evaluating the weighted formula
    #[test]
    fn test_entropy_of_open_cell() {
        // Weights that would give a different value through the formula
        let entropy = cell_entropy(3, 3, 6.0, 2.0 * 2f64.ln() + 3.0 * 3f64.ln());
        assert!((entropy - 3f64.ln()).abs() < 1e-12);
    }

    // Tests the weighted entropy of a partial cell
    // Verified by dividing by the count instead of the weight sum
    #[test]
    fn test_entropy_of_partial_cell() {
        // Two equal weights out of three states behave like a fair coin
        let entropy = cell_entropy(2, 3, 2.0, 0.0);
        assert!((entropy - 2f64.ln()).abs() < 1e-12);

        let skewed = cell_entropy(2, 3, 4.0, 3.0 * 3f64.ln());
        let expected = -(0.25f64 * 0.25f64.ln() + 0.75 * 0.75f64.ln());
        assert!((skewed - expected).abs() < 1e-12);
    }

    // Tests cumulative selection boundaries
    // Verified by using a strict comparison against the cumulative sum
    #[test]
    fn test_weighted_index_boundaries() {
        let weights = [1.0, 1.0, 2.0];

        assert_eq!(weighted_index(&weights, 0.0), 0);
        assert_eq!(weighted_index(&weights, 0.25), 0);
        assert_eq!(weighted_index(&weights, 0.3), 1);
        assert_eq!(weighted_index(&weights, 0.5), 1);
        assert_eq!(weighted_index(&weights, 0.51), 2);
        assert_eq!(weighted_index(&weights, 0.999), 2);
    }

    // Tests zero-weight entries are never drawn
    // Verified by dropping the positive-weight check
    #[test]
    fn test_weighted_index_skips_zero_weights() {
        let weights = [0.0, 3.0, 0.0, 1.0, 0.0];

        assert_eq!(weighted_index(&weights, 0.0), 1);
        assert_eq!(weighted_index(&weights, 0.74), 1);
        assert_eq!(weighted_index(&weights, 0.76), 3);
        assert_eq!(weighted_index(&weights, 1.0 - f64::EPSILON), 3);
    }

    // Tests draws follow the weights over many uniform values
    // Verified by ignoring the weights and drawing uniformly
    #[test]
    fn test_weighted_index_distribution() {
        let weights = [1.0, 3.0];
        let samples = 1000;
        let hits = (0..samples)
            .map(|i| weighted_index(&weights, f64::from(i) / f64::from(samples)))
            .filter(|&index| index == 1)
            .count();

        assert!((740..=760).contains(&hits));
    }
}
