/// Shannon entropy of a cell from its running weight sums
///
/// `amount` admissible states out of `state_count`, with `weight_sum = Σw` and
/// `weight_log_weight_sum = Σ w·ln(w)` over the admissible states. A decided cell
/// has entropy 0 and a fully open cell reports `ln(state_count)` directly.
pub fn cell_entropy(
    amount: usize,
    state_count: usize,
    weight_sum: f64,
    weight_log_weight_sum: f64,
) -> f64 {
    if amount <= 1 {
        0.0
    } else if amount == state_count {
        (state_count as f64).ln()
    } else {
        weight_sum.ln() - weight_log_weight_sum / weight_sum
    }
}

/// Index drawn from `weights` by cumulative weight against one uniform value
///
/// `uniform` must lie in `[0, 1)`. Returns the first index whose cumulative weight
/// reaches `uniform · Σw`, skipping zero weights. A zero total falls back to a uniform pick.
pub fn weighted_index(weights: &[f64], uniform: f64) -> usize {
    let total: f64 = weights.iter().sum();

    debug_assert!(
        total > 0.0 || weights.is_empty(),
        "weighted draw over states that all carry zero weight"
    );
    if total <= 0.0 {
        return ((uniform * weights.len() as f64) as usize).min(weights.len().saturating_sub(1));
    }

    let target = uniform * total;
    let mut cumulative = 0.0;
    for (i, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if weight > 0.0 && target <= cumulative {
            return i;
        }
    }
    // Rounding can leave the target a hair above the final sum
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(0)
}
