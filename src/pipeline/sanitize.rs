// Extreme-rate sanitization for group hit rates.

/// Null out rates in (0, 0.1) or (0.9, 1).
///
/// Rates that extreme come from tiny sample groups, not genuine population
/// skew. Exact 0 and exact 1 are left alone here; the zero-substitution step
/// runs before this rule and owns the exact-zero sentinel.
pub fn sanitize_extreme_rate(rate: Option<f64>) -> Option<f64> {
    match rate {
        Some(r) if (r > 0.0 && r < 0.1) || (r > 0.9 && r < 1.0) => None,
        other => other,
    }
}
