// Relative-metric derivation: express a row's raw value against its group
// baseline.

/// Delta of a raw value against its broadcast baseline.
///
/// Missing on either side propagates; a row in a group with no baseline never
/// defaults to zero.
pub fn delta(raw: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    match (raw, baseline) {
        (Some(r), Some(b)) => Some(r - b),
        _ => None,
    }
}

/// Directional relative score for a boolean outcome against the group rate:
/// `1 - rate` on a hit, `-rate` on a miss.
///
/// Hitting a fairway everyone hits is worth little; missing one nobody
/// misses costs a lot. Missing rate propagates.
pub fn relative_hit(hit: bool, rate: Option<f64>) -> Option<f64> {
    let rate = rate?;
    Some(if hit { 1.0 - rate } else { -rate })
}

/// Collapse an exactly-zero value to missing.
///
/// Applied to the relative-hit scores, where a zero is ambiguous between "no
/// data" and a genuine zero (a hit at rate 1, or a miss at rate 0). Both
/// collapse to missing; the integration tests pin this down as a documented
/// limitation rather than something to repair.
pub fn null_zero(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v == 0.0 => None,
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
