// Group baseline aggregation.
//
// The pandas-style "groupby + transform" broadcast is split into two explicit
// passes: pass 1 walks the rows once and accumulates per-group aggregates
// into a map (O(rows) time, O(groups) space); pass 2 is the caller looking
// each row's key back up in the map. Rows whose key closure returns `None`
// are excluded entirely, which is how per-family subsets (e.g. only tee
// shots) are expressed.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Default, Clone, Copy)]
struct MeanAcc {
    sum: f64,
    count: u64,
}

/// Arithmetic mean of a target value per group, skipping missing values.
///
/// A group whose members all have a missing value produces no entry, so the
/// downstream lookup yields a missing baseline rather than a default.
pub fn group_means<R, K, KF, VF>(rows: &[R], key: KF, value: VF) -> HashMap<K, f64>
where
    K: Eq + Hash,
    KF: Fn(&R) -> Option<K>,
    VF: Fn(&R) -> Option<f64>,
{
    let mut acc: HashMap<K, MeanAcc> = HashMap::new();
    for row in rows {
        let Some(k) = key(row) else { continue };
        let Some(v) = value(row) else { continue };
        let entry = acc.entry(k).or_default();
        entry.sum += v;
        entry.count += 1;
    }
    acc.into_iter()
        .map(|(k, a)| (k, a.sum / a.count as f64))
        .collect()
}

/// Sum of an integer target per group, skipping missing values.
///
/// Used for round-score totals (sum of strokes across a player's shots in a
/// round). As with `group_means`, an all-missing group produces no entry.
pub fn group_sums<R, K, KF, VF>(rows: &[R], key: KF, value: VF) -> HashMap<K, i64>
where
    K: Eq + Hash,
    KF: Fn(&R) -> Option<K>,
    VF: Fn(&R) -> Option<i64>,
{
    let mut acc: HashMap<K, i64> = HashMap::new();
    for row in rows {
        let Some(k) = key(row) else { continue };
        let Some(v) = value(row) else { continue };
        *acc.entry(k).or_insert(0) += v;
    }
    acc
}

/// Hit rate of a boolean outcome per group: `hit_count / total_count`.
///
/// Every row with a key counts toward the total, hits are rows where the
/// predicate holds. Groups only exist where at least one row carried a key,
/// so an absent group again surfaces as a missing baseline downstream. A
/// rate of exactly 0 or 1 is returned as-is; the zero-substitution and
/// extreme-rate rules decide later what to do with it.
pub fn group_rates<R, K, KF, HF>(rows: &[R], key: KF, hit: HF) -> HashMap<K, f64>
where
    K: Eq + Hash,
    KF: Fn(&R) -> Option<K>,
    HF: Fn(&R) -> bool,
{
    let mut acc: HashMap<K, (u64, u64)> = HashMap::new();
    for row in rows {
        let Some(k) = key(row) else { continue };
        let entry = acc.entry(k).or_insert((0, 0));
        entry.1 += 1;
        if hit(row) {
            entry.0 += 1;
        }
    }
    acc.into_iter()
        .map(|(k, (hits, total))| (k, hits as f64 / total as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
