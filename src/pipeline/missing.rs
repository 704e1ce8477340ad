// Missing-data normalization: reclassify sentinel zero values as missing.
//
// Telemetry scorers record "no data" as 0 in several numeric columns, which
// collides with genuine zeros. The generic scan decides per column: if the
// dataset-wide share of zeros exceeds a threshold, the zeros are overwhelmingly
// sensor dropouts and every zero in that column becomes missing. Column-specific
// hand rules (par-3 driving distance, approach proximity) run before the scan
// in the pipelines that need them.

use std::collections::HashMap;
use std::hash::Hash;

use tracing::info;

/// Zero share above which a column's zeros are treated as missing markers.
pub const ZERO_RATE_THRESHOLD_PCT: f64 = 10.0;

/// Strokes-gained magnitude above which a value is a data-entry error.
pub const SG_MAX_ABS: f64 = 0.5;

/// One numeric column subject to the zero-rate scan.
///
/// Plain function pointers rather than boxed closures: the descriptors are
/// static tables in the pipelines.
pub struct ScanColumn<R> {
    pub name: &'static str,
    /// Whether the column holds a present, exactly-zero value in this row.
    pub is_zero: fn(&R) -> bool,
    /// Null the column out in this row.
    pub clear: fn(&mut R),
}

/// Percentage of rows where the column is exactly zero.
///
/// Counted per (event, round, course, hole) group and then aggregated as
/// `sum(group zero counts) / sum(group totals)` — a row-weighted rate, not a
/// mean of per-group rates. Missing values count toward the total but are not
/// zeros. Returns 0 for an empty table.
pub fn zero_rate_percent<R, K, KF>(rows: &[R], group_key: KF, is_zero: fn(&R) -> bool) -> f64
where
    K: Eq + Hash,
    KF: Fn(&R) -> K,
{
    let mut groups: HashMap<K, (u64, u64)> = HashMap::new();
    for row in rows {
        let entry = groups.entry(group_key(row)).or_insert((0, 0));
        entry.1 += 1;
        if is_zero(row) {
            entry.0 += 1;
        }
    }
    let (zeros, total) = groups
        .values()
        .fold((0u64, 0u64), |(z, t), &(gz, gt)| (z + gz, t + gt));
    if total == 0 {
        return 0.0;
    }
    zeros as f64 / total as f64 * 100.0
}

/// Run the zero-rate scan over a set of columns, nulling every zero in each
/// column whose rate exceeds the threshold. Emits a diagnostic notice per
/// normalized column.
pub fn scan_zero_columns<R, K, KF>(rows: &mut [R], columns: &[ScanColumn<R>], group_key: KF)
where
    K: Eq + Hash,
    KF: Fn(&R) -> K,
{
    for column in columns {
        let pct = zero_rate_percent(rows, &group_key, column.is_zero);
        if pct > ZERO_RATE_THRESHOLD_PCT {
            info!(
                "replacing zeros with missing in column {} ({:.1}% zero)",
                column.name, pct
            );
            for row in rows.iter_mut() {
                if (column.is_zero)(row) {
                    (column.clear)(row);
                }
            }
        }
    }
}

/// Null a strokes-gained component whose magnitude exceeds [`SG_MAX_ABS`].
///
/// The boundary is exclusive: a value of exactly 0.5 is retained.
pub fn filter_sg(value: Option<f64>) -> Option<f64> {
    match value {
        Some(v) if v.abs() > SG_MAX_ABS => None,
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
