// Hole-level pipeline: missing-data normalization followed by baseline and
// relative-metric derivation.
//
// Stage order matters: the normalizer's hand rules run before the generic
// zero scan, the zero scan before the SG magnitude filter, and for the hit
// rates the zero-substitution runs before the extreme-rate sanitizer.
// Reversing any of these changes which sentinel rule wins for edge groups.

use tracing::info;

use crate::pipeline::baseline::{group_means, group_rates};
use crate::pipeline::missing::{filter_sg, scan_zero_columns, ScanColumn};
use crate::pipeline::relative::{delta, null_zero, relative_hit};
use crate::pipeline::sanitize::sanitize_extreme_rate;
use crate::records::{HoleRecord, Lie};

/// Run the full hole-level pipeline over a parsed table.
pub fn run(mut rows: Vec<HoleRecord>) -> Vec<HoleRecord> {
    normalize_missing(&mut rows);
    let rows = engineer_features(rows);
    info!("hole pipeline complete: {} rows enriched", rows.len());
    rows
}

// ---------------------------------------------------------------------------
// Missing-data normalization
// ---------------------------------------------------------------------------

/// Columns subject to the generic zero-rate scan.
const SCAN_COLUMNS: [ScanColumn<HoleRecord>; 7] = [
    ScanColumn {
        name: "DrivingDistance",
        is_zero: |r| r.driving_distance == Some(0),
        clear: |r| r.driving_distance = None,
    },
    ScanColumn {
        name: "Yardage",
        is_zero: |r| r.yardage == Some(0),
        clear: |r| r.yardage = None,
    },
    ScanColumn {
        name: "SGOTT",
        is_zero: |r| r.sg_ott == Some(0.0),
        clear: |r| r.sg_ott = None,
    },
    ScanColumn {
        name: "SGAPP",
        is_zero: |r| r.sg_app == Some(0.0),
        clear: |r| r.sg_app = None,
    },
    ScanColumn {
        name: "SGARG",
        is_zero: |r| r.sg_arg == Some(0.0),
        clear: |r| r.sg_arg = None,
    },
    ScanColumn {
        name: "SGPutt",
        is_zero: |r| r.sg_putt == Some(0.0),
        clear: |r| r.sg_putt = None,
    },
    ScanColumn {
        name: "AppProx",
        is_zero: |r| r.app_prox == Some(0),
        clear: |r| r.app_prox = None,
    },
];

/// Normalize missing data in place.
///
/// Hand rules first: a par 3 has no meaningful tee shot distance, and an
/// approach proximity of zero is only genuine when the approach holed out.
/// Then the generic zero-rate scan, then the unconditional SG magnitude
/// filter.
pub fn normalize_missing(rows: &mut [HoleRecord]) {
    for row in rows.iter_mut() {
        if row.par == Some(3) {
            row.driving_distance = None;
        }
        if row.app_shot_finish_lie != Lie::Hole && row.app_prox == Some(0) {
            row.app_prox = None;
        }
    }

    scan_zero_columns(rows, &SCAN_COLUMNS, |r| {
        (r.event_id.clone(), r.round, r.course_id.clone(), r.hole)
    });

    for row in rows.iter_mut() {
        row.sg_ott = filter_sg(row.sg_ott);
        row.sg_app = filter_sg(row.sg_app);
        row.sg_arg = filter_sg(row.sg_arg);
        row.sg_putt = filter_sg(row.sg_putt);
    }
}

// ---------------------------------------------------------------------------
// Feature engineering
// ---------------------------------------------------------------------------

/// Derive per-hole baselines, deltas, hit rates, relative-hit scores and the
/// hole length bucket.
pub fn engineer_features(mut rows: Vec<HoleRecord>) -> Vec<HoleRecord> {
    let key = |r: &HoleRecord| r.event_hole_key();

    // Score and driving distance vs the field on the same hole.
    let score_avg = group_means(&rows, key, |r| r.hole_score.map(|v| v as f64));
    let dd_avg = group_means(&rows, key, |r| r.driving_distance.map(|v| v as f64));

    // Strokes-gained component baselines.
    let sg_ott_avg = group_means(&rows, key, |r| r.sg_ott);
    let sg_app_avg = group_means(&rows, key, |r| r.sg_app);
    let sg_arg_avg = group_means(&rows, key, |r| r.sg_arg);
    let sg_putt_avg = group_means(&rows, key, |r| r.sg_putt);

    // Fairway and green-in-regulation hit rates.
    let fairway_rate = group_rates(&rows, key, |r| r.fairway);
    let gir_rate = group_rates(&rows, key, |r| r.gir);

    for row in rows.iter_mut() {
        row.hole_length_category = hole_length_bucket(row.yardage);

        // A row with no hole number joins no group; its baselines stay missing.
        let Some(k) = row.event_hole_key() else {
            continue;
        };

        row.hole_avg = score_avg.get(&k).copied();
        row.vs_hole_avg = delta(row.hole_score.map(|v| v as f64), row.hole_avg);

        row.dd_avg = dd_avg.get(&k).copied();
        row.vs_dd_avg = delta(row.driving_distance.map(|v| v as f64), row.dd_avg);

        row.sg_ott_avg = sg_ott_avg.get(&k).copied();
        row.vs_sg_ott_avg = delta(row.sg_ott, row.sg_ott_avg);
        row.sg_app_avg = sg_app_avg.get(&k).copied();
        row.vs_sg_app_avg = delta(row.sg_app, row.sg_app_avg);
        row.sg_arg_avg = sg_arg_avg.get(&k).copied();
        row.vs_sg_arg_avg = delta(row.sg_arg, row.sg_arg_avg);
        row.sg_putt_avg = sg_putt_avg.get(&k).copied();
        row.vs_sg_putt_avg = delta(row.sg_putt, row.sg_putt_avg);

        // Zero-substitution first, extreme sanitizer second; the exact-zero
        // sentinel belongs to the zero rule.
        row.fairway_avg = sanitize_extreme_rate(null_zero(fairway_rate.get(&k).copied()));
        row.relative_fairway = null_zero(relative_hit(row.fairway, row.fairway_avg));

        row.gir_avg = sanitize_extreme_rate(null_zero(gir_rate.get(&k).copied()));
        row.relative_gir = null_zero(relative_hit(row.gir, row.gir_avg));
    }

    rows
}

/// Bucket a hole's yardage into left-closed 50-yard bins.
///
/// Below 100 yards or missing yields no bucket.
pub fn hole_length_bucket(yardage: Option<i64>) -> Option<&'static str> {
    let y = yardage?;
    Some(match y {
        100..=149 => "100-150",
        150..=199 => "151-200",
        200..=249 => "201-250",
        250..=299 => "251-300",
        300..=349 => "301-350",
        350..=399 => "351-400",
        400..=449 => "401-450",
        450..=499 => "451-500",
        500..=549 => "501-550",
        550..=599 => "551-600",
        600..=649 => "601-650",
        y if y >= 650 => "650+",
        _ => return None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
