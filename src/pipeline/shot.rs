// Shot-level pipeline: classification, missing-data handling, relative
// strokes gained, and versus-field feature engineering.
//
// Stage order is a strict dependency chain: the coarse category is assigned
// from the raw distances before any zeros are nulled, the fine category is
// assigned from the cleaned after-distance, and every baseline is computed
// after the stage that defines its grouping column.

use tracing::info;

use crate::pipeline::baseline::{group_means, group_rates, group_sums};
use crate::pipeline::category::{classify, classify_detailed, DetailedCategory, ShotCategory};
use crate::pipeline::missing::filter_sg;
use crate::pipeline::relative::delta;
use crate::records::{Lie, ShotRecord};

/// Run the full shot-level pipeline over a parsed table.
pub fn run(mut rows: Vec<ShotRecord>) -> Vec<ShotRecord> {
    assign_categories(&mut rows);
    handle_missing(&mut rows);
    derive_relative_sg(&mut rows);
    assign_detailed_categories(&mut rows);
    let rows = engineer_features(rows);
    info!("shot pipeline complete: {} rows enriched", rows.len());
    rows
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Assign the coarse strokes-gained category to every shot.
///
/// Runs on raw distances, before missing-data handling: a recorded zero pin
/// distance still fails the approach threshold the same way a nulled one
/// would not, and the tee shot rule does not look at distance at all.
pub fn assign_categories(rows: &mut [ShotRecord]) {
    for row in rows.iter_mut() {
        row.category = classify(row.par, row.shot_no, row.from_distance, &row.from_lie);
    }
}

/// Assign the distance-banded subcategory from the cleaned after-distance.
pub fn assign_detailed_categories(rows: &mut [ShotRecord]) {
    for row in rows.iter_mut() {
        row.detailed_category = classify_detailed(row.category, row.to_distance);
    }
}

// ---------------------------------------------------------------------------
// Missing-data handling
// ---------------------------------------------------------------------------

/// Null sentinel zeros in the distance columns and filter implausible
/// strokes-gained values.
///
/// A shot distance or pin distance of exactly zero is never genuine. An
/// after-distance of zero is genuine only when the shot finished in the hole.
pub fn handle_missing(rows: &mut [ShotRecord]) {
    for row in rows.iter_mut() {
        if row.shot_distance == Some(0) {
            row.shot_distance = None;
        }
        if row.from_distance == Some(0) {
            row.from_distance = None;
        }
        if row.to_distance == Some(0) && !row.in_hole {
            row.to_distance = None;
        }
        row.sg_baseline = filter_sg(row.sg_baseline);
    }
}

// ---------------------------------------------------------------------------
// Relative strokes gained
// ---------------------------------------------------------------------------

/// Key for the per-category strokes-gained baseline: every shot of the same
/// category, on the same hole, in the same round of the same event. `None`
/// when the round or hole number is missing; such rows join no group.
fn sg_group_key(row: &ShotRecord) -> Option<(ShotCategory, String, u32, String, u32)> {
    Some((
        row.category,
        row.course_id.clone(),
        row.round?,
        row.event_id.clone(),
        row.hole?,
    ))
}

/// Compute the per-category-group SG baseline and each row's delta from it.
pub fn derive_relative_sg(rows: &mut [ShotRecord]) {
    let avg = group_means(rows, sg_group_key, |r| r.sg_baseline);
    for row in rows.iter_mut() {
        row.avg_sg = sg_group_key(row).and_then(|k| avg.get(&k).copied());
        row.adj_sg = delta(row.sg_baseline, row.avg_sg);
    }
}

// ---------------------------------------------------------------------------
// Feature engineering
// ---------------------------------------------------------------------------

/// Derive score aggregates (hole, round, event) and the category-specific
/// versus-field deltas.
pub fn engineer_features(mut rows: Vec<ShotRecord>) -> Vec<ShotRecord> {
    let hole_key = |r: &ShotRecord| r.event_hole_key();

    // Hole average score, rounded to the nearest stroke at shot level.
    let score_avg = group_means(&rows, hole_key, |r| r.hole_score.map(|v| v as f64));
    for row in rows.iter_mut() {
        row.hole_avg = row
            .event_hole_key()
            .and_then(|k| score_avg.get(&k).copied())
            .map(round_half_to_even);
        row.vs_hole_avg = delta(row.hole_score.map(|v| v as f64), row.hole_avg);
    }

    // Round totals: sum of strokes per player-round, broadcast to every shot,
    // then averaged over shots per round and per event. The averages are
    // row-weighted (a player with more recorded shots weighs more), matching
    // how the aggregate tables are consumed downstream.
    let round_key =
        |r: &ShotRecord| Some((r.event_id.clone(), r.player_id.clone(), r.round?));
    let round_totals = group_sums(&rows, round_key, |r| r.strokes);
    for row in rows.iter_mut() {
        row.round_score = round_key(row).and_then(|k| round_totals.get(&k).copied());
    }

    let round_avg = group_means(
        &rows,
        |r| Some((r.event_id.clone(), r.round?)),
        |r| r.round_score.map(|v| v as f64),
    );
    let event_avg = group_means(
        &rows,
        |r| Some(r.event_id.clone()),
        |r| r.round_score.map(|v| v as f64),
    );
    for row in rows.iter_mut() {
        row.round_avg = row
            .round
            .and_then(|rd| round_avg.get(&(row.event_id.clone(), rd)).copied());
        row.vs_round_avg = delta(row.round_score.map(|v| v as f64), row.round_avg);
        row.event_avg = event_avg.get(&row.event_id).copied();
        row.vs_event_avg = delta(row.round_score.map(|v| v as f64), row.event_avg);
    }

    derive_versus_field(&mut rows);
    rows
}

/// Round to the nearest integer, ties to the even neighbor: an average of
/// exactly 4.5 strokes rounds down to 4, while 5.5 rounds up to 6.
fn round_half_to_even(v: f64) -> f64 {
    let floor = v.floor();
    let diff = v - floor;
    if diff > 0.5 {
        floor + 1.0
    } else if diff < 0.5 {
        floor
    } else if floor as i64 % 2 == 0 {
        floor
    } else {
        floor + 1.0
    }
}

/// Category-specific "versus the field" deltas.
///
/// Tee shots compare driving distance against the hole's tee shot average and
/// get a fairway-hit indicator plus the hole's fairway percentage. Approach,
/// around-the-green and putt shots compare their finishing distance against
/// the per-band average on the same hole. The per-family group averages are
/// scratch values, computed here and folded into `vs_field` without ever
/// landing on the record.
fn derive_versus_field(rows: &mut Vec<ShotRecord>) {
    // Tee shots: driving distance vs the hole average.
    let tee_key = |r: &ShotRecord| {
        if r.category == ShotCategory::OffTheTee {
            r.event_hole_key()
        } else {
            None
        }
    };
    let dd_avg = group_means(rows, tee_key, |r| r.shot_distance.map(|v| v as f64));

    // Fairway indicator and per-hole fairway percentage over tee shots only.
    for row in rows.iter_mut() {
        row.fairway = u8::from(
            row.category == ShotCategory::OffTheTee && row.to_lie == Lie::Fairway,
        );
    }
    let fairway_pct = group_rates(rows, tee_key, |r| r.fairway == 1);

    // Distance-banded families: finishing distance vs the band average on the
    // same hole.
    let family_key = |r: &ShotRecord| {
        let banded = r.detailed_category.is_approach_band()
            || r.detailed_category.is_arg_band()
            || r.detailed_category.is_putt_band();
        if banded {
            Some((r.event_id.clone(), r.hole?, r.detailed_category))
        } else {
            None
        }
    };
    let band_avg = group_means(rows, family_key, |r| r.to_distance.map(|v| v as f64));

    for row in rows.iter_mut() {
        if row.category == ShotCategory::OffTheTee {
            let Some(k) = row.event_hole_key() else {
                continue;
            };
            row.vs_field = delta(
                row.shot_distance.map(|v| v as f64),
                dd_avg.get(&k).copied(),
            );
            row.fairway_avg = fairway_pct.get(&k).map(|rate| rate * 100.0);
        } else if let Some(k) = family_key(row) {
            row.vs_field = delta(
                row.to_distance.map(|v| v as f64),
                band_avg.get(&k).copied(),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
