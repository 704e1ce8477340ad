// Typed records for the two telemetry feeds.
//
// Both record types follow the same pattern: identifier and raw stat fields
// are populated at ingest time, derived fields start as `None` and are filled
// in by the pipeline stages. Stats that can be absent or unusable in the feed
// are `Option` from the start; the pipeline only ever nulls or fills fields,
// it never drops rows.

use crate::pipeline::category::{DetailedCategory, ShotCategory};

// ---------------------------------------------------------------------------
// Lie
// ---------------------------------------------------------------------------

/// The surface a ball rests on, as reported by the scorer feeds.
///
/// Unrecognized scorer strings are preserved in `Other` rather than discarded,
/// since lies only matter to the pipeline at a few known comparison points
/// (green, fairway, holed out).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lie {
    Tee,
    Fairway,
    Rough,
    Bunker,
    Fringe,
    Green,
    /// The ball finished in the hole.
    Hole,
    Other(String),
}

impl Lie {
    /// Parse a scorer location string. Unknown values are kept verbatim.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "Tee" | "Tee Box" => Lie::Tee,
            "Fairway" => Lie::Fairway,
            "Rough" => Lie::Rough,
            "Bunker" | "Sand" => Lie::Bunker,
            "Fringe" => Lie::Fringe,
            "Green" => Lie::Green,
            "Hole" => Lie::Hole,
            other => Lie::Other(other.to_string()),
        }
    }

    /// Return the display string used in output tables.
    pub fn as_str(&self) -> &str {
        match self {
            Lie::Tee => "Tee",
            Lie::Fairway => "Fairway",
            Lie::Rough => "Rough",
            Lie::Bunker => "Bunker",
            Lie::Fringe => "Fringe",
            Lie::Green => "Green",
            Lie::Hole => "Hole",
            Lie::Other(s) => s,
        }
    }
}

// ---------------------------------------------------------------------------
// Hole-level record
// ---------------------------------------------------------------------------

/// One player-round-hole observation from the hole feed, progressively
/// enriched by the hole pipeline.
#[derive(Debug, Clone)]
pub struct HoleRecord {
    // Identifiers
    pub year: i32,
    pub tourn_id: String,
    pub player_id: String,
    pub course_id: String,
    /// Year concatenated with tournament id, e.g. "2023T1".
    pub event_id: String,
    pub round: Option<u32>,
    pub hole: Option<u32>,

    // Hole attributes
    pub par: Option<u32>,
    pub yardage: Option<i64>,

    // Outcome
    pub hole_score: Option<i64>,
    pub score_to_par: Option<i64>,
    pub fairway: bool,
    pub gir: bool,
    pub driving_distance: Option<i64>,
    pub tee_shot_finish_lie: Lie,

    // Approach detail
    pub app_distance: Option<i64>,
    pub app_prox: Option<i64>,
    pub app_shot_finish_lie: Lie,

    // Strokes-gained components
    pub sg_ott: Option<f64>,
    pub sg_app: Option<f64>,
    pub sg_arg: Option<f64>,
    pub sg_putt: Option<f64>,

    // Derived: per-hole baselines and deltas
    pub hole_avg: Option<f64>,
    pub vs_hole_avg: Option<f64>,
    pub dd_avg: Option<f64>,
    pub vs_dd_avg: Option<f64>,
    pub sg_ott_avg: Option<f64>,
    pub vs_sg_ott_avg: Option<f64>,
    pub sg_app_avg: Option<f64>,
    pub vs_sg_app_avg: Option<f64>,
    pub sg_arg_avg: Option<f64>,
    pub vs_sg_arg_avg: Option<f64>,
    pub sg_putt_avg: Option<f64>,
    pub vs_sg_putt_avg: Option<f64>,

    // Derived: hit rates and relative-hit scores
    pub fairway_avg: Option<f64>,
    pub relative_fairway: Option<f64>,
    pub gir_avg: Option<f64>,
    pub relative_gir: Option<f64>,

    // Derived: yardage bucket label
    pub hole_length_category: Option<&'static str>,
}

impl HoleRecord {
    /// Grouping key shared by every hole-level baseline: event x hole.
    /// `None` when the hole number is missing; such rows join no group and
    /// keep missing baselines.
    pub fn event_hole_key(&self) -> Option<(String, u32)> {
        Some((self.event_id.clone(), self.hole?))
    }
}

// ---------------------------------------------------------------------------
// Shot-level record
// ---------------------------------------------------------------------------

/// One player-shot observation from the shot feed, progressively enriched by
/// the shot pipeline.
#[derive(Debug, Clone)]
pub struct ShotRecord {
    // Identifiers
    pub year: i32,
    pub tourn_id: String,
    pub player_id: String,
    pub course_id: String,
    pub event_id: String,
    pub round: Option<u32>,
    pub hole: Option<u32>,

    // Shot attributes
    pub par: Option<u32>,
    pub yardage: Option<i64>,
    pub hole_score: Option<i64>,
    pub shot_no: Option<u32>,
    pub shot_type: String,
    pub strokes: Option<i64>,

    // Lies
    pub from_lie: Lie,
    pub to_lie: Lie,

    // Distances (feed units; hundredths of a yard for pin distances)
    pub shot_distance: Option<i64>,
    pub from_distance: Option<i64>,
    pub to_distance: Option<i64>,
    pub distance_from_centre: Option<i64>,
    pub left_right: String,

    // Strokes gained vs tour baseline, as reported
    pub sg_baseline: Option<f64>,
    /// Whether this shot finished in the hole.
    pub in_hole: bool,

    // Derived: classification
    pub category: ShotCategory,
    pub detailed_category: DetailedCategory,

    // Derived: per-category-group SG baseline and delta
    pub avg_sg: Option<f64>,
    pub adj_sg: Option<f64>,

    // Derived: score aggregates and deltas
    pub hole_avg: Option<f64>,
    pub vs_hole_avg: Option<f64>,
    pub round_score: Option<i64>,
    pub round_avg: Option<f64>,
    pub vs_round_avg: Option<f64>,
    pub event_avg: Option<f64>,
    pub vs_event_avg: Option<f64>,

    // Derived: category-specific versus-field delta
    pub vs_field: Option<f64>,
    /// 1 when a tee shot finished on the fairway, 0 otherwise.
    pub fairway: u8,
    /// Fairway percentage for the hole's tee shots; only set on tee shots.
    pub fairway_avg: Option<f64>,
}

impl ShotRecord {
    /// Grouping key for hole-scoped baselines: event x hole.
    /// `None` when the hole number is missing; such rows join no group and
    /// keep missing baselines.
    pub fn event_hole_key(&self) -> Option<(String, u32)> {
        Some((self.event_id.clone(), self.hole?))
    }
}
