// Feed ingestion: semicolon-delimited hole and shot telemetry exports.
//
// The feeds arrive with decorated headers ("Player #", "# of Strokes", ...)
// and loosely typed values. Headers are normalized (strip '#', trim) and
// mapped to canonical column names before deserialization; every stat field
// deserializes as a string and is coerced individually, so a malformed number
// degrades that one value to missing instead of rejecting the row. Only rows
// whose identifier columns are unusable are skipped, with a warning.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::pipeline::category::{DetailedCategory, ShotCategory};
use crate::records::{HoleRecord, Lie, ShotRecord};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read feed {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Header normalization
// ---------------------------------------------------------------------------

/// Source-header to canonical-name renames for the hole feed.
const HOLE_RENAMES: &[(&str, &str)] = &[
    ("Player", "PlayerID"),
    ("Tournament Schedule", "TournID"),
    ("Tournament Year", "Year"),
    ("Course", "CourseID"),
    ("Actual Yard", "Yardage"),
    ("Hit Fwy", "Fairway"),
    ("Hit Green", "GIR"),
    ("Driving Distance (rounded)", "DrivingDistance"),
    ("Tee Shot Landing Loc", "TeeShotFinishLie"),
    ("Tee Shot Detail Landing Loc", "DetailedTeeShotFinishLie"),
    ("RTP Score", "ScoreToPar"),
    ("Score", "HoleScore"),
    ("Shot", "ShotNo"),
    ("Appr Shot Dist to the Pin", "AppDistance"),
    ("Appr Shot Prox to the Hole", "AppProx"),
    ("Appr Shot Landing Loc", "AppShotFinishLie"),
    ("OTT Strokes Gained", "SGOTT"),
    ("APP Strokes Gained", "SGAPP"),
    ("ARG Strokes Gained", "SGARG"),
    ("Putts Gained", "SGPutt"),
];

/// Source-header to canonical-name renames for the shot feed.
const SHOT_RENAMES: &[(&str, &str)] = &[
    ("of Strokes", "Strokes"),
    ("Tourn.", "TournID"),
    ("Player", "PlayerID"),
    ("Course", "CourseID"),
    ("Hole Score", "HoleScore"),
    ("Shot", "ShotNo"),
    ("Shot Type(S/P/D)", "ShotType"),
    ("Distance", "ShotDistance"),
    ("Distance to Pin", "FromDistance"),
    ("From Location(Scorer)", "FromLie"),
    ("Distance to Hole after the Shot", "ToDistance"),
    ("Par Value", "Par"),
    ("To Location(Scorer)", "ToLie"),
    ("Distance from Center", "DistanceFromCentre"),
    ("Left/Right", "LeftRight"),
    ("Strokes Gained/Baseline", "SGBaseline"),
    ("In the Hole Flag", "InHoleFlag"),
];

/// Strip the feed's '#' decoration and surrounding whitespace from a header,
/// then map it through the feed's rename table. Unmapped headers keep their
/// stripped form.
fn canonical_header(raw: &str, renames: &[(&str, &str)]) -> String {
    let stripped = raw.replace('#', "");
    let trimmed = stripped.trim();
    renames
        .iter()
        .find(|(from, _)| *from == trimmed)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Value coercion
// ---------------------------------------------------------------------------

/// Parse an integer stat, accepting the feed's occasional float formatting.
/// Anything unusable is missing.
fn parse_int(s: &str) -> Option<i64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<i64>().ok().or_else(|| {
        t.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.round() as i64)
    })
}

/// Parse a float stat. Non-finite or unusable values are missing.
fn parse_float(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a small unsigned stat (round, hole, par, shot number).
fn parse_u32(s: &str) -> Option<u32> {
    parse_int(s).and_then(|v| u32::try_from(v).ok())
}

/// Parse a yes/no style flag column.
fn parse_flag(s: &str) -> bool {
    matches!(s.trim(), "Y" | "y" | "1" | "TRUE" | "True" | "true")
}

// ---------------------------------------------------------------------------
// Raw serde rows (canonical column names after header normalization)
// ---------------------------------------------------------------------------

/// Raw hole-feed row. Every field is a string; typing happens in the
/// coercion step. Extra feed columns are absorbed via `#[serde(flatten)]`.
#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawHoleRow {
    #[serde(default)]
    Year: String,
    #[serde(default)]
    TournID: String,
    #[serde(default)]
    PlayerID: String,
    #[serde(default)]
    CourseID: String,
    #[serde(default)]
    Round: String,
    #[serde(default)]
    Hole: String,
    #[serde(default)]
    Par: String,
    #[serde(default)]
    Yardage: String,
    #[serde(default)]
    HoleScore: String,
    #[serde(default)]
    ScoreToPar: String,
    #[serde(default)]
    Fairway: String,
    #[serde(default)]
    GIR: String,
    #[serde(default)]
    DrivingDistance: String,
    #[serde(default)]
    TeeShotFinishLie: String,
    #[serde(default)]
    AppDistance: String,
    #[serde(default)]
    AppProx: String,
    #[serde(default)]
    AppShotFinishLie: String,
    #[serde(default)]
    SGOTT: String,
    #[serde(default)]
    SGAPP: String,
    #[serde(default)]
    SGARG: String,
    #[serde(default)]
    SGPutt: String,
    /// Absorb any extra columns the export includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

/// Raw shot-feed row; same conventions as [`RawHoleRow`].
#[derive(Debug, Deserialize)]
#[allow(dead_code, non_snake_case)]
struct RawShotRow {
    #[serde(default)]
    Year: String,
    #[serde(default)]
    TournID: String,
    #[serde(default)]
    PlayerID: String,
    #[serde(default)]
    CourseID: String,
    #[serde(default)]
    Round: String,
    #[serde(default)]
    Hole: String,
    #[serde(default)]
    Par: String,
    #[serde(default)]
    Yardage: String,
    #[serde(default)]
    HoleScore: String,
    #[serde(default)]
    ShotNo: String,
    #[serde(default)]
    ShotType: String,
    #[serde(default)]
    Strokes: String,
    #[serde(default)]
    FromLie: String,
    #[serde(default)]
    ToLie: String,
    #[serde(default)]
    ShotDistance: String,
    #[serde(default)]
    FromDistance: String,
    #[serde(default)]
    InHoleFlag: String,
    #[serde(default)]
    ToDistance: String,
    #[serde(default)]
    DistanceFromCentre: String,
    #[serde(default)]
    LeftRight: String,
    #[serde(default)]
    SGBaseline: String,
    /// Absorb any extra columns the export includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Identifier coercion
// ---------------------------------------------------------------------------

/// The identifier columns a row cannot be used without: year, tournament and
/// player. Returns `None` (and the caller warns and skips) when any is
/// unusable. Everything else — round, hole, par, shot number — coerces to
/// missing instead of rejecting the row.
struct RowIdentity {
    year: i32,
    tourn_id: String,
    player_id: String,
    course_id: String,
    event_id: String,
}

fn row_identity(year: &str, tourn: &str, player: &str, course: &str) -> Option<RowIdentity> {
    let year = parse_int(year)? as i32;
    let tourn_id = tourn.trim();
    let player_id = player.trim();
    if tourn_id.is_empty() || player_id.is_empty() {
        return None;
    }
    Some(RowIdentity {
        year,
        event_id: format!("{year}{tourn_id}"),
        tourn_id: tourn_id.to_string(),
        player_id: player_id.to_string(),
        course_id: course.trim().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Reader-based loaders (public so tests can feed inline data)
// ---------------------------------------------------------------------------

fn feed_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(rdr)
}

/// Load hole records from a semicolon-delimited reader.
pub fn load_holes_from_reader<R: Read>(rdr: R) -> Result<Vec<HoleRecord>, csv::Error> {
    let mut reader = feed_reader(rdr);
    let canonical: csv::StringRecord = reader
        .headers()?
        .iter()
        .map(|h| canonical_header(h, HOLE_RENAMES))
        .collect();
    reader.set_headers(canonical);

    let mut records = Vec::new();
    for result in reader.deserialize::<RawHoleRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed hole row: {}", e);
                continue;
            }
        };
        let Some(id) = row_identity(&raw.Year, &raw.TournID, &raw.PlayerID, &raw.CourseID)
        else {
            warn!("skipping hole row with unusable identifiers");
            continue;
        };
        records.push(HoleRecord {
            year: id.year,
            tourn_id: id.tourn_id,
            player_id: id.player_id,
            course_id: id.course_id,
            event_id: id.event_id,
            round: parse_u32(&raw.Round),
            hole: parse_u32(&raw.Hole),
            par: parse_u32(&raw.Par),
            yardage: parse_int(&raw.Yardage),
            hole_score: parse_int(&raw.HoleScore),
            score_to_par: parse_int(&raw.ScoreToPar),
            fairway: parse_flag(&raw.Fairway),
            gir: parse_flag(&raw.GIR),
            driving_distance: parse_int(&raw.DrivingDistance),
            tee_shot_finish_lie: Lie::parse(&raw.TeeShotFinishLie),
            app_distance: parse_int(&raw.AppDistance),
            app_prox: parse_int(&raw.AppProx),
            app_shot_finish_lie: Lie::parse(&raw.AppShotFinishLie),
            sg_ott: parse_float(&raw.SGOTT),
            sg_app: parse_float(&raw.SGAPP),
            sg_arg: parse_float(&raw.SGARG),
            sg_putt: parse_float(&raw.SGPutt),
            hole_avg: None,
            vs_hole_avg: None,
            dd_avg: None,
            vs_dd_avg: None,
            sg_ott_avg: None,
            vs_sg_ott_avg: None,
            sg_app_avg: None,
            vs_sg_app_avg: None,
            sg_arg_avg: None,
            vs_sg_arg_avg: None,
            sg_putt_avg: None,
            vs_sg_putt_avg: None,
            fairway_avg: None,
            relative_fairway: None,
            gir_avg: None,
            relative_gir: None,
            hole_length_category: None,
        });
    }
    Ok(records)
}

/// Load shot records from a semicolon-delimited reader.
pub fn load_shots_from_reader<R: Read>(rdr: R) -> Result<Vec<ShotRecord>, csv::Error> {
    let mut reader = feed_reader(rdr);
    let canonical: csv::StringRecord = reader
        .headers()?
        .iter()
        .map(|h| canonical_header(h, SHOT_RENAMES))
        .collect();
    reader.set_headers(canonical);

    let mut records = Vec::new();
    for result in reader.deserialize::<RawShotRow>() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("skipping malformed shot row: {}", e);
                continue;
            }
        };
        let Some(id) = row_identity(&raw.Year, &raw.TournID, &raw.PlayerID, &raw.CourseID)
        else {
            warn!("skipping shot row with unusable identifiers");
            continue;
        };
        records.push(ShotRecord {
            year: id.year,
            tourn_id: id.tourn_id,
            player_id: id.player_id,
            course_id: id.course_id,
            event_id: id.event_id,
            round: parse_u32(&raw.Round),
            hole: parse_u32(&raw.Hole),
            par: parse_u32(&raw.Par),
            yardage: parse_int(&raw.Yardage),
            hole_score: parse_int(&raw.HoleScore),
            shot_no: parse_u32(&raw.ShotNo),
            shot_type: raw.ShotType.trim().to_string(),
            strokes: parse_int(&raw.Strokes),
            from_lie: Lie::parse(&raw.FromLie),
            to_lie: Lie::parse(&raw.ToLie),
            shot_distance: parse_int(&raw.ShotDistance),
            from_distance: parse_int(&raw.FromDistance),
            to_distance: parse_int(&raw.ToDistance),
            distance_from_centre: parse_int(&raw.DistanceFromCentre),
            left_right: raw.LeftRight.trim().to_string(),
            sg_baseline: parse_float(&raw.SGBaseline),
            in_hole: parse_flag(&raw.InHoleFlag),
            category: ShotCategory::Other,
            detailed_category: DetailedCategory::Other,
            avg_sg: None,
            adj_sg: None,
            hole_avg: None,
            vs_hole_avg: None,
            round_score: None,
            round_avg: None,
            vs_round_avg: None,
            event_avg: None,
            vs_event_avg: None,
            vs_field: None,
            fairway: 0,
            fairway_avg: None,
        });
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Path-based loaders
// ---------------------------------------------------------------------------

/// Read a feed file into memory, replacing invalid UTF-8 rather than failing.
/// The file handle is released before any parsing happens.
fn read_lossy(path: &Path) -> Result<String, IngestError> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Load the hole feed from a file.
pub fn load_hole_feed(path: &Path) -> Result<Vec<HoleRecord>, IngestError> {
    let content = read_lossy(path)?;
    load_holes_from_reader(content.as_bytes()).map_err(|e| IngestError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load the shot feed from a file.
pub fn load_shot_feed(path: &Path) -> Result<Vec<ShotRecord>, IngestError> {
    let content = read_lossy(path)?;
    load_shots_from_reader(content.as_bytes()).map_err(|e| IngestError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- header normalization --

    #[test]
    fn headers_are_stripped_and_renamed() {
        assert_eq!(canonical_header(" Player #", HOLE_RENAMES), "PlayerID");
        assert_eq!(canonical_header("# of Strokes", SHOT_RENAMES), "Strokes");
        assert_eq!(canonical_header("Tourn.", SHOT_RENAMES), "TournID");
        assert_eq!(canonical_header(" Round ", HOLE_RENAMES), "Round");
    }

    // -- coercion --

    #[test]
    fn numeric_coercion_accepts_float_formatting() {
        assert_eq!(parse_int("4"), Some(4));
        assert_eq!(parse_int("4.0"), Some(4));
        assert_eq!(parse_int(" 290 "), Some(290));
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("n/a"), None);
        assert_eq!(parse_float("-0.25"), Some(-0.25));
        assert_eq!(parse_float("oops"), None);
    }

    // -- hole feed --

    #[test]
    fn hole_feed_parses_with_decorated_headers() {
        let data = "\
Tournament Year;Tournament Schedule;Player #;Course;Round;Hole;Par;Actual Yard;Score;RTP Score;Hit Fwy;Hit Green;Driving Distance (rounded);Tee Shot Landing Loc;Appr Shot Dist to the Pin;Appr Shot Prox to the Hole;Appr Shot Landing Loc;OTT Strokes Gained;APP Strokes Gained;ARG Strokes Gained;Putts Gained
2023;T1;32102;C14;1;7;4;420;4;0;Y;Y;290;Fairway;15000;300;Green;0.12;-0.05;0.0;0.08";

        let records = load_holes_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.event_id, "2023T1");
        assert_eq!(r.player_id, "32102");
        assert_eq!(r.hole, Some(7));
        assert_eq!(r.par, Some(4));
        assert_eq!(r.yardage, Some(420));
        assert_eq!(r.hole_score, Some(4));
        assert!(r.fairway);
        assert!(r.gir);
        assert_eq!(r.driving_distance, Some(290));
        assert_eq!(r.tee_shot_finish_lie, Lie::Fairway);
        assert_eq!(r.app_shot_finish_lie, Lie::Green);
        assert_eq!(r.sg_ott, Some(0.12));
        assert_eq!(r.sg_arg, Some(0.0));
    }

    #[test]
    fn malformed_stat_becomes_missing_without_dropping_row() {
        let data = "\
Tournament Year;Tournament Schedule;Player #;Course;Round;Hole;Par;Score;Driving Distance (rounded)
2023;T1;32102;C14;1;7;4;bogey;xx";

        let records = load_holes_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hole_score, None);
        assert_eq!(records[0].driving_distance, None);
    }

    #[test]
    fn unusable_identifiers_skip_the_row() {
        let data = "\
Tournament Year;Tournament Schedule;Player #;Course;Round;Hole;Par;Score
;T1;32102;C14;1;7;4;4
2023;T1;32102;C14;1;8;4;5";

        let records = load_holes_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hole, Some(8));
    }

    #[test]
    fn malformed_round_hole_par_coerce_to_missing_without_dropping_row() {
        let data = "\
Tournament Year;Tournament Schedule;Player #;Course;Round;Hole;Par;Score
2023;T1;32102;C14;;x;;4";

        let records = load_holes_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].round, None);
        assert_eq!(records[0].hole, None);
        assert_eq!(records[0].par, None);
        assert_eq!(records[0].hole_score, Some(4));
    }

    // -- shot feed --

    #[test]
    fn shot_feed_parses_with_decorated_headers() {
        let data = "\
Year;Tourn.;Player #;Course;Round;Hole;Par Value;Yardage;Hole Score;Shot;Shot Type(S/P/D);# of Strokes;From Location(Scorer);To Location(Scorer);Distance;Distance to Pin;In the Hole Flag;Distance to Hole after the Shot;Distance from Center;Left/Right;Strokes Gained/Baseline
2023;T1;32102;C14;1;7;4;420;4;1;S;1;Tee;Fairway;29000;42000;N;15000;500;L;0.10";

        let records = load_shots_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.event_id, "2023T1");
        assert_eq!(r.shot_no, Some(1));
        assert_eq!(r.strokes, Some(1));
        assert_eq!(r.from_lie, Lie::Tee);
        assert_eq!(r.to_lie, Lie::Fairway);
        assert_eq!(r.shot_distance, Some(29000));
        assert_eq!(r.from_distance, Some(42000));
        assert_eq!(r.to_distance, Some(15000));
        assert!(!r.in_hole);
        assert_eq!(r.sg_baseline, Some(0.10));
    }

    #[test]
    fn in_hole_flag_parses_yes() {
        let data = "\
Year;Tourn.;Player #;Course;Round;Hole;Par Value;Shot;In the Hole Flag;Distance to Hole after the Shot
2023;T1;32102;C14;1;7;4;3;Y;0";

        let records = load_shots_from_reader(data.as_bytes()).unwrap();
        assert!(records[0].in_hole);
        assert_eq!(records[0].to_distance, Some(0));
    }

    #[test]
    fn blank_par_shot_row_is_kept() {
        let data = "\
Year;Tourn.;Player #;Course;Round;Hole;Par Value;Shot;Distance to Pin;From Location(Scorer)
2023;T1;32102;C14;1;7;;2;2500;Fairway";

        let records = load_shots_from_reader(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].par, None);
        assert_eq!(records[0].shot_no, Some(2));
    }
}
