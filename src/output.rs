// Enriched table output: semicolon-delimited cohort files.
//
// The output mirrors the input shape — one row per observation, fixed header
// — with the derived columns appended. Missing values are written as empty
// fields.

use std::io::Write;
use std::path::Path;

use crate::records::{HoleRecord, ShotRecord};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to create output file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV write error for {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Field formatting
// ---------------------------------------------------------------------------

fn opt_int(v: Option<i64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn opt_u32(v: Option<u32>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn opt_float(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

fn opt_label(v: Option<&'static str>) -> String {
    v.unwrap_or_default().to_string()
}

fn yes_no(v: bool) -> &'static str {
    if v {
        "Y"
    } else {
        "N"
    }
}

// ---------------------------------------------------------------------------
// Hole table
// ---------------------------------------------------------------------------

const HOLE_HEADER: &[&str] = &[
    "Year",
    "TournID",
    "PlayerID",
    "CourseID",
    "EventID",
    "Round",
    "Hole",
    "Par",
    "Yardage",
    "HoleScore",
    "ScoreToPar",
    "Fairway",
    "GIR",
    "DrivingDistance",
    "TeeShotFinishLie",
    "AppDistance",
    "AppProx",
    "AppShotFinishLie",
    "SGOTT",
    "SGAPP",
    "SGARG",
    "SGPutt",
    "HoleAvg",
    "Vs_HoleAvg",
    "DD_Avg",
    "Vs_DDAvg",
    "SGOTT_avg",
    "Vs_SGOTT_avg",
    "SGAPP_avg",
    "Vs_SGAPP_avg",
    "SGARG_avg",
    "Vs_SGARG_avg",
    "SGPutt_avg",
    "Vs_SGPutt_avg",
    "FairwayAvg",
    "RelativeFairway",
    "GIRavg",
    "RelativeGIR",
    "HoleLengthCategory",
];

/// Write enriched hole rows to a semicolon-delimited writer.
pub fn write_holes_to_writer<W: Write>(wtr: W, rows: &[HoleRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(wtr);
    writer.write_record(HOLE_HEADER)?;
    for r in rows {
        writer.write_record(&[
            r.year.to_string(),
            r.tourn_id.clone(),
            r.player_id.clone(),
            r.course_id.clone(),
            r.event_id.clone(),
            opt_u32(r.round),
            opt_u32(r.hole),
            opt_u32(r.par),
            opt_int(r.yardage),
            opt_int(r.hole_score),
            opt_int(r.score_to_par),
            yes_no(r.fairway).to_string(),
            yes_no(r.gir).to_string(),
            opt_int(r.driving_distance),
            r.tee_shot_finish_lie.as_str().to_string(),
            opt_int(r.app_distance),
            opt_int(r.app_prox),
            r.app_shot_finish_lie.as_str().to_string(),
            opt_float(r.sg_ott),
            opt_float(r.sg_app),
            opt_float(r.sg_arg),
            opt_float(r.sg_putt),
            opt_float(r.hole_avg),
            opt_float(r.vs_hole_avg),
            opt_float(r.dd_avg),
            opt_float(r.vs_dd_avg),
            opt_float(r.sg_ott_avg),
            opt_float(r.vs_sg_ott_avg),
            opt_float(r.sg_app_avg),
            opt_float(r.vs_sg_app_avg),
            opt_float(r.sg_arg_avg),
            opt_float(r.vs_sg_arg_avg),
            opt_float(r.sg_putt_avg),
            opt_float(r.vs_sg_putt_avg),
            opt_float(r.fairway_avg),
            opt_float(r.relative_fairway),
            opt_float(r.gir_avg),
            opt_float(r.relative_gir),
            opt_label(r.hole_length_category),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Shot table
// ---------------------------------------------------------------------------

const SHOT_HEADER: &[&str] = &[
    "Year",
    "TournID",
    "PlayerID",
    "CourseID",
    "EventID",
    "Round",
    "Hole",
    "Par",
    "Yardage",
    "HoleScore",
    "ShotNo",
    "ShotType",
    "Strokes",
    "FromLie",
    "ToLie",
    "ShotDistance",
    "FromDistance",
    "InHoleFlag",
    "ToDistance",
    "DistanceFromCentre",
    "LeftRight",
    "SGBaseline",
    "SGCategory",
    "DetailedCategory",
    "AvgSG",
    "AdjSG",
    "HoleAvg",
    "Vs_HoleAvg",
    "RoundScore",
    "RoundAvg",
    "Vs_RoundAvg",
    "EventAvg",
    "Vs_EventAvg",
    "Vs_Field",
    "Fairway",
    "FairwayAvg",
];

/// Write enriched shot rows to a semicolon-delimited writer.
pub fn write_shots_to_writer<W: Write>(wtr: W, rows: &[ShotRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(wtr);
    writer.write_record(SHOT_HEADER)?;
    for r in rows {
        writer.write_record(&[
            r.year.to_string(),
            r.tourn_id.clone(),
            r.player_id.clone(),
            r.course_id.clone(),
            r.event_id.clone(),
            opt_u32(r.round),
            opt_u32(r.hole),
            opt_u32(r.par),
            opt_int(r.yardage),
            opt_int(r.hole_score),
            opt_u32(r.shot_no),
            r.shot_type.clone(),
            opt_int(r.strokes),
            r.from_lie.as_str().to_string(),
            r.to_lie.as_str().to_string(),
            opt_int(r.shot_distance),
            opt_int(r.from_distance),
            yes_no(r.in_hole).to_string(),
            opt_int(r.to_distance),
            opt_int(r.distance_from_centre),
            r.left_right.clone(),
            opt_float(r.sg_baseline),
            r.category.label().to_string(),
            r.detailed_category.label().to_string(),
            opt_float(r.avg_sg),
            opt_float(r.adj_sg),
            opt_float(r.hole_avg),
            opt_float(r.vs_hole_avg),
            opt_int(r.round_score),
            opt_float(r.round_avg),
            opt_float(r.vs_round_avg),
            opt_float(r.event_avg),
            opt_float(r.vs_event_avg),
            opt_float(r.vs_field),
            r.fairway.to_string(),
            opt_float(r.fairway_avg),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Path-based writers
// ---------------------------------------------------------------------------

/// Write enriched hole rows to a file.
pub fn write_hole_table(path: &Path, rows: &[HoleRecord]) -> Result<(), OutputError> {
    let file = std::fs::File::create(path).map_err(|e| OutputError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    write_holes_to_writer(file, rows).map_err(|e| OutputError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write enriched shot rows to a file.
pub fn write_shot_table(path: &Path, rows: &[ShotRecord]) -> Result<(), OutputError> {
    let file = std::fs::File::create(path).map_err(|e| OutputError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    write_shots_to_writer(file, rows).map_err(|e| OutputError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
