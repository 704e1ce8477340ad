// Integration tests for the strokes-gained pipeline.
//
// These tests exercise the full system end-to-end using the library crate's
// public API: inline semicolon-delimited feeds go through ingestion, the
// hole/shot pipelines, and roster partitioning, and the enriched records are
// checked against the documented behavior.

use golf_sg::config::RosterSection;
use golf_sg::ingest::{load_holes_from_reader, load_shots_from_reader};
use golf_sg::pipeline::category::{DetailedCategory, ShotCategory};
use golf_sg::pipeline::{hole, shot};
use golf_sg::records::{HoleRecord, ShotRecord};
use golf_sg::roster::{partition, Roster};

// ===========================================================================
// Test helpers
// ===========================================================================

const HOLE_HEADER: &str = "Tournament Year;Tournament Schedule;Player #;Course;Round;Hole;Par;\
Actual Yard;Score;Hit Fwy;Hit Green;Driving Distance (rounded);\
Appr Shot Prox to the Hole;Appr Shot Landing Loc;\
OTT Strokes Gained;APP Strokes Gained;ARG Strokes Gained;Putts Gained";

const SHOT_HEADER: &str = "Year;Tourn.;Player #;Course;Round;Hole;Par Value;Shot;\
Shot Type(S/P/D);# of Strokes;From Location(Scorer);To Location(Scorer);\
Distance;Distance to Pin;In the Hole Flag;Distance to Hole after the Shot;\
Strokes Gained/Baseline";

fn hole_table(rows: &[String]) -> Vec<HoleRecord> {
    let data = format!("{HOLE_HEADER}\n{}", rows.join("\n"));
    load_holes_from_reader(data.as_bytes()).unwrap()
}

fn shot_table(rows: &[String]) -> Vec<ShotRecord> {
    let data = format!("{SHOT_HEADER}\n{}", rows.join("\n"));
    load_shots_from_reader(data.as_bytes()).unwrap()
}

/// One hole-feed row on event 2023T1, hole 7, par 4, with the given player,
/// score and driving distance.
fn hole_row(player: &str, score: i64, dd: i64) -> String {
    format!("2023;T1;{player};C14;1;7;4;420;{score};Y;Y;{dd};300;Green;0.1;0.1;0.1;0.1")
}

fn team_roster() -> Roster {
    Roster::from_config(&RosterSection {
        us: vec!["32102".into(), "39977".into()],
        international: vec!["28089".into(), "29926".into()],
    })
}

// ===========================================================================
// Hole pipeline
// ===========================================================================

#[test]
fn hole_average_and_deltas_across_the_field() {
    let rows = hole_table(&[
        hole_row("32102", 4, 290),
        hole_row("28089", 5, 280),
        hole_row("39977", 3, 300),
    ]);
    let rows = hole::run(rows);

    for row in &rows {
        assert_eq!(row.event_id, "2023T1");
        assert_eq!(row.hole_avg, Some(4.0));
    }
    assert_eq!(rows[0].vs_hole_avg, Some(0.0));
    assert_eq!(rows[1].vs_hole_avg, Some(1.0));
    assert_eq!(rows[2].vs_hole_avg, Some(-1.0));
}

#[test]
fn par_3_driving_distance_is_missing_regardless_of_input() {
    let row = "2023;T1;32102;C14;1;3;3;180;3;N;Y;240;300;Green;0.1;0.1;0.1;0.1".to_string();
    let rows = hole::run(hole_table(&[row]));
    assert_eq!(rows[0].par, Some(3));
    assert_eq!(rows[0].driving_distance, None);
}

#[test]
fn widespread_zero_driving_distances_become_missing() {
    // 3 zero rows out of 20 (15%) trips the 10% threshold.
    let mut feed: Vec<String> = Vec::new();
    for i in 0..20 {
        let dd = if i < 3 { 0 } else { 280 + i };
        feed.push(hole_row(&format!("{}", 40000 + i), 4, dd));
    }
    let rows = hole::run(hole_table(&feed));
    assert!(rows.iter().all(|r| r.driving_distance != Some(0)));
    assert_eq!(
        rows.iter().filter(|r| r.driving_distance.is_none()).count(),
        3
    );
}

#[test]
fn rare_zero_driving_distances_are_kept() {
    // 1 zero row out of 20 (5%) stays below the threshold.
    let mut feed: Vec<String> = Vec::new();
    for i in 0..20 {
        let dd = if i == 0 { 0 } else { 280 + i };
        feed.push(hole_row(&format!("{}", 40000 + i), 4, dd));
    }
    let rows = hole::run(hole_table(&feed));
    assert_eq!(
        rows.iter().filter(|r| r.driving_distance == Some(0)).count(),
        1
    );
}

#[test]
fn oversized_sg_components_are_nulled_at_the_boundary() {
    let keep = "2023;T1;32102;C14;1;7;4;420;4;Y;Y;290;300;Green;0.5;-0.5;0.1;0.1".to_string();
    let drop = "2023;T1;28089;C14;1;7;4;420;4;Y;Y;280;300;Green;0.51;-0.6;0.1;0.1".to_string();
    let rows = hole::run(hole_table(&[keep, drop]));
    assert_eq!(rows[0].sg_ott, Some(0.5));
    assert_eq!(rows[0].sg_app, Some(-0.5));
    assert_eq!(rows[1].sg_ott, None);
    assert_eq!(rows[1].sg_app, None);
}

#[test]
fn unanimous_fairway_rate_collapses_relative_score() {
    // Documented limitation: every player hitting the fairway leaves the
    // rate at exactly 1, so each hit's relative score is exactly 0 and the
    // zero-collapse makes it indistinguishable from missing data.
    let rows = hole::run(hole_table(&[
        hole_row("32102", 4, 290),
        hole_row("28089", 4, 280),
    ]));
    assert_eq!(rows[0].fairway_avg, Some(1.0));
    assert_eq!(rows[0].relative_fairway, None);
}

// ===========================================================================
// Shot pipeline
// ===========================================================================

#[test]
fn first_shot_on_par_4_is_off_the_tee_regardless_of_distances() {
    let row = "2023;T1;32102;C14;1;7;4;1;S;1;Tee;Fairway;0;0;N;0;0.1".to_string();
    let rows = shot::run(shot_table(&[row]));
    assert_eq!(rows[0].category, ShotCategory::OffTheTee);
}

#[test]
fn green_putt_finishing_at_ten_gets_the_mid_band() {
    let row = "2023;T1;32102;C14;1;7;4;3;P;1;Green;Green;20;30;N;10;0.0".to_string();
    let rows = shot::run(shot_table(&[row]));
    assert_eq!(rows[0].category, ShotCategory::Putt);
    assert_eq!(rows[0].detailed_category, DetailedCategory::Putt6_15);
}

#[test]
fn holed_putt_keeps_its_zero_finishing_distance() {
    let row = "2023;T1;32102;C14;1;7;4;4;P;1;Green;Hole;6;6;Y;0;0.2".to_string();
    let rows = shot::run(shot_table(&[row]));
    assert_eq!(rows[0].to_distance, Some(0));
    assert_eq!(rows[0].detailed_category, DetailedCategory::Putt0_6);
}

#[test]
fn adjusted_sg_is_relative_to_the_category_group() {
    let rows = shot_table(&[
        "2023;T1;32102;C14;1;7;4;1;S;1;Tee;Fairway;29000;42000;N;15000;0.3".to_string(),
        "2023;T1;28089;C14;1;7;4;1;S;1;Tee;Rough;28000;42000;N;16000;-0.1".to_string(),
    ]);
    let rows = shot::run(rows);
    // Both tee shots share a category group with mean SG 0.1.
    for row in &rows {
        assert_eq!(row.category, ShotCategory::OffTheTee);
        assert!((row.avg_sg.unwrap() - 0.1).abs() < 1e-12);
    }
    assert!((rows[0].adj_sg.unwrap() - 0.2).abs() < 1e-12);
    assert!((rows[1].adj_sg.unwrap() + 0.2).abs() < 1e-12);
}

#[test]
fn tee_shots_get_versus_field_and_fairway_percentage() {
    let rows = shot_table(&[
        "2023;T1;32102;C14;1;7;4;1;S;1;Tee;Fairway;30000;42000;N;15000;0.1".to_string(),
        "2023;T1;28089;C14;1;7;4;1;S;1;Tee;Rough;28000;42000;N;16000;0.0".to_string(),
        "2023;T1;32102;C14;1;7;4;3;P;1;Green;Green;20;30;N;10;0.0".to_string(),
    ]);
    let rows = shot::run(rows);
    assert_eq!(rows[0].vs_field, Some(1000.0));
    assert_eq!(rows[1].vs_field, Some(-1000.0));
    assert_eq!(rows[0].fairway, 1);
    assert_eq!(rows[1].fairway, 0);
    assert_eq!(rows[0].fairway_avg, Some(50.0));
    // Non-tee shots carry no fairway percentage.
    assert_eq!(rows[2].fairway_avg, None);
}

// ===========================================================================
// Roster partition
// ===========================================================================

#[test]
fn cohorts_are_exclusive_and_unrostered_players_vanish() {
    let rows = hole::run(hole_table(&[
        hole_row("32102", 4, 290),
        hole_row("28089", 5, 280),
        hole_row("77777", 3, 300),
    ]));
    let cohorts = partition(rows, &team_roster(), |r| r.player_id.as_str());

    assert_eq!(cohorts.us.len(), 1);
    assert_eq!(cohorts.international.len(), 1);
    assert_eq!(cohorts.unassigned, 1);
    assert!(cohorts.us.iter().all(|r| r.player_id == "32102"));
    assert!(cohorts.international.iter().all(|r| r.player_id == "28089"));
    // The unrostered player appears in neither cohort.
    assert!(cohorts
        .us
        .iter()
        .chain(cohorts.international.iter())
        .all(|r| r.player_id != "77777"));
}

#[test]
fn shot_rows_partition_by_the_same_roster() {
    let rows = shot::run(shot_table(&[
        "2023;T1;39977;C14;1;7;4;1;S;1;Tee;Fairway;30000;42000;N;15000;0.1".to_string(),
        "2023;T1;29926;C14;1;7;4;1;S;1;Tee;Rough;28000;42000;N;16000;0.0".to_string(),
    ]));
    let cohorts = partition(rows, &team_roster(), |r| r.player_id.as_str());
    assert_eq!(cohorts.us.len(), 1);
    assert_eq!(cohorts.international.len(), 1);
    assert_eq!(cohorts.unassigned, 0);
}
