// Strokes-gained batch pipeline entry point.
//
// Run sequence:
// 1. Initialize tracing (stderr)
// 2. Load config and build the roster
// 3. Ingest and enrich the hole feed
// 4. Ingest and enrich the shot feed
// 5. Partition both tables into team cohorts
// 6. Write the four cohort tables

use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use golf_sg::config;
use golf_sg::ingest;
use golf_sg::output;
use golf_sg::pipeline;
use golf_sg::roster::{self, Roster};

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;
    info!("strokes-gained pipeline starting up");

    // 2. Load config and build the roster
    let config = config::load_config().context("failed to load configuration")?;
    let roster = Roster::from_config(&config.roster);
    info!(
        "Config loaded: {} US players, {} International players",
        config.roster.us.len(),
        config.roster.international.len()
    );

    // 3. Hole feed
    let holes = ingest::load_hole_feed(Path::new(&config.data_paths.holes))
        .context("failed to load hole feed")?;
    info!("Loaded {} hole rows", holes.len());
    let holes = pipeline::hole::run(holes);

    // 4. Shot feed
    let shots = ingest::load_shot_feed(Path::new(&config.data_paths.shots))
        .context("failed to load shot feed")?;
    info!("Loaded {} shot rows", shots.len());
    let shots = pipeline::shot::run(shots);

    // 5. Partition into cohorts
    let hole_cohorts = roster::partition(holes, &roster, |r| r.player_id.as_str());
    let shot_cohorts = roster::partition(shots, &roster, |r| r.player_id.as_str());
    if hole_cohorts.unassigned > 0 || shot_cohorts.unassigned > 0 {
        warn!(
            "dropped unrostered rows: {} hole, {} shot",
            hole_cohorts.unassigned, shot_cohorts.unassigned
        );
    }

    // 6. Write outputs
    let out_dir = Path::new(&config.output_dir);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    output::write_hole_table(&out_dir.join("holes_us.txt"), &hole_cohorts.us)?;
    output::write_hole_table(
        &out_dir.join("holes_international.txt"),
        &hole_cohorts.international,
    )?;
    output::write_shot_table(&out_dir.join("shots_us.txt"), &shot_cohorts.us)?;
    output::write_shot_table(
        &out_dir.join("shots_international.txt"),
        &shot_cohorts.international,
    )?;

    info!(
        "Wrote cohort tables to {}: {} / {} hole rows, {} / {} shot rows (US / International)",
        out_dir.display(),
        hole_cohorts.us.len(),
        hole_cohorts.international.len(),
        shot_cohorts.us.len(),
        shot_cohorts.international.len()
    );
    Ok(())
}

/// Initialize tracing to stderr, leaving stdout clean for piping.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("golf_sg=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
