// Team roster membership and cohort partitioning.
//
// The rosters are explicit configuration, not something the pipeline derives:
// two named player-ID sets define the cohorts, and partitioning is a plain
// set-containment test applied after enrichment.

use std::collections::HashSet;

use crate::config::RosterSection;

/// The two competing teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    UnitedStates,
    International,
}

/// The two team rosters, answering membership queries by player ID.
#[derive(Debug, Clone)]
pub struct Roster {
    us: HashSet<String>,
    international: HashSet<String>,
}

impl Roster {
    /// Build a roster from the validated config section. Config validation
    /// guarantees the two sets are disjoint.
    pub fn from_config(section: &RosterSection) -> Self {
        Roster {
            us: section.us.iter().cloned().collect(),
            international: section.international.iter().cloned().collect(),
        }
    }

    /// The team a player belongs to, or `None` for unrostered players.
    pub fn team_of(&self, player_id: &str) -> Option<Team> {
        if self.us.contains(player_id) {
            Some(Team::UnitedStates)
        } else if self.international.contains(player_id) {
            Some(Team::International)
        } else {
            None
        }
    }
}

/// Rows split by roster membership. Unrostered rows are dropped and counted.
#[derive(Debug)]
pub struct Cohorts<R> {
    pub us: Vec<R>,
    pub international: Vec<R>,
    pub unassigned: usize,
}

/// Partition enriched rows into the two team cohorts by player ID.
pub fn partition<R, F>(rows: Vec<R>, roster: &Roster, player_id: F) -> Cohorts<R>
where
    F: Fn(&R) -> &str,
{
    let mut cohorts = Cohorts {
        us: Vec::new(),
        international: Vec::new(),
        unassigned: 0,
    };
    for row in rows {
        match roster.team_of(player_id(&row)) {
            Some(Team::UnitedStates) => cohorts.us.push(row),
            Some(Team::International) => cohorts.international.push(row),
            None => cohorts.unassigned += 1,
        }
    }
    cohorts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
