// Shot classification: coarse strokes-gained category and distance-banded
// subcategory.
//
// The distance thresholds are domain constants in raw feed units (hundredths
// of a yard for pin distances). They are not tunable: they define the
// category boundaries the rest of the pipeline groups on.

use crate::records::Lie;

// ---------------------------------------------------------------------------
// Coarse category
// ---------------------------------------------------------------------------

/// Pin distance above which a non-tee shot counts as an approach.
pub const APPROACH_DISTANCE_THRESHOLD: i64 = 1800;

/// The game phase a shot belongs to.
///
/// Every shot maps to exactly one variant; `Other` absorbs anything the
/// decision tree cannot place (e.g. a par-3 tee shot with no recorded pin
/// distance and a non-green lie).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShotCategory {
    OffTheTee,
    Approach,
    AroundTheGreen,
    Putt,
    Other,
}

impl ShotCategory {
    /// Return the display label used in output tables.
    pub fn label(&self) -> &'static str {
        match self {
            ShotCategory::OffTheTee => "Off the Tee",
            ShotCategory::Approach => "Approach",
            ShotCategory::AroundTheGreen => "Around the Green",
            ShotCategory::Putt => "Putt",
            ShotCategory::Other => "Other",
        }
    }
}

/// Assign the coarse strokes-gained category for one shot.
///
/// Ordered decision tree; the first matching rule wins:
/// 1. par >= 4 and first shot -> off the tee
/// 2. pin distance over the approach threshold -> approach
/// 3. pin distance at or under the threshold, not on the green -> around the green
/// 4. on the green -> putt
/// 5. otherwise -> other
///
/// A missing pin distance fails both distance rules, so such shots resolve to
/// putt or other depending on the lie. A missing par or shot number likewise
/// fails the tee shot rule and falls through to the distance rules.
pub fn classify(
    par: Option<u32>,
    shot_no: Option<u32>,
    from_distance: Option<i64>,
    from_lie: &Lie,
) -> ShotCategory {
    if par.is_some_and(|p| p >= 4) && shot_no == Some(1) {
        return ShotCategory::OffTheTee;
    }
    if let Some(d) = from_distance {
        if d > APPROACH_DISTANCE_THRESHOLD {
            return ShotCategory::Approach;
        }
        if *from_lie != Lie::Green {
            return ShotCategory::AroundTheGreen;
        }
    }
    if *from_lie == Lie::Green {
        ShotCategory::Putt
    } else {
        ShotCategory::Other
    }
}

// ---------------------------------------------------------------------------
// Fine-grained category
// ---------------------------------------------------------------------------

/// Distance-banded subcategory within a coarse category.
///
/// Band boundaries are left-closed in feed units: approach bands are 50-yard
/// steps starting at 1800, around-the-green bands are 25-yard steps, putt
/// bands use the feed's putting distance scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailedCategory {
    OttLong,
    OttShort,
    App50_100,
    App100_150,
    App150_200,
    App200_250,
    App250Plus,
    Arg0_25,
    Arg25_50,
    Putt0_6,
    Putt6_15,
    Putt15_30,
    Putt30Plus,
    Other,
}

impl DetailedCategory {
    /// Return the display label used in output tables.
    pub fn label(&self) -> &'static str {
        match self {
            DetailedCategory::OttLong => "OTT Long",
            DetailedCategory::OttShort => "OTT Short",
            DetailedCategory::App50_100 => "App50-100",
            DetailedCategory::App100_150 => "App100-150",
            DetailedCategory::App150_200 => "App150-200",
            DetailedCategory::App200_250 => "App200-250",
            DetailedCategory::App250Plus => "App250+",
            DetailedCategory::Arg0_25 => "ARG0-25",
            DetailedCategory::Arg25_50 => "ARG25-50",
            DetailedCategory::Putt0_6 => "Putt0-6",
            DetailedCategory::Putt6_15 => "Putt6-15",
            DetailedCategory::Putt15_30 => "Putt15-30",
            DetailedCategory::Putt30Plus => "Putt30+",
            DetailedCategory::Other => "Other",
        }
    }

    /// Whether this is one of the approach distance bands.
    pub fn is_approach_band(&self) -> bool {
        matches!(
            self,
            DetailedCategory::App50_100
                | DetailedCategory::App100_150
                | DetailedCategory::App150_200
                | DetailedCategory::App200_250
                | DetailedCategory::App250Plus
        )
    }

    /// Whether this is one of the around-the-green distance bands.
    pub fn is_arg_band(&self) -> bool {
        matches!(self, DetailedCategory::Arg0_25 | DetailedCategory::Arg25_50)
    }

    /// Whether this is one of the putt distance bands.
    pub fn is_putt_band(&self) -> bool {
        matches!(
            self,
            DetailedCategory::Putt0_6
                | DetailedCategory::Putt6_15
                | DetailedCategory::Putt15_30
                | DetailedCategory::Putt30Plus
        )
    }
}

/// Assign the distance-banded subcategory from the coarse category and the
/// distance to the hole after the shot.
///
/// A missing after-distance, a coarse category of `Other`, or a distance
/// outside every band for the category all resolve to `Other`.
pub fn classify_detailed(category: ShotCategory, to_distance: Option<i64>) -> DetailedCategory {
    let Some(d) = to_distance else {
        return DetailedCategory::Other;
    };
    match category {
        ShotCategory::OffTheTee => {
            if d >= 10080 {
                DetailedCategory::OttLong
            } else {
                DetailedCategory::OttShort
            }
        }
        ShotCategory::Approach => match d {
            1800..=3599 => DetailedCategory::App50_100,
            3600..=5399 => DetailedCategory::App100_150,
            5400..=7199 => DetailedCategory::App150_200,
            7200..=8999 => DetailedCategory::App200_250,
            d if d >= 9000 => DetailedCategory::App250Plus,
            _ => DetailedCategory::Other,
        },
        ShotCategory::AroundTheGreen => match d {
            0..=899 => DetailedCategory::Arg0_25,
            900..=1799 => DetailedCategory::Arg25_50,
            _ => DetailedCategory::Other,
        },
        ShotCategory::Putt => match d {
            0..=5 => DetailedCategory::Putt0_6,
            6..=14 => DetailedCategory::Putt6_15,
            15..=29 => DetailedCategory::Putt15_30,
            d if d >= 30 => DetailedCategory::Putt30Plus,
            _ => DetailedCategory::Other,
        },
        ShotCategory::Other => DetailedCategory::Other,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
