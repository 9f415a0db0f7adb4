// Letter grading of performance deltas relative to replacement baselines.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Grade scale
// ---------------------------------------------------------------------------

/// Eleven-level letter grade for a starter or a whole team.
///
/// Ordered from best to worst: A+, A, A-, B+, B, B-, C+, C, C-, D, F.
/// Serializes to its display label (e.g. `"A+"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// Map a relative delta (projection vs baseline, as a fraction) to a grade.
    ///
    /// Thresholds are inclusive lower bounds checked top-down; the first match
    /// wins. Defined for every input, including far-out-of-range values.
    pub fn from_delta_pct(delta_pct: f64) -> Grade {
        if delta_pct >= 0.25 {
            Grade::APlus
        } else if delta_pct >= 0.18 {
            Grade::A
        } else if delta_pct >= 0.12 {
            Grade::AMinus
        } else if delta_pct >= 0.08 {
            Grade::BPlus
        } else if delta_pct >= 0.04 {
            Grade::B
        } else if delta_pct >= 0.00 {
            Grade::BMinus
        } else if delta_pct >= -0.04 {
            Grade::CPlus
        } else if delta_pct >= -0.08 {
            Grade::C
        } else if delta_pct >= -0.12 {
            Grade::CMinus
        } else if delta_pct >= -0.20 {
            Grade::D
        } else {
            Grade::F
        }
    }

    /// Parse a display label back into a grade (e.g. from a narrative reply).
    pub fn from_label(s: &str) -> Option<Grade> {
        match s.trim() {
            "A+" => Some(Grade::APlus),
            "A" => Some(Grade::A),
            "A-" => Some(Grade::AMinus),
            "B+" => Some(Grade::BPlus),
            "B" => Some(Grade::B),
            "B-" => Some(Grade::BMinus),
            "C+" => Some(Grade::CPlus),
            "C" => Some(Grade::C),
            "C-" => Some(Grade::CMinus),
            "D" => Some(Grade::D),
            "F" => Some(Grade::F),
            _ => None,
        }
    }

    /// Return the display label for this grade.
    pub fn label(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Display color for the grade family (teal for A, down to red for F).
    pub fn color(&self) -> &'static str {
        match self {
            Grade::APlus | Grade::A | Grade::AMinus => "#5eead4",
            Grade::BPlus | Grade::B | Grade::BMinus => "#6ee7b7",
            Grade::CPlus | Grade::C | Grade::CMinus => "#fde68a",
            Grade::D => "#fdba74",
            Grade::F => "#f87171",
        }
    }

    /// Numeric quality rank: F = 0 up to A+ = 10.
    pub fn rank(&self) -> u8 {
        match self {
            Grade::F => 0,
            Grade::D => 1,
            Grade::CMinus => 2,
            Grade::C => 3,
            Grade::CPlus => 4,
            Grade::BMinus => 5,
            Grade::B => 6,
            Grade::BPlus => 7,
            Grade::AMinus => 8,
            Grade::A => 9,
            Grade::APlus => 10,
        }
    }
}

impl PartialOrd for Grade {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Grade {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
