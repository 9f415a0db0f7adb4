// Starting-lineup slot taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::player::Position;

/// A starting-lineup slot. RB and WR get two numbered slots each; FLEX takes
/// RB/WR/TE overflow; BENCH holds everyone who does not start.
///
/// Variants are declared in lineup display order, so the derived `Ord` walks
/// QB1 through DST and keeps BENCH last.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Slot {
    QB1,
    RB1,
    RB2,
    WR1,
    WR2,
    TE,
    FLEX,
    K,
    DST,
    BENCH,
}

impl Slot {
    /// The nine starting slots in display order (BENCH excluded).
    pub const STARTING: [Slot; 9] = [
        Slot::QB1,
        Slot::RB1,
        Slot::RB2,
        Slot::WR1,
        Slot::WR2,
        Slot::TE,
        Slot::FLEX,
        Slot::K,
        Slot::DST,
    ];

    /// Parse a slot label (e.g. "QB1", "FLEX"). Case-insensitive.
    pub fn from_str_slot(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "QB1" => Some(Slot::QB1),
            "RB1" => Some(Slot::RB1),
            "RB2" => Some(Slot::RB2),
            "WR1" => Some(Slot::WR1),
            "WR2" => Some(Slot::WR2),
            "TE" => Some(Slot::TE),
            "FLEX" => Some(Slot::FLEX),
            "K" => Some(Slot::K),
            "DST" => Some(Slot::DST),
            "BENCH" | "BN" | "BE" => Some(Slot::BENCH),
            _ => None,
        }
    }

    /// Return the display label for this slot.
    pub fn display_str(&self) -> &'static str {
        match self {
            Slot::QB1 => "QB1",
            Slot::RB1 => "RB1",
            Slot::RB2 => "RB2",
            Slot::WR1 => "WR1",
            Slot::WR2 => "WR2",
            Slot::TE => "TE",
            Slot::FLEX => "FLEX",
            Slot::K => "K",
            Slot::DST => "DST",
            Slot::BENCH => "BENCH",
        }
    }

    /// The single position this slot is dedicated to, if any.
    /// FLEX and BENCH accept multiple positions and return None.
    pub fn position(&self) -> Option<Position> {
        match self {
            Slot::QB1 => Some(Position::QB),
            Slot::RB1 | Slot::RB2 => Some(Position::RB),
            Slot::WR1 | Slot::WR2 => Some(Position::WR),
            Slot::TE => Some(Position::TE),
            Slot::K => Some(Position::K),
            Slot::DST => Some(Position::DST),
            Slot::FLEX | Slot::BENCH => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}
