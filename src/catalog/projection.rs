// Projection estimates from average draft position.
//
// The catalog feed carries no per-game projections, so proj_ppg is derived
// from ADP with a per-position decay curve: earlier picks project near the
// positional base, late picks approach the positional floor.

use crate::catalog::player::Position;

/// Deepest ADP the curve distinguishes; anything drafted later is floor value.
const ADP_HORIZON: f64 = 250.0;

/// Multiplier applied to the positional base when no ADP exists.
const NO_ADP_FACTOR: f64 = 0.6;

fn base_ppg(pos: Position) -> f64 {
    match pos {
        Position::QB => 24.0,
        Position::RB => 20.0,
        Position::WR => 19.0,
        Position::TE => 14.0,
        Position::K => 9.0,
        Position::DST => 8.0,
    }
}

fn floor_ppg(pos: Position) -> f64 {
    match pos {
        Position::QB => 12.0,
        Position::RB => 8.0,
        Position::WR => 8.0,
        Position::TE => 6.0,
        Position::K => 5.0,
        Position::DST => 5.0,
    }
}

/// Curve exponent bias; steeper positions lose value faster down the board.
fn curve_exp(pos: Position) -> f64 {
    match pos {
        Position::QB => 0.55,
        Position::RB => 0.62,
        Position::WR => 0.60,
        Position::TE => 0.58,
        Position::K => 0.45,
        Position::DST => 0.40,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Estimate projected PPG for a player at `pos` drafted at `adp`.
///
/// Undrafted (or non-finite ADP) players get 60% of the positional base.
/// Otherwise the ADP is mapped logarithmically onto [0, 1] over a 250-pick
/// horizon and the value decays from base toward floor. Always returns a
/// positive value rounded to one decimal.
pub fn approx_ppg(pos: Position, adp: Option<f64>) -> f64 {
    let base = base_ppg(pos);
    let adp = match adp {
        Some(a) if a.is_finite() && a > 0.0 => a,
        _ => return round1(base * NO_ADP_FACTOR),
    };

    let floor = floor_ppg(pos);
    let pct = ((adp + 1.0).ln() / ADP_HORIZON.ln()).clamp(0.0, 1.0);
    let value = floor + (base - floor) * (1.0 - pct).powf(1.0 + curve_exp(pos));
    round1(value)
}
