//! Overs arithmetic.
//!
//! Bowling figures use cricket notation: `1.2` is one completed over plus two
//! balls (eight legal deliveries), not 1.2 × 6. Rates divide by the decimal
//! equivalent (`1 + 2/6`).

/// Legal deliveries in one over.
pub const BALLS_PER_OVER: u32 = 6;

/// Round half away from zero to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Notation value for a count of legal deliveries (`8` → `1.2`).
pub fn notation_from_balls(balls: u32) -> f64 {
    let completed = balls / BALLS_PER_OVER;
    let in_over = balls % BALLS_PER_OVER;
    round_to(completed as f64 + in_over as f64 / 10.0, 1)
}

/// Legal deliveries represented by a notation value (`1.2` → `8`).
///
/// Non-finite and negative values read as zero.
pub fn balls_from_notation(overs: f64) -> u32 {
    if !overs.is_finite() || overs <= 0.0 {
        return 0;
    }
    let completed = overs.trunc();
    let in_over = ((overs - completed) * 10.0).round() as u32;
    completed as u32 * BALLS_PER_OVER + in_over
}

/// Decimal overs equivalent of a notation value (`1.2` → `1.333…`).
pub fn decimal_overs(overs: f64) -> f64 {
    balls_from_notation(overs) as f64 / BALLS_PER_OVER as f64
}

/// Runs conceded per over, rounded to two places; `0.0` before any ball.
pub fn economy_rate(runs: u32, overs: f64) -> f64 {
    let decimal = decimal_overs(overs);
    if decimal == 0.0 {
        0.0
    } else {
        round_to(runs as f64 / decimal, 2)
    }
}

/// Runs per hundred balls, rounded to two places; `0.0` before any ball.
pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        0.0
    } else {
        round_to(runs as f64 / balls as f64 * 100.0, 2)
    }
}

/// Display form of a team's overs: `"12"` on an over boundary, else `"12.3"`.
pub fn format_overs(overs: u32, balls: u32) -> String {
    if balls == 0 {
        overs.to_string()
    } else {
        format!("{overs}.{balls}")
    }
}
