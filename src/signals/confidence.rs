//! Confidence grading

use crate::models::bias::{Confidence, UsdLabel};

/// Score magnitude that is high conviction on its own.
pub const HIGH_CONVICTION_SCORE: f64 = 0.5;
/// |corr12m| at or above this adds a point.
pub const STRONG_CORRELATION: f64 = 0.5;

/// Base band from score magnitude. Between `threshold` and the high-conviction
/// cut the grade depends on whether the USD view is directional.
pub fn confidence_band(abs_score: f64, threshold: f64, usd_is_strong: bool) -> Confidence {
    if abs_score >= HIGH_CONVICTION_SCORE {
        Confidence::High
    } else if abs_score >= threshold {
        if usd_is_strong {
            Confidence::High
        } else {
            Confidence::Medium
        }
    } else {
        Confidence::Low
    }
}

pub fn confidence_from(score: f64, threshold: f64, usd: UsdLabel) -> Confidence {
    confidence_band(score.abs(), threshold, usd.is_directional())
}

/// Add correlation and surprise points on top of a base grade.
pub fn confidence_advanced(
    base: Confidence,
    corr12m: Option<f64>,
    aligned_big_surprises: u32,
) -> Confidence {
    let mut points = base.points();
    if corr12m.is_some_and(|c| c.abs() >= STRONG_CORRELATION) {
        points += 1;
    }
    points += match aligned_big_surprises {
        0 => 0,
        1 => 1,
        _ => 2,
    };
    Confidence::from_points(points)
}

/// Entry point that starts from raw score magnitude instead of a base grade.
pub fn confidence_from_signals(
    abs_score: f64,
    usd_is_strong: bool,
    threshold: f64,
    corr12m: Option<f64>,
    aligned_big_surprises: u32,
) -> Confidence {
    confidence_advanced(
        confidence_band(abs_score, threshold, usd_is_strong),
        corr12m,
        aligned_big_surprises,
    )
}
