//! Value → policy-stance classification per indicator family

use crate::models::indicator::Posture;
use crate::models::series::SeriesId;

/// Which side of the band reads as Hawkish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsHawkish,
    HigherIsDovish,
}

/// Neutral band for a family. Both bounds are inclusive on the Neutral side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureBand {
    pub low: f64,
    pub high: f64,
    pub polarity: Polarity,
}

impl PostureBand {
    const fn hawkish_above(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            polarity: Polarity::HigherIsHawkish,
        }
    }

    const fn dovish_above(low: f64, high: f64) -> Self {
        Self {
            low,
            high,
            polarity: Polarity::HigherIsDovish,
        }
    }

    pub fn classify(&self, value: f64) -> Posture {
        let (below, above) = match self.polarity {
            Polarity::HigherIsHawkish => (Posture::Dovish, Posture::Hawkish),
            Polarity::HigherIsDovish => (Posture::Hawkish, Posture::Dovish),
        };
        if value < self.low {
            below
        } else if value > self.high {
            above
        } else {
            Posture::Neutral
        }
    }
}

const CURVE: PostureBand = PostureBand::hawkish_above(0.0, 1.0);
const BREAKEVEN: PostureBand = PostureBand::hawkish_above(2.0, 3.0);
const FINANCIAL_CONDITIONS: PostureBand = PostureBand::dovish_above(-0.3, 0.3);
const GDP_GROWTH: PostureBand = PostureBand::hawkish_above(1.0, 2.5);
const ACTIVITY_GROWTH: PostureBand = PostureBand::hawkish_above(0.0, 3.0);
const CAPACITY: PostureBand = PostureBand::hawkish_above(77.0, 80.0);
const PAYROLLS_K: PostureBand = PostureBand::hawkish_above(100.0, 250.0);
const UNEMPLOYMENT: PostureBand = PostureBand::dovish_above(4.0, 4.5);
const CLAIMS: PostureBand = PostureBand::dovish_above(200_000.0, 300_000.0);
const LEADING_INDEX: PostureBand = PostureBand::hawkish_above(0.0, 2.0);
const ISM: PostureBand = PostureBand::hawkish_above(50.0, 52.0);
const UNDEREMPLOYMENT: PostureBand = PostureBand::dovish_above(7.0, 8.5);
const PRICES: PostureBand = PostureBand::hawkish_above(2.5, 3.0);
const PPI: PostureBand = PostureBand::hawkish_above(1.0, 3.0);
const POLICY_RATE: PostureBand = PostureBand::hawkish_above(4.0, 5.0);
const VIX: PostureBand = PostureBand::dovish_above(15.0, 25.0);
const BROAD_DOLLAR: PostureBand = PostureBand::hawkish_above(-2.0, 2.0);

/// Band for a series, `None` when the family is not recognized.
pub fn band_for(series: &SeriesId) -> Option<PostureBand> {
    let band = match series {
        SeriesId::Curve10y2y | SeriesId::Curve10y3m => CURVE,
        SeriesId::Breakeven5y => BREAKEVEN,
        SeriesId::FinancialConditions => FINANCIAL_CONDITIONS,
        SeriesId::Gdp => GDP_GROWTH,
        SeriesId::IndustrialProduction
        | SeriesId::RetailSales
        | SeriesId::DurableGoods
        | SeriesId::Construction => ACTIVITY_GROWTH,
        SeriesId::CapacityUtilization => CAPACITY,
        SeriesId::Payrolls => PAYROLLS_K,
        SeriesId::Unemployment => UNEMPLOYMENT,
        SeriesId::InitialClaims => CLAIMS,
        SeriesId::LeadingIndex => LEADING_INDEX,
        SeriesId::IsmManufacturing => ISM,
        SeriesId::Underemployment => UNDEREMPLOYMENT,
        SeriesId::Pce | SeriesId::CorePce | SeriesId::Cpi | SeriesId::CoreCpi => PRICES,
        SeriesId::Ppi => PPI,
        SeriesId::PolicyRate => POLICY_RATE,
        SeriesId::Vix => VIX,
        SeriesId::BroadDollar => BROAD_DOLLAR,
        SeriesId::Other(code) if code.to_ascii_lowercase().ends_with("_yoy") => ACTIVITY_GROWTH,
        SeriesId::IsmServices | SeriesId::Other(_) => return None,
    };
    Some(band)
}

/// Classify a reading. Missing or non-finite values are Neutral, as is any
/// unrecognized series.
pub fn classify_posture(series: &SeriesId, value: Option<f64>) -> Posture {
    let value = match value {
        Some(v) if v.is_finite() => v,
        _ => return Posture::Neutral,
    };
    band_for(series)
        .map(|band| band.classify(value))
        .unwrap_or(Posture::Neutral)
}
