use arch_core::models::reading::HistoricalReading;
use arch_core::store::TREND_WINDOW;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Readings above this level (mg/dL) count toward a persistent-high trend.
pub const HIGH_GLUCOSE_MG_DL: f64 = 180.0;

/// Minimum number of high readings (and of readings overall) for a trend.
pub const MIN_HIGH_READINGS: usize = 3;

/// Trend derived from a patient's recent history. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendSignal {
    pub persistently_high: bool,
}

/// Derive the trend signal from prior readings.
///
/// `prior` is the history fetch result: newest first, strictly older than the
/// reading under assessment. Only the first [`TREND_WINDOW`] entries count.
/// Sparse history (fewer than three readings) never signals.
pub fn analyze(prior: &[HistoricalReading]) -> TrendSignal {
    let window = &prior[..prior.len().min(TREND_WINDOW)];
    if window.len() < MIN_HIGH_READINGS {
        return TrendSignal::default();
    }
    let high = window
        .iter()
        .filter(|r| r.glucose.value() > HIGH_GLUCOSE_MG_DL)
        .count();
    TrendSignal {
        persistently_high: high >= MIN_HIGH_READINGS,
    }
}
