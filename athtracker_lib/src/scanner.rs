//! All-time-high scan over a daily high series.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::AthError;
use crate::series::Series;
use crate::validation::DateBoundary;

/// A day whose high exceeded every earlier high in the scanned window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AthEvent {
    pub date: NaiveDate,
    pub high: f64,
}

/// Result of one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthReport {
    pub symbol: String,
    /// First date of the series.
    pub range_start: NaiveDate,
    /// Last date of the series when unbounded, otherwise the boundary as
    /// rendered, which may be a date the series never reached.
    pub range_end: String,
    pub events: Vec<AthEvent>,
    pub total: usize,
}

/// Walk `series` oldest to newest, recording each strictly greater high.
///
/// Stops at the first point after `boundary`. Fails only when the series is empty.
pub fn scan(symbol: &str, series: &Series, boundary: &DateBoundary) -> Result<AthReport, AthError> {
    let (first, last) = match (series.first(), series.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(AthError::EmptySeries(symbol.to_string())),
    };

    let mut current_ath = 0.0_f64;
    let mut events = Vec::new();
    for point in series {
        if !boundary.includes(point.date) {
            break;
        }
        if point.high > current_ath {
            current_ath = point.high;
            events.push(AthEvent {
                date: point.date,
                high: point.high,
            });
        }
    }

    let range_end = match boundary {
        DateBoundary::Unbounded => last.date.format("%Y-%m-%d").to_string(),
        DateBoundary::Until(eod) => eod.to_string(),
    };

    tracing::debug!(
        "Scanned {} points for {}: {} all-time highs",
        series.len(),
        symbol,
        events.len()
    );

    Ok(AthReport {
        symbol: symbol.to_string(),
        range_start: first.date,
        range_end,
        total: events.len(),
        events,
    })
}
