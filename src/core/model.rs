//! Canonical rate and history types shared by every data source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::currency::CurrencyCode;

/// A point-in-time quote: 1 unit of `currency` equals `rate_to_reference`
/// units of the reference currency. A missing rate is "no rate", never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub currency: CurrencyCode,
    pub rate_to_reference: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Daily rate series, strictly ascending by date with no duplicates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistorySeries {
    points: Vec<HistoryPoint>,
}

impl HistorySeries {
    /// Normalizes raw points into a valid series: sort ascending by date,
    /// collapse same-date samples keeping the latest one, and keep at most
    /// the `days` most recent points.
    ///
    /// Same-date collapse relies on the sort being stable, so callers that
    /// sample a date more than once (intraday data) must pass points in
    /// ascending sample order.
    pub fn from_points(mut points: Vec<HistoryPoint>, days: u32) -> Self {
        points.sort_by_key(|p| p.date);

        let mut collapsed: Vec<HistoryPoint> = Vec::with_capacity(points.len());
        for point in points {
            match collapsed.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => collapsed.push(point),
            }
        }

        let keep = days as usize;
        if collapsed.len() > keep {
            collapsed.drain(..collapsed.len() - keep);
        }

        HistorySeries { points: collapsed }
    }

    pub fn points(&self) -> &[HistoryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.last()
    }
}

/// Outcome of a conversion request. The arithmetic is performed by the
/// conversion service; `converted_amount` is reported verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub input_amount: f64,
    pub converted_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, rate: f64) -> HistoryPoint {
        HistoryPoint {
            date: date.parse().unwrap(),
            rate,
        }
    }

    #[test]
    fn test_from_points_sorts_ascending_by_date() {
        let series = HistorySeries::from_points(
            vec![
                point("2024-01-03", 5.3),
                point("2024-01-01", 5.1),
                point("2024-01-02", 5.2),
            ],
            30,
        );

        let dates: Vec<_> = series.points().iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_from_points_collapses_duplicate_dates_keeping_latest() {
        let series = HistorySeries::from_points(
            vec![
                point("2024-01-01", 5.0),
                point("2024-01-01", 5.5),
                point("2024-01-02", 5.2),
            ],
            30,
        );

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].rate, 5.5);
    }

    #[test]
    fn test_from_points_keeps_only_most_recent_days() {
        let points = (1..=10)
            .map(|day| point(&format!("2024-01-{day:02}"), day as f64))
            .collect();
        let series = HistorySeries::from_points(points, 3);

        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[0].date.to_string(), "2024-01-08");
        assert_eq!(series.latest().unwrap().date.to_string(), "2024-01-10");
    }

    #[test]
    fn test_empty_series() {
        let series = HistorySeries::from_points(vec![], 30);
        assert!(series.is_empty());
        assert!(series.latest().is_none());
    }
}
