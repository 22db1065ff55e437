use crate::domain::model::{MonthResult, TrendDirection, TrendEntry};
use std::collections::HashMap;

/// Direction between the first and last present scores of a series.
pub fn trend_direction(scores: &[Option<f64>]) -> (TrendDirection, Option<f64>) {
    let mut present = scores.iter().flatten();
    let first = present.next();
    let last = present.last();

    match (first, last) {
        (Some(first), Some(last)) => {
            let delta = last - first;
            let direction = if delta > 0.0 {
                TrendDirection::Up
            } else if delta < 0.0 {
                TrendDirection::Down
            } else {
                TrendDirection::Flat
            };
            (direction, Some(delta))
        }
        _ => (TrendDirection::InsufficientData, None),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TrendAggregator;

impl TrendAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Per-nation score series across `months`, in month order.
    pub fn aggregate(&self, months: &[MonthResult]) -> HashMap<String, TrendEntry> {
        let mut series: HashMap<String, Vec<Option<f64>>> = HashMap::new();

        for (index, month) in months.iter().enumerate() {
            for record in &month.records {
                let slots = series
                    .entry(record.country_code.clone())
                    .or_insert_with(|| vec![None; months.len()]);
                slots[index] = Some(record.effort_score);
            }
        }

        series
            .into_iter()
            .map(|(country_code, scores)| {
                let (trend_direction, delta) = trend_direction(&scores);
                let entry = TrendEntry {
                    country_code: country_code.clone(),
                    scores,
                    trend_direction,
                    delta,
                };
                (country_code, entry)
            })
            .collect()
    }
}
