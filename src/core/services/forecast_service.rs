//! Next-month spending forecast from a linear trend over monthly totals.

use std::collections::BTreeMap;

use crate::core::errors::{LedgerError, Result};
use crate::core::services::SummaryService;
use crate::domain::{Category, ExpenseRecord};

/// Below this many expenses no forecast is produced.
pub const MIN_FORECAST_RECORDS: usize = 10;

/// Share of the predicted total suggested as next month's cap.
pub const SUGGESTED_CAP_RATIO: f64 = 0.9;

/// Fitted line `total = slope * month_index + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub slope: f64,
    pub intercept: f64,
}

impl Trend {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub predicted_total: f64,
    pub top_category: Category,
    pub top_category_total: f64,
    pub suggested_cap: f64,
    pub months_observed: usize,
    /// `None` when fewer than two months were observed and the single
    /// month's total was projected flat.
    pub trend: Option<Trend>,
}

pub struct ForecastService;

impl ForecastService {
    pub fn forecast(records: &[ExpenseRecord]) -> Result<ForecastResult> {
        if records.len() < MIN_FORECAST_RECORDS {
            return Err(LedgerError::InsufficientData {
                required: MIN_FORECAST_RECORDS,
                actual: records.len(),
            });
        }

        let totals: Vec<f64> = SummaryService::monthly_totals(records)
            .into_values()
            .collect();
        let trend = fit_trend(&totals);
        let predicted_total = match trend {
            Some(line) => line.predict(totals.len() as f64),
            None => totals.first().copied().unwrap_or(0.0),
        };

        let (top_category, top_category_total) = top_category(records).ok_or_else(|| {
            LedgerError::InsufficientData {
                required: MIN_FORECAST_RECORDS,
                actual: 0,
            }
        })?;

        tracing::info!(
            months = totals.len(),
            predicted_total,
            top_category = %top_category,
            "forecast computed"
        );

        Ok(ForecastResult {
            predicted_total,
            top_category,
            top_category_total,
            suggested_cap: predicted_total * SUGGESTED_CAP_RATIO,
            months_observed: totals.len(),
            trend,
        })
    }
}

/// Ordinary least squares over `(index, value)` pairs.
///
/// Returns `None` for fewer than two points.
pub fn fit_trend(values: &[f64]) -> Option<Trend> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (idx, y) in values.iter().enumerate() {
        let x = idx as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }
    // Distinct indices keep the denominator positive.
    let denominator = n * sum_xx - sum_x * sum_x;
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(Trend { slope, intercept })
}

/// Highest spending category over the whole dataset.
///
/// Ties go to the lexically smallest label.
pub fn top_category(records: &[ExpenseRecord]) -> Option<(Category, f64)> {
    let mut totals: BTreeMap<&Category, f64> = BTreeMap::new();
    for record in records {
        *totals.entry(&record.category).or_insert(0.0) += record.amount;
    }
    let mut best: Option<(&Category, f64)> = None;
    for (category, total) in totals {
        match best {
            Some((_, current)) if total <= current => {}
            _ => best = Some((category, total)),
        }
    }
    best.map(|(category, total)| (category.clone(), total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseDraft, PaymentMode};
    use chrono::NaiveDate;

    fn record(month: u32, category: Category, amount: f64) -> ExpenseRecord {
        ExpenseDraft::new(
            NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            "Payee",
            "Item",
            amount,
            PaymentMode::Card,
            category,
        )
        .into_record(0)
    }

    #[test]
    fn nine_records_are_not_enough() {
        let records: Vec<_> = (0..9).map(|_| record(1, Category::Food, 5.0)).collect();
        let err = ForecastService::forecast(&records).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientData {
                required: 10,
                actual: 9
            }
        ));
    }

    #[test]
    fn single_month_projects_flat() {
        let records: Vec<_> = (0..10).map(|_| record(3, Category::Food, 20.0)).collect();
        let result = ForecastService::forecast(&records).unwrap();
        assert_eq!(result.months_observed, 1);
        assert!(result.trend.is_none());
        assert!((result.predicted_total - 200.0).abs() < 1e-9);
        assert!((result.suggested_cap - 180.0).abs() < 1e-9);
    }

    #[test]
    fn linear_months_extrapolate_exactly() {
        // Monthly totals 10, 20, 30, 40 -> next is 50.
        let mut records = Vec::new();
        for month in 1..=4u32 {
            for _ in 0..3 {
                records.push(record(month, Category::Work, month as f64 * 10.0 / 3.0));
            }
        }
        let result = ForecastService::forecast(&records).unwrap();
        let trend = result.trend.expect("two or more months fit a line");
        assert!((trend.slope - 10.0).abs() < 1e-9);
        assert!((trend.intercept - 10.0).abs() < 1e-9);
        assert!((result.predicted_total - 50.0).abs() < 1e-9);
    }

    #[test]
    fn fit_trend_handles_flat_series() {
        let trend = fit_trend(&[7.0, 7.0, 7.0]).unwrap();
        assert!(trend.slope.abs() < 1e-12);
        assert!((trend.predict(3.0) - 7.0).abs() < 1e-12);
        assert!(fit_trend(&[1.0]).is_none());
    }

    #[test]
    fn top_category_ties_break_lexically() {
        let records = vec![
            record(1, Category::Work, 40.0),
            record(1, Category::Home, 40.0),
            record(2, Category::Fun, 10.0),
        ];
        let (category, total) = top_category(&records).unwrap();
        assert_eq!(category, Category::Home);
        assert_eq!(total, 40.0);
    }

    #[test]
    fn cap_is_ninety_percent_of_prediction() {
        let mut records = Vec::new();
        for (idx, month) in [1u32, 1, 2, 2, 3, 3, 4, 5, 5, 6].iter().enumerate() {
            records.push(record(*month, Category::Food, 13.7 * (idx as f64 + 1.0)));
        }
        let result = ForecastService::forecast(&records).unwrap();
        assert!((result.suggested_cap - result.predicted_total * 0.9).abs() < 1e-9);
        assert_eq!(result.top_category, Category::Food);
    }
}
