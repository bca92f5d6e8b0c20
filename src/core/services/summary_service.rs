//! Aggregation helpers for monthly summaries and chart series.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::domain::{Category, ExpenseRecord, MonthKey, DATE_FORMAT};

/// Per-month, per-category totals derived from the ledger.
///
/// `yearly_total` is the sum over the whole dataset, whatever span of years
/// it covers. Calendar-year totals live in `per_year`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyCategorySummary {
    pub monthly: BTreeMap<MonthKey, BTreeMap<Category, f64>>,
    pub yearly_total: f64,
    pub per_year: BTreeMap<i32, f64>,
}

impl MonthlyCategorySummary {
    pub fn months(&self) -> impl Iterator<Item = &MonthKey> {
        self.monthly.keys()
    }

    pub fn month_total(&self, key: &MonthKey) -> f64 {
        self.monthly
            .get(key)
            .map(|categories| categories.values().sum())
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.monthly.is_empty()
    }
}

/// Month axis and one value series per fixed chart category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub months: Vec<MonthKey>,
    pub series: Vec<(Category, Vec<f64>)>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Largest single bar, used to scale rendered charts.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .fold(0.0, f64::max)
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Groups `records` by month and category and sums their amounts.
    pub fn summarize(records: &[ExpenseRecord]) -> MonthlyCategorySummary {
        let mut summary = MonthlyCategorySummary::default();
        for record in records {
            *summary
                .monthly
                .entry(record.month_key())
                .or_default()
                .entry(record.category.clone())
                .or_insert(0.0) += record.amount;
            *summary.per_year.entry(record.date.year()).or_insert(0.0) += record.amount;
            summary.yearly_total += record.amount;
        }
        tracing::debug!(
            records = records.len(),
            months = summary.monthly.len(),
            "expenses summarized"
        );
        summary
    }

    /// Sums amounts per month, in chronological order.
    pub fn monthly_totals(records: &[ExpenseRecord]) -> BTreeMap<MonthKey, f64> {
        let mut totals = BTreeMap::new();
        for record in records {
            *totals.entry(record.month_key()).or_insert(0.0) += record.amount;
        }
        totals
    }

    /// Builds bar chart series over [`Category::CHART_AXIS`].
    ///
    /// Every month with spending gets an axis slot; amounts in categories
    /// outside the axis are left out of the series.
    pub fn chart_series(records: &[ExpenseRecord]) -> ChartSeries {
        let mut by_month: BTreeMap<MonthKey, [f64; 5]> = BTreeMap::new();
        for record in records {
            let row = by_month.entry(record.month_key()).or_insert([0.0; 5]);
            if let Some(slot) = Category::CHART_AXIS
                .iter()
                .position(|category| *category == record.category)
            {
                row[slot] += record.amount;
            }
        }

        let months: Vec<MonthKey> = by_month.keys().copied().collect();
        let series = Category::CHART_AXIS
            .into_iter()
            .enumerate()
            .map(|(slot, category)| {
                let values = by_month.values().map(|row| row[slot]).collect();
                (category, values)
            })
            .collect();
        ChartSeries { months, series }
    }

    /// Reads an expense as a sentence.
    pub fn describe(record: &ExpenseRecord) -> String {
        format!(
            "You paid {:.2} to {} for {} on {} via {} in the category of {}.",
            record.amount,
            record.payee,
            record.description,
            record.date.format(DATE_FORMAT),
            record.mode_of_payment,
            record.category
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseDraft, PaymentMode};
    use chrono::NaiveDate;

    fn record(id: u64, (y, m, d): (i32, u32, u32), category: Category, amount: f64) -> ExpenseRecord {
        ExpenseDraft::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            "Payee",
            "Item",
            amount,
            PaymentMode::Cash,
            category,
        )
        .into_record(id)
    }

    #[test]
    fn summarize_groups_by_month_and_category() {
        let records = vec![
            record(1, (2024, 1, 3), Category::Food, 100.0),
            record(2, (2024, 1, 20), Category::Fun, 50.0),
            record(3, (2024, 2, 1), Category::Food, 30.0),
        ];
        let summary = SummaryService::summarize(&records);
        let jan = MonthKey::new(2024, 1);
        let feb = MonthKey::new(2024, 2);
        assert_eq!(summary.monthly.len(), 2);
        assert_eq!(summary.monthly[&jan][&Category::Food], 100.0);
        assert_eq!(summary.monthly[&jan][&Category::Fun], 50.0);
        assert_eq!(summary.monthly[&feb].len(), 1);
        assert_eq!(summary.monthly[&feb][&Category::Food], 30.0);
        assert_eq!(summary.yearly_total, 180.0);
        assert_eq!(summary.month_total(&jan), 150.0);
    }

    #[test]
    fn yearly_total_spans_every_year() {
        let records = vec![
            record(1, (2023, 12, 31), Category::Home, 10.0),
            record(2, (2024, 1, 1), Category::Home, 5.0),
        ];
        let summary = SummaryService::summarize(&records);
        assert_eq!(summary.yearly_total, 15.0);
        assert_eq!(summary.per_year[&2023], 10.0);
        assert_eq!(summary.per_year[&2024], 5.0);
        let months: Vec<String> = summary.months().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2023-12", "2024-01"]);
    }

    #[test]
    fn chart_series_skips_custom_categories() {
        let records = vec![
            record(1, (2024, 3, 1), Category::Work, 12.0),
            record(2, (2024, 3, 2), Category::Other("Travel".into()), 99.0),
            record(3, (2024, 4, 2), Category::Food, 8.0),
        ];
        let chart = SummaryService::chart_series(&records);
        assert_eq!(chart.months, vec![MonthKey::new(2024, 3), MonthKey::new(2024, 4)]);
        let labels: Vec<&Category> = chart.series.iter().map(|(c, _)| c).collect();
        assert_eq!(labels, Category::CHART_AXIS.iter().collect::<Vec<_>>());
        let work = &chart.series[2].1;
        assert_eq!(work, &vec![12.0, 0.0]);
        assert_eq!(chart.max_value(), 12.0);

        let summary = SummaryService::summarize(&records);
        assert_eq!(summary.yearly_total, 119.0);
        assert!(summary.monthly[&MonthKey::new(2024, 3)]
            .contains_key(&Category::Other("Travel".into())));
    }

    #[test]
    fn chart_series_keeps_months_with_only_custom_spending() {
        let records = vec![record(1, (2024, 5, 1), Category::Other("Gifts".into()), 7.0)];
        let chart = SummaryService::chart_series(&records);
        assert_eq!(chart.months, vec![MonthKey::new(2024, 5)]);
        assert!(chart.series.iter().all(|(_, values)| values == &vec![0.0]));
        assert_eq!(chart.max_value(), 0.0);
    }

    #[test]
    fn describe_reads_like_a_sentence() {
        let r = record(4, (2024, 6, 9), Category::Fun, 12.5);
        assert_eq!(
            SummaryService::describe(&r),
            "You paid 12.50 to Payee for Item on 2024-06-09 via Cash in the category of Fun."
        );
    }
}
