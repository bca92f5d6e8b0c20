//! Text rendering for expenses, summaries, charts and forecasts.
//!
//! Renderers return plain strings; colour is applied by the output helpers.

use crate::config::Config;
use crate::core::services::{ChartSeries, ForecastResult, MonthlyCategorySummary};
use crate::domain::{ExpenseRecord, Labelled, DATE_FORMAT};

use super::ui::{Table, TableColumn};

const FALLBACK_CHART_WIDTH: usize = 60;
const MIN_BAR_WIDTH: usize = 10;

pub fn expense_table(records: &[ExpenseRecord], config: &Config) -> String {
    let mut table = Table::new(vec![
        TableColumn::right("ID"),
        TableColumn::left("Date"),
        TableColumn::left("Payee").max_width(24),
        TableColumn::left("Description").max_width(32),
        TableColumn::right("Amount"),
        TableColumn::left("Mode"),
        TableColumn::left("Category"),
    ]);
    for record in records {
        table.push_row(vec![
            record.id.to_string(),
            record.date.format(DATE_FORMAT).to_string(),
            record.payee.clone(),
            record.description.clone(),
            config.format_amount(record.amount),
            record.mode_of_payment.label().to_string(),
            record.category.label().to_string(),
        ]);
    }
    table.render()
}

pub fn render_details(record: &ExpenseRecord, config: &Config) -> String {
    [
        format!("  ID          : {}", record.id),
        format!("  Date        : {}", record.date.format(DATE_FORMAT)),
        format!("  Payee       : {}", record.payee),
        format!("  Description : {}", record.description),
        format!("  Amount      : {}", config.format_amount(record.amount)),
        format!("  Mode        : {}", record.mode_of_payment),
        format!("  Category    : {}", record.category),
    ]
    .join("\n")
}

/// Month-by-month category totals followed by the overall total.
pub fn render_summary(summary: &MonthlyCategorySummary, config: &Config) -> String {
    let mut lines = vec!["Monthly Expense Summary".to_string()];
    for (month, categories) in &summary.monthly {
        lines.push(String::new());
        lines.push(month.long_label());
        for (category, amount) in categories {
            lines.push(format!("  {}: {}", category, config.format_amount(*amount)));
        }
        lines.push(format!(
            "  Total for {}: {}",
            month.long_label(),
            config.format_amount(summary.month_total(month))
        ));
    }

    lines.push(String::new());
    lines.push("--- Total Yearly Expenses ---".to_string());
    lines.push(format!(
        "Total Yearly Expense: {}",
        config.format_amount(summary.yearly_total)
    ));
    if summary.per_year.len() > 1 {
        for (year, total) in &summary.per_year {
            lines.push(format!("  {}: {}", year, config.format_amount(*total)));
        }
    }
    lines.join("\n")
}

/// Resolves the chart width from preferences, then the terminal.
pub fn chart_width(config: &Config) -> usize {
    if let Some(width) = config.chart_width {
        return usize::from(width);
    }
    crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols))
        .unwrap_or(FALLBACK_CHART_WIDTH)
}

/// Horizontal bar chart, one block per month and one bar per chart category.
pub fn render_chart(chart: &ChartSeries, config: &Config, width: usize) -> String {
    let label_width = chart
        .series
        .iter()
        .map(|(category, _)| category.label().chars().count())
        .max()
        .unwrap_or(0);
    let amount_width = chart
        .series
        .iter()
        .flat_map(|(_, values)| values.iter())
        .map(|value| config.format_amount(*value).chars().count())
        .max()
        .unwrap_or(0);
    let bar_room = width
        .saturating_sub(label_width + amount_width + 6)
        .max(MIN_BAR_WIDTH);
    let max = chart.max_value();

    let mut lines = vec!["Expenses by Category per Month".to_string()];
    for (slot, month) in chart.months.iter().enumerate() {
        lines.push(String::new());
        lines.push(month.long_label());
        for (category, values) in &chart.series {
            let value = values.get(slot).copied().unwrap_or(0.0);
            let filled = if max > 0.0 {
                ((value / max) * bar_room as f64).round() as usize
            } else {
                0
            };
            let line = format!(
                "  {:<label$} {} {}",
                category.label(),
                "█".repeat(filled),
                config.format_amount(value),
                label = label_width
            );
            lines.push(line);
        }
    }
    lines.join("\n")
}

pub fn render_forecast(result: &ForecastResult, config: &Config) -> String {
    [
        "Spending Suggestions".to_string(),
        format!(
            "- Based on your data, next month's predicted total expense is: {}.",
            config.format_amount(result.predicted_total)
        ),
        format!(
            "- Your highest spending category so far is '{}' with a total of {}.",
            result.top_category,
            config.format_amount(result.top_category_total)
        ),
        format!(
            "- Try limiting your expenses in the '{}' category if needed.",
            result.top_category
        ),
        format!(
            "- You might want to set a spending limit for the next month to {}.",
            config.format_amount(result.suggested_cap)
        ),
        format!(
            "  ({} month(s) of history observed.)",
            result.months_observed
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::SummaryService;
    use crate::domain::{Category, ExpenseDraft, PaymentMode};
    use chrono::NaiveDate;

    fn record(id: u64, (y, m, d): (i32, u32, u32), category: Category, amount: f64) -> ExpenseRecord {
        ExpenseDraft::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            "Shop",
            "Things",
            amount,
            PaymentMode::Cash,
            category,
        )
        .into_record(id)
    }

    #[test]
    fn summary_lists_months_and_totals() {
        let records = vec![
            record(1, (2024, 1, 3), Category::Food, 100.0),
            record(2, (2024, 1, 9), Category::Fun, 50.0),
            record(3, (2024, 2, 1), Category::Food, 30.0),
        ];
        let summary = SummaryService::summarize(&records);
        let text = render_summary(&summary, &Config::default());
        insta::assert_snapshot!(text, @r###"
        Monthly Expense Summary

        January 2024
          Food: ₹100.00
          Fun: ₹50.00
          Total for January 2024: ₹150.00

        February 2024
          Food: ₹30.00
          Total for February 2024: ₹30.00

        --- Total Yearly Expenses ---
        Total Yearly Expense: ₹180.00
        "###);
    }

    #[test]
    fn summary_breaks_down_multiple_years() {
        let records = vec![
            record(1, (2023, 12, 30), Category::Home, 10.0),
            record(2, (2024, 1, 2), Category::Home, 5.0),
        ];
        let text = render_summary(&SummaryService::summarize(&records), &Config::default());
        assert!(text.contains("Total Yearly Expense: ₹15.00"));
        assert!(text.contains("  2023: ₹10.00"));
        assert!(text.contains("  2024: ₹5.00"));
    }

    #[test]
    fn chart_scales_bars_to_largest_value() {
        let records = vec![
            record(1, (2024, 3, 1), Category::Food, 40.0),
            record(2, (2024, 3, 2), Category::Work, 20.0),
        ];
        let chart = SummaryService::chart_series(&records);
        let text = render_chart(&chart, &Config::default(), 40);
        let food = text.lines().find(|l| l.trim_start().starts_with("Food")).unwrap();
        let work = text.lines().find(|l| l.trim_start().starts_with("Work")).unwrap();
        let bars = |line: &str| line.chars().filter(|c| *c == '█').count();
        assert_eq!(bars(food), 2 * bars(work));
        assert!(text.contains("March 2024"));
    }

    #[test]
    fn table_shows_every_field() {
        let rendered = expense_table(
            &[record(7, (2024, 5, 6), Category::Other("Gifts".into()), 9.5)],
            &Config::default(),
        );
        let row = rendered.lines().nth(2).unwrap();
        assert!(row.contains("2024-05-06"));
        assert!(row.contains("₹9.50"));
        assert!(row.contains("Gifts"));
    }
}
