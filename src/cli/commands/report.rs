use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::formatters;
use crate::cli::io;
use crate::cli::output::block as output_block;
use crate::cli::registry::CommandEntry;
use crate::core::services::{ForecastService, SummaryService};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Monthly totals per category and the overall total",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "chart",
            "Bar chart of monthly spending per category",
            "chart",
            cmd_chart,
        ),
        CommandEntry::new(
            "suggest",
            "Forecast next month's spending and suggest a cap",
            "suggest",
            cmd_suggest,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let records = context.store.read_all();
    if records.is_empty() {
        io::print_info("No expenses recorded yet.");
        return Ok(());
    }
    let summary = SummaryService::summarize(records);
    output_block(formatters::render_summary(&summary, &context.config));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let chart = SummaryService::chart_series(context.store.read_all());
    if chart.is_empty() {
        io::print_info("No expenses recorded yet.");
        return Ok(());
    }
    let width = formatters::chart_width(&context.config);
    output_block(formatters::render_chart(&chart, &context.config, width));
    Ok(())
}

fn cmd_suggest(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let forecast = ForecastService::forecast(context.store.read_all())?;
    output_block(formatters::render_forecast(&forecast, &context.config));
    Ok(())
}
