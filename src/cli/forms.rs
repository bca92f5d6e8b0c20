//! Prompt form used by `add` and `edit` in interactive mode.

use chrono::Local;
use dialoguer::theme::ColorfulTheme;

use crate::cli::core::CommandError;
use crate::cli::io;
use crate::config::Config;
use crate::domain::{Category, ExpenseInput, Labelled, PaymentMode, DATE_FORMAT};

const OTHER_CHOICE: &str = "Other…";

/// Starting values for a new expense: today, zero, configured defaults.
pub fn new_expense_defaults(config: &Config) -> ExpenseInput {
    ExpenseInput {
        date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
        payee: String::new(),
        description: String::new(),
        amount: "0.0".into(),
        mode_of_payment: config.default_payment_mode.label().to_string(),
        category: config.default_category.label().to_string(),
    }
}

/// Walks the user through every field, starting from `initial`.
///
/// The result is unparsed; callers hand it to [`ExpenseInput::parse`].
pub fn expense_form(
    theme: &ColorfulTheme,
    initial: &ExpenseInput,
) -> Result<ExpenseInput, CommandError> {
    let date = io::prompt_text(theme, "Date (YYYY-MM-DD)", &initial.date)?;
    let payee = io::prompt_text(theme, "Payee", &initial.payee)?;
    let description = io::prompt_text(theme, "Description", &initial.description)?;
    let amount = io::prompt_text(theme, "Amount", &initial.amount)?;

    let modes: Vec<String> = PaymentMode::KNOWN
        .iter()
        .map(|mode| mode.label().to_string())
        .collect();
    let mode_of_payment = choose(theme, "Mode of payment", &modes, &initial.mode_of_payment)?;

    let categories: Vec<String> = Category::CHART_AXIS
        .iter()
        .map(|category| category.label().to_string())
        .collect();
    let category = choose(theme, "Category", &categories, &initial.category)?;

    Ok(ExpenseInput {
        date,
        payee,
        description,
        amount,
        mode_of_payment,
        category,
    })
}

/// Offers `known` plus a free-text choice; `current` picks the default row.
fn choose(
    theme: &ColorfulTheme,
    prompt: &str,
    known: &[String],
    current: &str,
) -> Result<String, CommandError> {
    let mut items = known.to_vec();
    items.push(OTHER_CHOICE.to_string());

    let default = choice_index(known, current);
    let picked = io::select_label(theme, prompt, &items, default)?;
    if picked < known.len() {
        return Ok(known[picked].clone());
    }

    let initial = if default == known.len() { current } else { "" };
    io::prompt_text(theme, prompt, initial)
}

fn choice_index(known: &[String], current: &str) -> usize {
    known
        .iter()
        .position(|label| label.eq_ignore_ascii_case(current.trim()))
        .unwrap_or(known.len())
}
