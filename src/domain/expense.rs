//! Domain types representing expense ledger entries.

use std::{cmp::Ordering, fmt};

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::errors::{LedgerError, Result};
use crate::domain::common::{normalize_label, Displayable, Labelled};

/// Store-assigned identifier of an expense row.
pub type ExpenseId = u64;

/// Date format used for storage, parsing, and display.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Spending category attached to every expense.
///
/// Known labels parse case-insensitively; any other non-empty label is kept
/// verbatim as [`Category::Other`]. Categories order by label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Fun,
    Work,
    Misc,
    Home,
    Other(String),
}

impl Category {
    /// Fixed category axis used by chart series, in display order.
    pub const CHART_AXIS: [Category; 5] = [
        Category::Food,
        Category::Fun,
        Category::Work,
        Category::Misc,
        Category::Home,
    ];

    /// Parses a user supplied label, rejecting blank input.
    pub fn parse_label(raw: &str) -> Result<Self> {
        normalize_label(raw)
            .map(|label| Category::from(label.to_string()))
            .ok_or_else(|| LedgerError::Validation("category must not be empty".into()))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Other(_))
    }

    pub fn is_chart_category(&self) -> bool {
        !self.is_custom()
    }
}

impl Labelled for Category {
    fn label(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Fun => "Fun",
            Category::Work => "Work",
            Category::Misc => "Misc",
            Category::Home => "Home",
            Category::Other(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "food" => Category::Food,
            "fun" => Category::Fun,
            "work" => Category::Work,
            "misc" => Category::Misc,
            "home" => Category::Home,
            _ => Category::Other(value.trim().to_string()),
        }
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label()
            .cmp(other.label())
            .then_with(|| self.is_custom().cmp(&other.is_custom()))
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How an expense was paid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PaymentMode {
    Cash,
    Card,
    Online,
    Other(String),
}

impl PaymentMode {
    pub const KNOWN: [PaymentMode; 3] = [PaymentMode::Cash, PaymentMode::Card, PaymentMode::Online];

    /// Parses a user supplied label, rejecting blank input.
    pub fn parse_label(raw: &str) -> Result<Self> {
        normalize_label(raw)
            .map(|label| PaymentMode::from(label.to_string()))
            .ok_or_else(|| LedgerError::Validation("mode of payment must not be empty".into()))
    }
}

impl Labelled for PaymentMode {
    fn label(&self) -> &str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
            PaymentMode::Online => "Online",
            PaymentMode::Other(label) => label,
        }
    }
}

impl From<String> for PaymentMode {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cash" => PaymentMode::Cash,
            "card" => PaymentMode::Card,
            "online" => PaymentMode::Online,
            _ => PaymentMode::Other(value.trim().to_string()),
        }
    }
}

impl From<PaymentMode> for String {
    fn from(value: PaymentMode) -> Self {
        match value {
            PaymentMode::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar month used to group expenses for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Long form such as `January 2024`.
    pub fn long_label(&self) -> String {
        let name = u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map(|month| month.name())
            .unwrap_or("Unknown");
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Field values of an expense without its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub date: NaiveDate,
    pub payee: String,
    pub description: String,
    pub amount: f64,
    pub mode_of_payment: PaymentMode,
    pub category: Category,
}

impl ExpenseDraft {
    pub fn new(
        date: NaiveDate,
        payee: impl Into<String>,
        description: impl Into<String>,
        amount: f64,
        mode_of_payment: PaymentMode,
        category: Category,
    ) -> Self {
        Self {
            date,
            payee: payee.into(),
            description: description.into(),
            amount,
            mode_of_payment,
            category,
        }
    }

    /// Checks that every required field carries a value.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.payee.trim().is_empty() {
            missing.push("payee");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.mode_of_payment.label().trim().is_empty() {
            missing.push("mode_of_payment");
        }
        if self.category.label().trim().is_empty() {
            missing.push("category");
        }
        if !missing.is_empty() {
            return Err(LedgerError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }
        if !self.amount.is_finite() {
            return Err(LedgerError::Validation(format!(
                "amount must be a finite number, got {}",
                self.amount
            )));
        }
        Ok(())
    }

    pub(crate) fn into_record(self, id: ExpenseId) -> ExpenseRecord {
        ExpenseRecord {
            id,
            date: self.date,
            payee: self.payee,
            description: self.description,
            amount: self.amount,
            mode_of_payment: self.mode_of_payment,
            category: self.category,
        }
    }
}

/// One persisted ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub payee: String,
    pub description: String,
    pub amount: f64,
    pub mode_of_payment: PaymentMode,
    pub category: Category,
}

impl ExpenseRecord {
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    /// Copies every field except the id, e.g. to prefill an edit form.
    pub fn draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            date: self.date,
            payee: self.payee.clone(),
            description: self.description.clone(),
            amount: self.amount,
            mode_of_payment: self.mode_of_payment.clone(),
            category: self.category.clone(),
        }
    }

    pub(crate) fn apply(&mut self, draft: ExpenseDraft) {
        self.date = draft.date;
        self.payee = draft.payee;
        self.description = draft.description;
        self.amount = draft.amount;
        self.mode_of_payment = draft.mode_of_payment;
        self.category = draft.category;
    }
}

impl Displayable for ExpenseRecord {
    fn display_label(&self) -> String {
        format!(
            "#{} {} {} ({})",
            self.id,
            self.date.format(DATE_FORMAT),
            self.payee,
            self.category
        )
    }
}

/// Raw form values as typed by a user, before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseInput {
    pub date: String,
    pub payee: String,
    pub description: String,
    pub amount: String,
    pub mode_of_payment: String,
    pub category: String,
}

impl ExpenseInput {
    /// Builds the input from positional values in column order.
    pub fn from_fields(fields: [&str; 6]) -> Self {
        let [date, payee, description, amount, mode_of_payment, category] = fields;
        Self {
            date: date.to_string(),
            payee: payee.to_string(),
            description: description.to_string(),
            amount: amount.to_string(),
            mode_of_payment: mode_of_payment.to_string(),
            category: category.to_string(),
        }
    }

    /// Parses every field, reporting all blank fields at once.
    pub fn parse(&self) -> Result<ExpenseDraft> {
        let fields = [
            ("date", &self.date),
            ("payee", &self.payee),
            ("description", &self.description),
            ("amount", &self.amount),
            ("mode_of_payment", &self.mode_of_payment),
            ("category", &self.category),
        ];
        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(LedgerError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            LedgerError::Validation(format!(
                "invalid date `{}`, expected YYYY-MM-DD",
                self.date.trim()
            ))
        })?;
        let amount: f64 = self.amount.trim().parse().map_err(|_| {
            LedgerError::Validation(format!("invalid amount `{}`", self.amount.trim()))
        })?;

        let draft = ExpenseDraft::new(
            date,
            self.payee.trim(),
            self.description.trim(),
            amount,
            PaymentMode::parse_label(&self.mode_of_payment)?,
            Category::parse_label(&self.category)?,
        );
        draft.validate()?;
        Ok(draft)
    }
}

impl From<&ExpenseDraft> for ExpenseInput {
    fn from(draft: &ExpenseDraft) -> Self {
        Self {
            date: draft.date.format(DATE_FORMAT).to_string(),
            payee: draft.payee.clone(),
            description: draft.description.clone(),
            amount: draft.amount.to_string(),
            mode_of_payment: draft.mode_of_payment.label().to_string(),
            category: draft.category.label().to_string(),
        }
    }
}
