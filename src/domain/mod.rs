pub mod common;
pub mod expense;

pub use common::{Displayable, Labelled};
pub use expense::{
    Category, ExpenseDraft, ExpenseId, ExpenseInput, ExpenseRecord, MonthKey, PaymentMode,
    DATE_FORMAT,
};
