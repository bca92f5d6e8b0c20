pub mod json_backend;

use serde::{Deserialize, Serialize};

use crate::{
    core::errors::Result,
    domain::{ExpenseId, ExpenseRecord},
};

/// Layout version written into every persisted table.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// The persisted expense table: every row plus the id sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTable {
    pub schema_version: u32,
    /// Next id to hand out. Never decreases, even after rows are deleted.
    pub next_id: ExpenseId,
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

impl Default for ExpenseTable {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            next_id: 1,
            expenses: Vec::new(),
        }
    }
}

impl ExpenseTable {
    pub(crate) fn allocate_id(&mut self) -> ExpenseId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|record| record.id == id)
    }
}

/// Abstraction over persistence backends capable of storing the expense table.
pub trait StorageBackend: Send + Sync {
    /// Loads the persisted table, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<ExpenseTable>>;

    /// Persists the whole table. Must not return before the data is flushed.
    fn save(&self, table: &ExpenseTable) -> Result<()>;

    /// Human readable location, used in logs.
    fn describe(&self) -> String;
}

pub use json_backend::{load_table_from_path, save_table_to_path, JsonStorage};
