//! Owns the expense table and commits every mutation through the storage backend.

use crate::core::errors::{LedgerError, Result};
use crate::domain::{ExpenseDraft, ExpenseId, ExpenseRecord};
use crate::storage::{ExpenseTable, StorageBackend};

/// Facade over the persisted expense table.
///
/// Each mutation is applied to a copy of the table, persisted, and only then
/// swapped in, so a failed save leaves both memory and disk untouched.
pub struct LedgerStore {
    table: ExpenseTable,
    storage: Box<dyn StorageBackend>,
}

impl LedgerStore {
    /// Loads the table from `storage`, creating an empty one when absent.
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self> {
        let table = match storage.load()? {
            Some(table) => table,
            None => {
                let table = ExpenseTable::default();
                storage.save(&table)?;
                tracing::info!(location = %storage.describe(), "created empty expense table");
                table
            }
        };
        tracing::info!(
            location = %storage.describe(),
            rows = table.expenses.len(),
            "expense ledger opened"
        );
        Ok(Self { table, storage })
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    /// Validates and persists a new expense, returning its fresh id.
    pub fn create(&mut self, draft: ExpenseDraft) -> Result<ExpenseId> {
        draft.validate()?;
        let id = self.commit(|table| {
            let id = table.allocate_id();
            table.expenses.push(draft.into_record(id));
            Ok(id)
        })?;
        tracing::info!(id, "expense created");
        Ok(id)
    }

    /// Every expense in insertion order.
    pub fn read_all(&self) -> &[ExpenseRecord] {
        &self.table.expenses
    }

    pub fn get(&self, id: ExpenseId) -> Result<&ExpenseRecord> {
        self.table
            .position(id)
            .map(|idx| &self.table.expenses[idx])
            .ok_or(LedgerError::NotFound(id))
    }

    /// Replaces every field of expense `id` except the id itself.
    pub fn update(&mut self, id: ExpenseId, draft: ExpenseDraft) -> Result<()> {
        draft.validate()?;
        self.commit(|table| {
            let idx = table.position(id).ok_or(LedgerError::NotFound(id))?;
            table.expenses[idx].apply(draft);
            Ok(())
        })?;
        tracing::info!(id, "expense updated");
        Ok(())
    }

    /// Permanently removes expense `id`, returning the removed row.
    pub fn delete(&mut self, id: ExpenseId) -> Result<ExpenseRecord> {
        let removed = self.commit(|table| {
            let idx = table.position(id).ok_or(LedgerError::NotFound(id))?;
            Ok(table.expenses.remove(idx))
        })?;
        tracing::info!(id, "expense deleted");
        Ok(removed)
    }

    /// Clears the table, returning how many rows were removed.
    pub fn delete_all(&mut self) -> Result<usize> {
        let removed = self.commit(|table| {
            let count = table.expenses.len();
            table.expenses.clear();
            Ok(count)
        })?;
        tracing::warn!(removed, "all expenses deleted");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.table.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.expenses.is_empty()
    }

    fn commit<T, F>(&mut self, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut ExpenseTable) -> Result<T>,
    {
        let mut snapshot = self.table.clone();
        let value = mutate(&mut snapshot)?;
        if let Err(err) = self.storage.save(&snapshot) {
            tracing::error!(error = %err, "failed to persist expense table");
            return Err(err);
        }
        self.table = snapshot;
        Ok(value)
    }
}
