#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use expense_core::{
    config::ConfigManager,
    core::ledger_store::LedgerStore,
    domain::{Category, ExpenseDraft, PaymentMode},
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh data directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a store in `base`, as the shell would.
pub fn open_store(base: &Path) -> LedgerStore {
    let storage = JsonStorage::new(Some(base.to_path_buf())).expect("create json storage backend");
    LedgerStore::open(Box::new(storage)).expect("open ledger store")
}

/// Creates an isolated store and config manager backed by a unique directory.
pub fn setup_test_env() -> (LedgerStore, ConfigManager, PathBuf) {
    let base = temp_base();
    let store = open_store(&base);
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (store, config_manager, base)
}

pub fn draft(
    (year, month, day): (i32, u32, u32),
    category: Category,
    amount: f64,
) -> ExpenseDraft {
    ExpenseDraft::new(
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date"),
        "Corner Shop",
        "Groceries",
        amount,
        PaymentMode::Card,
        category,
    )
}
