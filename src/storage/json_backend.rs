use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::{
    errors::LedgerError,
    utils::{ensure_dir, PathResolver},
};

use super::{ExpenseTable, StorageBackend, CURRENT_SCHEMA_VERSION};
use crate::core::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Stores the expense table as a single pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    /// Opens storage inside `root`, or the default data directory when `None`.
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::ledger_file_in(&base),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<ExpenseTable>> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_table_from_path(&self.path).map(Some)
    }

    fn save(&self, table: &ExpenseTable) -> Result<()> {
        save_table_to_path(table, &self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Writes `table` next to `path` and renames it into place.
pub fn save_table_to_path(table: &ExpenseTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(table)?;
    let tmp = tmp_path(path);
    write_synced(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), rows = table.expenses.len(), "expense table saved");
    Ok(())
}

pub fn load_table_from_path(path: &Path) -> Result<ExpenseTable> {
    let data = fs::read_to_string(path)?;
    let table: ExpenseTable = serde_json::from_str(&data)?;
    if table.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::Storage(format!(
            "`{}` uses schema v{}, newer than supported v{}",
            path.display(),
            table.schema_version,
            CURRENT_SCHEMA_VERSION
        )));
    }
    tracing::debug!(path = %path.display(), rows = table.expenses.len(), "expense table loaded");
    Ok(table)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_synced(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
