use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::ledger_store::LedgerStore,
    domain::ExpenseId,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler may touch.
///
/// The shell owns the store for its whole lifetime, together with the
/// current selection.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub store: LedgerStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub selected: Option<ExpenseId>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn prompt(&self) -> String {
        match self.selected {
            Some(id) => format!("expense[#{}]> ", id),
            None => "expense> ".to_string(),
        }
    }

    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, selected: {:?}, rows: {} }}",
            self.running,
            self.last_command,
            self.selected,
            self.store.len()
        )
    }
}
