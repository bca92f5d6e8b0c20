//! Core CLI dispatch, error reporting, and shell context helpers.

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::ConfigManager,
    core::{
        errors::LedgerError,
        ledger_store::LedgerStore,
        utils::PathResolver,
    },
    domain::ExpenseId,
    storage::JsonStorage,
};

pub use crate::core::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use crate::cli::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single shell command. Reported, never fatal.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Interaction failed: {0}")]
    Interaction(String),
    #[error("exit requested")]
    ExitRequested,
}

impl From<dialoguer::Error> for CommandError {
    fn from(err: dialoguer::Error) -> Self {
        CommandError::Interaction(err.to_string())
    }
}

impl ShellContext {
    /// Opens the ledger and preferences from the default data directory.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::base_dir();
        let storage = JsonStorage::new(Some(base.clone()))?;
        let store = LedgerStore::open(Box::new(storage))?;
        let config_manager = ConfigManager::with_base_dir(base)?;
        Self::with_parts(mode, store, config_manager)
    }

    pub fn with_parts(
        mode: CliMode,
        store: LedgerStore,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            plain_mode: mode == CliMode::Script || std::env::var_os("NO_COLOR").is_some(),
        });

        Ok(ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            store,
            config_manager,
            config,
            selected: None,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    /// Asks before a destructive action. Script mode always answers yes.
    pub(crate) fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, default)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).or(Ok(true))
    }

    /// Picks the explicit id argument, or falls back to the selection.
    pub(crate) fn target_id(&self, explicit: Option<&str>) -> Result<ExpenseId, CommandError> {
        match explicit {
            Some(raw) => parse_id(raw),
            None => self.selected.ok_or_else(|| {
                CommandError::InvalidArguments(
                    "No expense selected. Use `select <id>` or pass an id.".into(),
                )
            }),
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
            }
            CommandError::Core(LedgerError::InsufficientData { required, actual }) => {
                cli_io::print_info(format!(
                    "Insufficient data: {} expense(s) recorded. Add at least {} to get spending suggestions.",
                    actual, required
                ));
            }
            CommandError::Core(LedgerError::Validation(message)) => {
                cli_io::print_error(format!("Fields invalid: {}", message));
                cli_io::print_info("Fill every field before saving the expense.");
            }
            CommandError::Core(LedgerError::NotFound(id)) => {
                cli_io::print_error(format!("No expense with id {} exists.", id));
                cli_io::print_info("Use `list` to see the recorded expenses.");
            }
            other => cli_io::print_error(other.to_string()),
        }
        Ok(())
    }
}

/// Parses an expense id, accepting an optional leading `#`.
pub(crate) fn parse_id(raw: &str) -> Result<ExpenseId, CommandError> {
    raw.trim()
        .trim_start_matches('#')
        .parse::<ExpenseId>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not a valid expense id", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn script_context() -> (ShellContext, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).expect("storage");
        let store = LedgerStore::open(Box::new(storage)).expect("store");
        let config = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("config");
        let context = ShellContext::with_parts(CliMode::Script, store, config).expect("context");
        (context, temp)
    }

    #[test]
    fn parse_id_accepts_hash_prefix() {
        assert_eq!(parse_id("#12").unwrap(), 12);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(parse_id("seven").is_err());
    }

    #[test]
    fn add_select_edit_remove_flow() {
        let (mut context, _guard) = script_context();
        context
            .process_line("add 2024-01-05 Grocer 'Weekly shop' 42.5 Cash Food")
            .unwrap();
        assert_eq!(context.store.len(), 1);
        let id = context.store.read_all()[0].id;

        context.process_line(&format!("select {}", id)).unwrap();
        assert_eq!(context.selected, Some(id));
        assert_eq!(context.prompt(), format!("expense[#{}]> ", id));

        context
            .process_line("edit 2024-01-06 Market 'Fruit' 10 Card Home")
            .unwrap();
        let record = context.store.get(id).unwrap();
        assert_eq!(record.payee, "Market");
        assert_eq!(record.amount, 10.0);
        assert_eq!(context.selected, None, "saving an edit clears the selection");

        context.process_line(&format!("remove {}", id)).unwrap();
        assert!(context.store.is_empty());
    }

    #[test]
    fn invalid_add_reports_validation_and_keeps_store() {
        let (mut context, _guard) = script_context();
        let err = context
            .process_line("add 2024-01-05 '' Lunch 3 Cash Food")
            .unwrap_err();
        assert!(matches!(err, CommandError::Core(LedgerError::Validation(_))));
        assert!(context.store.is_empty());
    }

    #[test]
    fn commands_without_selection_ask_for_one() {
        let (mut context, _guard) = script_context();
        let err = context.process_line("show").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn unknown_command_is_not_an_error() {
        let (mut context, _guard) = script_context();
        let control = context.process_line("lsit").unwrap();
        assert_eq!(control, LoopControl::Continue);
    }

    #[test]
    fn exit_stops_the_loop() {
        let (mut context, _guard) = script_context();
        assert_eq!(context.process_line("exit").unwrap(), LoopControl::Exit);
    }

    #[test]
    fn suggest_reports_insufficient_data() {
        let (mut context, _guard) = script_context();
        let err = context.process_line("suggest").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Core(LedgerError::InsufficientData { actual: 0, .. })
        ));
        assert!(context.report_error(err).is_ok());
    }
}
