use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::config::{Config, CONFIG_KEYS};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shell preferences",
        "config [show|set <key> <value>|reset]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            }
            let key = args[1].to_lowercase();
            let value = args[2..].join(" ");
            let mut updated = context.config.clone();
            updated.set_value(&key, &value)?;
            context.config_manager.save(&updated)?;
            context.config = updated;
            io::print_success(format!("Set {} = {}.", key, value.trim()));
            Ok(())
        }
        "reset" => {
            if !context.confirm("Reset every preference to its default?", false)? {
                io::print_info("Operation cancelled.");
                return Ok(());
            }
            context.config = Config::default();
            context.persist_config()?;
            io::print_success("Preferences reset to defaults.");
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}`; expected show, set or reset",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<22}: {}", key, value));
    }
    io::print_info(format!(
        "  {:<22}: {}",
        "file",
        context.config_manager.path().display()
    ));
    Ok(())
}
