use crate::cli::core::{parse_id, CommandError, CommandResult, ShellContext};
use crate::cli::formatters;
use crate::cli::forms;
use crate::cli::io;
use crate::cli::output::{block as output_block, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::core::services::SummaryService;
use crate::domain::{Displayable, ExpenseId, ExpenseInput};

const FIELD_USAGE: &str = "<date> <payee> <description> <amount> <mode> <category>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "List every recorded expense", "list", cmd_list),
        CommandEntry::new(
            "add",
            "Record a new expense (prompts when no fields are given)",
            "add [<date> <payee> <description> <amount> <mode> <category>]",
            cmd_add,
        ),
        CommandEntry::new(
            "select",
            "Select an expense for show/edit/remove",
            "select <id>",
            cmd_select,
        ),
        CommandEntry::new("deselect", "Clear the current selection", "deselect", cmd_deselect),
        CommandEntry::new("show", "Show expense details", "show [id]", cmd_show),
        CommandEntry::new(
            "edit",
            "Replace every field of an expense",
            "edit [id] [<date> <payee> <description> <amount> <mode> <category>]",
            cmd_edit,
        ),
        CommandEntry::new("remove", "Delete an expense", "remove [id]", cmd_remove),
        CommandEntry::new(
            "clear-all",
            "Delete every expense",
            "clear-all",
            cmd_clear_all,
        ),
        CommandEntry::new(
            "describe",
            "Read an expense back as a sentence",
            "describe [id]",
            cmd_describe,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let records = context.store.read_all();
    if records.is_empty() {
        io::print_info("No expenses recorded yet. Use `add` to record one.");
        return Ok(());
    }
    output_section(format!("Expenses ({})", records.len()));
    output_block(formatters::expense_table(records, &context.config));
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = match args.len() {
        0 if context.can_prompt() => {
            let defaults = forms::new_expense_defaults(&context.config);
            forms::expense_form(&context.theme, &defaults)?
        }
        6 => input_from_args(args)?,
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: add {}",
                FIELD_USAGE
            )))
        }
    };

    let draft = input.parse()?;
    let id = context.store.create(draft)?;
    context.selected = None;
    io::print_success(format!("Expense #{} added.", id));
    Ok(())
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: select <id>".into()))?;
    let id = parse_id(raw)?;
    let label = context.store.get(id)?.display_label();
    context.selected = Some(id);
    io::print_success(format!("Selected {}.", label));
    Ok(())
}

fn cmd_deselect(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.selected.take().is_some() {
        io::print_info("Selection cleared.");
    } else {
        io::print_info("Nothing was selected.");
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = context.target_id(args.first().copied())?;
    let record = context.store.get(id)?;
    output_section(format!("Expense #{}", id));
    output_block(formatters::render_details(record, &context.config));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (id, input) = match args.len() {
        0 | 1 => {
            let id = context.target_id(args.first().copied())?;
            if !context.can_prompt() {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: edit [id] {}",
                    FIELD_USAGE
                )));
            }
            let current = ExpenseInput::from(&context.store.get(id)?.draft());
            (id, forms::expense_form(&context.theme, &current)?)
        }
        6 => (context.target_id(None)?, input_from_args(args)?),
        7 => (parse_id(args[0])?, input_from_args(&args[1..])?),
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: edit [id] {}",
                FIELD_USAGE
            )))
        }
    };

    let draft = input.parse()?;
    context.store.update(id, draft)?;
    context.selected = None;
    io::print_success(format!("Expense #{} updated.", id));
    Ok(())
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = context.target_id(args.first().copied())?;
    let label = context.store.get(id)?.display_label();
    if !context.confirm(&format!("Delete {}?", label), false)? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    context.store.delete(id)?;
    clear_selection_of(context, id);
    io::print_success(format!("Expense #{} removed.", id));
    Ok(())
}

fn cmd_clear_all(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let count = context.store.len();
    if count == 0 {
        io::print_info("No expenses to delete.");
        return Ok(());
    }

    io::print_warning(format!(
        "This permanently deletes all {} expense(s).",
        count
    ));
    if !context.confirm("Delete every expense?", false)? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    let removed = context.store.delete_all()?;
    context.selected = None;
    io::print_success(format!("Deleted {} expense(s).", removed));
    Ok(())
}

fn cmd_describe(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = context.target_id(args.first().copied())?;
    let record = context.store.get(id)?;
    output_block(SummaryService::describe(record));
    Ok(())
}

fn input_from_args(args: &[&str]) -> Result<ExpenseInput, CommandError> {
    let fields: [&str; 6] = args.try_into().map_err(|_| {
        CommandError::InvalidArguments(format!("expected six fields: {}", FIELD_USAGE))
    })?;
    Ok(ExpenseInput::from_fields(fields))
}

fn clear_selection_of(context: &mut ShellContext, id: ExpenseId) {
    if context.selected == Some(id) {
        context.selected = None;
    }
}
