use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn shell(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("expense_core_cli").unwrap();
    cmd.env("EXPENSE_CORE_CLI_SCRIPT", "1")
        .env("EXPENSE_CORE_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = TempDir::new().unwrap();
    let input = "add 2024-01-05 Grocer 'Weekly shop' 42.5 Cash Food\n\
                 add 2024-02-01 Cinema Tickets 18 Card Fun\n\
                 list\n\
                 summary\n\
                 exit\n";

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("[ok] Expense #1 added."))
        .stdout(contains("[ok] Expense #2 added."))
        .stdout(contains("Weekly shop"))
        .stdout(contains("Total for January 2024: ₹42.50"))
        .stdout(contains("Total Yearly Expense: ₹60.50"));

    let json = std::fs::read_to_string(home.path().join("expenses.json")).unwrap();
    assert!(json.contains("\"Grocer\""));
}

#[test]
fn script_mode_reports_errors_and_keeps_going() {
    let home = TempDir::new().unwrap();
    let input = "add 2024-01-05 '' Lunch 3 Cash Food\n\
                 show 9\n\
                 suggest\n\
                 lst\n\
                 version\n";

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Fields invalid: missing required field(s): payee"))
        .stdout(contains("No expense with id 9 exists."))
        .stdout(contains("Insufficient data: 0 expense(s) recorded"))
        .stdout(contains("Suggestion: `list`?"))
        .stdout(contains("Expense Core"));
}

#[test]
fn edits_and_removal_persist_between_sessions() {
    let home = TempDir::new().unwrap();
    shell(&home)
        .write_stdin("add 2024-03-01 Cafe Coffee 4 Cash Food\nselect 1\nedit 2024-03-02 Bakery Bread 6 Online Home\n")
        .assert()
        .success()
        .stdout(contains("Expense #1 updated."));

    shell(&home)
        .write_stdin("describe 1\nremove 1\nlist\n")
        .assert()
        .success()
        .stdout(contains(
            "You paid 6.00 to Bakery for Bread on 2024-03-02 via Online in the category of Home.",
        ))
        .stdout(contains("Expense #1 removed."))
        .stdout(contains("No expenses recorded yet."));
}

#[test]
fn suggestions_appear_with_enough_history() {
    let home = TempDir::new().unwrap();
    let mut input = String::new();
    for day in 1..=10 {
        input.push_str(&format!("add 2024-05-{:02} Shop Item 20 Card Work\n", day));
    }
    input.push_str("suggest\nconfig set currency_symbol $\nsuggest\n");

    shell(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("next month's predicted total expense is: ₹200.00"))
        .stdout(contains("highest spending category so far is 'Work'"))
        .stdout(contains("spending limit for the next month to $180.00"))
        .stdout(contains("[x]").not());
}
