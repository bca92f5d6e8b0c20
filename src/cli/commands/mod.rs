pub mod config;
pub mod expense;
pub mod report;
pub mod system;

use crate::cli::registry::CommandRegistry;

/// Registers every shell command in help order.
pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions()
        .into_iter()
        .chain(expense::definitions())
        .chain(report::definitions())
        .chain(config::definitions())
    {
        registry.register(entry);
    }
}
