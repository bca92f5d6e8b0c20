#![doc(test(attr(deny(warnings))))]

//! Expense Core provides a persistent expense ledger with monthly reporting
//! and a linear spending forecast, plus the shell that drives them.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
