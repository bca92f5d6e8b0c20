pub mod errors;
pub mod ledger_store;
pub mod services;
pub mod utils;
