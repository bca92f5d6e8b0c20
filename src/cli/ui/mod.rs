pub mod table;

pub use table::{Alignment, Table, TableColumn};
