//! Reading and writing chain files.

pub mod csv;

pub use self::csv::{load_csv, save_csv};
