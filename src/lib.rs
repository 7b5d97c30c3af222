pub mod chain;
pub mod cli;
pub mod diagnostics;
pub mod display;
pub mod error;
pub mod figure;
pub mod io;
pub mod render;
pub mod stats;
