//! Error types for loading chain files and building diagnostics.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a chain file into a [`Chain`](crate::chain::Chain).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("could not read file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read file {}, line {line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("file {} contains no samples", .0.display())]
    Empty(PathBuf),

    #[error("rows have inconsistent lengths: expected {expected}, found {found}")]
    Shape { expected: usize, found: usize },

    #[error("chain of {dim} parameters and {steps} steps holds no samples")]
    NoSamples { dim: usize, steps: usize },

    #[error("invalid table layout: {0}")]
    Layout(#[from] ndarray::ShapeError),
}

/// The user-facing failures of a diagnostics run.
#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("no filename given")]
    MissingArgument,

    #[error(transparent)]
    InvalidInput(#[from] LoadError),

    #[error("burn-in of {burn_in} steps leaves no samples out of {steps}")]
    BurnIn { burn_in: usize, steps: usize },

    #[error("histogram needs at least one bin")]
    NoBins,

    #[error("series contains no finite samples")]
    EmptySeries,

    #[error("no parameter at index {index} in a chain of {dim} parameters")]
    Parameter { index: usize, dim: usize },

    #[error("subplot cell {cell} is outside a {rows}x{cols} grid")]
    Cell { cell: usize, rows: usize, cols: usize },

    #[error("could not open figure window: {0}")]
    Display(String),
}

impl DiagnosticsError {
    /// Whether the error belongs to the `InvalidInput` kind: the input file or
    /// the options applied to it cannot be turned into figures.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DiagnosticsError::InvalidInput(_)
                | DiagnosticsError::BurnIn { .. }
                | DiagnosticsError::NoBins
                | DiagnosticsError::EmptySeries
        )
    }
}

pub type Result<T, E = DiagnosticsError> = std::result::Result<T, E>;
