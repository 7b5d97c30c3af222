//! Command-line interface of the `chain-plot` binary.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::warn;

use crate::diagnostics::ChainDiagnostics;
use crate::display::present;
use crate::error::{DiagnosticsError, LoadError, Result};
use crate::render::{RenderOptions, DEFAULT_BINS};
use crate::stats::summary_table;

#[derive(Parser, Debug, Clone)]
#[command(name = "chain-plot", version)]
#[command(about = "Trace plots, histograms and pairwise scatter plots of an MCMC chain")]
pub struct Args {
    /// Chain file: comma-separated values, one row per parameter
    #[arg(value_name = "FILENAME")]
    pub filename: Option<PathBuf>,

    /// Extra arguments; reported and ignored
    #[arg(value_name = "IGNORED", trailing_var_arg = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,

    /// Number of leading steps to discard from every parameter
    #[arg(long, default_value_t = 0)]
    pub burn_in: usize,

    /// Number of histogram bins
    #[arg(long, default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Show mode, mean and standard deviation in histogram titles and print them
    #[arg(long)]
    pub summary: bool,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,
}

impl Args {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            burn_in: self.burn_in,
            bins: self.bins,
            show_summary: self.summary,
        }
    }

    pub fn filename(&self) -> Result<&Path> {
        self.filename
            .as_deref()
            .ok_or(DiagnosticsError::MissingArgument)
    }

    /// The warning printed for surplus positional arguments, if there are any.
    pub fn ignored_warning(&self) -> Option<String> {
        if self.ignored.is_empty() {
            return None;
        }
        Some(format!(
            "Warning: too many filenames.\nThe following were ignored:  {}",
            self.ignored.join(" ")
        ))
    }
}

/// Loads the chain named on the command line and builds its figures.
pub fn prepare(args: &Args) -> Result<ChainDiagnostics> {
    if let Some(message) = args.ignored_warning() {
        warn!(ignored = ?args.ignored, "extra arguments ignored");
        eprintln!("{message}");
    }
    let filename = args.filename()?;
    ChainDiagnostics::from_file(filename, args.options())
}

/// Runs the full command: prepare, print the summary table if asked, then show
/// the figures until the viewer is closed.
pub fn run(args: &Args) -> Result<()> {
    let diagnostics = prepare(args)?;
    if args.summary {
        print!("{}", summary_table(&diagnostics.summaries));
    }

    let title = match &args.filename {
        Some(path) => format!("chain-plot: {}", path.display()),
        None => "chain-plot".to_string(),
    };
    present(diagnostics.figures, &title)
}

/// Console message for a failed run.
pub fn error_message(err: &DiagnosticsError, program: &str) -> String {
    match err {
        DiagnosticsError::MissingArgument => {
            format!("Error: no filename given.\nUsage:   {program} <filename>")
        }
        DiagnosticsError::InvalidInput(LoadError::FileNotFound(path)) => {
            format!("Error: file not found: {}", path.display())
        }
        DiagnosticsError::InvalidInput(LoadError::Parse { path, .. })
        | DiagnosticsError::InvalidInput(LoadError::Io { path, .. })
        | DiagnosticsError::InvalidInput(LoadError::Empty(path)) => {
            format!("Error: could not read file {}.\n{err}", path.display())
        }
        other => format!("Error: {other}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("Expected arguments to parse")
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["chain-plot", "chain.csv"]);
        assert_eq!(args.filename.as_deref(), Some(Path::new("chain.csv")));
        assert_eq!(args.options(), RenderOptions::default());
        assert_eq!(args.log_level, tracing::Level::WARN);
        assert!(args.ignored_warning().is_none());
    }

    #[test]
    fn test_options_from_flags() {
        let args = parse(&[
            "chain-plot",
            "--burn-in",
            "400",
            "--bins",
            "20",
            "--summary",
            "chain.csv",
        ]);
        assert_eq!(
            args.options(),
            RenderOptions {
                burn_in: 400,
                bins: 20,
                show_summary: true
            }
        );
    }

    #[test]
    fn test_missing_filename() {
        let args = parse(&["chain-plot"]);
        let err = prepare(&args).unwrap_err();
        assert!(matches!(err, DiagnosticsError::MissingArgument));
        assert_eq!(
            error_message(&err, "chain-plot"),
            "Error: no filename given.\nUsage:   chain-plot <filename>"
        );
    }

    #[test]
    fn test_extra_arguments_are_listed() {
        let args = parse(&["chain-plot", "a.csv", "b.csv", "c.csv"]);
        assert_eq!(args.filename.as_deref(), Some(Path::new("a.csv")));
        assert_eq!(
            args.ignored_warning().unwrap(),
            "Warning: too many filenames.\nThe following were ignored:  b.csv c.csv"
        );
    }

    #[test]
    fn test_extra_arguments_may_look_like_flags() {
        let args = parse(&["chain-plot", "a.csv", "-x", "--extra"]);
        assert_eq!(args.filename.as_deref(), Some(Path::new("a.csv")));
        assert_eq!(args.ignored, vec!["-x", "--extra"]);
        assert_eq!(
            args.ignored_warning().unwrap(),
            "Warning: too many filenames.\nThe following were ignored:  -x --extra"
        );

        let args = parse(&["chain-plot", "a.csv", "-1"]);
        assert_eq!(args.ignored, vec!["-1"]);
        assert_eq!(args.options(), RenderOptions::default());
    }

    #[test]
    fn test_error_messages() {
        let missing = DiagnosticsError::InvalidInput(LoadError::FileNotFound("x.csv".into()));
        assert_eq!(error_message(&missing, "p"), "Error: file not found: x.csv");

        let parse_err = DiagnosticsError::InvalidInput(LoadError::Parse {
            path: "x.csv".into(),
            line: 3,
            reason: "'a' is not a number".to_string(),
        });
        let message = error_message(&parse_err, "p");
        assert!(message.starts_with("Error: could not read file x.csv.\n"));
        assert!(message.contains("line 3"));

        let burn_in = DiagnosticsError::BurnIn {
            burn_in: 10,
            steps: 5,
        };
        assert_eq!(
            error_message(&burn_in, "p"),
            "Error: burn-in of 10 steps leaves no samples out of 5."
        );
    }
}
