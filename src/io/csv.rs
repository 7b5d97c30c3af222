/*!
# Reading and Writing Chain Files

Chain files are plain comma-separated text with **one row per parameter** and
one column per step, the layout a sampler's `save_chain()` produces. Fields
may be padded with whitespace; blank lines and lines starting with `#` are
skipped.

A file holding a single parameter may be written either as one row or as one
column; both load as a `1 × steps` [`Chain`].
*/

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use tracing::debug;

use crate::chain::Chain;
use crate::error::LoadError;

/**
Loads a chain file.

# Errors

- [`LoadError::FileNotFound`] if `path` does not exist.
- [`LoadError::Parse`] if a field is not a finite number or a row's length
  differs from the first row's.
- [`LoadError::Empty`] if the file holds no data rows.

# Examples

```rust
use chain_plot::io::csv::load_csv;
use std::io::Write;

let mut file = tempfile::NamedTempFile::new()?;
writeln!(file, "0.1, 0.2, 0.3")?;
writeln!(file, "1.1, 1.2, 1.3")?;

let chain = load_csv(file.path())?;
assert_eq!((chain.dim(), chain.steps()), (2, 3));
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Chain, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(file);

    let parse_error = |line: u64, reason: String| LoadError::Parse {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, |p| p.line());
            parse_error(line, e.to_string())
        })?;
        let line = record.position().map_or(0, |p| p.line());
        if is_blank(&record) {
            continue;
        }

        let row = parse_record(&record).map_err(|reason| parse_error(line, reason))?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(parse_error(
                    line,
                    format!("expected {} fields, found {}", first.len(), row.len()),
                ));
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let chain = Chain::from_rows(rows)?;
    debug!(
        path = %path.display(),
        dim = chain.dim(),
        steps = chain.steps(),
        "loaded chain"
    );
    Ok(chain)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn parse_record(record: &StringRecord) -> Result<Vec<f64>, String> {
    record
        .iter()
        .map(|field| {
            let value: f64 = field
                .parse()
                .map_err(|_| format!("'{field}' is not a number"))?;
            if value.is_finite() {
                Ok(value)
            } else {
                Err(format!("'{field}' is not a finite number"))
            }
        })
        .collect()
}

/**
Saves a chain as a CSV file with one row per parameter.

No header is written, so the output loads back with [`load_csv`].

# Examples

```rust
use chain_plot::chain::Chain;
use chain_plot::io::csv::{load_csv, save_csv};
use ndarray::arr2;

let chain = Chain::new(arr2(&[[1.0, 2.0], [3.0, 4.0]]))?;
let file = tempfile::NamedTempFile::new()?;
save_csv(&chain, file.path())?;
assert_eq!(load_csv(file.path())?, chain);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn save_csv<P: AsRef<Path>>(chain: &Chain, path: P) -> Result<(), LoadError> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = Writer::from_writer(File::create(path).map_err(io_error)?);
    for row in chain.values().rows() {
        wtr.write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| io_error(e.into()))?;
    }
    wtr.flush().map_err(io_error)?;
    Ok(())
}
