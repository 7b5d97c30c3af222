/*!
# Sample Chains

A [`Chain`] holds the sampled values of an MCMC run as a
**parameter × step** table. Single-parameter files are stored as a
`1 × steps` table, so every chain has the same two-dimensional layout.

Parameter series are handed out as [`ArrayView1`] views with the burn-in
steps removed; nothing is copied.

```rust
use chain_plot::chain::Chain;
use ndarray::arr2;

let chain = Chain::new(arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]])).unwrap();
assert_eq!(chain.dim(), 2);
assert_eq!(chain.steps(), 3);

let series = chain.series(1, 1).unwrap();
assert_eq!(series.to_vec(), vec![5.0, 6.0]);
```
*/

use ndarray::{s, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{DiagnosticsError, LoadError, Result};

/// Sampled parameter values, one row per parameter and one column per step.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    values: Array2<f64>,
}

impl Chain {
    /// Wraps a `parameters × steps` table.
    ///
    /// Fails if the table has no parameters or no steps.
    pub fn new(values: Array2<f64>) -> Result<Self, LoadError> {
        let (dim, steps) = values.dim();
        if dim == 0 || steps == 0 {
            return Err(LoadError::NoSamples { dim, steps });
        }
        Ok(Self { values })
    }

    /// Builds a chain from parsed rows.
    ///
    /// All rows must have the same length. A single column of values is read
    /// as one parameter, the same way a single row is.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, LoadError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|row| row.len() != n_cols) {
            return Err(LoadError::Shape {
                expected: n_cols,
                found: bad.len(),
            });
        }

        let shape = if n_cols == 1 && n_rows > 1 {
            (1, n_rows)
        } else {
            (n_rows, n_cols)
        };
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        Self::new(Array2::from_shape_vec(shape, flat)?)
    }

    /// Number of parameters.
    pub fn dim(&self) -> usize {
        self.values.nrows()
    }

    /// Number of sampled steps per parameter.
    pub fn steps(&self) -> usize {
        self.values.ncols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// The chain with the first `burn_in` steps of every parameter dropped.
    pub fn retained(&self, burn_in: usize) -> Result<ArrayView2<'_, f64>> {
        if burn_in >= self.steps() {
            return Err(DiagnosticsError::BurnIn {
                burn_in,
                steps: self.steps(),
            });
        }
        Ok(self.values.slice(s![.., burn_in..]))
    }

    /// The retained samples of parameter `index`.
    pub fn series(&self, index: usize, burn_in: usize) -> Result<ArrayView1<'_, f64>> {
        if index >= self.dim() {
            return Err(DiagnosticsError::Parameter {
                index,
                dim: self.dim(),
            });
        }
        Ok(self.retained(burn_in)?.index_axis_move(Axis(0), index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_rows_give_parameters_by_steps() {
        let chain = Chain::from_rows(vec![vec![1.0, 2.0, 3.0, 4.0], vec![5.0, 6.0, 7.0, 8.0]])
            .expect("Expected two equal rows to form a chain");
        assert_eq!(chain.dim(), 2);
        assert_eq!(chain.steps(), 4);
        assert_eq!(chain.values(), arr2(&[[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]]));
    }

    #[test]
    fn test_single_row_is_one_parameter() {
        let chain = Chain::from_rows(vec![vec![0.5, 1.5, 2.5]]).unwrap();
        assert_eq!(chain.shape(), (1, 3));
    }

    #[test]
    fn test_single_column_is_one_parameter() {
        let chain = Chain::from_rows(vec![vec![0.5], vec![1.5], vec![2.5]]).unwrap();
        assert_eq!(chain.shape(), (1, 3));
        assert_eq!(chain.series(0, 0).unwrap().to_vec(), vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let result = Chain::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(
            matches!(
                result,
                Err(LoadError::Shape {
                    expected: 2,
                    found: 1
                })
            ),
            "Expected a shape error, got {:?}",
            result
        );
    }

    #[test]
    fn test_empty_table_is_rejected() {
        assert!(matches!(
            Chain::from_rows(Vec::new()),
            Err(LoadError::NoSamples { dim: 0, steps: 0 })
        ));
        assert!(matches!(
            Chain::from_rows(vec![Vec::new(), Vec::new()]),
            Err(LoadError::NoSamples { dim: 2, steps: 0 })
        ));
        let err = Chain::new(Array2::zeros((2, 0))).unwrap_err();
        assert!(matches!(err, LoadError::NoSamples { dim: 2, steps: 0 }));
        assert_eq!(
            err.to_string(),
            "chain of 2 parameters and 0 steps holds no samples"
        );
    }

    #[test]
    fn test_unknown_parameter_is_an_error() {
        let chain = Chain::new(arr2(&[[1.0, 2.0], [3.0, 4.0]])).unwrap();
        let err = chain.series(2, 0).unwrap_err();
        assert!(matches!(err, DiagnosticsError::Parameter { index: 2, dim: 2 }));
        assert_eq!(
            err.to_string(),
            "no parameter at index 2 in a chain of 2 parameters"
        );
    }

    #[test]
    fn test_burn_in_drops_leading_steps() {
        let chain = Chain::new(arr2(&[[1.0, 2.0, 3.0, 4.0], [5.0, 6.0, 7.0, 8.0]])).unwrap();
        let kept = chain.retained(3).unwrap();
        assert_eq!(kept, arr2(&[[4.0], [8.0]]));
        assert_eq!(chain.series(0, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_burn_in_must_leave_a_sample() {
        let chain = Chain::new(arr2(&[[1.0, 2.0]])).unwrap();
        let err = chain.retained(2).unwrap_err();
        assert!(matches!(
            err,
            DiagnosticsError::BurnIn {
                burn_in: 2,
                steps: 2
            }
        ));
        assert!(err.is_invalid_input());
    }
}
