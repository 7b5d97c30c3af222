/*!
# Figure Registry

Backend-independent description of the figures a diagnostics run produces.

Figures are kept in a [`FigureRegistry`] keyed by an integer figure id, and
each [`Figure`] is a grid of subplot cells addressed by a **1-based, row-major
cell index**: in a 2 × 3 grid, cell 1 is the top-left corner, cell 3 the
top-right and cell 4 the first cell of the second row. Cells that nothing was
drawn into stay empty.

```rust
use chain_plot::figure::{FigureRegistry, Trace, BLACK};

let mut figures = FigureRegistry::new();
let figure = figures.figure_mut(0, 2, 1);
figure
    .subplot_mut(2)
    .unwrap()
    .push(Trace::Line { x: vec![0.0, 1.0], y: vec![3.0, 4.0], color: BLACK });

assert_eq!(figures.get(0).unwrap().occupied_cells(), vec![2]);
```
*/

use std::collections::BTreeMap;

use crate::error::{DiagnosticsError, Result};

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const RED: Rgb = Rgb(214, 39, 40);

/// One drawable item inside a subplot.
#[derive(Debug, Clone, PartialEq)]
pub enum Trace {
    /// A polyline through `(x[k], y[k])`.
    Line { x: Vec<f64>, y: Vec<f64>, color: Rgb },
    /// Histogram bars; `edges` has one more entry than `counts`.
    Bars {
        edges: Vec<f64>,
        counts: Vec<usize>,
        color: Rgb,
    },
    /// Unconnected markers. `size` is the marker area in points².
    Scatter {
        x: Vec<f64>,
        y: Vec<f64>,
        size: f64,
        color: Rgb,
    },
    /// A vertical marker line at `x`.
    VLine { x: f64, color: Rgb },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subplot {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub traces: Vec<Trace>,
}

impl Subplot {
    pub fn push(&mut self, trace: Trace) -> &mut Self {
        self.traces.push(trace);
        self
    }

    pub fn set_labels(&mut self, x_label: impl Into<String>, y_label: impl Into<String>) {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
    }
}

/// A titled grid of subplots.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    rows: usize,
    cols: usize,
    subplots: BTreeMap<usize, Subplot>,
}

impl Figure {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            title: None,
            rows,
            cols,
            subplots: BTreeMap::new(),
        }
    }

    /// Grid shape as `(rows, cols)`.
    pub fn grid(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The subplot in `cell`, created empty on first access.
    ///
    /// Fails if `cell` is not in `1..=rows * cols`.
    pub fn subplot_mut(&mut self, cell: usize) -> Result<&mut Subplot> {
        if cell == 0 || cell > self.rows * self.cols {
            return Err(DiagnosticsError::Cell {
                cell,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.subplots.entry(cell).or_default())
    }

    pub fn subplot(&self, cell: usize) -> Option<&Subplot> {
        self.subplots.get(&cell)
    }

    /// Cells holding a subplot, ascending.
    pub fn occupied_cells(&self) -> Vec<usize> {
        self.subplots.keys().copied().collect()
    }

    /// Row and column (both 0-based) of a 1-based cell index.
    pub fn position(&self, cell: usize) -> (usize, usize) {
        ((cell - 1) / self.cols, (cell - 1) % self.cols)
    }

    pub fn subplots(&self) -> impl Iterator<Item = (usize, &Subplot)> {
        self.subplots.iter().map(|(&cell, subplot)| (cell, subplot))
    }
}

/// Figures of one run, keyed by figure id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FigureRegistry {
    figures: BTreeMap<usize, Figure>,
}

impl FigureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The figure with `id`, created with a `rows × cols` grid if absent.
    ///
    /// The grid of an existing figure is left unchanged.
    pub fn figure_mut(&mut self, id: usize, rows: usize, cols: usize) -> &mut Figure {
        self.figures
            .entry(id)
            .or_insert_with(|| Figure::new(rows, cols))
    }

    pub fn get(&self, id: usize) -> Option<&Figure> {
        self.figures.get(&id)
    }

    /// Figures in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Figure)> {
        self.figures.iter().map(|(&id, figure)| (id, figure))
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_are_row_major_and_one_based() {
        let figure = Figure::new(2, 3);
        assert_eq!(figure.position(1), (0, 0));
        assert_eq!(figure.position(3), (0, 2));
        assert_eq!(figure.position(4), (1, 0));
        assert_eq!(figure.position(6), (1, 2));
    }

    #[test]
    fn test_subplot_outside_grid_is_an_error() {
        let mut figure = Figure::new(2, 2);
        assert!(figure.subplot_mut(4).is_ok());
        assert!(matches!(
            figure.subplot_mut(0),
            Err(DiagnosticsError::Cell { cell: 0, .. })
        ));
        assert!(matches!(
            figure.subplot_mut(5),
            Err(DiagnosticsError::Cell {
                cell: 5,
                rows: 2,
                cols: 2
            })
        ));
        assert_eq!(figure.occupied_cells(), vec![4]);
    }

    #[test]
    fn test_registry_reuses_existing_figures() {
        let mut figures = FigureRegistry::new();
        figures.figure_mut(3, 1, 1).title = Some("third".to_string());
        figures.figure_mut(0, 2, 1);
        let again = figures.figure_mut(3, 5, 5);
        assert_eq!(again.grid(), (1, 1));
        assert_eq!(again.title.as_deref(), Some("third"));

        let ids: Vec<usize> = figures.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 3]);
        assert_eq!(figures.len(), 2);
    }

    #[test]
    fn test_subplot_collects_traces_in_order() {
        let mut figure = Figure::new(1, 1);
        let subplot = figure.subplot_mut(1).unwrap();
        subplot
            .push(Trace::VLine { x: 4.0, color: RED })
            .push(Trace::Line {
                x: vec![0.0],
                y: vec![1.0],
                color: BLACK,
            });
        subplot.set_labels("step", "value");

        let subplot = figure.subplot(1).unwrap();
        assert!(matches!(subplot.traces[0], Trace::VLine { .. }));
        assert!(matches!(subplot.traces[1], Trace::Line { .. }));
        assert_eq!(subplot.x_label.as_deref(), Some("step"));
    }
}
