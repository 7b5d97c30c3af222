/*!
# Diagnostic Figures

The [`Renderer`] turns a [`Chain`] into a [`FigureRegistry`]:

| figure id | contents                                                      |
|-----------|---------------------------------------------------------------|
| `0`       | trace plot, one subplot per parameter stacked vertically      |
| `1..=dim` | histogram of parameter `id`                                   |
| `dim + 1` | pairwise scatter plots, only when `1 < dim <= 9`              |

All figures use the retained samples, i.e. the chain with the configured
burn-in removed.

The pairwise figure uses a `(dim-1) × (dim-1)` grid and puts the pair
`(i, j)`, `i < j`, into cell `i * (dim - 1) + j`. For `dim > 3` this leaves
holes in the grid; the layout is kept as is so figures stay comparable with
earlier plots of the same chains.

```rust
use chain_plot::chain::Chain;
use chain_plot::render::{RenderOptions, Renderer};
use ndarray::arr2;

let chain = Chain::new(arr2(&[[0.0, 1.0, 2.0, 3.0], [1.0, 0.5, 0.2, 0.1]]))?;
let figures = Renderer::new(RenderOptions::default()).render(&chain)?;

// trace plot, two histograms and the pairwise figure
assert_eq!(figures.len(), 4);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use ndarray::ArrayView2;
use tracing::{debug, info};

use crate::chain::Chain;
use crate::error::Result;
use crate::figure::{FigureRegistry, Rgb, Trace, BLACK, RED};
use crate::stats::{summarize_all, HistogramSummary};

/// Id of the trace-plot figure.
pub const TRACE_FIGURE: usize = 0;
/// Histogram bin count used when none is configured.
pub const DEFAULT_BINS: usize = 30;
/// Largest parameter count that still gets a pairwise scatter figure.
pub const MAX_CORRELATION_DIM: usize = 9;
/// Marker area of the pairwise scatter plots, in points².
pub const SCATTER_MARKER_SIZE: f64 = 0.1;

const TRACE_COLOR: Rgb = BLACK;
const HISTOGRAM_COLOR: Rgb = BLACK;
const SCATTER_COLOR: Rgb = BLACK;
const BURN_IN_COLOR: Rgb = RED;

/// Settings of a diagnostics run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Number of leading steps dropped from every parameter.
    pub burn_in: usize,
    /// Histogram bin count.
    pub bins: usize,
    /// Append mode, mean and standard deviation to histogram titles.
    pub show_summary: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            burn_in: 0,
            bins: DEFAULT_BINS,
            show_summary: false,
        }
    }
}

/// Id of the pairwise scatter figure of a `dim`-parameter chain, if it gets one.
pub fn correlation_figure_id(dim: usize) -> Option<usize> {
    (dim > 1 && dim <= MAX_CORRELATION_DIM).then_some(dim + 1)
}

/// Grid cell of the scatter plot for parameters `i < j`.
pub fn correlation_cell(dim: usize, i: usize, j: usize) -> usize {
    i * (dim - 1) + j
}

/// Builds the diagnostic figures of a chain.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Per-parameter summaries of the retained samples.
    pub fn summarize(&self, chain: &Chain) -> Result<Vec<HistogramSummary>> {
        let samples = chain.retained(self.options.burn_in)?;
        summarize_all(samples, self.options.bins)
    }

    /// All figures for `chain`.
    pub fn render(&self, chain: &Chain) -> Result<FigureRegistry> {
        let summaries = self.summarize(chain)?;
        self.render_with(chain, &summaries)
    }

    /// All figures for `chain`, reusing summaries from [`Renderer::summarize`].
    pub fn render_with(
        &self,
        chain: &Chain,
        summaries: &[HistogramSummary],
    ) -> Result<FigureRegistry> {
        let samples = chain.retained(self.options.burn_in)?;
        debug!(
            burn_in = self.options.burn_in,
            retained = samples.ncols(),
            "building figures"
        );

        let mut figures = FigureRegistry::new();
        self.trace_figure(&mut figures, samples)?;
        for (i, summary) in summaries.iter().enumerate() {
            self.histogram_figure(&mut figures, i, summary)?;
        }
        self.correlation_figure(&mut figures, samples)?;

        info!(figures = figures.len(), "figures ready");
        Ok(figures)
    }

    /// Figure 0: one line plot per parameter, stacked in a single column.
    ///
    /// The x axis counts steps of the full chain, so the retained samples start
    /// at `burn_in`. When a burn-in is set, the first subplot marks it with a
    /// vertical line.
    fn trace_figure(&self, figures: &mut FigureRegistry, samples: ArrayView2<f64>) -> Result<()> {
        let dim = samples.nrows();
        let burn_in = self.options.burn_in;
        let figure = figures.figure_mut(TRACE_FIGURE, dim, 1);
        figure.title = Some("Trace plot".to_string());

        for (i, row) in samples.rows().into_iter().enumerate() {
            let subplot = figure.subplot_mut(i + 1)?;
            subplot.y_label = Some(format!("Parameter #{}", i + 1));
            subplot.push(Trace::Line {
                x: (burn_in..burn_in + row.len()).map(|s| s as f64).collect(),
                y: row.to_vec(),
                color: TRACE_COLOR,
            });
            if i == 0 && burn_in > 0 {
                subplot.push(Trace::VLine {
                    x: burn_in as f64,
                    color: BURN_IN_COLOR,
                });
            }
        }
        Ok(())
    }

    /// Figure `index + 1`: histogram of one parameter.
    fn histogram_figure(
        &self,
        figures: &mut FigureRegistry,
        index: usize,
        summary: &HistogramSummary,
    ) -> Result<()> {
        let figure = figures.figure_mut(index + 1, 1, 1);
        let mut title = format!("Histogram for parameter #{}", index + 1);
        if self.options.show_summary {
            title = format!("{title}\n{}", summary.title_line());
        }
        figure.title = Some(title);

        figure.subplot_mut(1)?.push(Trace::Bars {
            edges: summary.histogram.edges.clone(),
            counts: summary.histogram.counts.clone(),
            color: HISTOGRAM_COLOR,
        });
        Ok(())
    }

    /// Figure `dim + 1`: scatter plots of every parameter pair.
    fn correlation_figure(
        &self,
        figures: &mut FigureRegistry,
        samples: ArrayView2<f64>,
    ) -> Result<()> {
        let dim = samples.nrows();
        let Some(id) = correlation_figure_id(dim) else {
            debug!(dim, "no pairwise figure");
            return Ok(());
        };

        let figure = figures.figure_mut(id, dim - 1, dim - 1);
        figure.title = Some("Pairwise scatter plots".to_string());
        for i in 0..dim - 1 {
            for j in (i + 1)..dim {
                let subplot = figure.subplot_mut(correlation_cell(dim, i, j))?;
                subplot.set_labels(
                    format!("Parameter #{}", j + 1),
                    format!("Parameter #{}", i + 1),
                );
                subplot.push(Trace::Scatter {
                    x: samples.row(j).to_vec(),
                    y: samples.row(i).to_vec(),
                    size: SCATTER_MARKER_SIZE,
                    color: SCATTER_COLOR,
                });
            }
        }
        Ok(())
    }
}
