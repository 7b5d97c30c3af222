/*!
# Chain Diagnostics

[`ChainDiagnostics`] runs the whole pipeline on one chain: load the file,
drop the burn-in, summarize every parameter and build the figures.

```rust
use chain_plot::diagnostics::ChainDiagnostics;
use chain_plot::render::RenderOptions;
use std::io::Write;

let mut file = tempfile::NamedTempFile::new()?;
writeln!(file, "0.1,0.4,0.2,0.3,0.5")?;
writeln!(file, "1.0,1.2,0.9,1.1,1.0")?;

let options = RenderOptions { burn_in: 1, ..RenderOptions::default() };
let diagnostics = ChainDiagnostics::from_file(file.path(), options)?;
assert_eq!(diagnostics.retained_steps(), 4);
assert_eq!(diagnostics.summaries.len(), 2);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use std::path::Path;

use tracing::info;

use crate::chain::Chain;
use crate::error::Result;
use crate::figure::FigureRegistry;
use crate::io::load_csv;
use crate::render::{RenderOptions, Renderer};
use crate::stats::HistogramSummary;

/// A loaded chain with its per-parameter summaries and figures.
#[derive(Debug, Clone)]
pub struct ChainDiagnostics {
    pub chain: Chain,
    pub options: RenderOptions,
    /// One summary per parameter, over the retained samples.
    pub summaries: Vec<HistogramSummary>,
    pub figures: FigureRegistry,
}

impl ChainDiagnostics {
    /// Loads `path` and builds its diagnostics.
    pub fn from_file<P: AsRef<Path>>(path: P, options: RenderOptions) -> Result<Self> {
        let chain = load_csv(path.as_ref())?;
        info!(
            path = %path.as_ref().display(),
            dim = chain.dim(),
            steps = chain.steps(),
            "chain loaded"
        );
        Self::from_chain(chain, options)
    }

    pub fn from_chain(chain: Chain, options: RenderOptions) -> Result<Self> {
        let renderer = Renderer::new(options);
        let summaries = renderer.summarize(&chain)?;
        let figures = renderer.render_with(&chain, &summaries)?;
        Ok(Self {
            chain,
            options,
            summaries,
            figures,
        })
    }

    pub fn dim(&self) -> usize {
        self.chain.dim()
    }

    /// Steps per parameter left after the burn-in.
    pub fn retained_steps(&self) -> usize {
        self.chain.steps().saturating_sub(self.options.burn_in)
    }
}
