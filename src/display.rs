//! Interactive viewer for a [`FigureRegistry`].
//!
//! [`present`] opens a native window with one closable figure window per
//! registered figure and returns once the native window is closed.

use egui::{Color32, Id, Vec2};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, PlotUi, Points, VLine};
use tracing::debug;

use crate::error::{DiagnosticsError, Result};
use crate::figure::{Figure, FigureRegistry, Rgb, Subplot, Trace};

const CELL_WIDTH: f32 = 320.0;
const CELL_HEIGHT: f32 = 200.0;
const MAX_WINDOW_SIZE: [f32; 2] = [1100.0, 800.0];
const MIN_MARKER_RADIUS: f32 = 0.5;

/// Shows all figures and blocks until the viewer is closed.
pub fn present(figures: FigureRegistry, title: &str) -> Result<()> {
    debug!(figures = figures.len(), "opening viewer");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 960.0])
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(FigureViewer::new(figures)))),
    )
    .map_err(|e| DiagnosticsError::Display(e.to_string()))
}

struct FigureViewer {
    figures: FigureRegistry,
    open: Vec<bool>,
}

impl FigureViewer {
    fn new(figures: FigureRegistry) -> Self {
        let open = vec![true; figures.len()];
        Self { figures, open }
    }
}

impl eframe::App for FigureViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("figure_list").show(ctx, |ui| {
            ui.heading("Figures");
            for ((id, figure), open) in self.figures.iter().zip(self.open.iter_mut()) {
                ui.checkbox(open, window_title(id, figure));
            }
            ui.separator();
            ui.label("Close this window to exit.");
        });
        egui::CentralPanel::default().show(ctx, |_ui| {});

        for ((id, figure), open) in self.figures.iter().zip(self.open.iter_mut()) {
            let (rows, cols) = figure.grid();
            egui::Window::new(window_title(id, figure))
                .id(Id::new(("figure", id)))
                .open(open)
                .default_pos([220.0 + 30.0 * id as f32, 20.0 + 30.0 * id as f32])
                .default_size(window_size(rows, cols))
                .show(ctx, |ui| draw_figure(ui, id, figure));
        }
    }
}

fn window_title(id: usize, figure: &Figure) -> String {
    match &figure.title {
        Some(title) => format!("Figure {id}: {}", title.lines().next().unwrap_or_default()),
        None => format!("Figure {id}"),
    }
}

/// Initial window size for a `rows × cols` grid.
fn window_size(rows: usize, cols: usize) -> [f32; 2] {
    [
        (cols as f32 * CELL_WIDTH).min(MAX_WINDOW_SIZE[0]),
        (rows as f32 * CELL_HEIGHT).min(MAX_WINDOW_SIZE[1]),
    ]
}

fn draw_figure(ui: &mut egui::Ui, id: usize, figure: &Figure) {
    if let Some(title) = &figure.title {
        ui.heading(title);
    }
    let (rows, cols) = figure.grid();
    let available = ui.available_size();
    let cell = Vec2::new(
        (available.x / cols as f32 - 8.0).max(60.0),
        (available.y / rows as f32 - 24.0).max(40.0),
    );

    egui::Grid::new(("figure_grid", id))
        .num_columns(cols)
        .show(ui, |ui| {
            for r in 0..rows {
                for c in 0..cols {
                    let index = r * cols + c + 1;
                    match figure.subplot(index) {
                        Some(subplot) => draw_subplot(ui, (id, index), subplot, cell),
                        None => {
                            ui.allocate_space(cell);
                        }
                    }
                }
                ui.end_row();
            }
        });
}

fn draw_subplot(ui: &mut egui::Ui, plot_id: (usize, usize), subplot: &Subplot, size: Vec2) {
    ui.vertical(|ui| {
        if let Some(title) = &subplot.title {
            ui.label(title);
        }
        let mut plot = Plot::new(plot_id)
            .width(size.x)
            .height(size.y)
            .allow_scroll(false);
        if let Some(label) = &subplot.x_label {
            plot = plot.x_axis_label(label.clone());
        }
        if let Some(label) = &subplot.y_label {
            plot = plot.y_axis_label(label.clone());
        }
        plot.show(ui, |plot_ui| {
            for trace in &subplot.traces {
                add_trace(plot_ui, trace);
            }
        });
    });
}

fn add_trace(plot_ui: &mut PlotUi, trace: &Trace) {
    match trace {
        Trace::Line { x, y, color } => {
            plot_ui.line(Line::new("", PlotPoints::new(points(x, y))).color(color32(*color)));
        }
        Trace::Bars {
            edges,
            counts,
            color,
        } => {
            plot_ui.bar_chart(BarChart::new("", bars(edges, counts)).color(color32(*color)));
        }
        Trace::Scatter { x, y, size, color } => {
            plot_ui.points(
                Points::new("", PlotPoints::new(points(x, y)))
                    .radius(marker_radius(*size))
                    .color(color32(*color)),
            );
        }
        Trace::VLine { x, color } => {
            plot_ui.vline(VLine::new("burn-in", *x).color(color32(*color)));
        }
    }
}

fn points(x: &[f64], y: &[f64]) -> Vec<[f64; 2]> {
    x.iter().zip(y).map(|(&x, &y)| [x, y]).collect()
}

/// One bar per histogram bin, centered on the bin and as wide as it.
fn bars(edges: &[f64], counts: &[usize]) -> Vec<Bar> {
    edges
        .windows(2)
        .zip(counts)
        .map(|(w, &count)| Bar::new(0.5 * (w[0] + w[1]), count as f64).width(w[1] - w[0]))
        .collect()
}

/// Screen radius of a marker with the given area in points².
fn marker_radius(area: f64) -> f32 {
    ((area.sqrt() / 2.0) as f32).max(MIN_MARKER_RADIUS)
}

fn color32(Rgb(r, g, b): Rgb) -> Color32 {
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::BLACK;

    #[test]
    fn test_points_pair_coordinates() {
        let pts = points(&[0.0, 1.0, 2.0], &[5.0, 6.0, 7.0]);
        assert_eq!(pts, vec![[0.0, 5.0], [1.0, 6.0], [2.0, 7.0]]);
    }

    #[test]
    fn test_bars_are_centered_on_bins() {
        let chart = bars(&[0.0, 1.0, 3.0], &[4, 2]);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].argument, 0.5);
        assert_eq!(chart[0].value, 4.0);
        assert_eq!(chart[1].argument, 2.0);
        assert_eq!(chart[1].value, 2.0);
    }

    #[test]
    fn test_tiny_markers_stay_visible() {
        assert_eq!(marker_radius(0.1), MIN_MARKER_RADIUS);
        assert_eq!(marker_radius(16.0), 2.0);
    }

    #[test]
    fn test_window_titles_use_first_title_line() {
        let mut figure = Figure::new(1, 1);
        assert_eq!(window_title(3, &figure), "Figure 3");
        figure.title = Some("Histogram for parameter #2\nmode = 0.10".to_string());
        assert_eq!(window_title(2, &figure), "Figure 2: Histogram for parameter #2");
    }

    #[test]
    fn test_window_size_is_capped() {
        assert_eq!(window_size(1, 1), [CELL_WIDTH, CELL_HEIGHT]);
        assert_eq!(window_size(8, 8), MAX_WINDOW_SIZE);
    }

    #[test]
    fn test_colors_convert() {
        assert_eq!(color32(BLACK), Color32::BLACK);
        assert_eq!(color32(Rgb(1, 2, 3)), Color32::from_rgb(1, 2, 3));
    }
}
