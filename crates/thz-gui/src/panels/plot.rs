//! Plot panel: the fine-sweep curve over the frequency window.

use egui::Ui;
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints};
use log::{error, warn};

use thz_core::{FineSweep, Part};
use thz_materials::CrystalConstants;

/// Cached curve of the last computation.
#[derive(Debug, Default)]
pub struct PlotPanel {
    /// Drawable runs of `[w, y]`, with `y = log10(value)` on a log axis.
    segments: Vec<Vec<[f64; 2]>>,
    /// Samples in the window that could not be drawn.
    dropped: usize,
    total: usize,
    part: Part,
    log_y: bool,
    window: [f64; 2],
    thickness: f64,
    error: Option<String>,
    /// Refit the plot bounds on the next frame.
    reset_bounds: bool,
}

impl PlotPanel {
    /// Recompute the curve for new constants or sweep settings.
    pub fn recompute(&mut self, constants: &CrystalConstants, fine: &FineSweep) {
        self.part = fine.part;
        self.log_y = fine.log_y;
        self.window = fine.window;
        self.thickness = fine.thickness;
        self.reset_bounds = true;

        match fine.run(constants) {
            Ok(spectrum) => {
                let curve = fine.curve(&spectrum);
                let (segments, dropped) = display_segments(&curve, fine.log_y);
                if dropped > 0 {
                    warn!(
                        "{} of {} samples in the window cannot be drawn",
                        dropped,
                        curve.len()
                    );
                }
                self.segments = segments;
                self.dropped = dropped;
                self.total = curve.len();
                self.error = None;
            }
            Err(e) => {
                error!("Response computation failed: {}", e);
                self.segments.clear();
                self.dropped = 0;
                self.total = 0;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn ui(&mut self, ui: &mut Ui) {
        ui.heading(format!(
            "Response function R(w) of ZnTe, d = {}",
            self.thickness
        ));
        ui.separator();

        if let Some(err) = &self.error {
            ui.colored_label(egui::Color32::RED, format!("Error: {}", err));
            return;
        }

        let shown = self.total - self.dropped;
        ui.label(format!("{} of {} samples shown", shown, self.total));
        ui.add_space(4.0);

        let y_label = if self.log_y {
            format!("log10 {} R(w)", self.part.label())
        } else {
            format!("{} R(w)", self.part.label())
        };

        let mut plot = Plot::new("response_plot")
            .x_axis_label("THz")
            .y_axis_label(y_label)
            .include_x(self.window[0])
            .include_x(self.window[1])
            .legend(Legend::default());
        if self.log_y {
            plot = plot.y_axis_formatter(|mark: GridMark, _range| {
                format!("{:.1e}", 10f64.powf(mark.value))
            });
        }
        if std::mem::take(&mut self.reset_bounds) {
            plot = plot.reset();
        }

        let name = format!("{} R(w)", self.part.label());
        let segments = &self.segments;
        plot.show(ui, |plot_ui| {
            for segment in segments {
                let points: PlotPoints = segment.iter().copied().collect();
                plot_ui.line(
                    Line::new(points)
                        .name(&name)
                        .color(egui::Color32::from_rgb(50, 120, 220))
                        .width(2.0),
                );
            }
        });
    }
}

/// Split a curve into drawable runs.
///
/// Non-finite samples are never drawn. On a log axis values are mapped to
/// `log10`, and non-positive samples are dropped. Returns the runs and the
/// number of dropped samples.
pub fn display_segments(curve: &[(f64, f64)], log_y: bool) -> (Vec<Vec<[f64; 2]>>, usize) {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut dropped = 0;

    for &(w, y) in curve {
        let mapped = if log_y {
            if y > 0.0 {
                y.log10()
            } else {
                f64::NAN
            }
        } else {
            y
        };
        if mapped.is_finite() {
            current.push([w, mapped]);
        } else {
            dropped += 1;
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    (segments, dropped)
}
