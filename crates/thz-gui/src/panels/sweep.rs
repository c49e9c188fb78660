//! Sweep panel: thickness, frequency window and model choices.

use egui::Ui;
use thz_core::{FineSweep, Part, Transform};
use thz_materials::IndexConvention;

/// Smallest gap kept between the two window edges.
const MIN_WINDOW_WIDTH: f64 = 0.5;

/// State for the fine sweep configuration panel.
#[derive(Debug)]
pub struct SweepPanel {
    pub fine: FineSweep,
}

impl SweepPanel {
    pub fn new(fine: FineSweep) -> Self {
        Self { fine }
    }

    /// Draw the panel. Returns true when the sweep changed.
    pub fn ui(&mut self, ui: &mut Ui) -> bool {
        let f = &mut self.fine;
        let mut changed = false;

        ui.heading("Sweep");
        ui.separator();

        changed |= ui
            .add(
                egui::Slider::new(&mut f.thickness, 0.1..=200.0)
                    .logarithmic(true)
                    .text("Thickness d"),
            )
            .changed();

        ui.add_space(8.0);
        ui.label("Frequency window:");
        let top = f.max_frequency;
        changed |= ui
            .add(egui::Slider::new(&mut f.window[0], 0.0..=top).text("From"))
            .changed();
        changed |= ui
            .add(egui::Slider::new(&mut f.window[1], 0.0..=top).text("To"))
            .changed();
        keep_window_ordered(&mut f.window, top);

        ui.add_space(8.0);
        changed |= ui
            .add(egui::Slider::new(&mut f.max_frequency, 1.0..=400.0).text("Max frequency"))
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut f.samples_per_unit, 1..=200)
                    .text("Samples per unit"),
            )
            .changed();
        ui.label(
            egui::RichText::new(format!("  {} grid points", f.points()))
                .weak()
                .small(),
        );

        ui.add_space(12.0);
        ui.separator();

        ui.label("Refractive index convention:");
        ui.horizontal(|ui| {
            changed |= ui
                .selectable_value(
                    &mut f.convention,
                    IndexConvention::VacuumCorrection,
                    "Vacuum correction",
                )
                .changed();
            changed |= ui
                .selectable_value(&mut f.convention, IndexConvention::Reciprocal, "Reciprocal")
                .changed();
        });

        ui.label("Component:");
        ui.horizontal(|ui| {
            changed |= ui.selectable_value(&mut f.part, Part::Real, "Re").changed();
            changed |= ui.selectable_value(&mut f.part, Part::Imaginary, "Im").changed();
        });

        ui.label("Transform:");
        ui.horizontal(|ui| {
            changed |= ui
                .selectable_value(&mut f.transform, Transform::None, "None")
                .changed();
            changed |= ui
                .selectable_value(&mut f.transform, Transform::DiscreteFourier, "Fourier")
                .changed();
        });

        changed |= ui.checkbox(&mut f.log_y, "Logarithmic y-axis").changed();

        changed
    }
}

/// Clamp the window into `[0, top]` with `lo < hi`.
fn keep_window_ordered(window: &mut [f64; 2], top: f64) {
    let width = MIN_WINDOW_WIDTH.min(top);
    window[1] = window[1].clamp(width, top);
    window[0] = window[0].clamp(0.0, window[1] - width);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_kept_ordered() {
        let mut w = [15.0, 10.0];
        keep_window_ordered(&mut w, 200.0);
        assert!(w[0] < w[1]);
        assert_eq!(w[1], 10.0);

        let mut w = [5.0, 500.0];
        keep_window_ordered(&mut w, 200.0);
        assert_eq!(w, [5.0, 200.0]);

        let mut w = [0.0, 0.0];
        keep_window_ordered(&mut w, 200.0);
        assert_eq!(w, [0.0, MIN_WINDOW_WIDTH]);
    }
}
