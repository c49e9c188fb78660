//! Main application state and egui integration.

use eframe::egui;

use crate::config::ViewerConfig;
use crate::panels;

/// The response viewer: controls on the left, the curve in the centre.
pub struct ResponseApp {
    pub crystal_state: panels::crystal::CrystalPanel,
    pub sweep_state: panels::sweep::SweepPanel,
    pub plot_state: panels::plot::PlotPanel,
}

impl ResponseApp {
    pub fn new(config: ViewerConfig) -> Self {
        let mut app = Self {
            crystal_state: panels::crystal::CrystalPanel::new(config.crystal),
            sweep_state: panels::sweep::SweepPanel::new(config.fine_sweep()),
            plot_state: panels::plot::PlotPanel::default(),
        };
        app.recompute();
        app
    }

    fn recompute(&mut self) {
        self.plot_state
            .recompute(&self.crystal_state.constants, &self.sweep_state.fine);
    }
}

impl eframe::App for ResponseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut changed = false;

        egui::SidePanel::left("controls_panel")
            .resizable(false)
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    changed |= self.sweep_state.ui(ui);
                    ui.add_space(12.0);
                    changed |= self.crystal_state.ui(ui);
                });
            });

        if changed {
            self.recompute();
        }

        egui::CentralPanel::default().show(ctx, |ui| self.plot_state.ui(ui));
    }
}
