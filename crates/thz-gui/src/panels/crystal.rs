//! Crystal panel: phonon constants of the electro-optic crystal.

use egui::Ui;
use thz_materials::CrystalConstants;

/// State for the crystal constants panel.
#[derive(Debug)]
pub struct CrystalPanel {
    pub constants: CrystalConstants,
    /// Constants the panel was opened with, restored by "Reset".
    initial: CrystalConstants,
}

impl CrystalPanel {
    pub fn new(constants: CrystalConstants) -> Self {
        Self {
            constants,
            initial: constants,
        }
    }

    /// Draw the panel. Returns true when any constant changed.
    pub fn ui(&mut self, ui: &mut Ui) -> bool {
        let before = self.constants;
        let c = &mut self.constants;

        egui::CollapsingHeader::new("Crystal constants")
            .default_open(false)
            .show(ui, |ui| {
                ui.add(egui::Slider::new(&mut c.w_to, 1.0..=400.0).text("w_TO"));
                ui.add(egui::Slider::new(&mut c.w_lo, 1.0..=400.0).text("w_LO"));
                ui.add(
                    egui::Slider::new(&mut c.gamma, 0.01..=20.0)
                        .logarithmic(true)
                        .text("Damping gamma"),
                );
                ui.add(egui::Slider::new(&mut c.epsilon_inf, 1.0..=20.0).text("epsilon_inf"));
                ui.add(egui::Slider::new(&mut c.faust_henry, -1.0..=1.0).text("Faust-Henry C"));
                ui.add(egui::Slider::new(&mut c.group_index, 1.0..=5.0).text("Group index n_g"));
                ui.add(egui::Slider::new(&mut c.r_electronic, 0.1..=10.0).text("r_e"));

                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("Reset").clicked() {
                        *c = self.initial;
                    }
                    if ui.button("ZnTe").clicked() {
                        *c = CrystalConstants::zinc_telluride();
                    }
                });
            });

        self.constants != before
    }
}
