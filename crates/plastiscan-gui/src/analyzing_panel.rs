//! Analyzing screen

use eframe::egui::{self, Color32, RichText, Ui};
use plastiscan_vision::ANALYSIS_STEPS;
use std::time::Duration;

pub struct AnalyzingPanel;

impl AnalyzingPanel {
    pub fn new() -> Self {
        Self
    }

    /// Returns true when the user cancels
    pub fn ui(&mut self, ui: &mut Ui, elapsed: Duration, visible_steps: usize) -> bool {
        let mut cancel = false;

        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.add(egui::Spinner::new().size(48.0));
            ui.add_space(16.0);
            ui.heading(RichText::new("Analyzing your item...").strong());
            ui.label(
                RichText::new(format!("{:.1} s", elapsed.as_secs_f32())).color(Color32::GRAY),
            );
            ui.add_space(16.0);

            egui::Frame::new()
                .fill(Color32::from_gray(30))
                .inner_margin(10.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    for (index, step) in ANALYSIS_STEPS.iter().enumerate() {
                        if index < visible_steps {
                            ui.label(RichText::new(format!("✓ {}", step)).color(Color32::LIGHT_GREEN));
                        } else {
                            ui.label(RichText::new(format!("  {}", step)).color(Color32::DARK_GRAY));
                        }
                    }
                });

            ui.add_space(16.0);
            if ui.button("Cancel").clicked() {
                cancel = true;
            }
        });

        cancel
    }
}
