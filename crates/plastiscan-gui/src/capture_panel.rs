//! Capture screen: camera controls, upload and background facts

use eframe::egui::{self, Color32, RichText, Ui};
use plastiscan_domain::facts::{quote_at, STATS};
use plastiscan_vision::IMAGE_EXTENSIONS;
use std::path::PathBuf;
use std::time::Instant;

const ACCENT: Color32 = Color32::from_rgb(16, 185, 129);

/// What the user asked for on the capture screen
pub enum CaptureAction {
    StartCamera,
    StopCamera,
    TakePhoto,
    /// `None` when the file dialog was dismissed
    Upload(Option<PathBuf>),
}

pub struct CapturePanel {
    /// Quote rotation starts from here
    shown_at: Instant,
}

impl CapturePanel {
    pub fn new() -> Self {
        Self {
            shown_at: Instant::now(),
        }
    }

    pub fn reset(&mut self) {
        self.shown_at = Instant::now();
    }

    pub fn ui(&mut self, ui: &mut Ui, camera_active: bool) -> Option<CaptureAction> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.heading(RichText::new("Plastic Scanner").size(28.0).strong());
            ui.label(
                RichText::new("Identify the plastic and see what it costs the planet")
                    .color(Color32::GRAY),
            );
        });

        ui.add_space(16.0);
        self.render_stats(ui);
        ui.add_space(16.0);

        egui::Frame::new()
            .fill(Color32::from_gray(30))
            .inner_margin(16.0)
            .corner_radius(8.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    if camera_active {
                        ui.label(RichText::new("● Camera live").color(ACCENT));
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button(RichText::new("Take Photo").size(16.0)).clicked() {
                                action = Some(CaptureAction::TakePhoto);
                            }
                            if ui.button("Stop Camera").clicked() {
                                action = Some(CaptureAction::StopCamera);
                            }
                        });
                    } else {
                        ui.label(
                            RichText::new("Position the item's recycling symbol in view")
                                .color(Color32::GRAY),
                        );
                        ui.add_space(8.0);
                        ui.horizontal(|ui| {
                            if ui.button(RichText::new("Start Camera").size(16.0)).clicked() {
                                action = Some(CaptureAction::StartCamera);
                            }
                            if ui.button(RichText::new("Upload Photo").size(16.0)).clicked() {
                                let picked = rfd::FileDialog::new()
                                    .add_filter("Images", IMAGE_EXTENSIONS)
                                    .pick_file();
                                action = Some(CaptureAction::Upload(picked));
                            }
                        });
                    }
                });
            });

        ui.add_space(16.0);
        self.render_quote(ui);

        action
    }

    fn render_stats(&self, ui: &mut Ui) {
        ui.columns(STATS.len(), |columns| {
            for (column, stat) in columns.iter_mut().zip(STATS.iter()) {
                column.vertical_centered(|ui| {
                    ui.label(RichText::new(stat.number).size(24.0).strong().color(ACCENT));
                    ui.label(RichText::new(stat.label).small().color(Color32::GRAY));
                });
            }
        });
    }

    fn render_quote(&self, ui: &mut Ui) {
        let quote = quote_at(self.shown_at.elapsed());
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(format!("\u{201c}{}\u{201d}", quote.text)).italics());
            ui.label(RichText::new(format!("- {}", quote.author)).small().color(Color32::GRAY));
        });
    }
}
