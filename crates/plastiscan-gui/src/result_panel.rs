//! Result screen: captured image, grade card and impact calculator

use eframe::egui::{self, Color32, ColorImage, RichText, TextureHandle, Ui, Vec2};
use plastiscan_app::Session;
use plastiscan_domain::{eco_tip, ImpactResult, ItemWeight, OceanThreat, PlasticGrade};
use plastiscan_types::ImageHandle;
use tracing::warn;
use uuid::Uuid;

/// What the user asked for on the result screen
pub enum ResultAction {
    WeightChanged(f64),
    ScanAnother,
}

pub struct ResultPanel {
    /// Slider value in kg
    weight: f64,
    /// Texture of the captured image, keyed by image id
    texture: Option<(Uuid, TextureHandle)>,
}

impl ResultPanel {
    pub fn new() -> Self {
        Self {
            weight: ItemWeight::DEFAULT,
            texture: None,
        }
    }

    pub fn reset(&mut self, weight: ItemWeight) {
        self.weight = weight.kg();
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        session: &Session,
        shown: ImpactResult,
    ) -> Option<ResultAction> {
        let grade = session.detected_grade?;
        let mut action = None;

        if let Some(ref image) = session.captured_image {
            if let Some(texture) = self.load_texture(ui.ctx(), image) {
                let size = fit(texture.size_vec2(), 360.0, 240.0);
                ui.vertical_centered(|ui| {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                });
                ui.add_space(12.0);
            }
        }

        render_grade_card(ui, grade);
        ui.add_space(12.0);

        egui::Frame::new()
            .fill(Color32::from_gray(30))
            .inner_margin(12.0)
            .corner_radius(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new("Impact Calculator").strong().size(18.0));
                ui.horizontal(|ui| {
                    ui.label("Item weight:");
                    let slider = egui::Slider::new(&mut self.weight, ItemWeight::MIN..=ItemWeight::MAX)
                        .step_by(ItemWeight::STEP)
                        .fixed_decimals(1)
                        .suffix(" kg");
                    if ui.add(slider).changed() {
                        action = Some(ResultAction::WeightChanged(self.weight));
                    }
                });
                ui.add_space(8.0);

                egui::Grid::new("impact_metrics")
                    .num_columns(3)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        for metric in shown.metrics() {
                            ui.label(RichText::new(metric.label).strong());
                            ui.label(
                                RichText::new(format!("{} {}", metric.value, metric.unit))
                                    .monospace()
                                    .size(16.0),
                            );
                            ui.label(RichText::new(metric.description).small().color(Color32::GRAY));
                            ui.end_row();
                        }
                    });
            });

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Ocean threat:").strong());
            ui.label(
                RichText::new(grade.impact.ocean_threat.label())
                    .color(threat_color(grade.impact.ocean_threat)),
            );
            ui.add_space(16.0);
            ui.label(RichText::new("Decomposes in:").strong());
            ui.label(format!("{} years", grade.impact.decomposition_years));
        });

        ui.add_space(8.0);
        ui.label(RichText::new(eco_tip(grade)).italics());
        ui.add_space(8.0);
        ui.label(grade.description);
        ui.label(
            RichText::new(format!("Common examples: {}", grade.examples.join(", ")))
                .color(Color32::GRAY),
        );

        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            if ui.button(RichText::new("Scan Another Item").size(16.0)).clicked() {
                action = Some(ResultAction::ScanAnother);
            }
        });

        action
    }

    fn load_texture(&mut self, ctx: &egui::Context, image: &ImageHandle) -> Option<&TextureHandle> {
        let key = image.id();
        if self.texture.as_ref().map(|(k, _)| *k) != Some(key) {
            self.texture = None;
            match image::load_from_memory_with_format(image.bytes(), image.format()) {
                Ok(decoded) => {
                    let rgba = decoded.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let color_image = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    let texture = ctx.load_texture(
                        format!("capture_{}", image.id()),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.texture = Some((key, texture));
                }
                Err(e) => warn!(error = %e, "could not decode captured image"),
            }
        }
        self.texture.as_ref().map(|(_, t)| t)
    }
}

fn render_grade_card(ui: &mut Ui, grade: &PlasticGrade) {
    let [r, g, b] = grade.accent;
    egui::Frame::new()
        .fill(Color32::from_rgb(r, g, b))
        .inner_margin(16.0)
        .corner_radius(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("#{}", grade.grade))
                        .size(40.0)
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new(grade.name).size(24.0).strong().color(Color32::WHITE));
                    ui.label(RichText::new(grade.full_name).color(Color32::WHITE));
                    let recyclable = if grade.recyclable {
                        "♻ Recyclable"
                    } else {
                        "✕ Not commonly recycled"
                    };
                    ui.label(RichText::new(recyclable).color(Color32::WHITE));
                });
            });
        });
}

fn threat_color(threat: OceanThreat) -> Color32 {
    match threat {
        OceanThreat::Low => Color32::LIGHT_GREEN,
        OceanThreat::Medium => Color32::YELLOW,
        OceanThreat::High => Color32::from_rgb(255, 140, 0),
        OceanThreat::Critical => Color32::RED,
    }
}

/// Scale `original` to fit within the box, preserving aspect ratio
fn fit(original: Vec2, max_width: f32, max_height: f32) -> Vec2 {
    let scale = (max_width / original.x).min(max_height / original.y);
    Vec2::new(original.x * scale, original.y * scale)
}
