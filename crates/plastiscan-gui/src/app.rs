//! Main application structure: one panel per screen

use eframe::egui::{self, Color32, RichText};
use plastiscan_app::{Config, Screen, ScreenFlowController};
use plastiscan_types::ScanError;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::warn;

use crate::analyzing_panel::AnalyzingPanel;
use crate::capture_panel::{CaptureAction, CapturePanel};
use crate::result_panel::{ResultAction, ResultPanel};

/// Main application state
pub struct PlastiscanApp {
    flow: ScreenFlowController,
    capture_panel: CapturePanel,
    analyzing_panel: AnalyzingPanel,
    result_panel: ResultPanel,
    /// Last recoverable error, shown until the next action
    error: Option<String>,
    /// Screen rendered in the previous frame
    last_screen: Screen,
}

impl PlastiscanApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, runtime: Handle) -> Self {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.animation_time = 0.1;
        cc.egui_ctx.set_style(style);

        Self {
            flow: ScreenFlowController::from_config(&config, runtime),
            capture_panel: CapturePanel::new(),
            analyzing_panel: AnalyzingPanel::new(),
            result_panel: ResultPanel::new(),
            error: None,
            last_screen: Screen::Capture,
        }
    }

    fn report<T>(&mut self, result: Result<T, ScanError>) {
        match result {
            Ok(_) => self.error = None,
            Err(e) => self.show_error(e),
        }
    }

    fn show_error(&mut self, error: ScanError) {
        warn!(error = %error, "action failed");
        self.error = Some(error.to_string());
    }

    fn handle_capture(&mut self, action: CaptureAction) {
        let result = match action {
            CaptureAction::StartCamera => self.flow.start_camera(),
            CaptureAction::StopCamera => self.flow.stop_camera(),
            CaptureAction::TakePhoto => self.flow.capture_photo(),
            CaptureAction::Upload(path) => self.flow.upload(path.as_deref()),
        };
        self.report(result);
    }

    fn handle_result(&mut self, action: ResultAction) {
        let result = match action {
            ResultAction::WeightChanged(kg) => self.flow.set_weight(kg),
            ResultAction::ScanAnother => self.flow.scan_another(),
        };
        self.report(result);
    }

    fn render_error(&self, ui: &mut egui::Ui) {
        if let Some(ref error) = self.error {
            egui::Frame::new()
                .fill(Color32::from_rgb(80, 20, 20))
                .inner_margin(8.0)
                .corner_radius(4.0)
                .show(ui, |ui| {
                    ui.label(RichText::new(error).color(Color32::from_rgb(255, 180, 180)));
                });
            ui.add_space(8.0);
        }
    }
}

impl eframe::App for PlastiscanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Err(e) = self.flow.pump() {
            self.show_error(e);
        }

        let screen = self.flow.screen();
        if screen != self.last_screen {
            match screen {
                Screen::Capture => self.capture_panel.reset(),
                Screen::Analyzing => {}
                Screen::Result => self.result_panel.reset(self.flow.session().item_weight),
            }
            self.last_screen = screen;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_error(ui);

                match screen {
                    Screen::Capture => {
                        let camera_active = self.flow.is_camera_active();
                        if let Some(action) = self.capture_panel.ui(ui, camera_active) {
                            self.handle_capture(action);
                        }
                    }
                    Screen::Analyzing => {
                        let elapsed = self.flow.analysis_elapsed().unwrap_or_default();
                        if self.analyzing_panel.ui(ui, elapsed, self.flow.visible_steps()) {
                            let cancelled = self.flow.cancel_analysis();
                            self.report(cancelled);
                        }
                    }
                    Screen::Result => {
                        let action = self.result_panel.ui(
                            ui,
                            self.flow.session(),
                            self.flow.displayed_impact(),
                        );
                        if let Some(action) = action {
                            self.handle_result(action);
                        }
                    }
                }
            });
        });

        // keep ticking while something moves on its own
        if self.flow.screen() == Screen::Analyzing || self.flow.is_animating() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}
