use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BenchViewerApp {
    pub state: AppState,
}

impl BenchViewerApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BenchViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and toggles ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: series visibility ----
        egui::SidePanel::left("series_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::benchmark_plot(ui, &self.state);
        });
    }
}
