use eframe::egui::{self, Color32, RichText, ScrollArea, Sense, Ui};

use crate::color::swatch_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series visibility
// ---------------------------------------------------------------------------

/// Render the left panel with one checkbox per series of the active group.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(state.view.active_group().axis_label());
    ui.separator();

    // Clone what we need so we can mutate state inside the loop.
    let series: Vec<(usize, String)> = state
        .collection
        .in_group(state.view.active_group())
        .map(|(slot, s)| (slot, s.title().to_string()))
        .collect();

    if series.is_empty() {
        ui.label("No series in this dataset.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (slot, title) in &series {
                let visible = state.view.is_visible(title);
                let fill = swatch_color(visible, state.color_for(*slot));

                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, fill);

                    let mut checked = visible;
                    if ui.checkbox(&mut checked, title.as_str()).changed() {
                        state.view.toggle_series_visibility(title);
                    }
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the view toggles.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open results folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let scale_label = if state.view.log_scale() {
            "Linear Scale"
        } else {
            "Log Scale"
        };
        if ui.button(scale_label).clicked() {
            state.view.toggle_scale();
        }

        let other = state.view.active_group().other();
        let can_switch = state.collection.group_len(other) > 0;
        if ui
            .add_enabled(can_switch, egui::Button::new(format!("Show {other}")))
            .clicked()
        {
            state.view.switch_dataset(&state.collection);
        }

        if ui
            .selectable_label(state.view.interpolation(), "Interpolation")
            .clicked()
        {
            state.view.toggle_interpolation();
        }

        ui.separator();

        ui.label(format!(
            "{} series loaded from {}",
            state.collection.len(),
            state.results_dir.display()
        ));

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open benchmark results")
        .set_directory(&state.results_dir)
        .pick_folder();

    if let Some(dir) = folder {
        state.reload_from(&dir);
    }
}
