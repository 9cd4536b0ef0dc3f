use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{GridMark, Legend, Line, LineStyle, Plot, PlotPoint, Points};

use crate::render::CurveKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Benchmark plot (central panel)
// ---------------------------------------------------------------------------

/// Render the timing comparison in the central panel.
pub fn benchmark_plot(ui: &mut Ui, state: &AppState) {
    let frame = state.frame();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(frame.title);
    });

    if frame.curves.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("No visible series");
        });
        return;
    }

    let mut plot = Plot::new("benchmark_plot")
        .legend(Legend::default())
        .x_axis_label(frame.x_label)
        .y_axis_label(frame.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if frame.log_scale {
        plot = plot
            .x_axis_formatter(log_axis_tick)
            .y_axis_formatter(log_axis_tick)
            .label_formatter(|name: &str, value: &PlotPoint| {
                let x = format_decade(value.x);
                let y = format_decade(value.y);
                if name.is_empty() {
                    format!("{x}, {y}")
                } else {
                    format!("{name}\n{x}, {y}")
                }
            });
    }

    plot.show(ui, |plot_ui| {
        for curve in &frame.curves {
            let color = state.color_for(curve.palette_slot);

            match curve.kind {
                CurveKind::Measured => {
                    plot_ui.line(
                        Line::new(curve.points.clone())
                            .name(&curve.title)
                            .color(color)
                            .width(1.5),
                    );
                    plot_ui.points(
                        Points::new(curve.points.clone())
                            .name(&curve.title)
                            .color(color)
                            .radius(3.0)
                            .filled(true),
                    );
                }
                CurveKind::Fitted => {
                    plot_ui.line(
                        Line::new(curve.points.clone())
                            .name(&curve.title)
                            .color(color)
                            .width(1.0)
                            .style(LineStyle::Dashed { length: 8.0 }),
                    );
                }
            }
        }
    });
}

fn log_axis_tick(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    format_decade(mark.value)
}

/// Label for a `log10` coordinate, shown as the original value.
fn format_decade(exponent: f64) -> String {
    let value = 10f64.powf(exponent);
    if (0.01..10_000.0).contains(&value) {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        format!("{value:.1e}")
    }
}
