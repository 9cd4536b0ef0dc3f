use crate::data::model::SeriesCollection;
use crate::fit::{sample_fit, FitOptions};
use crate::state::ViewState;

pub const CHART_TITLE: &str = "Benchmark timings";
pub const Y_LABEL: &str = "Time (µs)";

/// Whether a curve shows measurements or a fitted polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    Measured,
    Fitted,
}

/// One drawable curve. In log-scale frames `points` are already `log10`.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub title: String,
    pub kind: CurveKind,
    /// Index into the series palette.
    pub palette_slot: usize,
    pub points: Vec<[f64; 2]>,
}

/// Everything the plot needs for one frame, independent of the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub log_scale: bool,
    pub curves: Vec<Curve>,
}

/// Build the curves for the visible series of the active group.
pub fn render(collection: &SeriesCollection, view: &ViewState, fit: &FitOptions) -> ChartFrame {
    let mut curves = Vec::new();

    for (slot, series) in collection.in_group(view.active_group()) {
        if !view.is_visible(series.title()) {
            continue;
        }

        curves.push(Curve {
            title: series.title().to_string(),
            kind: CurveKind::Measured,
            palette_slot: slot,
            points: to_axes(series.points(), view.log_scale()),
        });

        if view.interpolation() {
            match sample_fit(series.x(), series.y(), fit.degree, fit.samples) {
                Some(sampled) => curves.push(Curve {
                    title: format!("{} (fit)", series.title()),
                    kind: CurveKind::Fitted,
                    palette_slot: slot,
                    points: to_axes(sampled.into_iter(), view.log_scale()),
                }),
                None => log::debug!("no polynomial fit for '{}'", series.title()),
            }
        }
    }

    ChartFrame {
        title: CHART_TITLE,
        x_label: view.x_label(),
        y_label: Y_LABEL,
        log_scale: view.log_scale(),
        curves,
    }
}

/// Map data points onto plot coordinates. Log axes drop non-positive points.
fn to_axes(points: impl Iterator<Item = [f64; 2]>, log_scale: bool) -> Vec<[f64; 2]> {
    if !log_scale {
        return points.collect();
    }
    points
        .filter(|&[x, y]| x > 0.0 && y > 0.0)
        .map(|[x, y]| [x.log10(), y.log10()])
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::model::{Group, Series};

    fn collection() -> SeriesCollection {
        SeriesCollection::new(vec![
            Series::new("A", Group::ArrayLength, vec![(1.0, 10.0), (2.0, 20.0)]).unwrap(),
            Series::new("B", Group::ArrayLength, vec![(1.0, 5.0), (2.0, 5.0)]).unwrap(),
            Series::new("R", Group::InputRange, vec![(10.0, 1.0), (100.0, 2.0)]).unwrap(),
        ])
    }

    fn titles(frame: &ChartFrame) -> Vec<&str> {
        frame.curves.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn renders_active_group_only() {
        let c = collection();
        let view = ViewState::new(&c, Group::ArrayLength);
        let frame = render(&c, &view, &FitOptions::default());

        assert_eq!(titles(&frame), vec!["A", "B"]);
        assert_eq!(frame.x_label, "Array Length");
        assert_eq!(frame.y_label, Y_LABEL);
        assert_eq!(frame.curves[0].points, vec![[1.0, 10.0], [2.0, 20.0]]);
        assert_eq!(frame.curves[1].palette_slot, 1);
    }

    #[test]
    fn hiding_b_leaves_only_a() {
        let c = collection();
        let mut view = ViewState::new(&c, Group::ArrayLength);
        view.toggle_series_visibility("B");

        let frame = render(&c, &view, &FitOptions::default());
        assert_eq!(titles(&frame), vec!["A"]);
        assert_eq!(frame.curves[0].points, vec![[1.0, 10.0], [2.0, 20.0]]);
    }

    #[test]
    fn log_scale_round_trip_restores_linear_frame() {
        let c = collection();
        let mut view = ViewState::new(&c, Group::ArrayLength);
        let linear = render(&c, &view, &FitOptions::default());

        view.toggle_scale();
        let log = render(&c, &view, &FitOptions::default());
        assert!(log.log_scale);
        assert_relative_eq!(log.curves[0].points[1][0], 2f64.log10());
        assert_relative_eq!(log.curves[0].points[1][1], 20f64.log10());

        view.toggle_scale();
        assert_eq!(render(&c, &view, &FitOptions::default()), linear);
    }

    #[test]
    fn log_scale_drops_non_positive_points() {
        let c = SeriesCollection::new(vec![Series::new(
            "Z",
            Group::ArrayLength,
            vec![(0.0, 1.0), (10.0, 0.0), (100.0, 1000.0)],
        )
        .unwrap()]);
        let mut view = ViewState::new(&c, Group::ArrayLength);
        view.toggle_scale();

        let frame = render(&c, &view, &FitOptions::default());
        let points = &frame.curves[0].points;
        assert_eq!(points.len(), 1);
        assert_relative_eq!(points[0][0], 2.0);
        assert_relative_eq!(points[0][1], 3.0);
    }

    #[test]
    fn interpolation_adds_fitted_curves() {
        let c = collection();
        let mut view = ViewState::new(&c, Group::ArrayLength);
        view.toggle_interpolation();

        let fit = FitOptions::default();
        let frame = render(&c, &view, &fit);
        assert_eq!(titles(&frame), vec!["A", "A (fit)", "B", "B (fit)"]);

        let fitted = &frame.curves[1];
        assert_eq!(fitted.kind, CurveKind::Fitted);
        assert_eq!(fitted.palette_slot, 0);
        assert_eq!(fitted.points.len(), fit.samples);
        assert_eq!(fitted.points[0][0], 1.0);
        assert_eq!(fitted.points[fit.samples - 1][0], 2.0);
        assert_relative_eq!(fitted.points[fit.samples - 1][1], 20.0, epsilon = 1e-9);
    }

    #[test]
    fn switched_group_uses_its_label() {
        let c = collection();
        let mut view = ViewState::new(&c, Group::ArrayLength);
        view.switch_dataset(&c);

        let frame = render(&c, &view, &FitOptions::default());
        assert_eq!(titles(&frame), vec!["R"]);
        assert_eq!(frame.x_label, "Input Range");
        assert_eq!(frame.curves[0].palette_slot, 2);
    }
}
