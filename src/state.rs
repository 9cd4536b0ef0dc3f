use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use eframe::egui::Color32;

use crate::color::generate_palette;
use crate::data::loader;
use crate::data::model::{Group, SeriesCollection};
use crate::fit::FitOptions;
use crate::render::{render, ChartFrame};

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Presentation toggles. Each operation changes exactly one aspect of the
/// view; drawing is derived from it by [`render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    log_scale: bool,
    active_group: Group,
    /// Visibility of each series title in `active_group`.
    visibility: BTreeMap<String, bool>,
    interpolation: bool,
}

impl ViewState {
    /// Linear axes, no interpolation, every series of `group` visible.
    pub fn new(collection: &SeriesCollection, group: Group) -> Self {
        Self::with_toggles(collection, group, false, false)
    }

    /// Every series of `group` visible, with the given scale and
    /// interpolation toggles.
    pub fn with_toggles(collection: &SeriesCollection, group: Group, log_scale: bool, interpolation: bool) -> Self {
        ViewState {
            log_scale,
            active_group: group,
            visibility: all_visible(collection, group),
            interpolation,
        }
    }

    pub fn log_scale(&self) -> bool {
        self.log_scale
    }

    pub fn active_group(&self) -> Group {
        self.active_group
    }

    pub fn interpolation(&self) -> bool {
        self.interpolation
    }

    pub fn toggle_scale(&mut self) {
        self.log_scale = !self.log_scale;
    }

    /// Flip one series. Returns `false` if `title` is not in the active group.
    pub fn toggle_series_visibility(&mut self, title: &str) -> bool {
        match self.visibility.get_mut(title) {
            Some(visible) => {
                *visible = !*visible;
                true
            }
            None => {
                log::debug!("no series '{title}' in group '{}'", self.active_group);
                false
            }
        }
    }

    /// Swap to the other group and show all of its series.
    pub fn switch_dataset(&mut self, collection: &SeriesCollection) {
        self.active_group = self.active_group.other();
        self.visibility = all_visible(collection, self.active_group);
    }

    pub fn toggle_interpolation(&mut self) {
        self.interpolation = !self.interpolation;
    }

    pub fn is_visible(&self, title: &str) -> bool {
        self.visibility.get(title).copied().unwrap_or(false)
    }

    pub fn x_label(&self) -> &'static str {
        self.active_group.axis_label()
    }
}

fn all_visible(collection: &SeriesCollection, group: Group) -> BTreeMap<String, bool> {
    collection
        .titles(group)
        .into_iter()
        .map(|t| (t, true))
        .collect()
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded benchmark results.
    pub collection: SeriesCollection,

    /// Current presentation toggles.
    pub view: ViewState,

    /// One colour per series, indexed by collection position.
    pub palette: Vec<Color32>,

    pub fit: FitOptions,

    /// Directory the collection was loaded from.
    pub results_dir: PathBuf,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(collection: SeriesCollection, view: ViewState, fit: FitOptions, results_dir: PathBuf) -> Self {
        Self {
            palette: generate_palette(collection.len()),
            collection,
            view,
            fit,
            results_dir,
            status_message: None,
        }
    }

    /// Derive what should be drawn for the current view.
    pub fn frame(&self) -> ChartFrame {
        render(&self.collection, &self.view, &self.fit)
    }

    pub fn color_for(&self, slot: usize) -> Color32 {
        self.palette.get(slot).copied().unwrap_or(Color32::GRAY)
    }

    /// Replace the data with the contents of `dir`, keeping the scale and
    /// interpolation toggles. On failure the current data stays.
    pub fn reload_from(&mut self, dir: &Path) {
        match loader::load_dir(dir) {
            Ok(Some(collection)) => {
                log::info!("Loaded {} series from {}", collection.len(), dir.display());
                let view = ViewState::with_toggles(
                    &collection,
                    self.view.active_group(),
                    self.view.log_scale(),
                    self.view.interpolation(),
                );

                self.palette = generate_palette(collection.len());
                self.collection = collection;
                self.view = view;
                self.results_dir = dir.to_path_buf();
                self.status_message = None;
            }
            Ok(None) => {
                log::warn!("No valid data found in {}", dir.display());
                self.status_message = Some(format!("No valid data in {}", dir.display()));
            }
            Err(e) => {
                log::error!("Failed to load results: {e:#}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::data::model::Series;

    fn collection() -> SeriesCollection {
        SeriesCollection::new(vec![
            Series::new("A", Group::ArrayLength, vec![(1.0, 10.0), (2.0, 20.0)]).unwrap(),
            Series::new("B", Group::ArrayLength, vec![(1.0, 5.0), (2.0, 5.0)]).unwrap(),
            Series::new("C", Group::InputRange, vec![(10.0, 1.0), (100.0, 2.0)]).unwrap(),
        ])
    }

    #[test]
    fn starts_with_group_visible() {
        let view = ViewState::new(&collection(), Group::ArrayLength);
        assert!(!view.log_scale);
        assert!(!view.interpolation);
        assert!(view.is_visible("A") && view.is_visible("B"));
        assert!(!view.is_visible("C"));
        assert_eq!(view.x_label(), "Array Length");
    }

    #[test]
    fn initial_toggles_are_taken_from_constructor() {
        let view = ViewState::with_toggles(&collection(), Group::InputRange, true, true);
        assert!(view.log_scale());
        assert!(view.interpolation());
        assert_eq!(view.active_group(), Group::InputRange);
        assert!(view.is_visible("C"));
        assert!(!view.is_visible("A"));
    }

    #[test]
    fn toggle_scale_twice_is_identity() {
        let mut view = ViewState::new(&collection(), Group::ArrayLength);
        let before = view.clone();
        view.toggle_scale();
        assert!(view.log_scale);
        view.toggle_scale();
        assert_eq!(view, before);
    }

    #[test]
    fn toggle_visibility_flips_one_series() {
        let mut view = ViewState::new(&collection(), Group::ArrayLength);
        assert!(view.toggle_series_visibility("B"));
        assert!(view.is_visible("A"));
        assert!(!view.is_visible("B"));
        assert!(view.toggle_series_visibility("B"));
        assert!(view.is_visible("B"));
    }

    #[test]
    fn unknown_title_is_ignored() {
        let mut view = ViewState::new(&collection(), Group::ArrayLength);
        let before = view.clone();
        assert!(!view.toggle_series_visibility("C"));
        assert_eq!(view, before);
    }

    #[test]
    fn switch_dataset_twice_resets_visibility() {
        let c = collection();
        let mut view = ViewState::new(&c, Group::ArrayLength);
        view.toggle_series_visibility("A");

        view.switch_dataset(&c);
        assert_eq!(view.active_group, Group::InputRange);
        assert_eq!(view.x_label(), "Input Range");
        assert!(view.is_visible("C"));
        assert!(!view.is_visible("A"));

        view.switch_dataset(&c);
        assert_eq!(view.active_group, Group::ArrayLength);
        assert!(view.visibility.values().all(|&v| v));
        assert_eq!(view.visibility.len(), 2);
    }

    #[test]
    fn toggle_interpolation_flips() {
        let mut view = ViewState::new(&collection(), Group::ArrayLength);
        view.toggle_interpolation();
        assert!(view.interpolation);
        assert!(!view.log_scale);
    }

    #[test]
    fn reload_keeps_toggles_and_current_data_on_failure() {
        let c = collection();
        let view = ViewState::new(&c, Group::ArrayLength);
        let mut state = AppState::new(c.clone(), view, FitOptions::default(), PathBuf::from("results"));
        state.view.toggle_scale();
        assert_eq!(state.palette.len(), 3);

        let dir = tempfile::tempdir().unwrap();
        state.reload_from(&dir.path().join("missing"));
        assert_eq!(state.collection, c);
        assert!(state.status_message.is_some());

        fs::write(dir.path().join("heapsort.array_length.csv"), "1,2\n3,4\n").unwrap();
        state.reload_from(dir.path());
        assert_eq!(state.collection.len(), 1);
        assert!(state.view.log_scale());
        assert!(!state.view.interpolation());
        assert!(state.view.is_visible("heapsort"));
        assert_eq!(state.results_dir, dir.path());
        assert!(state.status_message.is_none());
    }
}
