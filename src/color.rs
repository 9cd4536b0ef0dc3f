use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Series palette
// ---------------------------------------------------------------------------

/// The 20-colour "tab20" qualitative map: dark/light pairs of ten hues.
const TAB20: [(u8, u8, u8); 20] = [
    (31, 119, 180),
    (174, 199, 232),
    (255, 127, 14),
    (255, 187, 120),
    (44, 160, 44),
    (152, 223, 138),
    (214, 39, 40),
    (255, 152, 150),
    (148, 103, 189),
    (197, 176, 213),
    (140, 86, 75),
    (196, 156, 148),
    (227, 119, 194),
    (247, 182, 210),
    (127, 127, 127),
    (199, 199, 199),
    (188, 189, 34),
    (219, 219, 141),
    (23, 190, 207),
    (158, 218, 229),
];

/// `n` colours sampled evenly across [`TAB20`], first and last entries
/// included. Distinct for up to 20 series; beyond that entries repeat.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let position = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            let index = ((position * TAB20.len() as f64) as usize).min(TAB20.len() - 1);
            let rgb: Srgb<u8> = Srgb::from_components(TAB20[index]);
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

/// Fill colour of a series checkbox swatch: the series colour while it is
/// shown, white once hidden.
pub fn swatch_color(visible: bool, series_color: Color32) -> Color32 {
    if visible {
        series_color
    } else {
        Color32::WHITE
    }
}
