//! Categorical colours for telling girders apart.

use plotters::style::RGBColor;

/// The ten-colour "tab10" categorical palette.
pub const TAB10: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Colour for the girder at position `index` out of `count` girders.
///
/// The palette is resampled to `count` evenly spaced entries, so the first and last
/// girders always get the first and last palette colours. Up to ten girders get
/// distinct colours.
///
/// # Examples
/// ```
/// use bridgeplot::palette::{girder_color, TAB10};
///
/// let five: Vec<_> = (0..5).map(|k| girder_color(k, 5)).collect();
/// assert_eq!(five, [TAB10[0], TAB10[2], TAB10[5], TAB10[7], TAB10[9]]);
/// assert_eq!(girder_color(0, 1), TAB10[0]);
/// ```
#[must_use]
pub fn girder_color(index: usize, count: usize) -> RGBColor {
    let last = TAB10.len() - 1;
    let slot = match count {
        0 | 1 => 0,
        _ => (index * TAB10.len() / (count - 1)).min(last),
    };
    TAB10[slot]
}
