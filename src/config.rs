//! Input/output locations and display settings for a plotting run.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Pixel size and annotation settings shared by all figures.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FigureStyle {
    /// Size of the 2D diagrams in pixels.
    pub line_size: (u32, u32),
    /// Size of the 3D figures in pixels.
    pub spatial_size: (u32, u32),
    /// Draw captions, axis descriptions and tick labels.
    ///
    /// Text needs one of [`FigureStyle::font_paths`]; unannotated figures render
    /// anywhere.
    pub annotate: bool,
    /// TrueType fonts tried in order for labels.
    pub font_paths: Vec<PathBuf>,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            line_size: (1000, 400),
            spatial_size: (1500, 900),
            annotate: true,
            font_paths: [
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
                "/Library/Fonts/Arial.ttf",
                "C:\\Windows\\Fonts\\arial.ttf",
            ]
            .iter()
            .map(PathBuf::from)
            .collect(),
        }
    }
}

/// Settings for one run of the plotting pipeline.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Labeled force array.
    pub dataset_path: PathBuf,
    /// Node, element and girder tables.
    pub model_path: PathBuf,
    /// Directory receiving the images; created when absent.
    pub output_dir: PathBuf,
    /// Girder drawn in the 2D diagrams.
    pub central_girder: String,
    /// Display scale applied to shear forces in the 3D diagram.
    pub shear_scale: f64,
    /// Display scale applied to bending moments in the 3D diagram.
    pub moment_scale: f64,
    /// Figure appearance.
    pub style: FigureStyle,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/screening_task.json"),
            model_path: PathBuf::from("data/bridge_model.json"),
            output_dir: PathBuf::from("outputs"),
            central_girder: "girder_3".to_string(),
            shear_scale: 0.05,
            moment_scale: 0.02,
            style: FigureStyle::default(),
        }
    }
}

impl PlotConfig {
    /// Default configuration with the data and output paths placed under `root`.
    ///
    /// # Examples
    /// ```
    /// use bridgeplot::PlotConfig;
    /// use std::path::Path;
    ///
    /// let config = PlotConfig::with_root("/tmp/bridge");
    /// assert_eq!(config.output_dir, Path::new("/tmp/bridge/outputs"));
    /// ```
    #[must_use]
    pub fn with_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        let defaults = Self::default();
        Self {
            dataset_path: root.join(defaults.dataset_path),
            model_path: root.join(defaults.model_path),
            output_dir: root.join(defaults.output_dir),
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: PlotConfig =
            serde_json::from_str(r#"{"central_girder": "girder_1", "style": {"annotate": false}}"#)
                .expect("valid config");
        assert_eq!(config.central_girder, "girder_1");
        assert!(!config.style.annotate);
        assert_eq!(config.style.line_size, (1000, 400));
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
    }
}
