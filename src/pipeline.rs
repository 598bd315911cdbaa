//! The full plotting run: load, check, build diagrams, draw.

use std::path::PathBuf;

use plotters::style::RGBColor;
use tracing::{info, warn};

use crate::config::{FigureStyle, PlotConfig};
use crate::dataset::{DatasetSummary, ForceComponent, ForceDataset};
use crate::diagram::{GirderDiagram, SegmentView};
use crate::errors::PlotError;
use crate::render::{
    ensure_output_dir, register_label_font, render_line_diagram, render_segments_3d,
    LineFigure, SpatialFigure,
};
use crate::topology::BridgeModel;

/// Bending-moment diagram of the central girder.
pub const CENTRAL_BMD_FILE: &str = "central_girder_bmd.png";
/// Shear-force diagram of the central girder.
pub const CENTRAL_SFD_FILE: &str = "central_girder_sfd.png";
/// 3D geometry of all girders.
pub const GEOMETRY_FILE: &str = "bridge_geometry.png";
/// 3D extruded shear-force diagram.
pub const SFD_3D_FILE: &str = "bridge_3d_sfd.png";
/// 3D extruded bending-moment diagram.
pub const BMD_3D_FILE: &str = "bridge_3d_bmd.png";

/// Line colour of the 2D moment diagram.
const MOMENT_COLOR: RGBColor = RGBColor(31, 119, 180);
/// Line colour of the 2D shear diagram.
const SHEAR_COLOR: RGBColor = RGBColor(255, 127, 14);

/// What a completed run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Description of the loaded dataset.
    pub dataset: DatasetSummary,
    /// Girder drawn in the 2D diagrams.
    pub central_girder: String,
    /// Number of elements along the central girder.
    pub central_elements: usize,
    /// Number of girders in the 3D figures.
    pub girder_count: usize,
    /// Images written, in drawing order.
    pub outputs: Vec<PathBuf>,
}

/// Load the inputs named by `config` and write all five figures.
///
/// Every girder element is checked against the dataset before anything is drawn.
///
/// # Errors
///
/// Returns [`PlotError`] on the first failure while loading, checking or drawing.
pub fn run(config: &PlotConfig) -> Result<RunSummary, PlotError> {
    let dataset = ForceDataset::open(&config.dataset_path)?;
    let summary = dataset.describe();

    let model = BridgeModel::open(&config.model_path)?;
    let central = model.girder(&config.central_girder)?;
    model.check_results(&dataset, &[ForceComponent::Mz, ForceComponent::Vy])?;

    let style = resolve_style(&config.style);
    ensure_output_dir(&config.output_dir)?;
    let mut outputs = Vec::with_capacity(5);

    let diagram = GirderDiagram::build(&dataset, central)?;
    info!(
        girder = %central.name,
        stations = diagram.positions.len(),
        "built central girder diagram"
    );
    for (component, file, color) in [
        (ForceComponent::Mz, CENTRAL_BMD_FILE, MOMENT_COLOR),
        (ForceComponent::Vy, CENTRAL_SFD_FILE, SHEAR_COLOR),
    ] {
        let title = format!("{} Diagram (Central Girder)", component.description());
        let y_desc = format!("{} ({component})", component.description());
        let points = diagram.points(component);
        let path = config.output_dir.join(file);
        render_line_diagram(
            &path,
            &LineFigure {
                title: &title,
                x_desc: "Element Sequence",
                y_desc: &y_desc,
                points: &points,
                color,
            },
            &style,
        )?;
        outputs.push(path);
    }

    let geometry = SegmentView::geometry(&model)?;
    let path = config.output_dir.join(GEOMETRY_FILE);
    render_segments_3d(
        &path,
        &SpatialFigure {
            title: "Bridge Geometry with Highlighted Girders",
            axes: ["X", "Y", "Z"],
            view: &geometry,
        },
        &style,
    )?;
    outputs.push(path);

    for (component, scale, file, title) in [
        (
            ForceComponent::Vy,
            config.shear_scale,
            SFD_3D_FILE,
            "3D Shear Force Diagram (SFD)",
        ),
        (
            ForceComponent::Mz,
            config.moment_scale,
            BMD_3D_FILE,
            "3D Bending Moment Diagram (BMD)",
        ),
    ] {
        let view = SegmentView::extrusion(&model, &dataset, component, scale)?;
        let y_axis = format!("{} ({component})", component.description());
        let path = config.output_dir.join(file);
        render_segments_3d(
            &path,
            &SpatialFigure {
                title,
                axes: ["X", &y_axis, "Z"],
                view: &view,
            },
            &style,
        )?;
        outputs.push(path);
    }

    Ok(RunSummary {
        dataset: summary,
        central_girder: central.name.clone(),
        central_elements: central.elements.len(),
        girder_count: model.girders().len(),
        outputs,
    })
}

/// Drop annotations when no label font can be loaded.
fn resolve_style(style: &FigureStyle) -> FigureStyle {
    let mut style = style.clone();
    if style.annotate && register_label_font(&style.font_paths).is_none() {
        warn!("no label font found; drawing figures without text");
        style.annotate = false;
    }
    style
}
