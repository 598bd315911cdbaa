//! Drawing the diagrams to PNG files with the plotters bitmap backend.

use std::fmt::Display;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use tracing::{debug, info};

use crate::config::FigureStyle;
use crate::diagram::SegmentView;
use crate::errors::RenderError;
use crate::geometry::Bounds;
use crate::palette::girder_color;

/// A single 2D line series with circle markers at every station.
#[derive(Clone, Debug)]
pub struct LineFigure<'a> {
    /// Figure caption.
    pub title: &'a str,
    /// Horizontal axis description.
    pub x_desc: &'a str,
    /// Vertical axis description.
    pub y_desc: &'a str,
    /// Points in drawing order.
    pub points: &'a [(f64, f64)],
    /// Line and marker colour.
    pub color: RGBColor,
}

/// A set of coloured 3D segments.
#[derive(Clone, Debug)]
pub struct SpatialFigure<'a> {
    /// Figure caption.
    pub title: &'a str,
    /// Names of the X, Y and Z axes.
    pub axes: [&'a str; 3],
    /// Segments grouped by girder.
    pub view: &'a SegmentView,
}

/// Create `dir` and any missing parents.
///
/// # Errors
///
/// Returns [`RenderError::OutputDir`] when the directory cannot be created.
pub fn ensure_output_dir(dir: &Path) -> Result<(), RenderError> {
    std::fs::create_dir_all(dir).map_err(|source| RenderError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Font registered as `sans-serif`, set by the first successful registration.
static LABEL_FONT: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Register the first readable font in `candidates` as the `sans-serif` family used
/// by every caption and label, returning its path.
///
/// Registration happens at most once per process; later calls return the font
/// already registered without touching `candidates`.
pub fn register_label_font(candidates: &[PathBuf]) -> Option<PathBuf> {
    let mut registered = LABEL_FONT.lock().unwrap_or_else(PoisonError::into_inner);
    if registered.is_none() {
        *registered = candidates.iter().find_map(|path| {
            let bytes = std::fs::read(path).ok()?;
            // The font table keeps `'static` references.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            register_font("sans-serif", FontStyle::Normal, bytes).ok()?;
            debug!(font = %path.display(), "registered label font");
            Some(path.clone())
        });
    }
    registered.clone()
}

/// Map a plotters failure on `path` to [`RenderError::Backend`].
fn backend_error<E: Display>(path: &Path) -> impl Fn(E) -> RenderError + '_ {
    move |err| RenderError::Backend {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Range covering `values` plus a margin; never empty.
fn axis_range<I: IntoIterator<Item = f64>>(values: I, margin: f64) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let extent = hi - lo;
    let pad = if extent > 0.0 { extent * margin } else { 1.0 };
    (lo - pad)..(hi + pad)
}

/// Draw a line diagram with markers and a grid.
///
/// # Errors
///
/// Returns [`RenderError::EmptyFigure`] when there are no points and
/// [`RenderError::Backend`] when drawing or saving fails.
pub fn render_line_diagram(
    path: &Path,
    figure: &LineFigure<'_>,
    style: &FigureStyle,
) -> Result<(), RenderError> {
    if figure.points.is_empty() {
        return Err(RenderError::EmptyFigure(figure.title.to_string()));
    }
    let err = backend_error(path);
    let x_range = axis_range(figure.points.iter().map(|p| p.0), 0.02);
    let y_range = axis_range(figure.points.iter().map(|p| p.1), 0.1);

    let root = BitMapBackend::new(path, style.line_size).into_drawing_area();
    root.fill(&WHITE).map_err(&err)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if style.annotate {
        builder
            .caption(figure.title, ("sans-serif", 24))
            .x_label_area_size(40)
            .y_label_area_size(70);
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(&err)?;

    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(BLACK.mix(0.08));
    if style.annotate {
        mesh.x_desc(figure.x_desc).y_desc(figure.y_desc);
    }
    mesh.draw().map_err(&err)?;

    chart
        .draw_series(LineSeries::new(
            figure.points.iter().copied(),
            figure.color.stroke_width(2),
        ))
        .map_err(&err)?;
    chart
        .draw_series(
            figure
                .points
                .iter()
                .map(|&p| Circle::new(p, 4, figure.color.filled())),
        )
        .map_err(&err)?;

    root.present().map_err(&err)?;
    info!(path = %path.display(), points = figure.points.len(), "wrote line diagram");
    Ok(())
}

/// Draw coloured 3D segments inside a bounding axis box.
///
/// # Errors
///
/// Returns [`RenderError::EmptyFigure`] when the view has no segments and
/// [`RenderError::Backend`] when drawing or saving fails.
pub fn render_segments_3d(
    path: &Path,
    figure: &SpatialFigure<'_>,
    style: &FigureStyle,
) -> Result<(), RenderError> {
    let bounds = Bounds::enclosing(figure.view.points())
        .ok_or_else(|| RenderError::EmptyFigure(figure.title.to_string()))?
        .padded(0.05);
    let err = backend_error(path);

    let root = BitMapBackend::new(path, style.spatial_size).into_drawing_area();
    root.fill(&WHITE).map_err(&err)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if style.annotate {
        builder.caption(figure.title, ("sans-serif", 28));
    }
    let mut chart = builder
        .build_cartesian_3d(
            bounds.min.x..bounds.max.x,
            bounds.min.y..bounds.max.y,
            bounds.min.z..bounds.max.z,
        )
        .map_err(&err)?;
    chart.with_projection(|mut pb| {
        pb.yaw = 0.6;
        pb.pitch = 0.35;
        pb.scale = 0.85;
        pb.into_matrix()
    });

    if style.annotate {
        chart
            .configure_axes()
            .light_grid_style(BLACK.mix(0.1))
            .max_light_lines(4)
            .draw()
            .map_err(&err)?;

        let [x_name, y_name, z_name] = figure.axes;
        let (lo, hi) = (bounds.min, bounds.max);
        let label = ("sans-serif", 18).into_font().color(&BLACK);
        chart
            .draw_series([
                Text::new(x_name.to_string(), (hi.x, lo.y, lo.z), label.clone()),
                Text::new(y_name.to_string(), (lo.x, hi.y, lo.z), label.clone()),
                Text::new(z_name.to_string(), (lo.x, lo.y, hi.z), label),
            ])
            .map_err(&err)?;
    }

    let girder_count = figure.view.girders.len();
    for girder in &figure.view.girders {
        let color = girder_color(girder.color_index, girder_count);
        chart
            .draw_series(girder.segments.iter().map(|segment| {
                PathElement::new(
                    vec![segment.start.as_tuple(), segment.end.as_tuple()],
                    color.stroke_width(3),
                )
            }))
            .map_err(&err)?;
    }

    root.present().map_err(&err)?;
    info!(
        path = %path.display(),
        segments = figure.view.segment_count(),
        "wrote 3D figure"
    );
    Ok(())
}
