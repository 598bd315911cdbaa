#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod dataset;
pub mod diagram;
pub mod errors;
pub mod geometry;
pub mod palette;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod topology;

pub use config::{FigureStyle, PlotConfig};
pub use dataset::{DatasetSummary, End, ForceComponent, ForceDataset};
pub use diagram::{
    end_average, extrusion_offset, GirderDiagram, GirderSegments, Segment, SegmentView,
};
pub use errors::{DatasetError, PlotError, RenderError, TopologyError};
pub use geometry::{point, Bounds, Point};
pub use pipeline::{run, RunSummary};
pub use report::render_summary;
pub use topology::{BridgeModel, ElementId, Girder, NodeId};
