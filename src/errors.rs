//! Error types produced while loading results, building topology or drawing figures.

use std::path::PathBuf;

use thiserror::Error;

use crate::topology::{ElementId, NodeId};

/// Error returned when the force dataset cannot be loaded or queried.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Returned when the dataset file cannot be read.
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        /// Path of the dataset file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the dataset file is not valid JSON for a labeled array.
    #[error("failed to parse dataset {}: {source}", .path.display())]
    Parse {
        /// Path of the dataset file.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// Returned when the dimensions are not `Element` and `Component`.
    #[error("dataset dimensions must be Element and Component (found {0:?})")]
    UnexpectedDims(Vec<String>),
    /// Returned when the `forces` variable does not match the coordinate lengths.
    #[error("forces has shape {found:?} but coordinates imply {expected:?}")]
    ShapeMismatch {
        /// Shape implied by the element and component coordinates.
        expected: (usize, usize),
        /// Shape of the supplied array.
        found: (usize, usize),
    },
    /// Returned when a coordinate label appears more than once.
    #[error("duplicate {dim} label {label}")]
    DuplicateLabel {
        /// Dimension holding the duplicate.
        dim: &'static str,
        /// Offending label.
        label: String,
    },
    /// Returned when an element is not present in the dataset.
    #[error("element {0} is not present in the dataset")]
    UnknownElement(ElementId),
    /// Returned when a component is not present in the dataset.
    #[error("component {0} is not present in the dataset")]
    UnknownComponent(String),
}

/// Error returned when the bridge model is inconsistent.
///
/// Building a [`BridgeModel`](crate::BridgeModel) with references to missing nodes or
/// elements returns a descriptive variant instead of silently dropping the entry.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// Returned when the model file cannot be read.
    #[error("failed to read bridge model {}: {source}", .path.display())]
    Io {
        /// Path of the model file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the model file is not valid JSON.
    #[error("failed to parse bridge model {}: {source}", .path.display())]
    Parse {
        /// Path of the model file.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// Returned when a node id is declared twice.
    #[error("node {0} is declared more than once")]
    DuplicateNode(NodeId),
    /// Returned when an element id is declared twice.
    #[error("element {0} is declared more than once")]
    DuplicateElement(ElementId),
    /// Returned when a girder name is declared twice.
    #[error("girder {0} is declared more than once")]
    DuplicateGirder(String),
    /// Returned when an element references a node that does not exist.
    #[error("element {element} references unknown node {node}")]
    UnknownNode {
        /// Element holding the reference.
        element: ElementId,
        /// Missing node.
        node: NodeId,
    },
    /// Returned when a girder references an element that does not exist.
    #[error("girder {girder} references unknown element {element}")]
    UnknownElement {
        /// Girder holding the reference.
        girder: String,
        /// Missing element.
        element: ElementId,
    },
    /// Returned when a girder name cannot be found.
    #[error("girder {0} does not exist in this model")]
    UnknownGirder(String),
    /// Returned when a girder element has no matching force record.
    #[error("girder {girder}, element {element}: {source}")]
    MissingResults {
        /// Girder holding the element.
        girder: String,
        /// Element whose results are missing.
        element: ElementId,
        /// Lookup failure reported by the dataset.
        #[source]
        source: DatasetError,
    },
}

/// Error returned when a figure cannot be written.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Returned when the output directory cannot be created.
    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when a figure has nothing to draw.
    #[error("figure {0} has no data to draw")]
    EmptyFigure(String),
    /// Returned when the drawing backend fails.
    #[error("failed to draw {}: {message}", .path.display())]
    Backend {
        /// Image being drawn.
        path: PathBuf,
        /// Backend error message.
        message: String,
    },
}

/// Any failure of a full plotting run.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Dataset loading or lookup failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Bridge model loading or validation failed.
    #[error(transparent)]
    Topology(#[from] TopologyError),
    /// Writing a figure failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}
