//! Plot-ready coordinates for the girder force diagrams.
//!
//! Builders here only index into the results and do the small amount of arithmetic
//! the figures need (endpoint averaging and display scaling); drawing happens in
//! [`crate::render`].

use crate::dataset::{ForceComponent, ForceDataset};
use crate::errors::{DatasetError, TopologyError};
use crate::geometry::Point;
use crate::topology::{BridgeModel, ElementId, Girder};

/// Bending-moment and shear-force values along one girder.
///
/// Each element contributes two stations, its `i` end at `pos` and its `j` end at
/// `pos + 1`, so interior stations appear twice and force jumps stay visible.
#[derive(Clone, Debug, PartialEq)]
pub struct GirderDiagram {
    /// Name of the girder.
    pub girder: String,
    /// Station positions shared by both series.
    pub positions: Vec<f64>,
    /// `Mz` at each station.
    pub moment: Vec<f64>,
    /// `Vy` at each station.
    pub shear: Vec<f64>,
}

impl GirderDiagram {
    /// Walk the girder's elements in order and collect the unmodified end values.
    ///
    /// # Errors
    ///
    /// Returns the [`DatasetError`] of the first failed lookup.
    ///
    /// # Examples
    /// ```
    /// use bridgeplot::{ForceDataset, Girder, GirderDiagram};
    /// use ndarray::array;
    ///
    /// let labels = ["Mz_i", "Mz_j", "Vy_i", "Vy_j"].map(String::from).to_vec();
    /// let dataset =
    ///     ForceDataset::from_parts(vec![1], labels, array![[0.0, 5.0, 2.0, 2.0]]).unwrap();
    /// let girder = Girder { name: "g".into(), elements: vec![1] };
    /// let diagram = GirderDiagram::build(&dataset, &girder).unwrap();
    /// assert_eq!(diagram.positions, vec![0.0, 1.0]);
    /// assert_eq!(diagram.moment, vec![0.0, 5.0]);
    /// ```
    pub fn build(dataset: &ForceDataset, girder: &Girder) -> Result<Self, DatasetError> {
        let capacity = girder.elements.len() * 2;
        let mut diagram = Self {
            girder: girder.name.clone(),
            positions: Vec::with_capacity(capacity),
            moment: Vec::with_capacity(capacity),
            shear: Vec::with_capacity(capacity),
        };

        for (pos, &element) in girder.elements.iter().enumerate() {
            let (mz_i, mz_j) = dataset.end_values(element, ForceComponent::Mz)?;
            let (vy_i, vy_j) = dataset.end_values(element, ForceComponent::Vy)?;
            let pos = pos as f64;
            diagram.positions.extend([pos, pos + 1.0]);
            diagram.moment.extend([mz_i, mz_j]);
            diagram.shear.extend([vy_i, vy_j]);
        }
        Ok(diagram)
    }

    /// Values of one component, aligned with [`GirderDiagram::positions`].
    #[must_use]
    pub fn values(&self, component: ForceComponent) -> &[f64] {
        match component {
            ForceComponent::Mz => &self.moment,
            ForceComponent::Vy => &self.shear,
        }
    }

    /// `(position, value)` pairs of one component, ready for a line plot.
    #[must_use]
    pub fn points(&self, component: ForceComponent) -> Vec<(f64, f64)> {
        self.positions
            .iter()
            .copied()
            .zip(self.values(component).iter().copied())
            .collect()
    }
}

/// Mean of the `i` and `j` end values, the element's midpoint value.
///
/// # Examples
/// ```
/// assert_eq!(bridgeplot::end_average(4.0, 6.0), 5.0);
/// ```
#[must_use]
pub fn end_average(i: f64, j: f64) -> f64 {
    0.5 * (i + j)
}

/// Display length of a force value at the given scale.
#[must_use]
pub fn extrusion_offset(value: f64, scale: f64) -> f64 {
    value * scale
}

/// Straight line between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// First point.
    pub start: Point,
    /// Second point.
    pub end: Point,
}

/// All segments belonging to one girder.
#[derive(Clone, Debug, PartialEq)]
pub struct GirderSegments {
    /// Name of the girder.
    pub girder: String,
    /// Position of the girder in declaration order; selects its colour.
    pub color_index: usize,
    /// Segments in element order.
    pub segments: Vec<Segment>,
}

/// Line segments grouped by girder, for one 3D figure.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentView {
    /// Girders in declaration order.
    pub girders: Vec<GirderSegments>,
}

impl SegmentView {
    /// Every segment end point, used to size the axes.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.girders
            .iter()
            .flat_map(|girder| girder.segments.iter())
            .flat_map(|segment| [segment.start, segment.end])
    }

    /// Total number of segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.girders.iter().map(|g| g.segments.len()).sum()
    }

    /// Bridge geometry: one segment per element between its two nodes.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownElement`] if a girder element has no
    /// connectivity.
    pub fn geometry(model: &BridgeModel) -> Result<Self, TopologyError> {
        Self::per_element(model, |girder, element| {
            let (start, end) = endpoints(model, girder, element)?;
            Ok(Segment { start, end })
        })
    }

    /// Extruded force diagram: for every element a vertical segment from the element
    /// midpoint, offset along global Y by the scaled average of the end values.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::MissingResults`] when the dataset lacks an element's
    /// values and [`TopologyError::UnknownElement`] when connectivity is missing.
    pub fn extrusion(
        model: &BridgeModel,
        dataset: &ForceDataset,
        component: ForceComponent,
        scale: f64,
    ) -> Result<Self, TopologyError> {
        Self::per_element(model, |girder, element| {
            let (start, end) = endpoints(model, girder, element)?;
            let midpoint = start.midpoint(end);
            let (i, j) = dataset.end_values(element, component).map_err(|source| {
                TopologyError::MissingResults {
                    girder: girder.name.clone(),
                    element,
                    source,
                }
            })?;
            let offset = extrusion_offset(end_average(i, j), scale);
            Ok(Segment {
                start: midpoint,
                end: midpoint.offset_y(offset),
            })
        })
    }

    /// Collect one segment per girder element, tagging each girder with its colour index.
    fn per_element<F>(model: &BridgeModel, mut segment: F) -> Result<Self, TopologyError>
    where
        F: FnMut(&Girder, ElementId) -> Result<Segment, TopologyError>,
    {
        let girders = model
            .girders()
            .iter()
            .enumerate()
            .map(|(color_index, girder)| {
                let segments = girder
                    .elements
                    .iter()
                    .map(|&element| segment(girder, element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, TopologyError>(GirderSegments {
                    girder: girder.name.clone(),
                    color_index,
                    segments,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { girders })
    }
}

/// Node coordinates of `element`, reported against `girder` when missing.
fn endpoints(
    model: &BridgeModel,
    girder: &Girder,
    element: ElementId,
) -> Result<(Point, Point), TopologyError> {
    model
        .element_endpoints(element)
        .ok_or_else(|| TopologyError::UnknownElement {
            girder: girder.name.clone(),
            element,
        })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;
    use crate::geometry::point;

    fn dataset() -> ForceDataset {
        ForceDataset::from_parts(
            vec![1, 2, 3],
            ["Mz_i", "Mz_j", "Vy_i", "Vy_j"].map(String::from).to_vec(),
            array![
                [10.0, 20.0, 4.0, 6.0],
                [20.0, 30.0, 6.0, 8.0],
                [100.0, 100.0, -2.0, -2.0]
            ],
        )
        .expect("valid dataset")
    }

    fn model() -> BridgeModel {
        let mut model = BridgeModel::new();
        model.add_node(1, point(0.0, 0.0, 0.0)).expect("new node");
        model.add_node(2, point(2.0, 0.0, 0.0)).expect("new node");
        model.add_node(3, point(4.0, 0.0, 0.0)).expect("new node");
        model.add_node(4, point(0.0, 0.0, 3.0)).expect("new node");
        model.add_node(5, point(4.0, 0.0, 3.0)).expect("new node");
        model.add_member(1, 1, 2).expect("valid member");
        model.add_member(2, 2, 3).expect("valid member");
        model.add_member(3, 4, 5).expect("valid member");
        model.add_girder("inner", vec![1, 2]).expect("valid girder");
        model.add_girder("outer", vec![3]).expect("valid girder");
        model
    }

    #[test]
    fn concatenates_end_values_without_deduplication() {
        let girder = Girder {
            name: "central".into(),
            elements: vec![1, 2],
        };
        let diagram = GirderDiagram::build(&dataset(), &girder).expect("results present");
        assert_eq!(diagram.moment, vec![10.0, 20.0, 20.0, 30.0]);
        assert_eq!(diagram.shear, vec![4.0, 6.0, 6.0, 8.0]);
        assert_eq!(diagram.positions, vec![0.0, 1.0, 1.0, 2.0]);
        assert_eq!(
            diagram.points(ForceComponent::Mz),
            vec![(0.0, 10.0), (1.0, 20.0), (1.0, 20.0), (2.0, 30.0)]
        );
    }

    #[test]
    fn missing_element_aborts_the_diagram() {
        let girder = Girder {
            name: "central".into(),
            elements: vec![1, 42],
        };
        assert!(matches!(
            GirderDiagram::build(&dataset(), &girder),
            Err(DatasetError::UnknownElement(42))
        ));
    }

    #[test]
    fn averages_and_scales() {
        assert_relative_eq!(end_average(4.0, 6.0), 5.0);
        assert_relative_eq!(extrusion_offset(100.0, 0.02), 2.0);
    }

    #[test]
    fn geometry_follows_element_connectivity() {
        let view = SegmentView::geometry(&model()).expect("consistent model");
        assert_eq!(view.segment_count(), 3);
        assert_eq!(view.girders[0].girder, "inner");
        assert_eq!(view.girders[1].color_index, 1);
        assert_eq!(
            view.girders[1].segments[0],
            Segment {
                start: point(0.0, 0.0, 3.0),
                end: point(4.0, 0.0, 3.0),
            }
        );
    }

    #[test]
    fn extrusion_rises_from_the_element_midpoint() {
        let view = SegmentView::extrusion(&model(), &dataset(), ForceComponent::Vy, 0.05)
            .expect("results present");
        let first = view.girders[0].segments[0];
        assert_eq!(first.start, point(1.0, 0.0, 0.0));
        assert_relative_eq!(first.end.y, 0.25, epsilon = 1.0e-12);
        assert_relative_eq!(first.end.x, 1.0);
        assert_relative_eq!(first.end.z, 0.0);

        let moment = SegmentView::extrusion(&model(), &dataset(), ForceComponent::Mz, 0.02)
            .expect("results present");
        let outer = moment.girders[1].segments[0];
        assert_eq!(outer.start, point(2.0, 0.0, 3.0));
        assert_relative_eq!(outer.end.y, 2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn extrusion_reports_missing_results() {
        let sparse = ForceDataset::from_parts(
            vec![1],
            ["Vy_i", "Vy_j"].map(String::from).to_vec(),
            array![[1.0, 1.0]],
        )
        .expect("valid dataset");
        let error = SegmentView::extrusion(&model(), &sparse, ForceComponent::Vy, 1.0)
            .expect_err("element 2 missing");
        assert!(matches!(
            error,
            TopologyError::MissingResults { element: 2, .. }
        ));
    }
}
