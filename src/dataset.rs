//! Labeled access to the element end forces produced by the structural analysis.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use ndarray::Array2;
use serde::Deserialize;
use tracing::info;

use crate::errors::DatasetError;
use crate::topology::ElementId;

/// Name of the element dimension in the dataset file.
pub const ELEMENT_DIM: &str = "Element";
/// Name of the component dimension in the dataset file.
pub const COMPONENT_DIM: &str = "Component";

/// End of a beam element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum End {
    /// Start node of the element.
    I,
    /// End node of the element.
    J,
}

impl End {
    /// Suffix used in component labels.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            End::I => "i",
            End::J => "j",
        }
    }
}

/// Internal force quantity that can be drawn as a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ForceComponent {
    /// Bending moment about the local z-axis.
    Mz,
    /// Shear force along the local y-axis.
    Vy,
}

impl ForceComponent {
    /// Component name without the end suffix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ForceComponent::Mz => "Mz",
            ForceComponent::Vy => "Vy",
        }
    }

    /// Dataset label for this component at one element end, e.g. `Mz_i`.
    ///
    /// # Examples
    /// ```
    /// use bridgeplot::{End, ForceComponent};
    ///
    /// assert_eq!(ForceComponent::Vy.end_label(End::J), "Vy_j");
    /// ```
    #[must_use]
    pub fn end_label(self, end: End) -> String {
        format!("{}_{}", self.name(), end.suffix())
    }

    /// Human readable quantity name used on plot axes.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            ForceComponent::Mz => "Bending Moment",
            ForceComponent::Vy => "Shear Force",
        }
    }
}

impl fmt::Display for ForceComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// On-disk layout of a labeled force array.
#[derive(Debug, Deserialize)]
struct DatasetFile {
    /// Dimension names in array order.
    dims: Vec<String>,
    /// Labels along each dimension.
    coords: DatasetCoords,
    /// Values, nested in `dims` order.
    forces: Vec<Vec<f64>>,
}

/// Coordinate labels of the two dimensions.
#[derive(Debug, Deserialize)]
struct DatasetCoords {
    /// Element ids.
    #[serde(rename = "Element")]
    element: Vec<ElementId>,
    /// Component labels such as `Mz_i`.
    #[serde(rename = "Component")]
    component: Vec<String>,
}

/// Immutable table of element end forces indexed by element id and component label.
#[derive(Clone, Debug)]
pub struct ForceDataset {
    /// Element labels in row order.
    elements: Vec<ElementId>,
    /// Component labels in column order.
    components: Vec<String>,
    /// Row lookup by element id.
    element_index: HashMap<ElementId, usize>,
    /// Column lookup by component label.
    component_index: HashMap<String, usize>,
    /// The `forces` variable, shaped `(elements, components)`.
    forces: Array2<f64>,
}

impl ForceDataset {
    /// Build a dataset from labels and a values array shaped `(elements, components)`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::ShapeMismatch`] when `forces` does not match the label
    /// counts and [`DatasetError::DuplicateLabel`] when a label repeats.
    ///
    /// # Examples
    /// ```
    /// use bridgeplot::ForceDataset;
    /// use ndarray::array;
    ///
    /// let dataset = ForceDataset::from_parts(
    ///     vec![7],
    ///     vec!["Mz_i".to_string(), "Mz_j".to_string()],
    ///     array![[1.5, -2.0]],
    /// )
    /// .expect("valid dataset");
    /// assert_eq!(dataset.value(7, "Mz_j").expect("present"), -2.0);
    /// ```
    pub fn from_parts(
        elements: Vec<ElementId>,
        components: Vec<String>,
        forces: Array2<f64>,
    ) -> Result<Self, DatasetError> {
        let expected = (elements.len(), components.len());
        if forces.dim() != expected {
            return Err(DatasetError::ShapeMismatch {
                expected,
                found: forces.dim(),
            });
        }

        let mut element_index = HashMap::with_capacity(elements.len());
        for (row, &element) in elements.iter().enumerate() {
            if element_index.insert(element, row).is_some() {
                return Err(DatasetError::DuplicateLabel {
                    dim: ELEMENT_DIM,
                    label: element.to_string(),
                });
            }
        }
        let mut component_index = HashMap::with_capacity(components.len());
        for (column, component) in components.iter().enumerate() {
            if component_index.insert(component.clone(), column).is_some() {
                return Err(DatasetError::DuplicateLabel {
                    dim: COMPONENT_DIM,
                    label: component.clone(),
                });
            }
        }

        Ok(Self {
            elements,
            components,
            element_index,
            component_index,
            forces,
        })
    }

    /// Read a dataset from a JSON labeled-array file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] when the file cannot be read or parsed, or when its
    /// dimensions, shape or labels are invalid.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: DatasetFile =
            serde_json::from_str(&text).map_err(|source| DatasetError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let dataset = Self::from_file(file)?;
        info!(
            path = %path.display(),
            elements = dataset.element_count(),
            components = dataset.components.len(),
            "loaded force dataset"
        );
        Ok(dataset)
    }

    /// Parse a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// See [`ForceDataset::open`].
    pub fn from_json(text: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile =
            serde_json::from_str(text).map_err(|source| DatasetError::Parse {
                path: "<inline>".into(),
                source,
            })?;
        Self::from_file(file)
    }

    /// Validate the parsed file and index its labels.
    fn from_file(file: DatasetFile) -> Result<Self, DatasetError> {
        let DatasetFile {
            dims,
            coords,
            forces,
        } = file;

        let order: Vec<&str> = dims.iter().map(String::as_str).collect();
        let transposed = match order.as_slice() {
            [ELEMENT_DIM, COMPONENT_DIM] => Some(false),
            [COMPONENT_DIM, ELEMENT_DIM] => Some(true),
            _ => None,
        };
        let Some(transposed) = transposed else {
            return Err(DatasetError::UnexpectedDims(dims));
        };

        let (rows, columns) = if transposed {
            (coords.component.len(), coords.element.len())
        } else {
            (coords.element.len(), coords.component.len())
        };
        let found = (forces.len(), forces.first().map_or(0, Vec::len));
        if forces.len() != rows || forces.iter().any(|row| row.len() != columns) {
            return Err(DatasetError::ShapeMismatch {
                expected: (rows, columns),
                found,
            });
        }
        let flat: Vec<f64> = forces.into_iter().flatten().collect();
        let array = Array2::from_shape_vec((rows, columns), flat).map_err(|_| {
            DatasetError::ShapeMismatch {
                expected: (rows, columns),
                found,
            }
        })?;
        let array = if transposed {
            array.reversed_axes().as_standard_layout().into_owned()
        } else {
            array
        };

        Self::from_parts(coords.element, coords.component, array)
    }

    /// Number of elements in the dataset.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Element labels in dataset order.
    #[must_use]
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    /// Component labels in dataset order.
    #[must_use]
    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Whether the dataset has a record for `element`.
    #[must_use]
    pub fn contains_element(&self, element: ElementId) -> bool {
        self.element_index.contains_key(&element)
    }

    /// Scalar force at the selection `(element, component)`.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::UnknownElement`] or [`DatasetError::UnknownComponent`]
    /// when either label is absent.
    pub fn value(&self, element: ElementId, component: &str) -> Result<f64, DatasetError> {
        let row = *self
            .element_index
            .get(&element)
            .ok_or(DatasetError::UnknownElement(element))?;
        let column = *self
            .component_index
            .get(component)
            .ok_or_else(|| DatasetError::UnknownComponent(component.to_string()))?;
        Ok(self.forces[[row, column]])
    }

    /// The `_i` and `_j` values of `component` for one element.
    ///
    /// # Errors
    ///
    /// See [`ForceDataset::value`].
    pub fn end_values(
        &self,
        element: ElementId,
        component: ForceComponent,
    ) -> Result<(f64, f64), DatasetError> {
        Ok((
            self.value(element, &component.end_label(End::I))?,
            self.value(element, &component.end_label(End::J))?,
        ))
    }

    /// Describe dimensions, labels and value range of the dataset.
    #[must_use]
    pub fn describe(&self) -> DatasetSummary {
        let (min, max) = self
            .forces
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        DatasetSummary {
            element_count: self.elements.len(),
            components: self.components.clone(),
            range: (!self.forces.is_empty()).then_some((min, max)),
        }
    }
}

/// Overview of a loaded dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSummary {
    /// Length of the element dimension.
    pub element_count: usize,
    /// Component coordinate labels.
    pub components: Vec<String>,
    /// Smallest and largest force value, `None` when the array is empty.
    pub range: Option<(f64, f64)>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Dimensions: ({ELEMENT_DIM}: {}, {COMPONENT_DIM}: {})",
            self.element_count,
            self.components.len()
        )?;
        writeln!(f, "Components: {}", self.components.join(", "))?;
        match self.range {
            Some((min, max)) => write!(f, "forces: min = {min:.3}, max = {max:.3}"),
            None => write!(f, "forces: empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn sample() -> ForceDataset {
        ForceDataset::from_parts(
            vec![1, 2],
            labels(&["Mz_i", "Mz_j", "Vy_i", "Vy_j"]),
            array![[10.0, 20.0, 4.0, 6.0], [20.0, 30.0, 6.0, 8.0]],
        )
        .expect("valid dataset")
    }

    #[test]
    fn looks_up_values_by_label() {
        let dataset = sample();
        assert_eq!(dataset.elements(), [1, 2]);
        assert_eq!(dataset.components(), labels(&["Mz_i", "Mz_j", "Vy_i", "Vy_j"]));
        assert!(dataset.contains_element(2));
        assert!(!dataset.contains_element(99));
        assert_relative_eq!(dataset.value(2, "Mz_i").expect("present"), 20.0);
        assert_eq!(
            dataset.end_values(1, ForceComponent::Vy).expect("present"),
            (4.0, 6.0)
        );
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let dataset = sample();
        assert!(matches!(
            dataset.value(99, "Mz_i"),
            Err(DatasetError::UnknownElement(99))
        ));
        assert!(matches!(
            dataset.value(1, "Fx_i"),
            Err(DatasetError::UnknownComponent(ref c)) if c == "Fx_i"
        ));
    }

    #[test]
    fn shape_and_duplicates_are_checked() {
        let shape = ForceDataset::from_parts(vec![1], labels(&["Mz_i"]), array![[1.0, 2.0]])
            .expect_err("shape mismatch rejected");
        assert!(matches!(
            shape,
            DatasetError::ShapeMismatch {
                expected: (1, 1),
                found: (1, 2)
            }
        ));

        let duplicate = ForceDataset::from_parts(
            vec![3, 3],
            labels(&["Mz_i"]),
            array![[1.0], [2.0]],
        )
        .expect_err("duplicate element rejected");
        assert!(matches!(
            duplicate,
            DatasetError::DuplicateLabel { dim: ELEMENT_DIM, .. }
        ));
    }

    #[test]
    fn parses_json_in_either_dimension_order() {
        let element_major = r#"{
            "dims": ["Element", "Component"],
            "coords": {"Element": [5, 6], "Component": ["Vy_i", "Vy_j"]},
            "forces": [[1.0, 2.0], [3.0, 4.0]]
        }"#;
        let component_major = r#"{
            "dims": ["Component", "Element"],
            "coords": {"Element": [5, 6], "Component": ["Vy_i", "Vy_j"]},
            "forces": [[1.0, 3.0], [2.0, 4.0]]
        }"#;
        for text in [element_major, component_major] {
            let dataset = ForceDataset::from_json(text).expect("valid json");
            assert_eq!(dataset.elements(), [5, 6]);
            assert_eq!(dataset.components(), labels(&["Vy_i", "Vy_j"]));
            assert_eq!(dataset.end_values(6, ForceComponent::Vy).expect("present"), (3.0, 4.0));
        }
    }

    #[test]
    fn rejects_unexpected_dims() {
        let text = r#"{
            "dims": ["Node", "Component"],
            "coords": {"Element": [], "Component": []},
            "forces": []
        }"#;
        assert!(matches!(
            ForceDataset::from_json(text),
            Err(DatasetError::UnexpectedDims(_))
        ));
    }

    #[test]
    fn describes_contents() {
        let summary = sample().describe();
        assert_eq!(summary.element_count, 2);
        assert_eq!(summary.range, Some((4.0, 30.0)));
        let text = summary.to_string();
        assert!(text.contains("Element: 2"));
        assert!(text.contains("Mz_i, Mz_j, Vy_i, Vy_j"));
    }
}
