//! Node, element and girder tables of the bridge finite-element model.

use std::collections::HashMap;
use std::path::Path;

use petgraph::graph::{EdgeIndex, Graph, NodeIndex};
use serde::Deserialize;
use tracing::{debug, info};

use crate::dataset::{ForceComponent, ForceDataset};
use crate::errors::TopologyError;
use crate::geometry::Point;

/// Identifier of a beam element in the analysis model.
pub type ElementId = u32;
/// Identifier of a node in the analysis model.
pub type NodeId = u32;

/// Internal representation of a model node.
#[derive(Clone, Debug)]
struct Joint {
    /// Identifier from the analysis model.
    id: NodeId,
    /// Position of the node.
    position: Point,
}

/// Internal representation of a beam element.
#[derive(Clone, Debug)]
struct Member {
    /// Identifier from the analysis model.
    id: ElementId,
}

/// Named longitudinal line made of an ordered element sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Girder {
    /// Name of the girder.
    pub name: String,
    /// Elements in plotting order.
    pub elements: Vec<ElementId>,
}

/// On-disk layout of the bridge model.
#[derive(Debug, Deserialize)]
struct ModelFile {
    /// Node table.
    nodes: Vec<NodeRecord>,
    /// Element connectivity.
    members: Vec<MemberRecord>,
    /// Girder definitions in declaration order.
    girders: Vec<GirderRecord>,
}

/// One row of the node table.
#[derive(Debug, Deserialize)]
struct NodeRecord {
    /// Node id.
    id: NodeId,
    /// `[x, y, z]` coordinates.
    position: [f64; 3],
}

/// One row of the element table.
#[derive(Debug, Deserialize)]
struct MemberRecord {
    /// Element id.
    id: ElementId,
    /// `[i, j]` node ids.
    nodes: [NodeId; 2],
}

/// One girder definition.
#[derive(Debug, Deserialize)]
struct GirderRecord {
    /// Girder name.
    name: String,
    /// Element ids in plotting order.
    elements: Vec<ElementId>,
}

/// Read-only lookup tables describing the bridge: node coordinates, element
/// connectivity and the girders built from those elements.
///
/// Every element refers to existing nodes and every girder refers to existing
/// elements; the mutators reject anything else.
#[derive(Debug, Default)]
pub struct BridgeModel {
    /// Nodes as graph vertices and elements as edges from the `i` end to the `j` end.
    graph: Graph<Joint, Member>,
    /// Vertex lookup by node id.
    nodes: HashMap<NodeId, NodeIndex>,
    /// Edge lookup by element id.
    members: HashMap<ElementId, EdgeIndex>,
    /// Girders in declaration order.
    girders: Vec<Girder>,
}

impl BridgeModel {
    /// Create an empty model.
    ///
    /// # Examples
    /// ```
    /// use bridgeplot::BridgeModel;
    ///
    /// let model = BridgeModel::new();
    /// assert_eq!(model.node_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a model from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError`] when the file cannot be read or parsed, or when it
    /// contains duplicate or dangling references.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TopologyError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TopologyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ModelFile =
            serde_json::from_str(&text).map_err(|source| TopologyError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let model = Self::from_file(file)?;
        info!(
            path = %path.display(),
            nodes = model.node_count(),
            elements = model.element_count(),
            girders = model.girders.len(),
            "loaded bridge model"
        );
        Ok(model)
    }

    /// Parse a model from JSON text.
    ///
    /// # Errors
    ///
    /// See [`BridgeModel::open`].
    pub fn from_json(text: &str) -> Result<Self, TopologyError> {
        let file: ModelFile =
            serde_json::from_str(text).map_err(|source| TopologyError::Parse {
                path: "<inline>".into(),
                source,
            })?;
        Self::from_file(file)
    }

    /// Insert the records in dependency order: nodes, members, girders.
    fn from_file(file: ModelFile) -> Result<Self, TopologyError> {
        let mut model = Self::new();
        for node in file.nodes {
            model.add_node(node.id, node.position.into())?;
        }
        for member in file.members {
            let [start, end] = member.nodes;
            model.add_member(member.id, start, end)?;
        }
        for girder in file.girders {
            model.add_girder(girder.name, girder.elements)?;
        }
        Ok(model)
    }

    /// Return the number of nodes in the model.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of elements in the model.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a node at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateNode`] when `id` is already present.
    pub fn add_node(&mut self, id: NodeId, position: Point) -> Result<(), TopologyError> {
        if self.nodes.contains_key(&id) {
            return Err(TopologyError::DuplicateNode(id));
        }
        let index = self.graph.add_node(Joint { id, position });
        self.nodes.insert(id, index);
        Ok(())
    }

    /// Connect two existing nodes with an element running from `start` (`i` end)
    /// to `end` (`j` end).
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateElement`] when `id` is already present and
    /// [`TopologyError::UnknownNode`] when either node is missing.
    ///
    /// # Examples
    /// ```
    /// use bridgeplot::{point, BridgeModel, TopologyError};
    ///
    /// let mut model = BridgeModel::new();
    /// model.add_node(1, point(0.0, 0.0, 0.0)).expect("new node");
    /// let error = model.add_member(10, 1, 2).expect_err("node 2 is missing");
    /// assert!(matches!(error, TopologyError::UnknownNode { element: 10, node: 2 }));
    /// ```
    pub fn add_member(
        &mut self,
        id: ElementId,
        start: NodeId,
        end: NodeId,
    ) -> Result<(), TopologyError> {
        if self.members.contains_key(&id) {
            return Err(TopologyError::DuplicateElement(id));
        }
        let node_index = |node: NodeId| {
            self.nodes
                .get(&node)
                .copied()
                .ok_or(TopologyError::UnknownNode { element: id, node })
        };
        let a = node_index(start)?;
        let b = node_index(end)?;
        let edge = self.graph.add_edge(a, b, Member { id });
        self.members.insert(id, edge);
        Ok(())
    }

    /// Declare a girder made of existing elements, in plotting order.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateGirder`] when the name is taken and
    /// [`TopologyError::UnknownElement`] when an element is missing.
    pub fn add_girder<S: Into<String>>(
        &mut self,
        name: S,
        elements: Vec<ElementId>,
    ) -> Result<(), TopologyError> {
        let name = name.into();
        if self.girders.iter().any(|girder| girder.name == name) {
            return Err(TopologyError::DuplicateGirder(name));
        }
        if let Some(&element) = elements.iter().find(|&&e| !self.members.contains_key(&e)) {
            return Err(TopologyError::UnknownElement {
                girder: name,
                element,
            });
        }
        debug!(girder = %name, elements = elements.len(), "declared girder");
        self.girders.push(Girder { name, elements });
        Ok(())
    }

    /// Girders in declaration order.
    #[must_use]
    pub fn girders(&self) -> &[Girder] {
        &self.girders
    }

    /// Look up a girder by name.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::UnknownGirder`] when no girder has that name.
    pub fn girder(&self, name: &str) -> Result<&Girder, TopologyError> {
        self.girders
            .iter()
            .find(|girder| girder.name == name)
            .ok_or_else(|| TopologyError::UnknownGirder(name.to_string()))
    }

    /// Position of a node.
    #[must_use]
    pub fn node_position(&self, node: NodeId) -> Option<Point> {
        self.nodes
            .get(&node)
            .map(|&index| self.graph[index].position)
    }

    /// The `(i, j)` node ids of an element.
    #[must_use]
    pub fn element_nodes(&self, element: ElementId) -> Option<(NodeId, NodeId)> {
        let &edge = self.members.get(&element)?;
        let (a, b) = self.graph.edge_endpoints(edge)?;
        debug_assert_eq!(self.graph[edge].id, element);
        Some((self.graph[a].id, self.graph[b].id))
    }

    /// Coordinates of the `i` and `j` ends of an element.
    #[must_use]
    pub fn element_endpoints(&self, element: ElementId) -> Option<(Point, Point)> {
        let &edge = self.members.get(&element)?;
        let (a, b) = self.graph.edge_endpoints(edge)?;
        Some((self.graph[a].position, self.graph[b].position))
    }

    /// Check that every girder element has both end records of each component.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::MissingResults`] for the first element whose results
    /// cannot be found.
    pub fn check_results(
        &self,
        dataset: &ForceDataset,
        components: &[ForceComponent],
    ) -> Result<(), TopologyError> {
        for girder in &self.girders {
            for &element in &girder.elements {
                for &component in components {
                    dataset.end_values(element, component).map_err(|source| {
                        TopologyError::MissingResults {
                            girder: girder.name.clone(),
                            element,
                            source,
                        }
                    })?;
                }
            }
        }
        Ok(())
    }
}
