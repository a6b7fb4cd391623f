use nalgebra::Point2;

use super::topology::{Connectivity, RegionTag, Tri3Element};

/// Geometric information for the mesh
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Vertex coordinates
    pub nodes: Vec<Point2<f64>>,
}

impl Geometry {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn add_node(&mut self, x: f64, y: f64) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(Point2::new(x, y));
        idx
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_node(&self, idx: usize) -> Option<&Point2<f64>> {
        self.nodes.get(idx)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete mesh with geometry, connectivity and region tags
///
/// The analysis core holds the mesh immutably; it is built once by the mesh
/// generation collaborator and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub geometry: Geometry,
    pub connectivity: Connectivity,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            geometry: Geometry::new(),
            connectivity: Connectivity::new(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.geometry.num_nodes()
    }

    pub fn num_elements(&self) -> usize {
        self.connectivity.num_elements()
    }

    /// The region tag of a cell
    pub fn cell_region(&self, cell: usize) -> RegionTag {
        self.connectivity.cell_regions[cell]
    }

    /// The vertex coordinates of a cell
    pub fn cell_vertices(&self, elem: &Tri3Element) -> [Point2<f64>; 3] {
        [
            self.geometry.nodes[elem.nodes[0]],
            self.geometry.nodes[elem.nodes[1]],
            self.geometry.nodes[elem.nodes[2]],
        ]
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
