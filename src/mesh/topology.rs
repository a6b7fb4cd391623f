use nalgebra::Vector2;

/// Integer label partitioning mesh cells into material domains.
///
/// Values {1, 2, 3} denote {matrix, inclusion-A, inclusion-B}. Tag 0 denotes
/// "whole domain" and is reserved: it must never appear as a concrete cell
/// tag.
pub type RegionTag = u32;

/// Region tag for the matrix material
pub const REGION_MATRIX: RegionTag = 1;
/// Region tag for the first (stiff) inclusion
pub const REGION_INCLUSION_A: RegionTag = 2;
/// Region tag for the second (soft) inclusion
pub const REGION_INCLUSION_B: RegionTag = 3;

/// A 3-node linear triangular element (Tri3)
///
/// Node numbering: the three vertices in counter-clockwise order, so the
/// signed area of the affine map is positive for a well-formed cell.
#[derive(Debug, Clone)]
pub struct Tri3Element {
    /// Global vertex indices for this element
    pub nodes: [usize; 3],
}

impl Tri3Element {
    pub fn new(nodes: [usize; 3]) -> Self {
        Self { nodes }
    }

    /// Get edges as pairs of local vertex indices
    pub fn edges() -> [(usize, usize); 3] {
        [(0, 1), (1, 2), (2, 0)]
    }
}

/// Boundary regions of the rectangular domain
///
/// The facet tags 1..4 map to the four sides; 0 marks an untagged (free)
/// facet. Traction is prescribed on Left and Right only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundarySide {
    Left = 1,
    Right = 2,
    Top = 3,
    Bottom = 4,
}

impl BoundarySide {
    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            1 => Some(Self::Left),
            2 => Some(Self::Right),
            3 => Some(Self::Top),
            4 => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Whether a traction load is prescribed on this side
    pub fn carries_traction(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// A boundary facet: an edge of the mesh lying on the domain boundary
#[derive(Debug, Clone)]
pub struct BoundaryFacet {
    /// Global vertex indices of the edge endpoints
    pub nodes: [usize; 2],
    /// Outward unit normal of the facet
    pub normal: Vector2<f64>,
    /// Boundary region tag: 0 = untagged/free, 1..4 = Left/Right/Top/Bottom
    pub tag: u32,
}

/// Connectivity information for the mesh
#[derive(Debug, Clone)]
pub struct Connectivity {
    pub tri3_elements: Vec<Tri3Element>,
    /// Region tag per cell, parallel to `tri3_elements`
    pub cell_regions: Vec<RegionTag>,
    /// Boundary facets with outward normals and side tags
    pub facets: Vec<BoundaryFacet>,
}

impl Connectivity {
    pub fn new() -> Self {
        Self {
            tri3_elements: Vec::new(),
            cell_regions: Vec::new(),
            facets: Vec::new(),
        }
    }

    pub fn add_element(&mut self, nodes: [usize; 3], region: RegionTag) -> usize {
        let idx = self.tri3_elements.len();
        self.tri3_elements.push(Tri3Element::new(nodes));
        self.cell_regions.push(region);
        idx
    }

    pub fn num_elements(&self) -> usize {
        self.tri3_elements.len()
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new()
    }
}
