pub mod fields;
pub mod geometry;
pub mod topology;

pub use fields::{ScalarField, VectorField};
pub use geometry::Mesh;
pub use topology::{
    BoundaryFacet, BoundarySide, Connectivity, RegionTag, Tri3Element, REGION_INCLUSION_A,
    REGION_INCLUSION_B, REGION_MATRIX,
};
