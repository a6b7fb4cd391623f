use std::collections::HashMap;

use nalgebra::{Point2, Vector2};

use crate::mesh::{
    BoundaryFacet, BoundarySide, Mesh, RegionTag, REGION_INCLUSION_A, REGION_INCLUSION_B,
    REGION_MATRIX,
};

/// Half-width of the square analysis domain [-0.5, 0.5]²
const DOMAIN_HALF_WIDTH: f64 = 0.5;

/// Center and radius of the stiff inclusion
const INCLUSION_A_CENTER: (f64, f64) = (-0.2, 0.15);
const INCLUSION_A_RADIUS: f64 = 0.15;

/// Center and radius of the soft inclusion
const INCLUSION_B_CENTER: (f64, f64) = (0.2, -0.15);
const INCLUSION_B_RADIUS: f64 = 0.12;

/// Structured mesh generator for the benchmark domain
///
/// Builds a regular grid of counter-clockwise Tri3 cells on the square
/// [-0.5, 0.5]², tags each cell by which inclusion circle (if any) contains
/// its centroid, and extracts the boundary facets with outward normals and
/// side tags.
pub struct MeshGenerator;

impl MeshGenerator {
    /// Generate the two-inclusion benchmark mesh
    ///
    /// # Arguments
    /// * `nx`, `ny` - Number of grid divisions in each direction
    pub fn unit_square_with_inclusions(nx: usize, ny: usize) -> Mesh {
        Self::structured(nx, ny, |centroid| {
            if Self::inside_circle(centroid, INCLUSION_A_CENTER, INCLUSION_A_RADIUS) {
                REGION_INCLUSION_A
            } else if Self::inside_circle(centroid, INCLUSION_B_CENTER, INCLUSION_B_RADIUS) {
                REGION_INCLUSION_B
            } else {
                REGION_MATRIX
            }
        })
    }

    /// Generate the same grid with every cell tagged as matrix material
    pub fn unit_square_homogeneous(nx: usize, ny: usize) -> Mesh {
        Self::structured(nx, ny, |_| REGION_MATRIX)
    }

    fn inside_circle(p: Point2<f64>, center: (f64, f64), radius: f64) -> bool {
        let dx = p.x - center.0;
        let dy = p.y - center.1;
        dx * dx + dy * dy < radius * radius
    }

    fn structured<F>(nx: usize, ny: usize, classify: F) -> Mesh
    where
        F: Fn(Point2<f64>) -> RegionTag,
    {
        let mut mesh = Mesh::new();

        let dx = 2.0 * DOMAIN_HALF_WIDTH / nx as f64;
        let dy = 2.0 * DOMAIN_HALF_WIDTH / ny as f64;

        // Structured grid of vertices, row-major
        for iy in 0..=ny {
            for ix in 0..=nx {
                let x = -DOMAIN_HALF_WIDTH + ix as f64 * dx;
                let y = -DOMAIN_HALF_WIDTH + iy as f64 * dy;
                mesh.geometry.add_node(x, y);
            }
        }

        let vertex = |ix: usize, iy: usize| iy * (nx + 1) + ix;

        // Two counter-clockwise triangles per grid cell
        for iy in 0..ny {
            for ix in 0..nx {
                let v00 = vertex(ix, iy);
                let v10 = vertex(ix + 1, iy);
                let v01 = vertex(ix, iy + 1);
                let v11 = vertex(ix + 1, iy + 1);

                for nodes in [[v00, v10, v11], [v00, v11, v01]] {
                    let centroid = Self::centroid(&mesh, nodes);
                    mesh.connectivity.add_element(nodes, classify(centroid));
                }
            }
        }

        Self::extract_boundary_facets(&mut mesh);
        mesh
    }

    fn centroid(mesh: &Mesh, nodes: [usize; 3]) -> Point2<f64> {
        let p0 = mesh.geometry.nodes[nodes[0]];
        let p1 = mesh.geometry.nodes[nodes[1]];
        let p2 = mesh.geometry.nodes[nodes[2]];
        Point2::new(
            (p0.x + p1.x + p2.x) / 3.0,
            (p0.y + p1.y + p2.y) / 3.0,
        )
    }

    /// Find edges that belong to exactly one cell and tag them by side
    ///
    /// Edges are stored in the cell's counter-clockwise orientation, so the
    /// outward normal of edge (a, b) is the edge direction rotated -90°.
    fn extract_boundary_facets(mesh: &mut Mesh) {
        // Count each undirected edge; remember its cell-local orientation so
        // a boundary facet keeps the counter-clockwise sense of its only cell
        let mut edges: HashMap<(usize, usize), (usize, [usize; 2])> = HashMap::new();

        for elem in &mesh.connectivity.tri3_elements {
            for (i, j) in crate::mesh::Tri3Element::edges() {
                let a = elem.nodes[i];
                let b = elem.nodes[j];
                let entry = edges.entry((a.min(b), a.max(b))).or_insert((0, [a, b]));
                entry.0 += 1;
            }
        }

        for (count, [a, b]) in edges.into_values() {
            if count != 1 {
                continue;
            }
            let pa = mesh.geometry.nodes[a];
            let pb = mesh.geometry.nodes[b];

            let edge = pb - pa;
            let length = edge.norm();
            let normal = Vector2::new(edge.y / length, -edge.x / length);

            let mid = Point2::new((pa.x + pb.x) / 2.0, (pa.y + pb.y) / 2.0);
            let tag = Self::classify_side(mid).map_or(0, BoundarySide::tag);

            mesh.connectivity.facets.push(BoundaryFacet {
                nodes: [a, b],
                normal,
                tag,
            });
        }
    }

    fn classify_side(mid: Point2<f64>) -> Option<BoundarySide> {
        let eps = 1e-9;
        if (mid.x + DOMAIN_HALF_WIDTH).abs() < eps {
            Some(BoundarySide::Left)
        } else if (mid.x - DOMAIN_HALF_WIDTH).abs() < eps {
            Some(BoundarySide::Right)
        } else if (mid.y - DOMAIN_HALF_WIDTH).abs() < eps {
            Some(BoundarySide::Top)
        } else if (mid.y + DOMAIN_HALF_WIDTH).abs() < eps {
            Some(BoundarySide::Bottom)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::fem::Tri3Basis;

    #[test]
    fn test_grid_counts() {
        let mesh = MeshGenerator::unit_square_with_inclusions(4, 4);
        assert_eq!(mesh.num_nodes(), 25);
        assert_eq!(mesh.num_elements(), 32);
    }

    #[test]
    fn test_all_cells_counter_clockwise() {
        let mesh = MeshGenerator::unit_square_with_inclusions(6, 6);
        for elem in &mesh.connectivity.tri3_elements {
            let verts = mesh.cell_vertices(elem);
            assert!(Tri3Basis::signed_area(&verts) > 0.0);
        }
    }

    #[test]
    fn test_cell_areas_tile_the_domain() {
        let mesh = MeshGenerator::unit_square_with_inclusions(8, 8);
        let total: f64 = mesh
            .connectivity
            .tri3_elements
            .iter()
            .map(|e| Tri3Basis::signed_area(&mesh.cell_vertices(e)))
            .sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_all_three_regions_present() {
        let mesh = MeshGenerator::unit_square_with_inclusions(16, 16);
        let regions = &mesh.connectivity.cell_regions;
        assert!(regions.contains(&REGION_MATRIX));
        assert!(regions.contains(&REGION_INCLUSION_A));
        assert!(regions.contains(&REGION_INCLUSION_B));
    }

    #[test]
    fn test_homogeneous_mesh_single_region() {
        let mesh = MeshGenerator::unit_square_homogeneous(8, 8);
        assert!(mesh
            .connectivity
            .cell_regions
            .iter()
            .all(|&r| r == REGION_MATRIX));
    }

    #[test]
    fn test_boundary_facet_count_and_tags() {
        let nx = 8;
        let ny = 8;
        let mesh = MeshGenerator::unit_square_with_inclusions(nx, ny);

        // Every boundary edge of the structured grid is a facet
        assert_eq!(mesh.connectivity.facets.len(), 2 * (nx + ny));

        let left = mesh
            .connectivity
            .facets
            .iter()
            .filter(|f| f.tag == BoundarySide::Left.tag())
            .count();
        let right = mesh
            .connectivity
            .facets
            .iter()
            .filter(|f| f.tag == BoundarySide::Right.tag())
            .count();
        assert_eq!(left, ny);
        assert_eq!(right, ny);
    }

    #[test]
    fn test_outward_normals() {
        let mesh = MeshGenerator::unit_square_with_inclusions(4, 4);
        for facet in &mesh.connectivity.facets {
            match BoundarySide::from_tag(facet.tag) {
                Some(BoundarySide::Left) => {
                    assert_relative_eq!(facet.normal.x, -1.0, epsilon = 1e-12);
                    assert_relative_eq!(facet.normal.y, 0.0, epsilon = 1e-12);
                }
                Some(BoundarySide::Right) => {
                    assert_relative_eq!(facet.normal.x, 1.0, epsilon = 1e-12);
                    assert_relative_eq!(facet.normal.y, 0.0, epsilon = 1e-12);
                }
                Some(BoundarySide::Top) => {
                    assert_relative_eq!(facet.normal.y, 1.0, epsilon = 1e-12);
                }
                Some(BoundarySide::Bottom) => {
                    assert_relative_eq!(facet.normal.y, -1.0, epsilon = 1e-12);
                }
                None => panic!("untagged facet on a rectangular boundary"),
            }
        }
    }
}
