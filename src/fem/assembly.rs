use log::{debug, info};
use nalgebra::{Matrix2, SMatrix};
use rayon::prelude::*;
use sprs::{CsMat, TriMat};

use crate::error::ElasticaError;
use crate::mechanics::{ElasticityElement, MaterialField};
use crate::mesh::{BoundarySide, Mesh, RegionTag, Tri3Element};

use super::dof::{DofManager, NUM_MULTIPLIERS};

/// Region tags a cell is allowed to carry
const VALID_REGION_TAGS: std::ops::RangeInclusive<RegionTag> = 1..=3;

/// Global matrix assembler for the augmented elasticity system
///
/// Builds the (2V+3)×(2V+3) symmetric indefinite saddle-point matrix A and
/// the load vector b. The top-left 2V×2V block is the elasticity stiffness
/// (positive semi-definite with the 3-dimensional rigid-body null space),
/// bordered by the 2V×3 multiplier coupling block and a 3×3 zero block. The
/// bordering is what removes the null space and makes A nonsingular.
///
/// Accumulation is append-only into a triplet list; the structure is frozen
/// into CSR before the solve and never mutated afterwards.
pub struct Assembler;

/// Element contribution of one cell: the 6×6 stiffness block and the 6×3
/// multiplier coupling block
type CellBlocks = (SMatrix<f64, 6, 6>, SMatrix<f64, 6, 3>);

impl Assembler {
    /// Assemble the global system (serial version)
    ///
    /// # Arguments
    /// * `mesh` - The mesh with region and boundary tags
    /// * `materials` - Per-region material coefficients
    /// * `sigma0` - Prescribed constant boundary stress tensor
    /// * `dofs` - DOF layout (displacements + multipliers)
    ///
    /// # Returns
    /// The global matrix in CSR format and the load vector
    ///
    /// # Errors
    /// * `InvalidRegionTag` if a cell tag falls outside 1..=3
    /// * `DegenerateGeometry` if a cell's affine map is singular
    pub fn assemble_system_serial(
        mesh: &Mesh,
        materials: &MaterialField,
        sigma0: &Matrix2<f64>,
        dofs: &DofManager,
    ) -> Result<(CsMat<f64>, Vec<f64>), ElasticaError> {
        let n_dofs = dofs.total_dofs();
        let mut triplets = TriMat::new((n_dofs, n_dofs));

        for (cell, elem) in mesh.connectivity.tri3_elements.iter().enumerate() {
            let blocks = Self::cell_blocks(mesh, materials, cell, elem)?;
            Self::scatter_cell(&mut triplets, dofs, elem, &blocks);
        }

        let b = Self::assemble_traction_load(mesh, sigma0, dofs);

        let matrix = triplets.to_csr();
        info!(
            "assembled {}x{} system, {} non-zeros, {} cells",
            n_dofs,
            n_dofs,
            matrix.nnz(),
            mesh.num_elements()
        );

        Ok((matrix, b))
    }

    /// Assemble the global system (parallel version using Rayon)
    ///
    /// Element blocks are computed in parallel; accumulation into the shared
    /// triplet list stays sequential, so overlapping vertex DOFs need no
    /// synchronization.
    pub fn assemble_system_parallel(
        mesh: &Mesh,
        materials: &MaterialField,
        sigma0: &Matrix2<f64>,
        dofs: &DofManager,
    ) -> Result<(CsMat<f64>, Vec<f64>), ElasticaError> {
        let n_dofs = dofs.total_dofs();

        let cell_blocks: Vec<CellBlocks> = mesh
            .connectivity
            .tri3_elements
            .par_iter()
            .enumerate()
            .map(|(cell, elem)| Self::cell_blocks(mesh, materials, cell, elem))
            .collect::<Result<_, _>>()?;

        let mut triplets = TriMat::new((n_dofs, n_dofs));
        for (elem, blocks) in mesh.connectivity.tri3_elements.iter().zip(&cell_blocks) {
            Self::scatter_cell(&mut triplets, dofs, elem, blocks);
        }

        let b = Self::assemble_traction_load(mesh, sigma0, dofs);

        let matrix = triplets.to_csr();
        info!(
            "assembled {}x{} system (parallel), {} non-zeros, {} cells",
            n_dofs,
            n_dofs,
            matrix.nnz(),
            mesh.num_elements()
        );

        Ok((matrix, b))
    }

    /// Compute the stiffness and coupling blocks of one cell
    fn cell_blocks(
        mesh: &Mesh,
        materials: &MaterialField,
        cell: usize,
        elem: &Tri3Element,
    ) -> Result<CellBlocks, ElasticaError> {
        let tag = mesh.cell_region(cell);
        if !VALID_REGION_TAGS.contains(&tag) {
            return Err(ElasticaError::InvalidRegionTag { cell, tag });
        }

        let vertices = mesh.cell_vertices(elem);
        let material = materials.material_for(tag);

        let stiffness = ElasticityElement::stiffness_matrix(&vertices, material)?;
        let coupling = ElasticityElement::multiplier_coupling(&vertices)?;

        Ok((stiffness, coupling))
    }

    /// Scatter one cell's blocks into the global triplet list
    ///
    /// Writes the 6×6 stiffness at the cell's displacement DOFs and the 6×3
    /// coupling block plus its transpose into the bordered multiplier
    /// rows/columns, keeping the matrix symmetric. The 3×3 multiplier block
    /// stays empty.
    fn scatter_cell(
        triplets: &mut TriMat<f64>,
        dofs: &DofManager,
        elem: &Tri3Element,
        (stiffness, coupling): &CellBlocks,
    ) {
        let cell_dofs = dofs.cell_displacement_dofs(elem);

        for (local_i, &global_i) in cell_dofs.iter().enumerate() {
            for (local_j, &global_j) in cell_dofs.iter().enumerate() {
                triplets.add_triplet(global_i, global_j, stiffness[(local_i, local_j)]);
            }

            for k in 0..NUM_MULTIPLIERS {
                let global_k = dofs.multiplier_dof(k);
                let value = coupling[(local_i, k)];
                triplets.add_triplet(global_i, global_k, value);
                triplets.add_triplet(global_k, global_i, value);
            }
        }
    }

    /// Assemble the traction load vector
    ///
    /// Only facets tagged Left or Right carry the prescribed traction
    /// t = σ₀·n; Top/Bottom and untagged facets are natural (traction-free)
    /// and are omitted from assembly entirely.
    pub fn assemble_traction_load(
        mesh: &Mesh,
        sigma0: &Matrix2<f64>,
        dofs: &DofManager,
    ) -> Vec<f64> {
        let mut b = vec![0.0; dofs.total_dofs()];
        let mut loaded_facets = 0usize;

        for facet in &mesh.connectivity.facets {
            let carries_traction = BoundarySide::from_tag(facet.tag)
                .map(|side| side.carries_traction())
                .unwrap_or(false);
            if !carries_traction {
                continue;
            }

            let a = &mesh.geometry.nodes[facet.nodes[0]];
            let c = &mesh.geometry.nodes[facet.nodes[1]];
            let f = ElasticityElement::traction_load(a, c, &facet.normal, sigma0);

            for (i, &vertex) in facet.nodes.iter().enumerate() {
                b[dofs.displacement_dof(vertex, 0)] += f[2 * i];
                b[dofs.displacement_dof(vertex, 1)] += f[2 * i + 1];
            }
            loaded_facets += 1;
        }

        debug!("traction applied on {} boundary facets", loaded_facets);
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProblemConfig;
    use crate::mesh_generator::MeshGenerator;
    use approx::assert_relative_eq;

    fn benchmark_setup() -> (Mesh, MaterialField, Matrix2<f64>) {
        let config = ProblemConfig::two_inclusion_benchmark();
        let mesh = MeshGenerator::unit_square_with_inclusions(8, 8);
        let materials = MaterialField::from_config(&config.materials).unwrap();
        (mesh, materials, config.loading.tensor())
    }

    #[test]
    fn test_system_dimensions() {
        let (mesh, materials, sigma0) = benchmark_setup();
        let dofs = DofManager::new(mesh.num_nodes());

        let (a, b) = Assembler::assemble_system_serial(&mesh, &materials, &sigma0, &dofs).unwrap();

        assert_eq!(a.rows(), 2 * mesh.num_nodes() + 3);
        assert_eq!(a.cols(), a.rows());
        assert_eq!(b.len(), a.rows());
        assert!(a.nnz() > 0);
    }

    #[test]
    fn test_matrix_is_symmetric() {
        let (mesh, materials, sigma0) = benchmark_setup();
        let dofs = DofManager::new(mesh.num_nodes());

        let (a, _) = Assembler::assemble_system_serial(&mesh, &materials, &sigma0, &dofs).unwrap();
        let at = a.transpose_view().to_csr();

        for (row_a, row_at) in a.outer_iterator().zip(at.outer_iterator()) {
            for ((col_a, &val_a), (col_at, &val_at)) in row_a.iter().zip(row_at.iter()) {
                assert_eq!(col_a, col_at);
                assert_relative_eq!(val_a, val_at, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_multiplier_block_is_zero() {
        let (mesh, materials, sigma0) = benchmark_setup();
        let dofs = DofManager::new(mesh.num_nodes());

        let (a, _) = Assembler::assemble_system_serial(&mesh, &materials, &sigma0, &dofs).unwrap();

        for i in 0..NUM_MULTIPLIERS {
            for j in 0..NUM_MULTIPLIERS {
                let (row, col) = (dofs.multiplier_dof(i), dofs.multiplier_dof(j));
                let value = a.get(row, col).copied().unwrap_or(0.0);
                assert_relative_eq!(value, 0.0, epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_serial_vs_parallel_assembly() {
        let (mesh, materials, sigma0) = benchmark_setup();
        let dofs = DofManager::new(mesh.num_nodes());

        let (a_serial, b_serial) =
            Assembler::assemble_system_serial(&mesh, &materials, &sigma0, &dofs).unwrap();
        let (a_parallel, b_parallel) =
            Assembler::assemble_system_parallel(&mesh, &materials, &sigma0, &dofs).unwrap();

        assert_eq!(a_serial.nnz(), a_parallel.nnz());
        for (row_s, row_p) in a_serial.outer_iterator().zip(a_parallel.outer_iterator()) {
            for ((col_s, &val_s), (col_p, &val_p)) in row_s.iter().zip(row_p.iter()) {
                assert_eq!(col_s, col_p);
                assert_relative_eq!(val_s, val_p, epsilon = 1e-13);
            }
        }
        for (s, p) in b_serial.iter().zip(b_parallel.iter()) {
            assert_relative_eq!(s, p, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_traction_resultant_balances() {
        // Left and Right tractions are equal and opposite, so the x-resultant
        // of the load vector vanishes
        let (mesh, materials, sigma0) = benchmark_setup();
        let dofs = DofManager::new(mesh.num_nodes());

        let (_, b) = Assembler::assemble_system_serial(&mesh, &materials, &sigma0, &dofs).unwrap();

        let sum_x: f64 = (0..mesh.num_nodes())
            .map(|v| b[dofs.displacement_dof(v, 0)])
            .sum();
        let sum_y: f64 = (0..mesh.num_nodes())
            .map(|v| b[dofs.displacement_dof(v, 1)])
            .sum();
        assert_relative_eq!(sum_x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(sum_y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_region_tag_rejected() {
        let (mut mesh, materials, sigma0) = benchmark_setup();
        let dofs = DofManager::new(mesh.num_nodes());

        // Tag 0 is reserved for "whole domain" and must never tag a cell
        mesh.connectivity.cell_regions[0] = 0;

        let result = Assembler::assemble_system_serial(&mesh, &materials, &sigma0, &dofs);
        assert!(matches!(
            result,
            Err(ElasticaError::InvalidRegionTag { cell: 0, tag: 0 })
        ));
    }

    #[test]
    fn test_degenerate_cell_rejected() {
        let (mut mesh, materials, sigma0) = benchmark_setup();
        let dofs = DofManager::new(mesh.num_nodes());

        // Collapse one cell onto a single vertex
        let elem = mesh.connectivity.tri3_elements[0].clone();
        let p = mesh.geometry.nodes[elem.nodes[0]];
        mesh.geometry.nodes[elem.nodes[1]] = p;
        mesh.geometry.nodes[elem.nodes[2]] = p;

        let result = Assembler::assemble_system_serial(&mesh, &materials, &sigma0, &dofs);
        assert!(matches!(
            result,
            Err(ElasticaError::DegenerateGeometry { .. })
        ));
    }
}
