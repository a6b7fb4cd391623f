//! Derived quantities from a solved displacement field
//!
//! Computes per-cell stresses, the von Mises field, the scalar energy
//! quantities, and the diagnostic constraint integrals. Every integral uses
//! the same exact linear-triangle quadrature as assembly, so the energy
//! identity and the constraint diagnostics are consistent with the solved
//! system rather than approximations of it.

use nalgebra::{Matrix2, SVector, Vector3};

use crate::config::LoadingConfig;
use crate::error::ElasticaError;
use crate::fem::{Solution, Tri3Basis};
use crate::mechanics::{MaterialField, StrainDisplacement};
use crate::mesh::{BoundarySide, Mesh, ScalarField};

/// Scalar energy summary of one solve
#[derive(Debug, Clone, Copy)]
pub struct ScalarEnergies {
    /// Elastic strain energy ∫ ½ σ(u):ε(u) dx
    pub elastic_energy: f64,
    /// Boundary work ∮ t·u ds over the traction-loaded sides
    pub external_work: f64,
    /// Multiplier term c·(∫u_x, ∫u_y, ∫(x u_y - y u_x)); vanishes when the
    /// rigid-body constraints hold
    pub constraint_residual: f64,
    /// elastic_energy - external_work + constraint_residual
    pub total_free_energy: f64,
}

/// Per-cell stress-derived output fields
#[derive(Debug, Clone)]
pub struct DerivedFields {
    pub von_mises: ScalarField,
    pub sigma_xx: ScalarField,
    pub sigma_yy: ScalarField,
    pub sigma_xy: ScalarField,
    pub youngs_modulus: ScalarField,
}

/// Post-processor over a mesh and its material assignment
pub struct PostProcessor<'a> {
    mesh: &'a Mesh,
    materials: &'a MaterialField,
}

impl<'a> PostProcessor<'a> {
    pub fn new(mesh: &'a Mesh, materials: &'a MaterialField) -> Self {
        Self { mesh, materials }
    }

    /// Per-cell stress in Voigt notation [σ_xx, σ_yy, σ_xy]
    ///
    /// Strains are constant on each linear triangle, so one stress tensor per
    /// cell is exact.
    pub fn cell_stresses(&self, solution: &Solution) -> Result<Vec<Vector3<f64>>, ElasticaError> {
        let mut stresses = Vec::with_capacity(self.mesh.num_elements());

        for (cell, elem) in self.mesh.connectivity.tri3_elements.iter().enumerate() {
            let vertices = self.mesh.cell_vertices(elem);
            let (gradients, _) = Tri3Basis::gradients(&vertices)?;

            let b = StrainDisplacement::compute_b_matrix(&gradients);
            let u_e = Self::gather_displacements(solution, &elem.nodes);

            let strain = b * u_e;
            let material = self.materials.material_for(self.mesh.cell_region(cell));
            stresses.push(material.constitutive_matrix() * strain);
        }

        Ok(stresses)
    }

    /// In-plane deviatoric stress s = σ - ½ tr(σ) I in Voigt notation
    pub fn deviatoric(sigma: &Vector3<f64>) -> Vector3<f64> {
        let mean = 0.5 * (sigma[0] + sigma[1]);
        Vector3::new(sigma[0] - mean, sigma[1] - mean, sigma[2])
    }

    /// Von Mises equivalent stress per cell
    ///
    /// σ_vm = sqrt(3/2 · s:s) with s the in-plane deviator and
    /// s:s = s_xx² + s_yy² + 2 s_xy².
    pub fn von_mises(stresses: &[Vector3<f64>]) -> ScalarField {
        let values = stresses
            .iter()
            .map(|sigma| {
                let s = Self::deviatoric(sigma);
                let s_contraction = s[0] * s[0] + s[1] * s[1] + 2.0 * s[2] * s[2];
                (1.5 * s_contraction).sqrt()
            })
            .collect();
        ScalarField::new("von_mises", values)
    }

    /// All stress-derived cell fields plus the Young's modulus map
    pub fn derive_stress_fields(
        &self,
        solution: &Solution,
    ) -> Result<DerivedFields, ElasticaError> {
        let stresses = self.cell_stresses(solution)?;

        Ok(DerivedFields {
            von_mises: Self::von_mises(&stresses),
            sigma_xx: ScalarField::new("sigma_xx", stresses.iter().map(|s| s[0]).collect()),
            sigma_yy: ScalarField::new("sigma_yy", stresses.iter().map(|s| s[1]).collect()),
            sigma_xy: ScalarField::new("sigma_xy", stresses.iter().map(|s| s[2]).collect()),
            youngs_modulus: self.youngs_modulus_field(),
        })
    }

    /// Young's modulus per cell, resolved through the region tags
    pub fn youngs_modulus_field(&self) -> ScalarField {
        let values = (0..self.mesh.num_elements())
            .map(|cell| {
                self.materials
                    .material_for(self.mesh.cell_region(cell))
                    .youngs_modulus
            })
            .collect();
        ScalarField::new("youngs_modulus", values)
    }

    /// Area-weighted projection of a per-cell field onto the vertices
    pub fn project_to_vertices(
        &self,
        cell_field: &ScalarField,
    ) -> Result<ScalarField, ElasticaError> {
        let n = self.mesh.num_nodes();
        let mut weighted = vec![0.0; n];
        let mut weights = vec![0.0; n];

        for (cell, elem) in self.mesh.connectivity.tri3_elements.iter().enumerate() {
            let area = Tri3Basis::area(&self.mesh.cell_vertices(elem))?;
            for &v in &elem.nodes {
                weighted[v] += area * cell_field.values[cell];
                weights[v] += area;
            }
        }

        let values = weighted
            .iter()
            .zip(weights.iter())
            .map(|(&w, &a)| if a > 0.0 { w / a } else { 0.0 })
            .collect();
        Ok(ScalarField::new(cell_field.name.clone(), values))
    }

    /// Elastic strain energy ∫ ½ σ:ε dx
    ///
    /// In Voigt notation with engineering shear the contraction is
    /// σ_xx ε_xx + σ_yy ε_yy + σ_xy γ_xy.
    pub fn elastic_energy(&self, solution: &Solution) -> Result<f64, ElasticaError> {
        let mut energy = 0.0;

        for (cell, elem) in self.mesh.connectivity.tri3_elements.iter().enumerate() {
            let vertices = self.mesh.cell_vertices(elem);
            let (gradients, area) = Tri3Basis::gradients(&vertices)?;

            let b = StrainDisplacement::compute_b_matrix(&gradients);
            let u_e = Self::gather_displacements(solution, &elem.nodes);
            let strain = b * u_e;

            let material = self.materials.material_for(self.mesh.cell_region(cell));
            let stress = material.constitutive_matrix() * strain;

            energy += 0.5 * stress.dot(&strain) * area;
        }

        Ok(energy)
    }

    /// Boundary work ∮ t·u ds over the traction-loaded sides
    ///
    /// The displacement is linear on each facet, so the midpoint value
    /// (u_a + u_b)/2 integrates the facet exactly.
    pub fn external_work(&self, solution: &Solution, sigma0: &Matrix2<f64>) -> f64 {
        let mut work = 0.0;

        for facet in &self.mesh.connectivity.facets {
            let carries = BoundarySide::from_tag(facet.tag)
                .map_or(false, BoundarySide::carries_traction);
            if !carries {
                continue;
            }

            let pa = self.mesh.geometry.nodes[facet.nodes[0]];
            let pb = self.mesh.geometry.nodes[facet.nodes[1]];
            let length = (pb - pa).norm();

            let traction = sigma0 * facet.normal;
            let u_mid = 0.5
                * (solution.displacement(facet.nodes[0]) + solution.displacement(facet.nodes[1]));

            work += traction.dot(&u_mid) * length;
        }

        work
    }

    /// The three rigid-body constraint integrals
    /// [∫ u_x dx, ∫ u_y dx, ∫ (x u_y - y u_x) dx]
    ///
    /// Evaluated with the same ∫N_i dA = A/3 and ∫N_i x dA = (A/12)(Σx + x_i)
    /// moments that assembly scatters into the bordered rows, so each integral
    /// vanishes (to solver tolerance) for any solved field.
    pub fn constraint_integrals(
        &self,
        solution: &Solution,
    ) -> Result<[f64; 3], ElasticaError> {
        let mut integrals = [0.0; 3];

        for elem in &self.mesh.connectivity.tri3_elements {
            let vertices = self.mesh.cell_vertices(elem);
            let area = Tri3Basis::area(&vertices)?;

            let sum_x: f64 = vertices.iter().map(|v| v.x).sum();
            let sum_y: f64 = vertices.iter().map(|v| v.y).sum();

            for i in 0..3 {
                let u = solution.displacement(elem.nodes[i]);
                let moment_x = area / 12.0 * (sum_x + vertices[i].x);
                let moment_y = area / 12.0 * (sum_y + vertices[i].y);

                integrals[0] += area / 3.0 * u.x;
                integrals[1] += area / 3.0 * u.y;
                integrals[2] += moment_x * u.y - moment_y * u.x;
            }
        }

        Ok(integrals)
    }

    /// Full energy summary for one solve
    pub fn energies(
        &self,
        solution: &Solution,
        loading: &LoadingConfig,
    ) -> Result<ScalarEnergies, ElasticaError> {
        let elastic_energy = self.elastic_energy(solution)?;
        let external_work = self.external_work(solution, &loading.tensor());

        let integrals = self.constraint_integrals(solution)?;
        let multipliers = solution.multipliers();
        let constraint_residual = multipliers[0] * integrals[0]
            + multipliers[1] * integrals[1]
            + multipliers[2] * integrals[2];

        Ok(ScalarEnergies {
            elastic_energy,
            external_work,
            constraint_residual,
            total_free_energy: elastic_energy - external_work + constraint_residual,
        })
    }

    fn gather_displacements(solution: &Solution, nodes: &[usize; 3]) -> SVector<f64, 6> {
        let mut u_e = SVector::<f64, 6>::zeros();
        for (i, &v) in nodes.iter().enumerate() {
            let u = solution.displacement(v);
            u_e[2 * i] = u.x;
            u_e[2 * i + 1] = u.y;
        }
        u_e
    }
}
