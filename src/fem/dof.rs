use crate::mesh::Tri3Element;

/// Displacement components per mesh vertex
pub const DOFS_PER_VERTEX: usize = 2;

/// Global scalar multiplier unknowns: two translations and one rotation
pub const NUM_MULTIPLIERS: usize = 3;

/// Index of the x-translation multiplier within the multiplier block
pub const MULTIPLIER_TRANS_X: usize = 0;
/// Index of the y-translation multiplier within the multiplier block
pub const MULTIPLIER_TRANS_Y: usize = 1;
/// Index of the rotation multiplier within the multiplier block
pub const MULTIPLIER_ROT: usize = 2;

/// Degree of Freedom (DOF) manager
///
/// Handles global DOF numbering for the augmented displacement space: two
/// displacement components per vertex, occupying indices [0, 2V), followed by
/// the three global multiplier unknowns at [2V, 2V+3). The multipliers are
/// ordinary DOFs whose basis functions span the whole mesh (constant 1 for
/// the translations, the kernel (x, -y) for the rotation), so every cell
/// couples to the same three trailing indices.
#[derive(Debug, Clone)]
pub struct DofManager {
    /// Number of vertices in the mesh
    num_vertices: usize,

    /// Total number of DOFs (displacements + multipliers)
    total_dofs: usize,
}

impl DofManager {
    /// Create a DOF manager for a mesh with the given vertex count
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            total_dofs: num_vertices * DOFS_PER_VERTEX + NUM_MULTIPLIERS,
        }
    }

    /// Get the global displacement DOF index for a vertex and component
    pub fn displacement_dof(&self, vertex: usize, component: usize) -> usize {
        debug_assert!(vertex < self.num_vertices);
        debug_assert!(component < DOFS_PER_VERTEX);
        vertex * DOFS_PER_VERTEX + component
    }

    /// Get the global DOF index of one of the three multiplier unknowns
    pub fn multiplier_dof(&self, multiplier: usize) -> usize {
        debug_assert!(multiplier < NUM_MULTIPLIERS);
        self.num_vertices * DOFS_PER_VERTEX + multiplier
    }

    /// The 6 displacement DOF indices of a cell, ordered
    /// [u_0x, u_0y, u_1x, u_1y, u_2x, u_2y]
    pub fn cell_displacement_dofs(&self, elem: &Tri3Element) -> [usize; 6] {
        let mut dofs = [0usize; 6];
        for (i, &vertex) in elem.nodes.iter().enumerate() {
            dofs[2 * i] = self.displacement_dof(vertex, 0);
            dofs[2 * i + 1] = self.displacement_dof(vertex, 1);
        }
        dofs
    }

    /// Get total number of DOFs (2V + 3)
    pub fn total_dofs(&self) -> usize {
        self.total_dofs
    }

    /// Get number of displacement DOFs (2V)
    pub fn num_displacement_dofs(&self) -> usize {
        self.num_vertices * DOFS_PER_VERTEX
    }

    /// Get number of vertices
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dof_count_identity() {
        let dofs = DofManager::new(10);
        assert_eq!(dofs.total_dofs(), 2 * 10 + 3);
        assert_eq!(dofs.num_displacement_dofs(), 20);
    }

    #[test]
    fn test_displacement_numbering() {
        let dofs = DofManager::new(10);

        assert_eq!(dofs.displacement_dof(0, 0), 0);
        assert_eq!(dofs.displacement_dof(0, 1), 1);
        assert_eq!(dofs.displacement_dof(4, 0), 8);
        assert_eq!(dofs.displacement_dof(9, 1), 19);
    }

    #[test]
    fn test_multipliers_follow_displacement_block() {
        let dofs = DofManager::new(10);

        assert_eq!(dofs.multiplier_dof(MULTIPLIER_TRANS_X), 20);
        assert_eq!(dofs.multiplier_dof(MULTIPLIER_TRANS_Y), 21);
        assert_eq!(dofs.multiplier_dof(MULTIPLIER_ROT), 22);
    }

    #[test]
    fn test_cell_dofs_ordering() {
        let dofs = DofManager::new(10);
        let elem = Tri3Element::new([2, 7, 5]);

        assert_eq!(dofs.cell_displacement_dofs(&elem), [4, 5, 14, 15, 10, 11]);
    }
}
