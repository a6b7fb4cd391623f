//! End-to-end tests for the two-inclusion traction problem
//!
//! These exercise the full pipeline: mesh generation, augmented assembly,
//! linear solve and post-processing.

use approx::assert_relative_eq;
use elastica2d::{
    run_analysis, Assembler, DofManager, MaterialField, MeshGenerator, PostProcessor,
    ProblemConfig,
};

#[test]
fn benchmark_energies_have_expected_magnitudes() {
    let mesh = MeshGenerator::unit_square_with_inclusions(24, 24);
    let config = ProblemConfig::two_inclusion_benchmark();

    let result = run_analysis(&mesh, &config).unwrap();
    let energies = result.energies;

    // Uniaxial sigma_xx = 0.2 on a unit square with E_matrix = 1 stores about
    // 1/2 sigma^2 / E = 0.02 of strain energy; the boundary work is about
    // twice that. The inclusions perturb both without changing the order.
    assert!(
        energies.elastic_energy > 0.01 && energies.elastic_energy < 0.05,
        "elastic energy {} outside expected range",
        energies.elastic_energy
    );
    assert!(
        energies.external_work > 0.02 && energies.external_work < 0.1,
        "external work {} outside expected range",
        energies.external_work
    );
    assert!(energies.constraint_residual.abs() < 1e-10);
}

#[test]
fn discrete_virtual_work_identity_holds() {
    let mesh = MeshGenerator::unit_square_with_inclusions(16, 16);
    let config = ProblemConfig::two_inclusion_benchmark();

    let result = run_analysis(&mesh, &config).unwrap();
    let energies = result.energies;

    // Testing u against the solved system gives u'Ku + u'Cc = u'f, i.e.
    // 2 * elastic + constraint = work for the discrete solution.
    let defect = 2.0 * energies.elastic_energy + energies.constraint_residual
        - energies.external_work;
    assert!(
        defect.abs() < 1e-8 * energies.external_work.abs(),
        "virtual work defect {} too large",
        defect
    );

    assert_relative_eq!(
        energies.total_free_energy,
        energies.elastic_energy - energies.external_work + energies.constraint_residual,
        epsilon = 1e-14
    );
}

#[test]
fn constraint_integrals_vanish_on_solved_field() {
    let mesh = MeshGenerator::unit_square_with_inclusions(16, 16);
    let config = ProblemConfig::two_inclusion_benchmark();
    let materials = MaterialField::from_config(&config.materials).unwrap();

    let result = run_analysis(&mesh, &config).unwrap();

    let post = PostProcessor::new(&mesh, &materials);
    let integrals = post.constraint_integrals(&result.solution).unwrap();

    for integral in integrals {
        assert!(
            integral.abs() < 1e-10,
            "rigid-body constraint integral {} not removed",
            integral
        );
    }
}

#[test]
fn constraint_integrals_stay_small_under_refinement() {
    let config = ProblemConfig::two_inclusion_benchmark();

    for n in [8, 16, 24] {
        let mesh = MeshGenerator::unit_square_with_inclusions(n, n);
        let materials = MaterialField::from_config(&config.materials).unwrap();

        let result = run_analysis(&mesh, &config).unwrap();
        let post = PostProcessor::new(&mesh, &materials);
        let integrals = post.constraint_integrals(&result.solution).unwrap();

        for integral in integrals {
            assert!(
                integral.abs() < 1e-10,
                "n = {}: constraint integral {} not removed",
                n,
                integral
            );
        }
    }
}

#[test]
fn identical_materials_make_inclusion_boundaries_invisible() {
    // With all three regions given the matrix constants, the tagged mesh and
    // the untagged mesh assemble the same system on the same grid.
    let mut config = ProblemConfig::two_inclusion_benchmark();
    config.materials.inclusion_a = config.materials.matrix;
    config.materials.inclusion_b = config.materials.matrix;

    let tagged = MeshGenerator::unit_square_with_inclusions(16, 16);
    let plain = MeshGenerator::unit_square_homogeneous(16, 16);

    let result_tagged = run_analysis(&tagged, &config).unwrap();
    let result_plain = run_analysis(&plain, &config).unwrap();

    for v in 0..tagged.num_nodes() {
        let u_tagged = result_tagged.solution.displacement(v);
        let u_plain = result_plain.solution.displacement(v);
        assert_relative_eq!(u_tagged.x, u_plain.x, epsilon = 1e-9);
        assert_relative_eq!(u_tagged.y, u_plain.y, epsilon = 1e-9);
    }
}

#[test]
fn reversing_the_load_negates_the_displacements() {
    let mesh = MeshGenerator::unit_square_with_inclusions(12, 12);
    let config = ProblemConfig::two_inclusion_benchmark();

    let mut reversed = config.clone();
    reversed.loading = config.loading.negated();

    let forward = run_analysis(&mesh, &config).unwrap();
    let backward = run_analysis(&mesh, &reversed).unwrap();

    for v in 0..mesh.num_nodes() {
        let u_fwd = forward.solution.displacement(v);
        let u_bwd = backward.solution.displacement(v);
        assert_relative_eq!(u_fwd.x, -u_bwd.x, epsilon = 1e-9);
        assert_relative_eq!(u_fwd.y, -u_bwd.y, epsilon = 1e-9);
    }
}

#[test]
fn serial_and_parallel_assembly_agree() {
    let mesh = MeshGenerator::unit_square_with_inclusions(10, 10);
    let config = ProblemConfig::two_inclusion_benchmark();
    let materials = MaterialField::from_config(&config.materials).unwrap();
    let dofs = DofManager::new(mesh.num_nodes());
    let sigma0 = config.loading.tensor();

    let (a_serial, b_serial) =
        Assembler::assemble_system_serial(&mesh, &materials, &sigma0, &dofs).unwrap();
    let (a_parallel, b_parallel) =
        Assembler::assemble_system_parallel(&mesh, &materials, &sigma0, &dofs).unwrap();

    let n = dofs.total_dofs();
    for i in 0..n {
        assert_relative_eq!(b_serial[i], b_parallel[i], epsilon = 1e-14);
        for j in 0..n {
            let s = a_serial.get(i, j).copied().unwrap_or(0.0);
            let p = a_parallel.get(i, j).copied().unwrap_or(0.0);
            assert_relative_eq!(s, p, epsilon = 1e-14);
        }
    }
}

#[test]
fn direct_and_bicgstab_solvers_agree() {
    let mesh = MeshGenerator::unit_square_with_inclusions(10, 10);

    let config_direct = ProblemConfig::two_inclusion_benchmark();
    let mut config_iterative = config_direct.clone();
    config_iterative.solver.linear_solver = "bicgstab".to_string();
    config_iterative.solver.tolerance = 1e-12;

    let direct = run_analysis(&mesh, &config_direct).unwrap();
    let iterative = run_analysis(&mesh, &config_iterative).unwrap();

    assert!(iterative.stats.iterations > 0);

    let max_u = direct.displacement.max_magnitude();
    for v in 0..mesh.num_nodes() {
        let u_d = direct.solution.displacement(v);
        let u_i = iterative.solution.displacement(v);
        assert!((u_d - u_i).norm() < 1e-6 * max_u.max(1.0));
    }
}

#[test]
fn stress_concentrates_around_the_stiff_inclusion() {
    let mesh = MeshGenerator::unit_square_with_inclusions(24, 24);
    let config = ProblemConfig::two_inclusion_benchmark();

    let result = run_analysis(&mesh, &config).unwrap();

    // The far-field von Mises level for uniaxial sigma_xx = 0.2 is 0.2; the
    // material contrast must produce visible concentration above it.
    let max_vm = result.fields.von_mises.max().unwrap();
    assert!(
        max_vm > 0.2,
        "expected stress concentration, max von Mises = {}",
        max_vm
    );
}
