use elastica2d::{run_analysis, MeshGenerator, ProblemConfig};

fn main() {
    env_logger::init();

    println!("=== Two-Inclusion Elastostatics Demo ===\n");

    // Problem setup: plane-stress square matrix [-0.5, 0.5]² with a stiff and
    // a soft circular inclusion, pulled uniaxially on Left/Right with
    // t = sigma0 · n. Rigid-body modes are removed by three global multiplier
    // unknowns, so no displacement is prescribed anywhere.
    let config = match std::env::args().nth(1) {
        Some(path) => match ProblemConfig::from_file(&path) {
            Ok(config) => {
                println!("Loaded configuration from {}", path);
                config
            }
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        },
        None => ProblemConfig::two_inclusion_benchmark(),
    };

    let (nx, ny) = (48, 48);

    println!("Generating mesh...");
    let mesh = MeshGenerator::unit_square_with_inclusions(nx, ny);
    println!("  Vertices: {}", mesh.num_nodes());
    println!("  Cells:    {}", mesh.num_elements());
    println!("  Unknowns: {}\n", 2 * mesh.num_nodes() + 3);

    println!("Solving ({})...", config.solver.linear_solver);
    let result = match run_analysis(&mesh, &config) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    println!("  Iterations:        {}", result.stats.iterations);
    println!("  Relative residual: {:.3e}", result.stats.relative_residual);
    println!("  Solve time:        {:.3} s\n", result.stats.solve_time);

    let [cx, cy, cr] = result.solution.multipliers();
    println!("Results:");
    println!("  Max |u|:            {:.6e}", result.displacement.max_magnitude());
    println!(
        "  Max von Mises:      {:.6e}",
        result.fields.von_mises.max().unwrap_or(0.0)
    );
    println!("  Multipliers:        [{:.3e}, {:.3e}, {:.3e}]", cx, cy, cr);
    println!("  Elastic energy:     {:.6e}", result.energies.elastic_energy);
    println!("  External work:      {:.6e}", result.energies.external_work);
    println!("  Constraint residual: {:.3e}", result.energies.constraint_residual);
    println!("  Total free energy:  {:.6e}", result.energies.total_free_energy);
}
