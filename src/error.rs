use thiserror::Error;

/// Error taxonomy for the analysis pipeline.
///
/// All variants are fail-fast: the pipeline surfaces the first failure to the
/// caller and produces no partial results.
#[derive(Error, Debug)]
pub enum ElasticaError {
    /// A cell with zero or negative signed area makes the affine geometric
    /// map singular, so basis gradients cannot be computed.
    #[error("degenerate cell geometry: signed area {area:.3e} breaks the affine map")]
    DegenerateGeometry { area: f64 },

    /// A cell carries a region tag outside the expected domain {1, 2, 3}.
    /// Tag 0 is reserved for "whole domain" and must never appear on a cell.
    #[error("cell {cell} carries region tag {tag}, expected one of 1..=3")]
    InvalidRegionTag { cell: usize, tag: u32 },

    /// The augmented saddle-point matrix failed a factorization or pivot
    /// check. Not expected for a correctly bordered system, but detected
    /// rather than silently producing NaNs.
    #[error("augmented system is singular: {0}")]
    SingularSystem(String),

    /// An iterative solve exceeded its iteration budget before reaching the
    /// residual tolerance.
    #[error("linear solver did not converge after {iterations} iterations (residual {residual:.3e})")]
    DidNotConverge { iterations: usize, residual: f64 },

    /// Material constants outside the admissible range (E > 0, ν in (-1, 0.5)).
    #[error("invalid material parameters: {0}")]
    InvalidMaterialParameters(String),

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}
