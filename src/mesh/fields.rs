use nalgebra::Vector2;

/// A named scalar field, one value per vertex or per cell
///
/// Derived quantities (von Mises stress, stress components, the Young's
/// modulus map) live in these containers so the export collaborator can
/// consume them independently of the solver state.
#[derive(Debug, Clone)]
pub struct ScalarField {
    pub name: String,
    pub values: Vec<f64>,
}

impl ScalarField {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest value in the field, or None for an empty field
    pub fn max(&self) -> Option<f64> {
        self.values.iter().cloned().reduce(f64::max)
    }

    /// Smallest value in the field, or None for an empty field
    pub fn min(&self) -> Option<f64> {
        self.values.iter().cloned().reduce(f64::min)
    }
}

/// A named 2D vector field, one vector per vertex
#[derive(Debug, Clone)]
pub struct VectorField {
    pub name: String,
    pub values: Vec<Vector2<f64>>,
}

impl VectorField {
    pub fn new(name: impl Into<String>, values: Vec<Vector2<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest vector magnitude in the field
    pub fn max_magnitude(&self) -> f64 {
        self.values.iter().map(|v| v.norm()).fold(0.0, f64::max)
    }
}
