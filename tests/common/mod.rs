use wedge_cover::{DataSet, Environment};

/// Five layers at radii 1..5, wedge half-width 5 at the outermost layer,
/// apex range (-1, 1).
pub fn wedge_env() -> Environment {
    Environment {
        layers: 5,
        radii: 1.0,
        top_layer_lim: 5.0,
        bottom_layer_lim: 1.0,
    }
}

/// The reference event: layer 0 holds the sixteen integers -5..=10, every
/// deeper layer holds the same points scaled by its radius.
pub fn reference_event(env: Environment) -> DataSet {
    let base: Vec<f64> = (-5..=10).map(f64::from).collect();
    let rows = (0..env.layers)
        .map(|i| base.iter().map(|p| p * env.radius(i)).collect())
        .collect();
    let mut data = DataSet::new(env);
    data.import(rows);
    data
}

/// A denser synthetic event with `n` evenly spaced points per layer spanning
/// each layer's wedge boundary.
pub fn uniform_event(env: Environment, n: usize) -> DataSet {
    let mut data = DataSet::new(env);
    data.generate_uniform(n);
    data
}
