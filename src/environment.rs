//! Detector wedge geometry and per-layer point data.

/// Immutable geometry of one wedge-shaped detector slice.
///
/// Layers are concentric surfaces at radii `radii * 1, radii * 2, ...`.
/// `top_layer_lim` is the lateral half-width of the wedge at the outermost
/// layer; `bottom_layer_lim` bounds the apex (z0) range at the origin.
#[derive(Clone, Copy, Debug)]
pub struct Environment {
    pub layers: usize,
    /// Radial spacing between consecutive layers.
    pub radii: f64,
    pub top_layer_lim: f64,
    pub bottom_layer_lim: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            layers: 5,
            radii: 5.0,
            top_layer_lim: 100.0,
            bottom_layer_lim: 15.0,
        }
    }
}

impl Environment {
    /// Radius of layer `i` (zero-based).
    #[inline]
    pub fn radius(&self, i: usize) -> f64 {
        self.radii * (i + 1) as f64
    }

    /// Radius of the outermost layer.
    #[inline]
    pub fn max_radius(&self) -> f64 {
        self.radii * self.layers as f64
    }

    /// Lateral half-width of the wedge at layer `i`. Scales linearly with
    /// radius, reaching `top_layer_lim` at the outermost layer.
    #[inline]
    pub fn boundary(&self, i: usize) -> f64 {
        self.top_layer_lim * self.radius(i) / self.max_radius()
    }
}

/// Per-layer ascending point positions recorded in one event.
#[derive(Clone, Debug)]
pub struct DataSet {
    pub env: Environment,
    /// `array[layer]` is ascending; one coordinate per recorded point.
    pub array: Vec<Vec<f64>>,
    /// Points per layer (uniform across layers after import).
    pub n_points: usize,
}

impl DataSet {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            array: vec![Vec::new(); env.layers],
            n_points: 0,
        }
    }

    /// Imports raw per-layer rows, sorting each layer ascending.
    pub fn import(&mut self, rows: Vec<Vec<f64>>) {
        self.array = rows;
        self.array.resize(self.env.layers, Vec::new());
        for row in &mut self.array {
            row.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        }
        self.n_points = self.array.first().map_or(0, Vec::len);
    }

    /// Fills every layer with `n` evenly spaced points spanning that layer's
    /// wedge boundary.
    pub fn generate_uniform(&mut self, n: usize) {
        self.array.clear();
        for i in 0..self.env.layers {
            let lim = self.env.boundary(i);
            let row = if n < 2 {
                vec![0.0; n]
            } else {
                let step = 2.0 * lim / (n - 1) as f64;
                (0..n).map(|k| -lim + step * k as f64).collect()
            };
            self.array.push(row);
        }
        self.n_points = n;
    }

    /// Inserts one artificial point just outside each edge of every layer's
    /// wedge boundary, then re-sorts. Keeps boundary trajectories coverable
    /// even when real hits stop short of the wedge edge.
    pub fn add_boundary_points(&mut self, offset: f64) {
        for i in 0..self.env.layers {
            let edge = self.env.boundary(i) + offset;
            self.array[i].push(-edge);
            self.array[i].push(edge);
            self.array[i]
                .sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        }
        self.n_points = self.array.first().map_or(0, Vec::len);
    }
}
