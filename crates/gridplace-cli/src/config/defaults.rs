use gridplace::core::energy::scoring::Aggregation;
use gridplace::engine::config::DEFAULT_ITERATIONS;

pub struct DefaultsConfig {
    pub canvas_width: f64,
    pub length_weight: f64,
    pub collinearity_weight: f64,
    pub aggregation: Aggregation,
    pub iterations: usize,
    pub chains: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500.0,
            length_weight: 1.0,
            collinearity_weight: 1.0,
            aggregation: Aggregation::Total,
            iterations: DEFAULT_ITERATIONS,
            chains: 1,
        }
    }
}
