use super::scoring::EnergyWeights;

/// Unweighted energy breakdown of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerm {
    pub length: f64,
    pub collinearity: f64,
}

impl EnergyTerm {
    pub fn new(length: f64, collinearity: f64) -> Self {
        Self {
            length,
            collinearity,
        }
    }

    #[inline]
    pub fn weighted(&self, weights: &EnergyWeights) -> f64 {
        weights.length() * self.length + weights.collinearity() * self.collinearity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_energy_term_with_specified_values() {
        let term = EnergyTerm::new(1.5, 2.0);
        assert_eq!(term.length, 1.5);
        assert_eq!(term.collinearity, 2.0);
    }

    #[test]
    fn weighted_applies_each_weight_to_its_term() {
        let term = EnergyTerm::new(3.0, 2.0);
        let weights = EnergyWeights::new(0.5, 4.0).unwrap();
        assert_eq!(term.weighted(&weights), 9.5);
    }

    #[test]
    fn weighted_with_default_weights_is_plain_sum() {
        let term = EnergyTerm::new(3.0, 2.0);
        assert_eq!(term.weighted(&EnergyWeights::default()), 5.0);
    }
}
