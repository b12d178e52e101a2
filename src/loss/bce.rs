pub struct BceLoss;

/// Offset inside log() so a saturated sigmoid never produces -inf.
pub const EPS: f64 = 1e-8;

impl BceLoss {
    /// Scalar BCE for one sample: -(t·log(p+ε) + (1-t)·log(1-p+ε))
    pub fn loss(predicted: f64, expected: f64) -> f64 {
        -(expected * (predicted + EPS).ln() + (1.0 - expected) * (1.0 - predicted + EPS).ln())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confident_and_correct_is_near_zero() {
        assert!(BceLoss::loss(1.0 - 1e-12, 1.0) < 1e-6);
        assert!(BceLoss::loss(1e-12, 0.0) < 1e-6);
    }

    #[test]
    fn saturated_wrong_prediction_stays_finite() {
        let l = BceLoss::loss(0.0, 1.0);
        assert!(l.is_finite());
        assert!((l - (-(EPS.ln()))).abs() < 1e-12);
    }

    #[test]
    fn coin_flip_costs_ln_two() {
        assert!((BceLoss::loss(0.5, 1.0) - std::f64::consts::LN_2).abs() < 1e-6);
    }
}
