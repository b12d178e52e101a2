pub struct MseLoss;

impl MseLoss {
    /// Half squared error for one sample: 0.5·(p - t)²
    ///
    /// The 0.5 makes ∂L/∂p = p - t, the same output error signal that BCE on a
    /// sigmoid output yields with respect to its logit.
    pub fn loss(predicted: f64, expected: f64) -> f64 {
        0.5 * (predicted - expected).powi(2)
    }

    /// Plain mean squared error over paired slices, for reporting fit quality.
    pub fn mean(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }
}
