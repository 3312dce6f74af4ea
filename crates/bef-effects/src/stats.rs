use bef_core::errors::{BefError, ErrorInfo};

/// Arithmetic mean of `xs`.
pub fn mean(xs: &[f64]) -> Result<f64, BefError> {
    if xs.is_empty() {
        return Err(BefError::Shape(ErrorInfo::new(
            "mean-empty",
            "mean of an empty sequence is undefined",
        )));
    }
    Ok(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population (biased) covariance: `mean((x - mean(x)) * (y - mean(y)))`.
///
/// Divides by `N`, not `N - 1`. The selection, dominance and trait-dependent
/// complementarity terms are `N` times this quantity, and the additive
/// identities between them only hold for the biased estimator.
pub fn population_covariance(xs: &[f64], ys: &[f64]) -> Result<f64, BefError> {
    if xs.len() != ys.len() {
        return Err(BefError::Shape(
            ErrorInfo::new("covariance-length", "covariance inputs differ in length")
                .with_context("left", xs.len())
                .with_context("right", ys.len()),
        ));
    }
    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;
    let sum: f64 = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    Ok(sum / xs.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covariance_divides_by_n() {
        // The N - 1 estimator would give 10 / 3 here.
        let cov = population_covariance(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert!((cov - 2.5).abs() < 1e-12);
        let cov = population_covariance(&[1.0, 3.0], &[0.0, 4.0]).unwrap();
        assert!((cov - 2.0).abs() < 1e-12);
    }

    #[test]
    fn covariance_with_itself_is_variance() {
        let xs = [10.0, 6.0, 8.0];
        let var = population_covariance(&xs, &xs).unwrap();
        assert!((var - 8.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn shape_errors() {
        assert!(matches!(mean(&[]), Err(BefError::Shape(_))));
        assert!(matches!(
            population_covariance(&[1.0], &[1.0, 2.0]),
            Err(BefError::Shape(_))
        ));
    }
}
