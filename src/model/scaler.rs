use crate::error::ArtifactError;
use crate::preprocessing::FEATURE_COUNT;
use ndarray::{Array1, ArrayView1};

/// Anything that maps a raw feature vector to the space the regressor was fit in.
pub trait FeatureTransform: Send + Sync {
    fn transform(&self, features: ArrayView1<'_, f64>) -> Array1<f64>;
}

/// Standardization fitted offline: `(x - mean) / scale`, per feature.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self, ArtifactError> {
        check_len("scaler.mean", mean.len())?;
        check_len("scaler.scale", scale.len())?;

        // Zero-variance features were left unscaled at fit time.
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect::<Array1<f64>>();

        Ok(Self {
            mean: Array1::from(mean),
            scale,
        })
    }

    pub fn mean(&self) -> ArrayView1<'_, f64> {
        self.mean.view()
    }

    pub fn scale(&self) -> ArrayView1<'_, f64> {
        self.scale.view()
    }
}

impl FeatureTransform for StandardScaler {
    fn transform(&self, features: ArrayView1<'_, f64>) -> Array1<f64> {
        (&features - &self.mean) / &self.scale
    }
}

pub(crate) fn check_len(field: &str, got: usize) -> Result<(), ArtifactError> {
    if got != FEATURE_COUNT {
        return Err(ArtifactError::Shape {
            field: field.to_string(),
            expected: FEATURE_COUNT,
            got,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn scaler() -> StandardScaler {
        StandardScaler::new(vec![3000.0, 3.0, 2.0, 1990.0], vec![1000.0, 1.0, 1.0, 20.0]).unwrap()
    }

    #[test]
    fn test_transform_applies_formula() {
        let x = array![4000.0, 4.0, 3.0, 2010.0];
        let scaled = scaler().transform(x.view());
        assert_eq!(scaled, array![1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_transform_matches_fitted_parameters() {
        let s = scaler();
        let x = array![2500.0, 1.0, 2.5, 1950.0];
        let scaled = s.transform(x.view());
        for i in 0..FEATURE_COUNT {
            let expected = (x[i] - s.mean()[i]) / s.scale()[i];
            assert_eq!(scaled[i], expected);
        }
    }

    #[test]
    fn test_transform_is_linear_in_distance_from_mean() {
        let s = scaler();
        let near = s.transform(array![3500.0, 4.0, 2.5, 2000.0].view());
        let far = s.transform(array![4000.0, 5.0, 3.0, 2010.0].view());
        for i in 0..FEATURE_COUNT {
            assert!((far[i] - 2.0 * near[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_scale_is_treated_as_one() {
        let s = StandardScaler::new(vec![1.0, 2.0, 3.0, 4.0], vec![0.0, 1.0, 1.0, 1.0]).unwrap();
        assert_eq!(s.scale()[0], 1.0);
        let scaled = s.transform(array![5.0, 2.0, 3.0, 4.0].view());
        assert_eq!(scaled[0], 4.0);
    }

    #[test]
    fn test_rejects_wrong_lengths() {
        let err = StandardScaler::new(vec![1.0, 2.0, 3.0], vec![1.0; 4]).unwrap_err();
        match err {
            ArtifactError::Shape { field, got, .. } => {
                assert_eq!(field, "scaler.mean");
                assert_eq!(got, 3);
            }
            _ => panic!("Expected Shape error"),
        }

        assert!(StandardScaler::new(vec![1.0; 4], vec![1.0; 5]).is_err());
    }
}
