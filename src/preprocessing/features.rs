use crate::error::ValidationError;
use ndarray::ArrayView1;
use serde_json::Value;

/// Number of features every model in this service consumes.
pub const FEATURE_COUNT: usize = 4;

/// Positional meaning of each feature. Models must be fit in this order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["square_footage", "bedrooms", "bathrooms", "year_built"];

/// A validated, ordered feature vector: exactly four finite numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Validates raw numbers. Values are passed through verbatim; there are
    /// no range checks.
    pub fn new(values: &[f64]) -> Result<Self, ValidationError> {
        let values: [f64; FEATURE_COUNT] =
            values.try_into().map_err(|_| ValidationError::Cardinality {
                expected: FEATURE_COUNT,
                got: values.len(),
            })?;

        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NonFinite { index, value });
        }

        Ok(Self(values))
    }

    /// Extracts features from the elements of a JSON array.
    pub fn from_json(values: &[Value]) -> Result<Self, ValidationError> {
        if values.len() != FEATURE_COUNT {
            return Err(ValidationError::Cardinality {
                expected: FEATURE_COUNT,
                got: values.len(),
            });
        }

        let mut numbers = [0.0; FEATURE_COUNT];
        for (index, value) in values.iter().enumerate() {
            numbers[index] = value.as_f64().ok_or_else(|| ValidationError::NonNumeric {
                index,
                found: value.to_string(),
            })?;
        }

        Self::new(&numbers)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.0[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_four_numbers() {
        let features = FeatureVector::new(&[2000.0, 3.0, 2.0, 2000.0]).unwrap();
        assert_eq!(features.as_slice(), &[2000.0, 3.0, 2.0, 2000.0]);
        assert_eq!(features.view().len(), FEATURE_COUNT);
    }

    #[test]
    fn test_rejects_wrong_cardinality() {
        for values in [vec![], vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0, 4.0, 5.0]] {
            let err = FeatureVector::new(&values).unwrap_err();
            assert_eq!(
                err,
                ValidationError::Cardinality {
                    expected: 4,
                    got: values.len()
                }
            );
        }
    }

    #[test]
    fn test_rejects_nan_and_infinity() {
        let err = FeatureVector::new(&[1.0, f64::NAN, 3.0, 4.0]).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { index: 1, .. }));

        let err = FeatureVector::new(&[1.0, 2.0, 3.0, f64::NEG_INFINITY]).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { index: 3, .. }));
    }

    #[test]
    fn test_no_range_checks() {
        // Negative square footage is passed through untouched.
        let features = FeatureVector::new(&[-500.0, 0.0, 0.0, 3000.0]).unwrap();
        assert_eq!(features.as_slice()[0], -500.0);
    }

    #[test]
    fn test_from_json_accepts_integers_and_floats() {
        let values = vec![json!(2000), json!(3), json!(2.5), json!(1999)];
        let features = FeatureVector::from_json(&values).unwrap();
        assert_eq!(features.as_slice(), &[2000.0, 3.0, 2.5, 1999.0]);
    }

    #[test]
    fn test_from_json_rejects_non_numeric() {
        let cases = [
            (vec![json!(null), json!(3), json!(2), json!(2000)], 0),
            (vec![json!(2000), json!("3"), json!(2), json!(2000)], 1),
            (vec![json!(2000), json!(3), json!(true), json!(2000)], 2),
            (vec![json!(2000), json!(3), json!(2), json!([2000])], 3),
        ];

        for (values, bad_index) in cases {
            match FeatureVector::from_json(&values) {
                Err(ValidationError::NonNumeric { index, .. }) => assert_eq!(index, bad_index),
                other => panic!("Expected NonNumeric, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_from_json_checks_cardinality_first() {
        let values = vec![json!("a"), json!(1)];
        let err = FeatureVector::from_json(&values).unwrap_err();
        assert!(matches!(err, ValidationError::Cardinality { got: 2, .. }));
    }
}
