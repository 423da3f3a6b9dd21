use crate::error::{ArtifactError, InferenceError};
use crate::model::scaler::check_len;
use crate::preprocessing::FEATURE_COUNT;
use ndarray::{Array1, ArrayView1};
use serde::Deserialize;

/// A fitted model mapping a scaled feature vector to a single prediction.
pub trait Regressor: Send + Sync {
    fn predict(&self, scaled: ArrayView1<'_, f64>) -> Result<f64, InferenceError>;

    /// Short name of the model family, used in logs.
    fn kind(&self) -> &'static str;
}

/// Ordinary least squares style model: `coefficients · x + intercept`.
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ArtifactError> {
        check_len("model.coefficients", coefficients.len())?;
        Ok(Self {
            coefficients: Array1::from(coefficients),
            intercept,
        })
    }
}

impl Regressor for LinearRegressor {
    fn predict(&self, scaled: ArrayView1<'_, f64>) -> Result<f64, InferenceError> {
        Ok(self.coefficients.dot(&scaled) + self.intercept)
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

/// One node of a flattened decision tree. Node 0 is the root.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Checks that every walk from the root terminates on a leaf without
    /// indexing out of bounds: children always point forward and in range.
    pub fn validate(&self, tree: usize) -> Result<(), ArtifactError> {
        let invalid = |node: usize, reason: String| ArtifactError::InvalidTree { tree, node, reason };

        if self.nodes.is_empty() {
            return Err(invalid(0, "tree has no nodes".to_string()));
        }

        for (node, entry) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = *entry
            {
                if feature >= FEATURE_COUNT {
                    return Err(invalid(node, format!("feature index {} out of range", feature)));
                }
                for child in [left, right] {
                    if child <= node || child >= self.nodes.len() {
                        return Err(invalid(node, format!("child index {} out of range", child)));
                    }
                }
            }
        }

        Ok(())
    }

    /// Walks from the root, going left when `x[feature] <= threshold`.
    pub fn evaluate(&self, x: ArrayView1<'_, f64>) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if x[feature] <= threshold { left } else { right };
                }
            }
        }
    }
}

/// How the outputs of an ensemble's trees are combined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    /// Random forest: average of all trees.
    Mean,
    /// Gradient boosting: `init + learning_rate * sum(trees)`.
    Boosted { init: f64, learning_rate: f64 },
}

#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    trees: Vec<DecisionTree>,
    aggregation: Aggregation,
}

impl TreeEnsemble {
    pub fn new(trees: Vec<DecisionTree>, aggregation: Aggregation) -> Result<Self, ArtifactError> {
        if trees.is_empty() {
            return Err(ArtifactError::EmptyEnsemble);
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(i)?;
        }
        Ok(Self { trees, aggregation })
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}

impl Regressor for TreeEnsemble {
    fn predict(&self, scaled: ArrayView1<'_, f64>) -> Result<f64, InferenceError> {
        let sum: f64 = self.trees.iter().map(|t| t.evaluate(scaled)).sum();
        let prediction = match self.aggregation {
            Aggregation::Mean => sum / self.trees.len() as f64,
            Aggregation::Boosted {
                init,
                learning_rate,
            } => init + learning_rate * sum,
        };
        Ok(prediction)
    }

    fn kind(&self) -> &'static str {
        match self.aggregation {
            Aggregation::Mean => "random_forest",
            Aggregation::Boosted { .. } => "gradient_boosting",
        }
    }
}
