//! Multi-output regression tree

use crate::error::{ProjectorError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use rand::seq::index::sample;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node holding the mean of every output
    Leaf {
        value: Vec<f64>,
        n_samples: usize,
    },
    /// Internal node with split
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        n_samples: usize,
        impurity: f64,
    },
}

/// Regression tree fitted against several targets at once.
///
/// Node impurity is the squared error averaged over outputs, so one split
/// serves every target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Tree root
    root: Option<TreeNode>,
    /// Maximum depth
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Features drawn at each split; all when `None`
    pub max_features: Option<usize>,
    /// Seed for feature sampling
    pub random_state: Option<u64>,
    /// Number of features
    n_features: usize,
    /// Number of outputs
    n_outputs: usize,
    /// Feature importances
    feature_importances: Option<Array1<f64>>,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-output sums of deviations from `offset`, the mean of the node
/// these stats were first built for
struct NodeStats {
    count: usize,
    offset: Vec<f64>,
    sum: Vec<f64>,
    sq_sum: Vec<f64>,
}

impl NodeStats {
    fn empty(offset: Vec<f64>) -> Self {
        let n_outputs = offset.len();
        Self {
            count: 0,
            offset,
            sum: vec![0.0; n_outputs],
            sq_sum: vec![0.0; n_outputs],
        }
    }

    fn from_indices(y: &Array2<f64>, indices: &[usize]) -> Self {
        let mut offset = vec![0.0; y.ncols()];
        if !indices.is_empty() {
            for &i in indices {
                for (k, &v) in y.row(i).iter().enumerate() {
                    offset[k] += v;
                }
            }
            let n = indices.len() as f64;
            offset.iter_mut().for_each(|o| *o /= n);
        }

        let mut stats = Self::empty(offset);
        for &i in indices {
            stats.add(y.row(i));
        }
        stats
    }

    fn add(&mut self, row: ArrayView1<f64>) {
        self.count += 1;
        for (k, &v) in row.iter().enumerate() {
            let d = v - self.offset[k];
            self.sum[k] += d;
            self.sq_sum[k] += d * d;
        }
    }

    fn minus(&self, other: &NodeStats) -> NodeStats {
        NodeStats {
            count: self.count - other.count,
            offset: self.offset.clone(),
            sum: self.sum.iter().zip(&other.sum).map(|(a, b)| a - b).collect(),
            sq_sum: self.sq_sum.iter().zip(&other.sq_sum).map(|(a, b)| a - b).collect(),
        }
    }

    /// Var = E[D²] - E[D]² over deviations D, averaged over outputs
    fn impurity(&self) -> f64 {
        if self.count == 0 || self.sum.is_empty() {
            return 0.0;
        }
        let n = self.count as f64;
        let total: f64 = self
            .sum
            .iter()
            .zip(&self.sq_sum)
            .map(|(s, q)| (q / n - (s / n).powi(2)).max(0.0))
            .sum();
        total / self.sum.len() as f64
    }

    fn mean(&self) -> Vec<f64> {
        if self.count == 0 {
            return self.offset.clone();
        }
        let n = self.count as f64;
        self.sum.iter().zip(&self.offset).map(|(s, o)| o + s / n).collect()
    }
}

impl DecisionTree {
    /// Create a new regression tree
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            random_state: None,
            n_features: 0,
            n_outputs: 0,
            feature_importances: None,
        }
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set minimum samples to split
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples;
        self
    }

    /// Set minimum samples in leaf
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples.max(1);
        self
    }

    /// Set the number of features drawn per split
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Set random state
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Fit the tree to training data
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array2<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.nrows() {
            return Err(ProjectorError::ShapeError {
                expected: format!("y rows = {}", n_samples),
                actual: format!("y rows = {}", y.nrows()),
            });
        }

        if n_samples == 0 {
            return Err(ProjectorError::ValidationError(
                "cannot fit a tree on zero samples".to_string(),
            ));
        }

        self.n_features = n_features;
        self.n_outputs = y.ncols();

        let mut rng = ChaCha8Rng::seed_from_u64(self.random_state.unwrap_or(0));
        let mut importances = vec![0.0; n_features];

        let indices: Vec<usize> = (0..n_samples).collect();
        self.root = Some(self.build_tree(x, y, indices, 0, &mut importances, &mut rng));

        // Normalize feature importances
        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for imp in &mut importances {
                *imp /= total;
            }
        }
        self.feature_importances = Some(Array1::from_vec(importances));

        Ok(self)
    }

    fn build_tree(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        indices: Vec<usize>,
        depth: usize,
        importances: &mut [f64],
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let n_samples = indices.len();
        let stats = NodeStats::from_indices(y, &indices);
        let impurity = stats.impurity();

        let should_stop = n_samples < self.min_samples_split
            || n_samples < 2 * self.min_samples_leaf
            || self.max_depth.map_or(false, |d| depth >= d)
            || impurity <= f64::EPSILON;

        if should_stop {
            return TreeNode::Leaf {
                value: stats.mean(),
                n_samples,
            };
        }

        let Some((feature_idx, threshold, child_impurity)) =
            self.find_best_split(x, y, &indices, &stats, rng)
        else {
            return TreeNode::Leaf {
                value: stats.mean(),
                n_samples,
            };
        };

        importances[feature_idx] += n_samples as f64 * (impurity - child_impurity);

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| x[[i, feature_idx]] <= threshold);

        let left = Box::new(self.build_tree(x, y, left_indices, depth + 1, importances, rng));
        let right = Box::new(self.build_tree(x, y, right_indices, depth + 1, importances, rng));

        TreeNode::Split {
            feature_idx,
            threshold,
            left,
            right,
            n_samples,
            impurity,
        }
    }

    /// Best (feature, threshold, weighted child impurity) over the sampled features
    fn find_best_split(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        indices: &[usize],
        parent: &NodeStats,
        rng: &mut ChaCha8Rng,
    ) -> Option<(usize, f64, f64)> {
        let n_features = x.ncols();
        let n_try = self.max_features.unwrap_or(n_features).clamp(1, n_features.max(1));
        let candidates: Vec<usize> = if n_try >= n_features {
            (0..n_features).collect()
        } else {
            sample(rng, n_features, n_try).into_vec()
        };

        let n = indices.len() as f64;
        let parent_impurity = parent.impurity();
        let mut best: Option<(usize, f64, f64)> = None;
        let mut best_gain = 0.0f64;

        for feature_idx in candidates {
            let mut sorted = indices.to_vec();
            sorted.sort_by(|&a, &b| {
                x[[a, feature_idx]]
                    .partial_cmp(&x[[b, feature_idx]])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut left = NodeStats::empty(parent.offset.clone());
            for pos in 0..sorted.len() - 1 {
                left.add(y.row(sorted[pos]));

                let current = x[[sorted[pos], feature_idx]];
                let next = x[[sorted[pos + 1], feature_idx]];
                if current >= next {
                    continue;
                }

                let right_count = sorted.len() - left.count;
                if left.count < self.min_samples_leaf || right_count < self.min_samples_leaf {
                    continue;
                }

                let right = parent.minus(&left);
                let weighted = (left.count as f64 * left.impurity()
                    + right.count as f64 * right.impurity())
                    / n;

                let gain = parent_impurity - weighted;
                if gain > best_gain {
                    best_gain = gain;
                    best = Some((feature_idx, (current + next) / 2.0, weighted));
                }
            }
        }

        best
    }

    /// Predict every output for each row
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        let root = self.root.as_ref().ok_or(ProjectorError::ModelNotFitted)?;

        if x.ncols() != self.n_features {
            return Err(ProjectorError::ShapeError {
                expected: format!("{} features", self.n_features),
                actual: format!("{} features", x.ncols()),
            });
        }

        let mut predictions = Array2::zeros((x.nrows(), self.n_outputs));
        for (i, sample) in x.rows().into_iter().enumerate() {
            let value = Self::predict_sample(root, sample);
            for (k, v) in value.iter().enumerate() {
                predictions[[i, k]] = *v;
            }
        }

        Ok(predictions)
    }

    fn predict_sample<'a>(node: &'a TreeNode, sample: ArrayView1<f64>) -> &'a [f64] {
        match node {
            TreeNode::Leaf { value, .. } => value,
            TreeNode::Split { feature_idx, threshold, left, right, .. } => {
                if sample[*feature_idx] <= *threshold {
                    Self::predict_sample(left, sample)
                } else {
                    Self::predict_sample(right, sample)
                }
            }
        }
    }

    /// Get feature importances
    pub fn feature_importances(&self) -> Option<&Array1<f64>> {
        self.feature_importances.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn depth(node: &TreeNode) -> usize {
        match node {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => 1 + depth(left).max(depth(right)),
        }
    }

    fn leaves(node: &TreeNode) -> usize {
        match node {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => leaves(left) + leaves(right),
        }
    }

    #[test]
    fn test_fits_two_outputs() {
        let x = array![[1.0], [2.0], [3.0], [4.0], [5.0]];
        let y = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0], [4.0, 40.0], [5.0, 50.0]];

        let mut tree = DecisionTree::new();
        tree.fit(&x, &y).unwrap();

        let predictions = tree.predict(&x).unwrap();
        assert_eq!(predictions.dim(), (5, 2));
        // Unlimited depth memorizes distinct inputs
        for (p, a) in predictions.iter().zip(y.iter()) {
            assert!((p - a).abs() < 1e-9, "{} != {}", p, a);
        }
    }

    #[test]
    fn test_max_depth() {
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let y = array![[0.0], [1.0], [2.0], [3.0]];

        let mut tree = DecisionTree::new().with_max_depth(1);
        tree.fit(&x, &y).unwrap();

        let root = tree.root.as_ref().unwrap();
        assert!(depth(root) <= 2);
        assert!(leaves(root) <= 2);
    }

    #[test]
    fn test_constant_target_is_leaf() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![[7.0, 7.0], [7.0, 7.0], [7.0, 7.0]];

        let mut tree = DecisionTree::new();
        tree.fit(&x, &y).unwrap();

        assert_eq!(leaves(tree.root.as_ref().unwrap()), 1);
        assert_eq!(tree.predict(&array![[100.0]]).unwrap(), array![[7.0, 7.0]]);
    }

    #[test]
    fn test_constant_year_is_pure() {
        let y = Array2::from_elem((1000, 2), 2010.3);
        let indices: Vec<usize> = (0..1000).collect();

        let stats = NodeStats::from_indices(&y, &indices);
        assert!(stats.impurity() <= f64::EPSILON);
        assert!((stats.mean()[0] - 2010.3).abs() < 1e-9);
    }

    #[test]
    fn test_constant_year_targets_do_not_split() {
        let x = Array2::from_shape_fn((200, 1), |(i, _)| i as f64);
        let y = Array2::from_shape_fn((200, 2), |(_, k)| if k == 0 { 2009.7 } else { 2021.1 });

        let mut tree = DecisionTree::new();
        tree.fit(&x, &y).unwrap();

        assert_eq!(leaves(tree.root.as_ref().unwrap()), 1);
        let prediction = tree.predict(&array![[50.0]]).unwrap();
        assert!((prediction[[0, 0]] - 2009.7).abs() < 1e-9);
        assert!((prediction[[0, 1]] - 2021.1).abs() < 1e-9);
    }

    #[test]
    fn test_split_stats_match_direct_stats() {
        let y = array![[2005.0, 1.0], [2006.0, 3.0], [2007.0, 5.0], [2012.0, 11.0]];
        let all = NodeStats::from_indices(&y, &[0, 1, 2, 3]);

        let mut left = NodeStats::empty(all.offset.clone());
        left.add(y.row(0));
        left.add(y.row(1));
        let right = all.minus(&left);

        let direct_left = NodeStats::from_indices(&y, &[0, 1]);
        let direct_right = NodeStats::from_indices(&y, &[2, 3]);
        assert!((left.impurity() - direct_left.impurity()).abs() < 1e-9);
        assert!((right.impurity() - direct_right.impurity()).abs() < 1e-9);
        assert!((right.mean()[0] - 2009.5).abs() < 1e-9);
    }

    #[test]
    fn test_feature_importances() {
        let x = array![[1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [4.0, 0.0]];
        let y = array![[1.0], [2.0], [3.0], [4.0]];

        let mut tree = DecisionTree::new();
        tree.fit(&x, &y).unwrap();

        let importances = tree.feature_importances().unwrap();
        assert!((importances[0] - 1.0).abs() < 1e-9);
        assert_eq!(importances[1], 0.0);
    }

    #[test]
    fn test_predict_wrong_width() {
        let x = array![[1.0, 2.0], [2.0, 3.0]];
        let y = array![[1.0], [2.0]];
        let mut tree = DecisionTree::new();
        tree.fit(&x, &y).unwrap();

        assert!(matches!(
            tree.predict(&array![[1.0]]),
            Err(ProjectorError::ShapeError { .. })
        ));
    }

    #[test]
    fn test_unfitted() {
        let tree = DecisionTree::new();
        assert!(matches!(
            tree.predict(&array![[1.0]]),
            Err(ProjectorError::ModelNotFitted)
        ));
    }
}
