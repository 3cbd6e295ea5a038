//! Second-order regression trees.
//!
//! Split gain for a node with gradient sum `G` and hessian sum `H` split into
//! `(GL, HL)` and `(GR, HR)`:
//!
//! ```text
//! gain = ½ [ T(GL)² / (HL + λ) + T(GR)² / (HR + λ) − T(G)² / (H + λ) ] − γ
//! ```
//!
//! where `T` soft-thresholds by `α` (L1). Leaf weight is `−T(G) / (H + λ)`.

use popcast_core::models::FeatureName;
use serde::{Deserialize, Serialize};

/// Row of normalized model inputs.
pub type Row = [f64; FeatureName::COUNT];

/// Regularization and stopping parameters shared by every tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_child_weight: f64,
    pub gamma: f64,
    pub reg_alpha: f64,
    pub reg_lambda: f64,
    /// Shrinkage folded into leaf weights.
    pub learning_rate: f64,
}

/// A node in a fitted tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        /// Rows with `x[feature] < threshold` go left.
        threshold: f64,
        gain: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
    Leaf {
        weight: f64,
    },
}

impl TreeNode {
    /// Leaves have depth 0.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Largest feature index any split reads, `None` for a lone leaf.
    pub fn max_feature(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => Some(*feature)
                .max(left.max_feature())
                .max(right.max_feature()),
        }
    }

    fn accumulate_gain(&self, totals: &mut [f64; FeatureName::COUNT]) {
        if let TreeNode::Split {
            feature,
            gain,
            left,
            right,
            ..
        } = self
        {
            if let Some(slot) = totals.get_mut(*feature) {
                *slot += gain;
            }
            left.accumulate_gain(totals);
            right.accumulate_gain(totals);
        }
    }
}

/// One fitted regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub root: TreeNode,
}

impl RegressionTree {
    /// Grow a tree over `rows` restricted to `sample` and `features`.
    pub fn grow(
        x: &[Row],
        grad: &[f64],
        hess: &[f64],
        sample: &[usize],
        features: &[usize],
        params: &TreeParams,
    ) -> Self {
        let root = build_node(x, grad, hess, sample.to_vec(), features, params, 0);
        Self { root }
    }

    pub fn predict(&self, row: &Row) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf { weight } => return *weight,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    node = if row[*feature] < *threshold { left } else { right };
                }
            }
        }
    }

    /// Add this tree's split gains into `totals`.
    pub fn accumulate_gain(&self, totals: &mut [f64; FeatureName::COUNT]) {
        self.root.accumulate_gain(totals);
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

fn soft_threshold(g: f64, alpha: f64) -> f64 {
    if g > alpha {
        g - alpha
    } else if g < -alpha {
        g + alpha
    } else {
        0.0
    }
}

fn score(g: f64, h: f64, params: &TreeParams) -> f64 {
    let t = soft_threshold(g, params.reg_alpha);
    t * t / (h + params.reg_lambda)
}

fn leaf_weight(g: f64, h: f64, params: &TreeParams) -> f64 {
    -soft_threshold(g, params.reg_alpha) / (h + params.reg_lambda) * params.learning_rate
}

struct Candidate {
    feature: usize,
    threshold: f64,
    gain: f64,
}

fn build_node(
    x: &[Row],
    grad: &[f64],
    hess: &[f64],
    indices: Vec<usize>,
    features: &[usize],
    params: &TreeParams,
    depth: usize,
) -> TreeNode {
    let g_total: f64 = indices.iter().map(|&i| grad[i]).sum();
    let h_total: f64 = indices.iter().map(|&i| hess[i]).sum();
    let leaf = TreeNode::Leaf {
        weight: leaf_weight(g_total, h_total, params),
    };

    if depth >= params.max_depth || h_total < 2.0 * params.min_child_weight {
        return leaf;
    }

    let Some(best) = best_split(x, grad, hess, &indices, features, g_total, h_total, params)
    else {
        return leaf;
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| x[i][best.feature] < best.threshold);

    TreeNode::Split {
        feature: best.feature,
        threshold: best.threshold,
        gain: best.gain,
        left: Box::new(build_node(x, grad, hess, left_idx, features, params, depth + 1)),
        right: Box::new(build_node(x, grad, hess, right_idx, features, params, depth + 1)),
    }
}

/// Exact greedy search over every distinct threshold of every allowed feature.
#[allow(clippy::too_many_arguments)]
fn best_split(
    x: &[Row],
    grad: &[f64],
    hess: &[f64],
    indices: &[usize],
    features: &[usize],
    g_total: f64,
    h_total: f64,
    params: &TreeParams,
) -> Option<Candidate> {
    let parent = score(g_total, h_total, params);
    let mut best: Option<Candidate> = None;
    let mut order = indices.to_vec();

    for &feature in features {
        order.sort_by(|&a, &b| x[a][feature].total_cmp(&x[b][feature]));

        let (mut gl, mut hl) = (0.0, 0.0);
        for pair in order.windows(2) {
            let (i, next) = (pair[0], pair[1]);
            gl += grad[i];
            hl += hess[i];

            let (v, v_next) = (x[i][feature], x[next][feature]);
            if v == v_next {
                continue;
            }
            let (gr, hr) = (g_total - gl, h_total - hl);
            if hl < params.min_child_weight || hr < params.min_child_weight {
                continue;
            }

            let gain =
                0.5 * (score(gl, hl, params) + score(gr, hr, params) - parent) - params.gamma;
            if gain > 0.0 && best.as_ref().map_or(true, |b| gain > b.gain) {
                best = Some(Candidate {
                    feature,
                    threshold: v + (v_next - v) / 2.0,
                    gain,
                });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> TreeParams {
        TreeParams {
            max_depth: 3,
            min_child_weight: 1.0,
            gamma: 0.0,
            reg_alpha: 0.0,
            reg_lambda: 0.0,
            learning_rate: 1.0,
        }
    }

    fn step_data() -> (Vec<Row>, Vec<f64>) {
        let x: Vec<Row> = (0..20)
            .map(|i| {
                let mut row = [0.0; FeatureName::COUNT];
                row[2] = i as f64;
                row
            })
            .collect();
        let y = (0..20).map(|i| if i < 10 { -1.0 } else { 1.0 }).collect();
        (x, y)
    }

    #[test]
    fn splits_on_the_informative_feature() {
        let (x, y) = step_data();
        // Squared error from a zero prediction: g = -y, h = 1.
        let grad: Vec<f64> = y.iter().map(|v| -v).collect();
        let hess = vec![1.0; y.len()];
        let sample: Vec<usize> = (0..x.len()).collect();
        let features: Vec<usize> = (0..FeatureName::COUNT).collect();

        let tree = RegressionTree::grow(&x, &grad, &hess, &sample, &features, &params());
        match &tree.root {
            TreeNode::Split {
                feature, threshold, ..
            } => {
                assert_eq!(*feature, 2);
                assert_eq!(*threshold, 9.5);
            }
            leaf => panic!("expected a split, got {leaf:?}"),
        }
        assert_eq!(tree.predict(&x[0]), -1.0);
        assert_eq!(tree.predict(&x[19]), 1.0);
    }

    #[test]
    fn gamma_prunes_weak_splits() {
        let (x, y) = step_data();
        let grad: Vec<f64> = y.iter().map(|v| -v).collect();
        let hess = vec![1.0; y.len()];
        let sample: Vec<usize> = (0..x.len()).collect();
        let features: Vec<usize> = (0..FeatureName::COUNT).collect();
        let strict = TreeParams {
            gamma: 1_000.0,
            ..params()
        };

        let tree = RegressionTree::grow(&x, &grad, &hess, &sample, &features, &strict);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn min_child_weight_blocks_small_children() {
        let (x, y) = step_data();
        let grad: Vec<f64> = y.iter().map(|v| -v).collect();
        let hess = vec![1.0; y.len()];
        let sample: Vec<usize> = (0..x.len()).collect();
        let features: Vec<usize> = (0..FeatureName::COUNT).collect();
        let heavy = TreeParams {
            min_child_weight: 11.0,
            ..params()
        };

        let tree = RegressionTree::grow(&x, &grad, &hess, &sample, &features, &heavy);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn alpha_shrinks_leaf_weights_toward_zero() {
        let p = TreeParams {
            reg_alpha: 2.0,
            reg_lambda: 1.0,
            ..params()
        };
        assert_eq!(leaf_weight(1.5, 3.0, &p), 0.0);
        assert!((leaf_weight(-6.0, 3.0, &p) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn importance_sums_split_gains() {
        let (x, y) = step_data();
        let grad: Vec<f64> = y.iter().map(|v| -v).collect();
        let hess = vec![1.0; y.len()];
        let sample: Vec<usize> = (0..x.len()).collect();
        let features: Vec<usize> = (0..FeatureName::COUNT).collect();
        let tree = RegressionTree::grow(&x, &grad, &hess, &sample, &features, &params());

        let mut totals = [0.0; FeatureName::COUNT];
        tree.accumulate_gain(&mut totals);
        assert!(totals[2] > 0.0);
        assert_eq!(totals.iter().filter(|g| **g > 0.0).count(), 1);
    }
}
