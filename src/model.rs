use crate::models::{FeedbackRecord, FEATURE_COUNT};

/// Probabilities are only reported once this many votes exist; below that
/// the endpoints answer with `null` / `"need_feedback"`.
pub const MIN_FEEDBACK: usize = 15;

const EPOCHS: usize = 400;
const LEARNING_RATE: f64 = 0.5;

/// Logistic regression over the 15 normalized RGB channels of a palette,
/// fit with batch gradient descent on every stored vote.
#[derive(Debug, Clone)]
pub struct LikeModel {
    weights: Vec<f64>,
    bias: f64,
}

impl LikeModel {
    /// Returns `None` until the store holds at least one like and one
    /// dislike; a single-class fit would be degenerate.
    pub fn fit(samples: &[FeedbackRecord]) -> Option<Self> {
        let likes = samples.iter().filter(|sample| sample.liked).count();
        if likes == 0 || likes == samples.len() {
            return None;
        }

        let mut weights = vec![0.0; FEATURE_COUNT];
        let mut bias = 0.0;
        let count = samples.len() as f64;

        for _ in 0..EPOCHS {
            let mut weight_grad = vec![0.0; FEATURE_COUNT];
            let mut bias_grad = 0.0;

            for sample in samples {
                let label = if sample.liked { 1.0 } else { 0.0 };
                let error = predict_raw(&weights, bias, &sample.features) - label;
                for (grad, feature) in weight_grad.iter_mut().zip(&sample.features) {
                    *grad += error * feature;
                }
                bias_grad += error;
            }

            for (weight, grad) in weights.iter_mut().zip(&weight_grad) {
                *weight -= LEARNING_RATE * grad / count;
            }
            bias -= LEARNING_RATE * bias_grad / count;
        }

        Some(Self { weights, bias })
    }

    /// Estimated probability of a like, in (0,1).
    pub fn predict(&self, features: &[f64]) -> f64 {
        predict_raw(&self.weights, self.bias, features)
    }
}

fn predict_raw(weights: &[f64], bias: f64, features: &[f64]) -> f64 {
    let z: f64 = weights
        .iter()
        .zip(features)
        .map(|(weight, feature)| weight * feature)
        .sum::<f64>()
        + bias;
    sigmoid(z)
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(liked: bool, level: f64) -> FeedbackRecord {
        FeedbackRecord {
            palette_id: 0,
            liked,
            features: vec![level; FEATURE_COUNT],
        }
    }

    #[test]
    fn fit_requires_both_classes() {
        assert!(LikeModel::fit(&[]).is_none());
        let only_likes: Vec<_> = (0..5).map(|_| vote(true, 0.8)).collect();
        assert!(LikeModel::fit(&only_likes).is_none());
        let only_dislikes: Vec<_> = (0..5).map(|_| vote(false, 0.2)).collect();
        assert!(LikeModel::fit(&only_dislikes).is_none());
    }

    #[test]
    fn fit_separates_bright_likes_from_dark_dislikes() {
        let mut samples = Vec::new();
        for i in 0..10 {
            samples.push(vote(true, 0.8 + 0.01 * f64::from(i)));
            samples.push(vote(false, 0.1 + 0.01 * f64::from(i)));
        }
        let model = LikeModel::fit(&samples).expect("trainable");

        let bright = model.predict(&vec![0.85; FEATURE_COUNT]);
        let dark = model.predict(&vec![0.15; FEATURE_COUNT]);
        assert!(bright > dark, "bright={bright} dark={dark}");
        assert!(bright > 0.5);
        assert!(dark < 0.5);
    }

    #[test]
    fn predictions_are_probabilities() {
        let samples = vec![vote(true, 0.9), vote(false, 0.1), vote(true, 0.8), vote(false, 0.2)];
        let model = LikeModel::fit(&samples).expect("trainable");
        for level in [0.0, 0.3, 0.7, 1.0] {
            let proba = model.predict(&vec![level; FEATURE_COUNT]);
            assert!((0.0..=1.0).contains(&proba));
        }
    }
}
