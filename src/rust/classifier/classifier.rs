use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use super::model::Model;

/// The outcome of classifying one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// The label with the highest score; ties go to the label seen first in training
    pub label: String,
    /// Normalized `P(class | text)` per label, in model label order
    pub posteriors: IndexMap<String, f64>,
    /// Unnormalized `prior * Π P(word | class)` per label, in model label order
    pub scores: IndexMap<String, f64>,
    /// `false` when no input word is in the vocabulary. Scores and posteriors then
    /// hold the class priors.
    pub has_vocabulary_overlap: bool,
}

impl Prediction {
    pub fn posterior(&self, label: &str) -> Option<f64> {
        self.posteriors.get(label).copied()
    }
}

impl Model {
    /// Predicts the class of the input text and returns the full posterior distribution.
    ///
    /// Each distinct in-vocabulary word contributes one smoothed factor; repeated
    /// words are counted once. Posteriors are normalized in log space, so inputs
    /// long enough to underflow the raw product still get a defined distribution.
    ///
    /// # Example
    /// ```
    /// # fn main() -> Result<(), bayeslens::ClassifierError> {
    /// use bayeslens::{train, TrainingExample};
    ///
    /// let model = train(&[
    ///     TrainingExample::new("mercados em alta", "alta"),
    ///     TrainingExample::new("guerra comercial derruba mercados", "baixa"),
    /// ])?;
    /// let prediction = model.predict("guerra comercial");
    /// assert_eq!(prediction.label, "baixa");
    /// let total: f64 = prediction.posteriors.values().sum();
    /// assert!((total - 1.0).abs() < 1e-9);
    /// # Ok(())
    /// # }
    /// ```
    pub fn predict(&self, text: &str) -> Prediction {
        let words = self.known_words(text);
        let terms = self.class_terms(&words);

        if words.is_empty() {
            debug!("No vocabulary word in input, falling back to priors");
        }

        // Shift by the largest log score before exponentiating.
        let max_log = terms
            .values()
            .map(|t| t.log_score)
            .fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = terms.values().map(|t| (t.log_score - max_log).exp()).collect();
        let normalizer: f64 = weights.iter().sum();

        let posteriors = terms
            .keys()
            .zip(&weights)
            .map(|(label, weight)| (label.to_string(), weight / normalizer))
            .collect();
        let scores = terms
            .iter()
            .map(|(label, t)| (label.to_string(), t.score))
            .collect();

        let mut best: Option<(&str, f64)> = None;
        for (label, t) in &terms {
            if best.map_or(true, |(_, log)| t.log_score > log) {
                best = Some((*label, t.log_score));
            }
        }
        let label = best.map(|(label, _)| label.to_string()).unwrap_or_default();

        Prediction {
            label,
            posteriors,
            scores,
            has_vocabulary_overlap: !words.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::classifier::builder::train;
    use crate::dataset::TrainingExample;

    #[test]
    fn test_tie_goes_to_first_label() {
        let model = train(&[
            TrainingExample::new("queda", "baixa"),
            TrainingExample::new("subida", "alta"),
        ])
        .unwrap();
        let prediction = model.predict("neutro");
        assert!(!prediction.has_vocabulary_overlap);
        assert_eq!(prediction.label, "baixa");
        assert_eq!(prediction.posterior("baixa"), Some(0.5));
        assert_eq!(prediction.scores["alta"], 0.5);
    }

    #[test]
    fn test_empty_text_returns_priors() {
        let model = train(&[
            TrainingExample::new("queda", "baixa"),
            TrainingExample::new("subida", "alta"),
            TrainingExample::new("subida forte", "alta"),
        ])
        .unwrap();
        let prediction = model.predict("");
        assert!(!prediction.has_vocabulary_overlap);
        assert_eq!(prediction.label, "alta");
        assert!((prediction.posterior("alta").unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((prediction.posterior("baixa").unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_long_input_does_not_underflow() {
        let words: Vec<String> = (0..400).map(|i| format!("w{:03}", i)).collect();
        let text = words.join(" ");
        let model = train(&[
            TrainingExample::new(text.clone(), "baixa"),
            TrainingExample::new("subida", "alta"),
        ])
        .unwrap();

        let prediction = model.predict(&text);
        assert_eq!(prediction.scores["baixa"], 0.0);
        assert_eq!(prediction.label, "baixa");
        let total: f64 = prediction.posteriors.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(prediction.posterior("baixa").unwrap() > 0.5);
    }
}
