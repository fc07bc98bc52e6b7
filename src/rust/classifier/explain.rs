use std::fmt::Write as _;

use serde::Serialize;

use super::model::Model;

/// One smoothed `P(word | class)` term of an explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordProbability {
    pub word: String,
    pub probability: f64,
}

/// The score breakdown for a single class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassExplanation {
    pub label: String,
    /// `P(class)`
    pub prior: f64,
    /// One entry per distinct in-vocabulary input word, in first-occurrence order
    pub word_probabilities: Vec<WordProbability>,
    /// `prior * Π probability`, unnormalized. Equal to the class's prediction score.
    pub total_probability: f64,
}

/// Word-by-word, class-by-class reconstruction of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    /// Per-class breakdowns in model label order; empty without vocabulary overlap
    pub classes: Vec<ClassExplanation>,
    pub has_vocabulary_overlap: bool,
}

impl Explanation {
    pub fn class(&self, label: &str) -> Option<&ClassExplanation> {
        self.classes.iter().find(|c| c.label == label)
    }

    /// Renders the breakdown as plain text, one block per class.
    pub fn render(&self) -> String {
        if !self.has_vocabulary_overlap {
            return "No word of the text was found in the model vocabulary.\n".to_string();
        }

        let mut out = String::new();
        for class in &self.classes {
            let _ = writeln!(out, "Class '{}':", class.label);
            let _ = writeln!(out, "  P({}) = {:.2}", class.label, class.prior);
            for term in &class.word_probabilities {
                let _ = writeln!(
                    out,
                    "  P({}|{}) = {:.4}",
                    term.word, class.label, term.probability
                );
            }
            let _ = writeln!(out, "  Total = {:.4}", class.total_probability);
            if class.total_probability == 0.0 {
                let _ = writeln!(out, "  (total underflows to zero)");
            }
        }
        out
    }
}

impl Model {
    /// Explains how the score of every class is computed for `text`.
    ///
    /// Uses the same smoothing terms as [`Model::predict`], so each class's
    /// `total_probability` equals its prediction score.
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
    /// let explanation = model.explain("guerra guerra comercial");
    /// let baixa = explanation.class("baixa").unwrap();
    /// assert_eq!(baixa.word_probabilities.len(), 2);
    /// assert_eq!(baixa.total_probability, model.predict("guerra guerra comercial").scores["baixa"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn explain(&self, text: &str) -> Explanation {
        let words = self.known_words(text);
        if words.is_empty() {
            return Explanation {
                classes: Vec::new(),
                has_vocabulary_overlap: false,
            };
        }

        let classes = self
            .class_terms(&words)
            .into_iter()
            .map(|(label, terms)| ClassExplanation {
                label: label.to_string(),
                prior: terms.prior,
                word_probabilities: words
                    .iter()
                    .zip(terms.word_probabilities)
                    .map(|((word, _), probability)| WordProbability {
                        word: word.clone(),
                        probability,
                    })
                    .collect(),
                total_probability: terms.score,
            })
            .collect();

        Explanation {
            classes,
            has_vocabulary_overlap: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::classifier::builder::train;
    use crate::dataset::TrainingExample;

    fn model() -> crate::Model {
        train(&[
            TrainingExample::new("guerra comercial", "baixa"),
            TrainingExample::new("mercados em alta", "alta"),
        ])
        .unwrap()
    }

    #[test]
    fn test_no_overlap() {
        let explanation = model().explain("nada a ver");
        assert!(!explanation.has_vocabulary_overlap);
        assert!(explanation.classes.is_empty());
        assert!(explanation.render().contains("No word"));
    }

    #[test]
    fn test_words_are_distinct_and_ordered() {
        let explanation = model().explain("Mercados, guerra... mercados e guerra");
        let words: Vec<&str> = explanation.classes[0]
            .word_probabilities
            .iter()
            .map(|w| w.word.as_str())
            .collect();
        assert_eq!(words, vec!["mercados", "guerra"]);
    }

    #[test]
    fn test_render() {
        let rendered = model().explain("guerra").render();
        assert!(rendered.contains("Class 'baixa':"));
        assert!(rendered.contains("P(baixa) = 0.50"));
        // (1 + 1) / (2 + 5)
        assert!(rendered.contains("P(guerra|baixa) = 0.2857"));
    }
}
