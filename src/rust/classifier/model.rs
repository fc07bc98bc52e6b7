use indexmap::IndexMap;

use super::tokenizer::{Tokenizer, TokenizerConfig};
use super::vocabulary::{CountVector, Vocabulary};
use super::ClassifierInfo;

/// Aggregated training counts for a single label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStats {
    /// Number of training examples carrying this label
    pub document_count: usize,
    /// Element-wise sum of the count vectors of this label's examples
    pub word_counts: CountVector,
    /// Sum of `word_counts`
    pub total_word_count: u64,
}

impl ClassStats {
    pub(crate) fn empty(vocabulary_size: usize) -> Self {
        Self {
            document_count: 0,
            word_counts: CountVector::zeros(vocabulary_size),
            total_word_count: 0,
        }
    }

    pub(crate) fn add_document(&mut self, counts: &CountVector) {
        self.document_count += 1;
        self.word_counts += counts;
        self.total_word_count += counts.sum();
    }
}

/// The smoothed terms that make up one class's score for one input text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClassTerms {
    pub prior: f64,
    /// `P(word | class)` for each distinct known input word, in input order
    pub word_probabilities: Vec<f64>,
    /// `prior * Π word_probabilities`
    pub score: f64,
    /// `ln prior + Σ ln word_probabilities`
    pub log_score: f64,
}

/// A trained multinomial Naive Bayes model.
///
/// A model is immutable once built and always carries the vocabulary and tokenizer
/// configuration it was trained with. Retraining produces a new `Model`; nothing is
/// ever updated in place, so a shared reference can be used from any number of
/// threads.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) vocabulary: Vocabulary,
    pub(crate) classes: IndexMap<String, ClassStats>,
    pub(crate) document_count: usize,
}

// Compile-time verification of thread-safety
#[allow(dead_code)]
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Model>();
    }
};

impl Model {
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn tokenizer_config(&self) -> TokenizerConfig {
        self.tokenizer.config()
    }

    /// Labels in order of first appearance in the training corpus.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn class_stats(&self, label: &str) -> Option<&ClassStats> {
        self.classes.get(label)
    }

    /// Returns information about the model's current state
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            num_classes: self.classes.len(),
            class_labels: self.classes.keys().cloned().collect(),
            document_counts: self
                .classes
                .iter()
                .map(|(label, stats)| (label.clone(), stats.document_count))
                .collect(),
            vocabulary_size: self.vocabulary.len(),
            corpus_size: self.document_count,
        }
    }

    /// `P(class)`: the class's share of training documents.
    pub fn prior(&self, label: &str) -> Option<f64> {
        self.classes
            .get(label)
            .map(|stats| self.prior_of(stats))
    }

    /// Laplace-smoothed `P(word | class)`, or `None` if either is unknown.
    pub fn word_probability(&self, label: &str, word: &str) -> Option<f64> {
        let stats = self.classes.get(label)?;
        let index = self.vocabulary.index_of(word)?;
        Some(self.smoothed_probability(stats, index))
    }

    fn prior_of(&self, stats: &ClassStats) -> f64 {
        stats.document_count as f64 / self.document_count as f64
    }

    /// `(count(word, class) + 1) / (total(class) + |vocabulary|)`.
    ///
    /// The denominator is never zero: a model always has a non-empty vocabulary.
    fn smoothed_probability(&self, stats: &ClassStats, index: usize) -> f64 {
        let count = stats.word_counts[index] as f64;
        (count + 1.0) / (stats.total_word_count as f64 + self.vocabulary.len() as f64)
    }

    /// Distinct in-vocabulary words of `text`, in first-occurrence order.
    pub(crate) fn known_words(&self, text: &str) -> Vec<(String, usize)> {
        self.vocabulary.distinct_known_words(text, &self.tokenizer)
    }

    /// Computes every class's score terms for the given known words.
    ///
    /// Both prediction and explanation are derived from this routine so their
    /// numbers always agree.
    pub(crate) fn class_terms(&self, words: &[(String, usize)]) -> IndexMap<&str, ClassTerms> {
        self.classes
            .iter()
            .map(|(label, stats)| {
                let prior = self.prior_of(stats);
                let word_probabilities: Vec<f64> = words
                    .iter()
                    .map(|(_, index)| self.smoothed_probability(stats, *index))
                    .collect();
                let score = word_probabilities.iter().fold(prior, |acc, p| acc * p);
                let log_score = word_probabilities
                    .iter()
                    .fold(prior.ln(), |acc, p| acc + p.ln());
                (
                    label.as_str(),
                    ClassTerms {
                        prior,
                        word_probabilities,
                        score,
                        log_score,
                    },
                )
            })
            .collect()
    }
}
