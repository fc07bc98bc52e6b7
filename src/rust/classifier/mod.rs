use indexmap::IndexMap;

mod error;
mod tokenizer;
mod vocabulary;
mod model;
pub mod builder;
#[allow(clippy::module_inception)]
mod classifier;
mod explain;

pub use error::ClassifierError;
pub use tokenizer::{Tokenizer, TokenizerConfig};
pub use vocabulary::{CountVector, Vocabulary};
pub use model::{ClassStats, Model};
pub use builder::{train, train_with_config, ClassifierBuilder, ClassDefinition};
pub use classifier::Prediction;
pub use explain::{ClassExplanation, Explanation, WordProbability};

/// Information about the current state of a trained model
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierInfo {
    /// Number of classes the model is trained on
    pub num_classes: usize,
    /// Labels of the classes, in order of first appearance
    pub class_labels: Vec<String>,
    /// Training documents per class
    pub document_counts: IndexMap<String, usize>,
    /// Number of distinct words in the vocabulary
    pub vocabulary_size: usize,
    /// Total number of training examples
    pub corpus_size: usize,
}
