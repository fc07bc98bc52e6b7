use indexmap::IndexMap;
use log::{debug, info};

use super::error::ClassifierError;
use super::model::{ClassStats, Model};
use super::tokenizer::{Tokenizer, TokenizerConfig};
use super::vocabulary::Vocabulary;
use crate::dataset::TrainingExample;

/// Trains a model on `corpus` with the default tokenizer configuration.
///
/// Training is a pure function of the corpus: the same examples always yield the
/// same vocabulary indices, label order and counts.
///
/// # Errors
/// * [`ClassifierError::EmptyCorpus`] if there are no examples or no example has a usable word
/// * [`ClassifierError::SingleClass`] if fewer than two distinct labels are present
/// * [`ClassifierError::ValidationError`] if a label is blank
///
/// # Example
/// ```
/// use bayeslens::{train, TrainingExample};
///
/// let model = train(&[
///     TrainingExample::new("stocks rally", "up"),
///     TrainingExample::new("stocks slump", "down"),
/// ])?;
/// assert_eq!(model.labels().collect::<Vec<_>>(), vec!["up", "down"]);
/// # Ok::<(), bayeslens::ClassifierError>(())
/// ```
pub fn train(corpus: &[TrainingExample]) -> Result<Model, ClassifierError> {
    train_with_config(corpus, TokenizerConfig::default())
}

/// Trains a model on `corpus` using the given tokenizer configuration.
pub fn train_with_config(
    corpus: &[TrainingExample],
    config: TokenizerConfig,
) -> Result<Model, ClassifierError> {
    if corpus.is_empty() {
        return Err(ClassifierError::EmptyCorpus);
    }
    if let Some(pos) = corpus.iter().position(|e| e.label.trim().is_empty()) {
        return Err(ClassifierError::ValidationError(format!(
            "Example {} has an empty label",
            pos + 1
        )));
    }

    let mut labels: Vec<&str> = Vec::new();
    for example in corpus {
        if !labels.contains(&example.label.as_str()) {
            labels.push(&example.label);
        }
    }
    if labels.len() < 2 {
        return Err(ClassifierError::SingleClass {
            label: labels[0].to_string(),
        });
    }

    let tokenizer = Tokenizer::new(config);
    let vocabulary = Vocabulary::build(corpus.iter().map(|e| e.text.as_str()), &tokenizer)?;

    let mut classes: IndexMap<String, ClassStats> = labels
        .iter()
        .map(|label| (label.to_string(), ClassStats::empty(vocabulary.len())))
        .collect();

    for example in corpus {
        let counts = vocabulary.vectorize(&example.text, &tokenizer);
        if let Some(stats) = classes.get_mut(&example.label) {
            stats.add_document(&counts);
        }
    }

    info!(
        "Trained model on {} examples: {} labels, vocabulary of {} words",
        corpus.len(),
        classes.len(),
        vocabulary.len()
    );
    for (label, stats) in &classes {
        debug!(
            "Class '{}': {} documents, {} words",
            label, stats.document_count, stats.total_word_count
        );
    }

    Ok(Model {
        tokenizer,
        vocabulary,
        classes,
        document_count: corpus.len(),
    })
}

/// Represents a class definition with a required label and its training examples
#[derive(Debug, Clone)]
pub struct ClassDefinition {
    /// The unique identifier for the class
    pub label: String,
    /// Example texts that belong to this class
    pub examples: Vec<String>,
}

impl ClassDefinition {
    /// Creates a new class definition with no examples yet
    ///
    /// # Example
    /// ```
    /// use bayeslens::ClassDefinition;
    ///
    /// let class = ClassDefinition::new("alta");
    /// assert!(class.examples.is_empty());
    /// ```
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            examples: Vec::new(),
        }
    }

    /// Adds examples to the class definition
    ///
    /// # Example
    /// ```
    /// use bayeslens::ClassDefinition;
    ///
    /// let class = ClassDefinition::new("alta")
    ///     .with_examples(vec!["mercados em alta", "fim da crise"]);
    /// assert_eq!(class.examples.len(), 2);
    /// ```
    pub fn with_examples(mut self, examples: Vec<impl Into<String>>) -> Self {
        self.examples.extend(examples.into_iter().map(Into::into));
        self
    }
}

/// A builder for training a [`Model`] with a fluent interface.
///
/// ```
/// # fn main() -> Result<(), bayeslens::ClassifierError> {
/// use bayeslens::{ClassDefinition, ClassifierBuilder};
///
/// let model = ClassifierBuilder::new()
///     .add_class(ClassDefinition::new("alta").with_examples(vec!["mercados em alta"]))?
///     .add_class(ClassDefinition::new("baixa").with_examples(vec!["guerra comercial derruba mercados"]))?
///     .build()?;
///
/// let prediction = model.predict("guerra comercial");
/// assert_eq!(prediction.label, "baixa");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct ClassifierBuilder {
    examples: Vec<TrainingExample>,
    tokenizer_config: TokenizerConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tokenizer configuration used for training and inference
    pub fn with_tokenizer_config(mut self, config: TokenizerConfig) -> Self {
        self.tokenizer_config = config;
        self
    }

    /// Validates class data according to the following rules:
    /// - Label must not be blank
    /// - Must have at least one example
    /// - No example text can be blank
    fn validate_class_data(label: &str, examples: &[impl AsRef<str>]) -> Result<(), ClassifierError> {
        if label.trim().is_empty() {
            return Err(ClassifierError::ValidationError("Class label cannot be empty".into()));
        }
        if examples.is_empty() {
            return Err(ClassifierError::ValidationError(format!(
                "Class '{}' must have at least one example",
                label
            )));
        }
        if let Some(pos) = examples.iter().position(|e| e.as_ref().trim().is_empty()) {
            return Err(ClassifierError::ValidationError(format!(
                "Example {} cannot be empty",
                pos + 1
            )));
        }
        Ok(())
    }

    /// Adds a class with all of its examples.
    ///
    /// # Errors
    /// Returns [`ClassifierError::ValidationError`] if the label is blank, there are no
    /// examples, an example is blank, or the label was already added as a class.
    pub fn add_class(mut self, class: ClassDefinition) -> Result<Self, ClassifierError> {
        Self::validate_class_data(&class.label, &class.examples)?;

        if self.examples.iter().any(|e| e.label == class.label) {
            return Err(ClassifierError::ValidationError(format!(
                "Class '{}' has already been added",
                class.label
            )));
        }

        let label = class.label;
        self.examples.extend(
            class
                .examples
                .into_iter()
                .map(|text| TrainingExample::new(text, label.clone())),
        );
        Ok(self)
    }

    /// Appends a single labelled example, keeping insertion order.
    pub fn add_example(mut self, example: TrainingExample) -> Self {
        self.examples.push(example);
        self
    }

    /// Appends labelled examples, keeping insertion order.
    pub fn add_examples(mut self, examples: impl IntoIterator<Item = TrainingExample>) -> Self {
        self.examples.extend(examples);
        self
    }

    /// Trains and returns the final [`Model`]
    pub fn build(self) -> Result<Model, ClassifierError> {
        train_with_config(&self.examples, self.tokenizer_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_corpus() {
        assert_eq!(train(&[]).unwrap_err(), ClassifierError::EmptyCorpus);
        assert_eq!(ClassifierBuilder::new().build().unwrap_err(), ClassifierError::EmptyCorpus);
    }

    #[test]
    fn test_corpus_without_tokens() {
        let result = train(&[TrainingExample::new("e a", "alta"), TrainingExample::new("!", "baixa")]);
        assert_eq!(result.unwrap_err(), ClassifierError::EmptyCorpus);
    }

    #[test]
    fn test_single_class() {
        let result = train(&[
            TrainingExample::new("mercados em alta", "alta"),
            TrainingExample::new("fim da crise", "alta"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ClassifierError::SingleClass { label: "alta".into() }
        );
    }

    #[test]
    fn test_blank_label() {
        let result = train(&[TrainingExample::new("mercados", " "), TrainingExample::new("crise", "baixa")]);
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
    }

    #[test]
    fn test_class_validation() {
        assert!(ClassifierBuilder::new()
            .add_class(ClassDefinition::new("").with_examples(vec!["text"]))
            .is_err());
        assert!(ClassifierBuilder::new().add_class(ClassDefinition::new("label")).is_err());
        assert!(ClassifierBuilder::new()
            .add_class(ClassDefinition::new("label").with_examples(vec!["  "]))
            .is_err());
    }

    #[test]
    fn test_duplicate_class() {
        let result = ClassifierBuilder::new()
            .add_class(ClassDefinition::new("alta").with_examples(vec!["mercados"]))
            .and_then(|b| b.add_class(ClassDefinition::new("alta").with_examples(vec!["crise"])));
        assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
    }

    #[test]
    fn test_label_order_is_first_seen() {
        let model = ClassifierBuilder::new()
            .add_example(TrainingExample::new("queda forte", "baixa"))
            .add_example(TrainingExample::new("subida forte", "alta"))
            .add_example(TrainingExample::new("queda leve", "baixa"))
            .build()
            .unwrap();
        assert_eq!(model.labels().collect::<Vec<_>>(), vec!["baixa", "alta"]);
        assert_eq!(model.info().corpus_size, 3);
        assert_eq!(model.info().document_counts["baixa"], 2);
    }

    #[test]
    fn test_tokenizer_config_is_kept() {
        let config = TokenizerConfig { lowercase: false, min_token_length: 1 };
        let model = ClassifierBuilder::new()
            .with_tokenizer_config(config)
            .add_examples(vec![
                TrainingExample::new("Alta e forte", "alta"),
                TrainingExample::new("baixa", "baixa"),
            ])
            .build()
            .unwrap();
        assert_eq!(model.tokenizer_config(), config);
        assert!(model.vocabulary().contains("Alta"));
        assert!(model.vocabulary().contains("e"));
        assert!(!model.vocabulary().contains("alta"));
    }
}
