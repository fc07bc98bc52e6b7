use thiserror::Error;

/// Represents the different types of errors that can occur while training the classifier.
///
/// Every variant is a recoverable precondition failure: the caller is expected to
/// report it (e.g. "add more data") and keep using any previously trained model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// No training examples were supplied, or none of them produced a token
    #[error("Empty corpus: at least one training example with a usable word is required")]
    EmptyCorpus,
    /// Fewer than two distinct labels are present, so prediction would be vacuous
    #[error("Single class: only '{label}' is present, at least 2 distinct labels are required")]
    SingleClass { label: String },
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ClassifierError {
    /// Whether the corpus itself is too small to train on, so the user should add
    /// more examples rather than fix their input.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::EmptyCorpus | Self::SingleClass { .. })
    }
}
