use std::collections::BTreeSet;

use indexmap::IndexSet;
use ndarray::Array1;

use super::error::ClassifierError;
use super::tokenizer::Tokenizer;

/// Occurrence counts of each vocabulary word in one text, indexed by word index.
pub type CountVector = Array1<u64>;

/// Maps each distinct training token to a stable index.
///
/// Indices follow the lexicographic order of the tokens, so the same corpus always
/// yields the same assignment regardless of example order. Every index in
/// `0..len()` belongs to exactly one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    words: IndexSet<String>,
}

impl Vocabulary {
    /// Builds the vocabulary from every token of every text in `corpus`.
    ///
    /// Fails with [`ClassifierError::EmptyCorpus`] when the corpus is empty or
    /// contains no token at all.
    pub fn build<I, S>(corpus: I, tokenizer: &Tokenizer) -> Result<Self, ClassifierError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = corpus
            .into_iter()
            .flat_map(|text| tokenizer.tokenize(text.as_ref()))
            .collect();

        if sorted.is_empty() {
            return Err(ClassifierError::EmptyCorpus);
        }

        Ok(Self {
            words: sorted.into_iter().collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.words.get_index_of(word)
    }

    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get_index(index).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Words in index order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Counts the in-vocabulary tokens of `text`. Unknown tokens are ignored.
    pub fn vectorize(&self, text: &str, tokenizer: &Tokenizer) -> CountVector {
        let mut counts = CountVector::zeros(self.len());
        for token in tokenizer.tokenize(text) {
            if let Some(index) = self.index_of(&token) {
                counts[index] += 1;
            }
        }
        counts
    }

    /// Distinct in-vocabulary tokens of `text` with their indices, in order of
    /// first occurrence.
    pub fn distinct_known_words(&self, text: &str, tokenizer: &Tokenizer) -> Vec<(String, usize)> {
        let mut seen = IndexSet::new();
        let mut words = Vec::new();
        for token in tokenizer.tokenize(text) {
            if let Some(index) = self.index_of(&token) {
                if seen.insert(index) {
                    words.push((token, index));
                }
            }
        }
        words
    }
}
