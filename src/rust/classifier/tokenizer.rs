use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("word pattern is valid");
}

/// Controls how text is split into tokens.
///
/// The same configuration is used to build the vocabulary, to vectorize input
/// text and to enumerate the words of an explanation, so it is stored inside the
/// trained [`Model`](super::Model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// Lower-case text before splitting
    pub lowercase: bool,
    /// Tokens with fewer characters than this are discarded
    pub min_token_length: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_length: 2,
        }
    }
}

/// Splits text into word tokens: maximal runs of Unicode word characters.
///
/// Punctuation and whitespace act as separators, so `"crise, guerra!"` yields
/// `["crise", "guerra"]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> TokenizerConfig {
        self.config
    }

    /// Returns every token of `text` in order, repetitions included.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.config.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        WORD.find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| token.chars().count() >= self.config.min_token_length)
            .map(str::to_string)
            .collect()
    }
}
