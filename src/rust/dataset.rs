//! The mutable list of labelled training examples and its CSV representation.

use std::io;

use serde::{Deserialize, Serialize};

use crate::classifier::{train_with_config, ClassifierError, Model, Tokenizer, TokenizerConfig};

/// Header line of the corpus file.
pub const CSV_HEADER: [&str; 2] = ["Frase", "Classe"];

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Invalid header: expected 'Frase,Classe', got '{0}'")]
    InvalidHeader(String),
    #[error("Invalid example: {0}")]
    Validation(String),
}

/// A labelled text. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrainingExample {
    pub text: String,
    pub label: String,
}

impl TrainingExample {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

impl<T: Into<String>, L: Into<String>> From<(T, L)> for TrainingExample {
    fn from((text, label): (T, L)) -> Self {
        Self::new(text, label)
    }
}

/// The ordered training corpus owned by the host.
///
/// Every change is followed by a full retrain through [`Dataset::train`]; the
/// model is never updated incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    examples: Vec<TrainingExample>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_examples(examples: impl IntoIterator<Item = TrainingExample>) -> Self {
        Self {
            examples: examples.into_iter().collect(),
        }
    }

    /// The six market headlines the demo starts with.
    pub fn seed() -> Self {
        Self::from_examples(
            [
                ("fim da guerra comercial e crise", "alta"),
                ("mercados em alta depois dos resultados", "alta"),
                ("pressao do exercito derruba evo morales", "alta"),
                ("medo de guerra comercial derruba mercados", "baixa"),
                ("em alta do petroleo e crise", "baixa"),
                ("em crise guerra comercial derruba mercado", "baixa"),
            ]
            .into_iter()
            .map(TrainingExample::from),
        )
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Appends an example. Text and label are trimmed and must not be blank.
    pub fn add(&mut self, text: &str, label: &str) -> Result<(), DatasetError> {
        let (text, label) = (text.trim(), label.trim());
        if text.is_empty() {
            return Err(DatasetError::Validation("text cannot be empty".into()));
        }
        if label.is_empty() {
            return Err(DatasetError::Validation("label cannot be empty".into()));
        }
        self.examples.push(TrainingExample::new(text, label));
        Ok(())
    }

    /// Restores the seed corpus.
    pub fn reset(&mut self) {
        *self = Self::seed();
    }

    pub fn clear(&mut self) {
        self.examples.clear();
    }

    /// Distinct labels in order of first appearance.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for example in &self.examples {
            if !labels.contains(&example.label.as_str()) {
                labels.push(&example.label);
            }
        }
        labels
    }

    /// Whether [`Dataset::train`] can succeed with `config`: at least two distinct
    /// labels and at least one example with a usable token.
    pub fn is_trainable(&self, config: TokenizerConfig) -> bool {
        let tokenizer = Tokenizer::new(config);
        self.labels().len() >= 2
            && self
                .examples
                .iter()
                .any(|e| !tokenizer.tokenize(&e.text).is_empty())
    }

    pub fn train(&self, config: TokenizerConfig) -> Result<Model, ClassifierError> {
        train_with_config(&self.examples, config)
    }

    /// Parses a corpus from CSV text with a `Frase,Classe` header.
    pub fn from_csv(input: &str) -> Result<Self, DatasetError> {
        let mut records = parse_csv(input)?.into_iter();

        match records.next() {
            Some((_, header)) if header == CSV_HEADER => {}
            Some((_, header)) => return Err(DatasetError::InvalidHeader(header.join(","))),
            None => return Err(DatasetError::InvalidHeader(String::new())),
        }

        let mut dataset = Self::new();
        for (line, mut fields) in records {
            if fields.len() != 2 {
                return Err(DatasetError::Parse {
                    line,
                    message: format!("expected 2 fields, found {}", fields.len()),
                });
            }
            let label = fields.pop().unwrap_or_default();
            let text = fields.pop().unwrap_or_default();
            dataset.add(&text, &label).map_err(|e| DatasetError::Parse {
                line,
                message: e.to_string(),
            })?;
        }
        Ok(dataset)
    }

    /// Serializes the corpus as CSV with a `Frase,Classe` header.
    pub fn to_csv(&self) -> String {
        let mut out = CSV_HEADER.join(",");
        out.push('\n');
        for example in &self.examples {
            out.push_str(&quote_field(&example.text));
            out.push(',');
            out.push_str(&quote_field(&example.label));
            out.push('\n');
        }
        out
    }
}

fn quote_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits CSV text into records, each tagged with the line it starts on.
/// Blank lines are skipped.
fn parse_csv(input: &str) -> Result<Vec<(usize, Vec<String>)>, DatasetError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut after_quote = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => {
                    in_quotes = false;
                    after_quote = true;
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        if after_quote && !matches!(c, ',' | '\n' | '\r') {
            return Err(DatasetError::Parse {
                line,
                message: format!("unexpected '{}' after closing quote", c),
            });
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => {
                fields.push(std::mem::take(&mut field));
                after_quote = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                if !(fields.len() == 1 && fields[0].is_empty()) {
                    records.push((record_line, std::mem::take(&mut fields)));
                }
                fields.clear();
                after_quote = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(DatasetError::Parse {
            line: record_line,
            message: "unterminated quoted field".into(),
        });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push((record_line, fields));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_corpus() {
        let dataset = Dataset::seed();
        assert_eq!(dataset.len(), 6);
        assert_eq!(dataset.labels(), vec!["alta", "baixa"]);
        assert!(dataset.is_trainable(TokenizerConfig::default()));
    }

    #[test]
    fn test_not_trainable_without_usable_tokens() {
        let dataset = Dataset::from_examples(vec![
            TrainingExample::new("a", "x"),
            TrainingExample::new("b", "y"),
        ]);
        assert!(!dataset.is_trainable(TokenizerConfig::default()));
        assert_eq!(
            dataset.train(TokenizerConfig::default()).unwrap_err(),
            ClassifierError::EmptyCorpus
        );

        let single_chars = TokenizerConfig { lowercase: true, min_token_length: 1 };
        assert!(dataset.is_trainable(single_chars));
        assert!(dataset.train(single_chars).is_ok());
    }

    #[test]
    fn test_add_reset_clear() {
        let mut dataset = Dataset::seed();
        dataset.add("  petroleo dispara ", "alta").unwrap();
        assert_eq!(dataset.len(), 7);
        assert_eq!(dataset.examples()[6], TrainingExample::new("petroleo dispara", "alta"));

        assert!(matches!(dataset.add(" ", "alta"), Err(DatasetError::Validation(_))));
        assert!(matches!(dataset.add("texto", ""), Err(DatasetError::Validation(_))));

        dataset.reset();
        assert_eq!(dataset, Dataset::seed());

        dataset.clear();
        assert!(dataset.is_empty());
        assert!(!dataset.is_trainable(TokenizerConfig::default()));
        assert_eq!(dataset.train(TokenizerConfig::default()).unwrap_err(), ClassifierError::EmptyCorpus);
    }

    #[test]
    fn test_csv_quoting() {
        let dataset = Dataset::from_examples(vec![
            TrainingExample::new("alta, forte", "alta"),
            TrainingExample::new("dito \"queda\"", "baixa"),
            TrainingExample::new("simples", "baixa"),
        ]);
        let csv = dataset.to_csv();
        assert_eq!(
            csv,
            "Frase,Classe\n\"alta, forte\",alta\n\"dito \"\"queda\"\"\",baixa\nsimples,baixa\n"
        );
        assert_eq!(Dataset::from_csv(&csv).unwrap(), dataset);
    }

    #[test]
    fn test_csv_crlf_and_blank_lines() {
        let dataset = Dataset::from_csv("Frase,Classe\r\nmercados em alta,alta\r\n\r\ncrise,baixa").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.examples()[1], TrainingExample::new("crise", "baixa"));
    }

    #[test]
    fn test_csv_errors() {
        assert!(matches!(Dataset::from_csv(""), Err(DatasetError::InvalidHeader(_))));
        assert!(matches!(
            Dataset::from_csv("Text,Label\na,b\n"),
            Err(DatasetError::InvalidHeader(h)) if h == "Text,Label"
        ));
        assert!(matches!(
            Dataset::from_csv("Frase,Classe\nok,alta\nsem classe\n"),
            Err(DatasetError::Parse { line: 3, .. })
        ));
        assert!(matches!(
            Dataset::from_csv("Frase,Classe\n\"aberto,alta\n"),
            Err(DatasetError::Parse { line: 2, .. })
        ));
        assert!(matches!(
            Dataset::from_csv("Frase,Classe\nok,alta\n\"ab\"c,baixa\n"),
            Err(DatasetError::Parse { line: 3, .. })
        ));
        assert_eq!(
            Dataset::from_csv("Frase,Classe\r\n\"ab\",\"baixa\"\r\n").unwrap().examples()[0],
            TrainingExample::new("ab", "baixa")
        );
    }
}
