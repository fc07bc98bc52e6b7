//! An explainable multinomial Naive Bayes text classifier.
//!
//! Training builds a vocabulary from a labelled corpus, counts words per class and
//! keeps everything needed to reproduce each prediction word by word with
//! Laplace (add-one) smoothing.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bayeslens::Dataset;
//!
//! let model = Dataset::seed().train(Default::default())?;
//!
//! let prediction = model.predict("guerra comercial");
//! println!("Predicted class: {}", prediction.label);
//! for (label, posterior) in &prediction.posteriors {
//!     println!("{}: {:.2}%", label, posterior * 100.0);
//! }
//!
//! print!("{}", model.explain("guerra comercial").render());
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! A [`Model`] is immutable once trained; retraining returns a new one. It can be
//! shared across threads using `Arc`:
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use bayeslens::Dataset;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let model = Arc::new(Dataset::seed().train(Default::default())?);
//!
//! let mut handles = vec![];
//! for _ in 0..3 {
//!     let model = Arc::clone(&model);
//!     handles.push(thread::spawn(move || model.predict("crise nos mercados")));
//! }
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap().label, "baixa");
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod dataset;
pub mod dataset_manager;

pub use classifier::{
    train, train_with_config, ClassDefinition, ClassExplanation, ClassStats, ClassifierBuilder,
    ClassifierError, ClassifierInfo, CountVector, Explanation, Model, Prediction, Tokenizer,
    TokenizerConfig, Vocabulary, WordProbability,
};
pub use dataset::{Dataset, DatasetError, TrainingExample};
pub use dataset_manager::DatasetManager;

pub fn init_logger() {
    env_logger::init();
}
