use bayeslens::{Dataset, DatasetManager, Model, TokenizerConfig};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to classify
    text: Option<String>,

    /// Corpus CSV file (defaults to corpus.csv in the data directory)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Add a training example with this text
    #[arg(short, long, requires = "label")]
    add: Option<String>,

    /// Label of the example given with --add
    #[arg(short, long, requires = "add")]
    label: Option<String>,

    /// Restore the seed examples
    #[arg(long)]
    reset: bool,

    /// Print the training examples
    #[arg(long)]
    list: bool,

    /// Discard tokens shorter than this
    #[arg(long, default_value_t = 2)]
    min_token_length: usize,

    /// Do not lower-case text before tokenizing
    #[arg(long)]
    keep_case: bool,

    /// Print the prediction and explanation as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    prediction: &'a bayeslens::Prediction,
    explanation: &'a bayeslens::Explanation,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (manager, path) = match &args.data {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            (DatasetManager::new(dir)?, path.clone())
        }
        None => {
            let manager = DatasetManager::new_default()?;
            let path = manager.corpus_path();
            (manager, path)
        }
    };

    let mut dataset = if args.reset {
        info!("Resetting corpus to the seed examples");
        manager.reset(&path)?
    } else {
        manager.load_or_seed(&path)?
    };

    if let (Some(text), Some(label)) = (&args.add, &args.label) {
        dataset.add(text, label)?;
        manager.save(&dataset, &path)?;
        println!("Added example ({} in total)", dataset.len());
    }
    if args.list {
        print_dataset(&dataset);
    }

    let Some(text) = args.text.as_deref() else {
        return Ok(());
    };

    let config = TokenizerConfig {
        lowercase: !args.keep_case,
        min_token_length: args.min_token_length,
    };

    let start_time = Instant::now();
    let model = match dataset.train(config) {
        Ok(model) => model,
        Err(e) if e.is_insufficient_data() => {
            println!("Add more data: {}", e);
            println!("At least two classes and one example with a usable word are needed to classify.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    info!("Model trained (took {:.2?})", start_time.elapsed());

    process_input(&model, text, args.json)
}

fn process_input(model: &Model, text: &str, json: bool) -> anyhow::Result<()> {
    info!("Processing: {}", text);
    let prediction = model.predict(text);
    let explanation = model.explain(text);

    if json {
        let report = Report {
            prediction: &prediction,
            explanation: &explanation,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !prediction.has_vocabulary_overlap {
        println!("\nNo prediction possible: no word of the text is in the vocabulary.");
        println!("Class priors:");
    } else {
        println!("\nPredicted class: {}", prediction.label.to_uppercase());
        println!("Probabilities:");
    }
    for (label, posterior) in &prediction.posteriors {
        println!("  {}: {:.2}%", label, posterior * 100.0);
    }

    println!("\nExplanation:");
    print!("{}", explanation.render());
    Ok(())
}

fn print_dataset(dataset: &Dataset) {
    println!("{} training examples:", dataset.len());
    for (i, example) in dataset.examples().iter().enumerate() {
        println!("  {:>3}. [{}] {}", i + 1, example.label, example.text);
    }
}
