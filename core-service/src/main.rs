//! PhishGuard CLI
//!
//! ```bash
//! phishguard predict < email.txt
//! phishguard predict --heuristic < email.txt
//! phishguard combine --safe safe_emails.csv --phishing Phishing_Email.csv
//! phishguard train --dataset final_model_dataset.jsonl --clean
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use phishguard_core::constants::{
    default_phishing_labels, APP_NAME, APP_VERSION, DATASET_SHUFFLE_SEED, DEFAULT_DATASET_PATH,
    DEFAULT_MODEL_PATH, DEFAULT_PHISHING_CSV, DEFAULT_SAFE_CSV, DEFAULT_VECTORIZER_PATH,
};
use phishguard_core::logic::dataset::{combine, CombineConfig};
use phishguard_core::logic::model::{
    heuristic_predict, ArtifactError, ModelArtifact, ModelPredictor, Predictor, PredictionResult,
};
use phishguard_core::logic::text::clean_text;
use phishguard_core::logic::training::{self, synthetic_samples, TrainConfig};
use phishguard_core::Label;

#[derive(Parser)]
#[command(name = "phishguard")]
#[command(version)]
#[command(about = "PhishGuard phishing email classifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an email read from stdin
    Predict {
        /// Model artifact (classifier weights)
        #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
        /// Vectorizer artifact
        #[arg(long, env = "VECTORIZER_PATH", default_value = DEFAULT_VECTORIZER_PATH)]
        vectorizer: PathBuf,
        /// Class labels that mean "phishing"
        #[arg(
            long,
            env = "PHISHING_LABELS",
            value_delimiter = ',',
            default_values_t = default_phishing_labels()
        )]
        labels: Vec<String>,
        /// Score the raw text with the rule-based heuristic instead
        #[arg(long)]
        heuristic: bool,
    },
    /// Build the labelled JSONL dataset from the CSV exports
    Combine {
        #[arg(long, default_value = DEFAULT_SAFE_CSV)]
        safe: PathBuf,
        #[arg(long, default_value = DEFAULT_PHISHING_CSV)]
        phishing: PathBuf,
        #[arg(long, short, default_value = DEFAULT_DATASET_PATH)]
        output: PathBuf,
        #[arg(long, default_value_t = DATASET_SHUFFLE_SEED)]
        seed: u64,
    },
    /// Fit the vectorizer and classifier and write both artifacts
    Train {
        /// JSONL dataset; the built-in demo corpus is used when omitted
        #[arg(long)]
        dataset: Option<PathBuf>,
        /// Clean texts (stopwords, lemmatization) before fitting
        #[arg(long)]
        clean: bool,
        #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
        #[arg(long, env = "VECTORIZER_PATH", default_value = DEFAULT_VECTORIZER_PATH)]
        vectorizer: PathBuf,
        #[arg(long, default_value_t = 2000)]
        max_features: usize,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Predict {
            model,
            vectorizer,
            labels,
            heuristic,
        } => predict(model, vectorizer, &labels, heuristic),
        Commands::Combine {
            safe,
            phishing,
            output,
            seed,
        } => {
            let config = CombineConfig {
                safe_csv: safe,
                phishing_csv: phishing,
                output,
                seed,
            };
            let summary = combine(&config).context("dataset combination failed")?;
            println!(
                "Saved {} records to {} ({} safe, {} phishing)",
                summary.total,
                config.output.display(),
                summary.safe_count,
                summary.phishing_count
            );
            Ok(())
        }
        Commands::Train {
            dataset,
            clean,
            model,
            vectorizer,
            max_features,
        } => train(dataset, clean, model, vectorizer, max_features),
    }
}

fn predict(model: PathBuf, vectorizer: PathBuf, labels: &[String], heuristic: bool) -> Result<()> {
    log::info!("{} v{} predictor", APP_NAME, APP_VERSION);

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("failed to read email from stdin")?;
    if text.trim().is_empty() {
        bail!("No text provided.");
    }

    let result = if heuristic {
        heuristic_predict(&text)
    } else {
        let predictor = ModelPredictor::new(load_artifact(&model, &vectorizer, labels)?);
        PredictionResult::from(predictor.predict(&clean_text(&text))?)
    };

    println!("{}", render(&result));
    Ok(())
}

/// Missing files become an error naming both artifact paths
fn load_artifact(model: &Path, vectorizer: &Path, labels: &[String]) -> Result<ModelArtifact> {
    match ModelArtifact::load(model, vectorizer, labels) {
        Ok(artifact) => Ok(artifact),
        Err(ArtifactError::NotFound(_)) => bail!(
            "model or vectorizer file not found; make sure {} and {} exist (run `phishguard train`)",
            model.display(),
            vectorizer.display()
        ),
        Err(e) => Err(e).context("failed to load model artifacts"),
    }
}

fn render(result: &PredictionResult) -> String {
    let marker = match result.label {
        Label::Phishing => "🔴",
        Label::Safe => "🟢",
    };
    match result.score {
        Some(score) => format!("Result: {} {} ({}%)", marker, result.label, score),
        None => format!("Result: {} {}", marker, result.label),
    }
}

fn train(
    dataset: Option<PathBuf>,
    clean: bool,
    model: PathBuf,
    vectorizer: PathBuf,
    max_features: usize,
) -> Result<()> {
    let mut config = TrainConfig {
        clean,
        ..Default::default()
    };
    config.vectorizer.max_features = Some(max_features);

    let trained = match &dataset {
        Some(path) => training::train_from_jsonl(path, &config)
            .with_context(|| format!("training on {} failed", path.display()))?,
        None => {
            log::info!("No dataset given, training on the built-in demo corpus");
            training::train(&synthetic_samples(), &config)?
        }
    };
    trained.save(&model, &vectorizer)?;

    println!(
        "Trained on {} samples (vocabulary {}, training accuracy {:.1}%)",
        trained.report.samples,
        trained.report.vocabulary_size,
        trained.report.training_accuracy * 100.0
    );
    println!("Saved {} and {}", model.display(), vectorizer.display());
    Ok(())
}
