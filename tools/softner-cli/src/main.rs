//! softner command-line tool
//!
//! Merges hard and soft NER annotation files into training data, prints
//! dataset statistics, and ranks the words of a story.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use softner_core::{
    CombinerConfig, Corpus, LabelScheme, MergeManifest, OutputFormat, SourceKind, StorySources,
    WordCounter,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output file used when neither the command line nor a manifest names one
const DEFAULT_OUTPUT: &str = "trainingCombinedNER.json";

/// Tokens shown in the first-sentence preview
const PREVIEW_TOKENS: usize = 10;

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "softner")]
#[command(about = "Merge hard and soft NER annotations into training data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Combine annotations and write the training document
    Merge {
        #[command(flatten)]
        input: InputArgs,

        /// Output file
        #[arg(short, long, env = "SOFTNER_OUTPUT")]
        output: Option<PathBuf>,

        /// Output format (standard or bio)
        #[arg(short, long, env = "SOFTNER_FORMAT")]
        format: Option<OutputFormat>,
    },
    /// Print statistics about the combined dataset
    Stats {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Rank the words of a story text file
    Freq {
        /// Plain-text story file
        story: PathBuf,

        /// Number of words to show at each end of the ranking
        #[arg(short = 'n', long, default_value_t = 10)]
        top: usize,
    },
}

/// Where the annotation documents come from
#[derive(Args, Debug, Default)]
struct InputArgs {
    /// Hard NER annotation file (repeatable, checked in order)
    #[arg(long = "hard", value_name = "FILE")]
    hard: Vec<PathBuf>,

    /// Soft NER annotation file (repeatable, checked in order)
    #[arg(long = "soft", value_name = "FILE")]
    soft: Vec<PathBuf>,

    /// Batch manifest listing several stories
    #[arg(short, long, conflicts_with_all = ["hard", "soft"])]
    manifest: Option<PathBuf>,

    /// Label scheme (indexed or plain)
    #[arg(short, long, env = "SOFTNER_LABEL_SCHEME")]
    label_scheme: Option<LabelScheme>,
}

/// Everything a merge or stats run needs, after resolving the manifest
#[derive(Debug)]
struct RunPlan {
    stories: Vec<StorySources>,
    config: CombinerConfig,
    format: OutputFormat,
    output: Option<PathBuf>,
}

impl InputArgs {
    /// Command-line values win over the manifest, which wins over defaults.
    fn plan(self) -> Result<RunPlan> {
        if let Some(path) = self.manifest {
            let manifest = MergeManifest::from_path(&path)
                .with_context(|| format!("Failed to read manifest {}", path.display()))?;
            let scheme = self.label_scheme.unwrap_or(manifest.label_scheme);

            return Ok(RunPlan {
                config: CombinerConfig::new().with_label_scheme(scheme),
                format: manifest.format,
                output: manifest.output,
                stories: manifest.stories,
            });
        }

        if self.hard.is_empty() && self.soft.is_empty() {
            bail!("No input files: pass --hard/--soft or --manifest");
        }

        Ok(RunPlan {
            stories: vec![StorySources::new(self.hard, self.soft)],
            config: CombinerConfig::new()
                .with_label_scheme(self.label_scheme.unwrap_or_default()),
            format: OutputFormat::default(),
            output: None,
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            input,
            output,
            format,
        } => {
            let path = run_merge(input, output, format)?;
            println!("Combined annotations written to {}", path.display());
        }
        Commands::Stats { input } => {
            print!("{}", run_stats(input)?);
        }
        Commands::Freq { story, top } => {
            print!("{}", run_freq(&story, top)?);
        }
    }

    Ok(())
}

fn load_corpus(plan: &RunPlan) -> Result<Corpus> {
    info!(
        stories = plan.stories.len(),
        scheme = %plan.config.label_scheme,
        "Combining annotations..."
    );
    Corpus::from_stories(&plan.stories, &plan.config).context("Failed to combine annotations")
}

fn run_merge(
    input: InputArgs,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<PathBuf> {
    let plan = input.plan()?;
    let corpus = load_corpus(&plan)?;
    log_preview(&corpus);

    let format = format.unwrap_or(plan.format);
    let path = output
        .or(plan.output)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    corpus
        .save(&path, format)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn run_stats(input: InputArgs) -> Result<String> {
    let plan = input.plan()?;
    let corpus = load_corpus(&plan)?;

    let mut report = String::from("Dataset Statistics:\n");
    report.push_str(&format!("  Stories: {}\n", corpus.story_count()));
    report.push_str(&format!(
        "  Hard NER files: {}\n",
        corpus.file_count(SourceKind::Hard)
    ));
    report.push_str(&format!(
        "  Soft NER files: {}\n",
        corpus.file_count(SourceKind::Soft)
    ));
    report.push_str(&corpus.statistics().to_string());
    Ok(report)
}

fn run_freq(story: &Path, top: usize) -> Result<String> {
    let counter = WordCounter::new()?;
    let freq = counter
        .count_file(story)
        .with_context(|| format!("Failed to read story {}", story.display()))?;

    let mut report = format!(
        "Total words: {} ({} distinct)\n",
        freq.total_words(),
        freq.distinct_words()
    );
    report.push_str(&format!("\nTop {top} words:\n"));
    for (word, count) in freq.top(top) {
        report.push_str(&format!("  {word:20} {count}\n"));
    }
    report.push_str(&format!("\nBottom {top} words:\n"));
    for (word, count) in freq.bottom(top) {
        report.push_str(&format!("  {word:20} {count}\n"));
    }
    Ok(report)
}

/// Log the first combined sentence with its leading token labels.
fn log_preview(corpus: &Corpus) {
    let Some(first) = corpus.annotations().first() else {
        return;
    };

    debug!(sentence = %first.sentence, "First combined sentence");
    for (token, label) in first.labeled_tokens().take(PREVIEW_TOKENS) {
        debug!("  {token:20} -> {label}");
    }
}
