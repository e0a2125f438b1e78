use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use motif_finder::modules::io::{read_corpus, read_corpus_mmap, write_corpus};
use motif_finder::{Alphabet, GeneratorConfig, MotifConfig, MotifSelector, RepeatScoring, SequenceGenerator};

#[derive(Parser)]
#[command(name = "motif-finder")]
#[command(version, about = "Find the most frequent fixed-length motif in a sequence corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random corpus, one sequence per line
    Generate(GenerateArgs),

    /// Find the most frequent motif in a corpus
    Find(FindArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Output file
    #[arg(short, long)]
    output: PathBuf,

    /// Number of sequences
    #[arg(short = 'n', long, default_value = "1000000")]
    count: usize,

    /// Minimum sequence length
    #[arg(long, default_value = "5")]
    min_len: usize,

    /// Maximum sequence length
    #[arg(long, default_value = "100")]
    max_len: usize,

    /// Symbols to draw from
    #[arg(short, long, default_value = "ACGT")]
    alphabet: String,

    /// Comma-separated symbol weights, in alphabet order (default: uniform)
    #[arg(short, long, value_delimiter = ',')]
    weights: Vec<f64>,

    /// RNG seed
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Number of threads (0 = all available cores)
    #[arg(short = 't', long, default_value = "0")]
    threads: usize,
}

#[derive(Args)]
struct FindArgs {
    /// Corpus file, one sequence per line
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Motif length
    #[arg(short = 'k', long)]
    motif_size: Option<usize>,

    /// Ordered motif alphabet
    #[arg(short, long)]
    alphabet: Option<String>,

    /// Number of threads (0 = all available cores)
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Compute repeat scores for every candidate, not only count leaders
    #[arg(long)]
    exhaustive: bool,

    /// Report the N best candidates instead of only the winner
    #[arg(long)]
    top: Option<usize>,

    /// Memory-map the corpus instead of reading it through a buffer
    #[arg(long)]
    mmap: bool,

    /// Reject corpora containing symbols outside the alphabet
    #[arg(long)]
    strict: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Find(args) => find(args, &mut io::stdout().lock()),
    }
}

fn generate(args: GenerateArgs) -> Result<(), Box<dyn Error + Send + Sync>> {
    let alphabet: Alphabet = args.alphabet.parse()?;
    let config = GeneratorConfig {
        num_sequences: args.count,
        min_len: args.min_len,
        max_len: args.max_len,
        weights: args.weights,
        seed: args.seed,
        num_workers: args.threads,
    };

    let generator = SequenceGenerator::new(config, alphabet)?;
    let sequences = generator.generate()?;
    write_corpus(&args.output, &sequences)?;
    Ok(())
}

/// Build the search configuration: the JSON file if given, then any flags on top
fn resolve_config(args: &FindArgs) -> Result<MotifConfig, Box<dyn Error + Send + Sync>> {
    let mut config = match &args.config {
        Some(path) => MotifConfig::from_json(&fs::read_to_string(path)?)?,
        None => MotifConfig::default(),
    };
    if let Some(motif_size) = args.motif_size {
        config.motif_size = motif_size;
    }
    if let Some(alphabet) = &args.alphabet {
        config.alphabet = alphabet.parse()?;
    }
    if let Some(threads) = args.threads {
        config.num_workers = threads;
    }
    if args.exhaustive {
        config.repeat_scoring = RepeatScoring::Exhaustive;
    }

    config.validate()?;
    Ok(config)
}

fn find<W: Write>(args: FindArgs, out: &mut W) -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = resolve_config(&args)?;
    // Fails on bad arguments before the corpus is read
    let selector = MotifSelector::new(&config)?;

    let corpus = if args.mmap {
        read_corpus_mmap(&args.input)?
    } else {
        read_corpus(&args.input)?
    };
    if args.strict {
        corpus.validate(&config.alphabet)?;
    }

    match args.top {
        Some(n) => {
            let ranked = selector.rank(corpus.sequences(), n)?;
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&ranked)?)?;
            } else {
                for hit in &ranked {
                    writeln!(out, "{}\t{}\t{}", hit.motif, hit.count, hit.repeat_score)?;
                }
            }
        }
        None => {
            let hit = selector.select_hit(corpus.sequences())?;
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&hit)?)?;
            } else {
                writeln!(out, "{}", hit.map(|h| h.motif).unwrap_or_default())?;
            }
        }
    }

    Ok(())
}
