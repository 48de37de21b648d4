use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};
use spell_bloom::config::{DEFAULT_BYTES_PER_HASH, DEFAULT_MEMORY_BUDGET};
use spell_bloom::dictionary::{self, DEFAULT_DICTIONARY};
use spell_bloom::evaluator::{DEFAULT_SAMPLES, DEFAULT_WORD_LENGTH};
use spell_bloom::{expected_false_positive_rate, BloomFilter, DigestAlgorithm, Evaluator, Filter, FilterConfig};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spellcheck", about = "Bloom filter spell checker")]
struct Cli {
    #[command(flatten)]
    filter: FilterArgs,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Args)]
struct FilterArgs {
    /// Digest the bit indices are sliced from
    #[arg(long, global = true, value_enum, default_value_t = DigestAlgorithm::Md5)]
    algorithm: DigestAlgorithm,

    /// Digest bytes per index; the filter has 2^(8 * B) bits
    #[arg(long, global = true, value_name = "B", default_value_t = DEFAULT_BYTES_PER_HASH)]
    bytes_per_hash: usize,

    /// Largest bit array to allocate, in bytes
    #[arg(long, global = true, value_name = "BYTES", default_value_t = DEFAULT_MEMORY_BUDGET)]
    memory_budget: usize,
}

impl FilterArgs {
    fn config(&self) -> FilterConfig {
        FilterConfig::new(self.algorithm, self.bytes_per_hash).with_memory_budget(self.memory_budget)
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Load a dictionary and save the filter
    Build {
        #[arg(long, default_value = DEFAULT_DICTIONARY)]
        dictionary: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },

    /// Check words against a dictionary or a saved filter
    Check {
        #[arg(long, conflicts_with = "filter_file")]
        dictionary: Option<PathBuf>,
        /// Saved filter produced by `build`
        #[arg(long = "filter")]
        filter_file: Option<PathBuf>,
        /// Words to check; read from stdin, one per line, when omitted
        words: Vec<String>,
    },

    /// Measure the false positive rate with random words
    Evaluate {
        #[arg(long, default_value = DEFAULT_DICTIONARY)]
        dictionary: PathBuf,
        #[arg(long, default_value_t = DEFAULT_SAMPLES)]
        samples: usize,
        #[arg(long, default_value_t = DEFAULT_WORD_LENGTH)]
        length: usize,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<ExitCode> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.filter.config();
    match cli.cmd {
        Cmd::Build { dictionary, output } => {
            let mut filter = Filter::new(&config)?;
            load_dictionary(&mut filter, &dictionary)?;
            let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
            let mut writer = BufWriter::new(file);
            filter.write_to(&mut writer)?;
            writer.flush()?;
            info!(output = %output.display(), fill_ratio = filter.fill_ratio(), "saved filter");
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Check {
            dictionary,
            filter_file,
            words,
        } => {
            let filter = match filter_file {
                Some(path) => {
                    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
                    Filter::read_from(BufReader::new(file), &config)
                        .with_context(|| format!("reading filter {}", path.display()))?
                }
                None => {
                    let mut filter = Filter::new(&config)?;
                    let path = dictionary.unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARY));
                    load_dictionary(&mut filter, &path)?;
                    filter
                }
            };
            let words = if words.is_empty() {
                stdin_words()?
            } else {
                normalize(words)
            };
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let mut rejected = 0;
            for word in &words {
                if filter.may_contain(word) {
                    writeln!(out, "{}: ok", word)?;
                } else {
                    rejected += 1;
                    writeln!(out, "{}: misspelled", word)?;
                }
            }
            Ok(if rejected == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Cmd::Evaluate {
            dictionary,
            samples,
            length,
            seed,
        } => {
            if samples == 0 {
                bail!("--samples must be positive");
            }
            let mut filter = Filter::new(&config)?;
            let truth = load_dictionary(&mut filter, &dictionary)?;
            let evaluator = Evaluator::new(samples, length);
            let report = match seed {
                Some(seed) => evaluator.evaluate(&filter, &truth, &mut StdRng::seed_from_u64(seed)),
                None => evaluator.evaluate(&filter, &truth, &mut thread_rng()),
            };
            let expected = expected_false_positive_rate(filter.hash_count(), truth.len(), filter.bit_count());
            println!("{}", report);
            println!(
                "expected {:.4}% for {} words, k = {}, m = {}, fill ratio {:.4}",
                expected * 100.0,
                truth.len(),
                filter.hash_count(),
                filter.bit_count(),
                filter.fill_ratio()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_dictionary(filter: &mut Filter, path: &Path) -> Result<spell_bloom::WordSet> {
    dictionary::load_path(filter, path).with_context(|| format!("loading dictionary {}", path.display()))
}

fn stdin_words() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let lines = stdin.lock().lines().collect::<io::Result<Vec<_>>>()?;
    Ok(normalize(lines))
}

// Same trimming the dictionary loader applies, blank entries dropped.
fn normalize<I: IntoIterator<Item = String>>(words: I) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_owned())
        .filter(|w| !w.is_empty())
        .collect()
}
