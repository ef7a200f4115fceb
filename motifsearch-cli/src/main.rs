use std::fs::File;
use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use env_logger::fmt::Color;
use log::Level;
use log::LevelFilter;
use motifsearch::abc::Dna;
use motifsearch::motifs::MotifSet;
use motifsearch::search::GibbsSearch;
use motifsearch::search::GreedySearch;
use motifsearch::search::RandomizedSearch;
use motifsearch::seq::EncodedSequence;
use rand::rngs::StdRng;
use rand::SeedableRng;

// --- Parameters --------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help(true))]
struct Cli {
    /// increase logging verbosity (-v for info, -vv for debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbosity: u8,

    /// number of threads to use for independent runs (0 for all cores)
    #[arg(short = 'j', long, default_value_t = 0, global = true)]
    jobs: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a deterministic greedy motif search
    Greedy(InputArgs),
    /// Run a randomized motif search with restarts
    Randomized {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        sampling: SamplingArgs,
    },
    /// Run a Gibbs sampling motif search with restarts
    Gibbs {
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        sampling: SamplingArgs,
        /// number of sampling steps in each run
        #[arg(long, default_value_t = 100)]
        iterations: usize,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// FASTA file with the sequences to search, optionally gzipped
    #[arg(short, long, value_name = "FASTA")]
    input: PathBuf,

    /// width of the motifs to search
    #[arg(short = 'k', long = "width", value_name = "K")]
    width: usize,

    /// pseudocount added for every symbol when building profiles
    #[arg(long, default_value_t = 1)]
    pseudocounts: u32,
}

#[derive(Args, Debug)]
struct SamplingArgs {
    /// number of independent runs
    #[arg(long, default_value_t = 100)]
    runs: usize,

    /// seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,
}

impl SamplingArgs {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

// --- Logging -----------------------------------------------------------------

fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn handle_error_and_exit(err: String) -> ! {
    log::error!("{}", err);
    std::process::exit(1);
}

// --- Input -------------------------------------------------------------------

fn open_compressed<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>, std::io::Error> {
    let mut file = File::open(path).map(std::io::BufReader::new)?;
    match file.fill_buf()? {
        &[0x1f, 0x8b, ..] => Ok(flate2::read::MultiGzDecoder::new(file))
            .map(std::io::BufReader::new)
            .map(|r| Box::new(r) as Box<dyn BufRead>),
        _ => Ok(Box::new(file)),
    }
}

fn load_sequences(path: &Path) -> Result<Vec<EncodedSequence<Dna>>, String> {
    let mut reader = open_compressed(path)
        .map(noodles_fasta::io::Reader::new)
        .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;

    let mut sequences = Vec::new();
    for (i, res) in reader.records().enumerate() {
        let record = res.map_err(|e| format!("Failed to read record {}: {}", i + 1, e))?;
        let bytes = record.sequence().as_ref().to_ascii_uppercase();
        let sequence = EncodedSequence::<Dna>::encode_ascii(&bytes)
            .map_err(|e| format!("Failed to encode record {}: {}", i + 1, e))?;
        log::debug!("Record {} has length {}", i + 1, sequence.len());
        sequences.push(sequence);
    }

    log::info!(
        "Loaded {} sequences from {}",
        sequences.len(),
        path.display()
    );
    Ok(sequences)
}

// --- Output ------------------------------------------------------------------

fn write_motifs<W: Write>(mut out: W, motifs: &MotifSet<Dna>) -> std::io::Result<()> {
    for motif in motifs.iter() {
        writeln!(out, "{}", motif)?;
    }
    writeln!(out, "score\t{}", motifs.score())?;
    out.flush()
}

// --- Main --------------------------------------------------------------------

fn run(cli: Cli) -> Result<(), String> {
    if cli.jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.jobs)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
    }

    let motifs = match cli.command {
        Command::Greedy(input) => {
            let sequences = load_sequences(&input.input)?;
            GreedySearch::new(input.width)
                .pseudocounts(input.pseudocounts)
                .search(&sequences)
        }
        Command::Randomized { input, sampling } => {
            let sequences = load_sequences(&input.input)?;
            RandomizedSearch::new(input.width)
                .pseudocounts(input.pseudocounts)
                .runs(sampling.runs)
                .search(&sequences, &mut sampling.rng())
        }
        Command::Gibbs {
            input,
            sampling,
            iterations,
        } => {
            let sequences = load_sequences(&input.input)?;
            GibbsSearch::new(input.width)
                .pseudocounts(input.pseudocounts)
                .iterations(iterations)
                .runs(sampling.runs)
                .search(&sequences, &mut sampling.rng())
        }
    }
    .map_err(|e| format!("Motif search failed: {}", e))?;

    log::info!("Consensus: {}", motifs.consensus());
    write_motifs(std::io::stdout().lock(), &motifs)
        .map_err(|e| format!("Failed to write motifs: {}", e))
}

fn main() {
    let cli = Cli::parse();
    init_verbose(&cli);
    if let Err(err) = run(cli) {
        handle_error_and_exit(err);
    }
}
