use clap::Parser;
use knn::{
    experiment::{self, ExperimentConfig, DEFAULT_TRIALS},
    logging::{self, LogFormat},
    parse, plot, report,
    trial::DEFAULT_TRAIN_RATIO,
    Diagnosis,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "k-nearest-neighbor tumor classification accuracy", long_about = None)]
struct Args {
    /// Comma-separated tumor data: id, M/B diagnosis, then measurements
    #[arg(long, env = "KNN_DATA", default_value = "data/wdbc.data")]
    data: PathBuf,

    /// First row of the data file is a header
    #[arg(long)]
    has_headers: bool,

    /// Neighbor counts to evaluate
    #[arg(short = 'k', long = "neighbors", value_delimiter = ',', default_value = "1,3,5,7")]
    neighbors: Vec<usize>,

    /// Random train/test splits per neighbor count
    #[arg(long, env = "KNN_TRIALS", default_value_t = DEFAULT_TRIALS)]
    trials: usize,

    /// Fraction of records used for training
    #[arg(long, default_value_t = DEFAULT_TRAIN_RATIO)]
    train_ratio: f64,

    /// Seed for reproducible shuffles
    #[arg(long, env = "KNN_SEED")]
    seed: Option<u64>,

    /// Write an SVG chart of accuracy by k to this path
    #[arg(long)]
    plot: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(args.log_format);

    let records = parse::parse(&args.data, args.has_headers)?;
    info!(
        path = %args.data.display(),
        records = records.len(),
        features = records.arity(),
        malignant = records.count(Diagnosis::Malignant),
        benign = records.count(Diagnosis::Benign),
        "loaded data"
    );

    let config = ExperimentConfig {
        trials: args.trials,
        train_ratio: args.train_ratio,
        seed: args.seed,
    };

    let results = experiment::sweep(&records, &args.neighbors, &config)?;

    for (k, summary) in &results {
        println!("{}", report::render(*k, summary));
    }

    if let Some(path) = &args.plot {
        plot::accuracy_chart(path, &results)?;
        info!(path = %path.display(), "wrote accuracy chart");
    }

    Ok(())
}
