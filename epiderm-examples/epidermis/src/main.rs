use epiderm::prelude::*;

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, prelude::*};

mod parameters;

use parameters::Parameters;

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Json file with parameters. Missing entries take their default values
    #[arg(short, long)]
    parameters: Option<std::path::PathBuf>,

    /// Seed of the random number generator
    #[arg(long)]
    seed: Option<u64>,
    /// Number of steps to simulate
    #[arg(long)]
    n_steps: Option<u64>,
    /// Number of initial stem cells
    #[arg(long, allow_negative_numbers = true)]
    n_cells: Option<i64>,
    /// Number of threads
    #[arg(long)]
    threads: Option<usize>,

    /// Save snapshots of the population into this folder
    #[arg(short, long)]
    output: Option<std::path::PathBuf>,
    /// Do not create a subfolder named by the current date
    #[arg(long)]
    no_date: bool,

    /// Print the parameters as json and exit
    #[arg(long)]
    dump_parameters: bool,
    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
    /// Increase verbosity of the log (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn parameters(&self) -> Result<Parameters, Box<dyn std::error::Error>> {
        let mut parameters = match &self.parameters {
            Some(path) => Parameters::from_file(path)?,
            None => Parameters::default(),
        };
        if let Some(seed) = self.seed {
            parameters.rng_seed = seed;
        }
        if let Some(n_steps) = self.n_steps {
            parameters.n_steps = n_steps;
        }
        if let Some(n_cells) = self.n_cells {
            parameters.n_stem_cells = n_cells;
        }
        if let Some(threads) = self.threads {
            parameters.n_threads = threads;
        }
        Ok(parameters)
    }

    fn storage(&self) -> Option<StorageBuilder> {
        self.output.as_ref().map(|location| {
            StorageBuilder::new()
                .location(location.clone())
                .add_date(!self.no_date)
        })
    }

    fn level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let stdout_log = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_level(true);
    tracing_subscriber::registry()
        .with(stdout_log.with_filter(args.level()))
        .init();

    let parameters = args.parameters()?;
    if args.dump_parameters {
        println!("{}", serde_json::to_string_pretty(&parameters)?);
        return Ok(());
    }

    let settings = parameters.settings(args.storage(), !args.no_progress)?;
    let mut sim = SimulationContext::new(settings, parameters.growth()?)?;
    tracing::info!(seed = parameters.rng_seed, "created simulation");

    let n_seeded = sim.try_seed(parameters.n_stem_cells, |pos| parameters.stem_cell(pos))?;
    tracing::info!(n_seeded, "stem cells created");

    let summary = sim.run()?;
    println!(
        "Simulated {} steps: {} cells ({} divisions, {} arrests)",
        summary.n_steps, summary.n_cells, summary.n_divisions, summary.n_arrests
    );
    for (cell_type, count) in summary.counts_by_type.iter() {
        println!("{:>20}: {}", cell_type, count);
    }
    if let Some(path) = summary.storage_path {
        println!("Results saved in {}", path.display());
    }
    Ok(())
}
