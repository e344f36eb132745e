//! # Sortrace
//!
//! A command-line racer for step-recorded sorting algorithms: two lanes sort
//! independent shuffled data sets concurrently, every comparison/swap is
//! recorded as a paired frame, and the finished timeline is replayed at a
//! fixed cadence.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use log::error;

use sortrace_lib::config::RunConfig;
use sortrace_lib::error::EngineError;
use sortrace_lib::model::{Frame, LaneState};
use sortrace_lib::playback::PlaybackDriver;
use sortrace_lib::run::RunContext;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Algorithm for the first lane (insertion, selection, quick or merge)
    #[arg(short = '1', long, default_value = "insertion", value_name = "ALGORITHM")]
    first: String,

    /// Algorithm for the second lane
    #[arg(short = '2', long, default_value = "selection", value_name = "ALGORITHM")]
    second: String,

    /// Sample size (16, 32, 48 or 64)
    #[arg(short = 'n', long, default_value_t = 16, value_name = "SIZE")]
    size: usize,

    /// Playback tick interval in milliseconds
    #[arg(short, long, default_value_t = 100, value_name = "MS")]
    interval: u64,

    /// Shuffle seed for reproducible data sets
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Number of races to run back to back
    #[arg(short, long, default_value_t = 1, value_name = "COUNT")]
    runs: u32,

    /// Read the run configuration from a JSON file
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["first", "second", "size"])]
    config: Option<String>,

    /// Record the timeline but skip playback
    #[arg(long)]
    no_playback: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();

    let code = match run(&args) {
        Ok(code) => code,
        Err(err) => {
            error!("{}", err);
            -1
        }
    };

    std::process::exit(code)
}

fn load_config(args: &Cli) -> Result<RunConfig, EngineError> {
    if let Some(path) = &args.config {
        let json = std::fs::read_to_string(path).map_err(|err| {
            EngineError::InvalidConfiguration(format!("config file {}: {}", path, err))
        })?;
        return RunConfig::from_json(&json);
    }

    RunConfig::new(args.first.parse()?, args.second.parse()?, args.size)
}

fn run(args: &Cli) -> Result<i32, EngineError> {
    let config = load_config(args)?;

    for run_index in 1..=args.runs {
        if args.runs > 1 {
            println!("Run {}/{}", run_index, args.runs);
        }

        let mut race = match args.seed {
            Some(seed) => RunContext::with_seed(config, seed)?,
            None => RunContext::new(config)?,
        };
        race.start()?;
        let timeline = race.join()?;

        println!(
            "Recorded {} frames ({} vs {}, n = {})",
            timeline.len(),
            config.algorithm1.display_name(),
            config.algorithm2.display_name(),
            config.sample_size
        );

        if args.no_playback {
            continue;
        }

        let present: Arc<Mutex<dyn Fn(usize, &Frame) + Send>> =
            Arc::new(Mutex::new(print_frame));
        let driver = PlaybackDriver::new(
            timeline,
            present,
            Duration::from_millis(args.interval),
        );
        driver.start();
        driver.sleep_until_end();
    }

    Ok(0)
}

fn print_frame(index: usize, frame: &Frame) {
    println!(
        "[{:>5}] {} | {}",
        index,
        format_lane(&frame.lane1),
        format_lane(&frame.lane2)
    );
}

fn format_lane(lane: &LaneState) -> String {
    let highlighted: Vec<String> = lane
        .highlighted
        .iter()
        .map(|index| index.to_string())
        .collect();
    format!(
        "{:<14} {:?} [{}]",
        lane.phase.label(),
        lane.values,
        highlighted.join(",")
    )
}
