use pattern_race::error::{Result, SimError};
use pattern_race::report::{save_report, Report};
use pattern_race::simulation::{
    simulate, simulate_serial, AggregationStrategy, RngKind, SequenceMode, SimulationConfig,
};
use pattern_race::timing::Checkpoints;

const USAGE: &str = "Usage: pattern-race [--trials N] [--seed S] [--rng smallrng|splitmix] [--aggregation atomic|sharded] [--shared-sequence] [--serial-baseline] [--output FILE]";

struct Args {
    config: SimulationConfig,
    serial_baseline: bool,
    output: Option<String>,
}

fn next_value(args: &[String], i: &mut usize, flag: &'static str) -> Result<String> {
    *i += 1;
    args.get(*i).cloned().ok_or(SimError::InvalidArgument {
        flag,
        value: String::new(),
    })
}

fn parse_args() -> Result<Args> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimulationConfig::default();
    let mut serial_baseline = false;
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--trials" => {
                let v = next_value(&args, &mut i, "--trials")?;
                config.num_trials = v.parse().map_err(|_| SimError::InvalidArgument {
                    flag: "--trials",
                    value: v.clone(),
                })?;
            }
            "--seed" => {
                let v = next_value(&args, &mut i, "--seed")?;
                config.seed = Some(v.parse().map_err(|_| SimError::InvalidArgument {
                    flag: "--seed",
                    value: v.clone(),
                })?);
            }
            "--rng" => {
                let v = next_value(&args, &mut i, "--rng")?;
                config.rng = RngKind::parse(&v).ok_or(SimError::InvalidArgument {
                    flag: "--rng",
                    value: v.clone(),
                })?;
            }
            "--aggregation" => {
                let v = next_value(&args, &mut i, "--aggregation")?;
                config.aggregation =
                    AggregationStrategy::parse(&v).ok_or(SimError::InvalidArgument {
                        flag: "--aggregation",
                        value: v.clone(),
                    })?;
            }
            "--shared-sequence" => {
                config.sequence_mode = SequenceMode::Shared;
            }
            "--serial-baseline" => {
                serial_baseline = true;
            }
            "--output" => {
                output = Some(next_value(&args, &mut i, "--output")?);
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                println!();
                println!("Options:");
                println!("  --trials N           Number of trials (default: 1000000)");
                println!("  --seed S             Base seed (default: OS entropy)");
                println!("  --rng KIND           smallrng (default) or splitmix");
                println!("  --aggregation MODE   atomic (default) or sharded");
                println!("  --shared-sequence    Reuse one sequence for both passes of a trial");
                println!("  --serial-baseline    Time a single-threaded run first");
                println!("  --output FILE        Write the report as JSON");
                println!();
                println!("Environment: RAYON_NUM_THREADS, RUST_LOG");
                std::process::exit(0);
            }
            other => {
                return Err(SimError::InvalidArgument {
                    flag: "argument",
                    value: other.to_string(),
                });
            }
        }
        i += 1;
    }

    config.validate()?;
    Ok(Args {
        config,
        serial_baseline,
        output,
    })
}

fn run() -> Result<()> {
    let mut cp = Checkpoints::start();
    let Args {
        config,
        serial_baseline,
        output,
    } = parse_args()?;
    cp.checkpoint("start");

    pattern_race::env_config::init_rayon_threads();

    if serial_baseline {
        simulate_serial(&config)?;
        cp.checkpoint("serial baseline");
    }

    let outcome = simulate(&config)?;
    cp.checkpoint("parallel run");

    let mut report = Report::from_aggregates(
        &outcome.aggregates,
        outcome.seed,
        config.sequence_mode.name(),
    );
    print!("{}", report.format_expectations());
    println!();
    print!("{}", report.format_win_matrix());
    cp.checkpoint("post-processing");

    if let Some(ref path) = output {
        report.timings = cp.segments().to_vec();
        save_report(&report, path)?;
    }

    println!();
    print!("{}", cp.summary());
    Ok(())
}

fn main() {
    pattern_race::env_config::init_logging();
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }
}
