//! HH Simulator - Entry point
//!
//! Runs one Hodgkin-Huxley simulation headlessly and reports the trace.
//!
//! CLI Usage:
//!   cargo run                                   # Classic run: 10 ms, one 100 μA pulse at 2.5 ms
//!   cargo run -- --params data/parameters/simulation.json
//!   cargo run -- --total 30 --dt 0.005 --csv trace.csv
//!   cargo run -- --no-stimulus --stimulus 20 1.0 0.5 --json run.json
//!   cargo run -- --csv --json                   # Timestamped files under exports/

use std::iter::Peekable;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use hh_simulator::{
    analysis::TraceSummary,
    config::Parameters,
    export::{export_series_json, export_series_json_to, CsvExporter},
    validate_trace, Sample, SampleSink, SimulationEngine, Stimulus, TimeSeries,
};

/// Where an export goes
#[derive(Debug, Clone, PartialEq)]
enum OutputTarget {
    /// Timestamped file under `exports/`
    Auto,
    File(PathBuf),
}

/// Command-line options
#[derive(Debug, Default)]
struct Options {
    params_path: Option<PathBuf>,
    total_time_ms: Option<f64>,
    dt_ms: Option<f64>,
    no_stimulus: bool,
    extra_stimuli: Vec<Stimulus>,
    csv: Option<OutputTarget>,
    json: Option<OutputTarget>,
    quiet: bool,
}

fn next_value<'a, I: Iterator<Item = &'a String>>(args: &mut I, flag: &str) -> Result<&'a String> {
    args.next()
        .with_context(|| format!("{} requires a value", flag))
}

fn next_number<'a, I: Iterator<Item = &'a String>>(args: &mut I, flag: &str) -> Result<f64> {
    let raw = next_value(args, flag)?;
    raw.parse()
        .with_context(|| format!("{} expects a number, got {:?}", flag, raw))
}

/// Path following a flag, or `Auto` when the next argument is another flag
fn output_target<'a, I: Iterator<Item = &'a String>>(args: &mut Peekable<I>) -> OutputTarget {
    match args.next_if(|next| !next.starts_with('-')) {
        Some(path) => OutputTarget::File(PathBuf::from(path)),
        None => OutputTarget::Auto,
    }
}

/// Parse command line arguments
fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter().skip(1).peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--params" | "-p" => {
                options.params_path = Some(PathBuf::from(next_value(&mut iter, arg)?));
            }
            "--total" | "-t" => options.total_time_ms = Some(next_number(&mut iter, arg)?),
            "--dt" => options.dt_ms = Some(next_number(&mut iter, arg)?),
            "--no-stimulus" => options.no_stimulus = true,
            "--stimulus" | "-s" => {
                let amplitude = next_number(&mut iter, arg)?;
                let start = next_number(&mut iter, arg)?;
                let duration = next_number(&mut iter, arg)?;
                options
                    .extra_stimuli
                    .push(Stimulus::new(amplitude, start, duration));
            }
            "--csv" => options.csv = Some(output_target(&mut iter)),
            "--json" => options.json = Some(output_target(&mut iter)),
            "--quiet" | "-q" => options.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument {:?} (try --help)", other),
        }
    }

    Ok(options)
}

fn print_usage() {
    println!("HH Simulator - Hodgkin-Huxley membrane simulation");
    println!();
    println!("Usage: hh-simulator [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -p, --params FILE           Load parameters from JSON");
    println!("  -t, --total MS              Run length in ms");
    println!("      --dt MS                 Integration step in ms");
    println!("      --no-stimulus           Drop the configured stimuli");
    println!("  -s, --stimulus AMP START DUR  Add a pulse (μA/cm², ms, ms)");
    println!("      --csv [FILE]            Stream samples to CSV");
    println!("      --json [FILE]           Write the whole run as JSON");
    println!("                              (without FILE: timestamped file in exports/)");
    println!("  -q, --quiet                 Skip the summary printout");
}

/// Merge command-line overrides into the loaded parameters
fn build_parameters(options: &Options) -> Result<Parameters> {
    let mut params = match &options.params_path {
        Some(path) => Parameters::load(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => Parameters::load_or_default(),
    };

    if let Some(total) = options.total_time_ms {
        params.simulation.total_time_ms = total;
    }
    if let Some(dt) = options.dt_ms {
        params.simulation.dt_ms = dt;
    }
    if options.no_stimulus {
        params.stimuli.clear();
    }
    params.stimuli.extend(options.extra_stimuli.iter().copied());

    Ok(params)
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args)?;
    let params = build_parameters(&options)?;

    log::info!("HH Simulator starting...");
    log::info!(
        "Membrane: gK={} gNa={} gL={} mS/cm², rest={} mV",
        params.simulation.conductances.gK_max_mS,
        params.simulation.conductances.gNa_max_mS,
        params.simulation.conductances.g_leak_mS,
        params.simulation.membrane.mV_init
    );

    let mut engine = SimulationEngine::try_from(params).context("invalid configuration")?;

    let start_time = Instant::now();
    let series = match &options.csv {
        Some(target) => {
            // Stream to disk and keep an in-memory copy for the summary
            let mut exporter = match target {
                OutputTarget::Auto => CsvExporter::new(0.0)?,
                OutputTarget::File(path) => CsvExporter::create(path, 0.0)?,
            };
            let mut series = TimeSeries::new();
            engine.run(&mut TeeSink {
                first: &mut exporter,
                second: &mut series,
            })?;
            exporter.finish()?;
            series
        }
        None => engine.run_to_series()?,
    };
    let elapsed = start_time.elapsed();

    log::info!("Simulated {} steps in {:.2?}", series.len(), elapsed);

    for warning in validate_trace(&series) {
        log::warn!("{}", warning);
    }

    match &options.json {
        Some(OutputTarget::Auto) => {
            export_series_json(engine.parameters(), engine.stimuli(), &series)?;
        }
        Some(OutputTarget::File(path)) => {
            export_series_json_to(engine.parameters(), engine.stimuli(), &series, path)?;
        }
        None => {}
    }

    if !options.quiet {
        match TraceSummary::from_series(&series, engine.parameters().membrane.mV_init) {
            Some(summary) => summary.print_summary(),
            None => println!("No samples recorded"),
        }
    }

    Ok(())
}

/// Forwards each sample to two sinks in order
struct TeeSink<'a, A: ?Sized, B: ?Sized> {
    first: &'a mut A,
    second: &'a mut B,
}

impl<A, B> SampleSink for TeeSink<'_, A, B>
where
    A: SampleSink + ?Sized,
    B: SampleSink + ?Sized,
{
    fn accept(&mut self, sample: &Sample) -> hh_simulator::Result<()> {
        self.first.accept(sample)?;
        self.second.accept(sample)
    }
}
