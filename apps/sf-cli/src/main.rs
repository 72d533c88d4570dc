use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use sf_app::{
    AppError, AppResult, RunOptions, RunRequest, RunService, RunSource, RunTimingSummary,
    ScenarioFile, SweepAxis, export, linspace,
};
use sf_core::{DynamicDescriptors, SimulationParameters};
use sf_motion::{SynthesisOptions, synthesize_with_options};
use sf_results::RunStore;
use sf_sim::{IntegratorType, PeakResponse};

#[derive(Parser)]
#[command(name = "seismoflow")]
#[command(about = "SeismoFlow CLI - Seismic response of single-degree-of-freedom structures", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dynamic descriptors of a structure
    Info {
        #[command(flatten)]
        scenario: ScenarioArgs,
    },
    /// Synthesize a ground-motion record and write it as CSV
    Synth {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a simulation
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,
        #[command(flatten)]
        store: StoreArgs,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
        /// Output CSV file path for the response time series
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write ground and displacement scaled to unit peak instead
        #[arg(long)]
        normalized: bool,
    },
    /// List stored runs
    Runs {
        #[command(flatten)]
        store: StoreArgs,
    },
    /// Show details of a stored run
    ShowRun {
        /// Run ID to display
        run_id: String,
        #[command(flatten)]
        store: StoreArgs,
        /// Output CSV file path for the stored time series
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Vary one input over a range and tabulate peak responses
    Sweep {
        /// Input to vary (mass, damping, stiffness, intensity, duration)
        axis: String,
        /// First value
        #[arg(long)]
        from: f64,
        /// Last value
        #[arg(long)]
        to: f64,
        /// Number of points
        #[arg(long, default_value_t = 10)]
        points: usize,
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Scenario file plus per-field overrides.
#[derive(Args)]
struct ScenarioArgs {
    /// Scenario YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Mass in kg
    #[arg(long)]
    mass: Option<f64>,
    /// Damping coefficient in N·s/m
    #[arg(long)]
    damping: Option<f64>,
    /// Stiffness in N/m
    #[arg(long)]
    stiffness: Option<f64>,
    /// Record duration in seconds
    #[arg(long)]
    duration: Option<f64>,
    /// Ground-motion intensity scale
    #[arg(long)]
    intensity: Option<f64>,
    /// Noise seed
    #[arg(long)]
    seed: Option<u64>,
    /// Time integration method
    #[arg(long, value_enum)]
    method: Option<Method>,
    /// Output sampling interval in seconds
    #[arg(long)]
    dt: Option<f64>,
    /// Upper bound on the internal step in seconds (defaults to the sampling interval)
    #[arg(long)]
    max_step: Option<f64>,
}

#[derive(Args)]
struct StoreArgs {
    /// Directory holding the run store (defaults to the current directory)
    #[arg(long, default_value = ".")]
    store_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    Rk45,
    Rk4,
}

impl From<Method> for IntegratorType {
    fn from(m: Method) -> Self {
        match m {
            Method::Rk45 => IntegratorType::Rk45,
            Method::Rk4 => IntegratorType::Rk4,
        }
    }
}

impl ScenarioArgs {
    fn resolve(&self) -> AppResult<ScenarioFile> {
        let mut scenario = match &self.config {
            Some(path) => ScenarioFile::load(path)?,
            None => ScenarioFile::default(),
        };
        if let Some(v) = self.mass {
            scenario.structure.mass = v;
        }
        if let Some(v) = self.damping {
            scenario.structure.damping = v;
        }
        if let Some(v) = self.stiffness {
            scenario.structure.stiffness = v;
        }
        if let Some(v) = self.duration {
            scenario.ground_motion.duration = v;
        }
        if let Some(v) = self.intensity {
            scenario.ground_motion.intensity = v;
        }
        if let Some(v) = self.seed {
            scenario.ground_motion.seed = v;
        }
        if let Some(m) = self.method {
            scenario.solver.method = m.into();
        }
        match (self.dt, self.max_step) {
            (Some(dt), max_step) => scenario.set_output_step(dt, max_step),
            (None, Some(max_step)) => scenario.solver.max_step = max_step,
            (None, None) => {}
        }
        Ok(scenario)
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { scenario } => cmd_info(&scenario.resolve()?),
        Commands::Synth { scenario, output } => cmd_synth(&scenario.resolve()?, output.as_deref()),
        Commands::Run {
            scenario,
            store,
            no_cache,
            output,
            normalized,
        } => cmd_run(
            &scenario.resolve()?,
            &store.store_dir,
            !no_cache,
            output.as_deref(),
            normalized,
        ),
        Commands::Runs { store } => cmd_runs(&store.store_dir),
        Commands::ShowRun {
            run_id,
            store,
            output,
        } => cmd_show_run(&store.store_dir, &run_id, output.as_deref()),
        Commands::Sweep {
            axis,
            from,
            to,
            points,
            scenario,
            output,
        } => cmd_sweep(
            &scenario.resolve()?,
            axis.parse()?,
            &linspace(from, to, points),
            output.as_deref(),
        ),
    }
}

fn cmd_info(scenario: &ScenarioFile) -> AppResult<()> {
    scenario.structure.validate()?;
    let s = &scenario.structure;
    println!(
        "Structure: m = {} kg, c = {} N·s/m, k = {} N/m",
        s.mass, s.damping, s.stiffness
    );
    print_descriptors(&s.descriptors());
    Ok(())
}

fn cmd_synth(scenario: &ScenarioFile, output: Option<&Path>) -> AppResult<()> {
    let opts = SynthesisOptions {
        dt: scenario.solver.dt,
        ..SynthesisOptions::default()
    };
    let record = synthesize_with_options(&scenario.ground_motion, &opts)?;
    write_csv(output, &export::ground_motion_csv(&record))?;
    if output.is_some() {
        println!(
            "✓ Ground motion synthesized: {} samples, PGA = {:.4} m/s²",
            record.len(),
            record.pga()
        );
    }
    Ok(())
}

fn cmd_run(
    scenario: &ScenarioFile,
    store_dir: &Path,
    use_cache: bool,
    output: Option<&Path>,
    normalized: bool,
) -> AppResult<()> {
    let params = scenario.parameters();
    println!(
        "Running simulation: m = {}, c = {}, k = {}, T = {} s, intensity = {}, seed = {}",
        params.structure.mass,
        params.structure.damping,
        params.structure.stiffness,
        params.ground_motion.duration,
        params.ground_motion.intensity,
        params.ground_motion.seed
    );

    let service = RunService::with_store(RunStore::in_dir(store_dir)?);
    let request = RunRequest {
        parameters: params,
        options: RunOptions {
            use_cache,
            solver: scenario.solver,
            ..RunOptions::default()
        },
    };
    let response = service.ensure_run(&request)?;

    match response.source {
        RunSource::Computed => println!("✓ Simulation completed: {}", response.run_id),
        RunSource::Memory | RunSource::Disk => {
            println!("✓ Loaded from cache: {}", response.run_id)
        }
    }
    print_timing_summary(&response.timing);

    println!();
    print_descriptors(&params.structure.descriptors());
    println!("  Samples: {}", response.manifest.sample_count);
    println!(
        "  PGA: {:.4} m/s²",
        response.manifest.peak_ground_acceleration
    );
    print_peaks(&response.manifest.peaks);

    if let Some(path) = output {
        let csv = if normalized {
            let run = match &response.run {
                Some(run) => run.clone(),
                None => std::sync::Arc::new(sf_app::run_simulation(&params, &scenario.solver)?),
            };
            export::normalized_overlay_csv(&run)
        } else {
            export::timeseries_csv(&service.timeseries(&response)?)
        };
        write_csv(Some(path), &csv)?;
        println!("✓ Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_runs(store_dir: &Path) -> AppResult<()> {
    let store = RunStore::in_dir(store_dir)?;
    let runs = store.list_runs()?;

    if runs.is_empty() {
        println!("No stored runs in {}", store.root_dir().display());
    } else {
        println!("Stored runs:");
        for manifest in runs {
            let p = &manifest.inputs.parameters;
            println!(
                "  {} ({})  m={} c={} k={} T={} I={} seed={}",
                manifest.run_id,
                manifest.timestamp,
                p.structure.mass,
                p.structure.damping,
                p.structure.stiffness,
                p.ground_motion.duration,
                p.ground_motion.intensity,
                p.ground_motion.seed
            );
        }
    }
    Ok(())
}

fn cmd_show_run(store_dir: &Path, run_id: &str, output: Option<&Path>) -> AppResult<()> {
    println!("Loading run: {}", run_id);
    let store = RunStore::in_dir(store_dir)?;
    let manifest = store.load_manifest(run_id)?;
    let params: &SimulationParameters = &manifest.inputs.parameters;

    println!("\nRun Summary:");
    println!("  Created: {}", manifest.timestamp);
    println!("  Solver version: {}", manifest.inputs.solver_version);
    println!(
        "  Method: {:?}, dt = {} s",
        manifest.inputs.solver.method, manifest.inputs.solver.dt
    );
    println!("  Samples: {}", manifest.sample_count);
    println!("  PGA: {:.4} m/s²", manifest.peak_ground_acceleration);
    print_descriptors(&params.structure.descriptors());
    print_peaks(&manifest.peaks);

    if let Some(path) = output {
        let records = store.load_timeseries(run_id)?;
        write_csv(Some(path), &export::timeseries_csv(&records))?;
        println!("✓ Wrote {}", path.display());
    }
    Ok(())
}

fn cmd_sweep(
    scenario: &ScenarioFile,
    axis: SweepAxis,
    values: &[f64],
    output: Option<&Path>,
) -> AppResult<()> {
    if values.is_empty() {
        return Err(AppError::InvalidInput(
            "sweep needs at least one point".to_string(),
        ));
    }
    let service = RunService::new();
    let points = service.sweep(&scenario.parameters(), axis, values, &scenario.solver);
    write_csv(output, &export::sweep_csv(axis, &points))?;

    if output.is_some() {
        let failed = points.iter().filter(|p| p.outcome.is_err()).count();
        println!(
            "✓ Sweep over {}: {} points, {} failed",
            axis,
            points.len(),
            failed
        );
    }
    Ok(())
}

fn print_descriptors(d: &DynamicDescriptors) {
    for line in d.to_string().lines() {
        println!("  {line}");
    }
}

fn print_peaks(peaks: &PeakResponse) {
    println!("\nPeak response:");
    println!(
        "  |x|max = {:.6} m at t = {:.2} s",
        peaks.displacement.value, peaks.displacement.time
    );
    println!(
        "  |v|max = {:.6} m/s at t = {:.2} s",
        peaks.velocity.value, peaks.velocity.time
    );
    println!(
        "  |a|max = {:.6} m/s² at t = {:.2} s",
        peaks.acceleration.value, peaks.acceleration.time
    );
    println!(
        "  E_max = {:.6} J at t = {:.2} s",
        peaks.total_energy.value, peaks.total_energy.time
    );
}

fn print_timing_summary(timing: &RunTimingSummary) {
    println!("\nTiming summary:");
    if timing.compute_time_s > 0.0 {
        println!("  Compute: {:.3}s", timing.compute_time_s);
    }
    if timing.save_time_s > 0.0 {
        println!("  Save:    {:.3}s", timing.save_time_s);
    }
    if timing.load_cache_time_s > 0.0 {
        println!("  Cache load: {:.3}s", timing.load_cache_time_s);
    }
    println!("  Total:   {:.3}s", timing.total_time_s);
}

fn write_csv(output: Option<&Path>, csv: &str) -> AppResult<()> {
    match output {
        Some(path) => std::fs::write(path, csv)?,
        None => print!("{}", csv),
    }
    Ok(())
}
